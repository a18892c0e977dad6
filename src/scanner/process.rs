use crate::law_detection::{LawReference, LawReferenceEngine};
use crate::models::FileLinks;
use crate::scanner::ProcessResult;
use crate::utils::file::{get_creation_date, is_path_excluded};
use crate::utils::text::{check_input_length, sanitize_text};
use anyhow::{Context, Error};
use content_inspector::{ContentType, inspect};
use glob::Pattern;
use indicatif::ProgressBar;
use log::{debug, warn};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Extract law references from every text file under `path`.
///
/// `path` may be a single file. Files are processed in parallel; a failure
/// on one file is recorded in its `scan_errors` and never aborts the batch.
pub fn process<P: AsRef<Path>>(
    path: P,
    max_depth: usize,
    progress_bar: Arc<ProgressBar>,
    exclude_patterns: &[Pattern],
    engine: &LawReferenceEngine,
    max_chars: usize,
) -> Result<ProcessResult, Error> {
    let path = path.as_ref();

    if is_path_excluded(path, exclude_patterns) {
        return Ok(ProcessResult {
            files: Vec::new(),
            excluded_count: 1,
        });
    }

    let metadata =
        fs::metadata(path).with_context(|| format!("Failed to read {}", path.display()))?;
    if metadata.is_file() {
        let file_links = process_file(path, &metadata, engine, max_chars);
        progress_bar.inc(1);
        return Ok(ProcessResult {
            files: vec![file_links],
            excluded_count: 0,
        });
    }

    let mut all_files = Vec::new();
    let mut total_excluded = 0;

    let entries: Vec<_> = fs::read_dir(path)?.filter_map(Result::ok).collect();

    let mut file_entries = Vec::new();
    let mut dir_entries = Vec::new();

    for entry in entries {
        let path = entry.path();

        if is_path_excluded(&path, exclude_patterns) {
            total_excluded += 1;
            continue;
        }

        match fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => file_entries.push((path, metadata)),
            Ok(metadata) if metadata.is_dir() => dir_entries.push(path),
            _ => continue,
        }
    }

    all_files.append(
        &mut file_entries
            .par_iter()
            .map(|(path, metadata)| {
                let file_links = process_file(path, metadata, engine, max_chars);
                progress_bar.inc(1);
                file_links
            })
            .collect(),
    );

    if max_depth > 0 {
        for path in dir_entries {
            match process(
                &path,
                max_depth - 1,
                progress_bar.clone(),
                exclude_patterns,
                engine,
                max_chars,
            ) {
                Ok(mut result) => {
                    all_files.append(&mut result.files);
                    total_excluded += result.excluded_count;
                }
                Err(e) => warn!("Error processing directory {}: {:#}", path.display(), e),
            }
        }
    }

    Ok(ProcessResult {
        files: all_files,
        excluded_count: total_excluded,
    })
}

/// Extract law references from one file.
pub fn process_file(
    path: &Path,
    metadata: &fs::Metadata,
    engine: &LawReferenceEngine,
    max_chars: usize,
) -> FileLinks {
    let mut scan_errors = Vec::new();

    let links = match extract_links_from_content(path, engine, max_chars) {
        Ok(links) => links,
        Err(e) => {
            scan_errors.push(format!("{:#}", e));
            Vec::new()
        }
    };

    FileLinks {
        name: path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string(),
        path: path.to_string_lossy().to_string(),
        size: metadata.len(),
        date: get_creation_date(metadata),
        links,
        scan_errors,
    }
}

fn extract_links_from_content(
    path: &Path,
    engine: &LawReferenceEngine,
    max_chars: usize,
) -> Result<Vec<LawReference>, Error> {
    let buffer = fs::read(path)?;

    if !matches!(inspect(&buffer), ContentType::UTF_8 | ContentType::UTF_8_BOM) {
        debug!("Skipping non UTF-8 file {}", path.display());
        return Ok(Vec::new());
    }

    let content = String::from_utf8_lossy(&buffer);
    let text = sanitize_text(content.strip_prefix('\u{FEFF}').unwrap_or(&content[..]));
    check_input_length(&text, max_chars)?;

    Ok(engine.extract(&text))
}
