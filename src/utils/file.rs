use chrono::{TimeZone, Utc};
use glob::Pattern;
use std::fs;
use std::path::Path;

/// Get the creation date of a file or directory as an RFC3339 string.
pub fn get_creation_date(metadata: &fs::Metadata) -> Option<String> {
    let created = metadata.created().ok()?;
    let seconds_since_epoch = created.duration_since(std::time::UNIX_EPOCH).ok()?.as_secs() as i64;

    Utc.timestamp_opt(seconds_since_epoch, 0)
        .single()
        .map(|date| date.to_rfc3339())
}

/// Check if a path should be excluded based on a list of glob patterns.
pub fn is_path_excluded(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();

    exclude_patterns
        .iter()
        .any(|pattern| pattern.matches(&path_str) || pattern.matches(&file_name))
}

/// Compile glob patterns, skipping invalid ones.
pub fn compile_exclude_patterns(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|pattern| match Pattern::new(pattern) {
            Ok(compiled) => Some(compiled),
            Err(e) => {
                log::warn!("Ignoring invalid exclude pattern {:?}: {}", pattern, e);
                None
            }
        })
        .collect()
}
