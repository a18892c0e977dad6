use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use log::{LevelFilter, info};
use serde_json::to_string_pretty;
use std::env;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;

use lawlinks::cli::Cli;
use lawlinks::lemmatizer::load_lemma_dictionary;
use lawlinks::models::{
    ExtraData, Header, LAWLINKS_OUTPUT_FORMAT_VERSION, Output, SystemEnvironment,
};
use lawlinks::scanner::{ProcessResult, count, process};
use lawlinks::utils::file::compile_exclude_patterns;
use lawlinks::utils::text::{check_input_length, sanitize_text};
use lawlinks::{EngineOptions, LawReferenceEngine, Lemmatizer, LowercaseLemmatizer};

fn main() -> std::io::Result<()> {
    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let multi_progress = init_logging(cli.verbose)?;
    let start_time = Utc::now();

    let engine = init_engine(&cli)?;

    match &cli.input_path {
        Some(input_path) => scan_path(&cli, input_path, &engine, &multi_progress, start_time),
        None => extract_stdin(&engine, cli.max_chars),
    }
}

fn init_logging(verbose: bool) -> Result<MultiProgress> {
    let default_level = if verbose { "debug" } else { "warn" };
    let logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .build();
    let level: LevelFilter = logger.filter();

    let multi_progress = MultiProgress::new();
    LogWrapper::new(multi_progress.clone(), logger)
        .try_init()
        .context("Failed to initialize logging")?;
    log::set_max_level(level);

    Ok(multi_progress)
}

fn init_engine(cli: &Cli) -> Result<LawReferenceEngine> {
    let lemmatizer: Arc<dyn Lemmatizer> = match &cli.lemmas {
        Some(path) => Arc::new(load_lemma_dictionary(Path::new(path))?),
        None => Arc::new(LowercaseLemmatizer),
    };

    let options = EngineOptions {
        strict_aliases: cli.strict_aliases,
        max_range_span: cli.max_range_span,
        ..EngineOptions::default()
    };

    let engine = LawReferenceEngine::from_alias_file(Path::new(&cli.aliases), lemmatizer, &options)?;
    info!(
        "Law reference engine initialized with {} alias names from {}",
        engine.index().len(),
        cli.aliases
    );
    Ok(engine)
}

fn extract_stdin(engine: &LawReferenceEngine, max_chars: usize) -> Result<()> {
    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("Failed to read text from stdin")?;

    let text = sanitize_text(&raw);
    check_input_length(&text, max_chars)?;

    let response = engine.extract_links(&text);
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

fn scan_path(
    cli: &Cli,
    input_path: &str,
    engine: &LawReferenceEngine,
    multi_progress: &MultiProgress,
    start_time: chrono::DateTime<Utc>,
) -> Result<()> {
    let exclude_patterns = compile_exclude_patterns(&cli.exclude);
    if !exclude_patterns.is_empty() {
        println!("Exclusion patterns: {:?}", cli.exclude);
    }

    let (total_files, total_dirs, excluded_count) =
        count(input_path, cli.max_depth, &exclude_patterns)
            .with_context(|| format!("Failed to walk {}", input_path))?;
    println!(
        "Found {} files in {} directories ({} items excluded)",
        total_files, total_dirs, excluded_count
    );

    let progress_bar = create_progress_bar(multi_progress, total_files)?;
    let scan_result = process(
        input_path,
        cli.max_depth,
        Arc::clone(&progress_bar),
        &exclude_patterns,
        engine,
        cli.max_chars,
    )?;
    progress_bar.finish_with_message("Scan complete!");

    let end_time = Utc::now();
    let output = create_output(
        start_time,
        end_time,
        scan_result,
        total_dirs,
        engine.index().len(),
    );
    write_output(&cli.output_file, &output)?;

    println!("JSON output written to {}", cli.output_file);
    Ok(())
}

fn create_progress_bar(multi_progress: &MultiProgress, total_files: usize) -> Result<Arc<ProgressBar>> {
    let progress_bar = multi_progress.add(ProgressBar::new(total_files as u64));
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files processed ({eta})")
            .context("Failed to create progress bar style")?
            .progress_chars("#>-"),
    );
    Ok(Arc::new(progress_bar))
}

fn create_output(
    start_time: chrono::DateTime<Utc>,
    end_time: chrono::DateTime<Utc>,
    scan_result: ProcessResult,
    total_dirs: usize,
    alias_names_count: usize,
) -> Output {
    let duration = (end_time - start_time).num_nanoseconds().unwrap_or(0) as f64 / 1_000_000_000.0;

    let extra_data = ExtraData {
        files_count: scan_result.files.len(),
        directories_count: total_dirs,
        excluded_count: scan_result.excluded_count,
        links_count: scan_result.links_count(),
        alias_names_count,
        system_environment: SystemEnvironment {
            operating_system: sys_info::os_type().ok(),
            cpu_architecture: env::consts::ARCH.to_string(),
            platform: format!(
                "{}-{}-{}",
                sys_info::os_type().unwrap_or_else(|_| "unknown".to_string()),
                sys_info::os_release().unwrap_or_else(|_| "unknown".to_string()),
                env::consts::ARCH
            ),
            rust_version: rustc_version_runtime::version().to_string(),
        },
    };

    let errors: Vec<String> = scan_result
        .files
        .iter()
        .flat_map(|file| {
            file.scan_errors
                .iter()
                .map(move |error| format!("{}: {}", file.path, error))
        })
        .collect();

    Output {
        headers: vec![Header {
            start_timestamp: start_time.to_rfc3339(),
            end_timestamp: end_time.to_rfc3339(),
            duration,
            extra_data,
            errors,
            output_format_version: LAWLINKS_OUTPUT_FORMAT_VERSION.to_string(),
        }],
        files: scan_result.files,
    }
}

fn write_output(output_file: &str, output: &Output) -> Result<()> {
    let json_output = to_string_pretty(output)?;
    let mut file = File::create(output_file)
        .with_context(|| format!("Failed to create output file {}", output_file))?;
    file.write_all(json_output.as_bytes())?;
    Ok(())
}
