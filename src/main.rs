use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info};
use time::OffsetDateTime;

use check_image_dups::cli::Cli;
use check_image_dups::duplicates::find_duplicates;
use check_image_dups::report::{print_summary, write_report, ScanReport};
use check_image_dups::scanner::{enumerate_files, hash_files, IMAGE_EXTENSIONS};

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();

    // Initialize logger with millisecond timestamps
    env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    info!("Starting check-image-dups v{}", env!("CARGO_PKG_VERSION"));
    debug!("Command line arguments: {:?}", cli);

    // Convert to absolute path for better error messages
    let target_dir = cli
        .dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve path: {}", cli.dir.display()))?;

    if !target_dir.is_dir() {
        error!("Path is not a directory: {}", target_dir.display());
        anyhow::bail!("Path is not a directory: {}", target_dir.display());
    }

    info!("Target directory: '{}'", target_dir.display());

    let files = enumerate_files(&target_dir, IMAGE_EXTENSIONS)?;
    if files.is_empty() {
        println!("No candidate image files found.");
        return Ok(());
    }

    let results = hash_files(&files, cli.threads)?;
    let groups = find_duplicates(&results);

    let generated_at = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let report = ScanReport {
        target_dir,
        total_scanned: files.len(),
        groups,
        generated_at,
    };

    let output_path = write_report(&report, &cli.output_dir)?;
    print_summary(&report, &output_path);

    let elapsed = start_time.elapsed();
    info!("Program completed successfully in {:.2}s", elapsed.as_secs_f64());
    Ok(())
}
