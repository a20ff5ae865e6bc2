use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{HumanCount, ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use md5::{Digest, Md5};
use rayon::prelude::*;
use walkdir::WalkDir;

/// Extensions eligible for duplicate checking: common raster formats plus
/// vendor RAW formats. Matched case-insensitively against the lowercase
/// file extension.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "tiff",
    "arw", // Sony
    "cr2", "cr3", // Canon
    "nef", // Nikon
    "orf", // Olympus
    "raf", // Fujifilm
    "dng", // Adobe Digital Negative
    "rw2", // Panasonic
];

/// Outcome of hashing a single file. A `None` digest means the file could
/// not be opened or read; such entries never take part in grouping.
#[derive(Debug)]
pub struct HashResult {
    pub path: PathBuf,
    pub digest: Option<String>,
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

fn has_allowed_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .is_some_and(|ext| extensions.contains(&ext.as_str()))
}

/// Recursively collects every regular file under `root` whose name does not
/// start with a dot and whose lowercase extension is in `extensions`.
///
/// Unreadable entries encountered mid-walk are skipped with a warning so one
/// bad subdirectory cannot sink a long scan.
pub fn enumerate_files(root: &PathBuf, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        anyhow::bail!("Not a directory: '{}'", root.display());
    }

    info!("Starting directory scan: '{}'", root.display());

    let pb = ProgressBar::new_spinner();
    pb.set_message("Scanning files...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let mut files = Vec::new();
    for entry in WalkDir::new(root).into_iter() {
        pb.tick();
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if is_hidden(path) || !has_allowed_extension(path, extensions) {
            debug!("Filtered out: '{}'", path.display());
            continue;
        }
        files.push(path.to_path_buf());
    }
    pb.finish_and_clear();

    info!(
        "Directory scan complete: {} candidate files",
        HumanCount(files.len() as u64)
    );

    Ok(files)
}

/// Streams the file in 8 KiB chunks through an incremental MD5 accumulator
/// and returns the 32-character lowercase hex digest.
pub fn calculate_file_hash(file_path: &PathBuf) -> Result<String> {
    debug!("Calculating hash for: '{}'", file_path.display());

    let file = File::open(file_path)
        .with_context(|| format!("Failed to open file: '{}'", file_path.display()))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Md5::new();
    let mut buffer = [0; 8192];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .with_context(|| format!("Failed to read file: '{}'", file_path.display()))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Hashes every file across a worker pool sized to `num_threads` (rayon's
/// default, all cores, when `None`). Produces exactly one [`HashResult`] per
/// input file; a failure inside one unit of work is logged and recorded as
/// an absent digest without affecting any other file.
pub fn hash_files(files: &[PathBuf], num_threads: Option<usize>) -> Result<Vec<HashResult>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads.unwrap_or(0))
        .build()
        .context("Failed to build worker thread pool")?;

    let progress_bar = ProgressBar::new(files.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg} ETA: {eta}")
            .unwrap()
            .progress_chars("#>-"),
    );

    info!("Hashing {} files...", HumanCount(files.len() as u64));

    let results: Vec<HashResult> = pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                let digest = match calculate_file_hash(path) {
                    Ok(digest) => Some(digest),
                    Err(e) => {
                        warn!("Skipping '{}': {:#}", path.display(), e);
                        None
                    }
                };
                progress_bar.inc(1);
                HashResult {
                    path: path.clone(),
                    digest,
                }
            })
            .collect()
    });

    progress_bar.finish_with_message("Hashing complete!");

    Ok(results)
}
