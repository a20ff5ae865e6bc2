use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "check-image-dups")]
#[command(about = "A CLI tool to find duplicate image and RAW files in a directory tree")]
pub struct Cli {
    /// Directory to scan for duplicate images
    pub dir: PathBuf,

    /// Number of parallel threads for hashing (default: number of CPU cores)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Directory the result file is written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
