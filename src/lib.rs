pub mod cli;
pub mod scanner;
pub mod duplicates;
pub mod report;

pub use cli::Cli;
pub use scanner::{calculate_file_hash, enumerate_files, hash_files, HashResult, IMAGE_EXTENSIONS};
pub use duplicates::{find_duplicates, DuplicateGroup};
pub use report::{print_summary, report_file_name, write_report, ScanReport};
