use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use time::format_description;
use time::OffsetDateTime;

use crate::duplicates::DuplicateGroup;

/// Everything a finished scan produced, ready to be written out.
pub struct ScanReport {
    /// Absolute path of the scanned directory.
    pub target_dir: PathBuf,
    /// Number of candidate files enumerated, including ones that failed to hash.
    pub total_scanned: usize,
    pub groups: Vec<DuplicateGroup>,
    /// Captured once per run; drives both the file name and the header line.
    pub generated_at: OffsetDateTime,
}

/// Derives the `result_<YYYYMMDD_HHMMSS>.txt` file name from the report
/// timestamp.
pub fn report_file_name(generated_at: OffsetDateTime) -> String {
    let format = format_description::parse("[year][month][day]_[hour][minute][second]")
        .expect("static format description");
    let stamp = generated_at
        .format(&format)
        .expect("formatting with static description");
    format!("result_{stamp}.txt")
}

/// Writes the report as UTF-8 text into `output_dir` and returns the path of
/// the created file. Failure to create or write the file is fatal to the run.
pub fn write_report(report: &ScanReport, output_dir: &Path) -> Result<PathBuf> {
    let output_path = output_dir.join(report_file_name(report.generated_at));

    let header_format = format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]")
        .expect("static format description");
    let generated = report
        .generated_at
        .format(&header_format)
        .expect("formatting with static description");

    let file = File::create(&output_path)
        .with_context(|| format!("Failed to create result file: '{}'", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "--- Duplicate File Check Result ({generated}) ---")?;
    writeln!(writer, "Target Directory: {}", report.target_dir.display())?;
    writeln!(writer, "Total Scanned: {}", report.total_scanned)?;
    writeln!(writer)?;

    if report.groups.is_empty() {
        writeln!(writer, "No duplicates found.")?;
    } else {
        writeln!(writer, "Duplicate Group Count: {}", report.groups.len())?;
        writeln!(writer)?;

        for (i, group) in report.groups.iter().enumerate() {
            writeln!(writer, "Group {} (Hash: {})", i + 1, group.digest)?;
            for path in &group.paths {
                writeln!(writer, "  - {}", path.display())?;
            }
            writeln!(writer)?;
        }
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write result file: '{}'", output_path.display()))?;

    info!("Report written to '{}'", output_path.display());

    Ok(output_path)
}

/// Short human-readable summary on standard output.
pub fn print_summary(report: &ScanReport, output_path: &Path) {
    println!("Scanned {} files.", report.total_scanned);
    if report.groups.is_empty() {
        println!("{}", "No duplicates found.".green());
    } else {
        println!(
            "{}",
            format!("Found {} duplicate group(s).", report.groups.len()).yellow()
        );
    }
    println!("Results saved to '{}'.", output_path.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use time::{Date, Month};

    fn fixed_timestamp() -> OffsetDateTime {
        Date::from_calendar_date(2024, Month::January, 2)
            .unwrap()
            .with_hms(3, 4, 5)
            .unwrap()
            .assume_utc()
    }

    #[test]
    fn test_file_name_derives_from_timestamp() {
        assert_eq!(
            report_file_name(fixed_timestamp()),
            "result_20240102_030405.txt"
        );
    }

    #[test]
    fn test_write_report_without_duplicates() {
        let dir = TempDir::new().unwrap();
        let report = ScanReport {
            target_dir: PathBuf::from("/photos"),
            total_scanned: 3,
            groups: Vec::new(),
            generated_at: fixed_timestamp(),
        };

        let path = write_report(&report, dir.path()).unwrap();
        let contents = fs::read_to_string(&path).unwrap();

        assert_eq!(path.file_name().unwrap(), "result_20240102_030405.txt");
        assert_eq!(
            contents,
            "--- Duplicate File Check Result (2024-01-02 03:04:05) ---\n\
             Target Directory: /photos\n\
             Total Scanned: 3\n\
             \n\
             No duplicates found.\n"
        );
    }

    #[test]
    fn test_write_report_with_duplicates() {
        let dir = TempDir::new().unwrap();
        let report = ScanReport {
            target_dir: PathBuf::from("/photos"),
            total_scanned: 3,
            groups: vec![DuplicateGroup {
                digest: "900150983cd24fb0d6963f7d28e17f72".to_string(),
                paths: vec![
                    PathBuf::from("/photos/a.jpg"),
                    PathBuf::from("/photos/b.jpg"),
                ],
            }],
            generated_at: fixed_timestamp(),
        };

        let path = write_report(&report, dir.path()).unwrap();
        let contents = fs::read_to_string(&path).unwrap();

        assert_eq!(
            contents,
            "--- Duplicate File Check Result (2024-01-02 03:04:05) ---\n\
             Target Directory: /photos\n\
             Total Scanned: 3\n\
             \n\
             Duplicate Group Count: 1\n\
             \n\
             Group 1 (Hash: 900150983cd24fb0d6963f7d28e17f72)\n\
             \x20 - /photos/a.jpg\n\
             \x20 - /photos/b.jpg\n\
             \n"
        );
    }

    #[test]
    fn test_write_report_numbers_multiple_groups() {
        let dir = TempDir::new().unwrap();
        let report = ScanReport {
            target_dir: PathBuf::from("/photos"),
            total_scanned: 5,
            groups: vec![
                DuplicateGroup {
                    digest: "1111".to_string(),
                    paths: vec![PathBuf::from("/photos/a.jpg"), PathBuf::from("/photos/b.jpg")],
                },
                DuplicateGroup {
                    digest: "2222".to_string(),
                    paths: vec![PathBuf::from("/photos/c.jpg"), PathBuf::from("/photos/d.jpg")],
                },
            ],
            generated_at: fixed_timestamp(),
        };

        let path = write_report(&report, dir.path()).unwrap();
        let contents = fs::read_to_string(&path).unwrap();

        assert!(contents.contains("Duplicate Group Count: 2\n"));
        assert!(contents.contains("Group 1 (Hash: 1111)\n"));
        assert!(contents.contains("Group 2 (Hash: 2222)\n"));
    }

    #[test]
    fn test_write_report_fails_for_missing_output_dir() {
        let dir = TempDir::new().unwrap();
        let report = ScanReport {
            target_dir: PathBuf::from("/photos"),
            total_scanned: 0,
            groups: Vec::new(),
            generated_at: fixed_timestamp(),
        };

        let missing = dir.path().join("does-not-exist");
        assert!(write_report(&report, &missing).is_err());
    }
}
