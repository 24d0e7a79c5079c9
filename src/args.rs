use clap::Parser;
use std::path::PathBuf;

use crate::export::DEFAULT_REPORT_NAME;

#[derive(Parser, Debug)]
#[command(
    name = "crawlstat",
    about = "Analyze crawler access logs for status codes, wasted crawl and top URLs",
    version,
    long_about = None
)]
pub struct Args {
    /// Crawl log files (`date,status,url,bot` per line)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Number of top URLs to display
    #[arg(short, long, default_value_t = 10)]
    pub top: usize,

    /// Write the CSV report
    #[arg(short, long)]
    pub export: bool,

    /// Path of the CSV report (implies --export)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the analysis as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of worker threads used to read files
    #[arg(short, long)]
    pub workers: Option<usize>,
}

impl Args {
    /// Where the report goes, if one was requested.
    pub fn report_path(&self) -> Option<PathBuf> {
        match (&self.output, self.export) {
            (Some(path), _) => Some(path.clone()),
            (None, true) => Some(PathBuf::from(DEFAULT_REPORT_NAME)),
            (None, false) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["crawlstat", "access.log"]);
        assert_eq!(args.files, vec![PathBuf::from("access.log")]);
        assert_eq!(args.top, 10);
        assert!(args.report_path().is_none());
    }

    #[test]
    fn test_report_path() {
        let args = Args::parse_from(["crawlstat", "-e", "a.log"]);
        assert_eq!(args.report_path(), Some(PathBuf::from("crawl_report.csv")));

        let args = Args::parse_from(["crawlstat", "-o", "out.csv", "a.log", "b.log"]);
        assert_eq!(args.report_path(), Some(PathBuf::from("out.csv")));
        assert_eq!(args.files.len(), 2);
    }

    #[test]
    fn test_files_required() {
        assert!(Args::try_parse_from(["crawlstat"]).is_err());
    }

    #[test]
    fn test_validate_rejects_zero() {
        let args = Args::parse_from(["crawlstat", "--top", "0", "a.log"]);
        assert!(crate::utils::validate_args(&args).is_err());

        let args = Args::parse_from(["crawlstat", "-w", "0", "a.log"]);
        assert!(crate::utils::validate_args(&args).is_err());
    }
}
