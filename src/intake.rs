use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing::{info, warn};

use crate::analyze::analyze;
use crate::stats::AnalysisResult;

/// The analysis currently on display and the file it came from.
#[derive(Debug, Clone)]
pub struct Published {
    pub source: PathBuf,
    pub result: AnalysisResult,
}

/// Single display slot. Every successful analysis replaces whatever was
/// there before; nothing is merged.
#[derive(Debug, Default)]
pub struct Session {
    current: Mutex<Option<Published>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, source: PathBuf, result: AnalysisResult) {
        let mut slot = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(Published { source, result });
    }

    pub fn into_current(self) -> Option<Published> {
        self.current.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IntakeReport {
    pub analyzed: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Analyzed,
    Empty,
    Failed,
}

/// Reads a log file as text. Invalid UTF-8 is replaced with U+FFFD and a
/// leading byte-order mark is dropped; only I/O errors fail.
pub fn read_log(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read log file {:?}", path))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.strip_prefix('\u{feff}').unwrap_or(&*text).to_string())
}

/// Analyzes one file. Returns `None` when the file has no content, in
/// which case there is nothing to publish.
pub fn analyze_file(path: &Path) -> Result<Option<AnalysisResult>> {
    let start_time = Instant::now();
    let text = read_log(path)?;
    if text.is_empty() {
        info!(
            action = "skip",
            component = "log_analysis",
            file_path = ?path,
            "Log file is empty"
        );
        return Ok(None);
    }

    let result = analyze(&text);

    info!(
        action = "complete",
        component = "log_analysis",
        file_path = ?path,
        total_lines = result.summary.total_lines,
        unique_urls = result.summary.unique_urls,
        duration_ms = start_time.elapsed().as_millis(),
        "Log file analyzed"
    );
    Ok(Some(result))
}

/// Reads and analyzes every file on its own worker, publishing each result
/// into `session` as it completes. Read failures are logged and empty files
/// are skipped; neither touches the session. With several files the last
/// one to finish wins.
pub fn analyze_files(
    paths: &[PathBuf],
    max_workers: Option<usize>,
    session: &Session,
) -> Result<IntakeReport> {
    let start_time = Instant::now();

    let max_workers = max_workers.unwrap_or_else(|| {
        let cpu_count = num_cpus::get();
        std::cmp::min(cpu_count, 8)
    });

    info!(
        action = "configure",
        component = "log_intake",
        file_count = paths.len(),
        worker_count = max_workers,
        "Using workers for intake"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(max_workers)
        .build()
        .context("Failed to build intake worker pool")?;

    let outcomes: Vec<Outcome> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| match analyze_file(path) {
                Ok(Some(result)) => {
                    session.publish(path.clone(), result);
                    Outcome::Analyzed
                }
                Ok(None) => Outcome::Empty,
                Err(e) => {
                    warn!(
                        action = "read",
                        component = "log_intake",
                        file_path = ?path,
                        error = %format!("{:#}", e),
                        "File read error"
                    );
                    Outcome::Failed
                }
            })
            .collect()
    });

    let count = |wanted: Outcome| outcomes.iter().filter(|o| **o == wanted).count();
    let report = IntakeReport {
        analyzed: count(Outcome::Analyzed),
        skipped: count(Outcome::Empty),
        failed: count(Outcome::Failed),
    };

    info!(
        action = "complete",
        component = "log_intake",
        analyzed = report.analyzed,
        skipped = report.skipped,
        failed = report.failed,
        duration_ms = start_time.elapsed().as_millis(),
        "Log intake completed"
    );
    Ok(report)
}
