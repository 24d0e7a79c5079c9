use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::stats::AnalysisResult;
use crate::utils::fixed2;

pub const DEFAULT_REPORT_NAME: &str = "crawl_report.csv";
pub const REPORT_MIME: &str = "text/csv";

const CSV_HEADERS: [&str; 8] = [
    "Page Type",
    "Total URLs in Sitemap",
    "URLs Crawled",
    "Total Crawl Hits",
    "Average Hits per Page",
    "URL",
    "Crawl Hits",
    "Waste Pattern",
];

/// Renders the report, or `None` when there are no URLs to report.
///
/// Fields are written unquoted except the URL, which is wrapped in double
/// quotes as-is. Quotes inside a URL are not escaped.
pub fn render_csv(result: &AnalysisResult) -> Result<Option<String>> {
    if result.top_urls.is_empty() {
        return Ok(None);
    }

    let entry_count = result.top_urls.len();
    let crawled = entry_count.to_string();
    let waste = format!("{}%", result.summary.wasted_crawl_pct);
    let unique_urls = result.summary.unique_urls.to_string();

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for entry in &result.top_urls {
        let hits = entry.hits.to_string();
        let average = fixed2(entry.hits as f64 / entry_count as f64);
        let url = format!("\"{}\"", entry.url);
        let row: [&str; 8] = [
            entry.page_type,
            &unique_urls,
            &crawled,
            &hits,
            &average,
            &url,
            &hits,
            &waste,
        ];
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e.error()))?;
    let mut csv = String::from_utf8(bytes).context("CSV report is not valid UTF-8")?;

    // Rows are newline-joined; no terminator after the last one.
    if csv.ends_with('\n') {
        csv.pop();
    }

    Ok(Some(csv))
}

/// Writes the report to `path`. Returns `false` (and writes nothing) when
/// there is nothing to export.
pub fn write_report(result: &AnalysisResult, path: &Path) -> Result<bool> {
    let start_time = Instant::now();

    let Some(csv) = render_csv(result)? else {
        info!(
            action = "skip",
            component = "csv_export",
            "No URLs analyzed, nothing to export"
        );
        return Ok(false);
    };

    fs::write(path, csv).with_context(|| format!("Failed to write report to {:?}", path))?;

    info!(
        action = "complete",
        component = "csv_export",
        file_path = ?path,
        mime = REPORT_MIME,
        rows = result.top_urls.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "CSV report written"
    );
    Ok(true)
}
