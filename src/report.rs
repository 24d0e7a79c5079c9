use anyhow::{Context, Result};
use std::time::Instant;
use tracing::{info, warn};

use crate::intake::{self, Published, Session};
use crate::stats::AnalysisResult;
use crate::utils::format_number;
use crate::{export, Args};

pub fn analyze_crawl_logs(args: &Args) -> Result<Option<Published>> {
    let total_start_time = Instant::now();
    info!(
        action = "start",
        component = "crawl_analysis",
        "Starting crawl log analysis"
    );

    let session = Session::new();
    intake::analyze_files(&args.files, args.workers, &session)?;
    let published = session.into_current();

    match &published {
        Some(current) => {
            if let Some(path) = args.report_path() {
                export::write_report(&current.result, &path)?;
            }
        }
        None => warn!(
            action = "complete",
            component = "crawl_analysis",
            "No log file produced an analysis"
        ),
    }

    info!(
        action = "complete",
        component = "crawl_analysis",
        duration_ms = total_start_time.elapsed().as_millis(),
        "Analysis completed"
    );
    Ok(published)
}

pub fn print_json(published: Option<&Published>) -> Result<()> {
    let empty = AnalysisResult::default();
    let result = published.map(|p| &p.result).unwrap_or(&empty);
    let json = serde_json::to_string_pretty(result).context("Failed to serialize analysis")?;
    println!("{}", json);
    Ok(())
}

fn metric_lines(result: &AnalysisResult) -> Vec<(&'static str, String)> {
    let s = &result.summary;
    vec![
        ("Total Lines", format_number(s.total_lines)),
        ("Total Unique URLs", format_number(s.unique_urls)),
        ("2xx Count", format_number(s.status_2xx)),
        ("3xx Count", format_number(s.status_3xx)),
        ("4xx Count", format_number(s.status_4xx)),
        ("5xx Count", format_number(s.status_5xx)),
        ("% Useful Crawl", format!("{}%", s.useful_crawl_pct)),
        ("% Wasted Crawl", format!("{}%", s.wasted_crawl_pct)),
        ("% URLs <= Depth 3", format!("{}%", s.depth3_pct)),
        ("Sitemap URLs Crawled", format_number(s.sitemap_crawled)),
        ("Orphan URLs %", format!("{}%", s.orphan_pct)),
        ("Param Crawl %", format!("{}%", s.param_crawl_pct)),
        ("Mobile Visits", format_number(s.mobile)),
        ("Desktop Visits", format_number(s.desktop)),
    ]
}

pub fn print_analysis_results(published: Option<&Published>, args: &Args) {
    let empty = AnalysisResult::default();
    let result = published.map(|p| &p.result).unwrap_or(&empty);

    match published {
        Some(p) => println!("\n--- Crawl Analysis: {} ---", p.source.display()),
        None => println!("\n--- Crawl Analysis ---"),
    }

    let s = &result.summary;
    if !s.from_date.is_empty() {
        println!("Date range: {} to {}", s.from_date, s.last_date);
    }

    let width = metric_lines(result)
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    for (label, value) in metric_lines(result) {
        println!("{:<width$}  {}", label, value, width = width);
    }

    if result.top_urls.is_empty() {
        return;
    }

    println!(
        "\nTop {} most crawled URLs:",
        std::cmp::min(args.top, result.top_urls.len())
    );
    for entry in result.top_urls.iter().take(args.top) {
        println!(
            "- [{}] {}: {} hits",
            entry.page_type,
            entry.url,
            format_number(entry.hits)
        );
    }
}
