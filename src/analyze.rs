use std::collections::HashMap;

use crate::record::parse_line;
use crate::stats::{AnalysisResult, Summary, UrlHit, PAGE_TYPE};
use crate::utils::fixed2;

/// Reduces the full text of a crawl log to a summary and a hit table sorted
/// by descending hits. Equal hit counts keep first-seen order.
///
/// Lines that don't parse are dropped without a trace.
pub fn analyze(text: &str) -> AnalysisResult {
    let mut summary = Summary::default();
    let mut hits: Vec<UrlHit> = Vec::new();
    let mut url_index: HashMap<String, usize> = HashMap::new();

    for record in text.split('\n').filter_map(parse_line) {
        summary.total_lines += 1;

        match record.status {
            200..=299 => summary.status_2xx += 1,
            300..=399 => summary.status_3xx += 1,
            400..=499 => summary.status_4xx += 1,
            500.. => summary.status_5xx += 1,
            _ => {}
        }

        if !record.bot.is_empty() {
            if record.bot.to_lowercase().contains("mobile") {
                summary.mobile += 1;
            } else {
                summary.desktop += 1;
            }
        }

        if !record.date.is_empty() {
            if summary.from_date.is_empty() || record.date < summary.from_date {
                summary.from_date = record.date.clone();
            }
            if summary.last_date.is_empty() || record.date > summary.last_date {
                summary.last_date = record.date;
            }
        }

        match url_index.get(&record.url) {
            Some(&idx) => hits[idx].hits += 1,
            None => {
                url_index.insert(record.url.clone(), hits.len());
                hits.push(UrlHit {
                    page_type: PAGE_TYPE,
                    url: record.url,
                    hits: 1,
                });
            }
        }
    }

    summary.unique_urls = hits.len() as u64;

    if summary.total_lines > 0 {
        let total = summary.total_lines as f64;
        let wasted = summary.status_3xx + summary.status_4xx + summary.status_5xx;
        summary.useful_crawl_pct = fixed2(summary.status_2xx as f64 / total * 100.0);
        summary.wasted_crawl_pct = fixed2(wasted as f64 / total * 100.0);
    }

    // Stable sort keeps first-seen order among ties.
    hits.sort_by(|a, b| b.hits.cmp(&a.hits));

    AnalysisResult {
        summary,
        top_urls: hits,
    }
}
