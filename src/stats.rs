use serde::Serialize;

pub const PAGE_TYPE: &str = "Page";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_lines: u64,
    pub unique_urls: u64,
    pub status_2xx: u64,
    pub status_3xx: u64,
    pub status_4xx: u64,
    pub status_5xx: u64,
    pub useful_crawl_pct: String,
    pub wasted_crawl_pct: String,
    // Never computed, always zero.
    pub depth3_pct: u64,
    pub sitemap_crawled: u64,
    pub orphan_pct: u64,
    pub param_crawl_pct: u64,
    pub mobile: u64,
    pub desktop: u64,
    pub from_date: String,
    pub last_date: String,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            total_lines: 0,
            unique_urls: 0,
            status_2xx: 0,
            status_3xx: 0,
            status_4xx: 0,
            status_5xx: 0,
            useful_crawl_pct: "0".to_string(),
            wasted_crawl_pct: "0".to_string(),
            depth3_pct: 0,
            sitemap_crawled: 0,
            orphan_pct: 0,
            param_crawl_pct: 0,
            mobile: 0,
            desktop: 0,
            from_date: String::new(),
            last_date: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlHit {
    pub page_type: &'static str,
    pub url: String,
    pub hits: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub summary: Summary,
    pub top_urls: Vec<UrlHit>,
}
