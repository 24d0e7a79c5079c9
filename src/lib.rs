pub mod analyze;
pub mod args;
pub mod export;
pub mod intake;
pub mod record;
pub mod report;
pub mod stats;
pub mod utils;

pub use analyze::analyze;
pub use args::Args;
pub use record::{parse_line, LogRecord};
pub use report::analyze_crawl_logs;
pub use stats::{AnalysisResult, Summary, UrlHit};
