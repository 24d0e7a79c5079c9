use anyhow::Result;
use clap::Parser;
use tracing::error;

use crawlstat::report::{print_analysis_results, print_json};
use crawlstat::utils::{setup_logging, validate_args};
use crawlstat::{analyze_crawl_logs, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    validate_args(&args)?;

    match analyze_crawl_logs(&args) {
        Ok(published) => {
            if args.json {
                print_json(published.as_ref())?;
            } else {
                print_analysis_results(published.as_ref(), &args);
            }
            Ok(())
        }
        Err(e) => {
            error!(action = "fail", component = "main", error = %format!("{:#}", e), "Analysis failed");
            std::process::exit(1);
        }
    }
}
