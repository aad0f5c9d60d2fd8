// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, written to stderr)
// 3. Run the crawl
// 4. Print the emails found, as a list or as JSON, on stdout
// 5. Exit with proper code (0 = success, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use mail_trawler::{CrawlReport, Crawler};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.crawl_config().context("invalid crawl settings")?;
    let crawler = Crawler::new(config).context("failed to set up crawler")?;

    let report = crawler.run(&cli.seed_url).await;

    print_report(&report, cli.json)?;
    Ok(0)
}

// RUST_LOG wins when set; otherwise info (or debug with --verbose) for this
// crate only, so reqwest/hyper stay quiet.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "mail_trawler=debug"
    } else {
        "mail_trawler=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(&report.summary())?;
        println!("{}", json_output);
    } else {
        print_list(report);
    }
    Ok(())
}

fn print_list(report: &CrawlReport) {
    let emails = report.sorted_emails();

    if emails.is_empty() {
        println!("No email addresses found");
    } else {
        println!("Found emails:");
        for email in &emails {
            println!("  {}", email);
        }
    }

    println!();
    println!("Summary:");
    println!("  Pages visited: {}", report.pages_visited());
    println!("  Emails found:  {}", emails.len());
    println!("  Time taken:    {:.2}s", report.elapsed.as_secs_f64());
}
