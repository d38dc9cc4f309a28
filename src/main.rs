// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (to stderr, so JSON on stdout stays clean)
// 3. Run the crawl, stopping early on Ctrl-C
// 4. Print the results
// 5. Exit with proper code (0 = all pages fine, 1 = some failed, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use link_walker::{CrawlResult, Crawler, Outcome, SkipReason};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every fetched page succeeded
//   Ok(1) = at least one page failed
//   Err = the crawl could not run
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging();

    let crawler = Crawler::with_http(cli.crawl_config()).context("Invalid crawl settings")?;

    // Ctrl-C stops dispatching and returns what we have so far
    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupted, finishing up");
                cancel.cancel();
            }
        }
    });

    let result = crawler
        .run(&cli.seed, cancel)
        .await
        .with_context(|| format!("Could not crawl {}", cli.seed))?;

    print_results(&result, &cli)?;

    if result.summary().failed > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

// RUST_LOG overrides the default, e.g. RUST_LOG=link_walker=debug
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("link_walker=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_results(result: &CrawlResult, cli: &Cli) -> Result<()> {
    if cli.json {
        let json_output = serde_json::to_string_pretty(result)?;
        println!("{}", json_output);
        return Ok(());
    }

    if cli.all {
        print_table(result);
    } else {
        for url in result.successful_urls() {
            println!("{}", url);
        }
        println!();
    }

    print_summary(result);
    Ok(())
}

fn print_table(result: &CrawlResult) {
    println!("{:<70} {:<20}", "URL", "OUTCOME");
    println!("{}", "=".repeat(90));

    for (url, outcome) in result.iter() {
        // Truncate URL if too long for display
        let url_display = if url.chars().count() > 67 {
            format!("{}...", url.chars().take(67).collect::<String>())
        } else {
            url.to_string()
        };
        println!("{:<70} {:<20}", url_display, format_outcome(outcome));
    }

    println!();
}

fn print_summary(result: &CrawlResult) {
    let summary = result.summary();
    println!("📊 Summary:");
    println!("   ✅ Crawled: {}", summary.succeeded);
    println!("   ⏭️  Skipped: {}", summary.skipped);
    println!("   ❌ Failed: {}", summary.failed);
    println!("   📋 Distinct URLs seen: {}", result.visited().len());

    if result.was_cancelled() {
        println!("   🛑 Stopped early, {} page(s) never crawled", result.pending().len());
    }
}

fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Success { depth } => format!("✅ OK (depth {})", depth),
        Outcome::Skipped { reason: SkipReason::DepthExceeded } => "⏭️  TOO DEEP".to_string(),
        Outcome::Skipped { reason: SkipReason::Cancelled } => "🛑 CANCELLED".to_string(),
        Outcome::Failed { error } => format!("❌ {}", error),
    }
}
