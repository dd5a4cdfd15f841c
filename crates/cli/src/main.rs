use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use iconic_core::{FallbackMode, FinderConfig, IconFinder, fetch_page};
use owo_colors::OwoColorize;

mod echo;
mod logging;

use echo::{format_size, print_banner, print_detail, print_error, print_step, print_success, print_timing};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// List the icon and social card image URLs of a web page as a JSON array
#[derive(Parser, Debug)]
#[command(name = "iconic")]
#[command(author = "Iconic Contributors")]
#[command(version)]
#[command(about = "List icon and social card image URLs of a web page", long_about = None)]
struct Args {
    /// URL of the page to inspect
    #[arg(value_name = "URL")]
    url: String,

    /// When to append /favicon.ico (always, probe, never)
    #[arg(long, default_value = "always", value_name = "MODE")]
    fallback: FallbackMode,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    match run(&args).await {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<String> {
    let started = Instant::now();

    let mut builder = FinderConfig::builder().fallback(args.fallback).timeout(args.timeout);
    if let Some(user_agent) = &args.user_agent {
        builder = builder.user_agent(user_agent.as_str());
    }
    let config = builder.build();
    tracing::debug!(url = %args.url, fallback = ?config.fallback, timeout = config.fetch.timeout, "starting");

    if args.verbose {
        print_banner();
        print_step(1, 2, &format!("Fetching {}", args.url.bright_white().underline()));
    }

    let page = fetch_page(&args.url, &config.fetch).await.context("Failed to fetch URL")?;

    if args.verbose {
        print_detail("Final URL", page.final_url.as_str());
        print_detail("Status", &page.status.to_string());
        print_detail("Size", &format_size(page.body.len()));
        print_timing("Fetch", started.elapsed());
        eprintln!();
        print_step(2, 2, &format!("Extracting icons ({:?} fallback)", args.fallback));
    }

    let finder = IconFinder::with_config(config).context("Failed to build HTTP client")?;
    let icons = finder.find_in_page(&page).await.context("Failed to extract icons")?;

    if args.verbose {
        print_detail("Icons", &icons.len().to_string());
        print_timing("Total", started.elapsed());
        print_success("Done");
        eprintln!();
    }

    serde_json::to_string(&icons).context("Failed to encode result")
}
