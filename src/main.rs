//! Asin-Harvest main entry point
//!
//! This is the command-line interface for the Asin-Harvest batch scraper.

use anyhow::Context;
use asin_harvest::config::load_config_with_hash;
use asin_harvest::input::read_asin_column;
use asin_harvest::output::{print_summary, summarize, write_csv_report};
use asin_harvest::scraper::{fetch_balance, Coordinator, UnlockerClient};
use asin_harvest::{filter_asins, Config, ConfigError};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Asin-Harvest: a batch product-page scraper
///
/// Reads ASINs from a CSV file, fetches each product detail page through a
/// web-unlocker API, extracts a fixed set of fields, and writes a CSV
/// report with summary statistics.
#[derive(Parser, Debug)]
#[command(name = "asin-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A batch product-page scraper", long_about = None)]
struct Cli {
    /// Path to the CSV input file with an 'asin' column
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the CSV output path from the config
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Unlocker API token (falls back to config, then BRIGHTDATA_API_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and input and show what would be scraped
    #[arg(long, conflicts_with = "balance")]
    dry_run: bool,

    /// Show the remaining account credits and exit
    #[arg(long, conflicts_with = "dry_run")]
    balance: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config, &cli)?;
    } else if cli.balance {
        handle_balance(&config, &cli).await?;
    } else {
        handle_scrape(config, &cli).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("asin_harvest=info,warn"),
            1 => EnvFilter::new("asin_harvest=debug,info"),
            2 => EnvFilter::new("asin_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Resolves the API token: flag first, then config, then environment
fn resolve_token(cli: &Cli, config: &Config) -> Result<String, ConfigError> {
    cli.token
        .clone()
        .or_else(|| config.api.token.clone())
        .or_else(|| std::env::var("BRIGHTDATA_API_TOKEN").ok())
        .filter(|token| !token.is_empty())
        .ok_or(ConfigError::MissingToken)
}

/// Handles the --dry-run mode: validates config and input, no network
fn handle_dry_run(config: &Config, cli: &Cli) -> anyhow::Result<()> {
    println!("=== Asin-Harvest Dry Run ===\n");

    println!("Unlocker API:");
    println!("  Endpoint: {}", config.api.endpoint);
    println!("  Zone: {}", config.api.zone);
    println!("  Request timeout: {}s", config.api.request_timeout_secs);

    println!("\nScraper:");
    println!(
        "  Max concurrent requests: {}",
        config.scraper.max_concurrent_requests
    );
    println!("  Product domain: {}", config.scraper.product_domain);

    println!("\nOutput:");
    println!("  CSV: {}", output_path(config, cli).display());

    let raw = read_asin_column(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let asins = filter_asins(&raw);

    println!("\nInput: {}", cli.input.display());
    println!("  Raw cells: {}", raw.len());
    println!("  Valid ASINs: {}", asins.len());

    println!("\n✓ Configuration is valid");
    println!("✓ Would scrape {} product pages", asins.len());

    Ok(())
}

/// Handles the --balance mode: shows remaining credits and exits
async fn handle_balance(config: &Config, cli: &Cli) -> anyhow::Result<()> {
    let token = resolve_token(cli, config)?;
    let client = UnlockerClient::new(&config.api, token)?;

    let balance = fetch_balance(&client).await;
    println!("Remaining credits: {}", balance);

    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(config: Config, cli: &Cli) -> anyhow::Result<()> {
    let token = resolve_token(cli, &config)?;

    let raw = read_asin_column(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let asins = filter_asins(&raw);
    tracing::info!("Loaded {} valid ASINs", asins.len());

    if asins.is_empty() {
        tracing::warn!("No valid ASINs in input; report will be empty");
    }

    let csv_path = output_path(&config, cli);

    let coordinator = Coordinator::new(config, token)?;
    let report = coordinator.run(&asins).await?;

    write_csv_report(&report.records, &csv_path)
        .with_context(|| format!("failed to write {}", csv_path.display()))?;

    let summary = summarize(&report);
    print_summary(&summary);

    Ok(())
}

/// CSV destination: the --output flag wins over the config path
fn output_path(config: &Config, cli: &Cli) -> PathBuf {
    cli.output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.csv_path))
}
