//! Ripple-Count main entry point
//!
//! This is the command-line interface for the Ripple-Count parallel crawler.

use anyhow::Context;
use clap::Parser;
use ripple_count::config::{load_config_with_hash, Config};
use ripple_count::crawler::{pool_size, CrawlEngine, EngineSettings, HtmlPageParser, WebCrawler};
use ripple_count::output::{write_result, write_result_to};
use ripple_count::profiler::Profiler;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Ripple-Count: a depth- and time-bounded parallel web crawler
///
/// Crawls from the configured start pages, counts the words of every page
/// it visits and reports the most popular ones.
#[derive(Parser, Debug)]
#[command(name = "ripple-count")]
#[command(version)]
#[command(about = "A depth- and time-bounded parallel web crawler", long_about = None)]
struct Cli {
    /// Path to JSON (or .toml) configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let hardware_parallelism = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);

    if cli.dry_run {
        handle_dry_run(&config, hardware_parallelism);
        return Ok(());
    }

    handle_crawl(&config, hardware_parallelism)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ripple_count=info,warn"),
            1 => EnvFilter::new("ripple_count=debug,info"),
            2 => EnvFilter::new("ripple_count=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so results and profiles can own stdout
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective crawl settings
fn handle_dry_run(config: &Config, hardware_parallelism: usize) {
    println!("=== Ripple-Count Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.max_depth);
    println!("  Timeout: {}s", config.timeout_seconds);
    println!("  Popular word count: {}", config.popular_word_count);
    println!(
        "  Workers: {} (requested {}, hardware {})",
        pool_size(config.parallelism_or(hardware_parallelism), hardware_parallelism),
        config.parallelism_or(hardware_parallelism),
        hardware_parallelism
    );

    println!("\nIgnored URL patterns ({}):", config.ignored_urls.len());
    for pattern in &config.ignored_urls {
        println!("  - {}", pattern);
    }

    println!("\nIgnored word patterns ({}):", config.ignored_words.len());
    for pattern in &config.ignored_words {
        println!("  - {}", pattern);
    }

    println!("\nOutput:");
    println!("  Result: {}", display_path(&config.result_path));
    println!("  Profile: {}", display_path(&config.profile_output_path));

    println!("\nStart pages ({}):", config.start_pages.len());
    for page in &config.start_pages {
        println!("  * {}", page);
    }

    println!("\n✓ Configuration is valid");
}

fn display_path(raw: &str) -> &str {
    if raw.trim().is_empty() {
        "<stdout>"
    } else {
        raw
    }
}

/// Handles the main crawl operation
fn handle_crawl(config: &Config, hardware_parallelism: usize) -> anyhow::Result<()> {
    let profiler = Profiler::new();

    let parser = profiler.wrap_parser(
        HtmlPageParser::from_config(config).context("Failed to build page parser")?,
    );
    let settings = EngineSettings::from_config(config, hardware_parallelism)?;
    let engine = CrawlEngine::new(settings, parser).context("Failed to start crawl engine")?;
    let crawler = profiler.wrap_crawler(engine);

    tracing::info!("Total seed URLs: {}", config.start_pages.len());
    let result = crawler.crawl(&config.start_pages);

    match config.result_path() {
        Some(path) => {
            write_result(&result, path)
                .with_context(|| format!("Failed to write result to {}", path.display()))?;
            tracing::info!("Result written to {}", path.display());
        }
        None => write_result_to(&result, std::io::stdout().lock())?,
    }

    match config.profile_output_path() {
        Some(path) => {
            profiler
                .write_data_to_path(path)
                .with_context(|| format!("Failed to write profile to {}", path.display()))?;
            tracing::info!("Profile appended to {}", path.display());
        }
        None => profiler.write_data(std::io::stdout().lock())?,
    }

    Ok(())
}
