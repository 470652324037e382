//! docs-mirror main entry point
//!
//! Command-line interface: crawl every configured documentation tree and
//! mirror it into its destination.

use clap::Parser;
use docs_mirror::config::{load_config_with_hash, Config, Target};
use docs_mirror::crawler::{Crawler, HttpFetcher};
use docs_mirror::sink::{build_sink, GoogleDriveSink, TokenProvider, TokenSource};
use docs_mirror::sync::{collect_text, mirror_all, print_report};
use docs_mirror::MirrorError;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Timeout for Google API calls, independent of the page fetch timeout
const SINK_TIMEOUT: Duration = Duration::from_secs(60);

/// docs-mirror: mirror documentation sites into Google Docs or Drive
///
/// Each target is crawled breadth-first from its base URL. The main content
/// of every page is converted to markdown, the pages are joined into one
/// text, and that text replaces whatever the destination held before.
#[derive(Parser, Debug)]
#[command(name = "docs-mirror")]
#[command(version)]
#[command(about = "Mirror documentation sites into Google Docs or Drive", long_about = None)]
struct Cli {
    /// Path to TOML (or .json) configuration file
    #[arg(value_name = "CONFIG", required_unless_present = "list_files")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the targets without crawling
    #[arg(long, conflicts_with = "stdout")]
    dry_run: bool,

    /// Crawl and print the text to stdout instead of writing to the destination
    #[arg(long)]
    stdout: bool,

    /// Only process the target with this name
    #[arg(long, value_name = "NAME")]
    only: Option<String>,

    /// List the Drive files the credentials can reach and exit
    #[arg(long, conflicts_with_all = ["dry_run", "stdout", "only"])]
    list_files: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if cli.list_files {
        return Ok(handle_list_files().await?);
    }

    let Some(config_path) = cli.config else {
        return Err("a configuration file is required".into());
    };

    tracing::info!("Loading configuration from: {}", config_path.display());
    let config = match load_config_with_hash(&config_path) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let targets = select_targets(&config, cli.only.as_deref())?;

    if cli.dry_run {
        handle_dry_run(&config, &targets);
        Ok(())
    } else if cli.stdout {
        Ok(handle_stdout(&config, &targets).await?)
    } else {
        Ok(handle_mirror(&config, &targets).await?)
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("docs_mirror=info,warn"),
            1 => EnvFilter::new("docs_mirror=debug,info"),
            2 => EnvFilter::new("docs_mirror=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so --stdout output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn select_targets(config: &Config, only: Option<&str>) -> docs_mirror::Result<Vec<Target>> {
    match only {
        None => Ok(config.targets.clone()),
        Some(name) => {
            let selected: Vec<Target> = config
                .targets
                .iter()
                .filter(|t| t.name == name)
                .cloned()
                .collect();
            if selected.is_empty() {
                return Err(MirrorError::UnknownTarget(name.to_string()));
            }
            Ok(selected)
        }
    }
}

/// Handles the --dry-run mode: shows what would be mirrored
fn handle_dry_run(config: &Config, targets: &[Target]) {
    println!("=== docs-mirror Dry Run ===\n");

    println!("Fetch:");
    println!("  Timeout: {}s", config.fetch.timeout_secs);
    println!("  User agent: {}", config.fetch.user_agent);

    println!("\nSink:");
    println!("  Mode: {:?}", config.sink.mode);
    println!("  Max words per item: {}", config.sink.max_words);

    println!("\nTargets ({}):", targets.len());
    for target in targets {
        println!("  - {}", target.name);
        println!("    source: {}", target.source_url);
        println!("    destination: {}", target.destination_id);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --stdout mode: crawls and prints instead of writing
async fn handle_stdout(config: &Config, targets: &[Target]) -> docs_mirror::Result<()> {
    let crawler = Crawler::new(HttpFetcher::new(&config.fetch)?);

    for target in targets {
        let collected = collect_text(&crawler, target).await;
        if collected.blocks == 0 {
            tracing::warn!("No content produced for {}", target.name);
            continue;
        }
        println!("{}", collected.text);
    }

    Ok(())
}

/// Handles the --list-files mode: checks credentials by listing Drive files
async fn handle_list_files() -> docs_mirror::Result<()> {
    let client = reqwest::Client::builder().timeout(SINK_TIMEOUT).build()?;
    let tokens = TokenProvider::new(client.clone(), TokenSource::from_env()?);
    let drive = GoogleDriveSink::new(client, tokens);

    let files = drive.list_files().await?;
    if files.is_empty() {
        println!("The credentials cannot reach any Drive file");
        return Ok(());
    }

    println!("The credentials can reach {} file(s):", files.len());
    for file in &files {
        println!("  - {} | {}", file.id, file.name);
    }

    Ok(())
}

/// Handles the main mirror operation
async fn handle_mirror(config: &Config, targets: &[Target]) -> docs_mirror::Result<()> {
    let tokens = match TokenSource::from_env() {
        Ok(tokens) => tokens,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };

    let sink = build_sink(config.sink.mode, tokens, SINK_TIMEOUT)?;
    let crawler = Crawler::new(HttpFetcher::new(&config.fetch)?);

    tracing::info!(
        "Mirroring {} target(s) in {:?} mode",
        targets.len(),
        config.sink.mode
    );

    let reports = mirror_all(&crawler, sink.as_ref(), targets, &config.sink).await;
    print_report(&reports);

    let failed = reports.iter().filter(|r| !r.is_success()).count();
    if failed > 0 {
        return Err(MirrorError::TargetsFailed {
            failed,
            total: reports.len(),
        });
    }

    tracing::info!("All targets mirrored");
    Ok(())
}
