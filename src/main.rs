//! Adlens binary entry point

use adlens::config::{load_config_with_hash, load_store_credentials};
use adlens::{crawler, server};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "adlens")]
#[command(about = "Profiles video players and ad tech across configured news sites")]
struct Cli {
    /// Path to the TOML configuration file
    config: PathBuf,

    /// Run one crawl pass and exit instead of serving the trigger endpoint
    #[arg(long)]
    once: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        "adlens=warn,warn"
    } else {
        match verbose {
            0 => "adlens=info,warn",
            1 => "adlens=debug,info",
            _ => "adlens=trace,debug",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;
    tracing::info!("Loaded config {} (sha256 {})", cli.config.display(), config_hash);

    let credentials =
        load_store_credentials().context("store credentials missing from environment")?;

    let config = Arc::new(config);

    if cli.once {
        let summary = crawler::run_crawl_once(config, &credentials)
            .await
            .context("crawl run failed")?;
        tracing::info!("{}", summary.describe());
        return Ok(());
    }

    server::serve(config, credentials)
        .await
        .context("trigger endpoint failed")?;
    Ok(())
}
