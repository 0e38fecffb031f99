//! ml-price-report - Mercado Livre listing scraper with spreadsheet and box plot output

use anyhow::Result;
use clap::Parser;
use ml_price_report::commands::{Console, ReportCommand, Session};
use ml_price_report::config::Config;
use ml_price_report::listing::ListingClient;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ml-price-report",
    version,
    about = "Search Mercado Livre and report prices as a spreadsheet and box plot",
    long_about = "Searches a Mercado Livre listing, writes the products to an XLSX report \
                  with prices highlighted against the mean, and plots the price distribution."
)]
struct Cli {
    /// Search query for the first cycle (prompted when omitted)
    query: Option<String>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for generated reports
    #[arg(short, long, env = "ML_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Do not open generated files
    #[arg(long)]
    no_open: bool,

    /// Skip the box plot
    #[arg(long)]
    no_plot: bool,

    /// Run a single cycle without asking to repeat
    #[arg(long)]
    once: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if cli.no_open {
        config.open_files = false;
    }
    if cli.no_plot {
        config.plot = false;
    }

    let client = ListingClient::new(&config)?;
    let command = ReportCommand::new(config)?;

    let stdin = std::io::stdin();
    let mut console = Console::new(stdin.lock(), std::io::stdout());

    Session::new(&command, &client).once(cli.once).run(&mut console, cli.query).await
}
