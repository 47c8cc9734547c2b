//! Storefront CLI - Command line front end for the storefront catalog.
//!
//! Commands:
//! - `storefront search` - Search products by sentence and keywords
//! - `storefront product` - Show a product with option and quantity pricing
//! - `storefront analyze` - Generate a detailed description with AI
//! - `storefront register` - Register a product
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod files;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AnalyzeArgs, ConfigArgs, ProductArgs, RegisterArgs, SearchArgs};

/// Storefront CLI - Search, inspect and register catalog products
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search products
    Search(SearchArgs),

    /// Show a product
    Product(ProductArgs),

    /// Generate a detailed description with AI
    Analyze(AnalyzeArgs),

    /// Register a product
    Register(RegisterArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Log to stderr. `RUST_LOG` wins; otherwise `--verbose` turns on debug
/// output for the storefront crates.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,storefront=debug,storefront_client=debug,storefront_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), cli.verbose, cli.json)?;

    // Execute command
    let result = match cli.command {
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Analyze(args) => commands::analyze::run(args, &ctx).await,
        Commands::Register(args) => commands::register::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
