//! Glimpse CLI - guess what an image depicts by repeatedly sampling a
//! vision LLM for keywords and aggregating the replies.
//!
//! # Usage
//!
//! ```bash
//! # Extract keywords from an image (30 iterations against local Ollama)
//! glimpse extract photo.jpg
//!
//! # Fewer iterations, JSON report
//! glimpse extract photo.jpg --iterations 10 --format json
//!
//! # View configuration
//! glimpse config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Glimpse - ranked keyword extraction via repeated vision-LLM sampling.
#[derive(Parser, Debug)]
#[command(name = "glimpse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Sample keywords for an image and print the ranked result
    Extract(cli::extract::ExtractArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI verbose override.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match glimpse_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `glimpse config path`."
            );
            glimpse_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Glimpse v{}", glimpse_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Extract(args) => cli::extract::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
