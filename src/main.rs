//! seoaio - SEO and AI-search (AIO) page analyzer

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seoaio::cli::{Cli, Commands};
use seoaio::error::Result;

mod commands;

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.hint() {
            eprintln!("\n{}", hint);
        }
        std::process::exit(1);
    }
}

/// Log to stderr; `SEOAIO_LOG` (or `RUST_LOG`) overrides the default `warn` level
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("SEOAIO_LOG")
        .or_else(|_| tracing_subscriber::EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| "warn".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { url, industry, balance, no_ai, json } => {
            commands::cmd_analyze(&url, industry, balance, no_ai, json)
        }
        Commands::Classify { text, file, title, meta, json } => {
            commands::cmd_classify(text, file, &title, &meta, json)
        }
        Commands::Industries { json } => commands::cmd_industries(json),
        Commands::Config(command) => commands::cmd_config(command),
        Commands::Doctor => commands::cmd_doctor(),
        Commands::Completions { shell } => commands::cmd_completions(shell),
    }
}
