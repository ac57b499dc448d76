//! assist-map - Map receiving-institution requirements to sending courses
//!
//! Usage:
//!   assist-map extract <FILES>... --year-id <N> --receiving <NAME|ID>
//!   assist-map expr <FILE> [--groups] - Render one sendingArticulation
//!   assist-map receivers         - List configured receiving institutions

use clap::{Parser, Subcommand};
use cli::commands::{ExprCommand, ExtractCommand, ReceiversCommand};
use cli::load_config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "assist-map")]
#[command(about = "Extract course articulation mappings from ASSIST agreements")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Extractor config (.json or .yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract mapping records from agreement files
    Extract(ExtractCommand),
    /// Build the expression for one sending articulation
    Expr(ExprCommand),
    /// List receiving institutions
    Receivers(ReceiversCommand),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Extract(cmd) => cmd.run(&config),
        Commands::Expr(cmd) => cmd.run(),
        Commands::Receivers(cmd) => cmd.run(&config),
    }
}
