//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod browse;
pub mod categories;
pub mod config;
pub mod context;
pub mod pick;
pub mod rank;
pub mod render;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = ".lunch-picker/config.toml";

/// lunch-picker - What's for lunch near the office?
#[derive(Debug, Parser)]
#[command(name = "lunch-picker")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(long, global = true, env = "LUNCH_PICKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List nearby places, nearest first
    Rank(rank::RankArgs),

    /// Pick a random place among the filtered ones
    Pick(pick::PickArgs),

    /// List categories with their colors
    Categories(categories::CategoriesArgs),

    /// Browse places and comments interactively
    Browse(browse::BrowseArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    // Dispatch to command handler
    match cli.command {
        Commands::Rank(args) => rank::execute(args, &config_path),
        Commands::Pick(args) => pick::execute(args, &config_path),
        Commands::Categories(args) => categories::execute(args, &config_path),
        Commands::Browse(args) => browse::execute(args, &config_path),
        Commands::Config(cmd) => config::execute(cmd, &config_path),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
