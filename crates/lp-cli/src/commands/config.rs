//! Config command
//!
//! Manage lunch-picker configuration.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::fs;
use std::path::Path;

use lp_core::config::{Config, ADMIN_SECRET_ENV};

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file without confirmation
        #[arg(long)]
        force: bool,
    },

    /// Validate configuration
    Validate,

    /// Print the configuration file path
    Path,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, config_path: &Path) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(config_path, json),
        ConfigCommand::Init { force } => init_config(config_path, force),
        ConfigCommand::Validate => validate_config(config_path),
        ConfigCommand::Path => {
            println!("{}", config_path.display());
            Ok(())
        }
    }
}

fn show_config(config_path: &Path, as_json: bool) -> Result<()> {
    use colored::Colorize;

    if !config_path.exists() {
        eprintln!(
            "{} Configuration not found. Run '{}' to create. Showing defaults.",
            "⚠".yellow(),
            "lunch-picker config init".cyan()
        );
    }

    let mut config = super::context::load_config(config_path)?;
    // Never echo the secret itself
    let has_secret = config.comments.admin_secret.take().is_some();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("{}", "Configuration:".bold().underline());
    println!("{}", config_path.display().to_string().dimmed());
    println!();
    println!("{}", config.to_toml()?);
    println!(
        "Admin secret: {}",
        if has_secret {
            "configured".green()
        } else {
            format!("not set (delete is open; set {})", ADMIN_SECRET_ENV).yellow()
        }
    );

    Ok(())
}

fn init_config(config_path: &Path, force: bool) -> Result<()> {
    use colored::Colorize;

    if config_path.exists() && !force {
        use dialoguer::Confirm;

        let confirmed = Confirm::new()
            .with_prompt(format!("Overwrite {}?", config_path.display()))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Init cancelled.");
            return Ok(());
        }
    }

    // Backup existing
    if config_path.exists() {
        let backup_path = format!(
            "{}.backup-{}",
            config_path.display(),
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        );
        fs::copy(config_path, &backup_path)?;
        println!("{} Backed up to {}", "✓".green(), backup_path);
    }

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let content = format!(
        "# lunch-picker configuration\n# The admin secret is read from {} when set.\n\n{}",
        ADMIN_SECRET_ENV,
        Config::default().to_toml()?
    );
    fs::write(config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!(
        "{} Wrote default configuration to {}",
        "✓".green(),
        config_path.display()
    );

    Ok(())
}

fn validate_config(config_path: &Path) -> Result<()> {
    use colored::Colorize;

    if !config_path.exists() {
        anyhow::bail!("Configuration not found at {}", config_path.display());
    }

    let content = fs::read_to_string(config_path)?;

    let value: toml::Value = toml::from_str(&content)
        .with_context(|| format!("Invalid TOML in {}", config_path.display()))?;
    println!("{} Configuration is valid TOML", "✓".green());

    // Check for expected sections
    let warnings: Vec<_> = ["origin", "ranking", "comments"]
        .into_iter()
        .filter(|section| value.get(section).is_none())
        .collect();
    for section in &warnings {
        println!("{} [{}] section not found, using defaults", "⚠".yellow(), section);
    }

    Config::from_toml(&content).context("Configuration values are invalid")?;
    println!("{} All values are consistent", "✓".green());

    Ok(())
}
