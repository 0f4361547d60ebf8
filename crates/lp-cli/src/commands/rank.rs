//! Rank command
//!
//! List nearby places, nearest first.

use anyhow::Result;
use clap::Args;
use std::path::Path;

use super::context::{AppContext, DataArgs, FilterArgs};
use super::render;
use lp_core::place::top_n;

/// Arguments for the rank command
#[derive(Debug, Args)]
pub struct RankArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Number of places to show (default: configured top_n)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only the short preview list
    #[arg(long, conflicts_with = "limit")]
    pub preview: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the rank command
pub fn execute(args: RankArgs, config_path: &Path) -> Result<()> {
    use colored::Colorize;

    let ctx = AppContext::load(config_path, &args.data)?;
    let criteria = args.filter.to_criteria(&ctx.config)?;
    let ranked = ctx.rank(&criteria);

    let limit = if args.preview {
        ctx.config.ranking.preview_n
    } else {
        args.limit.unwrap_or(ctx.config.ranking.top_n)
    };
    let shown = top_n(&ranked, limit);

    if args.json {
        println!("{}", serde_json::to_string_pretty(shown)?);
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "Within {}m of {} · {} places",
            criteria.radius_meters,
            ctx.config.origin.label,
            ranked.len()
        )
        .bold()
    );

    if ranked.is_empty() {
        println!("No places match the current filters.");
        return Ok(());
    }

    println!();
    let now = chrono::Utc::now();
    for (index, place) in shown.iter().enumerate() {
        println!("{}", render::place_line(index, place, &ctx, now));
    }
    if shown.len() < ranked.len() {
        println!(
            "{}",
            format!("... and {} more", ranked.len() - shown.len()).dimmed()
        );
    }

    Ok(())
}
