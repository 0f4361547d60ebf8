//! Categories command
//!
//! List place categories with their colors.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::Path;

use super::context::{AppContext, DataArgs};
use super::render;
use lp_core::place::categories;

/// Arguments for the categories command
#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct CategoryInfo<'a> {
    category: String,
    color: &'a str,
    places: usize,
}

/// Execute the categories command
pub fn execute(args: CategoriesArgs, config_path: &Path) -> Result<()> {
    use colored::Colorize;

    let ctx = AppContext::load(config_path, &args.data)?;

    let infos: Vec<CategoryInfo> = categories(&ctx.catalog.places)
        .into_iter()
        .map(|category| {
            let places = ctx
                .catalog
                .places
                .iter()
                .filter(|place| place.category == category)
                .count();
            CategoryInfo {
                color: ctx.color_for(&category),
                category,
                places,
            }
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    if infos.is_empty() {
        println!("No categories found.");
        return Ok(());
    }

    println!("{}", "Categories:".bold().underline());
    println!();
    for info in &infos {
        println!(
            "  {}  {}  {}",
            render::category_label(&info.category, info.color),
            info.color.dimmed(),
            format!("({} places)", info.places).dimmed()
        );
    }

    Ok(())
}
