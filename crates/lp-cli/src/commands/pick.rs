//! Pick command
//!
//! Random recommendation among the filtered places.

use anyhow::Result;
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

use super::context::{AppContext, DataArgs, FilterArgs};
use super::render;
use lp_core::place::{pick_random, Pick, RandomSource, RngSource};

/// Arguments for the pick command
#[derive(Debug, Args)]
pub struct PickArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Seed for a reproducible pick
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the pick command
pub fn execute(args: PickArgs, config_path: &Path) -> Result<()> {
    let ctx = AppContext::load(config_path, &args.data)?;
    let criteria = args.filter.to_criteria(&ctx.config)?;
    let ranked = ctx.rank(&criteria);

    let mut source: Box<dyn RandomSource> = match args.seed {
        Some(seed) => Box::new(RngSource(StdRng::seed_from_u64(seed))),
        None => Box::new(RngSource::thread()),
    };

    match pick_random(&ranked, source.as_mut()) {
        Pick::Chosen(place) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(place)?);
            } else {
                println!("{}", render::place_detail(place, &ctx));
            }
        }
        Pick::NoCandidates => {
            if args.json {
                println!("null");
            } else {
                println!("No places match the current filters.");
            }
        }
    }

    Ok(())
}
