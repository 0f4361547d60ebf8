//! Shared loading of configuration and place data

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

use lp_core::config::Config;
use lp_core::place::{FilterCriteria, RankedPlace, RankingEngine};
use lp_core::sheet::PlaceCatalog;

/// Where to read place data from
#[derive(Debug, Clone, Args)]
pub struct DataArgs {
    /// Saved `places` sheet response (gviz or JSON)
    #[arg(long)]
    pub places: Option<PathBuf>,

    /// Saved `category_colors` sheet response
    #[arg(long)]
    pub colors: Option<PathBuf>,
}

/// Filters shared by the listing commands
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Maximum distance in meters (one of the configured options)
    #[arg(long, short)]
    pub radius: Option<u64>,

    /// Only these categories (repeatable)
    #[arg(long, short = 'c')]
    pub category: Vec<String>,

    /// Case-insensitive name search
    #[arg(long, short)]
    pub search: Option<String>,
}

impl FilterArgs {
    /// Build criteria, checking the radius against the configuration
    pub fn to_criteria(&self, config: &Config) -> Result<FilterCriteria> {
        let radius = self.radius.unwrap_or(config.ranking.default_radius);
        let criteria = FilterCriteria::with_radius(config, radius)?
            .categories(self.category.iter().cloned())
            .search(self.search.clone().unwrap_or_default());
        Ok(criteria)
    }
}

/// Everything a command needs to rank places
pub struct AppContext {
    pub config: Config,
    pub catalog: PlaceCatalog,
    pub engine: RankingEngine,
}

impl AppContext {
    /// Load configuration (with environment overrides) and place data
    pub fn load(config_path: &Path, data: &DataArgs) -> Result<Self> {
        let config = load_config(config_path)?;

        let places_path = data
            .places
            .clone()
            .unwrap_or_else(|| config.data.places_path.clone());
        let colors_path = data.colors.clone().or_else(|| config.data.colors_path.clone());

        let places_text = fs::read_to_string(&places_path)
            .with_context(|| format!("Failed to read places from {}", places_path.display()))?;
        let colors_text = colors_path
            .as_ref()
            .map(|path| {
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read colors from {}", path.display()))
            })
            .transpose()?;

        let mut catalog = PlaceCatalog::from_sources(
            &places_text,
            colors_text.as_deref(),
            &config.categories.default_category,
        )
        .with_context(|| format!("Failed to decode {}", places_path.display()))?;

        // Sheet colors win over configured ones
        for (category, color) in &config.categories.colors {
            catalog
                .category_colors
                .entry(category.clone())
                .or_insert_with(|| color.clone());
        }

        tracing::info!(
            "Loaded {} places from {}",
            catalog.places.len(),
            places_path.display()
        );

        let engine = RankingEngine::from_config(&config);
        Ok(Self {
            config,
            catalog,
            engine,
        })
    }

    /// Rank the catalog with the given criteria
    pub fn rank(&self, criteria: &FilterCriteria) -> Vec<RankedPlace> {
        self.engine.filter_and_rank(&self.catalog.places, criteria)
    }

    /// Color for a category, with the configured default
    pub fn color_for(&self, category: &str) -> &str {
        self.catalog
            .color_for(category, &self.config.categories.default_color)
    }
}

/// Load configuration from `path` if present, then apply the environment
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = Config::load_or_default(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    config
        .apply_env()
        .context("Invalid configuration override in environment")?;
    Ok(config)
}
