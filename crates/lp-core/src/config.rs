//! Configuration management for lunch-picker

use crate::error::{LunchPickerError, Result};
use crate::types::Coordinate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable holding the shared admin secret
pub const ADMIN_SECRET_ENV: &str = "ADMIN_PASSWORD";
/// Environment variable overriding the origin latitude
pub const ORIGIN_LAT_ENV: &str = "COMPANY_LAT";
/// Environment variable overriding the origin longitude
pub const ORIGIN_LNG_ENV: &str = "COMPANY_LNG";

/// Upper bound for `ranking.new_days`
pub const MAX_NEW_DAYS: i64 = 3650;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where distances are measured from
    pub origin: OriginConfig,
    /// Ranking and filter settings
    pub ranking: RankingConfig,
    /// Category display settings
    pub categories: CategoryConfig,
    /// Comment policy
    pub comments: CommentConfig,
    /// Data file locations
    pub data: DataConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LunchPickerError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load from a file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No configuration at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply environment overrides (admin secret and origin)
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(secret) = lookup(ADMIN_SECRET_ENV) {
            self.comments.admin_secret = Some(secret);
        }
        if let Some(lat) = lookup(ORIGIN_LAT_ENV) {
            self.origin.lat = parse_coordinate(ORIGIN_LAT_ENV, &lat)?;
        }
        if let Some(lng) = lookup(ORIGIN_LNG_ENV) {
            self.origin.lng = parse_coordinate(ORIGIN_LNG_ENV, &lng)?;
        }
        self.validate()
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        if !self.origin.coordinate().is_finite() {
            return Err(LunchPickerError::Config(
                "origin coordinates must be finite numbers".to_string(),
            ));
        }
        if self.ranking.radius_options.is_empty() {
            return Err(LunchPickerError::Config(
                "ranking.radius_options cannot be empty".to_string(),
            ));
        }
        if !self
            .ranking
            .radius_options
            .contains(&self.ranking.default_radius)
        {
            return Err(LunchPickerError::Config(format!(
                "ranking.default_radius {} is not one of {:?}",
                self.ranking.default_radius, self.ranking.radius_options
            )));
        }
        if !(0..=MAX_NEW_DAYS).contains(&self.ranking.new_days) {
            return Err(LunchPickerError::Config(format!(
                "ranking.new_days must be between 0 and {}, got {}",
                MAX_NEW_DAYS, self.ranking.new_days
            )));
        }
        if self.ranking.walk_speed_m_per_min <= 0.0 {
            return Err(LunchPickerError::Config(
                "ranking.walk_speed_m_per_min must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Check that a radius is one of the configured options
    pub fn validate_radius(&self, radius: u64) -> Result<u64> {
        if self.ranking.radius_options.contains(&radius) {
            Ok(radius)
        } else {
            Err(LunchPickerError::InvalidRadius {
                radius,
                options: self.ranking.radius_options.clone(),
            })
        }
    }
}

fn parse_coordinate(key: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LunchPickerError::Config(format!("{} is not a number: {:?}", key, value)))
}

/// Fixed origin (the office)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OriginConfig {
    pub lat: f64,
    pub lng: f64,
    /// Display name
    pub label: String,
}

impl OriginConfig {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            lat: 37.507520,
            lng: 127.055055,
            label: "Company".to_string(),
        }
    }
}

/// Ranking-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Selectable radius values in meters
    pub radius_options: Vec<u64>,
    /// Radius used when none is given
    pub default_radius: u64,
    /// Size of the nearby list
    pub top_n: usize,
    /// Size of the collapsed preview
    pub preview_n: usize,
    /// Places updated within this many days are flagged as new
    pub new_days: i64,
    /// Walking speed used for the minutes estimate
    pub walk_speed_m_per_min: f64,
    /// Status token -> whether the place is active
    pub statuses: BTreeMap<String, bool>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        let mut statuses = BTreeMap::new();
        statuses.insert("제휴중".to_string(), true);

        Self {
            radius_options: vec![200, 400, 600, 800, 1000],
            default_radius: 600,
            top_n: 20,
            preview_n: 3,
            new_days: 7,
            walk_speed_m_per_min: 80.0,
            statuses,
        }
    }
}

/// Category display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    /// Category assigned to rows without one
    pub default_category: String,
    /// Color used for categories without an entry
    pub default_color: String,
    /// Category -> hex color; merged under colors from the sheet
    pub colors: BTreeMap<String, String>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            default_category: "기타".to_string(),
            default_color: "#9CA3AF".to_string(),
            colors: BTreeMap::new(),
        }
    }
}

/// Comment policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentConfig {
    /// Maximum content length in UTF-16 code units
    pub max_length: usize,
    /// Seconds a client waits between comments on one place
    pub cooldown_secs: u64,
    /// Shared secret for deleting comments; unset means delete is open
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_secret: Option<String>,
}

impl Default for CommentConfig {
    fn default() -> Self {
        Self {
            max_length: 200,
            cooldown_secs: 20,
            admin_secret: None,
        }
    }
}

/// Data source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Saved `places` sheet response (gviz or JSON)
    pub places_path: PathBuf,
    /// Saved `category_colors` sheet response, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors_path: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            places_path: PathBuf::from(".lunch-picker/places.json"),
            colors_path: None,
        }
    }
}
