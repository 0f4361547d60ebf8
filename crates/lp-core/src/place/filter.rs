//! Filter criteria

use crate::config::Config;
use crate::error::Result;
use std::collections::BTreeSet;

/// User-selected filters applied when ranking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Maximum distance in meters, inclusive
    pub radius_meters: u64,
    /// Empty means every category
    pub selected_categories: BTreeSet<String>,
    /// Case-insensitive name substring; blank means no search
    pub search_term: String,
}

impl FilterCriteria {
    /// Criteria with only a radius, unchecked
    pub fn within(radius_meters: u64) -> Self {
        Self {
            radius_meters,
            selected_categories: BTreeSet::new(),
            search_term: String::new(),
        }
    }

    /// Default criteria for a configuration
    pub fn from_config(config: &Config) -> Self {
        Self::within(config.ranking.default_radius)
    }

    /// Criteria with a radius checked against the configured options
    pub fn with_radius(config: &Config, radius_meters: u64) -> Result<Self> {
        Ok(Self::within(config.validate_radius(radius_meters)?))
    }

    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Toggle a category in or out of the selection
    pub fn toggle_category(&mut self, category: &str) {
        if !self.selected_categories.remove(category) {
            self.selected_categories.insert(category.to_string());
        }
    }

    /// Normalized search keyword, `None` when the search is blank
    pub fn keyword(&self) -> Option<String> {
        let keyword = self.search_term.trim();
        (!keyword.is_empty()).then(|| keyword.to_lowercase())
    }
}
