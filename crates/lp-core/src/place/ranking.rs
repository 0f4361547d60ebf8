//! Distance ranking over place lists

use super::filter::FilterCriteria;
use super::model::{Place, RankedPlace};
use super::status::StatusTable;
use crate::config::Config;
use crate::geo;
use crate::types::Coordinate;
use std::collections::BTreeSet;
use tracing::debug;

/// Ranks places by distance from a fixed origin.
///
/// Pure: holds no mutable state, so one engine can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct RankingEngine {
    origin: Coordinate,
    statuses: StatusTable,
}

impl RankingEngine {
    pub fn new(origin: Coordinate, statuses: StatusTable) -> Self {
        Self { origin, statuses }
    }

    /// Engine using the configured origin and status table
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.origin.coordinate(), StatusTable::from(&config.ranking))
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    /// Distance from the origin to a place, in whole meters
    pub fn distance_to(&self, place: &Place) -> u64 {
        geo::compute_distance(self.origin, place.coordinate())
    }

    /// Filter places by status, radius, name and category, nearest first.
    ///
    /// Distances are rounded before the radius comparison. Equal distances
    /// keep their input order.
    pub fn filter_and_rank(&self, places: &[Place], criteria: &FilterCriteria) -> Vec<RankedPlace> {
        let keyword = criteria.keyword();

        let mut ranked: Vec<RankedPlace> = places
            .iter()
            .filter(|place| self.statuses.is_active(&place.status))
            .filter(|place| {
                let finite = place.coordinate().is_finite();
                if !finite {
                    debug!("Skipping place {} with non-finite coordinates", place.id);
                }
                finite
            })
            .map(|place| RankedPlace {
                distance_meters: self.distance_to(place),
                place: place.clone(),
            })
            .filter(|ranked| ranked.distance_meters <= criteria.radius_meters)
            .filter(|ranked| match &keyword {
                Some(keyword) => ranked.place.name.to_lowercase().contains(keyword.as_str()),
                None => true,
            })
            .filter(|ranked| {
                criteria.selected_categories.is_empty()
                    || criteria.selected_categories.contains(&ranked.place.category)
            })
            .collect();

        ranked.sort_by_key(|ranked| ranked.distance_meters);

        debug!(
            "Ranked {} of {} places within {}m",
            ranked.len(),
            places.len(),
            criteria.radius_meters
        );
        ranked
    }
}

/// First `n` entries, or all of them if there are fewer
pub fn top_n(ranked: &[RankedPlace], n: usize) -> &[RankedPlace] {
    &ranked[..n.min(ranked.len())]
}

/// Sorted, de-duplicated, non-empty categories
pub fn categories(places: &[Place]) -> Vec<String> {
    places
        .iter()
        .filter(|place| !place.category.is_empty())
        .map(|place| place.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
