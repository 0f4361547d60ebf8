//! Place data models

use crate::geo;
use crate::types::{Coordinate, PlaceId};
use serde::{Deserialize, Serialize};

/// A lunch place as published in the spreadsheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Spreadsheet-assigned identifier
    #[serde(rename = "place_id")]
    pub id: PlaceId,
    pub name: String,
    /// Free-form grouping column (building, street...)
    #[serde(default)]
    pub group: String,
    pub category: String,
    pub lat: f64,
    pub lng: f64,
    /// External map link, used for walking directions
    #[serde(default)]
    pub map_url: String,
    /// Partnership status token
    #[serde(default)]
    pub status: String,
    /// Raw update timestamp as written in the sheet
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Place {
    /// Minimal place, mostly for tests and fixtures
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        coordinate: Coordinate,
    ) -> Self {
        Self {
            id: PlaceId::from_string(id),
            name: name.into(),
            group: String::new(),
            category: category.into(),
            lat: coordinate.lat,
            lng: coordinate.lng,
            map_url: String::new(),
            status: String::new(),
            updated_at: None,
        }
    }

    /// Builder-style status setter
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Builder-style update timestamp setter
    pub fn with_updated_at(mut self, updated_at: impl Into<String>) -> Self {
        self.updated_at = Some(updated_at.into());
        self
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

/// A place together with its distance from the origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPlace {
    #[serde(flatten)]
    pub place: Place,
    pub distance_meters: u64,
}

impl RankedPlace {
    /// Walking time estimate at the given speed
    pub fn walk_minutes(&self, speed_m_per_min: f64) -> u64 {
        geo::walk_minutes(self.distance_meters, speed_m_per_min)
    }
}

impl std::ops::Deref for RankedPlace {
    type Target = Place;

    fn deref(&self) -> &Place {
        &self.place
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_serializes_with_sheet_field_names() {
        let place = Place::new("p1", "Kimbap Heaven", "Korean", Coordinate::new(37.5, 127.0))
            .with_status("제휴중");
        let json = serde_json::to_value(&place).unwrap();
        assert_eq!(json["place_id"], "p1");
        assert_eq!(json["status"], "제휴중");
        assert!(json["updated_at"].is_null());
    }

    #[test]
    fn test_ranked_place_flattens() {
        let ranked = RankedPlace {
            place: Place::new("p1", "Ramen", "Japanese", Coordinate::new(37.5, 127.0)),
            distance_meters: 412,
        };
        let json = serde_json::to_value(&ranked).unwrap();
        assert_eq!(json["name"], "Ramen");
        assert_eq!(json["distance_meters"], 412);
        assert_eq!(ranked.name, "Ramen");
        assert_eq!(ranked.walk_minutes(80.0), 5);
    }
}
