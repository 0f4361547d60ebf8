//! Place catalog assembled from sheet rows

use super::gviz::{parse_gviz, SheetRow};
use crate::error::{LunchPickerError, Result};
use crate::place::Place;
use crate::types::PlaceId;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Places and category colors from one refresh of the sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceCatalog {
    pub places: Vec<Place>,
    pub category_colors: BTreeMap<String, String>,
}

impl PlaceCatalog {
    /// Decode a saved places response and optional colors response.
    ///
    /// Both may be gviz bodies or plain JSON. A JSON object carrying
    /// `places` (and optionally `categoryColors`) is read directly.
    pub fn from_sources(
        places_text: &str,
        colors_text: Option<&str>,
        default_category: &str,
    ) -> Result<Self> {
        let (rows, mut category_colors) = decode_places_document(places_text)?;
        let places = places_from_rows(&rows, default_category);

        if let Some(colors_text) = colors_text {
            let color_rows = decode_rows(colors_text)?;
            category_colors.extend(colors_from_rows(&color_rows));
        }

        debug!(
            "Loaded {} places and {} category colors",
            places.len(),
            category_colors.len()
        );
        Ok(Self {
            places,
            category_colors,
        })
    }

    /// Color for a category, falling back to `default`
    pub fn color_for<'a>(&'a self, category: &str, default: &'a str) -> &'a str {
        self.category_colors
            .get(category)
            .map(String::as_str)
            .unwrap_or(default)
    }

    /// Look up a place by id
    pub fn find(&self, id: &PlaceId) -> Option<&Place> {
        self.places.iter().find(|place| &place.id == id)
    }
}

fn decode_places_document(text: &str) -> Result<(Vec<SheetRow>, BTreeMap<String, String>)> {
    if let Ok(Value::Object(mut document)) = serde_json::from_str::<Value>(text.trim()) {
        if let Some(places) = document.remove("places") {
            let colors = match document.remove("categoryColors") {
                Some(Value::Object(colors)) => colors
                    .into_iter()
                    .filter_map(|(category, color)| {
                        js_string(&color).map(|color| (category, color))
                    })
                    .collect(),
                _ => BTreeMap::new(),
            };
            return Ok((rows_from_array(places)?, colors));
        }
    }
    Ok((decode_rows(text)?, BTreeMap::new()))
}

fn decode_rows(text: &str) -> Result<Vec<SheetRow>> {
    if text.trim_start().starts_with('[') {
        let value: Value = serde_json::from_str(text.trim())
            .map_err(|e| LunchPickerError::InvalidSheet(e.to_string()))?;
        return rows_from_array(value);
    }
    parse_gviz(text)
}

fn rows_from_array(value: Value) -> Result<Vec<SheetRow>> {
    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(row) => Some(row),
                _ => None,
            })
            .collect()),
        _ => Err(LunchPickerError::InvalidSheet(
            "expected an array of records".to_string(),
        )),
    }
}

/// Normalize place rows, dropping rows without id or name and rows whose
/// coordinates are not finite numbers.
pub fn places_from_rows(rows: &[SheetRow], default_category: &str) -> Vec<Place> {
    rows.iter()
        .filter_map(|row| {
            let place = place_from_row(row, default_category);
            if place.is_none() {
                debug!("Dropping sheet row {:?}", row.get("place_id"));
            }
            place
        })
        .collect()
}

fn place_from_row(row: &SheetRow, default_category: &str) -> Option<Place> {
    let text = |key: &str| row.get(key).and_then(js_string);

    let id = text("place_id")?;
    let name = text("name")?;
    let lat = row.get("lat").and_then(js_number)?;
    let lng = row.get("lng").and_then(js_number)?;

    Some(Place {
        id: PlaceId::from_string(id),
        name,
        group: text("group").unwrap_or_default(),
        category: text("category").unwrap_or_else(|| default_category.to_string()),
        lat,
        lng,
        map_url: text("map_url").unwrap_or_default(),
        status: text("status").unwrap_or_default(),
        updated_at: text("updated_at"),
    })
}

/// Category -> color pairs; rows missing either are skipped
pub fn colors_from_rows(rows: &[SheetRow]) -> BTreeMap<String, String> {
    rows.iter()
        .filter_map(|row| {
            let category = row.get("category").and_then(js_string)?;
            let color = row.get("color").and_then(js_string)?;
            Some((category, color))
        })
        .collect()
}

/// Stringify a truthy cell; blanks, zero, false and null yield `None`
fn js_string(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => {
            let f = n.as_f64()?;
            if f == 0.0 || f.is_nan() {
                None
            } else if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if f.fract() == 0.0 && f.abs() < 1e15 {
                Some(format!("{}", f as i64))
            } else {
                Some(f.to_string())
            }
        }
        other => Some(other.to_string()),
    }
}

/// Finite number from a numeric cell or numeric text
fn js_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn rows(value: Value) -> Vec<SheetRow> {
        rows_from_array(value).unwrap()
    }

    #[test]
    fn test_normalizes_rows() {
        let places = places_from_rows(
            &rows(json!([{
                "place_id": 17,
                "name": "Kimbap Heaven",
                "group": "B1",
                "category": null,
                "lat": "37.5080",
                "lng": 127.0555,
                "map_url": "https://map.example/17",
                "status": "제휴중",
                "updated_at": "Date(2024,2,10)"
            }])),
            "기타",
        );

        assert_eq!(places.len(), 1);
        let place = &places[0];
        assert_eq!(place.id.as_str(), "17");
        assert_eq!(place.category, "기타");
        assert_eq!(place.lat, 37.508);
        assert_eq!(place.lng, 127.0555);
        assert_eq!(place.status, "제휴중");
        assert_eq!(place.updated_at.as_deref(), Some("Date(2024,2,10)"));
    }

    #[test]
    fn test_drops_incomplete_and_non_numeric_rows() {
        let places = places_from_rows(
            &rows(json!([
                { "place_id": "a", "name": "", "lat": 37.5, "lng": 127.0 },
                { "place_id": "", "name": "No id", "lat": 37.5, "lng": 127.0 },
                { "place_id": "c", "name": "Bad lat", "lat": "north", "lng": 127.0 },
                { "place_id": "d", "name": "No lng", "lat": 37.5 },
                { "place_id": "e", "name": "Blank lat", "lat": "", "lng": 127.0 },
                { "place_id": "f", "name": "Good", "lat": 37.5, "lng": 127.0 }
            ])),
            "기타",
        );
        let ids: Vec<_> = places.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["f"]);
        assert_eq!(places[0].status, "");
    }

    #[test]
    fn test_colors_from_rows() {
        let colors = colors_from_rows(&rows(json!([
            { "category": "한식", "color": "#EF4444" },
            { "category": "중식", "color": null },
            { "category": null, "color": "#000000" }
        ])));
        assert_eq!(colors.len(), 1);
        assert_eq!(colors["한식"], "#EF4444");
    }

    #[test]
    fn test_catalog_from_api_document() {
        let document = json!({
            "places": [
                { "place_id": "p1", "name": "Ramen", "category": "일식", "lat": 37.5, "lng": 127.0 }
            ],
            "categoryColors": { "일식": "#3B82F6" }
        })
        .to_string();

        let catalog = PlaceCatalog::from_sources(&document, None, "기타").unwrap();
        assert_eq!(catalog.places.len(), 1);
        assert_eq!(catalog.color_for("일식", "#9CA3AF"), "#3B82F6");
        assert_eq!(catalog.color_for("양식", "#9CA3AF"), "#9CA3AF");
        assert!(catalog.find(&PlaceId::from_string("p1")).is_some());
    }

    #[test]
    fn test_catalog_from_gviz_sources() {
        let places = r#"google.visualization.Query.setResponse({"table":{"cols":[{"label":"place_id"},{"label":"name"},{"label":"category"},{"label":"lat"},{"label":"lng"}],"rows":[{"c":[{"v":"p1"},{"v":"Pho"},{"v":"베트남"},{"v":37.5},{"v":127.0}]}]}});"#;
        let colors = r##"setResponse({"table":{"cols":[{"label":"category"},{"label":"color"}],"rows":[{"c":[{"v":"베트남"},{"v":"#10B981"}]}]}});"##;

        let catalog = PlaceCatalog::from_sources(places, Some(colors), "기타").unwrap();
        assert_eq!(catalog.places[0].name, "Pho");
        assert_eq!(catalog.color_for("베트남", "#9CA3AF"), "#10B981");
    }

    #[test]
    fn test_js_string_formats_numbers_like_the_sheet() {
        assert_eq!(js_string(&json!(12.0)), Some("12".to_string()));
        assert_eq!(js_string(&json!(1.5)), Some("1.5".to_string()));
        assert_eq!(js_string(&json!(0)), None);
        assert_eq!(js_string(&json!(true)), Some("true".to_string()));
    }
}
