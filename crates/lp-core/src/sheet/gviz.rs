//! Google visualization (gviz) response parsing

use crate::error::{LunchPickerError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

/// One sheet row keyed by column label
pub type SheetRow = Map<String, Value>;

#[derive(Debug, Deserialize)]
struct GvizResponse {
    table: GvizTable,
}

#[derive(Debug, Deserialize)]
struct GvizTable {
    cols: Vec<GvizColumn>,
    #[serde(default)]
    rows: Vec<GvizRow>,
}

#[derive(Debug, Deserialize)]
struct GvizColumn {
    #[serde(default)]
    label: String,
}

#[derive(Debug, Deserialize)]
struct GvizRow {
    #[serde(default)]
    c: Vec<Option<GvizCell>>,
}

#[derive(Debug, Deserialize)]
struct GvizCell {
    #[serde(default)]
    v: Value,
}

/// Parse a gviz response body into rows.
///
/// The body is JSON wrapped in a JavaScript callback; everything between
/// the first `{` and the last `}` is taken as the payload. Empty cells
/// become `null`.
pub fn parse_gviz(text: &str) -> Result<Vec<SheetRow>> {
    let (start, end) = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => {
            return Err(LunchPickerError::InvalidSheet(
                "no JSON payload in response".to_string(),
            ))
        }
    };

    let response: GvizResponse = serde_json::from_str(&text[start..=end])
        .map_err(|e| LunchPickerError::InvalidSheet(e.to_string()))?;

    let headers: Vec<String> = response.table.cols.into_iter().map(|c| c.label).collect();

    let rows = response
        .table
        .rows
        .into_iter()
        .map(|row| {
            row.c
                .into_iter()
                .zip(headers.iter())
                .map(|(cell, header)| (header.clone(), cell.map(|c| c.v).unwrap_or(Value::Null)))
                .collect()
        })
        .collect();

    Ok(rows)
}
