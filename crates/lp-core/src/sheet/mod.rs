//! Spreadsheet decoding module
//!
//! Turns saved spreadsheet responses into place records and category
//! colors. Fetching the sheet is left to the caller.

pub mod gviz;
pub mod catalog;

pub use gviz::{parse_gviz, SheetRow};
pub use catalog::{colors_from_rows, places_from_rows, PlaceCatalog};
