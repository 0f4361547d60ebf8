//! lp-core - Core library for lunch-picker
//!
//! This crate provides the core logic for the lunch picker: ranking places
//! by distance from the office, spreadsheet decoding, configuration, and
//! moderation of anonymous place comments.

pub mod error;
pub mod types;
pub mod config;
pub mod geo;
pub mod place;
pub mod sheet;
pub mod comment;

pub use error::{LunchPickerError, Result};
pub use types::*;
