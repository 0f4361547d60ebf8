//! Place ranking module
//!
//! Distance ranking, filtering, random picks, and freshness checks over
//! place records loaded from the spreadsheet.

pub mod model;
pub mod status;
pub mod filter;
pub mod ranking;
pub mod picker;
pub mod freshness;

pub use model::*;
pub use status::StatusTable;
pub use filter::FilterCriteria;
pub use ranking::{categories, top_n, RankingEngine};
pub use picker::{pick_random, Pick, RandomSource, RngSource};
pub use freshness::{is_recently_updated, parse_timestamp};
