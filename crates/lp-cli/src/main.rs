//! lunch-picker - What's for lunch near the office?
//!
//! Ranks partner restaurants around the office by walking distance and
//! keeps anonymous comments on them.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a default configuration
//! lunch-picker config init
//!
//! # Nearest places within 400m
//! lunch-picker rank --places places.json --radius 400
//!
//! # Let fate decide
//! lunch-picker pick --category 한식
//!
//! # Browse places and comments interactively
//! lunch-picker browse
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
