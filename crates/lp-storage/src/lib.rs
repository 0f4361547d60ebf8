//! lp-storage - Storage library for lunch-picker
//!
//! This crate provides the file-backed client-local storage used for the
//! comment cooldown.

mod cooldown_store;

pub use cooldown_store::FileCooldownStore;
