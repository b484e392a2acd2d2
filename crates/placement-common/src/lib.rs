//! Shared utilities for the placement preparation crates.
//!
//! This crate provides the small parsing and formatting helpers used by both
//! the loader and the command-line summary.

pub mod numeric;

// Re-export commonly used functions at crate root for convenience
pub use numeric::{
    MISSING_TOKENS, NotANumber, format_numeric, format_percent, is_missing_token, parse_f64,
};
