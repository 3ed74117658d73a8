//! Shared utilities for tabview crates.
//!
//! This crate holds the Polars bridge used by the loader and by anything that
//! hands resolved tables to a display layer.

pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use polars::{
    DEFAULT_INDEX_NAME, any_to_f64, any_to_key, any_to_string, format_numeric, parse_f64,
    table_to_dataframe,
};
