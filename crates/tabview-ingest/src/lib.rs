//! Loading and saving tabview data files.
//!
//! Two formats are understood:
//!
//! - **JSON**: any workspace value (series, table, cube or nested
//!   collection) in its serde layout
//! - **CSV**: one table, key axis first, read with Polars
//!
//! Any other extension fails with [`IngestError::UnsupportedFileType`].
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tabview_core::Session;
//! use tabview_ingest::load_into;
//!
//! let mut session = Session::new();
//! let name = load_into(&mut session, Path::new("samples/df.csv"))?;
//! println!("{}", session.tree().render(&Default::default()));
//! ```

mod csv;
mod error;
mod json;
mod loader;
pub mod random;

// === Error Types ===
pub use error::{IngestError, Result};

// === Formats ===
pub use csv::{dataframe_to_table, read_csv_table, write_csv};
pub use json::{load_json, save_json};

// === Loading ===
pub use loader::{FileFormat, load_file, load_into};

// === Sample Data ===
pub use random::{SampleOptions, random_cube, random_series, random_table, sample_workspace};
