//! Serialized-object files: one [`Value`] encoded as JSON.

use std::path::Path;

use tabview_model::Value;

use crate::error::{IngestError, Result, read_error};

/// Reads a value written by [`save_json`].
///
/// Decoding validates the data, so duplicate keys or ragged columns are
/// reported as JSON errors.
pub fn load_json(path: &Path) -> Result<Value> {
    let contents = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
    serde_json::from_str(&contents).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_json(path: &Path, value: &Value) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}
