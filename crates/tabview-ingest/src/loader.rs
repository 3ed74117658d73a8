//! Extension-based dispatch between file formats.

use std::path::Path;

use tabview_core::Session;
use tabview_model::Value;
use tracing::info;

use crate::csv::read_csv_table;
use crate::error::{IngestError, Result};
use crate::json::load_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// A serialized [`Value`] of any kind.
    Json,
    /// A single table with the key axis in the first column.
    Csv,
}

impl FileFormat {
    /// Picks the format from the file extension, ignoring case.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        if extension.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else if extension.eq_ignore_ascii_case("csv") {
            Ok(Self::Csv)
        } else {
            Err(IngestError::UnsupportedFileType {
                path: path.to_path_buf(),
                extension: extension.to_string(),
            })
        }
    }
}

pub fn load_file(path: &Path) -> Result<Value> {
    match FileFormat::from_path(path)? {
        FileFormat::Json => load_json(path),
        FileFormat::Csv => read_csv_table(path).map(Value::Table),
    }
}

/// Loads `path` and adds it to the session under its file name.
///
/// Returns the name the value was stored under.
pub fn load_into(session: &mut Session, path: &Path) -> Result<String> {
    let value = load_file(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    info!(path = %path.display(), object = %name, kind = %value.kind(), "loaded file");
    session.add_object(name.clone(), value);
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            FileFormat::from_path(Path::new("a/b.JSON")).unwrap(),
            FileFormat::Json
        );
        assert_eq!(
            FileFormat::from_path(Path::new("prices.csv")).unwrap(),
            FileFormat::Csv
        );
        assert!(matches!(
            FileFormat::from_path(Path::new("notes")),
            Err(IngestError::UnsupportedFileType { extension, .. }) if extension.is_empty()
        ));
    }

    #[test]
    fn test_unknown_extension_fails_before_reading() {
        let result = load_file(Path::new("/nonexistent/data.pickle"));
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedFileType { extension, .. }) if extension == "pickle"
        ));
    }
}
