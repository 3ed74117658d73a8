//! CSV output for tables.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use tabview_common::{DEFAULT_INDEX_NAME, table_to_dataframe};
use tabview_model::Table;

use crate::error::{IngestError, Result};

/// Writes `table` as CSV with the key axis as the first column.
pub fn write_csv(path: &Path, table: &Table) -> Result<()> {
    let mut df = table_to_dataframe(table, DEFAULT_INDEX_NAME)?;
    let mut file = File::create(path).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;
    tracing::debug!(path = %path.display(), rows = df.height(), "table written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tabview_model::Key;
    use tempfile::TempDir;

    use super::*;
    use crate::csv::read_csv_table;

    #[test]
    fn test_written_table_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("df.csv");
        let table = Table::new(
            vec![Key::Int(1), Key::Int(2)],
            vec![
                ("a".to_string(), vec![Some(0.5), None]),
                ("b".to_string(), vec![Some(1.0), Some(2.0)]),
            ],
        )
        .unwrap();

        write_csv(&path, &table).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("index,a,b\n"));

        let back = read_csv_table(&path).unwrap();
        assert_eq!(back, table);
    }
}
