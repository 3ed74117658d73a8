//! CSV file reading into key-indexed tables.

use std::path::Path;

use polars::prelude::*;
use tabview_common::{any_to_f64, any_to_key};
use tabview_model::Table;

use crate::error::{IngestError, Result, read_error};

/// Reads a CSV file whose first column is the key axis.
///
/// The remaining columns are read as numbers; cells that do not parse as a
/// number become null.
pub fn read_csv_table(path: &Path) -> Result<Table> {
    std::fs::metadata(path).map_err(|e| read_error(path, e))?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    dataframe_to_table(&df, path)
}

/// Converts a `DataFrame` into a table, taking the first column as keys.
///
/// A frame with no columns after the key column is rejected as empty.
pub fn dataframe_to_table(df: &DataFrame, path: &Path) -> Result<Table> {
    let Some((index_column, value_columns)) = df
        .get_columns()
        .split_first()
        .filter(|(_, values)| !values.is_empty())
    else {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    };

    let index_series = index_column.as_materialized_series();
    let mut keys = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = index_series.get(idx).unwrap_or(AnyValue::Null);
        let key = any_to_key(value).ok_or_else(|| IngestError::MissingKey {
            path: path.to_path_buf(),
            row: idx + 1,
        })?;
        keys.push(key);
    }

    let columns = value_columns
        .iter()
        .map(|column| {
            let series = column.as_materialized_series();
            let values = (0..df.height())
                .map(|idx| any_to_f64(series.get(idx).unwrap_or(AnyValue::Null)))
                .collect();
            (column.name().to_string(), values)
        })
        .collect();

    tracing::debug!(
        path = %path.display(),
        rows = keys.len(),
        columns = value_columns.len(),
        "csv converted to table"
    );

    Table::new(keys, columns).map_err(|source| IngestError::Model {
        path: path.to_path_buf(),
        source,
    })
}
