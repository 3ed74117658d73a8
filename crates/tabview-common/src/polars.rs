//! Polars conversions.
//!
//! Tables leave the core as Polars `DataFrame`s for the display layer, and
//! CSV input arrives as `DataFrame`s from the loader. The helpers here turn
//! `AnyValue`s into axis keys and cell values and back.

use polars::prelude::*;

use tabview_model::{Key, Table};

/// Column name used for the key axis when none is given.
pub const DEFAULT_INDEX_NAME: &str = "index";

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null` and formats floats without trailing
/// zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use tabview_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_string(AnyValue::Float64(1.50)), "1.5");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Formats a floating-point number without trailing zeros.
///
/// # Examples
///
/// ```
/// use tabview_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(0.25), "0.25");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Converts an `AnyValue` to `f64`, returning `None` for nulls and anything
/// that does not read as a number.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::Boolean(b) => Some(if b { 1.0 } else { 0.0 }),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Converts an `AnyValue` to an axis key. Nulls have no key.
pub fn any_to_key(value: AnyValue<'_>) -> Option<Key> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(Key::Int(i64::from(v))),
        AnyValue::Int16(v) => Some(Key::Int(i64::from(v))),
        AnyValue::Int32(v) => Some(Key::Int(i64::from(v))),
        AnyValue::Int64(v) => Some(Key::Int(v)),
        AnyValue::UInt8(v) => Some(Key::Int(i64::from(v))),
        AnyValue::UInt16(v) => Some(Key::Int(i64::from(v))),
        AnyValue::UInt32(v) => Some(Key::Int(i64::from(v))),
        AnyValue::UInt64(v) => Some(
            i64::try_from(v)
                .map(Key::Int)
                .unwrap_or_else(|_| Key::Text(v.to_string())),
        ),
        other => {
            let raw = any_to_string(other);
            if raw.trim().is_empty() {
                None
            } else {
                Some(Key::parse(&raw))
            }
        }
    }
}

/// Parses a string as `f64`, returning `None` for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Converts a table into a `DataFrame` whose first column is the key axis.
///
/// An all-integer axis becomes an `Int64` column; any other axis is rendered
/// as strings. Null cells stay null.
pub fn table_to_dataframe(table: &Table, index_name: &str) -> PolarsResult<DataFrame> {
    let mut columns = Vec::with_capacity(table.width() + 1);
    columns.push(index_column(table.index(), index_name));
    for column in table.columns() {
        let values: Vec<Option<f64>> = column.series.values().to_vec();
        columns.push(Series::new(column.name.as_str().into(), values).into_column());
    }
    DataFrame::new(columns)
}

fn index_column(keys: &[Key], name: &str) -> Column {
    let ints: Option<Vec<i64>> = keys
        .iter()
        .map(|key| match key {
            Key::Int(value) => Some(*value),
            _ => None,
        })
        .collect();
    match ints {
        Some(values) => Series::new(name.into(), values).into_column(),
        None => {
            let values: Vec<String> = keys.iter().map(ToString::to_string).collect();
            Series::new(name.into(), values).into_column()
        }
    }
}
