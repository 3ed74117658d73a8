//! Terminal rendering of resolved selections.

use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table as ComfyTable};
use polars::prelude::AnyValue;
use tabview_common::{DEFAULT_INDEX_NAME, any_to_string, table_to_dataframe};
use tabview_core::Resolution;
use tabview_model::Table;

/// Builds the display table for `table`: the key axis first, one column per
/// selected series, nulls shown as a dimmed `-`.
///
/// With `styled` false no ANSI sequences are emitted, whatever the terminal.
pub fn selection_table(table: &Table, styled: bool) -> Result<ComfyTable> {
    let df = table_to_dataframe(table, DEFAULT_INDEX_NAME)?;
    let mut out = ComfyTable::new();
    if !styled {
        out.force_no_tty();
    }
    apply_table_style(&mut out);
    out.set_header(
        df.get_column_names()
            .into_iter()
            .map(|name| header_cell(name.as_str())),
    );
    let columns = df.get_columns();
    for row in 0..df.height() {
        out.add_row(columns.iter().map(|column| {
            match column.as_materialized_series().get(row) {
                Ok(AnyValue::Null) | Err(_) => dim_cell("-"),
                Ok(value) => Cell::new(any_to_string(value)),
            }
        }));
    }
    Ok(out)
}

pub fn print_selection(resolution: &Resolution, table: &Table, styled: bool) -> Result<()> {
    if table.is_empty() {
        println!("(empty selection)");
    } else {
        println!("{}", selection_table(table, styled)?);
    }
    for rejected in &resolution.rejected {
        eprintln!("rejected {}: {}", rejected.path, rejected.error);
    }
    for warning in &resolution.warnings {
        eprintln!(
            "warning: column '{}' from {} was replaced by {}",
            warning.name, warning.first, warning.second
        );
    }
    Ok(())
}

fn apply_table_style(table: &mut ComfyTable) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(value: &str) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
