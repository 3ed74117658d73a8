//! Multi-column tables sharing one key axis.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::arith::ArithOp;
use crate::error::{ModelError, Result};
use crate::key::{Key, union_keys};
use crate::series::Series;

/// A named column. The series keys always equal the owning table's axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub series: Arc<Series>,
}

/// Ordered, uniquely named columns over one sorted key axis.
///
/// Columns are reference counted: a column handed out by [`Table::column`]
/// stays pointer-identical for as long as the table is not realigned, which
/// lets callers recognise the same column reached through different paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableRepr", into = "TableRepr")]
pub struct Table {
    pub(crate) index: Vec<Key>,
    pub(crate) columns: Vec<Column>,
}

#[derive(Serialize, Deserialize)]
struct TableRepr {
    index: Vec<Key>,
    columns: Vec<String>,
    data: Vec<Vec<Option<f64>>>,
}

impl TryFrom<TableRepr> for Table {
    type Error = ModelError;

    fn try_from(repr: TableRepr) -> Result<Self> {
        if repr.columns.len() != repr.data.len() {
            return Err(ModelError::LengthMismatch {
                context: "table data".to_string(),
                expected: repr.columns.len(),
                found: repr.data.len(),
            });
        }
        Self::new(repr.index, repr.columns.into_iter().zip(repr.data).collect())
    }
}

impl From<Table> for TableRepr {
    fn from(table: Table) -> Self {
        let columns = table.columns.iter().map(|c| c.name.clone()).collect();
        let data = table
            .columns
            .iter()
            .map(|c| c.series.values().to_vec())
            .collect();
        Self {
            index: table.index,
            columns,
            data,
        }
    }
}

impl Table {
    /// Builds a table from an axis and per-column values laid out along it.
    pub fn new(index: Vec<Key>, columns: Vec<(String, Vec<Option<f64>>)>) -> Result<Self> {
        let axis = Series::new(index.clone(), vec![None; index.len()])?
            .keys()
            .to_vec();
        let mut table = Self {
            index: axis,
            columns: Vec::with_capacity(columns.len()),
        };
        for (name, values) in columns {
            if table.contains_column(&name) {
                return Err(ModelError::DuplicateColumn { name });
            }
            if values.len() != index.len() {
                return Err(ModelError::LengthMismatch {
                    context: format!("column '{name}'"),
                    expected: index.len(),
                    found: values.len(),
                });
            }
            let series = Series::new(index.clone(), values)?;
            table.columns.push(Column {
                name,
                series: Arc::new(series),
            });
        }
        Ok(table)
    }

    /// Builds a table from independent series, outer-joining their axes.
    pub fn from_series<N, I>(columns: I) -> Result<Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Arc<Series>)>,
    {
        let mut table = Self::default();
        for (name, series) in columns {
            let name = name.into();
            if table.contains_column(&name) {
                return Err(ModelError::DuplicateColumn { name });
            }
            table.insert_column(name, &series);
        }
        Ok(table)
    }

    pub fn index(&self) -> &[Key] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&Arc<Series>> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.series)
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.index.len()
    }

    /// A table without columns. Its axis may still hold keys.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn value(&self, row: usize, column: usize) -> Option<f64> {
        self.columns
            .get(column)
            .and_then(|c| c.series.values().get(row).copied().flatten())
    }

    /// Iterates rows as `(key, cells)` in axis order.
    pub fn rows(&self) -> impl Iterator<Item = (&Key, Vec<Option<f64>>)> + '_ {
        self.index.iter().enumerate().map(move |(row, key)| {
            let cells = self
                .columns
                .iter()
                .map(|c| c.series.values()[row])
                .collect();
            (key, cells)
        })
    }

    /// Inserts `series` as column `name`, outer-joining the axes.
    ///
    /// Existing columns are null-filled on keys only the new series covers, and
    /// the new column is null-filled on keys only the table covers. When a
    /// column with the same name exists it is replaced in place and returned.
    pub fn insert_column(
        &mut self,
        name: impl Into<String>,
        series: &Arc<Series>,
    ) -> Option<Arc<Series>> {
        let name = name.into();
        let axis = union_keys(&self.index, series.keys());
        if axis != self.index {
            for column in &mut self.columns {
                column.series = Arc::new(column.series.reindex(&axis));
            }
            self.index = axis;
        }
        let aligned = if series.keys() == self.index.as_slice() {
            Arc::clone(series)
        } else {
            Arc::new(series.reindex(&self.index))
        };
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(existing) => Some(std::mem::replace(&mut existing.series, aligned)),
            None => {
                self.columns.push(Column {
                    name,
                    series: aligned,
                });
                None
            }
        }
    }

    /// Removes column `name`. The axis is left as it is.
    pub fn remove_column(&mut self, name: &str) -> Option<Arc<Series>> {
        let position = self.columns.iter().position(|c| c.name == name)?;
        Some(self.columns.remove(position).series)
    }

    /// Table-table arithmetic over the union of keys and of column names.
    ///
    /// Columns present on one side only come out all null.
    pub fn combine(&self, other: &Self, op: ArithOp) -> Self {
        let index = union_keys(&self.index, &other.index);
        let mut names: Vec<&str> = self.column_names().collect();
        names.extend(other.column_names().filter(|name| !self.contains_column(name)));
        let columns = names
            .into_iter()
            .map(|name| {
                let left = aligned_or_nulls(self.column(name), &index);
                let right = aligned_or_nulls(other.column(name), &index);
                Column {
                    name: name.to_string(),
                    series: Arc::new(left.combine(&right, op)),
                }
            })
            .collect();
        Self { index, columns }
    }

    /// Applies `column op series` to every column, aligned on the key axis.
    pub fn combine_series(&self, series: &Series, op: ArithOp) -> Self {
        self.broadcast(series, |column, series| column.combine(series, op))
    }

    /// Applies `series op column` to every column, aligned on the key axis.
    pub fn rcombine_series(&self, series: &Series, op: ArithOp) -> Self {
        self.broadcast(series, |column, series| series.combine(column, op))
    }

    fn broadcast(&self, series: &Series, apply: impl Fn(&Series, &Series) -> Series) -> Self {
        let index = union_keys(&self.index, series.keys());
        let series = series.reindex(&index);
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                series: Arc::new(apply(&c.series.reindex(&index), &series)),
            })
            .collect();
        Self { index, columns }
    }

    pub fn plus(&self, other: &Self) -> Self {
        self.combine(other, ArithOp::Add)
    }

    pub fn minus(&self, other: &Self) -> Self {
        self.combine(other, ArithOp::Subtract)
    }
}

fn aligned_or_nulls(series: Option<&Arc<Series>>, index: &[Key]) -> Series {
    match series {
        Some(series) => series.reindex(index),
        None => Series::nulls(index),
    }
}
