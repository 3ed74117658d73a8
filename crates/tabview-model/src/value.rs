use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cube::Cube;
use crate::series::Series;
use crate::table::Table;
use crate::workspace::Workspace;

/// Anything a workspace can hold under a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Value {
    Series(Arc<Series>),
    Table(Table),
    Cube(Cube),
    Collection(Workspace),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Series,
    Table,
    Cube,
    Collection,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Series => "series",
            Self::Table => "table",
            Self::Cube => "cube",
            Self::Collection => "collection",
        })
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        self.as_entry().kind()
    }

    pub fn as_entry(&self) -> Entry<'_> {
        match self {
            Self::Series(series) => Entry::Series(series),
            Self::Table(table) => Entry::Table(table),
            Self::Cube(cube) => Entry::Cube(cube),
            Self::Collection(workspace) => Entry::Collection(workspace),
        }
    }
}

impl From<Series> for Value {
    fn from(series: Series) -> Self {
        Self::Series(Arc::new(series))
    }
}

impl From<Arc<Series>> for Value {
    fn from(series: Arc<Series>) -> Self {
        Self::Series(series)
    }
}

impl From<Table> for Value {
    fn from(table: Table) -> Self {
        Self::Table(table)
    }
}

impl From<Cube> for Value {
    fn from(cube: Cube) -> Self {
        Self::Cube(cube)
    }
}

impl From<Workspace> for Value {
    fn from(workspace: Workspace) -> Self {
        Self::Collection(workspace)
    }
}

/// A borrowed view of whatever a path resolves to.
///
/// Paths can land on things that are not stored as a [`Value`] of their own,
/// such as a table column or a cube layer, so lookups hand out this view.
#[derive(Debug, Clone, Copy)]
pub enum Entry<'a> {
    Series(&'a Arc<Series>),
    Table(&'a Table),
    Cube(&'a Cube),
    Collection(&'a Workspace),
}

impl Entry<'_> {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Series(_) => ValueKind::Series,
            Self::Table(_) => ValueKind::Table,
            Self::Cube(_) => ValueKind::Cube,
            Self::Collection(_) => ValueKind::Collection,
        }
    }

    /// Clones the viewed data into an owned value. Series stay shared.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Series(series) => Value::Series(Arc::clone(series)),
            Self::Table(table) => Value::Table((*table).clone()),
            Self::Cube(cube) => Value::Cube((*cube).clone()),
            Self::Collection(workspace) => Value::Collection((*workspace).clone()),
        }
    }
}
