//! Three-dimensional data: major labels, each holding a table of minor columns.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::arith::ArithOp;
use crate::error::{ModelError, Result};
use crate::key::Key;
use crate::series::Series;
use crate::table::Table;

/// One major slice of a cube. Its columns are the minor labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub major: String,
    pub table: Table,
}

/// A cube of cells addressed by `(major, minor)`, every cell a series over
/// the shared outer axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CubeRepr", into = "CubeRepr")]
pub struct Cube {
    layers: Vec<Layer>,
}

#[derive(Serialize, Deserialize)]
struct CubeRepr {
    layers: Vec<Layer>,
}

impl TryFrom<CubeRepr> for Cube {
    type Error = ModelError;

    fn try_from(repr: CubeRepr) -> Result<Self> {
        Self::new(
            repr.layers
                .into_iter()
                .map(|layer| (layer.major, layer.table))
                .collect(),
        )
    }
}

impl From<Cube> for CubeRepr {
    fn from(cube: Cube) -> Self {
        Self {
            layers: cube.layers,
        }
    }
}

impl Cube {
    pub fn new(layers: Vec<(String, Table)>) -> Result<Self> {
        let mut cube = Self {
            layers: Vec::with_capacity(layers.len()),
        };
        for (major, table) in layers {
            if cube.layer(&major).is_some() {
                return Err(ModelError::DuplicateLabel { label: major });
            }
            cube.layers.push(Layer { major, table });
        }
        Ok(cube)
    }

    /// Builds a dense cube where every major carries the same minor labels.
    ///
    /// `cells` is laid out major-first: cell `(i, j)` sits at
    /// `i * minors.len() + j` and holds one value per `index` key.
    pub fn from_dense(
        index: Vec<Key>,
        majors: Vec<String>,
        minors: Vec<String>,
        cells: Vec<Vec<Option<f64>>>,
    ) -> Result<Self> {
        let expected = majors.len() * minors.len();
        if cells.len() != expected {
            return Err(ModelError::LengthMismatch {
                context: "cube cells".to_string(),
                expected,
                found: cells.len(),
            });
        }
        let mut cells = cells.into_iter();
        let mut layers = Vec::with_capacity(majors.len());
        for major in majors {
            let columns = minors
                .iter()
                .map(|minor| (minor.clone(), cells.next().unwrap_or_default()))
                .collect();
            layers.push((major, Table::new(index.clone(), columns)?));
        }
        Self::new(layers)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn majors(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|layer| layer.major.as_str())
    }

    pub fn layer(&self, major: &str) -> Option<&Table> {
        self.layers
            .iter()
            .find(|layer| layer.major == major)
            .map(|layer| &layer.table)
    }

    pub fn layer_mut(&mut self, major: &str) -> Option<&mut Table> {
        self.layers
            .iter_mut()
            .find(|layer| layer.major == major)
            .map(|layer| &mut layer.table)
    }

    pub fn remove_layer(&mut self, major: &str) -> Option<Table> {
        let position = self.layers.iter().position(|layer| layer.major == major)?;
        Some(self.layers.remove(position).table)
    }

    pub fn cell(&self, major: &str, minor: &str) -> Option<&Arc<Series>> {
        self.layer(major).and_then(|table| table.column(minor))
    }

    pub fn cell_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.table.width()).sum()
    }

    /// Cell-wise arithmetic over the union of major and minor labels.
    pub fn combine(&self, other: &Self, op: ArithOp) -> Self {
        let mut majors: Vec<&str> = self.majors().collect();
        majors.extend(other.majors().filter(|major| self.layer(major).is_none()));
        let empty = Table::default();
        let layers = majors
            .into_iter()
            .map(|major| {
                let left = self.layer(major).unwrap_or(&empty);
                let right = other.layer(major).unwrap_or(&empty);
                Layer {
                    major: major.to_string(),
                    table: left.combine(right, op),
                }
            })
            .collect();
        Self { layers }
    }

    pub fn plus(&self, other: &Self) -> Self {
        self.combine(other, ArithOp::Add)
    }

    pub fn minus(&self, other: &Self) -> Self {
        self.combine(other, ArithOp::Subtract)
    }
}
