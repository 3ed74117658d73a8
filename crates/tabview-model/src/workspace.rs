//! The named, possibly nested collection of loaded objects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cube::Cube;
use crate::error::{ModelError, Result, format_path};
use crate::table::Table;
use crate::value::{Entry, Value, ValueKind};

/// Names mapped to values, iterated in case-sensitive lexical order.
///
/// A workspace is the single source of truth for everything the tree and the
/// resolver see.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Workspace {
    entries: BTreeMap<String, Value>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Direct child lookup, without path semantics.
    pub fn entry(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Walks `path` from this workspace.
    ///
    /// Collections step into their entries, tables into columns, cubes into
    /// major layers and layers into minor columns. The empty path yields the
    /// workspace itself.
    pub fn get<K: AsRef<str>>(&self, path: &[K]) -> Result<Entry<'_>> {
        let mut current = Entry::Collection(self);
        for (depth, key) in path.iter().enumerate() {
            let key = key.as_ref();
            let next = match current {
                Entry::Collection(workspace) => workspace.entries.get(key).map(Value::as_entry),
                Entry::Table(table) => table.column(key).map(Entry::Series),
                Entry::Cube(cube) => cube.layer(key).map(Entry::Table),
                Entry::Series(_) => {
                    return Err(ModelError::NotIndexable {
                        path: format_path(&path[..depth]),
                        kind: ValueKind::Series,
                    });
                }
            };
            current = next.ok_or_else(|| ModelError::PathNotFound {
                path: format_path(&path[..=depth]),
                key: key.to_string(),
            })?;
        }
        Ok(current)
    }

    /// Stores `value` under `name` at this level.
    ///
    /// A collection arriving on top of an existing collection is merged into
    /// it key by key, so previously loaded siblings survive. Anything else
    /// overwrites.
    pub fn put(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match value {
            Value::Collection(incoming) => {
                if let Some(Value::Collection(existing)) = self.entries.get_mut(&name) {
                    existing.merge(incoming);
                } else {
                    self.entries.insert(name, Value::Collection(incoming));
                }
            }
            other => {
                self.entries.insert(name, other);
            }
        }
    }

    /// Puts every entry of `other` into this workspace.
    pub fn merge(&mut self, other: Workspace) {
        for (name, value) in other.entries {
            self.put(name, value);
        }
    }

    /// Deletes whatever `path` addresses from its immediate container.
    ///
    /// A container emptied by the removal is removed from its own parent in
    /// turn, up to (but never including) this workspace. On error nothing is
    /// modified.
    pub fn remove<K: AsRef<str>>(&mut self, path: &[K]) -> Result<Value> {
        let keys: Vec<&str> = path.iter().map(AsRef::as_ref).collect();
        if keys.is_empty() {
            return Err(ModelError::PathNotFound {
                path: format_path(&keys),
                key: String::new(),
            });
        }
        remove_from_collection(self, &keys, 0)
    }
}

fn not_found(keys: &[&str], depth: usize) -> ModelError {
    ModelError::PathNotFound {
        path: format_path(&keys[..=depth]),
        key: keys[depth].to_string(),
    }
}

fn not_indexable(keys: &[&str], depth: usize, kind: ValueKind) -> ModelError {
    ModelError::NotIndexable {
        path: format_path(&keys[..depth]),
        kind,
    }
}

// Each helper only mutates after the rest of the path has been removed
// successfully, so a failing path leaves the workspace untouched.
fn remove_from_collection(workspace: &mut Workspace, keys: &[&str], depth: usize) -> Result<Value> {
    let name = keys[depth];
    if depth + 1 == keys.len() {
        return workspace
            .entries
            .remove(name)
            .ok_or_else(|| not_found(keys, depth));
    }
    let child = workspace
        .entries
        .get_mut(name)
        .ok_or_else(|| not_found(keys, depth))?;
    let (removed, emptied) = match child {
        Value::Collection(inner) => {
            let removed = remove_from_collection(inner, keys, depth + 1)?;
            (removed, inner.is_empty())
        }
        Value::Table(table) => {
            let removed = remove_from_table(table, keys, depth + 1)?;
            (removed, table.is_empty())
        }
        Value::Cube(cube) => {
            let removed = remove_from_cube(cube, keys, depth + 1)?;
            (removed, cube.is_empty())
        }
        Value::Series(_) => return Err(not_indexable(keys, depth + 1, ValueKind::Series)),
    };
    if emptied {
        workspace.entries.remove(name);
    }
    Ok(removed)
}

fn remove_from_table(table: &mut Table, keys: &[&str], depth: usize) -> Result<Value> {
    let name = keys[depth];
    if depth + 1 < keys.len() {
        return Err(match table.column(name) {
            Some(_) => not_indexable(keys, depth + 1, ValueKind::Series),
            None => not_found(keys, depth),
        });
    }
    table
        .remove_column(name)
        .map(Value::Series)
        .ok_or_else(|| not_found(keys, depth))
}

fn remove_from_cube(cube: &mut Cube, keys: &[&str], depth: usize) -> Result<Value> {
    let major = keys[depth];
    if depth + 1 == keys.len() {
        return cube
            .remove_layer(major)
            .map(Value::Table)
            .ok_or_else(|| not_found(keys, depth));
    }
    let layer = cube.layer_mut(major).ok_or_else(|| not_found(keys, depth))?;
    let removed = remove_from_table(layer, keys, depth + 1)?;
    if layer.is_empty() {
        cube.remove_layer(major);
    }
    Ok(removed)
}

impl FromIterator<(String, Value)> for Workspace {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut workspace = Self::new();
        for (name, value) in iter {
            workspace.put(name, value);
        }
        workspace
    }
}
