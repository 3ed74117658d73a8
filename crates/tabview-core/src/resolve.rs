//! Turning selected tree paths into one aligned table.
//!
//! Each path is walked through nested collections until it reaches a series,
//! table or cube. The remaining suffix decides which columns the path stands
//! for; every generated `(name, series)` pair is then outer-joined into the
//! result in selection order.

use std::collections::HashMap;
use std::sync::Arc;

use tabview_model::{Cube, Entry, ModelError, Series, Table, Value, Workspace, format_path};
use tracing::{debug, warn};

use crate::error::{Result, SelectionError};
use crate::path::{NodePath, PathElement};

/// Separator placed between nested collection names in generated columns.
pub const DEFAULT_SEPARATOR: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    pub separator: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

/// A path that could not be classified. The other paths still resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedSelection {
    pub path: NodePath,
    pub error: SelectionError,
}

/// Two different series produced the same column name; `second` won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousColumnName {
    pub name: String,
    pub first: NodePath,
    pub second: NodePath,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub table: Table,
    pub rejected: Vec<RejectedSelection>,
    pub warnings: Vec<AmbiguousColumnName>,
}

impl Resolution {
    /// True when every path resolved and no column was overwritten.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.warnings.is_empty()
    }
}

pub fn resolve(workspace: &Workspace, paths: &[NodePath]) -> Result<Resolution> {
    resolve_with(workspace, paths, &ResolveOptions::default())
}

/// Resolves `paths` against `workspace`.
///
/// A path that does not exist in the workspace aborts the whole resolution.
/// A path whose shape has no meaning is recorded in
/// [`Resolution::rejected`] and skipped.
pub fn resolve_with(
    workspace: &Workspace,
    paths: &[NodePath],
    options: &ResolveOptions,
) -> Result<Resolution> {
    let mut merger = Merger::default();
    let mut rejected = Vec::new();
    for path in paths {
        match expand(workspace, path, options) {
            Ok(pairs) => {
                for (name, series) in pairs {
                    merger.insert(path, name, series);
                }
            }
            Err(error @ SelectionError::UnsupportedSelection { .. }) => {
                debug!(%path, %error, "selection rejected");
                rejected.push(RejectedSelection {
                    path: path.clone(),
                    error,
                });
            }
            Err(error) => return Err(error),
        }
    }
    debug!(
        paths = paths.len(),
        columns = merger.table.width(),
        rows = merger.table.height(),
        rejected = rejected.len(),
        "selection resolved"
    );
    Ok(Resolution {
        table: merger.table,
        rejected,
        warnings: merger.warnings,
    })
}

#[derive(Default)]
struct Merger {
    table: Table,
    origins: HashMap<String, (NodePath, Arc<Series>)>,
    warnings: Vec<AmbiguousColumnName>,
}

impl Merger {
    fn insert(&mut self, path: &NodePath, name: String, series: &Arc<Series>) {
        if let Some((first, source)) = self.origins.get(&name) {
            if Arc::ptr_eq(source, series) {
                return;
            }
            warn!(column = %name, first = %first, second = %path, "ambiguous column name");
            self.warnings.push(AmbiguousColumnName {
                name: name.clone(),
                first: first.clone(),
                second: path.clone(),
            });
        }
        self.table.insert_column(name.clone(), series);
        self.origins.insert(name, (path.clone(), Arc::clone(series)));
    }
}

type Pairs<'a> = Vec<(String, &'a Arc<Series>)>;

fn expand<'a>(
    workspace: &'a Workspace,
    path: &NodePath,
    options: &ResolveOptions,
) -> Result<Pairs<'a>> {
    let elements = path.elements();
    let mut current = Entry::Collection(workspace);
    let mut depth = 0;
    while let Entry::Collection(collection) = current {
        let Some(element) = elements.get(depth) else {
            let reason = if depth == 0 {
                "empty path"
            } else {
                "path ends on a collection"
            };
            return Err(unsupported(path, reason));
        };
        let Some(name) = element.as_concrete() else {
            return Err(unsupported(path, "wildcard over a collection"));
        };
        current = collection
            .entry(name)
            .map(Value::as_entry)
            .ok_or_else(|| ModelError::PathNotFound {
                path: format_path(&concrete(&elements[..=depth])),
                key: name.to_string(),
            })?;
        depth += 1;
    }

    let object = concrete(&elements[..depth]).join(&options.separator);
    let suffix = &elements[depth..];
    match current {
        Entry::Series(series) => match suffix {
            [] => Ok(vec![(object, series)]),
            _ => Err(shape_error(workspace, path, "suffix below a series")),
        },
        Entry::Table(table) => expand_table(workspace, path, &object, table, suffix),
        Entry::Cube(cube) => expand_cube(workspace, path, &object, cube, suffix),
        Entry::Collection(_) => Err(unsupported(path, "path ends on a collection")),
    }
}

fn expand_table<'a>(
    workspace: &Workspace,
    path: &NodePath,
    object: &str,
    table: &'a Table,
    suffix: &[PathElement],
) -> Result<Pairs<'a>> {
    match suffix {
        [] | [PathElement::AllChildren] => Ok(table_pairs(object, table)),
        [PathElement::Concrete(column)] => match table.column(column) {
            Some(series) => Ok(vec![(format!("{object}[{column}]"), series)]),
            None => Err(shape_error(workspace, path, "unknown column")),
        },
        [PathElement::AllChildren, ..] => Err(shape_error(
            workspace,
            path,
            "wildcard before a concrete element",
        )),
        _ => Err(shape_error(workspace, path, "path deeper than a table")),
    }
}

fn expand_cube<'a>(
    workspace: &Workspace,
    path: &NodePath,
    object: &str,
    cube: &'a Cube,
    suffix: &[PathElement],
) -> Result<Pairs<'a>> {
    use PathElement::{AllChildren, Concrete};

    match suffix {
        [] | [AllChildren] | [AllChildren, AllChildren] => Ok(cube
            .layers()
            .iter()
            .flat_map(|layer| cell_pairs(object, &layer.major, &layer.table))
            .collect()),
        [Concrete(major)] | [Concrete(major), AllChildren] => match cube.layer(major) {
            Some(table) => Ok(cell_pairs(object, major, table)),
            None => Err(shape_error(workspace, path, "unknown major label")),
        },
        [Concrete(major), Concrete(minor)] => match cube.cell(major, minor) {
            Some(series) => Ok(vec![(format!("{object}[:,{major},{minor}]"), series)]),
            None => Err(shape_error(workspace, path, "unknown cube cell")),
        },
        [AllChildren, Concrete(_)] => Err(shape_error(
            workspace,
            path,
            "wildcard before a concrete element",
        )),
        _ => Err(shape_error(workspace, path, "path deeper than a cube")),
    }
}

fn table_pairs<'a>(object: &str, table: &'a Table) -> Pairs<'a> {
    table
        .columns()
        .iter()
        .map(|column| (format!("{object}[{}]", column.name), &column.series))
        .collect()
}

fn cell_pairs<'a>(object: &str, major: &str, table: &'a Table) -> Pairs<'a> {
    table
        .columns()
        .iter()
        .map(|column| {
            (
                format!("{object}[:,{major},{}]", column.name),
                &column.series,
            )
        })
        .collect()
}

/// The error for a suffix that matched no selection rule.
///
/// When the concrete part of the path names something that does not exist,
/// the lookup error wins, so missing data always aborts instead of being
/// skipped. A path that only reaches too deep, below a series, is rejected on
/// its own like any other unsupported shape.
fn shape_error(workspace: &Workspace, path: &NodePath, reason: &'static str) -> SelectionError {
    let keys: Vec<&str> = path
        .elements()
        .iter()
        .map_while(PathElement::as_concrete)
        .collect();
    match workspace.get(&keys) {
        Err(error @ ModelError::PathNotFound { .. }) => error.into(),
        Err(_) | Ok(_) => unsupported(path, reason),
    }
}

fn unsupported(path: &NodePath, reason: &'static str) -> SelectionError {
    SelectionError::UnsupportedSelection {
        path: path.clone(),
        reason,
    }
}

fn concrete(elements: &[PathElement]) -> Vec<&str> {
    elements.iter().filter_map(PathElement::as_concrete).collect()
}

#[cfg(test)]
mod tests {
    use tabview_model::{Key, Value};

    use super::*;

    fn series(pairs: &[(i64, f64)]) -> Series {
        Series::from_pairs(pairs.iter().copied()).unwrap()
    }

    fn sample() -> Workspace {
        let mut ws = Workspace::new();
        ws.put("ts", Value::from(series(&[(1, 1.0), (2, 2.0)])));
        ws.put(
            "df",
            Value::Table(
                Table::new(
                    vec![Key::Int(1), Key::Int(2)],
                    vec![
                        ("a".to_string(), vec![Some(1.0), Some(2.0)]),
                        ("b".to_string(), vec![Some(3.0), None]),
                    ],
                )
                .unwrap(),
            ),
        );
        ws.put(
            "pl",
            Value::Cube(
                Cube::from_dense(
                    vec![Key::Int(1)],
                    vec!["m1".to_string(), "m2".to_string()],
                    vec!["x".to_string(), "y".to_string()],
                    vec![
                        vec![Some(1.0)],
                        vec![Some(2.0)],
                        vec![Some(3.0)],
                        vec![Some(4.0)],
                    ],
                )
                .unwrap(),
            ),
        );
        ws
    }

    fn names(resolution: &Resolution) -> Vec<&str> {
        resolution.table.column_names().collect()
    }

    fn paths(raw: &[&str]) -> Vec<NodePath> {
        raw.iter().map(|p| NodePath::parse(p)).collect()
    }

    #[test]
    fn series_path_keeps_name() {
        let ws = sample();
        let resolution = resolve(&ws, &paths(&["ts"])).unwrap();
        assert_eq!(names(&resolution), vec!["ts"]);
        assert!(resolution.is_clean());
    }

    #[test]
    fn table_paths_expand_columns() {
        let ws = sample();
        for raw in ["df", "df/*"] {
            let resolution = resolve(&ws, &paths(&[raw])).unwrap();
            assert_eq!(names(&resolution), vec!["df[a]", "df[b]"], "{raw}");
        }
        let resolution = resolve(&ws, &paths(&["df/b"])).unwrap();
        assert_eq!(names(&resolution), vec!["df[b]"]);
    }

    #[test]
    fn cube_paths_expand_cells() {
        let ws = sample();
        let all = vec!["pl[:,m1,x]", "pl[:,m1,y]", "pl[:,m2,x]", "pl[:,m2,y]"];
        for raw in ["pl", "pl/*", "pl/*/*"] {
            let resolution = resolve(&ws, &paths(&[raw])).unwrap();
            assert_eq!(names(&resolution), all, "{raw}");
        }
        for raw in ["pl/m2", "pl/m2/*"] {
            let resolution = resolve(&ws, &paths(&[raw])).unwrap();
            assert_eq!(names(&resolution), vec!["pl[:,m2,x]", "pl[:,m2,y]"], "{raw}");
        }
        let resolution = resolve(&ws, &paths(&["pl/m1/y"])).unwrap();
        assert_eq!(names(&resolution), vec!["pl[:,m1,y]"]);
        assert_eq!(resolution.table.value(0, 0), Some(2.0));
    }

    #[test]
    fn unsupported_shapes_are_rejected_but_others_resolve() {
        let ws = sample();
        let resolution = resolve(
            &ws,
            &paths(&["", "df/*/a", "pl/*/x", "pl/m1/*/*", "ts/*", "ts", "*"]),
        )
        .unwrap();
        assert_eq!(names(&resolution), vec!["ts"]);
        let rejected: Vec<String> = resolution
            .rejected
            .iter()
            .map(|r| r.path.to_string())
            .collect();
        assert_eq!(rejected, vec!["<empty>", "df/*/a", "pl/*/x", "pl/m1/*/*", "ts/*", "*"]);
        assert!(!resolution.is_clean());
    }

    #[test]
    fn missing_data_aborts() {
        let ws = sample();
        let err = resolve(&ws, &paths(&["ts", "df/zz"])).unwrap_err();
        assert_eq!(
            err,
            SelectionError::Workspace(ModelError::PathNotFound {
                path: "df/zz".to_string(),
                key: "zz".to_string(),
            })
        );
        let err = resolve(&ws, &paths(&["pl/m3/*"])).unwrap_err();
        assert!(matches!(
            err,
            SelectionError::Workspace(ModelError::PathNotFound { .. })
        ));
    }

    #[test]
    fn paths_below_a_series_are_rejected_but_others_resolve() {
        let ws = sample();
        let resolution = resolve(
            &ws,
            &paths(&["ts", "ts/deeper", "df/a/deeper", "pl/m1/x/y", "pl/m1/x/y/z"]),
        )
        .unwrap();
        assert_eq!(names(&resolution), vec!["ts"]);
        let rejected: Vec<String> = resolution
            .rejected
            .iter()
            .map(|r| r.path.to_string())
            .collect();
        assert_eq!(rejected, vec!["ts/deeper", "df/a/deeper", "pl/m1/x/y", "pl/m1/x/y/z"]);
        assert!(
            resolution
                .rejected
                .iter()
                .all(|r| matches!(r.error, SelectionError::UnsupportedSelection { .. }))
        );
    }

    #[test]
    fn missing_name_below_a_valid_prefix_still_aborts() {
        let ws = sample();
        let err = resolve(&ws, &paths(&["ts", "df/zz/deeper"])).unwrap_err();
        assert_eq!(
            err,
            SelectionError::Workspace(ModelError::PathNotFound {
                path: "df/zz".to_string(),
                key: "zz".to_string(),
            })
        );
    }

    #[test]
    fn same_column_twice_is_deduplicated() {
        let ws = sample();
        let resolution = resolve(&ws, &paths(&["df/*", "df/a"])).unwrap();
        assert_eq!(names(&resolution), vec!["df[a]", "df[b]"]);
        assert!(resolution.is_clean());
    }

    #[test]
    fn nested_objects_join_prefix() {
        let mut ws = Workspace::new();
        ws.put("file.json", Value::Collection(sample()));
        let resolution = resolve(&ws, &paths(&["file.json/df/a"])).unwrap();
        assert_eq!(names(&resolution), vec!["file.json/df[a]"]);

        let options = ResolveOptions {
            separator: ".".to_string(),
        };
        let resolution = resolve_with(&ws, &paths(&["file.json/ts"]), &options).unwrap();
        assert_eq!(names(&resolution), vec!["file.json.ts"]);

        let resolution = resolve(&ws, &paths(&["file.json"])).unwrap();
        assert_eq!(resolution.rejected.len(), 1);
    }

    #[test]
    fn colliding_names_warn_and_last_wins() {
        let mut inner = Workspace::new();
        inner.put("b", Value::from(series(&[(1, 10.0)])));
        let mut ws = Workspace::new();
        ws.put("a", Value::Collection(inner));
        ws.put("a/b", Value::from(series(&[(1, 20.0)])));

        let resolution = resolve(&ws, &paths(&["a/b"])).unwrap();
        assert_eq!(resolution.table.value(0, 0), Some(10.0));

        let selection = vec![
            NodePath::parse("a/b"),
            NodePath::new(vec![PathElement::from("a/b")]),
        ];
        let resolution = resolve(&ws, &selection).unwrap();
        assert_eq!(names(&resolution), vec!["a/b"]);
        assert_eq!(resolution.table.value(0, 0), Some(20.0));
        assert_eq!(
            resolution.warnings,
            vec![AmbiguousColumnName {
                name: "a/b".to_string(),
                first: selection[0].clone(),
                second: selection[1].clone(),
            }]
        );
    }
}
