//! End-to-end selection behaviour over a session.

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use tabview_core::{NodePath, SelectionError, Session, TreeOptions, resolve};
use tabview_model::{Cube, Key, ModelError, Series, Table, Value, Workspace};

fn day(d: u32) -> Key {
    let ts: NaiveDateTime = NaiveDate::from_ymd_opt(2015, 9, d)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("valid date");
    Key::Timestamp(ts)
}

fn prices() -> Table {
    Table::new(
        vec![day(1), day(2), day(3)],
        vec![
            ("AAPL".to_string(), vec![Some(110.0), Some(112.5), Some(111.0)]),
            ("MSFT".to_string(), vec![Some(43.0), None, Some(44.5)]),
        ],
    )
    .expect("prices")
}

fn panel() -> Cube {
    Cube::from_dense(
        vec![day(1)],
        vec!["m1".to_string()],
        vec!["x".to_string()],
        vec![vec![Some(1.0)]],
    )
    .expect("panel")
}

fn path(raw: &str) -> NodePath {
    NodePath::parse(raw)
}

#[test]
fn whole_table_resolves_to_prefixed_columns() {
    let mut ws = Workspace::new();
    ws.put("prices", Value::Table(prices()));

    let resolution = resolve(&ws, &[path("prices/*")]).expect("resolve");
    let table = resolution.table;
    assert_eq!(
        table.column_names().collect::<Vec<_>>(),
        vec!["prices[AAPL]", "prices[MSFT]"]
    );
    assert_eq!(table.index(), &[day(1), day(2), day(3)]);
    assert_eq!(table.value(1, 0), Some(112.5));
    assert_eq!(table.value(1, 1), None);
}

#[test]
fn disjoint_series_align_on_union() {
    let mut ws = Workspace::new();
    ws.put("a", Value::from(Series::from_pairs([(1, 1.0), (2, 2.0)]).expect("a")));
    ws.put("b", Value::from(Series::from_pairs([(2, 20.0), (3, 30.0)]).expect("b")));

    let resolution = resolve(&ws, &[path("a"), path("b")]).expect("resolve");
    let table = resolution.table;
    assert_eq!(table.index(), &[Key::Int(1), Key::Int(2), Key::Int(3)]);
    let rows: Vec<Vec<Option<f64>>> = table.rows().map(|(_, cells)| cells).collect();
    assert_eq!(
        rows,
        vec![
            vec![Some(1.0), None],
            vec![Some(2.0), Some(20.0)],
            vec![None, Some(30.0)],
        ]
    );
}

#[test]
fn single_series_round_trips() {
    let series = Series::from_pairs([(day(1), 1.5), (day(4), -2.0)]).expect("series");
    let mut ws = Workspace::new();
    ws.put("ts", Value::from(series.clone()));

    let table = resolve(&ws, &[path("ts")]).expect("resolve").table;
    assert_eq!(table.width(), 1);
    assert_eq!(table.index(), series.keys());
    assert_eq!(table.column("ts").expect("column").as_ref(), &series);
}

#[test]
fn missing_root_object_is_path_not_found() {
    let err = resolve(&Workspace::new(), &[path("missing")]).unwrap_err();
    assert_eq!(
        err,
        SelectionError::Workspace(ModelError::PathNotFound {
            path: "missing".to_string(),
            key: "missing".to_string(),
        })
    );
}

#[test]
fn same_column_through_two_paths_appears_once() {
    let mut session = Session::new();
    session.add_object("prices", Value::Table(prices()));

    let resolution = session
        .resolve(&[path("prices/*"), path("prices/MSFT"), path("prices")])
        .expect("resolve");
    assert_eq!(resolution.table.width(), 2);
    assert!(resolution.is_clean());
}

#[test]
fn session_stays_consistent_through_mutations() {
    let mut nested = Workspace::new();
    nested.put("prices", Value::Table(prices()));
    nested.put("panel", Value::Cube(panel()));

    let mut session = Session::new();
    session.add_object("file.json", Value::Collection(nested));
    assert!(session.is_consistent());

    let resolution = session
        .resolve(&[path("file.json/panel/m1/x"), path("file.json/prices/AAPL")])
        .expect("resolve");
    assert_eq!(
        resolution.table.column_names().collect::<Vec<_>>(),
        vec!["file.json/panel[:,m1,x]", "file.json/prices[AAPL]"]
    );

    for raw in [
        "file.json/panel/m1/x",
        "file.json/prices/AAPL",
        "file.json/prices/MSFT",
    ] {
        session.remove_node(&path(raw)).expect("remove");
        assert!(session.is_consistent());
        assert!(session.tree().find(&path(raw)).is_none());
    }
    assert!(session.workspace().is_empty());
    assert!(session.tree().is_empty());
}

#[test]
fn outline_snapshot() {
    let mut session = Session::new();
    session.add_object("prices", Value::Table(prices()));
    session.add_object("panel", Value::Cube(panel()));
    session.add_object(
        "ts",
        Value::from(Series::from_pairs([(1, 1.0)]).expect("series")),
    );

    let outline = session.tree().render(&TreeOptions::default());
    insta::assert_snapshot!(outline, @r"
    - panel [cube]
      - m1 [major]
          x [cell]
    - prices [table]
        AAPL [column]
        MSFT [column]
      ts [series]
    ");
}

proptest! {
    #[test]
    fn removed_paths_stop_resolving(columns in prop::collection::btree_set("[a-z]{1,4}", 1..6)) {
        let names: Vec<String> = columns.into_iter().collect();
        let table = Table::new(
            vec![Key::Int(0)],
            names.iter().map(|name| (name.clone(), vec![Some(1.0)])).collect(),
        )
        .expect("table");
        let mut session = Session::new();
        session.add_object("t", Value::Table(table));

        for name in &names {
            let column = NodePath::parse(&format!("t/{name}"));
            session.remove_node(&column).expect("remove");
            prop_assert!(session.is_consistent());
            let err = session.resolve(&[column]).unwrap_err();
            let is_not_found = matches!(
                err,
                SelectionError::Workspace(ModelError::PathNotFound { .. })
            );
            prop_assert!(is_not_found);
        }
        prop_assert!(session.workspace().is_empty());
    }
}
