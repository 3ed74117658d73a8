//! Integration tests for selection rendering.

use tabview_cli::summary::selection_table;
use tabview_core::{NodePath, Session};
use tabview_model::{Key, Table, Value};

fn prices() -> Table {
    Table::new(
        vec![Key::from(2), Key::from(1)],
        vec![
            ("a[x]".to_string(), vec![None, Some(0.5)]),
            ("b".to_string(), vec![Some(3.25), Some(2.0)]),
        ],
    )
    .unwrap()
}

#[test]
fn test_selection_table_layout() {
    let rendered = selection_table(&prices(), false).unwrap().to_string();

    insta::assert_snapshot!(rendered, @r"
    ╭───────┬──────┬──────╮
    │ index ┆ a[x] ┆ b    │
    ╞═══════╪══════╪══════╡
    │ 1     ┆ 0.5  ┆ 2    │
    │ 2     ┆ -    ┆ 3.25 │
    ╰───────┴──────┴──────╯
    ");
}

#[test]
fn test_unstyled_table_has_no_escape_codes() {
    let rendered = selection_table(&prices(), false).unwrap().to_string();
    assert!(!rendered.contains('\u{1b}'));
}

#[test]
fn test_resolved_selection_renders_every_column() {
    let mut session = Session::new();
    session.add_object("df", Value::Table(prices()));
    let resolution = session.resolve(&[NodePath::parse("df/*")]).unwrap();

    let rendered = selection_table(&resolution.table, false)
        .unwrap()
        .to_string();
    assert!(rendered.contains("df[a[x]]"));
    assert!(rendered.contains("df[b]"));
    assert_eq!(rendered.lines().count(), 6);
}
