use std::path::Path;

use tabview_core::{NodePath, Session};
use tabview_ingest::{
    IngestError, SampleOptions, load_file, load_into, sample_workspace, save_json, write_csv,
};
use tabview_model::{Entry, Value};
use tempfile::TempDir;

fn write_samples(dir: &Path) -> tabview_model::Workspace {
    let workspace = sample_workspace(1, &SampleOptions::default()).expect("samples");
    for (name, value) in workspace.iter() {
        save_json(&dir.join(format!("{name}.json")), value).expect("save json");
        if let Value::Table(table) = value {
            write_csv(&dir.join(format!("{name}.csv")), table).expect("write csv");
        }
    }
    workspace
}

#[test]
fn json_samples_load_back_unchanged() {
    let dir = TempDir::new().expect("tempdir");
    let workspace = write_samples(dir.path());

    for (name, value) in workspace.iter() {
        let loaded = load_file(&dir.path().join(format!("{name}.json"))).expect("load");
        assert_eq!(&loaded, value, "{name}");
    }
}

#[test]
fn csv_keeps_timestamp_axis() {
    let dir = TempDir::new().expect("tempdir");
    let workspace = write_samples(dir.path());

    let Value::Table(table) = load_file(&dir.path().join("df.csv")).expect("load") else {
        panic!("csv loads as a table");
    };
    let Ok(Entry::Table(original)) = workspace.get(&["df"]) else {
        panic!("sample table");
    };
    assert_eq!(table.index(), original.index());
    assert_eq!(
        table.column_names().collect::<Vec<_>>(),
        original.column_names().collect::<Vec<_>>()
    );
}

#[test]
fn load_into_uses_file_name() {
    let dir = TempDir::new().expect("tempdir");
    write_samples(dir.path());

    let mut session = Session::new();
    let name = load_into(&mut session, &dir.path().join("pl.json")).expect("load");
    assert_eq!(name, "pl.json");
    load_into(&mut session, &dir.path().join("df.csv")).expect("load");

    assert!(session.is_consistent());
    let resolution = session
        .resolve(&[NodePath::parse("pl.json/major0/*"), NodePath::parse("df.csv/0")])
        .expect("resolve");
    assert_eq!(
        resolution.table.column_names().collect::<Vec<_>>(),
        vec!["pl.json[:,major0,minor0]", "pl.json[:,major0,minor1]", "df.csv[0]"]
    );
    assert_eq!(resolution.table.height(), 30);
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("data.pickle");
    std::fs::write(&path, b"not a pickle").expect("write");

    let mut session = Session::new();
    let err = load_into(&mut session, &path).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFileType { .. }));
    assert!(session.workspace().is_empty());
}
