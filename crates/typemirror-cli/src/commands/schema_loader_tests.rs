use std::fs;
use std::path::PathBuf;

use super::schema_loader::{LoadError, load_schema_sources};

#[test]
fn inline_text_wins() {
    let map = load_schema_sources(&[PathBuf::from("ignored.tm")], Some("struct A {}")).unwrap();

    assert_eq!(map.len(), 1);
}

#[test]
fn missing_input() {
    let err = load_schema_sources(&[], None).unwrap_err();

    assert!(matches!(err, LoadError::Missing));
}

#[test]
fn directory_loads_schema_files_sorted() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.tm"), "struct B {}").unwrap();
    fs::write(dir.path().join("a.tm"), "struct A {}").unwrap();
    fs::write(dir.path().join("notes.txt"), "not a schema").unwrap();

    let map = load_schema_sources(&[dir.path().to_path_buf()], None).unwrap();

    let names: Vec<String> = map
        .iter()
        .map(|s| s.kind.display_name().to_string())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names[0].ends_with("a.tm"));
    assert!(names[1].ends_with("b.tm"));
}

#[test]
fn empty_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = load_schema_sources(&[dir.path().to_path_buf()], None).unwrap_err();

    assert!(matches!(err, LoadError::EmptyDirectory(_)));
    assert!(err.to_string().starts_with("no .tm files found in"));
}

#[test]
fn unreadable_file_names_the_path() {
    let err = load_schema_sources(&[PathBuf::from("does/not/exist.tm")], None).unwrap_err();

    assert!(matches!(err, LoadError::Read { .. }));
    assert!(err.to_string().contains("does/not/exist.tm"));
}
