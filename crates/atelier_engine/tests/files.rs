use std::fs;

use atelier_engine::{ensure_data_dir, write_atomic};
use tempfile::TempDir;

#[test]
fn creates_missing_data_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("data");
    assert!(!new_dir.exists());
    ensure_data_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing_content() {
    let temp = TempDir::new().unwrap();

    let first = write_atomic(temp.path(), "slice.json", "[]").unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "[]");

    let second = write_atomic(temp.path(), "slice.json", r#"["villa"]"#).unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), r#"["villa"]"#);
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let result = write_atomic(&file_path, "slice.json", "data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("slice.json").exists());
}
