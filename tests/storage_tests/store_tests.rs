//! Tests for BookStore
//!
//! These tests verify:
//! - Missing and corrupt files load as an empty catalog
//! - Save/load round trip preserves ids, fields and order
//! - File layout (pretty 4-space indent, compact, unescaped UTF-8)
//! - Both save modes, including parent directory creation

use std::fs;
use std::path::PathBuf;

use bookshelf::book::Book;
use bookshelf::config::{Config, JsonLayout, SaveMode};
use bookshelf::store::BookStore;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_file() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("books.json");
    (temp_dir, path)
}

fn sample_books() -> Vec<Book> {
    vec![
        Book::new(1, "Dune", "Frank Herbert", 1965, "available"),
        Book::new(4, "Мастер и Маргарита", "Михаил Булгаков", 1967, "checked out"),
        Book::new(2, "Emma", "Jane Austen", 1815, "available"),
    ]
}

// =============================================================================
// Load Tests
// =============================================================================

#[test]
fn test_load_missing_file_is_empty() {
    let (_temp, path) = setup_temp_file();
    let store = BookStore::new(&path, SaveMode::AtomicRename, JsonLayout::Pretty);

    let books = store.load().unwrap();

    assert!(books.is_empty());
    assert!(!path.exists());
}

#[test]
fn test_load_invalid_json_is_empty() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, "{ this is not json").unwrap();
    let store = BookStore::new(&path, SaveMode::AtomicRename, JsonLayout::Pretty);

    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_load_empty_file_is_empty() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, "").unwrap();
    let store = BookStore::new(&path, SaveMode::AtomicRename, JsonLayout::Pretty);

    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_load_non_array_is_empty() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, r#"{"id": 1}"#).unwrap();
    let store = BookStore::new(&path, SaveMode::AtomicRename, JsonLayout::Pretty);

    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_load_bad_record_is_empty() {
    let (_temp, path) = setup_temp_file();
    fs::write(
        &path,
        r#"[
            {"id": 1, "title": "Dune", "author": "Frank Herbert", "year": 1965, "status": "available"},
            {"id": 2, "title": "Emma", "author": "Jane Austen"}
        ]"#,
    )
    .unwrap();
    let store = BookStore::new(&path, SaveMode::AtomicRename, JsonLayout::Pretty);

    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_load_duplicate_ids_is_empty() {
    let (_temp, path) = setup_temp_file();
    fs::write(
        &path,
        r#"[
            {"id": 1, "title": "Dune", "author": "Frank Herbert", "year": 1965, "status": "available"},
            {"id": 1, "title": "Emma", "author": "Jane Austen", "year": 1815, "status": "available"}
        ]"#,
    )
    .unwrap();
    let store = BookStore::new(&path, SaveMode::AtomicRename, JsonLayout::Pretty);

    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_load_invalid_utf8_is_empty() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, [0xff, 0xfe, 0x5b, 0x5d]).unwrap();
    let store = BookStore::new(&path, SaveMode::AtomicRename, JsonLayout::Pretty);

    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_load_directory_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let store = BookStore::new(temp_dir.path(), SaveMode::AtomicRename, JsonLayout::Pretty);

    assert!(store.load().is_err());
}

// =============================================================================
// Save/Load Round Trip Tests
// =============================================================================

#[test]
fn test_save_then_load_preserves_order_and_fields() {
    let (_temp, path) = setup_temp_file();
    let store = BookStore::new(&path, SaveMode::AtomicRename, JsonLayout::Pretty);
    let books = sample_books();

    store.save(&books).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded, books);
}

#[test]
fn test_save_compact_then_load() {
    let (_temp, path) = setup_temp_file();
    let store = BookStore::new(&path, SaveMode::Overwrite, JsonLayout::Compact);
    let books = sample_books();

    store.save(&books).unwrap();

    assert_eq!(store.load().unwrap(), books);
}

#[test]
fn test_save_empty_catalog() {
    let (_temp, path) = setup_temp_file();
    let store = BookStore::new(&path, SaveMode::AtomicRename, JsonLayout::Pretty);

    store.save(&[]).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap().trim(), "[]");
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_save_replaces_previous_content() {
    let (_temp, path) = setup_temp_file();
    let store = BookStore::new(&path, SaveMode::AtomicRename, JsonLayout::Pretty);

    store.save(&sample_books()).unwrap();
    store
        .save(&[Book::new(9, "Emma", "Jane Austen", 1815, "available")])
        .unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, 9);
}

// =============================================================================
// File Layout Tests
// =============================================================================

#[test]
fn test_pretty_layout_uses_four_spaces() {
    let (_temp, path) = setup_temp_file();
    let store = BookStore::new(&path, SaveMode::AtomicRename, JsonLayout::Pretty);

    store
        .save(&[Book::new(1, "Dune", "Frank Herbert", 1965, "available")])
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("[\n    {\n        \"id\": 1,\n"));
}

#[test]
fn test_keys_written_in_record_order() {
    let (_temp, path) = setup_temp_file();
    let store = BookStore::new(&path, SaveMode::AtomicRename, JsonLayout::Compact);

    store
        .save(&[Book::new(1, "Dune", "Frank Herbert", 1965, "available")])
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content.trim(),
        r#"[{"id":1,"title":"Dune","author":"Frank Herbert","year":1965,"status":"available"}]"#
    );
}

#[test]
fn test_non_ascii_written_unescaped() {
    let (_temp, path) = setup_temp_file();
    let store = BookStore::new(&path, SaveMode::AtomicRename, JsonLayout::Pretty);

    store.save(&sample_books()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("Мастер и Маргарита"));
    assert!(!content.contains("\\u"));
}

// =============================================================================
// Save Mode Tests
// =============================================================================

#[test]
fn test_atomic_save_leaves_no_temp_file() {
    let (temp, path) = setup_temp_file();
    let store = BookStore::new(&path, SaveMode::AtomicRename, JsonLayout::Pretty);

    store.save(&sample_books()).unwrap();

    let names: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("books.json")]);
}

#[test]
fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("deeper").join("books.json");

    for mode in [SaveMode::AtomicRename, SaveMode::Overwrite] {
        let store = BookStore::new(&path, mode, JsonLayout::Pretty);
        store.save(&sample_books()).unwrap();
        assert_eq!(store.load().unwrap(), sample_books());
    }
}

#[test]
fn test_from_config_uses_storage_settings() {
    let (_temp, path) = setup_temp_file();
    let config = Config::builder()
        .storage_path(&path)
        .json_layout(JsonLayout::Compact)
        .build()
        .unwrap();

    let store = BookStore::from_config(&config);
    store.save(&sample_books()).unwrap();

    assert_eq!(store.path(), path.as_path());
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
}
