//! Tests for the line codec and loader
//!
//! These tests verify:
//! - Header encoding/parsing (`name[type]` tokens)
//! - Record quoting, escaping, and embedded-delimiter handling
//! - Column-count mismatch detection
//! - Loader "not created" reporting for empty or malformed files

use std::io::Write;
use std::path::PathBuf;

use flatdb::storage::{codec, loader};
use flatdb::{Column, ColumnType, Config, FlatError, Record, Schema};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_db() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("db.txt");
    (temp_dir, path)
}

fn write_file(path: &PathBuf, contents: &str) {
    let mut file = std::fs::File::create(path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
}

fn sample_schema() -> Schema {
    Schema::new(vec![
        Column::new("id", ColumnType::Integer),
        Column::new("name", ColumnType::String),
    ])
    .unwrap()
}

fn record(fields: &[(&str, &str)]) -> Record {
    let mut record = Record::new();
    for (name, value) in fields {
        record.push(*name, *value);
    }
    record
}

// =============================================================================
// Header Tests
// =============================================================================

#[test]
fn test_encode_header() {
    let header = codec::encode_header(&sample_schema(), ';');

    assert_eq!(header, "id[int];name[str]");
}

#[test]
fn test_parse_header_round_trip() {
    let schema = codec::parse_header("id[int];name[str];born[date]", ';').unwrap();

    assert_eq!(schema.len(), 3);
    assert_eq!(schema.column("id").unwrap().ty, ColumnType::Integer);
    assert_eq!(schema.column("name").unwrap().ty, ColumnType::String);
    assert_eq!(schema.column("born").unwrap().ty, ColumnType::Date);
}

#[test]
fn test_parse_header_custom_delimiter() {
    let schema = codec::parse_header("id[int]|name[str]", '|').unwrap();

    assert_eq!(schema.len(), 2);
}

#[test]
fn test_parse_header_rejects_malformed_tokens() {
    assert!(codec::parse_header("", ';').is_none());
    assert!(codec::parse_header("plain text", ';').is_none());
    assert!(codec::parse_header("id[int];name", ';').is_none());
    assert!(codec::parse_header("id[float]", ';').is_none());
    assert!(codec::parse_header("[int]", ';').is_none());
    assert!(codec::parse_header("id[int];id[int]", ';').is_none());
}

// =============================================================================
// Record Line Tests
// =============================================================================

#[test]
fn test_encode_row_quotes_and_escapes() {
    let row = codec::encode_row(&record(&[("id", "1"), ("name", "say \"hi\"")]), ';');

    assert_eq!(row, "\"1\";\"say \\\"hi\\\"\"");
}

#[test]
fn test_decode_row_round_trip() {
    let original = record(&[("id", "1"), ("name", "say \"hi\"")]);
    let line = codec::encode_row(&original, ';');

    let fields = codec::decode_row(&line, ';', 2, 1).unwrap();

    assert_eq!(fields, vec!["1".to_string(), "say \"hi\"".to_string()]);
}

#[test]
fn test_decode_row_with_embedded_delimiter() {
    let line = codec::encode_row(&record(&[("id", "1"), ("name", "a;b;c")]), ';');

    let fields = codec::decode_row(&line, ';', 2, 1).unwrap();

    assert_eq!(fields[1], "a;b;c");
}

#[test]
fn test_decode_row_empty_fields() {
    let fields = codec::decode_row("\"\";\"\"", ';', 2, 1).unwrap();

    assert_eq!(fields, vec![String::new(), String::new()]);
}

#[test]
fn test_decode_row_column_count_mismatch() {
    let result = codec::decode_row("\"1\";\"a\";\"extra\"", ';', 2, 4);

    match result {
        Err(FlatError::ColumnCountMismatch {
            row,
            found,
            expected,
        }) => {
            assert_eq!(row, 4);
            assert_eq!(found, 3);
            assert_eq!(expected, 2);
        }
        other => panic!("expected ColumnCountMismatch, got {:?}", other),
    }
}

// =============================================================================
// Loader Tests
// =============================================================================

#[test]
fn test_load_missing_file_reports_not_created() {
    let (_temp, path) = setup_temp_db();

    let loaded = loader::load(&Config::new(&path)).unwrap();

    assert!(loaded.is_none());
}

#[test]
fn test_load_empty_file_reports_not_created() {
    let (_temp, path) = setup_temp_db();
    write_file(&path, "");

    let loaded = loader::load(&Config::new(&path)).unwrap();

    assert!(loaded.is_none());
}

#[test]
fn test_load_unparsable_header_reports_not_created() {
    let (_temp, path) = setup_temp_db();
    write_file(&path, "this is not a header\n");

    let loaded = loader::load(&Config::new(&path)).unwrap();

    assert!(loaded.is_none());
}

#[test]
fn test_load_header_only() {
    let (_temp, path) = setup_temp_db();
    write_file(&path, "id[int];name[str]\n");

    let loaded = loader::load(&Config::new(&path)).unwrap().unwrap();

    assert_eq!(loaded.schema.len(), 2);
    assert!(loaded.records.is_empty());
}

#[test]
fn test_load_records_positionally() {
    let (_temp, path) = setup_temp_db();
    write_file(&path, "id[int];name[str]\n\"1\";\"Alice\"\n\"2\";\"Bob\"\n");

    let loaded = loader::load(&Config::new(&path)).unwrap().unwrap();

    assert_eq!(loaded.records.len(), 2);
    assert_eq!(loaded.records[0].get("id"), Some("1"));
    assert_eq!(loaded.records[0].get("name"), Some("Alice"));
    assert_eq!(loaded.records[1].get("name"), Some("Bob"));
}

#[test]
fn test_load_unescapes_quotes() {
    let (_temp, path) = setup_temp_db();
    write_file(&path, "id[int];name[str]\n\"1\";\"say \\\"hi\\\"\"\n");

    let loaded = loader::load(&Config::new(&path)).unwrap().unwrap();

    assert_eq!(loaded.records[0].get("name"), Some("say \"hi\""));
}

#[test]
fn test_load_short_row_is_named_failure() {
    let (_temp, path) = setup_temp_db();
    write_file(&path, "id[int];name[str]\n\"1\"\n");

    let result = loader::load(&Config::new(&path));

    assert!(matches!(
        result,
        Err(FlatError::ColumnCountMismatch { .. })
    ));
}
