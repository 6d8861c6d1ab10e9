//! Tests for loader module

use super::*;
use crate::coerce::CoercionPolicy;
use crate::error::Error;
use crate::schema::{Kind, Record};
use std::io::Write;

const ACCOUNTS: &str = r##"
name: accounts
description: Prepaid card accounts
options:
  delimiter: ";"
  comment: "#"
  true_values: [yes, y]
fields:
  - name: CardId
    type: string
  - name: CreateDate
    type: time.Time
  - name: SaveAmt
    type: float64
    policy: strict
  - name: Notes
    type: string
    tag: "-"
"##;

// ============================================================================
// Parsing Tests
// ============================================================================

#[test]
fn test_load_shape_from_str() {
    let shape = load_shape_from_str(ACCOUNTS).unwrap();

    assert_eq!(shape.display_name(), "accounts");
    assert_eq!(shape.description.as_deref(), Some("Prepaid card accounts"));
    assert_eq!(shape.options.delimiter, ';');
    assert_eq!(shape.options.comment, Some('#'));
    assert_eq!(
        shape.options.true_values,
        Some(vec!["yes".to_string(), "y".to_string()])
    );

    assert_eq!(shape.fields.len(), 4);
    assert_eq!(shape.fields[1].kind, Kind::Date);
    assert_eq!(shape.fields[2].policy, Some(CoercionPolicy::Strict));
    assert!(shape.fields[3].is_skipped());
}

#[test]
fn test_load_shape_minimal() {
    let shape = load_shape_from_str("fields:\n  - name: Name\n").unwrap();

    assert_eq!(shape.display_name(), "shape");
    assert_eq!(shape.fields[0].kind, Kind::String);
    assert_eq!(shape.options.delimiter, ',');
}

#[test]
fn test_shape_record() {
    let shape = load_shape_from_str(ACCOUNTS).unwrap();
    let record = shape.record();
    assert_eq!(record.describe(), shape.fields);
}

// ============================================================================
// Validation Tests
// ============================================================================

#[test]
fn test_load_shape_no_fields() {
    let err = load_shape_from_str("name: empty\nfields: []\n").unwrap_err();
    assert!(err.to_string().contains("at least one field"));
}

#[test]
fn test_load_shape_duplicate_fields() {
    let yaml = "fields:\n  - name: A\n  - name: A\n";
    let err = load_shape_from_str(yaml).unwrap_err();
    assert!(err.to_string().contains("Duplicate field name 'A'"));
}

#[test]
fn test_load_shape_blank_field_name() {
    let yaml = "fields:\n  - name: \"  \"\n";
    assert!(load_shape_from_str(yaml).is_err());
}

#[test]
fn test_load_shape_invalid_delimiter() {
    let yaml = "options:\n  delimiter: \"\\\"\"\nfields:\n  - name: A\n";
    let err = load_shape_from_str(yaml).unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. }));
}

#[test]
fn test_load_shape_invalid_yaml() {
    let err = load_shape_from_str("fields: [").unwrap_err();
    assert!(matches!(err, Error::YamlParse(_)));
    assert!(err.to_string().contains("Failed to parse shape YAML"));
}

// ============================================================================
// File Tests
// ============================================================================

#[test]
fn test_load_shape_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(ACCOUNTS.as_bytes()).unwrap();

    let shape = load_shape(file.path()).unwrap();
    assert_eq!(shape.fields.len(), 4);
}

#[test]
fn test_load_shape_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_shape(dir.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
}
