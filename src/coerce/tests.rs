//! Tests for coerce module

use super::*;
use crate::schema::{Kind, Value};
use chrono::NaiveDate;
use test_case::test_case;

fn lenient(raw: &str, kind: Kind) -> Value {
    coerce(raw, &kind, &BoolRule::default())
}

// ============================================================================
// Dispatch Tests
// ============================================================================

#[test_case("Alice", Kind::String, Value::String("Alice".into()) ; "string verbatim")]
#[test_case(" padded ", Kind::String, Value::String(" padded ".into()) ; "string keeps spaces")]
#[test_case("{a:1}", Kind::Other("Blob".into()), Value::String("{a:1}".into()) ; "other falls back to string")]
#[test_case("30", Kind::Int64, Value::Int64(30) ; "int64")]
#[test_case("-7", Kind::Int32, Value::Int32(-7) ; "negative int32")]
#[test_case("+5", Kind::Int16, Value::Int16(5) ; "plus sign")]
#[test_case("1.5", Kind::Float64, Value::Float64(1.5) ; "float64")]
#[test_case("2.25", Kind::Float32, Value::Float32(2.25) ; "float32")]
#[test_case("1e3", Kind::Float64, Value::Float64(1000.0) ; "exponent")]
#[test_case("x", Kind::Bool, Value::Bool(true) ; "non empty is true")]
#[test_case("false", Kind::Bool, Value::Bool(true) ; "default rule ignores content")]
#[test_case("", Kind::Bool, Value::Bool(false) ; "empty is false")]
fn test_coerce_dispatch(raw: &str, kind: Kind, expected: Value) {
    assert_eq!(lenient(raw, kind), expected);
}

#[test_case("abc", Kind::Float64, Value::Float64(0.0) ; "float garbage")]
#[test_case("", Kind::Float32, Value::Float32(0.0) ; "float empty")]
#[test_case("notanumber", Kind::Int64, Value::Int64(0) ; "int garbage")]
#[test_case("3.7", Kind::Int32, Value::Int32(0) ; "int given float")]
#[test_case(" 30", Kind::Int8, Value::Int8(0) ; "int leading space")]
#[test_case("99999999999999999999", Kind::Int64, Value::Int64(0) ; "int64 overflow")]
#[test_case("2023-05-07", Kind::Date, Value::Date(None) ; "date wrong layout")]
#[test_case("yesterday", Kind::Date, Value::Date(None) ; "date garbage")]
fn test_coerce_degrades_to_zero(raw: &str, kind: Kind, expected: Value) {
    assert_eq!(lenient(raw, kind), expected);
}

#[test]
fn test_coerce_date() {
    assert_eq!(
        lenient("2023/5/7", Kind::Date),
        Value::Date(NaiveDate::from_ymd_opt(2023, 5, 7))
    );
    assert_eq!(
        lenient("2023/05/07", Kind::Date),
        Value::Date(NaiveDate::from_ymd_opt(2023, 5, 7))
    );
    assert_eq!(
        lenient("1999/12/31", Kind::Date),
        Value::Date(NaiveDate::from_ymd_opt(1999, 12, 31))
    );
}

#[test]
fn test_coerce_invalid_calendar_date() {
    assert_eq!(lenient("2023/2/30", Kind::Date), Value::Date(None));
}

// ============================================================================
// Narrowing Tests
// ============================================================================

#[test]
fn test_lenient_narrowing_wraps() {
    assert_eq!(lenient("300", Kind::Int8), Value::Int8(44));
    assert_eq!(lenient("-129", Kind::Int8), Value::Int8(127));
    assert_eq!(lenient("65536", Kind::Int16), Value::Int16(0));
    assert_eq!(lenient("4294967297", Kind::Int32), Value::Int32(1));
}

#[test]
fn test_strict_narrowing_rejects() {
    let err = try_coerce("300", &Kind::Int8, &BoolRule::default()).unwrap_err();
    assert_eq!(
        err,
        CoerceError::OutOfRange {
            value: 300,
            kind: Kind::Int8
        }
    );
    assert_eq!(err.to_string(), "300 is out of range for int8");
}

#[test]
fn test_strict_in_range_ok() {
    let value = try_coerce("127", &Kind::Int8, &BoolRule::default()).unwrap();
    assert_eq!(value, Value::Int8(127));
}

// ============================================================================
// Policy Tests
// ============================================================================

#[test]
fn test_strict_reports_parse_errors() {
    let rule = BoolRule::default();
    assert!(matches!(
        try_coerce("abc", &Kind::Float64, &rule),
        Err(CoerceError::Float(_))
    ));
    assert!(matches!(
        try_coerce("abc", &Kind::Int64, &rule),
        Err(CoerceError::Int(_))
    ));
    assert!(matches!(
        try_coerce("abc", &Kind::Date, &rule),
        Err(CoerceError::Date(_))
    ));
}

#[test]
fn test_strict_never_fails_string_or_bool() {
    let rule = BoolRule::default();
    assert_eq!(
        try_coerce("anything", &Kind::String, &rule).unwrap(),
        Value::String("anything".into())
    );
    assert_eq!(try_coerce("", &Kind::Bool, &rule).unwrap(), Value::Bool(false));
}

#[test]
fn test_lenient_policy_never_errors() {
    let rule = BoolRule::default();
    for kind in [
        Kind::Int8,
        Kind::Int16,
        Kind::Int32,
        Kind::Int64,
        Kind::Float32,
        Kind::Float64,
        Kind::Date,
    ] {
        let result = coerce_with("%%garbage%%", &kind, &rule, CoercionPolicy::Lenient);
        assert_eq!(result.unwrap(), Value::zero(&kind));
    }
}

#[test]
fn test_policy_default_is_lenient() {
    assert_eq!(CoercionPolicy::default(), CoercionPolicy::Lenient);
}

#[test]
fn test_coerce_is_idempotent() {
    let rule = BoolRule::default();
    for (raw, kind) in [
        ("42", Kind::Int32),
        ("abc", Kind::Float64),
        ("2023/5/7", Kind::Date),
        ("", Kind::Bool),
        ("text", Kind::String),
    ] {
        assert_eq!(coerce(raw, &kind, &rule), coerce(raw, &kind, &rule));
    }
}

// ============================================================================
// BoolRule Tests
// ============================================================================

#[test]
fn test_bool_rule_one_of() {
    let rule = BoolRule::one_of(["yes", "Y", "1"]);
    assert!(rule.apply("yes"));
    assert!(rule.apply("YES"));
    assert!(rule.apply("y"));
    assert!(rule.apply("1"));
    assert!(!rule.apply("no"));
    assert!(!rule.apply(""));
}

#[test]
fn test_bool_rule_custom() {
    let rule = BoolRule::new(|raw| raw == "T");
    assert_eq!(coerce("T", &Kind::Bool, &rule), Value::Bool(true));
    assert_eq!(coerce("F", &Kind::Bool, &rule), Value::Bool(false));
}

#[test]
fn test_bool_rule_debug() {
    assert_eq!(format!("{:?}", BoolRule::default()), "BoolRule(..)");
}
