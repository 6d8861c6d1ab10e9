//! Kind-dispatched cell coercion

use super::types::{BoolRule, CoerceError, CoercionPolicy};
use crate::schema::{Kind, Value};
use chrono::NaiveDate;

/// Layout of date cells: four-digit year, one- or two-digit month and day
pub const DATE_LAYOUT: &str = "%Y/%m/%d";

/// Coerce a cell, degrading to the kind's zero value on failure.
///
/// Integers wider than the destination wrap like an `as` cast.
pub fn coerce(raw: &str, kind: &Kind, bool_rule: &BoolRule) -> Value {
    match coerce_with(raw, kind, bool_rule, CoercionPolicy::Lenient) {
        Ok(value) => value,
        Err(_) => Value::zero(kind),
    }
}

/// Coerce a cell, failing on malformed or out-of-range input
pub fn try_coerce(raw: &str, kind: &Kind, bool_rule: &BoolRule) -> Result<Value, CoerceError> {
    coerce_with(raw, kind, bool_rule, CoercionPolicy::Strict)
}

/// Coerce a cell under an explicit policy.
///
/// Never returns an error under [`CoercionPolicy::Lenient`].
pub fn coerce_with(
    raw: &str,
    kind: &Kind,
    bool_rule: &BoolRule,
    policy: CoercionPolicy,
) -> Result<Value, CoerceError> {
    let parsed = match kind {
        Kind::String | Kind::Other(_) => Ok(Value::String(raw.to_string())),
        Kind::Bool => Ok(Value::Bool(bool_rule.apply(raw))),
        Kind::Float32 => raw
            .parse::<f64>()
            .map(|v| Value::Float32(v as f32))
            .map_err(CoerceError::from),
        Kind::Float64 => raw
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(CoerceError::from),
        Kind::Int8 | Kind::Int16 | Kind::Int32 | Kind::Int64 => coerce_int(raw, kind, policy),
        Kind::Date => NaiveDate::parse_from_str(raw, DATE_LAYOUT)
            .map(|d| Value::Date(Some(d)))
            .map_err(CoerceError::from),
    };

    match (parsed, policy) {
        (Ok(value), _) => Ok(value),
        (Err(_), CoercionPolicy::Lenient) => Ok(Value::zero(kind)),
        (Err(e), CoercionPolicy::Strict) => Err(e),
    }
}

/// Parse as a 64-bit integer, then narrow to the destination width
fn coerce_int(raw: &str, kind: &Kind, policy: CoercionPolicy) -> Result<Value, CoerceError> {
    let wide = raw.parse::<i64>()?;

    let fits = match kind {
        Kind::Int8 => i8::try_from(wide).is_ok(),
        Kind::Int16 => i16::try_from(wide).is_ok(),
        Kind::Int32 => i32::try_from(wide).is_ok(),
        _ => true,
    };
    if !fits && policy == CoercionPolicy::Strict {
        return Err(CoerceError::OutOfRange {
            value: wide,
            kind: kind.clone(),
        });
    }

    Ok(match kind {
        Kind::Int8 => Value::Int8(wide as i8),
        Kind::Int16 => Value::Int16(wide as i16),
        Kind::Int32 => Value::Int32(wide as i32),
        _ => Value::Int64(wide),
    })
}
