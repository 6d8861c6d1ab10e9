//! Field coercion module
//!
//! Converts a raw cell string into the [`Value`](crate::schema::Value)
//! required by a field's declared kind.
//!
//! # Overview
//!
//! Coercion is total under [`CoercionPolicy::Lenient`] (the default): a
//! malformed cell degrades to the kind's zero value and never aborts the
//! row. [`CoercionPolicy::Strict`] reports a [`CoerceError`] instead.

mod coercer;
mod types;

pub use coercer::{coerce, coerce_with, try_coerce, DATE_LAYOUT};
pub use types::{BoolRule, CoerceError, CoercionPolicy};

#[cfg(test)]
mod tests;
