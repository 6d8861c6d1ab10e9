//! Destination record description
//!
//! A destination record is described by an ordered list of
//! [`FieldDescriptor`]s: field name, declared [`Kind`] and an optional tag
//! that either overrides the source column name or marks the field as
//! skipped. The resolver and coercer work purely over this description.
//!
//! # Overview
//!
//! - [`Record`] - implemented by destination types (static structs or
//!   [`DynamicRecord`])
//! - [`Value`] - a coerced cell, one variant per kind
//! - [`FromValue`] - typed extraction used inside `Record::assign`

mod dynamic;
mod types;

pub use dynamic::DynamicRecord;
pub use types::{FieldDescriptor, FromValue, Kind, Record, Value, SKIP_MARKER};
