//! Header resolution module
//!
//! Builds, once per decoding session, the mapping between the header row's
//! columns and the destination record's fields.
//!
//! # Overview
//!
//! - [`ColumnIndex`] - column position to header name, and name lookup
//!   where the last duplicate wins
//! - [`FieldMap`] - destination field to source column, in declaration order
//! - [`FieldTypeCache`] - destination field to declared kind and policy
//!
//! A tag on any field switches the whole map into explicit mode: only
//! tagged fields are bound and all name-matched bindings are dropped.

mod resolver;
mod types;

pub use resolver::resolve;
pub use types::{Binding, ColumnIndex, FieldMap, FieldType, FieldTypeCache, ResolvedHeader};
