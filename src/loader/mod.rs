//! YAML Loader module
//!
//! Parse destination shape definitions from YAML files.
//!
//! # Overview
//!
//! The loader module provides:
//! - `ShapeDefinition` - Declarative destination record (fields + options)
//! - YAML parsing with validation
//!
//! ```yaml
//! name: accounts
//! options:
//!   delimiter: ";"
//!   true_values: [yes, y]
//! fields:
//!   - name: CardId
//!     type: string
//!   - name: CreateDate
//!     type: date
//!     tag: created
//!   - name: Notes
//!     type: string
//!     tag: "-"
//! ```

mod parser;
mod types;

pub use parser::{load_shape, load_shape_from_str};
pub use types::ShapeDefinition;

#[cfg(test)]
mod tests;
