// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # csvbind
//!
//! Decode delimited text into typed records, binding header columns to
//! record fields by name or by explicit override tags.
//!
//! ## Features
//!
//! - **Tokenizer**: quoted fields, embedded newlines, comment lines, lazy quotes
//! - **Header resolution**: name matching, explicit column overrides, skip markers
//! - **Field coercion**: integers, floats, bools, dates, with lenient or strict policies
//! - **Dynamic shapes**: decode against a YAML shape file without writing a struct
//!
//! ## Quick Start
//!
//! ```rust
//! use csvbind::{Decoded, Decoder, Error, FieldDescriptor, Kind, Record, Result, Value};
//!
//! #[derive(Default)]
//! struct Person {
//!     name: String,
//!     age: i64,
//! }
//!
//! impl Record for Person {
//!     fn describe(&self) -> Vec<FieldDescriptor> {
//!         vec![
//!             FieldDescriptor::new("Name", Kind::String),
//!             FieldDescriptor::new("Age", Kind::Int64),
//!         ]
//!     }
//!
//!     fn assign(&mut self, field: &str, value: Value) -> Result<()> {
//!         match field {
//!             "Name" => self.name = value.into_typed(field)?,
//!             "Age" => self.age = value.into_typed(field)?,
//!             _ => return Err(Error::unknown_field(field)),
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let input = "Name,Age\nAlice,30\n";
//! let mut decoder = Decoder::new(input.as_bytes());
//! let mut person = Person::default();
//!
//! assert_eq!(decoder.decode_next(&mut person)?, Decoded::Header);
//! assert_eq!(decoder.decode_next(&mut person)?, Decoded::Record);
//! assert_eq!(person.name, "Alice");
//! assert_eq!(person.age, 30);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            Decoder                              │
//! │  read_row() → &[String]    decode_next(&mut dest) → Decoded     │
//! │  records::<T>() → Iterator<Item = Result<T>>                    │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌───────────────┬──────────────┴───┬────────────────┬─────────────┐
//! │   Tokenize    │     Resolve      │     Coerce     │   Schema    │
//! ├───────────────┼──────────────────┼────────────────┼─────────────┤
//! │ Quotes        │ ColumnIndex      │ Integers       │ Record      │
//! │ Comments      │ FieldMap         │ Floats         │ Descriptor  │
//! │ Line endings  │ FieldTypeCache   │ Bools, Dates   │ Dynamic     │
//! └───────────────┴──────────────────┴────────────────┴─────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Row tokenizer
pub mod tokenize;

/// Record descriptions and typed values
pub mod schema;

/// Field coercion
pub mod coerce;

/// Header resolution
pub mod resolve;

/// Record decoder
pub mod decode;

/// YAML loader for shape definitions
pub mod loader;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

// Re-export commonly used types
pub use coerce::{BoolRule, CoercionPolicy};
pub use decode::{Decoded, Decoder, DecoderBuilder, DecoderOptions};
pub use loader::{load_shape, load_shape_from_str, ShapeDefinition};
pub use schema::{DynamicRecord, FieldDescriptor, Kind, Record, Value};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
