//! CLI module
//!
//! Command-line interface for decoding delimited files.
//!
//! # Commands
//!
//! - `decode` - Decode data rows into JSON records
//! - `headers` - Print the header row
//! - `resolve` - Show how shape fields bind to header columns
//! - `validate` - Validate a shape definition

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
