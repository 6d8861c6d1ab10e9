//! Record tokenizer module
//!
//! Splits a delimited text stream into rows of string fields.
//!
//! # Overview
//!
//! The tokenizer knows nothing about headers or destination types. It
//! honours the delimiter, comment marker, quote leniency, leading-space
//! trimming and field-count settings of a [`TokenizerConfig`] and hands
//! each record to the decoder as a [`RawRow`].

mod reader;
mod types;

pub use reader::Tokenizer;
pub use types::{RawRow, TokenizerConfig};

#[cfg(test)]
mod tests;
