//! Decoder types
//!
//! Options, option updates and session state.

use crate::coerce::{BoolRule, CoercionPolicy};
use crate::error::Result;
use crate::tokenize::TokenizerConfig;
use serde::{Deserialize, Serialize};

/// Configuration of a decoding session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderOptions {
    /// Field delimiter (default: comma)
    pub delimiter: char,
    /// Comment-line marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<char>,
    /// Required fields per record (0 = unchecked)
    pub fields_per_record: usize,
    /// Lenient quote handling
    pub lazy_quotes: bool,
    /// Ignore leading white space in fields
    pub trim_leading_space: bool,
    /// Fail the whole record on malformed cells or missing columns
    pub strict: bool,
    /// Values read as `true` by boolean fields (case-insensitive).
    /// When unset, any non-empty cell is `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub true_values: Option<Vec<String>>,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            comment: None,
            fields_per_record: 0,
            lazy_quotes: false,
            trim_leading_space: false,
            strict: false,
            true_values: None,
        }
    }
}

impl DecoderOptions {
    /// Tokenizer settings derived from these options
    pub fn tokenizer_config(&self) -> TokenizerConfig {
        TokenizerConfig {
            delimiter: self.delimiter,
            comment: self.comment,
            fields_per_record: self.fields_per_record,
            lazy_quotes: self.lazy_quotes,
            trim_leading_space: self.trim_leading_space,
        }
    }

    /// Default coercion policy for fields without an override
    pub fn policy(&self) -> CoercionPolicy {
        if self.strict {
            CoercionPolicy::Strict
        } else {
            CoercionPolicy::Lenient
        }
    }

    /// Boolean rule configured by `true_values`, if any
    pub fn bool_rule(&self) -> Option<BoolRule> {
        self.true_values.as_ref().map(BoolRule::one_of)
    }

    /// Check that the options describe a usable tokenizer
    pub fn validate(&self) -> Result<()> {
        self.tokenizer_config().validate()
    }
}

/// A single configuration change, applied before the first read
#[derive(Debug, Clone)]
pub enum DecoderOption {
    Delimiter(char),
    Comment(Option<char>),
    FieldsPerRecord(usize),
    LazyQuotes(bool),
    TrimLeadingSpace(bool),
    BoolRule(BoolRule),
    Strict(bool),
}

impl DecoderOption {
    /// Option name as used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            DecoderOption::Delimiter(_) => "delimiter",
            DecoderOption::Comment(_) => "comment",
            DecoderOption::FieldsPerRecord(_) => "fields_per_record",
            DecoderOption::LazyQuotes(_) => "lazy_quotes",
            DecoderOption::TrimLeadingSpace(_) => "trim_leading_space",
            DecoderOption::BoolRule(_) => "bool_rule",
            DecoderOption::Strict(_) => "strict",
        }
    }
}

/// Outcome of a successful `decode_next`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// The header row was consumed; the destination is untouched
    Header,
    /// A data row was decoded into the destination
    Record,
}

/// Lifecycle of a decoding session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// Nothing read yet; configuration may still change
    Unopened,
    /// Reading has started but the header is not resolved
    HeaderPending,
    /// Header resolved; data rows are being decoded
    Streaming,
    /// End of input reached
    Exhausted,
    /// Stream released
    Closed,
}
