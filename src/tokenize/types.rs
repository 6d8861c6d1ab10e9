//! Tokenizer configuration types

use crate::error::{Error, Result};

/// One record as produced by the tokenizer, one string per column
pub type RawRow = Vec<String>;

/// Settings passed through verbatim from the decoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Field delimiter (default: comma)
    pub delimiter: char,
    /// Lines starting with this character are skipped
    pub comment: Option<char>,
    /// Required number of fields per record (0 = unchecked)
    pub fields_per_record: usize,
    /// Allow bare quotes in unquoted fields and stray quotes in quoted fields
    pub lazy_quotes: bool,
    /// Ignore leading white space in each field
    pub trim_leading_space: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            comment: None,
            fields_per_record: 0,
            lazy_quotes: false,
            trim_leading_space: false,
        }
    }
}

impl TokenizerConfig {
    /// Check that the delimiter and comment characters can be told apart
    /// from each other and from quoting and line structure.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_marker(self.delimiter) {
            return Err(Error::invalid_value(
                "delimiter",
                format!("{:?} cannot be used as a delimiter", self.delimiter),
            ));
        }

        if let Some(comment) = self.comment {
            if !is_valid_marker(comment) {
                return Err(Error::invalid_value(
                    "comment",
                    format!("{comment:?} cannot be used as a comment marker"),
                ));
            }
            if comment == self.delimiter {
                return Err(Error::invalid_value(
                    "comment",
                    "comment marker must differ from the delimiter",
                ));
            }
        }

        Ok(())
    }
}

fn is_valid_marker(c: char) -> bool {
    !matches!(c, '"' | '\r' | '\n' | char::REPLACEMENT_CHARACTER)
}
