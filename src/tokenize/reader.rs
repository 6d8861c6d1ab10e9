//! Streaming tokenizer
//!
//! Reads physical lines from a `BufRead` and assembles logical records.
//! A quoted field may span several physical lines.

use super::types::{RawRow, TokenizerConfig};
use crate::error::{Error, Result};
use std::io::BufRead;

const QUOTE: char = '"';

/// Splits a stream into records according to a [`TokenizerConfig`]
#[derive(Debug)]
pub struct Tokenizer<R> {
    reader: R,
    config: TokenizerConfig,
    /// Physical lines consumed so far (1-based line of the last read)
    line: u64,
}

/// A physical line without its terminator
struct Line {
    text: String,
    /// False only for a final line that ended at EOF without a newline
    terminated: bool,
}

impl<R: BufRead> Tokenizer<R> {
    /// Create a tokenizer, rejecting unusable delimiter/comment settings
    pub fn new(reader: R, config: TokenizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            reader,
            config,
            line: 0,
        })
    }

    /// The configuration this tokenizer splits with
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Number of physical lines consumed so far
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Give back the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read the next record.
    ///
    /// Empty lines and comment lines are skipped. Returns
    /// [`Error::EndOfInput`] once the stream is exhausted.
    pub fn next_row(&mut self) -> Result<RawRow> {
        let first = loop {
            let Some(line) = self.read_line()? else {
                return Err(Error::EndOfInput);
            };
            if let Some(comment) = self.config.comment {
                if line.text.starts_with(comment) {
                    continue;
                }
            }
            if line.text.is_empty() && line.terminated {
                continue;
            }
            break line;
        };

        let record_line = self.line;
        let fields = self.parse_record(first, record_line)?;

        let expected = self.config.fields_per_record;
        if expected > 0 && fields.len() != expected {
            return Err(Error::malformed(
                record_line,
                format!(
                    "wrong number of fields: expected {expected}, got {}",
                    fields.len()
                ),
            ));
        }

        Ok(fields)
    }

    fn parse_record(&mut self, first: Line, record_line: u64) -> Result<RawRow> {
        let delimiter = self.config.delimiter;
        let lazy = self.config.lazy_quotes;

        let mut fields = Vec::new();
        let mut line = first;
        let mut pos = 0usize;

        'fields: loop {
            if self.config.trim_leading_space {
                let rest = &line.text[pos..];
                let trimmed =
                    rest.trim_start_matches(|c: char| c.is_whitespace() && c != delimiter);
                pos += rest.len() - trimmed.len();
            }

            let rest = &line.text[pos..];
            if !rest.starts_with(QUOTE) {
                let end = rest.find(delimiter).unwrap_or(rest.len());
                let field = &rest[..end];
                if !lazy && field.contains(QUOTE) {
                    return Err(Error::malformed(self.line, "bare \" in non-quoted field"));
                }
                fields.push(field.to_string());
                if end == rest.len() {
                    break;
                }
                pos += end + delimiter.len_utf8();
                continue;
            }

            // Quoted field
            pos += QUOTE.len_utf8();
            let mut field = String::new();
            loop {
                let rest = &line.text[pos..];
                if let Some(i) = rest.find(QUOTE) {
                    field.push_str(&rest[..i]);
                    pos += i + QUOTE.len_utf8();

                    let after = &line.text[pos..];
                    if after.starts_with(QUOTE) {
                        field.push(QUOTE);
                        pos += QUOTE.len_utf8();
                    } else if after.starts_with(delimiter) {
                        pos += delimiter.len_utf8();
                        fields.push(field);
                        continue 'fields;
                    } else if after.is_empty() {
                        fields.push(field);
                        break 'fields;
                    } else if lazy {
                        field.push(QUOTE);
                    } else {
                        return Err(Error::malformed(
                            self.line,
                            "extraneous or missing \" in quoted field",
                        ));
                    }
                } else {
                    field.push_str(rest);
                    if line.terminated {
                        field.push('\n');
                    }
                    match self.read_line()? {
                        Some(next) => {
                            line = next;
                            pos = 0;
                        }
                        None if lazy => {
                            fields.push(field);
                            break 'fields;
                        }
                        None => {
                            return Err(Error::malformed(
                                record_line,
                                "extraneous or missing \" in quoted field",
                            ));
                        }
                    }
                }
            }
        }

        Ok(fields)
    }

    /// Read one physical line, normalising `\r\n` to `\n`.
    ///
    /// A line that is not valid UTF-8 is consumed and reported as a
    /// malformed row.
    fn read_line(&mut self) -> Result<Option<Line>> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;

        let mut text =
            String::from_utf8(buf).map_err(|_| Error::malformed(self.line, "invalid UTF-8"))?;

        let terminated = text.ends_with('\n');
        if terminated {
            text.pop();
            if text.ends_with('\r') {
                text.pop();
            }
        }

        Ok(Some(Line { text, terminated }))
    }
}
