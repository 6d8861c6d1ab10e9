//! Decoder session
//!
//! Owns the underlying stream and all per-session state: row counter,
//! last row read, and the header resolution reused for every data row.

use super::types::{Decoded, DecoderOption, DecoderOptions, DecoderState};
use crate::coerce::{coerce_with, BoolRule, CoercionPolicy};
use crate::error::{Error, Result};
use crate::resolve::{resolve, ColumnIndex, FieldMap, ResolvedHeader};
use crate::schema::{Record, Value};
use crate::tokenize::{RawRow, Tokenizer};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, trace, warn};

// ============================================================================
// Decoder
// ============================================================================

/// Where the session's rows come from
#[derive(Debug)]
enum Source<R> {
    /// Attached but not yet read; options may still change
    Pending(R),
    Active(Tokenizer<BufReader<R>>),
    Closed,
}

/// Decodes delimited text into [`Record`]s, one row per call.
///
/// The first row read is the header. It is resolved against the
/// destination's field description on the first [`decode_next`] call and
/// never decoded as data.
///
/// A decoder must not be shared between threads without external
/// synchronisation; its caches are plain session state.
///
/// [`decode_next`]: Decoder::decode_next
#[derive(Debug)]
pub struct Decoder<R> {
    source: Source<R>,
    options: DecoderOptions,
    bool_rule: BoolRule,
    rows_read: u64,
    last_row: Option<RawRow>,
    /// First row of the session, held until it is resolved
    header_row: Option<RawRow>,
    header: Option<ResolvedHeader>,
    exhausted: bool,
}

impl<R: Read> Decoder<R> {
    /// Create a decoder with default options
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, DecoderOptions::default())
    }

    /// Create a decoder with the given options.
    ///
    /// Options are validated on the first read.
    pub fn with_options(reader: R, options: DecoderOptions) -> Self {
        let bool_rule = options.bool_rule().unwrap_or_default();
        Self {
            source: Source::Pending(reader),
            options,
            bool_rule,
            rows_read: 0,
            last_row: None,
            header_row: None,
            header: None,
            exhausted: false,
        }
    }

    /// Change one option. Only allowed before the first read.
    pub fn configure(&mut self, option: DecoderOption) -> Result<&mut Self> {
        if self.state() != DecoderState::Unopened {
            return Err(Error::invalid_value(
                option.name(),
                "options must be set before the first read",
            ));
        }

        let mut options = self.options.clone();
        let mut bool_rule = None;
        match option {
            DecoderOption::Delimiter(c) => options.delimiter = c,
            DecoderOption::Comment(c) => options.comment = c,
            DecoderOption::FieldsPerRecord(n) => options.fields_per_record = n,
            DecoderOption::LazyQuotes(on) => options.lazy_quotes = on,
            DecoderOption::TrimLeadingSpace(on) => options.trim_leading_space = on,
            DecoderOption::Strict(on) => options.strict = on,
            DecoderOption::BoolRule(rule) => bool_rule = Some(rule),
        }
        options.validate()?;
        self.options = options;
        if let Some(rule) = bool_rule {
            self.bool_rule = rule;
        }

        Ok(self)
    }

    /// Current options
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Lifecycle state of this session
    pub fn state(&self) -> DecoderState {
        match self.source {
            Source::Closed => DecoderState::Closed,
            Source::Pending(_) => DecoderState::Unopened,
            Source::Active(_) if self.exhausted => DecoderState::Exhausted,
            Source::Active(_) if self.header.is_some() => DecoderState::Streaming,
            Source::Active(_) => DecoderState::HeaderPending,
        }
    }

    /// Rows successfully read so far, header included
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    /// The most recently read row
    pub fn last_row(&self) -> Option<&[String]> {
        self.last_row.as_deref()
    }

    /// Header resolution, once the header has been consumed
    pub fn resolved_header(&self) -> Option<&ResolvedHeader> {
        self.header.as_ref()
    }

    /// Header columns, once the header has been consumed
    pub fn column_index(&self) -> Option<&ColumnIndex> {
        self.header.as_ref().map(|h| &h.columns)
    }

    /// Field bindings, once the header has been consumed
    pub fn field_map(&self) -> Option<&FieldMap> {
        self.header.as_ref().map(|h| &h.fields)
    }

    /// Read the next raw row.
    ///
    /// Returns [`Error::EndOfInput`] once the stream is exhausted, and on
    /// every call after that.
    pub fn read_row(&mut self) -> Result<&[String]> {
        if self.exhausted {
            return Err(Error::EndOfInput);
        }

        let next = self.tokenizer()?.next_row();
        let row = match next {
            Ok(row) => row,
            Err(Error::EndOfInput) => {
                self.exhausted = true;
                debug!("End of input after {} rows", self.rows_read);
                return Err(Error::EndOfInput);
            }
            Err(e) => return Err(e),
        };

        self.rows_read += 1;
        trace!("Read row {} ({} fields)", self.rows_read, row.len());
        if self.rows_read == 1 {
            self.header_row = Some(row.clone());
        }

        let row: &[String] = self.last_row.insert(row);
        Ok(row)
    }

    /// Decode the next row into `dest`.
    ///
    /// The first call consumes the header row, resolves it against
    /// `dest.describe()` and returns [`Decoded::Header`] without touching
    /// `dest`. Later calls read one data row each and assign every bound
    /// field that has a column in the row.
    ///
    /// Under the lenient policy a malformed cell becomes the kind's zero
    /// value and a missing column leaves the field untouched. Under the
    /// strict policy either fails the record and `dest` is left untouched.
    ///
    /// Every cell is coerced before the first `assign`. If `assign` itself
    /// fails, fields assigned earlier in the same row keep their new values.
    pub fn decode_next<T: Record + ?Sized>(&mut self, dest: &mut T) -> Result<Decoded> {
        if matches!(self.source, Source::Closed) {
            return Err(Error::Closed);
        }

        if self.header.is_none() {
            self.resolve_header(dest)?;
            return Ok(Decoded::Header);
        }

        self.read_row()?;

        let (Some(header), Some(row)) = (self.header.as_ref(), self.last_row.as_deref()) else {
            return Err(Error::EndOfInput);
        };
        let values = coerce_row(
            header,
            row,
            &self.bool_rule,
            self.options.policy(),
            self.rows_read,
        )?;

        for (field, value) in values {
            dest.assign(field, value)?;
        }

        Ok(Decoded::Record)
    }

    /// Iterate over data rows, building each record with `T::default()`
    pub fn records<T: Record + Default>(&mut self) -> Records<'_, R, fn() -> T> {
        self.records_with(T::default as fn() -> T)
    }

    /// Iterate over data rows, building each record with `factory`
    pub fn records_with<T, F>(&mut self, factory: F) -> Records<'_, R, F>
    where
        T: Record,
        F: FnMut() -> T,
    {
        Records {
            decoder: self,
            factory,
            done: false,
        }
    }

    /// Release the underlying stream. Idempotent.
    pub fn close(&mut self) {
        if !matches!(self.source, Source::Closed) {
            debug!("Closing decoder after {} rows", self.rows_read);
        }
        self.source = Source::Closed;
    }

    /// Take back the underlying reader, if the decoder is not closed
    pub fn into_inner(self) -> Option<R> {
        match self.source {
            Source::Pending(reader) => Some(reader),
            Source::Active(tokenizer) => Some(tokenizer.into_inner().into_inner()),
            Source::Closed => None,
        }
    }

    fn resolve_header<T: Record + ?Sized>(&mut self, dest: &T) -> Result<()> {
        if self.header_row.is_none() {
            self.read_row()?;
        }
        let Some(header_row) = self.header_row.as_ref() else {
            return Err(Error::EndOfInput);
        };

        let resolved = resolve(header_row, &dest.describe())?;
        debug!(
            "Resolved header: {} columns, {} bindings{}",
            resolved.columns.len(),
            resolved.fields.len(),
            if resolved.fields.is_explicit() {
                " (explicit)"
            } else {
                ""
            }
        );
        for binding in resolved.unresolved() {
            warn!(
                "Column '{}' for field '{}' not found in header",
                binding.column, binding.field
            );
        }

        self.header = Some(resolved);
        self.header_row = None;
        Ok(())
    }

    /// The active tokenizer, created from the options on first use
    fn tokenizer(&mut self) -> Result<&mut Tokenizer<BufReader<R>>> {
        if matches!(self.source, Source::Pending(_)) {
            self.options.validate()?;
            if let Source::Pending(reader) = std::mem::replace(&mut self.source, Source::Closed) {
                let config = self.options.tokenizer_config();
                self.source = Source::Active(Tokenizer::new(BufReader::new(reader), config)?);
            }
        }

        match &mut self.source {
            Source::Active(tokenizer) => Ok(tokenizer),
            _ => Err(Error::Closed),
        }
    }
}

impl Decoder<File> {
    /// Open a file with default options
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        DecoderBuilder::new().open(path)
    }
}

/// Coerce every bound field of one row.
///
/// Nothing is returned for fields whose column is missing under the
/// lenient policy.
fn coerce_row<'a>(
    header: &'a ResolvedHeader,
    row: &[String],
    bool_rule: &BoolRule,
    default_policy: CoercionPolicy,
    row_number: u64,
) -> Result<Vec<(&'a str, Value)>> {
    let mut values = Vec::with_capacity(header.fields.len());

    for binding in header.fields.bindings() {
        let Some(field_type) = header.types.get(&binding.field) else {
            continue;
        };
        let policy = field_type.policy.unwrap_or(default_policy);

        let raw = header
            .columns
            .position(&binding.column)
            .and_then(|i| row.get(i));
        let Some(raw) = raw else {
            if policy == CoercionPolicy::Strict {
                return Err(Error::MissingColumn {
                    field: binding.field.clone(),
                    column: binding.column.clone(),
                });
            }
            continue;
        };

        match coerce_with(raw, &field_type.kind, bool_rule, policy) {
            Ok(value) => values.push((binding.field.as_str(), value)),
            Err(e) => {
                trace!("Row {}: field '{}' rejected: {}", row_number, binding.field, e);
                return Err(Error::Coerce {
                    field: binding.field.clone(),
                    value: raw.clone(),
                    kind: field_type.kind.to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(values)
}

// ============================================================================
// Builder
// ============================================================================

/// Builds a [`Decoder`] with chained option setters
#[derive(Debug, Clone, Default)]
pub struct DecoderBuilder {
    options: DecoderOptions,
    bool_rule: Option<BoolRule>,
}

impl DecoderBuilder {
    /// Start from default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing options
    pub fn from_options(options: DecoderOptions) -> Self {
        Self {
            options,
            bool_rule: None,
        }
    }

    /// Set the field delimiter
    #[must_use]
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.options.delimiter = delimiter;
        self
    }

    /// Skip lines starting with `marker`
    #[must_use]
    pub fn comment(mut self, marker: char) -> Self {
        self.options.comment = Some(marker);
        self
    }

    /// Require `count` fields per record (0 = unchecked)
    #[must_use]
    pub fn fields_per_record(mut self, count: usize) -> Self {
        self.options.fields_per_record = count;
        self
    }

    /// Tolerate stray quotes
    #[must_use]
    pub fn lazy_quotes(mut self, on: bool) -> Self {
        self.options.lazy_quotes = on;
        self
    }

    /// Ignore leading white space in fields
    #[must_use]
    pub fn trim_leading_space(mut self, on: bool) -> Self {
        self.options.trim_leading_space = on;
        self
    }

    /// Fail whole records on malformed cells or missing columns
    #[must_use]
    pub fn strict(mut self, on: bool) -> Self {
        self.options.strict = on;
        self
    }

    /// Interpret boolean cells with a custom rule
    #[must_use]
    pub fn bool_rule(mut self, rule: BoolRule) -> Self {
        self.bool_rule = Some(rule);
        self
    }

    /// Read only these values (case-insensitive) as `true`
    #[must_use]
    pub fn true_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.true_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Build a decoder over `reader`
    pub fn from_reader<R: Read>(self, reader: R) -> Result<Decoder<R>> {
        self.options.validate()?;
        let mut decoder = Decoder::with_options(reader, self.options);
        if let Some(rule) = self.bool_rule {
            decoder.bool_rule = rule;
        }
        Ok(decoder)
    }

    /// Open a file and build a decoder over it
    pub fn open(self, path: impl AsRef<Path>) -> Result<Decoder<File>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;
        self.from_reader(file)
    }
}

// ============================================================================
// Records iterator
// ============================================================================

/// Iterator over decoded records; see [`Decoder::records`]
///
/// Ends at end of input. Row-scoped errors are yielded and iteration
/// continues with the next row; any other error is yielded once and ends
/// the iteration.
pub struct Records<'a, R, F> {
    decoder: &'a mut Decoder<R>,
    factory: F,
    done: bool,
}

impl<R, T, F> Iterator for Records<'_, R, F>
where
    R: Read,
    T: Record,
    F: FnMut() -> T,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let mut record = (self.factory)();
            match self.decoder.decode_next(&mut record) {
                Ok(Decoded::Record) => return Some(Ok(record)),
                Ok(Decoded::Header) => {}
                Err(Error::EndOfInput) => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    if !e.is_row_scoped() {
                        self.done = true;
                    }
                    return Some(Err(e));
                }
            }
        }
    }
}
