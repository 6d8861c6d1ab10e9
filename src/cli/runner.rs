//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::decode::{Decoded, Decoder, DecoderBuilder, DecoderOptions};
use crate::error::{Error, Result};
use crate::loader::{load_shape, ShapeDefinition};
use crate::schema::Record;
use serde::Serialize;
use serde_json::{json, Value};
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{info, warn};

/// Counts from one `decode` run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DecodeSummary {
    pub emitted: usize,
    pub skipped: usize,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing to stdout
    pub fn run(&self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out)
    }

    /// Run the CLI command, writing to `out`
    pub fn run_to<W: Write>(&self, out: &mut W) -> Result<()> {
        match &self.cli.command {
            Commands::Decode {
                input,
                max_records,
                skip_errors,
            } => self.decode(input, *max_records, *skip_errors, out),
            Commands::Headers { input } => self.headers(input, out),
            Commands::Resolve { input } => self.resolve(input, out),
            Commands::Validate => self.validate(out),
        }
    }

    /// Load the shape definition named by `--shape`
    fn load_shape(&self) -> Result<ShapeDefinition> {
        let path = self
            .cli
            .shape
            .as_ref()
            .ok_or_else(|| Error::config("No shape file specified. Use --shape <path>"))?;
        load_shape(path)
    }

    /// Apply command-line overrides on top of the shape's options
    fn options(&self, base: DecoderOptions) -> DecoderOptions {
        let mut options = base;
        if let Some(delimiter) = self.cli.delimiter {
            options.delimiter = delimiter;
        }
        if let Some(comment) = self.cli.comment {
            options.comment = Some(comment);
        }
        if let Some(count) = self.cli.fields_per_record {
            options.fields_per_record = count;
        }
        options.lazy_quotes |= self.cli.lazy_quotes;
        options.trim_leading_space |= self.cli.trim_leading_space;
        options.strict |= self.cli.strict;
        options
    }

    /// Decode data rows into JSON records
    fn decode<W: Write>(
        &self,
        input: &Path,
        max_records: Option<usize>,
        skip_errors: bool,
        out: &mut W,
    ) -> Result<()> {
        let shape = self.load_shape()?;
        let options = self.options(shape.options.clone());
        let mut decoder = DecoderBuilder::from_options(options).open(input)?;

        let template = shape.record();
        let summary =
            self.emit_records(&mut decoder, || template.clone(), max_records, skip_errors, out)?;

        info!(
            "Decoded {} records from {} ({} skipped, {} rows read)",
            summary.emitted,
            input.display(),
            summary.skipped,
            decoder.rows_read()
        );
        decoder.close();
        Ok(())
    }

    /// Write one message per decoded record, stopping once `max_records`
    /// have been emitted without reading further rows
    pub(crate) fn emit_records<R, T, F, W>(
        &self,
        decoder: &mut Decoder<R>,
        factory: F,
        max_records: Option<usize>,
        skip_errors: bool,
        out: &mut W,
    ) -> Result<DecodeSummary>
    where
        R: Read,
        T: Record + Serialize,
        F: FnMut() -> T,
        W: Write,
    {
        let limit = max_records.unwrap_or(usize::MAX);
        let mut summary = DecodeSummary::default();
        let mut records = decoder.records_with(factory);

        while summary.emitted < limit {
            let Some(result) = records.next() else {
                break;
            };
            match result {
                Ok(record) => {
                    summary.emitted += 1;
                    self.output_message(
                        out,
                        &json!({
                            "type": "RECORD",
                            "record": record,
                        }),
                    )?;
                }
                Err(e) if skip_errors && e.is_row_scoped() => {
                    summary.skipped += 1;
                    warn!("Skipping row: {}", e);
                    self.output_message(
                        out,
                        &json!({
                            "type": "LOG",
                            "log": { "level": "WARN", "message": e.to_string() }
                        }),
                    )?;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(summary)
    }

    /// Print the header row
    fn headers<W: Write>(&self, input: &Path, out: &mut W) -> Result<()> {
        let base = match &self.cli.shape {
            Some(path) => load_shape(path)?.options,
            None => DecoderOptions::default(),
        };
        let mut decoder = DecoderBuilder::from_options(self.options(base)).open(input)?;

        let columns = match decoder.read_row() {
            Ok(row) => row.to_vec(),
            Err(Error::EndOfInput) => Vec::new(),
            Err(e) => return Err(e),
        };

        self.output_message(
            out,
            &json!({
                "type": "HEADER",
                "columns": columns,
            }),
        )
    }

    /// Show how the shape's fields bind to the header columns
    fn resolve<W: Write>(&self, input: &Path, out: &mut W) -> Result<()> {
        let shape = self.load_shape()?;
        let options = self.options(shape.options.clone());
        let mut decoder = DecoderBuilder::from_options(options).open(input)?;

        let mut record = shape.record();
        match decoder.decode_next(&mut record)? {
            Decoded::Header => {}
            Decoded::Record => return Err(Error::Other("expected a header row".to_string())),
        }
        let Some(header) = decoder.resolved_header() else {
            return Err(Error::Other("header was not resolved".to_string()));
        };

        let bindings: Vec<Value> = header
            .fields
            .bindings()
            .iter()
            .map(|b| {
                json!({
                    "field": b.field,
                    "column": b.column,
                    "kind": header.types.kind_of(&b.field).map(ToString::to_string),
                    "position": header.columns.position(&b.column),
                })
            })
            .collect();
        let skipped: Vec<&str> = shape
            .fields
            .iter()
            .filter(|f| f.is_skipped())
            .map(|f| f.name.as_str())
            .collect();
        let unresolved: Vec<&str> = header
            .unresolved()
            .into_iter()
            .map(|b| b.field.as_str())
            .collect();

        self.output_message(
            out,
            &json!({
                "type": "BINDINGS",
                "shape": shape.display_name(),
                "explicit": header.fields.is_explicit(),
                "bindings": bindings,
                "skipped": skipped,
                "unresolved": unresolved,
            }),
        )
    }

    /// Validate shape definition
    fn validate<W: Write>(&self, out: &mut W) -> Result<()> {
        let shape = self.load_shape()?;
        let options = self.options(shape.options.clone());
        options.validate()?;

        let skipped = shape.fields.iter().filter(|f| f.is_skipped()).count();
        self.output_message(
            out,
            &json!({
                "type": "LOG",
                "log": {
                    "level": "INFO",
                    "message": format!(
                        "Shape '{}' is valid with {} fields ({} skipped)",
                        shape.display_name(),
                        shape.fields.len(),
                        skipped
                    )
                }
            }),
        )
    }

    /// Output a message
    fn output_message<W: Write>(&self, out: &mut W, msg: &Value) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(msg)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(msg)?,
        };
        writeln!(out, "{line}")?;
        Ok(())
    }
}
