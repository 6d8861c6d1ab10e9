//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Decode delimited text into typed records
#[derive(Parser, Debug)]
#[command(name = "csvbind")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shape definition file (YAML)
    #[arg(short, long, global = true)]
    pub shape: Option<PathBuf>,

    /// Field delimiter (overrides the shape file)
    #[arg(short, long, global = true)]
    pub delimiter: Option<char>,

    /// Comment-line marker (overrides the shape file)
    #[arg(long, global = true)]
    pub comment: Option<char>,

    /// Required fields per record, 0 = unchecked (overrides the shape file)
    #[arg(long, global = true)]
    pub fields_per_record: Option<usize>,

    /// Tolerate stray quotes
    #[arg(long, global = true)]
    pub lazy_quotes: bool,

    /// Ignore leading white space in fields
    #[arg(long, global = true)]
    pub trim_leading_space: bool,

    /// Fail records with malformed cells or missing columns
    #[arg(long, global = true)]
    pub strict: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode data rows into JSON records
    Decode {
        /// Input file
        input: PathBuf,

        /// Maximum records to emit
        #[arg(long)]
        max_records: Option<usize>,

        /// Report malformed rows and keep going instead of stopping
        #[arg(long)]
        skip_errors: bool,
    },

    /// Print the header row
    Headers {
        /// Input file
        input: PathBuf,
    },

    /// Show how the shape's fields bind to the header columns
    Resolve {
        /// Input file
        input: PathBuf,
    },

    /// Validate the shape definition
    Validate,
}

impl Commands {
    /// Subcommand name, for error context
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Decode { .. } => "decode",
            Commands::Headers { .. } => "headers",
            Commands::Resolve { .. } => "resolve",
            Commands::Validate => "validate",
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
