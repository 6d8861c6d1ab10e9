//! Record decoder module
//!
//! Orchestrates tokenizer, header resolver and field coercer.
//!
//! # Overview
//!
//! A [`Decoder`] session treats the first row it reads as the header,
//! resolves it once against the destination record's description, and then
//! coerces every following row into the destination.
//!
//! ```text
//! Unopened → HeaderPending → Streaming → Exhausted
//!     └───────────┴──────────────┴──────────→ Closed
//! ```
//!
//! A session is not safe for concurrent use; independent sessions share
//! no state.

mod decoder;
mod types;

pub use decoder::{Decoder, DecoderBuilder, Records};
pub use types::{Decoded, DecoderOption, DecoderOptions, DecoderState};
