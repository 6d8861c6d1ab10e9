//! Loader types
//!
//! Declarative shape definition types for YAML parsing.

use crate::decode::DecoderOptions;
use crate::schema::{DynamicRecord, FieldDescriptor};
use serde::{Deserialize, Serialize};

/// A destination record shape and the options to decode it with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ShapeDefinition {
    /// Shape name
    #[serde(default)]
    pub name: Option<String>,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Decoder options
    #[serde(default)]
    pub options: DecoderOptions,
    /// Fields in declaration order
    pub fields: Vec<FieldDescriptor>,
}

impl ShapeDefinition {
    /// An empty record of this shape
    pub fn record(&self) -> DynamicRecord {
        DynamicRecord::new(self.fields.clone())
    }

    /// Display name, falling back to "shape"
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("shape")
    }
}
