//! YAML parser for shape definitions
//!
//! Parses and validates shape YAML files.

use crate::error::{Error, Result};
use crate::loader::types::ShapeDefinition;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Load a shape definition from a file path
pub fn load_shape(path: impl AsRef<Path>) -> Result<ShapeDefinition> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read shape file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;
    load_shape_from_str(&content)
}

/// Load a shape definition from a YAML string
pub fn load_shape_from_str(yaml: &str) -> Result<ShapeDefinition> {
    let def: ShapeDefinition = serde_yaml::from_str(yaml)?;

    validate_shape(&def)?;
    Ok(def)
}

/// Validate a shape definition
fn validate_shape(def: &ShapeDefinition) -> Result<()> {
    if def.fields.is_empty() {
        return Err(Error::config(format!(
            "Shape '{}' must have at least one field",
            def.display_name()
        )));
    }

    let mut names = HashSet::with_capacity(def.fields.len());
    for field in &def.fields {
        if field.name.trim().is_empty() {
            return Err(Error::config("Field name cannot be empty"));
        }
        if !names.insert(field.name.as_str()) {
            return Err(Error::config(format!(
                "Duplicate field name '{}'",
                field.name
            )));
        }
    }

    def.options.validate()
}
