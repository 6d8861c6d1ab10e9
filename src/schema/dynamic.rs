//! Runtime-described records
//!
//! Used when the destination shape is only known at runtime, e.g. loaded
//! from a YAML shape file.

use super::types::{FieldDescriptor, Record, Value};
use crate::error::{Error, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A record whose fields are given by a descriptor list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicRecord {
    fields: Vec<FieldDescriptor>,
    values: Vec<Option<Value>>,
}

impl DynamicRecord {
    /// Create an empty record with the given shape
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        let values = vec![None; fields.len()];
        Self { fields, values }
    }

    /// Declared fields
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Value of a field, `None` if never assigned
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.position(field).and_then(|i| self.values[i].as_ref())
    }

    /// Iterate over `(field, value)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.fields
            .iter()
            .zip(&self.values)
            .map(|(f, v)| (f.name.as_str(), v.as_ref()))
    }

    /// Forget all assigned values, keeping the shape
    pub fn clear(&mut self) {
        self.values.iter_mut().for_each(|v| *v = None);
    }

    fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == field)
    }
}

impl Record for DynamicRecord {
    fn describe(&self) -> Vec<FieldDescriptor> {
        self.fields.clone()
    }

    fn assign(&mut self, field: &str, value: Value) -> Result<()> {
        let i = self
            .position(field)
            .ok_or_else(|| Error::unknown_field(field))?;

        let kind = &self.fields[i].kind;
        if !value.fits(kind) {
            return Err(Error::type_mismatch(
                field,
                kind.to_string(),
                value.kind_name(),
            ));
        }

        self.values[i] = Some(value);
        Ok(())
    }
}

/// Serializes as a map of non-skipped fields; unassigned fields are null
impl Serialize for DynamicRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (field, value) in self.fields.iter().zip(&self.values) {
            if field.is_skipped() {
                continue;
            }
            map.serialize_entry(&field.name, value)?;
        }
        map.end()
    }
}
