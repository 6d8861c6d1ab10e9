//! Resolution result types

use crate::coerce::CoercionPolicy;
use crate::schema::Kind;
use std::collections::HashMap;

// ============================================================================
// ColumnIndex
// ============================================================================

/// Header columns by position, with name lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    /// Index a header row. For duplicate names the last occurrence is
    /// the one addressable by name.
    pub fn from_header(header: &[String]) -> Self {
        let mut positions = HashMap::with_capacity(header.len());
        for (i, name) in header.iter().enumerate() {
            positions.insert(name.clone(), i);
        }
        Self {
            names: header.to_vec(),
            positions,
        }
    }

    /// Header name at a position
    pub fn name(&self, position: usize) -> Option<&str> {
        self.names.get(position).map(String::as_str)
    }

    /// Position of a header name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Header names in column order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ============================================================================
// FieldMap
// ============================================================================

/// One destination field bound to a source column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub field: String,
    pub column: String,
}

/// Destination field to source column, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    pub(crate) bindings: Vec<Binding>,
    pub(crate) explicit: bool,
}

impl FieldMap {
    /// Bindings in declaration order
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Whether a tag switched this map into explicit mode
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// Source column bound to a field
    pub fn column_for(&self, field: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|b| b.field == field)
            .map(|b| b.column.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.column_for(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// ============================================================================
// FieldTypeCache
// ============================================================================

/// Declared kind and optional policy override of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    pub kind: Kind,
    pub policy: Option<CoercionPolicy>,
}

/// Field kinds, cached once per session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTypeCache {
    pub(crate) types: HashMap<String, FieldType>,
}

impl FieldTypeCache {
    /// Cached type of a field
    pub fn get(&self, field: &str) -> Option<&FieldType> {
        self.types.get(field)
    }

    /// Cached kind of a field
    pub fn kind_of(&self, field: &str) -> Option<&Kind> {
        self.types.get(field).map(|t| &t.kind)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

// ============================================================================
// ResolvedHeader
// ============================================================================

/// Everything resolved from a session's header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedHeader {
    pub columns: ColumnIndex,
    pub fields: FieldMap,
    pub types: FieldTypeCache,
}

impl ResolvedHeader {
    /// Bindings whose column is absent from the header.
    ///
    /// These fields are left untouched by lenient decoding.
    pub fn unresolved(&self) -> Vec<&Binding> {
        self.fields
            .bindings
            .iter()
            .filter(|b| self.columns.position(&b.column).is_none())
            .collect()
    }
}
