//! Header resolver

use super::types::{Binding, ColumnIndex, FieldMap, FieldType, FieldTypeCache, ResolvedHeader};
use crate::error::{Error, Result};
use crate::schema::FieldDescriptor;
use std::collections::{HashMap, HashSet};

/// Resolve a header row against a destination shape.
///
/// Skipped fields never appear in the result. An override tag on any
/// field discards every name-matched binding made so far and switches
/// the rest of the resolution to explicit mode. Bound columns missing
/// from the header are not an error here.
pub fn resolve(header: &[String], shape: &[FieldDescriptor]) -> Result<ResolvedHeader> {
    if shape.is_empty() {
        return Err(Error::schema("destination record describes no fields"));
    }

    let mut seen = HashSet::with_capacity(shape.len());
    for field in shape {
        if field.name.is_empty() {
            return Err(Error::schema("destination record has a field with no name"));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(Error::schema(format!(
                "destination record declares field '{}' more than once",
                field.name
            )));
        }
    }

    let fields = build_field_map(shape);
    let types = build_type_cache(shape);
    let columns = ColumnIndex::from_header(header);

    Ok(ResolvedHeader {
        columns,
        fields,
        types,
    })
}

fn build_field_map(shape: &[FieldDescriptor]) -> FieldMap {
    let mut map = FieldMap::default();

    for field in shape {
        if field.is_skipped() {
            continue;
        }

        if let Some(column) = field.override_column() {
            if !map.explicit {
                map.explicit = true;
                map.bindings.clear();
            }
            map.bindings.push(Binding {
                field: field.name.clone(),
                column: column.to_string(),
            });
        } else if !map.explicit {
            map.bindings.push(Binding {
                field: field.name.clone(),
                column: field.name.clone(),
            });
        }
    }

    map
}

fn build_type_cache(shape: &[FieldDescriptor]) -> FieldTypeCache {
    let types: HashMap<String, FieldType> = shape
        .iter()
        .filter(|f| !f.is_skipped())
        .map(|f| {
            (
                f.name.clone(),
                FieldType {
                    kind: f.kind.clone(),
                    policy: f.policy,
                },
            )
        })
        .collect();

    FieldTypeCache { types }
}
