//! Field descriptor, kind and value types

use crate::coerce::CoercionPolicy;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tags starting with this marker exclude the field from decoding
pub const SKIP_MARKER: char = '-';

// ============================================================================
// Kind
// ============================================================================

/// Declared kind of a destination field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Kind {
    #[default]
    String,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Bool,
    /// Calendar date in the `YYYY/M/D` layout
    Date,
    /// Any other declared type; decoded verbatim like `String`
    Other(String),
}

impl Kind {
    /// Map a declared type name to a kind.
    ///
    /// Accepts Rust primitive names (`i32`, `f64`), width-suffixed names
    /// (`int32`, `float64`) and a few date type names (`NaiveDate`,
    /// `time.Time`, `date`). Anything else becomes [`Kind::Other`].
    pub fn from_type_name(name: &str) -> Self {
        let normalized = name.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "string" | "str" | "&str" => Kind::String,
            "i8" | "int8" => Kind::Int8,
            "i16" | "int16" => Kind::Int16,
            "i32" | "int32" => Kind::Int32,
            "i64" | "int64" | "int" | "integer" | "isize" => Kind::Int64,
            "f32" | "float32" => Kind::Float32,
            "f64" | "float64" | "float" | "double" | "number" => Kind::Float64,
            "bool" | "boolean" => Kind::Bool,
            "date" | "time.time" => Kind::Date,
            n if n.ends_with("naivedate") => Kind::Date,
            _ => Kind::Other(name.trim().to_string()),
        }
    }

    /// Whether values of this kind are signed integers
    pub fn is_integer(&self) -> bool {
        matches!(self, Kind::Int8 | Kind::Int16 | Kind::Int32 | Kind::Int64)
    }

    /// Whether values of this kind are floating point
    pub fn is_float(&self) -> bool {
        matches!(self, Kind::Float32 | Kind::Float64)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::String => write!(f, "string"),
            Kind::Int8 => write!(f, "int8"),
            Kind::Int16 => write!(f, "int16"),
            Kind::Int32 => write!(f, "int32"),
            Kind::Int64 => write!(f, "int64"),
            Kind::Float32 => write!(f, "float32"),
            Kind::Float64 => write!(f, "float64"),
            Kind::Bool => write!(f, "bool"),
            Kind::Date => write!(f, "date"),
            Kind::Other(name) => write!(f, "{name}"),
        }
    }
}

impl From<String> for Kind {
    fn from(name: String) -> Self {
        Kind::from_type_name(&name)
    }
}

impl From<&str> for Kind {
    fn from(name: &str) -> Self {
        Kind::from_type_name(name)
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        kind.to_string()
    }
}

// ============================================================================
// Field Descriptor
// ============================================================================

/// Description of one destination field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Declared field name
    pub name: String,

    /// Declared kind
    #[serde(rename = "type", default)]
    pub kind: Kind,

    /// Raw tag: a column name override, or a skip marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Coercion policy for this field (defaults to the decoder's)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<CoercionPolicy>,
}

impl FieldDescriptor {
    /// Create an untagged field
    pub fn new(name: impl Into<String>, kind: impl Into<Kind>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            tag: None,
            policy: None,
        }
    }

    /// Bind this field to an explicitly named column
    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.tag = Some(column.into());
        self
    }

    /// Exclude this field from decoding
    #[must_use]
    pub fn skip(mut self) -> Self {
        self.tag = Some(SKIP_MARKER.to_string());
        self
    }

    /// Override the coercion policy for this field
    #[must_use]
    pub fn with_policy(mut self, policy: CoercionPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Whether the tag marks this field as skipped
    pub fn is_skipped(&self) -> bool {
        self.tag
            .as_deref()
            .is_some_and(|tag| tag.starts_with(SKIP_MARKER))
    }

    /// The explicit column override, if any. Empty tags count as absent.
    pub fn override_column(&self) -> Option<&str> {
        match self.tag.as_deref() {
            Some(tag) if !tag.is_empty() && !tag.starts_with(SKIP_MARKER) => Some(tag),
            _ => None,
        }
    }
}

// ============================================================================
// Value
// ============================================================================

/// A coerced cell value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Bool(bool),
    /// `None` is the unset date
    Date(Option<NaiveDate>),
}

impl Value {
    /// The zero value for a kind
    pub fn zero(kind: &Kind) -> Self {
        match kind {
            Kind::String | Kind::Other(_) => Value::String(String::new()),
            Kind::Int8 => Value::Int8(0),
            Kind::Int16 => Value::Int16(0),
            Kind::Int32 => Value::Int32(0),
            Kind::Int64 => Value::Int64(0),
            Kind::Float32 => Value::Float32(0.0),
            Kind::Float64 => Value::Float64(0.0),
            Kind::Bool => Value::Bool(false),
            Kind::Date => Value::Date(None),
        }
    }

    /// Name of the kind this value carries
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Int8(_) => "int8",
            Value::Int16(_) => "int16",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::Bool(_) => "bool",
            Value::Date(_) => "date",
        }
    }

    /// Whether this value can be stored in a field of `kind`
    pub fn fits(&self, kind: &Kind) -> bool {
        matches!(
            (self, kind),
            (Value::String(_), Kind::String | Kind::Other(_))
                | (Value::Int8(_), Kind::Int8)
                | (Value::Int16(_), Kind::Int16)
                | (Value::Int32(_), Kind::Int32)
                | (Value::Int64(_), Kind::Int64)
                | (Value::Float32(_), Kind::Float32)
                | (Value::Float64(_), Kind::Float64)
                | (Value::Bool(_), Kind::Bool)
                | (Value::Date(_), Kind::Date)
        )
    }

    /// Extract a typed value for `field`, failing with a type mismatch
    pub fn into_typed<T: FromValue>(self, field: &str) -> Result<T> {
        let actual = self.kind_name();
        T::from_value(self).ok_or_else(|| Error::type_mismatch(field, T::EXPECTED, actual))
    }
}

/// Conversion from a coerced [`Value`] into a concrete field type
pub trait FromValue: Sized {
    /// Kind name reported in type mismatch errors
    const EXPECTED: &'static str;

    /// Convert, or `None` when the value carries a different kind
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! impl_from_value {
    ($ty:ty, $variant:ident, $expected:literal) => {
        impl FromValue for $ty {
            const EXPECTED: &'static str = $expected;

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_from_value!(String, String, "string");
impl_from_value!(i8, Int8, "int8");
impl_from_value!(i16, Int16, "int16");
impl_from_value!(i32, Int32, "int32");
impl_from_value!(i64, Int64, "int64");
impl_from_value!(f32, Float32, "float32");
impl_from_value!(f64, Float64, "float64");
impl_from_value!(bool, Bool, "bool");
impl_from_value!(Option<NaiveDate>, Date, "date");

// ============================================================================
// Record
// ============================================================================

/// A destination record type
///
/// Implementations describe their fields once per decoding session and
/// accept coerced values by field name.
///
/// ```
/// use csvbind::schema::{FieldDescriptor, Kind, Record, Value};
///
/// #[derive(Default)]
/// struct Person {
///     name: String,
///     age: i64,
/// }
///
/// impl Record for Person {
///     fn describe(&self) -> Vec<FieldDescriptor> {
///         vec![
///             FieldDescriptor::new("Name", Kind::String),
///             FieldDescriptor::new("Age", Kind::Int64),
///         ]
///     }
///
///     fn assign(&mut self, field: &str, value: Value) -> csvbind::Result<()> {
///         match field {
///             "Name" => self.name = value.into_typed(field)?,
///             "Age" => self.age = value.into_typed(field)?,
///             _ => return Err(csvbind::Error::unknown_field(field)),
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Record {
    /// Ordered field descriptors, in declaration order
    fn describe(&self) -> Vec<FieldDescriptor>;

    /// Store a coerced value into the named field
    fn assign(&mut self, field: &str, value: Value) -> Result<()>;
}
