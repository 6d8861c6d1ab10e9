//! Coercion policy, boolean rules and errors

use crate::schema::Kind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// What to do with a cell that does not parse as its field's kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoercionPolicy {
    /// Degrade to the kind's zero value (default)
    #[default]
    Lenient,
    /// Fail the whole record
    Strict,
}

/// Why a cell could not be coerced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoerceError {
    #[error("invalid integer: {0}")]
    Int(#[from] std::num::ParseIntError),

    #[error("invalid float: {0}")]
    Float(#[from] std::num::ParseFloatError),

    #[error("invalid date: {0}")]
    Date(#[from] chrono::ParseError),

    #[error("{value} is out of range for {kind}")]
    OutOfRange { value: i64, kind: Kind },
}

/// Interpretation of a raw cell as a boolean
///
/// The default rule treats any non-empty string as `true`.
#[derive(Clone)]
pub struct BoolRule(Arc<dyn Fn(&str) -> bool + Send + Sync>);

impl BoolRule {
    /// Wrap a custom interpretation
    pub fn new(rule: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(rule))
    }

    /// Non-empty means `true`
    pub fn non_empty() -> Self {
        Self::new(|raw| !raw.is_empty())
    }

    /// `true` only for the given values, compared case-insensitively
    pub fn one_of<I, S>(truthy: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: HashSet<String> = truthy
            .into_iter()
            .map(|s| s.as_ref().to_lowercase())
            .collect();
        Self::new(move |raw| set.contains(&raw.to_lowercase()))
    }

    /// Apply the rule to a raw cell
    pub fn apply(&self, raw: &str) -> bool {
        (self.0)(raw)
    }
}

impl Default for BoolRule {
    fn default() -> Self {
        Self::non_empty()
    }
}

impl std::fmt::Debug for BoolRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BoolRule(..)")
    }
}
