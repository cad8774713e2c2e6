//! Common domain type definitions
//!
//! Categorical label values as they appear in the projection source. The
//! concrete encoding of a scenario or age-group label varies between data
//! vintages, so labels keep the type they were read with.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A categorical value read from a scenario or age-group column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelValue {
    /// Integer-typed label, e.g. scenario `1`
    Int(i64),
    /// String-typed label, e.g. `"SSP1"` or `"15-24"`
    Text(String),
}

impl LabelValue {
    /// Textual form, used for substring matching
    #[must_use]
    pub fn as_text(&self) -> String {
        self.to_string()
    }

    /// Whether this label is the integer `value`
    #[must_use]
    pub fn is_int(&self, value: i64) -> bool {
        matches!(self, Self::Int(n) if *n == value)
    }

    /// Whether this label is the string `value`
    #[must_use]
    pub fn is_text(&self, value: &str) -> bool {
        matches!(self, Self::Text(s) if s == value)
    }

    /// Representation that keeps the type visible: `1` vs `"1"`
    #[must_use]
    pub fn to_debug_string(&self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Text(s) => format!("{s:?}"),
        }
    }
}

impl fmt::Display for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for LabelValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for LabelValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for LabelValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
