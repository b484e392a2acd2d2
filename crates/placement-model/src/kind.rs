use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared kind of a frame column.
///
/// Stages select columns by kind rather than by name, so retagging a column
/// (for example `Text` to `Categorical`) changes which later stages touch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Row identity; carried through unchanged.
    Identifier,
    Numeric,
    /// Nominal category, expanded into indicator columns by the encoder.
    Categorical,
    Boolean,
    /// Raw, uninterpreted text.
    Text,
}

impl ColumnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
            Self::Boolean => "boolean",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
