//! Declared column layout of the input CSV.

use serde::{Deserialize, Serialize};

use placement_model::ColumnKind;

/// One declared input column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
    #[serde(default)]
    pub description: String,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, kind: ColumnKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
        }
    }
}

/// The columns an input file must provide, with their kind at load time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatasetSchema {
    pub columns: Vec<ColumnSpec>,
}

impl DatasetSchema {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    /// Layout of the campus placement dataset.
    ///
    /// Nominal columns load as `Text`; the type coercer retags them as
    /// categorical. `workex` and `status` are free text until cleaned.
    pub fn placement() -> Self {
        use ColumnKind::{Identifier, Numeric, Text};
        Self::new(vec![
            ColumnSpec::new("sl_no", Identifier, "Serial number"),
            ColumnSpec::new("gender", Text, "Gender"),
            ColumnSpec::new("ssc_p", Numeric, "Secondary education percentage"),
            ColumnSpec::new("ssc_b", Text, "Secondary education board"),
            ColumnSpec::new("hsc_p", Numeric, "Higher secondary percentage"),
            ColumnSpec::new("hsc_b", Text, "Higher secondary board"),
            ColumnSpec::new("hsc_s", Text, "Higher secondary stream"),
            ColumnSpec::new("degree_p", Numeric, "Degree percentage"),
            ColumnSpec::new("degree_t", Text, "Degree type"),
            ColumnSpec::new("workex", Text, "Work experience (yes/no)"),
            ColumnSpec::new("etest_p", Numeric, "Employability test percentage"),
            ColumnSpec::new("specialisation", Text, "MBA specialisation"),
            ColumnSpec::new("mba_p", Numeric, "MBA percentage"),
            ColumnSpec::new("status", Text, "Placement status (placed/not placed)"),
            ColumnSpec::new("salary", Numeric, "Salary offered; empty when not placed"),
        ])
    }

    pub fn with_column(mut self, spec: ColumnSpec) -> Self {
        self.columns.push(spec);
        self
    }

    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.columns
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.kind)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
