//! Configuration options for placement data preparation.

use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Result};

/// Where the normalizer and encoder learn their parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitScope {
    /// Split first, fit on the training partition, apply to all partitions.
    #[default]
    TrainingPartition,
    /// Fit on the full table before splitting.
    FullTable,
}

/// A free-text yes/no column and the two tokens it may hold.
///
/// Cells and tokens are both trimmed and lowercased before comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagColumn {
    pub column: String,
    pub true_token: String,
    pub false_token: String,
}

impl FlagColumn {
    pub fn new(
        column: impl Into<String>,
        true_token: impl Into<String>,
        false_token: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            true_token: true_token.into(),
            false_token: false_token.into(),
        }
    }

    /// Work experience: `yes` / `no`.
    pub fn work_experience() -> Self {
        Self::new("workex", "yes", "no")
    }

    /// Placement status: `placed` / `not placed`.
    pub fn placement_status() -> Self {
        Self::new("status", "placed", "not placed")
    }

    /// Map a raw cell to a boolean, or `None` when it is outside the vocabulary.
    pub fn parse(&self, raw: &str) -> Option<bool> {
        let normalized = raw.trim().to_lowercase();
        if normalized == self.true_token.trim().to_lowercase() {
            Some(true)
        } else if normalized == self.false_token.trim().to_lowercase() {
            Some(false)
        } else {
            None
        }
    }
}

/// Options for the stratified train/tune/test split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitOptions {
    /// Fraction of all rows assigned to training.
    pub train_fraction: f64,
    /// Fraction of the non-training remainder assigned to tuning; the rest is test.
    pub tune_fraction: f64,
    /// Fixed seed for reproducible splits. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            train_fraction: 0.7,
            tune_fraction: 0.5,
            seed: None,
        }
    }
}

impl SplitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_train_fraction(mut self, fraction: f64) -> Self {
        self.train_fraction = fraction;
        self
    }

    pub fn with_tune_fraction(mut self, fraction: f64) -> Self {
        self.tune_fraction = fraction;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Check both fractions lie strictly between 0 and 1.
    pub fn validate(&self) -> Result<()> {
        validate_fraction("train_fraction", self.train_fraction)?;
        validate_fraction("tune_fraction", self.tune_fraction)
    }
}

fn validate_fraction(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(PrepError::invalid_option(
            name,
            format!("{value} is not strictly between 0 and 1"),
        ))
    }
}

/// Options for the whole preparation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepOptions {
    /// Monetary outcome column; missing values become 0 and the column is
    /// dropped before modeling.
    pub salary_column: String,
    /// Free-text flag columns normalized to booleans by the cleaner.
    pub flag_columns: Vec<FlagColumn>,
    /// Cleaned placement-status column the target is derived from.
    pub status_column: String,
    /// Name of the derived boolean target.
    pub target_column: String,
    /// Nominal columns retagged as categorical.
    pub categorical_columns: Vec<String>,
    pub fit_scope: FitScope,
    pub split: SplitOptions,
}

impl Default for PrepOptions {
    fn default() -> Self {
        Self {
            salary_column: "salary".to_string(),
            flag_columns: vec![FlagColumn::work_experience(), FlagColumn::placement_status()],
            status_column: "status".to_string(),
            target_column: "placement".to_string(),
            categorical_columns: [
                "gender",
                "ssc_b",
                "hsc_b",
                "hsc_s",
                "degree_t",
                "specialisation",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            fit_scope: FitScope::default(),
            split: SplitOptions::default(),
        }
    }
}

impl PrepOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fit_scope(mut self, scope: FitScope) -> Self {
        self.fit_scope = scope;
        self
    }

    pub fn with_split(mut self, split: SplitOptions) -> Self {
        self.split = split;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.split.seed = Some(seed);
        self
    }

    pub fn with_categorical_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categorical_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_column.trim().is_empty() {
            return Err(PrepError::invalid_option(
                "target_column",
                "must not be empty",
            ));
        }
        self.split.validate()
    }
}
