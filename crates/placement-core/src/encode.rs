//! One-hot encoding of categorical columns.
//!
//! Each categorical column is replaced, in place, by one boolean indicator
//! column per category, named `<column>_<category>`. Categories are learned
//! from the data and kept as a [`CategoryVocabulary`] so tune and test
//! partitions are expanded into exactly the same indicator columns.

use std::collections::BTreeSet;

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, warn};

use placement_model::{ColumnKind, PrepError, RecordFrame, Result};

/// Sorted set of categories observed for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryVocabulary {
    pub column: String,
    pub categories: Vec<String>,
}

impl CategoryVocabulary {
    pub fn new<I, S>(column: impl Into<String>, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories: BTreeSet<String> = categories.into_iter().map(Into::into).collect();
        Self {
            column: column.into(),
            categories: categories.into_iter().collect(),
        }
    }

    pub fn indicator_name(&self, category: &str) -> String {
        format!("{}_{}", self.column, category)
    }

    pub fn indicator_names(&self) -> Vec<String> {
        self.categories
            .iter()
            .map(|category| self.indicator_name(category))
            .collect()
    }

    pub fn position(&self, category: &str) -> Option<usize> {
        self.categories
            .binary_search_by(|probe| probe.as_str().cmp(category))
            .ok()
    }
}

/// Fitted one-hot encoder: one vocabulary per categorical column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    pub vocabularies: Vec<CategoryVocabulary>,
}

impl OneHotEncoder {
    /// Learn the vocabulary of every column tagged categorical.
    ///
    /// # Errors
    ///
    /// [`PrepError::EmptyColumnSet`] when there is no categorical column, and
    /// [`PrepError::MissingValue`] for a null cell.
    pub fn fit(frame: &RecordFrame) -> Result<Self> {
        let names = frame.columns_of_kind(ColumnKind::Categorical);
        if names.is_empty() {
            return Err(PrepError::EmptyColumnSet {
                kind: ColumnKind::Categorical,
            });
        }
        let mut vocabularies = Vec::with_capacity(names.len());
        for name in names {
            let labels = category_labels(frame, &name)?;
            let vocabulary = CategoryVocabulary::new(name, labels);
            debug!(
                column = %vocabulary.column,
                categories = vocabulary.categories.len(),
                "fitted category vocabulary"
            );
            vocabularies.push(vocabulary);
        }
        Ok(Self { vocabularies })
    }

    /// Replace each fitted column with its indicator columns.
    ///
    /// # Errors
    ///
    /// [`PrepError::UnknownCategory`] for a value outside the fitted
    /// vocabulary, and [`PrepError::SchemaMismatch`] when an indicator name
    /// is already taken by another column.
    pub fn transform(&self, mut frame: RecordFrame) -> Result<RecordFrame> {
        let span = info_span!("encode", rows = frame.height(), columns = self.vocabularies.len());
        let _guard = span.enter();

        for vocabulary in &self.vocabularies {
            frame.column_of_kind(&vocabulary.column, ColumnKind::Categorical)?;
            let positions = category_labels(&frame, &vocabulary.column)?
                .into_iter()
                .map(|label| {
                    vocabulary
                        .position(&label)
                        .ok_or_else(|| PrepError::UnknownCategory {
                            column: vocabulary.column.clone(),
                            value: label,
                        })
                })
                .collect::<Result<Vec<usize>>>()?;

            let index = frame.column_index(&vocabulary.column)?;
            frame.drop_column(&vocabulary.column)?;
            for (offset, category) in vocabulary.categories.iter().enumerate() {
                let name = vocabulary.indicator_name(category);
                if frame.kind_of(&name).is_some() {
                    return Err(PrepError::SchemaMismatch {
                        message: format!(
                            "indicator for category '{category}' of column '{}' collides with an existing column",
                            vocabulary.column
                        ),
                        column: name,
                    });
                }
                let indicator: Vec<bool> = positions.iter().map(|&pos| pos == offset).collect();
                frame.insert_column(
                    index + offset,
                    Series::new(name.into(), indicator).into_column(),
                    ColumnKind::Boolean,
                )?;
            }
        }

        let leftover = frame.columns_of_kind(ColumnKind::Categorical);
        if !leftover.is_empty() {
            warn!(columns = ?leftover, "categorical columns without a fitted vocabulary");
        }
        Ok(frame)
    }

    pub fn fit_transform(frame: RecordFrame) -> Result<(Self, RecordFrame)> {
        let encoder = Self::fit(&frame)?;
        let frame = encoder.transform(frame)?;
        Ok((encoder, frame))
    }

    pub fn vocabulary(&self, column: &str) -> Option<&CategoryVocabulary> {
        self.vocabularies
            .iter()
            .find(|vocabulary| vocabulary.column == column)
    }

    /// Names of every indicator column this encoder produces.
    pub fn indicator_names(&self) -> Vec<String> {
        self.vocabularies
            .iter()
            .flat_map(CategoryVocabulary::indicator_names)
            .collect()
    }
}

/// Category labels of a column as text, one per row.
fn category_labels(frame: &RecordFrame, name: &str) -> Result<Vec<String>> {
    let text = frame.column(name)?.cast(&DataType::String)?;
    text.str()?
        .into_iter()
        .enumerate()
        .map(|(row, label)| {
            label
                .map(str::to_string)
                .ok_or_else(|| PrepError::MissingValue {
                    column: name.to_string(),
                    row,
                })
        })
        .collect()
}
