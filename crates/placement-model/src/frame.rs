use std::collections::BTreeMap;

use polars::prelude::*;

use crate::error::{PrepError, Result};
use crate::kind::ColumnKind;

/// Declared kind of every column in a [`RecordFrame`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSchema {
    kinds: BTreeMap<String, ColumnKind>,
}

impl FrameSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column declaration.
    pub fn with_column(mut self, name: impl Into<String>, kind: ColumnKind) -> Self {
        self.kinds.insert(name.into(), kind);
        self
    }

    /// Declare or redeclare a column, returning the previous kind.
    pub fn insert(&mut self, name: impl Into<String>, kind: ColumnKind) -> Option<ColumnKind> {
        self.kinds.insert(name.into(), kind)
    }

    pub fn remove(&mut self, name: &str) -> Option<ColumnKind> {
        self.kinds.remove(name)
    }

    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.kinds.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnKind)> {
        self.kinds.iter().map(|(name, kind)| (name.as_str(), *kind))
    }
}

impl<S: Into<String>> FromIterator<(S, ColumnKind)> for FrameSchema {
    fn from_iter<I: IntoIterator<Item = (S, ColumnKind)>>(iter: I) -> Self {
        Self {
            kinds: iter
                .into_iter()
                .map(|(name, kind)| (name.into(), kind))
                .collect(),
        }
    }
}

/// An in-memory table of student records with a declared kind per column.
///
/// The data and the schema always name the same set of columns. Every
/// mutating method keeps both in step, so a stage can never leave a column
/// without a kind or a kind without a column.
#[derive(Debug, Clone)]
pub struct RecordFrame {
    data: DataFrame,
    schema: FrameSchema,
}

impl RecordFrame {
    /// Pair a DataFrame with its schema.
    ///
    /// # Errors
    ///
    /// Returns [`PrepError::SchemaMismatch`] when a data column has no declared
    /// kind or a declared column has no data.
    pub fn new(data: DataFrame, schema: FrameSchema) -> Result<Self> {
        for name in data.get_column_names() {
            if !schema.contains(name.as_str()) {
                return Err(PrepError::SchemaMismatch {
                    column: name.to_string(),
                    message: "column has no declared kind".to_string(),
                });
            }
        }
        for (name, _) in schema.iter() {
            if data.get_column_index(name).is_none() {
                return Err(PrepError::SchemaMismatch {
                    column: name.to_string(),
                    message: "declared column has no data".to_string(),
                });
            }
        }
        Ok(Self { data, schema })
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn schema(&self) -> &FrameSchema {
        &self.schema
    }

    pub fn into_parts(self) -> (DataFrame, FrameSchema) {
        (self.data, self.schema)
    }

    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn width(&self) -> usize {
        self.data.width()
    }

    /// Column names in data order.
    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.schema.kind_of(name)
    }

    /// Names of all columns declared with `kind`, in data order.
    pub fn columns_of_kind(&self, kind: ColumnKind) -> Vec<String> {
        self.column_names()
            .into_iter()
            .filter(|name| self.schema.kind_of(name) == Some(kind))
            .collect()
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.data
            .column(name)
            .map_err(|_| PrepError::missing_column(name))
    }

    /// Look up a column and check its declared kind.
    pub fn column_of_kind(&self, name: &str, expected: ColumnKind) -> Result<&Column> {
        let column = self.column(name)?;
        let actual = self
            .schema
            .kind_of(name)
            .ok_or_else(|| PrepError::missing_column(name))?;
        if actual != expected {
            return Err(PrepError::ColumnType {
                column: name.to_string(),
                expected,
                actual,
            });
        }
        Ok(column)
    }

    /// Change a column's declared kind without touching its values.
    pub fn retag(&mut self, name: &str, kind: ColumnKind) -> Result<()> {
        if !self.schema.contains(name) {
            return Err(PrepError::missing_column(name));
        }
        self.schema.insert(name, kind);
        Ok(())
    }

    /// Replace an existing column's values and kind.
    pub fn replace_column(&mut self, column: Column, kind: ColumnKind) -> Result<()> {
        let name = column.name().to_string();
        if !self.schema.contains(&name) {
            return Err(PrepError::missing_column(name));
        }
        self.data.with_column(column)?;
        self.schema.insert(name, kind);
        Ok(())
    }

    /// Append a new column.
    pub fn push_column(&mut self, column: Column, kind: ColumnKind) -> Result<()> {
        let index = self.width();
        self.insert_column(index, column, kind)
    }

    /// Insert a new column at `index`.
    pub fn insert_column(&mut self, index: usize, column: Column, kind: ColumnKind) -> Result<()> {
        let name = column.name().to_string();
        if self.schema.contains(&name) {
            return Err(PrepError::SchemaMismatch {
                column: name,
                message: "column already exists".to_string(),
            });
        }
        self.data.insert_column(index, column)?;
        self.schema.insert(name, kind);
        Ok(())
    }

    /// Remove a column, returning its values.
    pub fn drop_column(&mut self, name: &str) -> Result<Column> {
        if !self.schema.contains(name) {
            return Err(PrepError::missing_column(name));
        }
        let column = self.data.drop_in_place(name)?;
        self.schema.remove(name);
        Ok(column)
    }

    /// Position of a column in data order.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.data
            .get_column_index(name)
            .ok_or_else(|| PrepError::missing_column(name))
    }

    /// Build a new frame holding the rows at `indices`, in that order.
    pub fn take_rows(&self, indices: &[usize]) -> Result<Self> {
        let idx = IdxCa::from_vec(
            "idx".into(),
            indices.iter().map(|&i| i as IdxSize).collect(),
        );
        let data = self.data.take(&idx)?;
        Ok(Self {
            data,
            schema: self.schema.clone(),
        })
    }

    /// Values of a boolean column.
    ///
    /// # Errors
    ///
    /// Fails when the column is absent, not declared boolean, or holds a null.
    pub fn bool_values(&self, name: &str) -> Result<Vec<bool>> {
        let column = self.column_of_kind(name, ColumnKind::Boolean)?;
        let values = column.bool()?;
        values
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                value.ok_or_else(|| PrepError::MissingValue {
                    column: name.to_string(),
                    row,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordFrame {
        let data = DataFrame::new(vec![
            Series::new("sl_no".into(), &["1", "2", "3"]).into_column(),
            Series::new("mba_p".into(), &[58.8, 66.28, 57.8]).into_column(),
            Series::new("status".into(), &[true, false, true]).into_column(),
        ])
        .unwrap();
        let schema = FrameSchema::new()
            .with_column("sl_no", ColumnKind::Identifier)
            .with_column("mba_p", ColumnKind::Numeric)
            .with_column("status", ColumnKind::Boolean);
        RecordFrame::new(data, schema).unwrap()
    }

    #[test]
    fn rejects_undeclared_columns() {
        let data = DataFrame::new(vec![
            Series::new("a".into(), &[1.0, 2.0]).into_column(),
            Series::new("b".into(), &[1.0, 2.0]).into_column(),
        ])
        .unwrap();
        let schema = FrameSchema::new().with_column("a", ColumnKind::Numeric);
        let err = RecordFrame::new(data, schema).unwrap_err();
        assert!(matches!(err, PrepError::SchemaMismatch { column, .. } if column == "b"));
    }

    #[test]
    fn rejects_declared_columns_without_data() {
        let data = DataFrame::new(vec![Series::new("a".into(), &[1.0]).into_column()]).unwrap();
        let schema = FrameSchema::new()
            .with_column("a", ColumnKind::Numeric)
            .with_column("z", ColumnKind::Text);
        assert!(RecordFrame::new(data, schema).is_err());
    }

    #[test]
    fn selects_columns_by_kind_in_data_order() {
        let frame = sample();
        assert_eq!(frame.columns_of_kind(ColumnKind::Numeric), vec!["mba_p"]);
        assert_eq!(frame.columns_of_kind(ColumnKind::Boolean), vec!["status"]);
        assert!(frame.columns_of_kind(ColumnKind::Categorical).is_empty());
    }

    #[test]
    fn retag_requires_existing_column() {
        let mut frame = sample();
        frame.retag("sl_no", ColumnKind::Text).unwrap();
        assert_eq!(frame.kind_of("sl_no"), Some(ColumnKind::Text));
        assert!(matches!(
            frame.retag("gender", ColumnKind::Categorical),
            Err(PrepError::MissingColumn { .. })
        ));
    }

    #[test]
    fn column_of_kind_reports_type_mismatch() {
        let frame = sample();
        let err = frame
            .column_of_kind("mba_p", ColumnKind::Boolean)
            .unwrap_err();
        assert!(matches!(
            err,
            PrepError::ColumnType {
                expected: ColumnKind::Boolean,
                actual: ColumnKind::Numeric,
                ..
            }
        ));
    }

    #[test]
    fn drop_and_insert_keep_schema_in_step() {
        let mut frame = sample();
        let dropped = frame.drop_column("mba_p").unwrap();
        assert_eq!(dropped.len(), 3);
        assert_eq!(frame.column_names(), vec!["sl_no", "status"]);
        assert!(frame.kind_of("mba_p").is_none());

        frame
            .insert_column(1, dropped, ColumnKind::Numeric)
            .unwrap();
        assert_eq!(frame.column_names(), vec!["sl_no", "mba_p", "status"]);
        assert_eq!(frame.kind_of("mba_p"), Some(ColumnKind::Numeric));
    }

    #[test]
    fn take_rows_returns_independent_copy() {
        let frame = sample();
        let mut subset = frame.take_rows(&[2, 0]).unwrap();
        assert_eq!(subset.height(), 2);
        assert_eq!(subset.bool_values("status").unwrap(), vec![true, true]);

        subset.drop_column("status").unwrap();
        assert_eq!(frame.width(), 3);
        assert_eq!(frame.bool_values("status").unwrap(), vec![true, false, true]);
    }

    #[test]
    fn bool_values_rejects_nulls() {
        let data = DataFrame::new(vec![
            Series::new("placement".into(), &[Some(true), None]).into_column(),
        ])
        .unwrap();
        let schema = FrameSchema::new().with_column("placement", ColumnKind::Boolean);
        let frame = RecordFrame::new(data, schema).unwrap();
        assert!(matches!(
            frame.bool_values("placement"),
            Err(PrepError::MissingValue { row: 1, .. })
        ));
    }
}
