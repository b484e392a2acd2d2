//! Min-max scaling of numeric columns.
//!
//! Fitting records each numeric column's observed minimum and maximum so the
//! same scaling can be replayed on partitions that were not part of the fit.
//! A constant column has no range to scale by; its values all map to `0.0`.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use placement_model::{ColumnKind, PrepError, RecordFrame, Result};

/// Fitted bounds for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxParams {
    pub column: String,
    pub min: f64,
    pub max: f64,
}

impl MinMaxParams {
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_constant(&self) -> bool {
        self.range() <= 0.0
    }

    /// Scale a single value with these bounds.
    pub fn scale(&self, value: f64) -> f64 {
        if self.is_constant() {
            0.0
        } else {
            (value - self.min) / self.range()
        }
    }

    fn expr(&self) -> Expr {
        let value = col(self.column.as_str()).cast(DataType::Float64);
        let scaled = if self.is_constant() {
            // null stays null
            value * lit(0.0)
        } else {
            (value - lit(self.min)) / lit(self.range())
        };
        scaled.alias(self.column.as_str())
    }
}

/// Per-column min-max scaler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub columns: Vec<MinMaxParams>,
}

impl MinMaxScaler {
    /// Learn bounds for every column tagged numeric.
    ///
    /// Nulls and NaN do not take part in the bounds. A column with no values
    /// at all is fitted as constant.
    ///
    /// # Errors
    ///
    /// [`PrepError::EmptyColumnSet`] when the frame has no numeric column.
    pub fn fit(frame: &RecordFrame) -> Result<Self> {
        let names = frame.columns_of_kind(ColumnKind::Numeric);
        if names.is_empty() {
            return Err(PrepError::EmptyColumnSet {
                kind: ColumnKind::Numeric,
            });
        }
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let cast = frame.column(&name)?.cast(&DataType::Float64)?;
            let mut bounds: Option<(f64, f64)> = None;
            for value in cast.f64()?.into_iter().flatten() {
                if value.is_nan() {
                    continue;
                }
                bounds = Some(match bounds {
                    Some((min, max)) => (min.min(value), max.max(value)),
                    None => (value, value),
                });
            }
            let (min, max) = bounds.unwrap_or((0.0, 0.0));
            debug!(column = %name, min, max, "fitted min-max bounds");
            columns.push(MinMaxParams {
                column: name,
                min,
                max,
            });
        }
        Ok(Self { columns })
    }

    /// Apply the fitted bounds.
    ///
    /// Values outside the fitted range scale outside `[0, 1]`; they are not
    /// clipped.
    pub fn transform(&self, frame: RecordFrame) -> Result<RecordFrame> {
        let span = info_span!("normalize", rows = frame.height(), columns = self.columns.len());
        let _guard = span.enter();

        for params in &self.columns {
            frame.column_of_kind(&params.column, ColumnKind::Numeric)?;
        }
        let (data, schema) = frame.into_parts();
        let exprs: Vec<Expr> = self.columns.iter().map(MinMaxParams::expr).collect();
        let data = data.lazy().with_columns(exprs).collect()?;
        RecordFrame::new(data, schema)
    }

    pub fn fit_transform(frame: RecordFrame) -> Result<(Self, RecordFrame)> {
        let scaler = Self::fit(&frame)?;
        let frame = scaler.transform(frame)?;
        Ok((scaler, frame))
    }

    pub fn params(&self, column: &str) -> Option<&MinMaxParams> {
        self.columns.iter().find(|params| params.column == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_handles_constant_bounds() {
        let params = MinMaxParams {
            column: "etest_p".to_string(),
            min: 50.0,
            max: 50.0,
        };
        assert!(params.is_constant());
        assert_eq!(params.scale(50.0), 0.0);

        let params = MinMaxParams {
            column: "etest_p".to_string(),
            min: 50.0,
            max: 100.0,
        };
        assert_eq!(params.scale(75.0), 0.5);
        assert_eq!(params.scale(40.0), -0.2);
    }
}
