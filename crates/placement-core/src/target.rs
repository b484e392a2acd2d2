//! Target derivation and class prevalence.

use polars::prelude::*;
use tracing::{info, info_span};

use placement_model::{ColumnKind, PrepError, RecordFrame, Result};

/// Add the boolean `target` column from the cleaned status column, then drop
/// the status and salary columns.
///
/// Salary is only known for placed students, so leaving it in would leak the
/// target into the features.
///
/// # Errors
///
/// [`PrepError::MissingColumn`] when either source column is absent,
/// [`PrepError::ColumnType`] when status has not been normalized to booleans,
/// and [`PrepError::SchemaMismatch`] when `target` would overwrite a column
/// other than status or salary.
pub fn derive_target(
    mut frame: RecordFrame,
    status_column: &str,
    salary_column: &str,
    target_column: &str,
) -> Result<RecordFrame> {
    let span = info_span!("derive_target", rows = frame.height());
    let _guard = span.enter();

    frame.column(status_column)?;
    frame.column(salary_column)?;
    let labels = frame.bool_values(status_column)?;

    frame.drop_column(status_column)?;
    if salary_column != status_column {
        frame.drop_column(salary_column)?;
    }
    if frame.kind_of(target_column).is_some() {
        return Err(PrepError::SchemaMismatch {
            column: target_column.to_string(),
            message: "column already exists".to_string(),
        });
    }
    let positives = labels.iter().filter(|label| **label).count();
    frame.push_column(
        Series::new(target_column.into(), labels).into_column(),
        ColumnKind::Boolean,
    )?;
    info!(
        target = target_column,
        positives,
        columns = frame.width(),
        "derived target"
    );
    Ok(frame)
}

/// Fraction of rows whose target is true.
///
/// # Errors
///
/// [`PrepError::InsufficientData`] for a frame with no rows.
pub fn prevalence(frame: &RecordFrame, target_column: &str) -> Result<f64> {
    let labels = frame.bool_values(target_column)?;
    if labels.is_empty() {
        return Err(PrepError::InsufficientData {
            context: "prevalence".to_string(),
            available: 0,
            required: 1,
        });
    }
    let positives = labels.iter().filter(|label| **label).count();
    Ok(positives as f64 / labels.len() as f64)
}
