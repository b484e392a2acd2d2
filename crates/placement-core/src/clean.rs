//! Missing-value handling and flag normalization.
//!
//! The monetary outcome column is only defined for placed students, so a
//! missing salary means "not applicable" and is filled with zero rather than
//! imputed. Free-text yes/no flags are mapped onto booleans through a fixed
//! vocabulary; anything outside it is an error, never a silent coercion.

use polars::prelude::*;
use tracing::{debug, info_span};

use placement_model::{ColumnKind, FlagColumn, PrepError, RecordFrame, Result};

/// Fill missing salary values and normalize every flag column.
pub fn clean(frame: RecordFrame, salary_column: &str, flags: &[FlagColumn]) -> Result<RecordFrame> {
    let span = info_span!("clean", rows = frame.height());
    let _guard = span.enter();

    let mut frame = fill_missing_with_zero(frame, salary_column)?;
    for flag in flags {
        frame = normalize_flag(frame, flag)?;
    }
    Ok(frame)
}

/// Replace null and NaN values of a numeric column with `0.0`.
pub fn fill_missing_with_zero(mut frame: RecordFrame, column: &str) -> Result<RecordFrame> {
    let mut filled = 0usize;
    let values: Vec<f64> = {
        let source = frame.column_of_kind(column, ColumnKind::Numeric)?;
        let cast = source.cast(&DataType::Float64)?;
        cast.f64()?
            .into_iter()
            .map(|value| match value {
                Some(v) if !v.is_nan() => v,
                _ => {
                    filled += 1;
                    0.0
                }
            })
            .collect()
    };
    frame.replace_column(
        Series::new(column.into(), values).into_column(),
        ColumnKind::Numeric,
    )?;
    debug!(column, filled, "filled missing values with zero");
    Ok(frame)
}

/// Map a free-text flag column onto booleans and retag it `Boolean`.
///
/// # Errors
///
/// [`PrepError::UnrecognizedCategory`] for a value outside the flag's
/// vocabulary, including an empty cell.
pub fn normalize_flag(mut frame: RecordFrame, flag: &FlagColumn) -> Result<RecordFrame> {
    let values: Vec<bool> = {
        let source = frame.column_of_kind(&flag.column, ColumnKind::Text)?;
        let text = source.str()?;
        let mut values = Vec::with_capacity(text.len());
        for raw in text.into_iter() {
            let raw = raw.unwrap_or("");
            let value = flag
                .parse(raw)
                .ok_or_else(|| PrepError::UnrecognizedCategory {
                    column: flag.column.clone(),
                    value: raw.to_string(),
                })?;
            values.push(value);
        }
        values
    };
    let positives = values.iter().filter(|value| **value).count();
    frame.replace_column(
        Series::new(flag.column.as_str().into(), values).into_column(),
        ColumnKind::Boolean,
    )?;
    debug!(column = %flag.column, positives, "normalized flag column");
    Ok(frame)
}
