//! Schema annotation of nominal columns.

use tracing::debug;

use placement_model::{ColumnKind, RecordFrame, Result};

/// Retag the named columns as [`ColumnKind::Categorical`].
///
/// Values are untouched; only the declared kind changes, which is what the
/// normalizer and encoder select on. Columns not named keep their kind.
pub fn coerce_categorical<S: AsRef<str>>(mut frame: RecordFrame, columns: &[S]) -> Result<RecordFrame> {
    for name in columns {
        let name = name.as_ref();
        frame.retag(name, ColumnKind::Categorical)?;
        debug!(column = name, "tagged categorical");
    }
    Ok(frame)
}
