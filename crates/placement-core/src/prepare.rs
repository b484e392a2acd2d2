//! End-to-end preparation: pipeline, split, fitted artifacts.

use tracing::{info, info_span};

use placement_model::{FitScope, PrepError, PrepOptions, RecordFrame, Result};

use crate::encode::OneHotEncoder;
use crate::normalize::MinMaxScaler;
use crate::pipeline::{PipelineState, build_default_pipeline, build_fitting_pipeline};
use crate::split::split_partitions;
use crate::target::prevalence;

/// Output of [`prepare`].
#[derive(Debug, Clone)]
pub struct PreparedSplits {
    pub train: RecordFrame,
    pub tune: RecordFrame,
    pub test: RecordFrame,
    /// Share of positive targets over the whole table, before splitting.
    pub prevalence: f64,
    pub scaler: MinMaxScaler,
    pub encoder: OneHotEncoder,
    pub fit_scope: FitScope,
}

impl PreparedSplits {
    /// Partitions with their names, in train, tune, test order.
    pub fn partitions(&self) -> [(&'static str, &RecordFrame); 3] {
        [
            ("train", &self.train),
            ("tune", &self.tune),
            ("test", &self.test),
        ]
    }
}

/// Run every stage on a loaded frame.
///
/// With [`FitScope::TrainingPartition`] the normalizer and encoder are fitted
/// on the training partition only and replayed on tune and test. With
/// [`FitScope::FullTable`] they are fitted on the whole table before the
/// split.
pub fn prepare(frame: RecordFrame, options: &PrepOptions) -> Result<PreparedSplits> {
    let span = info_span!(
        "prepare",
        rows = frame.height(),
        fit_scope = ?options.fit_scope
    );
    let _guard = span.enter();

    options.validate()?;
    let mut state = PipelineState::new();
    let table = build_default_pipeline(options).execute_with_state(frame, &mut state)?;
    let prevalence = prevalence(&table, &options.target_column)?;
    let splits = split_partitions(&table, &options.target_column, &options.split)?;

    let (train, tune, test) = match options.fit_scope {
        FitScope::FullTable => (splits.train, splits.tune, splits.test),
        FitScope::TrainingPartition => {
            let fitting = build_fitting_pipeline();
            let train = fitting.execute_with_state(splits.train, &mut state)?;
            let tune = fitting.execute_with_state(splits.tune, &mut state)?;
            let test = fitting.execute_with_state(splits.test, &mut state)?;
            (train, tune, test)
        }
    };

    let scaler = state.scaler.ok_or_else(|| not_fitted("scaler"))?;
    let encoder = state.encoder.ok_or_else(|| not_fitted("encoder"))?;
    info!(
        train = train.height(),
        tune = tune.height(),
        test = test.height(),
        columns = train.width(),
        prevalence,
        "preparation complete"
    );
    Ok(PreparedSplits {
        train,
        tune,
        test,
        prevalence,
        scaler,
        encoder,
        fit_scope: options.fit_scope,
    })
}

fn not_fitted(artifact: &str) -> PrepError {
    PrepError::invalid_option(
        "pipeline",
        format!("no {artifact} was fitted; the pipeline must include its step"),
    )
}
