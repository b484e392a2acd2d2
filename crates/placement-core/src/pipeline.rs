//! Ordered step execution over a record frame.
//!
//! Each stage implements [`ProcessingStep`]. A step takes the frame by value
//! and returns the next frame, so no stage can observe another's partial
//! output. Fitted artifacts travel in [`PipelineState`].
//!
//! # Default order
//!
//! 1. **CleanStep** - fill missing salary, normalize flag columns
//! 2. **CoerceStep** - tag nominal columns categorical
//! 3. **NormalizeStep** - min-max scale numeric columns (full-table fit only)
//! 4. **EncodeStep** - one-hot encode categorical columns (full-table fit only)
//! 5. **DeriveTargetStep** - add the target, drop status and salary
//!
//! # Example
//!
//! ```ignore
//! use placement_core::pipeline::build_default_pipeline;
//!
//! let pipeline = build_default_pipeline(&options);
//! let frame = pipeline.execute(frame)?;
//! ```

use tracing::{info, info_span};

use placement_model::{FitScope, FlagColumn, PrepOptions, RecordFrame, Result};

use crate::clean::clean;
use crate::coerce::coerce_categorical;
use crate::encode::OneHotEncoder;
use crate::normalize::MinMaxScaler;
use crate::target::derive_target;

/// A single stage of the preparation pipeline.
pub trait ProcessingStep: Send + Sync {
    /// Run this step and return the resulting frame.
    fn execute(&self, frame: RecordFrame, state: &mut PipelineState) -> Result<RecordFrame>;

    /// Name used for logging and for [`FramePipeline::remove_step`].
    fn step_name(&self) -> &str;
}

/// State shared across steps.
#[derive(Debug, Clone, Default)]
pub struct PipelineState {
    /// Scaler fitted by [`NormalizeStep`], reused on later runs.
    pub scaler: Option<MinMaxScaler>,
    /// Encoder fitted by [`EncodeStep`], reused on later runs.
    pub encoder: Option<OneHotEncoder>,
    /// Step execution log.
    pub executed_steps: Vec<String>,
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scaler(mut self, scaler: MinMaxScaler) -> Self {
        self.scaler = Some(scaler);
        self
    }

    pub fn with_encoder(mut self, encoder: OneHotEncoder) -> Self {
        self.encoder = Some(encoder);
        self
    }
}

/// An ordered list of processing steps.
#[derive(Default)]
pub struct FramePipeline {
    steps: Vec<Box<dyn ProcessingStep>>,
}

impl FramePipeline {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Add a step to the end of the pipeline.
    pub fn add_step(mut self, step: Box<dyn ProcessingStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Insert a step at a specific position.
    pub fn insert_step(mut self, index: usize, step: Box<dyn ProcessingStep>) -> Self {
        self.steps.insert(index, step);
        self
    }

    /// Remove a step by name.
    pub fn remove_step(mut self, step_name: &str) -> Self {
        self.steps.retain(|s| s.step_name() != step_name);
        self
    }

    /// Execute all steps with a fresh state.
    pub fn execute(&self, frame: RecordFrame) -> Result<RecordFrame> {
        let mut state = PipelineState::new();
        self.execute_with_state(frame, &mut state)
    }

    /// Execute all steps with the provided state.
    pub fn execute_with_state(
        &self,
        mut frame: RecordFrame,
        state: &mut PipelineState,
    ) -> Result<RecordFrame> {
        for step in &self.steps {
            let span = info_span!("step", step = step.step_name());
            let _guard = span.enter();
            frame = step.execute(frame, state)?;
            state.executed_steps.push(step.step_name().to_string());
            info!(
                step = step.step_name(),
                rows = frame.height(),
                columns = frame.width(),
                "step complete"
            );
        }
        Ok(frame)
    }

    /// Step names in execution order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.step_name()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

// ============================================================================
// Standard Processing Steps
// ============================================================================

/// Fill missing salary values and normalize flag columns.
pub struct CleanStep {
    pub salary_column: String,
    pub flags: Vec<FlagColumn>,
}

impl ProcessingStep for CleanStep {
    fn execute(&self, frame: RecordFrame, _state: &mut PipelineState) -> Result<RecordFrame> {
        clean(frame, &self.salary_column, &self.flags)
    }

    fn step_name(&self) -> &str {
        "clean"
    }
}

/// Tag nominal columns categorical.
pub struct CoerceStep {
    pub columns: Vec<String>,
}

impl ProcessingStep for CoerceStep {
    fn execute(&self, frame: RecordFrame, _state: &mut PipelineState) -> Result<RecordFrame> {
        coerce_categorical(frame, &self.columns)
    }

    fn step_name(&self) -> &str {
        "coerce_categorical"
    }
}

/// Min-max scale numeric columns.
///
/// Fits a scaler when the state holds none, otherwise applies the stored one.
pub struct NormalizeStep;

impl ProcessingStep for NormalizeStep {
    fn execute(&self, frame: RecordFrame, state: &mut PipelineState) -> Result<RecordFrame> {
        match &state.scaler {
            Some(scaler) => scaler.transform(frame),
            None => {
                let (scaler, frame) = MinMaxScaler::fit_transform(frame)?;
                state.scaler = Some(scaler);
                Ok(frame)
            }
        }
    }

    fn step_name(&self) -> &str {
        "normalize"
    }
}

/// One-hot encode categorical columns.
///
/// Fits an encoder when the state holds none, otherwise applies the stored one.
pub struct EncodeStep;

impl ProcessingStep for EncodeStep {
    fn execute(&self, frame: RecordFrame, state: &mut PipelineState) -> Result<RecordFrame> {
        match &state.encoder {
            Some(encoder) => encoder.transform(frame),
            None => {
                let (encoder, frame) = OneHotEncoder::fit_transform(frame)?;
                state.encoder = Some(encoder);
                Ok(frame)
            }
        }
    }

    fn step_name(&self) -> &str {
        "encode"
    }
}

/// Add the target column and drop status and salary.
pub struct DeriveTargetStep {
    pub status_column: String,
    pub salary_column: String,
    pub target_column: String,
}

impl ProcessingStep for DeriveTargetStep {
    fn execute(&self, frame: RecordFrame, _state: &mut PipelineState) -> Result<RecordFrame> {
        derive_target(
            frame,
            &self.status_column,
            &self.salary_column,
            &self.target_column,
        )
    }

    fn step_name(&self) -> &str {
        "derive_target"
    }
}

/// Steps that run on the whole table before splitting.
///
/// With [`FitScope::FullTable`] this includes normalization and encoding;
/// with [`FitScope::TrainingPartition`] those run after the split, see
/// [`build_fitting_pipeline`].
pub fn build_default_pipeline(options: &PrepOptions) -> FramePipeline {
    let pipeline = FramePipeline::new()
        .add_step(Box::new(CleanStep {
            salary_column: options.salary_column.clone(),
            flags: options.flag_columns.clone(),
        }))
        .add_step(Box::new(CoerceStep {
            columns: options.categorical_columns.clone(),
        }));
    let pipeline = match options.fit_scope {
        FitScope::FullTable => pipeline
            .add_step(Box::new(NormalizeStep))
            .add_step(Box::new(EncodeStep)),
        FitScope::TrainingPartition => pipeline,
    };
    pipeline.add_step(Box::new(DeriveTargetStep {
        status_column: options.status_column.clone(),
        salary_column: options.salary_column.clone(),
        target_column: options.target_column.clone(),
    }))
}

/// Normalization followed by encoding.
///
/// Run first on the training partition to fit, then on the other partitions
/// with the same state to reuse the fitted parameters.
pub fn build_fitting_pipeline() -> FramePipeline {
    FramePipeline::new()
        .add_step(Box::new(NormalizeStep))
        .add_step(Box::new(EncodeStep))
}
