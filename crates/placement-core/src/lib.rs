//! Preparation stages for student placement records.
//!
//! Stages run strictly forward, each taking a [`RecordFrame`] by value and
//! returning the next one:
//!
//! clean → coerce → normalize → encode → derive target → split
//!
//! [`prepare`] runs them in the order selected by
//! [`FitScope`](placement_model::FitScope).
//!
//! [`RecordFrame`]: placement_model::RecordFrame

pub mod clean;
pub mod coerce;
pub mod encode;
pub mod normalize;
pub mod pipeline;
pub mod prepare;
pub mod split;
pub mod target;

pub use clean::{clean, fill_missing_with_zero, normalize_flag};
pub use coerce::coerce_categorical;
pub use encode::{CategoryVocabulary, OneHotEncoder};
pub use normalize::{MinMaxParams, MinMaxScaler};
pub use pipeline::{
    CleanStep, CoerceStep, DeriveTargetStep, EncodeStep, FramePipeline, NormalizeStep,
    PipelineState, ProcessingStep, build_default_pipeline, build_fitting_pipeline,
};
pub use prepare::{PreparedSplits, prepare};
pub use split::{Partitions, apportion, split_partitions, split_with_rng, stratified_indices};
pub use target::{derive_target, prevalence};
