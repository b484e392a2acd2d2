#![deny(unsafe_code)]

pub mod error;
pub mod frame;
pub mod kind;
pub mod options;

pub use error::{PrepError, Result};
pub use frame::{FrameSchema, RecordFrame};
pub use kind::ColumnKind;
pub use options::{FitScope, FlagColumn, PrepOptions, SplitOptions};
