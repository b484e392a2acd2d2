//! Library side of the `placement-prep` command.

pub mod config;
pub mod logging;
pub mod pipeline;
