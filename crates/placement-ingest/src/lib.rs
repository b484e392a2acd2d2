//! Loader for student placement records.
//!
//! Reads a CSV file with a header row and produces a [`RecordFrame`] whose
//! columns are typed and tagged according to a [`DatasetSchema`].
//!
//! [`RecordFrame`]: placement_model::RecordFrame

pub mod error;
pub mod reader;
pub mod schema;

pub use error::{IngestError, Result};
pub use reader::{read_records, read_records_from_reader};
pub use schema::{ColumnSpec, DatasetSchema};
