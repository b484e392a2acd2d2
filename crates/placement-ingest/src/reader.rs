use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::{debug, info, warn};

use placement_common::{is_missing_token, parse_f64};
use placement_model::{ColumnKind, FrameSchema, RecordFrame};

use crate::error::{IngestError, Result};
use crate::schema::DatasetSchema;

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Read a CSV file into a record frame typed by `schema`.
pub fn read_records(path: &Path, schema: &DatasetSchema) -> Result<RecordFrame> {
    let file = File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(file, schema, &path.display().to_string())
}

/// Read CSV text from any reader into a record frame typed by `schema`.
pub fn read_records_from_reader<R: Read>(reader: R, schema: &DatasetSchema) -> Result<RecordFrame> {
    read_csv(reader, schema, "<reader>")
}

fn read_csv<R: Read>(reader: R, schema: &DatasetSchema, origin: &str) -> Result<RecordFrame> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(origin, &e))?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            origin: origin.to_string(),
        });
    }

    let mut seen = BTreeSet::new();
    for header in &headers {
        if !seen.insert(header.as_str()) {
            return Err(IngestError::DuplicateColumn {
                origin: origin.to_string(),
                column: header.clone(),
            });
        }
    }
    for spec in &schema.columns {
        if !seen.contains(spec.name.as_str()) {
            return Err(IngestError::MissingColumn {
                origin: origin.to_string(),
                column: spec.name.clone(),
            });
        }
    }

    let mut records: Vec<StringRecord> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(origin, &e))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        records.push(record);
    }

    let mut columns: Vec<Column> = Vec::with_capacity(headers.len());
    let mut frame_schema = FrameSchema::new();
    for (idx, header) in headers.iter().enumerate() {
        let kind = schema.kind_of(header).unwrap_or_else(|| {
            warn!(origin, column = %header, "undeclared column loaded as text");
            ColumnKind::Text
        });
        let cells: Vec<&str> = records
            .iter()
            .map(|record| record.get(idx).unwrap_or(""))
            .collect();
        columns.push(build_column(origin, header, kind, &cells)?);
        frame_schema.insert(header.clone(), kind);
        debug!(origin, column = %header, %kind, "column loaded");
    }

    let data = DataFrame::new(columns).map_err(placement_model::PrepError::from)?;
    let frame = RecordFrame::new(data, frame_schema)?;
    info!(
        origin,
        rows = frame.height(),
        columns = frame.width(),
        "records loaded"
    );
    Ok(frame)
}

fn build_column(origin: &str, name: &str, kind: ColumnKind, cells: &[&str]) -> Result<Column> {
    let column = match kind {
        ColumnKind::Numeric => {
            let mut values: Vec<Option<f64>> = Vec::with_capacity(cells.len());
            for (row, cell) in cells.iter().enumerate() {
                let value = parse_f64(cell).map_err(|_| IngestError::InvalidNumber {
                    origin: origin.to_string(),
                    column: name.to_string(),
                    row: row + 1,
                    value: (*cell).to_string(),
                })?;
                values.push(value);
            }
            Series::new(name.into(), values)
        }
        ColumnKind::Boolean => {
            let mut values: Vec<Option<bool>> = Vec::with_capacity(cells.len());
            for (row, cell) in cells.iter().enumerate() {
                let value = parse_bool(cell).ok_or_else(|| IngestError::InvalidBoolean {
                    origin: origin.to_string(),
                    column: name.to_string(),
                    row: row + 1,
                    value: (*cell).to_string(),
                })?;
                values.push(value);
            }
            Series::new(name.into(), values)
        }
        ColumnKind::Identifier | ColumnKind::Categorical | ColumnKind::Text => {
            let values: Vec<Option<String>> = cells
                .iter()
                .map(|cell| {
                    if cell.is_empty() {
                        None
                    } else {
                        Some((*cell).to_string())
                    }
                })
                .collect();
            Series::new(name.into(), values)
        }
    };
    Ok(column.into_column())
}

/// `Some(None)` for a missing cell, `None` for an unrecognized token.
fn parse_bool(cell: &str) -> Option<Option<bool>> {
    if is_missing_token(cell) {
        return Some(None);
    }
    match cell.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(Some(true)),
        "false" | "no" | "n" | "0" => Some(Some(false)),
        _ => None,
    }
}

fn csv_error(origin: &str, error: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        origin: origin.to_string(),
        message: error.to_string(),
    }
}
