use std::io::Write;

use placement_ingest::{ColumnSpec, DatasetSchema, IngestError, read_records, read_records_from_reader};
use placement_model::ColumnKind;
use tempfile::NamedTempFile;

const HEADER: &str = "sl_no,gender,ssc_p,ssc_b,hsc_p,hsc_b,hsc_s,degree_p,degree_t,workex,etest_p,specialisation,mba_p,status,salary";

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

fn placement_csv(rows: &[&str]) -> String {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    text
}

#[test]
fn loads_placement_file_with_declared_kinds() {
    let file = create_temp_csv(&placement_csv(&[
        "1,M,67.00,Others,91.00,Others,Commerce,58.00,Sci&Tech,No,55.0,Mkt&HR,58.80,Placed,270000.0",
        "2,M,79.33,Central,78.33,Others,Science,77.48,Sci&Tech,Yes,86.5,Mkt&Fin,66.28,Placed,200000.0",
        "3,F,65.00,Central,68.00,Central,Arts,64.00,Comm&Mgmt,No,75.0,Mkt&Fin,57.80,Not Placed,",
    ]));

    let frame = read_records(file.path(), &DatasetSchema::placement()).expect("read csv");

    assert_eq!(frame.height(), 3);
    assert_eq!(frame.width(), 15);
    assert_eq!(frame.kind_of("ssc_p"), Some(ColumnKind::Numeric));
    assert_eq!(frame.kind_of("gender"), Some(ColumnKind::Text));
    assert_eq!(frame.kind_of("sl_no"), Some(ColumnKind::Identifier));

    let salary: Vec<Option<f64>> = frame
        .column("salary")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(salary, vec![Some(270000.0), Some(200000.0), None]);

    let status: Vec<Option<&str>> = frame
        .column("status")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(status, vec![Some("Placed"), Some("Placed"), Some("Not Placed")]);
}

#[test]
fn nan_tokens_load_as_missing_numbers() {
    let schema = DatasetSchema::new(vec![ColumnSpec::new("salary", ColumnKind::Numeric, "")]);
    let frame = read_records_from_reader("salary\nNaN\n\n50000\nNA\n".as_bytes(), &schema)
        .expect("read csv");
    let salary: Vec<Option<f64>> = frame
        .column("salary")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect();
    // The blank line is skipped as an empty record.
    assert_eq!(salary, vec![None, Some(50000.0), None]);
}

#[test]
fn undeclared_columns_load_as_text() {
    let schema = DatasetSchema::new(vec![ColumnSpec::new("mba_p", ColumnKind::Numeric, "")]);
    let frame = read_records_from_reader("mba_p,remarks\n58.8,good\n".as_bytes(), &schema)
        .expect("read csv");
    assert_eq!(frame.kind_of("remarks"), Some(ColumnKind::Text));
    assert_eq!(frame.column_names(), vec!["mba_p", "remarks"]);
}

#[test]
fn missing_declared_column_is_reported() {
    let file = create_temp_csv("sl_no,gender\n1,M\n");
    let err = read_records(file.path(), &DatasetSchema::placement()).unwrap_err();
    assert!(matches!(err, IngestError::MissingColumn { column, .. } if column == "ssc_p"));
}

#[test]
fn invalid_number_reports_row_and_value() {
    let schema = DatasetSchema::new(vec![ColumnSpec::new("etest_p", ColumnKind::Numeric, "")]);
    let err = read_records_from_reader("etest_p\n55\nfifty\n".as_bytes(), &schema).unwrap_err();
    match err {
        IngestError::InvalidNumber { column, row, value, .. } => {
            assert_eq!(column, "etest_p");
            assert_eq!(row, 2);
            assert_eq!(value, "fifty");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn boolean_columns_accept_yes_no_tokens() {
    let schema = DatasetSchema::new(vec![ColumnSpec::new("workex", ColumnKind::Boolean, "")]);
    let frame = read_records_from_reader("workex\nYes\nno\n\n".as_bytes(), &schema)
        .expect("read csv");
    let values: Vec<Option<bool>> = frame
        .column("workex")
        .unwrap()
        .bool()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(values, vec![Some(true), Some(false)]);

    let err = read_records_from_reader("workex\nsometimes\n".as_bytes(), &schema).unwrap_err();
    assert!(matches!(err, IngestError::InvalidBoolean { .. }));
}

#[test]
fn empty_input_is_rejected() {
    let err = read_records_from_reader("".as_bytes(), &DatasetSchema::default()).unwrap_err();
    assert!(matches!(err, IngestError::EmptyCsv { .. }));
}

#[test]
fn duplicate_headers_are_rejected() {
    let err = read_records_from_reader("a,a\n1,2\n".as_bytes(), &DatasetSchema::default())
        .unwrap_err();
    assert!(matches!(err, IngestError::DuplicateColumn { column, .. } if column == "a"));
}

#[test]
fn unreadable_path_is_a_file_error() {
    let err = read_records(
        std::path::Path::new("/nonexistent/placement.csv"),
        &DatasetSchema::placement(),
    )
    .unwrap_err();
    assert!(matches!(err, IngestError::FileRead { .. }));
}
