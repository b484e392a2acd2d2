//! Shared fixtures for placement-core integration tests.

#![allow(dead_code)]

use placement_model::{ColumnKind, FrameSchema, PrepOptions, RecordFrame};
use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

pub const SUBJECTS: [&str; 3] = ["Arts", "Commerce", "Science"];

pub fn ssc_p(id: usize) -> f64 {
    40.0 + ((id * 37) % 60) as f64
}

pub fn etest_p(id: usize) -> f64 {
    50.0 + ((id * 13) % 50) as f64
}

/// Row `id` is placed when `id % 5 < 3`, so 60% of any multiple of 5 rows.
pub fn is_placed(id: usize) -> bool {
    id % 5 < 3
}

/// Synthetic student records with ids `1..=rows`, as loaded from CSV.
pub fn student_frame(rows: usize) -> RecordFrame {
    let ids: Vec<usize> = (1..=rows).collect();
    let sl_no: Vec<String> = ids.iter().map(ToString::to_string).collect();
    let gender: Vec<&str> = ids.iter().map(|id| if id % 2 == 0 { "F" } else { "M" }).collect();
    let ssc: Vec<f64> = ids.iter().map(|&id| ssc_p(id)).collect();
    let hsc_s: Vec<&str> = ids.iter().map(|id| SUBJECTS[id % 3]).collect();
    let workex: Vec<&str> = ids
        .iter()
        .map(|id| if id % 4 == 0 { "Yes" } else { "No" })
        .collect();
    let etest: Vec<f64> = ids.iter().map(|&id| etest_p(id)).collect();
    let status: Vec<&str> = ids
        .iter()
        .map(|&id| if is_placed(id) { "Placed" } else { "Not Placed" })
        .collect();
    let salary: Vec<Option<f64>> = ids
        .iter()
        .map(|&id| is_placed(id).then(|| 200_000.0 + (id * 1000) as f64))
        .collect();

    let data = DataFrame::new(vec![
        Series::new("sl_no".into(), sl_no).into_column(),
        Series::new("gender".into(), gender).into_column(),
        Series::new("ssc_p".into(), ssc).into_column(),
        Series::new("hsc_s".into(), hsc_s).into_column(),
        Series::new("workex".into(), workex).into_column(),
        Series::new("etest_p".into(), etest).into_column(),
        Series::new("status".into(), status).into_column(),
        Series::new("salary".into(), salary).into_column(),
    ])
    .unwrap();
    let schema = FrameSchema::new()
        .with_column("sl_no", ColumnKind::Identifier)
        .with_column("gender", ColumnKind::Text)
        .with_column("ssc_p", ColumnKind::Numeric)
        .with_column("hsc_s", ColumnKind::Text)
        .with_column("workex", ColumnKind::Text)
        .with_column("etest_p", ColumnKind::Numeric)
        .with_column("status", ColumnKind::Text)
        .with_column("salary", ColumnKind::Numeric);
    RecordFrame::new(data, schema).unwrap()
}

pub fn student_options() -> PrepOptions {
    PrepOptions::new()
        .with_categorical_columns(["gender", "hsc_s"])
        .with_seed(7)
}

pub fn ids(frame: &RecordFrame) -> Vec<usize> {
    frame
        .column("sl_no")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|id| id.unwrap().parse().unwrap())
        .collect()
}

pub fn f64_values(frame: &RecordFrame, name: &str) -> Vec<f64> {
    frame
        .column(name)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .map(Option::unwrap)
        .collect()
}
