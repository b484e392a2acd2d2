//! Tests for stratified partitioning.

use std::collections::BTreeSet;

use placement_core::split_partitions;
use placement_model::{ColumnKind, FrameSchema, PrepError, RecordFrame, SplitOptions};
use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use proptest::prelude::*;

/// `positives` placed rows followed by `negatives` unplaced ones.
fn labeled_frame(positives: usize, negatives: usize) -> RecordFrame {
    let total = positives + negatives;
    let ids: Vec<String> = (0..total).map(|id| id.to_string()).collect();
    let labels: Vec<bool> = (0..total).map(|id| id < positives).collect();
    let data = DataFrame::new(vec![
        Series::new("sl_no".into(), ids).into_column(),
        Series::new("placement".into(), labels).into_column(),
    ])
    .unwrap();
    let schema = FrameSchema::new()
        .with_column("sl_no", ColumnKind::Identifier)
        .with_column("placement", ColumnKind::Boolean);
    RecordFrame::new(data, schema).unwrap()
}

fn ids(frame: &RecordFrame) -> Vec<String> {
    frame
        .column("sl_no")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|id| id.unwrap().to_string())
        .collect()
}

fn positives(frame: &RecordFrame) -> usize {
    frame
        .bool_values("placement")
        .unwrap()
        .into_iter()
        .filter(|label| *label)
        .count()
}

#[test]
fn default_fractions_on_hundred_rows() {
    let frame = labeled_frame(60, 40);
    let parts = split_partitions(&frame, "placement", &SplitOptions::new().with_seed(Some(3)))
        .unwrap();

    assert_eq!(parts.train.height(), 70);
    assert_eq!(positives(&parts.train), 42);
    assert_eq!(parts.tune.height(), 15);
    assert_eq!(positives(&parts.tune), 9);
    assert_eq!(parts.test.height(), 15);
    assert_eq!(positives(&parts.test), 9);
}

#[test]
fn same_seed_gives_same_partitions() {
    let frame = labeled_frame(30, 20);
    let options = SplitOptions::new().with_seed(Some(11));
    let first = split_partitions(&frame, "placement", &options).unwrap();
    let second = split_partitions(&frame, "placement", &options).unwrap();

    assert_eq!(ids(&first.train), ids(&second.train));
    assert_eq!(ids(&first.tune), ids(&second.tune));
    assert_eq!(ids(&first.test), ids(&second.test));
}

#[test]
fn unseeded_split_still_partitions_rows() {
    let frame = labeled_frame(12, 8);
    let parts = split_partitions(&frame, "placement", &SplitOptions::new()).unwrap();
    assert_eq!(
        parts.train.height() + parts.tune.height() + parts.test.height(),
        20
    );
}

#[test]
fn single_member_class_is_insufficient() {
    let frame = labeled_frame(9, 1);
    let err = split_partitions(&frame, "placement", &SplitOptions::new().with_seed(Some(1)))
        .unwrap_err();
    assert!(matches!(
        err,
        PrepError::InsufficientData {
            available: 1,
            required: 2,
            ..
        }
    ));
}

#[test]
fn remainder_too_small_for_both_classes() {
    // 4 rows at 0.7 leave a remainder of 2, which cannot be split into two
    // partitions that each hold both classes.
    let frame = labeled_frame(2, 2);
    let err = split_partitions(&frame, "placement", &SplitOptions::new().with_seed(Some(1)))
        .unwrap_err();
    assert!(matches!(err, PrepError::InsufficientData { .. }));
}

#[test]
fn minority_class_must_reach_every_partition() {
    // 0.9 of 100 rows takes all 3 negatives, leaving none for tune or test
    let frame = labeled_frame(97, 3);
    let options = SplitOptions::new()
        .with_train_fraction(0.9)
        .with_seed(Some(1));
    let err = split_partitions(&frame, "placement", &options).unwrap_err();
    assert!(matches!(
        err,
        PrepError::InsufficientData { context, .. }
            if context == "remainder after training partition, class false"
    ));
}

#[test]
fn out_of_range_fraction_is_rejected() {
    let frame = labeled_frame(10, 10);
    let options = SplitOptions::new().with_train_fraction(1.2);
    let err = split_partitions(&frame, "placement", &options).unwrap_err();
    assert!(matches!(err, PrepError::InvalidOption { name, .. } if name == "train_fraction"));
}

#[test]
fn target_must_be_boolean() {
    let frame = labeled_frame(10, 10);
    let err = split_partitions(&frame, "sl_no", &SplitOptions::new()).unwrap_err();
    assert!(matches!(err, PrepError::ColumnType { .. }));
}

proptest! {
    #[test]
    fn prop_partitions_cover_rows_once(
        pos in 10usize..60,
        neg in 10usize..60,
        seed in any::<u64>(),
    ) {
        let frame = labeled_frame(pos, neg);
        let total = pos + neg;
        let parts = split_partitions(&frame, "placement", &SplitOptions::new().with_seed(Some(seed)))
            .unwrap();

        let train_len = (0.7 * total as f64 + 1e-9).floor() as usize;
        prop_assert_eq!(parts.train.height(), train_len);
        let rest = total - train_len;
        prop_assert_eq!(parts.tune.height(), (0.5 * rest as f64 + 1e-9).floor() as usize);

        let mut seen = BTreeSet::new();
        for part in [&parts.train, &parts.tune, &parts.test] {
            for id in ids(part) {
                prop_assert!(seen.insert(id));
            }
        }
        prop_assert_eq!(seen.len(), total);

        let expected = pos as f64 * train_len as f64 / total as f64;
        prop_assert!((positives(&parts.train) as f64 - expected).abs() < 1.0);
    }
}
