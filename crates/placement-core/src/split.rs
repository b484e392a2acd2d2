//! Stratified train/tune/test partitioning.
//!
//! Rows are split twice: the full table into training and a remainder, then
//! the remainder into tuning and test. Each split allocates rows per target
//! class with largest-remainder apportionment, so every partition keeps the
//! class proportions of its input to within one row per class.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, info_span};

use placement_model::{PrepError, RecordFrame, Result, SplitOptions};

/// The three disjoint partitions of a prepared table.
#[derive(Debug, Clone)]
pub struct Partitions {
    pub train: RecordFrame,
    pub tune: RecordFrame,
    pub test: RecordFrame,
}

/// Split `frame` into train, tune and test partitions stratified on the
/// boolean `target_column`.
pub fn split_partitions(
    frame: &RecordFrame,
    target_column: &str,
    options: &SplitOptions,
) -> Result<Partitions> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    split_with_rng(frame, target_column, options, &mut rng)
}

/// Same as [`split_partitions`] with a caller-supplied random source.
pub fn split_with_rng<R: Rng + ?Sized>(
    frame: &RecordFrame,
    target_column: &str,
    options: &SplitOptions,
    rng: &mut R,
) -> Result<Partitions> {
    let span = info_span!("split", rows = frame.height(), target = target_column);
    let _guard = span.enter();

    options.validate()?;
    let labels = frame.bool_values(target_column)?;

    let (train_idx, rest_idx) =
        stratified_indices(&labels, options.train_fraction, "training partition", &mut *rng)?;
    let rest_labels: Vec<bool> = rest_idx.iter().map(|&row| labels[row]).collect();
    let (tune_local, test_local) =
        stratified_indices(&rest_labels, options.tune_fraction, "tuning partition", &mut *rng)?;
    let tune_idx: Vec<usize> = tune_local.iter().map(|&i| rest_idx[i]).collect();
    let test_idx: Vec<usize> = test_local.iter().map(|&i| rest_idx[i]).collect();

    let partitions = Partitions {
        train: frame.take_rows(&train_idx)?,
        tune: frame.take_rows(&tune_idx)?,
        test: frame.take_rows(&test_idx)?,
    };
    info!(
        train = partitions.train.height(),
        tune = partitions.tune.height(),
        test = partitions.test.height(),
        "split partitions"
    );
    Ok(partitions)
}

/// Split row positions `0..labels.len()` into two stratified groups, the
/// first holding `floor(fraction * n)` rows.
///
/// `context` names the first group in error messages.
pub fn stratified_indices<R: Rng + ?Sized>(
    labels: &[bool],
    fraction: f64,
    context: &str,
    rng: &mut R,
) -> Result<(Vec<usize>, Vec<usize>)> {
    let total = labels.len();
    let mut classes: BTreeMap<bool, Vec<usize>> = BTreeMap::new();
    for (row, label) in labels.iter().enumerate() {
        classes.entry(*label).or_default().push(row);
    }
    if classes.is_empty() {
        return Err(PrepError::InsufficientData {
            context: context.to_string(),
            available: 0,
            required: 2,
        });
    }
    for (label, rows) in &classes {
        if rows.len() < 2 {
            return Err(PrepError::InsufficientData {
                context: format!("{context}, class {label}"),
                available: rows.len(),
                required: 2,
            });
        }
    }

    // small epsilon so 0.7 * 100 lands on 70, not 69
    let first_len = ((fraction * total as f64) + 1e-9).floor() as usize;
    let first_len = first_len.min(total);
    let second_len = total - first_len;
    let required = classes.len();
    if first_len < required || second_len < required {
        return Err(PrepError::InsufficientData {
            context: context.to_string(),
            available: first_len.min(second_len),
            required,
        });
    }

    let counts: Vec<usize> = classes.values().map(Vec::len).collect();
    let shares = apportion(&counts, first_len);

    // every class must land on both sides
    for ((label, rows), &share) in classes.iter().zip(&shares) {
        if share == 0 || share == rows.len() {
            let side = if share == 0 {
                context.to_string()
            } else {
                format!("remainder after {context}")
            };
            return Err(PrepError::InsufficientData {
                context: format!("{side}, class {label}"),
                available: 0,
                required: 1,
            });
        }
    }

    let mut first = Vec::with_capacity(first_len);
    let mut second = Vec::with_capacity(second_len);
    for ((label, rows), share) in classes.iter_mut().zip(shares) {
        rows.shuffle(&mut *rng);
        debug!(class = label, rows = rows.len(), first = share, "allocated class");
        first.extend_from_slice(&rows[..share]);
        second.extend_from_slice(&rows[share..]);
    }
    first.shuffle(&mut *rng);
    second.shuffle(&mut *rng);
    Ok((first, second))
}

/// Distribute `seats` across groups in proportion to `counts`.
///
/// Each group first receives the floor of its exact quota; the leftover seats
/// go to the largest fractional remainders, ties broken by group order.
pub fn apportion(counts: &[usize], seats: usize) -> Vec<usize> {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return vec![0; counts.len()];
    }
    let mut shares = Vec::with_capacity(counts.len());
    let mut remainders = Vec::with_capacity(counts.len());
    for (group, &count) in counts.iter().enumerate() {
        let quota = count * seats;
        shares.push(quota / total);
        remainders.push((quota % total, group));
    }
    let assigned: usize = shares.iter().sum();
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for &(_, group) in remainders.iter().take(seats.saturating_sub(assigned)) {
        shares[group] += 1;
    }
    shares
}
