//! Load, prepare and write: the stages behind `placement-prep prepare`.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, SerWriter};
use serde::Serialize;
use tracing::{info, info_span};

use placement_core::{MinMaxScaler, OneHotEncoder, PreparedSplits, prepare};
use placement_ingest::{DatasetSchema, read_records};
use placement_model::{FitScope, PrepOptions, RecordFrame};

/// File name of the fitted-artifact document.
pub const ARTIFACTS_FILE: &str = "preprocessing.json";

/// Row and class counts of one partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionSummary {
    pub name: &'static str,
    pub rows: usize,
    pub positives: usize,
}

impl PartitionSummary {
    pub fn negatives(&self) -> usize {
        self.rows - self.positives
    }

    pub fn positive_fraction(&self) -> Option<f64> {
        (self.rows > 0).then(|| self.positives as f64 / self.rows as f64)
    }
}

/// Everything `prepare` produced for one input file.
#[derive(Debug)]
pub struct PrepareRun {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub prepared: PreparedSplits,
    pub partitions: Vec<PartitionSummary>,
    /// Files written; empty on a dry run.
    pub written: Vec<PathBuf>,
}

/// Fitted parameters as written to [`ARTIFACTS_FILE`].
#[derive(Debug, Serialize)]
pub struct PreprocessingArtifacts<'a> {
    pub fit_scope: FitScope,
    pub target_column: &'a str,
    pub prevalence: f64,
    pub scaler: &'a MinMaxScaler,
    pub encoder: &'a OneHotEncoder,
    pub options: &'a PrepOptions,
}

/// Load the input file, prepare it, and write the outputs unless `dry_run`.
pub fn run_file(
    input: &Path,
    output_dir: &Path,
    options: &PrepOptions,
    dry_run: bool,
) -> Result<PrepareRun> {
    let span = info_span!("run", input = %input.display());
    let _guard = span.enter();

    let frame = read_records(input, &DatasetSchema::placement())
        .with_context(|| format!("load {}", input.display()))?;
    let prepared = prepare(frame, options).context("prepare records")?;
    let partitions = summarize(&prepared, &options.target_column)?;

    let written = if dry_run {
        info!("dry run, no files written");
        Vec::new()
    } else {
        write_outputs(&prepared, options, output_dir)?
    };
    Ok(PrepareRun {
        input: input.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        prepared,
        partitions,
        written,
    })
}

/// Count rows and positive targets per partition.
pub fn summarize(prepared: &PreparedSplits, target_column: &str) -> Result<Vec<PartitionSummary>> {
    prepared
        .partitions()
        .into_iter()
        .map(|(name, frame)| {
            let labels = frame
                .bool_values(target_column)
                .with_context(|| format!("read target of {name} partition"))?;
            Ok(PartitionSummary {
                name,
                rows: labels.len(),
                positives: labels.iter().filter(|label| **label).count(),
            })
        })
        .collect()
}

/// Write the three partitions and the fitted artifacts into `output_dir`.
pub fn write_outputs(
    prepared: &PreparedSplits,
    options: &PrepOptions,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;
    let mut written = Vec::with_capacity(4);
    for (name, frame) in prepared.partitions() {
        let path = output_dir.join(format!("{name}.csv"));
        write_partition(frame, &path)?;
        written.push(path);
    }
    let path = output_dir.join(ARTIFACTS_FILE);
    write_artifacts(prepared, options, &path)?;
    written.push(path);
    info!(files = written.len(), output_dir = %output_dir.display(), "outputs written");
    Ok(written)
}

pub fn write_partition(frame: &RecordFrame, path: &Path) -> Result<()> {
    let mut data = frame.data().clone();
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(&mut data)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn write_artifacts(prepared: &PreparedSplits, options: &PrepOptions, path: &Path) -> Result<()> {
    let artifacts = PreprocessingArtifacts {
        fit_scope: prepared.fit_scope,
        target_column: &options.target_column,
        prevalence: prepared.prevalence,
        scaler: &prepared.scaler,
        encoder: &prepared.encoder,
        options,
    };
    let json = serde_json::to_string_pretty(&artifacts).context("serialize fitted artifacts")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
