use std::path::{Path, PathBuf};

use anyhow::Result;
use comfy_table::Table;

use placement_cli::config::{OptionOverrides, resolve_options};
use placement_cli::pipeline::{PrepareRun, run_file};
use placement_ingest::DatasetSchema;

use crate::cli::PrepareArgs;
use crate::summary::apply_table_style;

pub fn run_schema() -> Result<()> {
    let schema = DatasetSchema::placement();
    let mut table = Table::new();
    table.set_header(vec!["Column", "Kind", "Description"]);
    apply_table_style(&mut table);
    for spec in schema.columns {
        table.add_row(vec![spec.name, spec.kind.to_string(), spec.description]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_prepare(args: &PrepareArgs) -> Result<PrepareRun> {
    let overrides = OptionOverrides {
        train_fraction: args.train_fraction,
        tune_fraction: args.tune_fraction,
        seed: args.seed,
        fit_scope: args.fit_scope.map(Into::into),
    };
    let options = resolve_options(args.config.as_deref(), &overrides)?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.input));
    run_file(&args.input, &output_dir, &options, args.dry_run)
}

fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        .join("prepared")
}
