//! Run configuration: optional TOML file plus command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use placement_model::{FitScope, PrepOptions};

/// Values given on the command line; each one replaces the file setting.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OptionOverrides {
    pub train_fraction: Option<f64>,
    pub tune_fraction: Option<f64>,
    pub seed: Option<u64>,
    pub fit_scope: Option<FitScope>,
}

impl OptionOverrides {
    pub fn apply(&self, mut options: PrepOptions) -> PrepOptions {
        if let Some(fraction) = self.train_fraction {
            options.split.train_fraction = fraction;
        }
        if let Some(fraction) = self.tune_fraction {
            options.split.tune_fraction = fraction;
        }
        if let Some(seed) = self.seed {
            options.split.seed = Some(seed);
        }
        if let Some(scope) = self.fit_scope {
            options.fit_scope = scope;
        }
        options
    }
}

/// Parse options from TOML text. Missing keys keep their defaults.
pub fn parse_options(text: &str) -> Result<PrepOptions> {
    toml::from_str(text).context("parse preparation options")
}

/// Load options from `path`, or defaults when no file is given.
pub fn load_options(path: Option<&Path>) -> Result<PrepOptions> {
    let Some(path) = path else {
        return Ok(PrepOptions::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let options =
        parse_options(&text).with_context(|| format!("load config {}", path.display()))?;
    debug!(path = %path.display(), "loaded configuration");
    Ok(options)
}

/// Load, override and validate.
pub fn resolve_options(path: Option<&Path>, overrides: &OptionOverrides) -> Result<PrepOptions> {
    let options = overrides.apply(load_options(path)?);
    options.validate().context("invalid preparation options")?;
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_file_values() {
        let options = parse_options(
            r#"
fit_scope = "full_table"

[split]
train_fraction = 0.8
seed = 3
"#,
        )
        .unwrap();
        let overrides = OptionOverrides {
            seed: Some(9),
            fit_scope: Some(FitScope::TrainingPartition),
            ..OptionOverrides::default()
        };
        let options = overrides.apply(options);
        assert_eq!(options.split.train_fraction, 0.8);
        assert_eq!(options.split.tune_fraction, 0.5);
        assert_eq!(options.split.seed, Some(9));
        assert_eq!(options.fit_scope, FitScope::TrainingPartition);
    }
}
