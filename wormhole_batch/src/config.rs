// config.rs - Batch settings: TOML file defaults overridden by CLI flags

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Folder holding one sub-folder per case.
    pub data_dir: PathBuf,
    /// Where `run` writes `<case>/<checkpoint>.png`.
    pub output_dir: PathBuf,
    /// Where `verify` writes generated images and diffs.
    pub verify_output_dir: PathBuf,
    pub problem_prefix: String,
    pub example_prefix: String,
    /// Generation counts to capture, strictly increasing.
    pub checkpoints: Vec<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("output"),
            verify_output_dir: PathBuf::from("output_examples"),
            problem_prefix: "problem-".to_owned(),
            example_prefix: "example-".to_owned(),
            checkpoints: vec![1, 10, 100, 1000],
        }
    }
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text).context("invalid settings")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                Self::from_toml(&text).with_context(|| format!("in config {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.checkpoints.is_empty() {
            bail!("at least one checkpoint is required");
        }
        if let Some(pair) = self.checkpoints.windows(2).find(|pair| pair[0] >= pair[1]) {
            bail!("checkpoints must be strictly increasing, found {} then {}", pair[0], pair[1]);
        }
        Ok(())
    }
}
