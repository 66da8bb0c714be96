//! Runtime configuration for `dashboard-inspect`.

use std::path::PathBuf;

use anyhow::Context as _;
use serde::Deserialize;

/// How the loaded payload is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
  /// Decoded text, lines joined.
  #[default]
  Text,
  /// Raw bytes, copied through unchanged.
  Stream,
}

/// Settings read from the TOML file and `DASHBOARD_*` environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
  /// Owner recorded on the loaded dashboard.
  pub owner:  Option<String>,
  pub shared: bool,
  pub mode:   Mode,
}

impl InspectConfig {
  /// Load from `path` (optional) layered under the environment.
  pub fn load(path: PathBuf) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("DASHBOARD"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise InspectConfig")
  }
}
