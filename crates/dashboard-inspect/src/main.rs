//! dashboard-inspect binary.
//!
//! Loads a dashboard payload file into a [`Metadata`] record as an open
//! stream and prints it, either decoded to text or copied through as raw
//! bytes. Reads `inspect.toml` (or the path given with `--config`) and
//! `DASHBOARD_*` environment variables; flags override both.

mod settings;

use std::{
  fs::File,
  io::{self, Write},
  path::{Path, PathBuf},
};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use clap::Parser;
use dashboard_metadata::{ContentKind, ContentStream, Metadata};
use serde::Serialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use settings::{InspectConfig, Mode};

#[derive(Parser)]
#[command(author, version, about = "Inspect a stored dashboard payload")]
struct Cli {
  /// Dashboard payload file.
  path: PathBuf,

  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "inspect.toml")]
  config: PathBuf,

  /// Output mode; overrides the configuration file.
  #[arg(long, value_enum)]
  mode: Option<Mode>,

  /// Owner to record; overrides the configuration file.
  #[arg(long)]
  owner: Option<String>,

  /// Mark the dashboard as shared.
  #[arg(long)]
  shared: bool,

  /// Print a JSON summary of the record after the content.
  #[arg(long)]
  summary: bool,
}

/// Attribute snapshot printed with `--summary`.
#[derive(Serialize)]
struct Summary<'a> {
  id:                Option<&'a str>,
  name:              Option<&'a str>,
  owner:             Option<&'a str>,
  shared:            bool,
  created_time:      DateTime<Utc>,
  last_updated_time: DateTime<Utc>,
  content_kind:      Option<ContentKind>,
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = InspectConfig::load(cli.config.clone())?;

  let mode = cli.mode.unwrap_or(cfg.mode);
  let owner = cli.owner.clone().or(cfg.owner);
  let shared = cli.shared || cfg.shared;

  let mut metadata = load(&cli.path, owner, shared)?;
  tracing::info!(
    path = %cli.path.display(),
    id = metadata.id().unwrap_or_default(),
    ?mode,
    "loaded dashboard"
  );

  let stdout = io::stdout();
  let mut out = stdout.lock();
  match mode {
    Mode::Text => {
      let text = metadata.content().context("failed to decode content")?;
      writeln!(out, "{text}")?;
    }
    Mode::Stream => {
      let mut reader = metadata
        .content_stream()
        .context("failed to open content stream")?;
      io::copy(&mut reader, &mut out).context("failed to copy content")?;
      writeln!(out)?;
    }
  }

  if cli.summary {
    let summary = Summary {
      id:                metadata.id(),
      name:              metadata.name(),
      owner:             metadata.owner(),
      shared:            metadata.is_shared(),
      created_time:      metadata.created_time(),
      last_updated_time: metadata.last_updated_time(),
      content_kind:      metadata.content_kind(),
    };
    serde_json::to_writer_pretty(&mut out, &summary)?;
    writeln!(out)?;
  }

  Ok(())
}

/// Build a record around `path`, with the file left open as its content.
fn load(
  path: &Path,
  owner: Option<String>,
  shared: bool,
) -> anyhow::Result<Metadata> {
  let file = File::open(path)
    .with_context(|| format!("failed to open {path:?}"))?;
  let modified = file
    .metadata()
    .and_then(|m| m.modified())
    .map(DateTime::<Utc>::from)
    .unwrap_or_else(|_| Utc::now());

  let mut metadata = Metadata::new();
  if let Some(stem) = path.file_stem() {
    metadata.set_id(stem.to_string_lossy());
  }
  if let Some(name) = path.file_name() {
    metadata.set_name(name.to_string_lossy());
  }
  if let Some(owner) = owner {
    metadata.set_owner(owner);
  }
  metadata.set_shared(shared);
  metadata.set_created_time(modified);
  metadata.set_last_updated_time(modified);
  metadata.set_content(ContentStream::from_reader(file));
  Ok(metadata)
}
