//! Config commands: read, edit, and display `cherry.toml`.

use std::path::Path;

use anyhow::{Context, Result};
use cherry_config::loader::{CONFIG_FILE_NAME, config_path, read_document};
use cherry_config::{Config, ConfigDocument, NotationMap};
use toml::Value;
use tracing::info;

/// Output format for `show`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum ShowFormat {
    /// TOML (default).
    #[default]
    Toml,
    /// JSON, for programmatic consumption.
    Json,
}

/// Print the value at `path`.
pub(crate) fn run_get(project_root: &Path, path: &str) -> Result<()> {
    let document = require_document(project_root)?;
    let value = document.get(path)?;
    println!("{}", format_value(value)?);
    Ok(())
}

/// Store `raw` at `path` and write the file back, creating it if needed.
/// Comments and key order in the existing file are kept.
pub(crate) fn run_set(project_root: &Path, path: &str, raw: &str) -> Result<()> {
    let file = config_path(project_root);
    let mut document = ConfigDocument::read(&file)?.unwrap_or_default();

    document.set(path, parse_value(raw))?;
    document.write(&file)?;

    info!(path, file = %file.display(), "updated config value");
    println!("Set {path} in {}", file.display());
    Ok(())
}

/// Remove the value at `path` and write the file back.
pub(crate) fn run_unset(project_root: &Path, path: &str) -> Result<()> {
    let file = config_path(project_root);
    let mut document = ConfigDocument::read(&file)?.with_context(|| missing_file(project_root))?;

    document.remove(path)?;
    document.write(&file)?;

    info!(path, file = %file.display(), "removed config value");
    println!("Removed {path} from {}", file.display());
    Ok(())
}

/// Print the resolved configuration, env overrides included.
pub(crate) fn run_show(project_root: &Path, format: ShowFormat) -> Result<()> {
    let config = Config::load(project_root)?;
    let rendered = match format {
        ShowFormat::Toml => toml::to_string_pretty(&config)?,
        ShowFormat::Json => serde_json::to_string_pretty(&config)?,
    };
    println!("{rendered}");
    Ok(())
}

/// Print the config file path and whether it exists.
pub(crate) fn run_path(project_root: &Path) {
    let file = config_path(project_root);
    let status = if file.is_file() { "found" } else { "missing" };
    println!("{} ({status})", file.display());
}

fn require_document(project_root: &Path) -> Result<NotationMap> {
    read_document(&config_path(project_root))?.with_context(|| missing_file(project_root))
}

fn missing_file(project_root: &Path) -> String {
    format!("no {CONFIG_FILE_NAME} found in {}", project_root.display())
}

/// Interpret a command-line value as a TOML literal, falling back to a
/// plain string (`8080` is an integer, `"8080"` and `web` are strings).
fn parse_value(raw: &str) -> toml_edit::Value {
    raw.parse::<toml_edit::Value>()
        .unwrap_or_else(|_| toml_edit::Value::from(raw))
}

/// Strings print bare, tables as TOML documents, everything else in TOML
/// literal form.
fn format_value(value: &Value) -> Result<String> {
    Ok(match value {
        Value::String(s) => s.clone(),
        Value::Table(table) => toml::to_string_pretty(table)?.trim_end().to_owned(),
        other => other.to_string(),
    })
}
