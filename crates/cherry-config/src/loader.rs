//! Config file discovery and loading.
//!
//! The project root is always passed in explicitly; nothing here consults
//! the process working directory. Loading goes:
//! 1. Read `{project_root}/cherry.toml` (absent file → empty document)
//! 2. Lay `CHERRY_*` env overrides over `[server]`
//! 3. Deserialize the document → [`Config`]

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use toml::Table;
use tracing::{debug, info, warn};

use crate::env::{apply_env_overrides, collect_env_vars};
use crate::error::{ConfigError, ConfigResult};
use crate::notation::NotationMap;
use crate::types::Config;

/// File name of the project-local configuration.
pub const CONFIG_FILE_NAME: &str = "cherry.toml";

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// Path of the project config inside `project_root`.
#[must_use]
pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE_NAME)
}

/// Load the project configuration, applying env overrides from the
/// current process environment.
///
/// # Errors
///
/// Returns a [`ConfigError`] if `cherry.toml` exists but cannot be read or
/// parsed. A missing file is not an error.
pub fn load(project_root: &Path) -> ConfigResult<Config> {
    load_with_env(project_root, &collect_env_vars())
}

/// Load the project configuration with an explicit environment.
///
/// # Errors
///
/// Returns a [`ConfigError`] if `cherry.toml` exists but cannot be read or
/// parsed, or if the overridden document no longer matches [`Config`].
pub fn load_with_env<S: ::std::hash::BuildHasher>(
    project_root: &Path,
    env_vars: &HashMap<String, String, S>,
) -> ConfigResult<Config> {
    let path = config_path(project_root);

    let mut document = if let Some(doc) = read_document(&path)? {
        info!(path = %path.display(), "loaded project config");
        doc.into_table()
    } else {
        debug!(path = %path.display(), "no project config found; using defaults");
        Table::new()
    };

    let env_count = apply_env_overrides(&mut document, env_vars);
    if env_count > 0 {
        debug!(count = env_count, "applied environment overrides");
    }

    into_config(document, &path)
}

/// Load the project configuration, falling back to defaults on any error.
///
/// A file that exists but fails to load is reported with a warning.
#[must_use]
pub fn load_or_default(project_root: &Path) -> Config {
    match load(project_root) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "{CONFIG_FILE_NAME} was found but could not be loaded; using defaults");
            Config::default()
        },
    }
}

/// Load a config from a specific file path (no env overrides).
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file is missing, unreadable, or cannot
/// be parsed.
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    let content = read_source(path)?;
    let document: Table = parse(&content, path)?;
    into_config(document, path)
}

/// Read a raw document, returning `None` if the file doesn't exist.
///
/// Unknown keys are preserved. To edit the file without losing comments,
/// use [`ConfigDocument`](crate::ConfigDocument) instead.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file exists but cannot be read or parsed.
pub fn read_document(path: &Path) -> ConfigResult<Option<NotationMap>> {
    let content = match read_source(path) {
        Ok(c) => c,
        Err(ConfigError::ReadError { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => return Err(e),
    };

    let document: Table = parse(&content, path)?;
    Ok(Some(NotationMap::from(document)))
}

/// Read a file in one operation, then enforce the size limit.
pub(crate) fn read_source(path: &Path) -> ConfigResult<String> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let size = content.len() as u64;
    if size > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::FileTooLarge {
            path: path.display().to_string(),
            size,
            limit: MAX_CONFIG_FILE_SIZE,
        });
    }

    Ok(content)
}

fn parse(content: &str, path: &Path) -> ConfigResult<Table> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })
}

fn into_config(document: Table, path: &Path) -> ConfigResult<Config> {
    toml::Value::Table(document)
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::ParseError {
            path: path.display().to_string(),
            source: e,
        })
}
