#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Project configuration for Cherry.
//!
//! Locates the project-local `cherry.toml`, parses it into a typed
//! [`Config`], and exposes [`NotationMap`] for reading and writing nested
//! values with dot-separated paths.
//!
//! # Usage
//!
//! ```rust,no_run
//! use cherry_config::Config;
//!
//! let config = Config::load(std::path::Path::new(".")).unwrap();
//! let name = config.project.get("name").unwrap();
//! println!("project: {name}");
//! ```
//!
//! # Dot notation
//!
//! ```rust
//! use cherry_config::NotationMap;
//!
//! let mut map: NotationMap = toml::from_str("[project.nested]\nx = \"y\"").unwrap();
//! assert_eq!(map.get("project.nested.x").unwrap().as_str(), Some("y"));
//!
//! map.set("project.nested.x", "z").unwrap();
//! assert_eq!(map.get("project.nested.x").unwrap().as_str(), Some("z"));
//!
//! assert!(map.get("project.missing.x").is_err());
//! ```
//!
//! # Environment overrides
//!
//! `CHERRY_PORT` and `CHERRY_SHOULD_LOG` override `server.port` and
//! `server.should_log` from the file.

/// Format-preserving edits of `cherry.toml`.
pub mod document;
/// Environment variable overrides.
pub mod env;
/// Configuration error types.
pub mod error;
/// Configuration file discovery and loading.
pub mod loader;
/// Flat key overrides.
pub mod merge;
/// Dot-notation access to nested tables.
pub mod notation;
/// Configuration struct definitions.
pub mod types;

// Re-export primary types at the crate root.
pub use document::ConfigDocument;
pub use error::{ConfigError, ConfigResult};
pub use merge::shallow_merge;
pub use notation::NotationMap;
pub use types::*;

impl Config {
    /// Load `cherry.toml` from `project_root` with env overrides.
    ///
    /// See [`loader::load`] for the full algorithm.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the config file exists but is malformed.
    pub fn load(project_root: &std::path::Path) -> ConfigResult<Self> {
        loader::load(project_root)
    }

    /// Load `cherry.toml` from `project_root`, falling back to defaults.
    #[must_use]
    pub fn load_or_default(project_root: &std::path::Path) -> Self {
        loader::load_or_default(project_root)
    }

    /// Load configuration from a single file (no env overrides).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    pub fn load_file(path: &std::path::Path) -> ConfigResult<Self> {
        loader::load_file(path)
    }
}
