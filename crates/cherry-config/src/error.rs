use std::io;
use thiserror::Error;

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A path segment could not be resolved.
    ///
    /// Covers both an absent key and a value that is not a table where
    /// further descent was required.
    #[error("no such key: `{segment}` for notation: `{path}`")]
    KeyNotFound {
        /// The segment that failed to resolve.
        segment: String,
        /// The full dot-notation path that was requested.
        path: String,
    },

    /// A value exists at the path but does not have the requested type.
    #[error("Invalid value at `{path}`: {source}")]
    InvalidValue {
        /// The full dot-notation path that was requested.
        path: String,
        /// Underlying TOML deserialization error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to read configuration file.
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// Path to the config file that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write configuration file.
    #[error("Failed to write config file at {path}: {source}")]
    WriteError {
        /// Path to the config file that could not be written.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("Failed to parse config file at {path}: {source}")]
    ParseError {
        /// Path to the config file that failed to parse.
        path: String,
        /// Underlying TOML parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to parse a TOML document for in-place editing.
    #[error("Failed to parse config file at {path}: {source}")]
    DocumentError {
        /// Path to the config file that failed to parse.
        path: String,
        /// Underlying `toml_edit` parse error.
        #[source]
        source: toml_edit::TomlError,
    },

    /// Config file exceeds the size limit.
    #[error("Config file at {path} is {size} bytes, exceeding the {limit} byte limit")]
    FileTooLarge {
        /// Path to the oversized file.
        path: String,
        /// Actual size in bytes.
        size: u64,
        /// Maximum accepted size in bytes.
        limit: u64,
    },
}

impl ConfigError {
    pub(crate) fn key_not_found(segment: &str, path: &str) -> Self {
        Self::KeyNotFound {
            segment: segment.to_owned(),
            path: path.to_owned(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
