//! Logging configuration and setup.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors that can occur while setting up logging.
#[derive(Debug, Error)]
pub(crate) enum LoggingError {
    /// Invalid level or directive.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A global subscriber could not be installed.
    #[error("Initialization error: {0}")]
    Init(String),
}

/// Result type for logging setup.
pub(crate) type LoggingResult<T> = Result<T, LoggingError>;

fn init_err<E: std::fmt::Display>(e: E) -> LoggingError {
    LoggingError::Init(e.to_string())
}

/// Log format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Human-readable multi-line format.
    Pretty,
    /// Compact single-line format (default).
    #[default]
    Compact,
    /// JSON format for structured logging.
    Json,
}

/// Logging configuration. Output always goes to stderr so that command
/// output on stdout stays pipeable.
#[derive(Debug, Clone)]
pub(crate) struct LogConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub(crate) level: String,
    /// Log format.
    pub(crate) format: LogFormat,
    /// Whether to use ANSI colors.
    pub(crate) ansi: bool,
    /// Directive overrides (e.g., `cherry_config=trace`).
    pub(crate) directives: Vec<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: LogFormat::default(),
            ansi: true,
            directives: Vec::new(),
        }
    }
}

impl LogConfig {
    /// Create a new log config with the specified level.
    #[must_use]
    pub(crate) fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// Set the log format.
    #[must_use]
    pub(crate) fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Add a directive override.
    #[must_use]
    pub(crate) fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Disable ANSI colors.
    #[must_use]
    pub(crate) fn without_ansi(mut self) -> Self {
        self.ansi = false;
        self
    }

    fn build_filter(&self) -> LoggingResult<EnvFilter> {
        let mut filter =
            EnvFilter::try_new(&self.level).map_err(|e| LoggingError::Config(e.to_string()))?;

        for directive in &self.directives {
            filter = filter.add_directive(directive.parse().map_err(
                |e: tracing_subscriber::filter::ParseError| LoggingError::Config(e.to_string()),
            )?);
        }

        Ok(filter)
    }
}

/// Install the global subscriber described by `config`.
///
/// # Errors
///
/// Returns an error if the level or a directive is invalid, or a subscriber
/// is already installed.
pub(crate) fn setup_logging(config: &LogConfig) -> LoggingResult<()> {
    let filter = config.build_filter()?;
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .map_err(init_err),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_ansi(config.ansi),
            )
            .try_init()
            .map_err(init_err),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_ansi(config.ansi),
            )
            .try_init()
            .map_err(init_err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Compact);
        assert!(config.ansi);
    }

    #[test]
    fn test_builder() {
        let config = LogConfig::new("debug")
            .with_format(LogFormat::Json)
            .with_directive("cherry_config=trace")
            .without_ansi();

        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.directives, vec!["cherry_config=trace"]);
        assert!(!config.ansi);
    }

    #[test]
    fn test_build_filter() {
        let config = LogConfig::new("info").with_directive("cherry_config=debug");
        assert!(config.build_filter().is_ok());
    }

    #[test]
    fn test_build_filter_rejects_bad_directive() {
        let config = LogConfig::new("info").with_directive("cherry_config=notalevel");
        assert!(matches!(
            config.build_filter(),
            Err(LoggingError::Config(_))
        ));
    }
}
