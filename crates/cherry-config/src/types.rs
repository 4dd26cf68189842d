//! Typed view of `cherry.toml`.
//!
//! Every struct implements [`Default`], so a missing section (or a missing
//! file) yields a usable configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::notation::NotationMap;

/// Root configuration for a Cherry project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Free-form project metadata, read with dot-notation paths.
    pub project: NotationMap,
    /// Named app definitions (`[app.<name>]`).
    pub app: HashMap<String, AppSection>,
    /// Settings for the Cherry server itself.
    pub server: ServerSection,
}

impl Config {
    /// Look up an app definition by name.
    #[must_use]
    pub fn app(&self, name: &str) -> Option<&AppSection> {
        self.app.get(name)
    }
}

/// Cherry server settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Port the server listens on.
    pub port: String,
    /// Whether request logging is enabled.
    pub should_log: bool,
}

/// A single app served by Cherry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSection {
    /// Port the app listens on.
    pub port: String,
    /// Whether the app runs multiple instances.
    #[serde(rename = "multi")]
    pub multiple: bool,
    /// Client-side source paths.
    pub client_path: Vec<String>,
    /// Server-side source paths.
    pub server_path: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_document_deserializes() {
        let config: Config = toml::from_str(
            r#"
            [project]
            name = "demo"

            [project.nested]
            x = "y"

            [server]
            port = "3000"
            should_log = true

            [app.web]
            port = "8080"
            multi = true
            client_path = ["web/client"]
            server_path = ["web/server", "shared"]
        "#,
        )
        .unwrap();

        assert!(!config.project.contains("project.nested.x"));
        assert_eq!(config.project.get("nested.x").unwrap().as_str(), Some("y"));
        assert_eq!(config.server.port, "3000");
        assert!(config.server.should_log);

        let web = config.app("web").unwrap();
        assert_eq!(web.port, "8080");
        assert!(web.multiple);
        assert_eq!(web.server_path, vec!["web/server", "shared"]);
        assert!(config.app("api").is_none());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_app_section_defaults() {
        let config: Config = toml::from_str(
            r#"
            [app.api]
            port = "9000"
        "#,
        )
        .unwrap();
        let api = config.app("api").unwrap();
        assert!(!api.multiple);
        assert!(api.client_path.is_empty());
    }

    #[test]
    fn test_multi_serializes_under_short_key() {
        let mut config = Config::default();
        config.app.insert(
            "web".to_owned(),
            AppSection {
                multiple: true,
                ..AppSection::default()
            },
        );
        let out = toml::to_string(&config).unwrap();
        assert!(out.contains("multi = true"));
        assert!(!out.contains("multiple"));
    }
}
