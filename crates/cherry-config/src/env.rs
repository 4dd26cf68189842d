//! Environment variable overrides for the `[server]` section.
//!
//! Unlike file values, env vars **override**: they are collected into a flat
//! table and laid over the `[server]` table with [`shallow_merge`].

use std::collections::HashMap;

use toml::{Table, Value};
use tracing::{debug, warn};

use crate::merge::shallow_merge;

/// Section of the document that env overrides apply to.
pub const SERVER_SECTION: &str = "server";

/// Expected type of an overridable field.
#[derive(Debug, Clone, Copy)]
enum FieldKind {
    Str,
    Bool,
}

/// Mapping from environment variable name to a `[server]` key.
struct EnvMapping {
    var_name: &'static str,
    key: &'static str,
    kind: FieldKind,
}

const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "CHERRY_PORT",
        key: "port",
        kind: FieldKind::Str,
    },
    EnvMapping {
        var_name: "CHERRY_SHOULD_LOG",
        key: "should_log",
        kind: FieldKind::Bool,
    },
];

/// Build the flat override table from the given environment.
///
/// Values that cannot be coerced to the field's type are skipped.
#[must_use]
pub fn env_overrides<S: ::std::hash::BuildHasher>(env_vars: &HashMap<String, String, S>) -> Table {
    let mut overrides = Table::new();

    for mapping in ENV_MAPPINGS {
        let Some(raw) = env_vars.get(mapping.var_name) else {
            continue;
        };

        let value = match mapping.kind {
            FieldKind::Str => Value::String(raw.clone()),
            FieldKind::Bool => {
                if let Some(b) = parse_bool(raw) {
                    Value::Boolean(b)
                } else {
                    warn!(
                        var = mapping.var_name,
                        value = raw.as_str(),
                        "ignoring env override: expected a boolean"
                    );
                    continue;
                }
            },
        };

        debug!(
            var = mapping.var_name,
            field = mapping.key,
            "applying env override"
        );
        overrides.insert(mapping.key.to_owned(), value);
    }

    overrides
}

/// Lay env overrides over the `[server]` table of `document`.
///
/// Creates the section when it is absent. A `server` key holding a
/// non-table value is left for deserialization to reject.
///
/// Returns the number of overrides applied.
pub fn apply_env_overrides<S: ::std::hash::BuildHasher>(
    document: &mut Table,
    env_vars: &HashMap<String, String, S>,
) -> usize {
    let overrides = env_overrides(env_vars);
    if overrides.is_empty() {
        return 0;
    }

    let section = document
        .entry(SERVER_SECTION)
        .or_insert(Value::Table(Table::new()));
    if let Some(server) = section.as_table_mut() {
        shallow_merge(server, &overrides);
        overrides.len()
    } else {
        warn!("`server` is not a table; skipping env overrides");
        0
    }
}

/// Collect all current environment variables into a map.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars().collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_env_overrides_coerce_types() {
        let env = make_env(&[("CHERRY_PORT", "8080"), ("CHERRY_SHOULD_LOG", "YES")]);
        let overrides = env_overrides(&env);

        assert_eq!(overrides["port"].as_str(), Some("8080"));
        assert_eq!(overrides["should_log"].as_bool(), Some(true));
    }

    #[test]
    fn test_env_overrides_skip_invalid_bool() {
        let env = make_env(&[("CHERRY_SHOULD_LOG", "maybe")]);
        assert!(env_overrides(&env).is_empty());
    }

    #[test]
    fn test_unrelated_vars_ignored() {
        let env = make_env(&[("PORT", "1"), ("CHERRY_UNKNOWN", "x")]);
        assert!(env_overrides(&env).is_empty());
    }

    #[test]
    fn test_apply_env_overrides_wins_over_file() {
        let mut document: Table = toml::from_str(
            r#"
            [server]
            port = "3000"
            should_log = true
        "#,
        )
        .unwrap();
        let env = make_env(&[("CHERRY_PORT", "9000")]);

        let count = apply_env_overrides(&mut document, &env);

        assert_eq!(count, 1);
        let server = document["server"].as_table().unwrap();
        assert_eq!(server["port"].as_str(), Some("9000"));
        assert_eq!(server["should_log"].as_bool(), Some(true));
    }

    #[test]
    fn test_apply_env_overrides_creates_section() {
        let mut document = Table::new();
        let env = make_env(&[("CHERRY_SHOULD_LOG", "off")]);

        assert_eq!(apply_env_overrides(&mut document, &env), 1);
        assert_eq!(document["server"]["should_log"].as_bool(), Some(false));
    }

    #[test]
    fn test_apply_env_overrides_noop_without_vars() {
        let mut document = Table::new();
        assert_eq!(apply_env_overrides(&mut document, &make_env(&[])), 0);
        assert!(document.is_empty());
    }

    #[test]
    fn test_apply_env_overrides_skips_non_table_server() {
        let mut document: Table = toml::from_str("server = 5").unwrap();
        let env = make_env(&[("CHERRY_PORT", "9000")]);

        assert_eq!(apply_env_overrides(&mut document, &env), 0);
        assert_eq!(document["server"].as_integer(), Some(5));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool(" On "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool(""), None);
    }
}
