//! Format-preserving edits of `cherry.toml`.
//!
//! Reads go through [`NotationMap`](crate::NotationMap); edits go through
//! [`ConfigDocument`] so comments, key order, and whitespace in the user's
//! file survive a `set` or `remove`. Path rules match the accessor: every
//! segment before the last must already exist and hold a table.

use std::io::Write as _;
use std::path::Path;

use toml_edit::{DocumentMut, Item, TableLike, Value};
use tracing::{debug, trace};

use crate::error::{ConfigError, ConfigResult};
use crate::loader::read_source;

/// An editable TOML document that keeps its original formatting.
#[derive(Debug, Clone, Default)]
pub struct ConfigDocument(DocumentMut);

impl ConfigDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DocumentError`] if `content` is not valid TOML.
    /// `origin` only labels the error.
    pub fn parse(content: &str, origin: &Path) -> ConfigResult<Self> {
        content
            .parse::<DocumentMut>()
            .map(Self)
            .map_err(|e| ConfigError::DocumentError {
                path: origin.display().to_string(),
                source: e,
            })
    }

    /// Read a document, returning `None` if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file exists but cannot be read or
    /// parsed.
    pub fn read(path: &Path) -> ConfigResult<Option<Self>> {
        match read_source(path) {
            Ok(content) => Self::parse(&content, path).map(Some),
            Err(ConfigError::ReadError { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                debug!(path = %path.display(), "config file not found, skipping");
                Ok(None)
            },
            Err(e) => Err(e),
        }
    }

    /// Store `value` at `path`, creating or overwriting the final key.
    ///
    /// When the key already holds a value, its inline comment and spacing
    /// are carried over to the new value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] if an intermediate segment is
    /// missing or not a table. The document is unchanged on error.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> ConfigResult<()> {
        let (table, leaf) = parent_table_mut(self.0.as_table_mut(), path)?;

        let mut value = value.into();
        if let Some(old) = table.get(leaf).and_then(Item::as_value) {
            *value.decor_mut() = old.decor().clone();
        }
        table.insert(leaf, Item::Value(value));

        trace!(path, "set document value");
        Ok(())
    }

    /// Remove the item at `path`, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] if any segment, including the
    /// last, cannot be resolved.
    pub fn remove(&mut self, path: &str) -> ConfigResult<Item> {
        let (table, leaf) = parent_table_mut(self.0.as_table_mut(), path)?;
        let removed = table
            .remove(leaf)
            .ok_or_else(|| ConfigError::key_not_found(leaf, path))?;

        trace!(path, "removed document value");
        Ok(removed)
    }

    /// Write the document to `path` atomically.
    ///
    /// The content goes to a temporary file in the same directory which
    /// then replaces `path`, so a failed write never truncates the original.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WriteError`] if the temporary file cannot be
    /// created, written, or moved into place.
    pub fn write(&self, path: &Path) -> ConfigResult<()> {
        let write_err = |source: std::io::Error| ConfigError::WriteError {
            path: path.display().to_string(),
            source,
        };

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(self.0.to_string().as_bytes())
            .map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;

        debug!(path = %path.display(), "wrote config document");
        Ok(())
    }

    /// Borrow the underlying `toml_edit` document.
    #[must_use]
    pub fn as_document(&self) -> &DocumentMut {
        &self.0
    }
}

impl std::fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Walk every segment of `path` except the last through tables and inline
/// tables alike. A non-table value fails on the segment requested inside it.
fn parent_table_mut<'a, 'p>(
    root: &'a mut dyn TableLike,
    path: &'p str,
) -> ConfigResult<(&'a mut dyn TableLike, &'p str)> {
    let mut segments = path.split('.');
    let mut table = root;
    let mut leaf = segments.next().unwrap_or_default();
    for next in segments {
        let current = table;
        table = current
            .get_mut(leaf)
            .ok_or_else(|| ConfigError::key_not_found(leaf, path))?
            .as_table_like_mut()
            .ok_or_else(|| ConfigError::key_not_found(next, path))?;
        leaf = next;
    }
    Ok((table, leaf))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"# Cherry project file
[server]
port = "3000" # dev port

[project]
name = "demo"
meta = { owner = "ops" }
"#;

    fn sample() -> ConfigDocument {
        ConfigDocument::parse(SAMPLE, Path::new("cherry.toml")).unwrap()
    }

    fn missing_segment(err: ConfigError) -> String {
        match err {
            ConfigError::KeyNotFound { segment, .. } => segment,
            other => panic!("expected KeyNotFound, got: {other:?}"),
        }
    }

    #[test]
    fn test_set_keeps_comments_and_order() {
        let mut doc = sample();
        doc.set("project.name", "renamed").unwrap();

        let out = doc.to_string();
        assert!(out.starts_with("# Cherry project file\n[server]"));
        assert!(out.contains("port = \"3000\" # dev port"));
        assert!(out.contains("name = \"renamed\""));
        assert!(out.find("[server]") < out.find("[project]"));
    }

    #[test]
    fn test_set_carries_inline_comment_to_new_value() {
        let mut doc = sample();
        doc.set("server.port", "4000").unwrap();
        assert!(doc.to_string().contains("port = \"4000\" # dev port"));
    }

    #[test]
    fn test_set_into_inline_table() {
        let mut doc = sample();
        doc.set("project.meta.team", "core").unwrap();
        let meta = doc.as_document()["project"]["meta"].as_inline_table().unwrap();
        assert_eq!(meta.get("team").and_then(Value::as_str), Some("core"));
    }

    #[test]
    fn test_set_single_segment_writes_root() {
        let mut doc = ConfigDocument::new();
        doc.set("top", 1_i64).unwrap();
        assert_eq!(doc.as_document()["top"].as_integer(), Some(1));
    }

    #[test]
    fn test_set_missing_intermediate_fails_without_mutation() {
        let mut doc = sample();
        let err = doc.set("project.missing.x", "z").unwrap_err();
        assert_eq!(missing_segment(err), "missing");

        let err = doc.set("project.name.x", "z").unwrap_err();
        assert_eq!(missing_segment(err), "x");

        assert_eq!(doc.to_string(), SAMPLE);
    }

    #[test]
    fn test_remove_keeps_other_comments() {
        let mut doc = sample();
        let removed = doc.remove("project.name").unwrap();
        assert_eq!(removed.as_str(), Some("demo"));

        let out = doc.to_string();
        assert!(!out.contains("name ="));
        assert!(out.contains("# Cherry project file"));
        assert!(out.contains("# dev port"));
    }

    #[test]
    fn test_remove_missing_key() {
        let mut doc = sample();
        let err = doc.remove("server.host").unwrap_err();
        assert_eq!(missing_segment(err), "host");
    }

    #[test]
    fn test_parse_error() {
        let result = ConfigDocument::parse("[server", Path::new("cherry.toml"));
        assert!(matches!(result, Err(ConfigError::DocumentError { .. })));
    }

    #[test]
    fn test_read_missing_file() {
        let result = ConfigDocument::read(Path::new("/nonexistent/cherry.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_write_replaces_file_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cherry.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let mut doc = ConfigDocument::read(&path).unwrap().unwrap();
        doc.set("project.name", "renamed").unwrap();
        doc.write(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, doc.to_string());
        assert!(written.contains("# dev port"));

        let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let doc = sample();
        let result = doc.write(Path::new("/nonexistent/dir/cherry.toml"));
        assert!(matches!(result, Err(ConfigError::WriteError { .. })));
    }
}
