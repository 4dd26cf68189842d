//! Dot-notation access to nested configuration tables.
//!
//! A [`NotationMap`] wraps a decoded TOML table and resolves paths such as
//! `"project.nested.x"` one segment at a time. Every segment names one level
//! of descent; there is no escaping, so keys containing a literal `.` cannot
//! be addressed. Array indices are not supported: arrays are leaf values.
//!
//! Empty segments (`"a..b"`, a leading or trailing dot, or the empty path)
//! are looked up as the literal key `""`.

mod path;

use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use toml::{Table, Value};
use tracing::trace;

use crate::error::{ConfigError, ConfigResult};
use crate::merge::shallow_merge;

use self::path::{parent_table, parent_table_mut};

/// A nested key-value tree addressable with dot-separated paths.
///
/// Serializes as the bare inner table, so it can sit directly inside a
/// `#[derive(Deserialize)]` struct for a free-form config section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotationMap(Table);

impl NotationMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `path` to the value stored there.
    ///
    /// A single-segment path looks the key up in the root table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] naming the first segment that is
    /// absent, or the segment that was requested inside a non-table value.
    pub fn get(&self, path: &str) -> ConfigResult<&Value> {
        let (table, leaf) = parent_table(&self.0, path)?;
        table
            .get(leaf)
            .ok_or_else(|| ConfigError::key_not_found(leaf, path))
    }

    /// Resolve `path` and deserialize the value into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] as for [`get`](Self::get), or
    /// [`ConfigError::InvalidValue`] if the value has the wrong shape.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> ConfigResult<T> {
        self.get(path)?
            .clone()
            .try_into()
            .map_err(|source| ConfigError::InvalidValue {
                path: path.to_owned(),
                source,
            })
    }

    /// Whether `path` resolves to a value.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_ok()
    }

    /// Store `value` at `path`, creating or overwriting the final key.
    ///
    /// Every segment before the last must already exist and hold a table.
    /// A single-segment path writes straight into the root table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] if an intermediate segment is
    /// missing or not a table. The map is unchanged on error.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> ConfigResult<()> {
        let (table, leaf) = parent_table_mut(&mut self.0, path)?;
        table.insert(leaf.to_owned(), value.into());
        trace!(path, "set config value");
        Ok(())
    }

    /// Remove and return the value at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] if any segment, including the
    /// last, cannot be resolved.
    pub fn remove(&mut self, path: &str) -> ConfigResult<Value> {
        let (table, leaf) = parent_table_mut(&mut self.0, path)?;
        let removed = table
            .remove(leaf)
            .ok_or_else(|| ConfigError::key_not_found(leaf, path))?;
        trace!(path, "removed config value");
        Ok(removed)
    }

    /// Overlay the top-level keys of `overrides` onto this map.
    ///
    /// See [`shallow_merge`]: nested tables are replaced, not merged.
    pub fn merge_shallow(&mut self, overrides: &Table) -> &mut Self {
        shallow_merge(&mut self.0, overrides);
        self
    }

    /// Borrow the underlying table.
    #[must_use]
    pub fn as_table(&self) -> &Table {
        &self.0
    }

    /// Consume the map and return the underlying table.
    #[must_use]
    pub fn into_table(self) -> Table {
        self.0
    }
}

impl Deref for NotationMap {
    type Target = Table;

    fn deref(&self) -> &Table {
        &self.0
    }
}

impl From<Table> for NotationMap {
    fn from(table: Table) -> Self {
        Self(table)
    }
}

impl From<NotationMap> for Table {
    fn from(map: NotationMap) -> Self {
        map.0
    }
}

impl From<NotationMap> for Value {
    fn from(map: NotationMap) -> Self {
        Value::Table(map.0)
    }
}
