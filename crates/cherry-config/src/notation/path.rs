use toml::Table;

use crate::error::{ConfigError, ConfigResult};

/// Walk every segment of `path` except the last, returning the table that
/// holds the final segment together with that segment.
///
/// A segment that resolves to a non-table value fails on the segment that
/// would have been looked up inside it.
pub(super) fn parent_table<'a, 'p>(
    root: &'a Table,
    path: &'p str,
) -> ConfigResult<(&'a Table, &'p str)> {
    let mut segments = path.split('.');
    let mut table = root;
    let mut leaf = segments.next().unwrap_or_default();
    for next in segments {
        table = table
            .get(leaf)
            .ok_or_else(|| ConfigError::key_not_found(leaf, path))?
            .as_table()
            .ok_or_else(|| ConfigError::key_not_found(next, path))?;
        leaf = next;
    }
    Ok((table, leaf))
}

/// Mutable counterpart of [`parent_table`]. Nothing is modified on the way
/// down, so a failed walk leaves `root` untouched.
pub(super) fn parent_table_mut<'a, 'p>(
    root: &'a mut Table,
    path: &'p str,
) -> ConfigResult<(&'a mut Table, &'p str)> {
    let mut segments = path.split('.');
    let mut table = root;
    let mut leaf = segments.next().unwrap_or_default();
    for next in segments {
        let current = table;
        table = current
            .get_mut(leaf)
            .ok_or_else(|| ConfigError::key_not_found(leaf, path))?
            .as_table_mut()
            .ok_or_else(|| ConfigError::key_not_found(next, path))?;
        leaf = next;
    }
    Ok((table, leaf))
}
