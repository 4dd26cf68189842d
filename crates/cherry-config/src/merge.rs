//! Flat key overrides.

use toml::Table;

/// Overlay every top-level key of `overrides` onto `base` and return `base`.
///
/// - Matching keys are overwritten with the override's value.
/// - Keys only present in `base` are left alone.
/// - Nothing recurses: a table in `overrides` replaces the base table
///   wholesale.
pub fn shallow_merge<'a>(base: &'a mut Table, overrides: &Table) -> &'a mut Table {
    for (key, value) in overrides {
        base.insert(key.clone(), value.clone());
    }
    base
}
