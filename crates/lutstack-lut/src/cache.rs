//! Explicit LUT cache.
//!
//! Loading and parsing a `.cube` file is the expensive part of using a LUT,
//! so applications keep loaded tables around by name. The cache is a plain
//! value owned by the application; nothing in lutstack keeps global state.
//! The compositor only ever sees the `Arc<LutTable>` handles it hands out.
//!
//! Failed loads are not cached, so a later call retries.
//!
//! # Example
//!
//! ```rust
//! use lutstack_lut::{LutCache, LutTable};
//!
//! let mut cache = LutCache::new();
//! let a = cache.get_or_try_insert_with("id17", || Ok(LutTable::identity(17))).unwrap();
//! let b = cache.get_or_try_insert_with("id17", || unreachable!()).unwrap();
//! assert!(std::sync::Arc::ptr_eq(&a, &b));
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::{cube, LutResult, LutTable};

/// Name-keyed store of immutable tables.
#[derive(Debug, Default, Clone)]
pub struct LutCache {
    tables: HashMap<String, Arc<LutTable>>,
}

impl LutCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Looks up a table by name.
    pub fn get(&self, name: &str) -> Option<Arc<LutTable>> {
        self.tables.get(name).cloned()
    }

    /// Stores a table under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, table: LutTable) -> Arc<LutTable> {
        let table = Arc::new(table);
        self.tables.insert(name.into(), Arc::clone(&table));
        table
    }

    /// Returns the cached table or builds, stores and returns a new one.
    pub fn get_or_try_insert_with<F>(&mut self, name: &str, build: F) -> LutResult<Arc<LutTable>>
    where
        F: FnOnce() -> LutResult<LutTable>,
    {
        if let Some(table) = self.tables.get(name) {
            trace!(name, "lut cache hit");
            return Ok(Arc::clone(table));
        }
        let table = build()?;
        debug!(name, size = table.size(), "lut cache insert");
        Ok(self.insert(name, table))
    }

    /// Loads a `.cube` file, keyed by its path.
    pub fn load_cube<P: AsRef<Path>>(&mut self, path: P) -> LutResult<Arc<LutTable>> {
        let path = path.as_ref();
        let key = path.to_string_lossy().into_owned();
        self.get_or_try_insert_with(&key, || cube::read(path))
    }

    /// Drops a table. Handles already given out stay valid.
    pub fn remove(&mut self, name: &str) -> Option<Arc<LutTable>> {
        self.tables.remove(name)
    }

    /// Drops every table.
    pub fn clear(&mut self) {
        self.tables.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LutError;

    #[test]
    fn failed_builds_are_not_cached() {
        let mut cache = LutCache::new();
        let err = cache.get_or_try_insert_with("bad", || {
            Err(LutError::MalformedTable("short".into()))
        });
        assert!(err.is_err());
        assert!(cache.is_empty());

        let ok = cache.get_or_try_insert_with("bad", || Ok(LutTable::identity(2)));
        assert!(ok.is_ok());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn handles_outlive_removal() {
        let mut cache = LutCache::new();
        let table = cache.insert("warm", LutTable::identity(3));
        cache.remove("warm");
        assert!(cache.get("warm").is_none());
        assert_eq!(table.size(), 3);
    }

    #[test]
    fn load_cube_caches_by_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id.cube");
        cube::write(&path, &LutTable::identity(3)).unwrap();

        let mut cache = LutCache::new();
        let a = cache.load_cube(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let b = cache.load_cube(&path).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut cache = LutCache::new();
        let err = cache.load_cube("/definitely/not/here.cube").unwrap_err();
        assert!(matches!(err, LutError::Io(_)));
        cache.clear();
        assert!(cache.is_empty());
    }
}
