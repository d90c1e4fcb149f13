//! Manifest cache for package scope lookups.
//!
//! Entries are keyed by the absolute `package.json` path. A `None` entry
//! records that no manifest exists at that path, so repeated walks through
//! the same directories do not touch the filesystem again. Entries are never
//! invalidated here; owners call [`ScopeCache::clear`] between isolated runs.

use super::PackageScopeData;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Thread-safe cache of filtered `package.json` contents.
#[derive(Debug, Default)]
pub struct ScopeCache {
    entries: RwLock<HashMap<PathBuf, Option<Arc<PackageScopeData>>>>,
}

impl ScopeCache {
    /// Create a new empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a manifest path.
    ///
    /// The outer `Option` is the cache hit; the inner one is whether a
    /// manifest exists at that path.
    #[must_use]
    #[allow(clippy::option_option)]
    pub fn get(&self, manifest: &Path) -> Option<Option<Arc<PackageScopeData>>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(manifest).cloned()
    }

    /// Record the result of reading a manifest path.
    pub fn insert(&self, manifest: PathBuf, data: Option<Arc<PackageScopeData>>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(manifest, data);
    }

    /// Clear all cache entries.
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }

    /// Get cache statistics.
    #[must_use]
    pub fn stats(&self) -> ScopeCacheStats {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let manifests = entries.values().filter(|e| e.is_some()).count();
        ScopeCacheStats {
            entry_count: entries.len(),
            manifest_count: manifests,
            missing_count: entries.len() - manifests,
        }
    }
}

/// Scope cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeCacheStats {
    pub entry_count: usize,
    /// Entries holding a parsed manifest.
    pub manifest_count: usize,
    /// Entries recording a missing manifest.
    pub missing_count: usize,
}
