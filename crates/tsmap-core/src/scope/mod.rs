//! Nearest-`package.json` lookup.
//!
//! Walks up from a file to the closest directory holding a `package.json`,
//! the way Node determines a file's package scope. The walk never crosses a
//! `node_modules` directory: a file inside a dependency without its own
//! manifest has no scope.

mod cache;

pub use cache::{ScopeCache, ScopeCacheStats};

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tsmap_util::fs::read_optional;
use tsmap_util::path::normalize;

/// Manifest file name.
pub const PACKAGE_JSON: &str = "package.json";

/// Directory name that bounds a scope walk.
const NODE_MODULES: &str = "node_modules";

/// The `type` field of a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    Commonjs,
    Module,
}

impl PackageType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commonjs => "commonjs",
            Self::Module => "module",
        }
    }
}

/// The subset of a `package.json` that is retained in the cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PackageScopeData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exports: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imports: Option<Value>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub package_type: Option<PackageType>,
}

impl PackageScopeData {
    /// Keep `name`, `main`, `exports`, `imports` and `type`; drop the rest.
    ///
    /// `type` values other than `commonjs` and `module` are treated as absent.
    #[must_use]
    pub fn from_manifest(manifest: &Value) -> Self {
        let string_field = |key: &str| {
            manifest
                .get(key)
                .and_then(Value::as_str)
                .map(ToString::to_string)
        };

        let package_type = match manifest.get("type").and_then(Value::as_str) {
            Some("module") => Some(PackageType::Module),
            Some("commonjs") => Some(PackageType::Commonjs),
            _ => None,
        };

        Self {
            name: string_field("name"),
            main: string_field("main"),
            exports: manifest.get("exports").cloned(),
            imports: manifest.get("imports").cloned(),
            package_type,
        }
    }

    #[must_use]
    pub fn is_module(&self) -> bool {
        self.package_type == Some(PackageType::Module)
    }
}

/// A package scope: the manifest's directory and its filtered contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageScope {
    pub directory: PathBuf,
    pub data: Arc<PackageScopeData>,
}

impl PackageScope {
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.directory.join(PACKAGE_JSON)
    }
}

/// Finds package scopes, caching every manifest read.
#[derive(Debug, Default)]
pub struct PackageScopeLookup {
    cache: ScopeCache,
}

impl PackageScopeLookup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cache(cache: ScopeCache) -> Self {
        Self { cache }
    }

    #[must_use]
    pub fn cache(&self) -> &ScopeCache {
        &self.cache
    }

    /// Find the scope governing `start`, which is treated as a file path:
    /// the first directory checked is its parent.
    ///
    /// Returns `Ok(None)` when the root is reached without a manifest, or
    /// when the walk reaches a `node_modules` directory. A manifest that
    /// exists but is not valid JSON is an error, not a miss.
    pub fn find_package_scope(&self, start: &Path) -> Result<Option<PackageScope>> {
        let start = normalize(&std::path::absolute(start)?);

        for dir in start.ancestors().skip(1) {
            if dir.file_name() == Some(OsStr::new(NODE_MODULES)) {
                return Ok(None);
            }

            if let Some(data) = self.read_manifest(&dir.join(PACKAGE_JSON))? {
                return Ok(Some(PackageScope {
                    directory: dir.to_path_buf(),
                    data,
                }));
            }
        }

        Ok(None)
    }

    /// Read one manifest through the cache. `Ok(None)` if it does not exist.
    pub fn read_manifest(&self, manifest: &Path) -> Result<Option<Arc<PackageScopeData>>> {
        if let Some(cached) = self.cache.get(manifest) {
            return Ok(cached);
        }

        let content = read_optional(manifest).map_err(|source| Error::ManifestRead {
            path: manifest.to_path_buf(),
            source,
        })?;

        let data = match content {
            Some(content) => {
                let value: Value =
                    serde_json::from_str(&content).map_err(|source| Error::ManifestParse {
                        path: manifest.to_path_buf(),
                        source,
                    })?;
                Some(Arc::new(PackageScopeData::from_manifest(&value)))
            }
            None => None,
        };

        self.cache.insert(manifest.to_path_buf(), data.clone());
        Ok(data)
    }
}
