//! CommonJS / ESM classification.
//!
//! Decides how a resolved file should be treated based on its extension
//! and, for files under Node's package-scope rules, the `type` field of the
//! nearest `package.json`:
//!
//! | extension      | package-scope rules   | otherwise     |
//! |----------------|-----------------------|---------------|
//! | `.cjs`, `.cts` | `node-flavored-cjs`   | `cjs`         |
//! | `.mjs`, `.mts` | `node-flavored-esm`   | `esm`         |
//! | anything else  | from `package.json`   | `unspecified` |

use crate::error::Result;
use crate::overrides::{ModuleTypeOverrides, OverrideKind};
use crate::scope::PackageScopeLookup;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Module format of a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleFormat {
    Cjs,
    Esm,
    /// CommonJS, but dynamic `import()` is left alone instead of being
    /// rewritten to a synchronous `require`.
    NodeFlavoredCjs,
    NodeFlavoredEsm,
    /// No verdict; the caller's default configuration applies.
    Unspecified,
}

impl ModuleFormat {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cjs => "cjs",
            Self::Esm => "esm",
            Self::NodeFlavoredCjs => "node-flavored-cjs",
            Self::NodeFlavoredEsm => "node-flavored-esm",
            Self::Unspecified => "unspecified",
        }
    }

    #[must_use]
    pub fn is_commonjs(&self) -> bool {
        matches!(self, Self::Cjs | Self::NodeFlavoredCjs)
    }

    #[must_use]
    pub fn is_esm(&self) -> bool {
        matches!(self, Self::Esm | Self::NodeFlavoredEsm)
    }

    fn commonjs(node_flavored: bool) -> Self {
        if node_flavored {
            Self::NodeFlavoredCjs
        } else {
            Self::Cjs
        }
    }

    fn esm(node_flavored: bool) -> Self {
        if node_flavored {
            Self::NodeFlavoredEsm
        } else {
            Self::Esm
        }
    }
}

impl fmt::Display for ModuleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify from the extension alone.
///
/// Returns `None` only when the package scope has to be consulted: the
/// extension is ambiguous and the file is under package-scope rules.
#[must_use]
pub fn classify_extension(path: &Path, package_scoped: bool) -> Option<ModuleFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("cjs" | "cts") => Some(ModuleFormat::commonjs(package_scoped)),
        Some("mjs" | "mts") => Some(ModuleFormat::esm(package_scoped)),
        _ if package_scoped => None,
        _ => Some(ModuleFormat::Unspecified),
    }
}

/// Classifies files, reading package scopes through a shared lookup.
#[derive(Debug, Clone, Copy)]
pub struct ModuleFormatClassifier<'a> {
    scopes: &'a PackageScopeLookup,
}

impl<'a> ModuleFormatClassifier<'a> {
    #[must_use]
    pub fn new(scopes: &'a PackageScopeLookup) -> Self {
        Self { scopes }
    }

    /// Classify `path`.
    ///
    /// Only fails when the package scope has to be read and the nearest
    /// manifest cannot be read or parsed.
    pub fn classify(&self, path: &Path, package_scoped: bool) -> Result<ModuleFormat> {
        if let Some(format) = classify_extension(path, package_scoped) {
            return Ok(format);
        }

        let is_module = self
            .scopes
            .find_package_scope(path)?
            .is_some_and(|scope| scope.data.is_module());

        if is_module {
            Ok(ModuleFormat::NodeFlavoredEsm)
        } else {
            Ok(ModuleFormat::NodeFlavoredCjs)
        }
    }
}

/// Apply configured overrides, then fall back to the classifier.
///
/// An override of `cjs`/`esm` fixes the kind; the Node flavor still
/// follows `package_scoped`. `package` and unmatched files defer to
/// [`ModuleFormatClassifier::classify`].
pub fn resolve_format(
    path: &Path,
    package_scoped: bool,
    overrides: &ModuleTypeOverrides,
    classifier: &ModuleFormatClassifier<'_>,
) -> Result<ModuleFormat> {
    match overrides.lookup(path) {
        Some(OverrideKind::Cjs) => Ok(ModuleFormat::commonjs(package_scoped)),
        Some(OverrideKind::Esm) => Ok(ModuleFormat::esm(package_scoped)),
        Some(OverrideKind::Package) | None => classifier.classify(path, package_scoped),
    }
}
