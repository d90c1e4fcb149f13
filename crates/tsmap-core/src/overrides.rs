//! Module-type overrides.
//!
//! A project can force files to be treated as CommonJS or ESM regardless of
//! their extension or package scope:
//!
//! ```json
//! { "tsmap": { "moduleTypes": { "scripts/**": "cjs", "scripts/esm/**": "esm" } } }
//! ```
//!
//! Patterns are globs relative to the directory of the config that declared
//! them. When several match, the one declared last wins. `package` restores
//! the default classification for a subtree.

use crate::error::{Error, Result};
use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tsmap_util::path::normalize;

/// Forced module kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideKind {
    Cjs,
    Esm,
    /// Defer to extension and package scope.
    Package,
}

impl OverrideKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cjs => "cjs",
            Self::Esm => "esm",
            Self::Package => "package",
        }
    }
}

/// One uncompiled `moduleTypes` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTypeOverride {
    pub pattern: String,
    pub kind: OverrideKind,
}

impl ModuleTypeOverride {
    #[must_use]
    pub fn new(pattern: impl Into<String>, kind: OverrideKind) -> Self {
        Self {
            pattern: pattern.into(),
            kind,
        }
    }
}

/// Compiled overrides, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ModuleTypeOverrides {
    entries: Vec<(Pattern, OverrideKind)>,
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

impl ModuleTypeOverrides {
    /// Compile `entries` with their patterns anchored at `base_dir`.
    pub fn compile<I>(base_dir: &Path, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = ModuleTypeOverride>,
    {
        let base = Pattern::escape(&normalize(base_dir).to_string_lossy());

        let entries = entries
            .into_iter()
            .map(|entry| {
                let anchored = format!("{}/{}", base.trim_end_matches('/'), entry.pattern);
                Pattern::new(&anchored)
                    .map(|pattern| (pattern, entry.kind))
                    .map_err(|source| Error::InvalidOverridePattern {
                        pattern: entry.pattern,
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The kind forced on `path`, if any pattern matches.
    #[must_use]
    pub fn lookup(&self, path: &Path) -> Option<OverrideKind> {
        if self.entries.is_empty() {
            return None;
        }

        let path = normalize(path);
        self.entries
            .iter()
            .rev()
            .find(|(pattern, _)| pattern.matches_path_with(&path, MATCH_OPTIONS))
            .map(|(_, kind)| *kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(entries: &[(&str, OverrideKind)]) -> ModuleTypeOverrides {
        ModuleTypeOverrides::compile(
            Path::new("/project"),
            entries
                .iter()
                .map(|(pattern, kind)| ModuleTypeOverride::new(*pattern, *kind)),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_never_matches() {
        let overrides = ModuleTypeOverrides::default();
        assert!(overrides.is_empty());
        assert_eq!(overrides.lookup(Path::new("/project/a.js")), None);
    }

    #[test]
    fn test_relative_to_base() {
        let overrides = compile(&[("scripts/**", OverrideKind::Cjs)]);

        assert_eq!(
            overrides.lookup(Path::new("/project/scripts/build/run.js")),
            Some(OverrideKind::Cjs)
        );
        assert_eq!(overrides.lookup(Path::new("/other/scripts/run.js")), None);
        assert_eq!(overrides.lookup(Path::new("/project/src/a.js")), None);
    }

    #[test]
    fn test_single_star_stays_in_directory() {
        let overrides = compile(&[("*.js", OverrideKind::Esm)]);

        assert_eq!(
            overrides.lookup(Path::new("/project/a.js")),
            Some(OverrideKind::Esm)
        );
        assert_eq!(overrides.lookup(Path::new("/project/src/a.js")), None);
    }

    #[test]
    fn test_last_match_wins() {
        let overrides = compile(&[
            ("src/**", OverrideKind::Cjs),
            ("src/esm/**", OverrideKind::Esm),
            ("src/esm/legacy/**", OverrideKind::Package),
        ]);

        assert_eq!(
            overrides.lookup(Path::new("/project/src/a.ts")),
            Some(OverrideKind::Cjs)
        );
        assert_eq!(
            overrides.lookup(Path::new("/project/src/esm/a.ts")),
            Some(OverrideKind::Esm)
        );
        assert_eq!(
            overrides.lookup(Path::new("/project/src/esm/legacy/a.ts")),
            Some(OverrideKind::Package)
        );
    }

    #[test]
    fn test_paths_are_normalized() {
        let overrides = compile(&[("lib/**", OverrideKind::Cjs)]);
        assert_eq!(
            overrides.lookup(Path::new("/project/src/../lib/a.js")),
            Some(OverrideKind::Cjs)
        );
    }

    #[test]
    fn test_invalid_pattern() {
        let err = ModuleTypeOverrides::compile(
            Path::new("/project"),
            [ModuleTypeOverride::new("src/[", OverrideKind::Cjs)],
        )
        .unwrap_err();

        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("src/["));
    }

    #[test]
    fn test_kind_deserialize() {
        let kind: OverrideKind = serde_json::from_str(r#""package""#).unwrap();
        assert_eq!(kind, OverrideKind::Package);
        assert!(serde_json::from_str::<OverrideKind>(r#""amd""#).is_err());
    }
}
