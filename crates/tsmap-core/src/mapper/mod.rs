//! tsconfig `paths` remapping.
//!
//! A [`PathMapper`] is compiled once from `baseUrl` + `paths` and then maps
//! non-relative specifiers to an ordered list of candidate paths. It never
//! touches the filesystem: callers probe candidates (extensions, `index`
//! files) themselves and take the first that exists.
//!
//! Rule selection follows TypeScript:
//! - an exact key beats any wildcard key;
//! - among wildcard keys the longest literal prefix wins;
//! - on a tie the key declared first wins.

mod pattern;

pub use pattern::{MappingRule, Pattern, Specificity};

use crate::error::{Error, Result};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tsmap_util::path::join_normalized;

/// Ordered `paths` entries: pattern key and its output templates.
pub type PathEntries = Vec<(String, Vec<String>)>;

/// The `compilerOptions` subset the mapper is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathMappingConfig {
    /// Directory that output templates are joined onto.
    #[serde(default)]
    pub base_url: Option<PathBuf>,
    /// Pattern -> output templates, in declaration order.
    #[serde(default, deserialize_with = "deserialize_ordered_map")]
    pub paths: Option<PathEntries>,
}

impl PathMappingConfig {
    #[must_use]
    pub fn new(base_url: Option<PathBuf>) -> Self {
        Self {
            base_url,
            paths: None,
        }
    }

    /// Append one `paths` entry.
    #[must_use]
    pub fn with_path<I, S>(mut self, pattern: &str, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths
            .get_or_insert_with(Vec::new)
            .push((pattern.to_string(), outputs.into_iter().map(Into::into).collect()));
        self
    }
}

/// Deserialize a JSON object into an ordered list of entries.
///
/// Going through `MapAccess` keeps the document order without relying on
/// the map type serde_json was built with.
pub(crate) fn deserialize_ordered_map<'de, D, V>(
    deserializer: D,
) -> Result<Option<Vec<(String, V)>>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct OrderedVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
        type Value = Option<Vec<(String, V)>>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object")
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_map(self)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, V>()? {
                entries.push(entry);
            }
            Ok(Some(entries))
        }
    }

    deserializer.deserialize_option(OrderedVisitor(PhantomData))
}

/// Compiled `paths` table.
#[derive(Debug, Clone, Default)]
pub struct PathMapper {
    base_dir: PathBuf,
    rules: Vec<MappingRule>,
}

impl PathMapper {
    /// Compile a mapper from configuration.
    ///
    /// Fails if `paths` is non-empty without a `baseUrl`, or if any key
    /// holds more than one `*`.
    pub fn new(config: &PathMappingConfig) -> Result<Self> {
        let entries = match &config.paths {
            Some(entries) if !entries.is_empty() => entries,
            _ => return Ok(Self::default()),
        };

        let base_dir = match &config.base_url {
            Some(base) if !base.as_os_str().is_empty() => base.clone(),
            _ => return Err(Error::BaseUrlRequired),
        };

        let rules = entries
            .iter()
            .map(|(pattern, outputs)| MappingRule::compile(pattern, outputs.clone()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { base_dir, rules })
    }

    /// A mapper with no rules; `map` always returns `None`.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    #[must_use]
    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Map a specifier to its candidate paths.
    ///
    /// Returns `None` when no rule applies (including every relative
    /// specifier), meaning the caller should fall through to its default
    /// resolution. A matching rule with no outputs yields `Some(vec![])`.
    #[must_use]
    pub fn map(&self, specifier: &str) -> Option<Vec<PathBuf>> {
        self.map_with_rule(specifier).map(|(_, candidates)| candidates)
    }

    /// Like [`map`](Self::map), also returning the rule that won.
    #[must_use]
    pub fn map_with_rule(&self, specifier: &str) -> Option<(&MappingRule, Vec<PathBuf>)> {
        if self.rules.is_empty() || specifier.starts_with('.') {
            return None;
        }

        let (rule, capture) = self.best_match(specifier)?;
        let candidates = rule
            .substitute(capture)
            .iter()
            .map(|output| join_normalized(&self.base_dir, output))
            .collect();

        Some((rule, candidates))
    }

    fn best_match<'s>(&self, specifier: &'s str) -> Option<(&MappingRule, &'s str)> {
        let mut best: Option<(Specificity, &MappingRule, &'s str)> = None;

        for rule in &self.rules {
            let Some(capture) = rule.pattern.matches(specifier) else {
                continue;
            };
            let weight = rule.pattern.specificity();

            // Strictly greater: the first rule keeps a tie.
            if best.map_or(true, |(current, _, _)| weight > current) {
                best = Some((weight, rule, capture));
            }
        }

        best.map(|(_, rule, capture)| (rule, capture))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize_path_for_test(path: &Path) -> String {
        path.to_string_lossy().replace('\\', "/")
    }

    fn mapped(mapper: &PathMapper, spec: &str) -> Option<Vec<String>> {
        mapper
            .map(spec)
            .map(|paths| paths.iter().map(|p| normalize_path_for_test(p)).collect())
    }

    fn base() -> Option<PathBuf> {
        Some(PathBuf::from("/base"))
    }

    #[test]
    fn test_no_paths_never_maps() {
        let mapper = PathMapper::new(&PathMappingConfig::new(base())).unwrap();
        assert!(mapper.is_empty());
        assert!(mapper.map("anything").is_none());
        assert!(mapper.map("@scope/pkg").is_none());
    }

    #[test]
    fn test_empty_paths_without_base_url_is_ok() {
        let config = PathMappingConfig {
            base_url: None,
            paths: Some(Vec::new()),
        };
        let mapper = PathMapper::new(&config).unwrap();
        assert!(mapper.map("x").is_none());
    }

    #[test]
    fn test_paths_without_base_url_fails() {
        let config = PathMappingConfig::new(None).with_path("a/*", ["x"]);
        let err = PathMapper::new(&config).unwrap_err();
        assert!(matches!(err, Error::BaseUrlRequired));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_empty_base_url_fails() {
        let config = PathMappingConfig::new(Some(PathBuf::new())).with_path("a/*", ["x"]);
        assert!(matches!(
            PathMapper::new(&config),
            Err(Error::BaseUrlRequired)
        ));
    }

    #[test]
    fn test_two_wildcards_fails() {
        let config = PathMappingConfig::new(base()).with_path("a*b*c", ["x"]);
        let err = PathMapper::new(&config).unwrap_err();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("a*b*c"));
    }

    #[test]
    fn test_relative_specifiers_not_mapped() {
        let config = PathMappingConfig::new(base()).with_path("*", ["src/*"]);
        let mapper = PathMapper::new(&config).unwrap();

        assert!(mapper.map("./foo").is_none());
        assert!(mapper.map("../foo").is_none());
        assert!(mapper.map(".").is_none());
    }

    #[test]
    fn test_wildcard_substitution() {
        let config = PathMappingConfig::new(base()).with_path("a*z", ["mapped/*"]);
        let mapper = PathMapper::new(&config).unwrap();

        assert_eq!(
            mapped(&mapper, "afooz"),
            Some(vec!["/base/mapped/foo".to_string()])
        );
    }

    #[test]
    fn test_no_match_returns_none() {
        let config = PathMappingConfig::new(base()).with_path("@app/*", ["src/*"]);
        let mapper = PathMapper::new(&config).unwrap();
        assert!(mapper.map("lodash").is_none());
    }

    #[test]
    fn test_longer_prefix_wins() {
        let config = PathMappingConfig::new(base())
            .with_path("lib/*", ["./lib1/*"])
            .with_path("lib/utils/*", ["./lib2/*"]);
        let mapper = PathMapper::new(&config).unwrap();

        let candidates = mapped(&mapper, "lib/utils/x").unwrap();
        assert_eq!(candidates, vec!["/base/lib2/x".to_string()]);
        assert!(!candidates[0].contains("lib1/utils/x"));
    }

    #[test]
    fn test_longer_prefix_wins_regardless_of_order() {
        let config = PathMappingConfig::new(base())
            .with_path("lib/utils/*", ["./lib2/*"])
            .with_path("lib/*", ["./lib1/*"]);
        let mapper = PathMapper::new(&config).unwrap();

        assert_eq!(
            mapped(&mapper, "lib/utils/x"),
            Some(vec!["/base/lib2/x".to_string()])
        );
        assert_eq!(
            mapped(&mapper, "lib/other"),
            Some(vec!["/base/lib1/other".to_string()])
        );
    }

    #[test]
    fn test_static_beats_wildcard_declared_first() {
        let config = PathMappingConfig::new(base())
            .with_path("*", ["w"])
            .with_path("foo", ["s"]);
        let mapper = PathMapper::new(&config).unwrap();

        let (rule, candidates) = mapper.map_with_rule("foo").unwrap();
        assert_eq!(rule.pattern, Pattern::Static("foo".to_string()));
        assert_eq!(normalize_path_for_test(&candidates[0]), "/base/s");
    }

    #[test]
    fn test_equal_weight_first_declared_wins() {
        let config = PathMappingConfig::new(base())
            .with_path("pkg*", ["first/*"])
            .with_path("pkg/*", ["second/*"])
            .with_path("pkg*", ["third/*"]);
        let mapper = PathMapper::new(&config).unwrap();

        // "pkg*" (weight 3) loses to "pkg/*" (weight 4)
        assert_eq!(
            mapped(&mapper, "pkg/a"),
            Some(vec!["/base/second/a".to_string()])
        );
        // only the two "pkg*" rules match; the first one is kept
        assert_eq!(
            mapped(&mapper, "pkgx"),
            Some(vec!["/base/first/x".to_string()])
        );
    }

    #[test]
    fn test_multiple_outputs_keep_order() {
        let config = PathMappingConfig::new(base())
            .with_path("@shared/*", ["packages/shared/src/*", "generated/*", "fallback"]);
        let mapper = PathMapper::new(&config).unwrap();

        assert_eq!(
            mapped(&mapper, "@shared/util"),
            Some(vec![
                "/base/packages/shared/src/util".to_string(),
                "/base/generated/util".to_string(),
                "/base/fallback".to_string(),
            ])
        );
    }

    #[test]
    fn test_empty_outputs_yield_empty_list() {
        let config = PathMappingConfig::new(base()).with_path("ghost/*", Vec::<String>::new());
        let mapper = PathMapper::new(&config).unwrap();

        assert_eq!(mapper.map("ghost/x"), Some(Vec::new()));
    }

    #[test]
    fn test_empty_capture_is_allowed() {
        let config = PathMappingConfig::new(base()).with_path("a*b", ["out/*"]);
        let mapper = PathMapper::new(&config).unwrap();

        assert_eq!(mapped(&mapper, "ab"), Some(vec!["/base/out/".to_string()]));
    }

    #[test]
    fn test_directory_template_keeps_trailing_separator() {
        let config = PathMappingConfig::new(base()).with_path("dir/*", ["pkgs/*/", "flat/*"]);
        let mapper = PathMapper::new(&config).unwrap();

        assert_eq!(
            mapped(&mapper, "dir/x"),
            Some(vec!["/base/pkgs/x/".to_string(), "/base/flat/x".to_string()])
        );
    }

    #[test]
    fn test_parent_segments_normalized() {
        let config =
            PathMappingConfig::new(Some(PathBuf::from("/repo/src"))).with_path("~/*", ["../lib/*"]);
        let mapper = PathMapper::new(&config).unwrap();

        assert_eq!(
            mapped(&mapper, "~/util"),
            Some(vec!["/repo/lib/util".to_string()])
        );
    }

    #[test]
    fn test_map_is_idempotent() {
        let config = PathMappingConfig::new(base())
            .with_path("@/*", ["src/*", "types/*"])
            .with_path("@/config", ["config/index"]);
        let mapper = PathMapper::new(&config).unwrap();

        assert_eq!(mapper.map("@/a/b"), mapper.map("@/a/b"));
        assert_eq!(mapper.map("@/config"), mapper.map("@/config"));
    }

    #[test]
    fn test_deserialize_preserves_order() {
        let json = r#"{
            "baseUrl": "/base",
            "paths": {
                "z/*": ["z/*"],
                "a/*": ["a/*"],
                "m": ["m"]
            }
        }"#;
        let config: PathMappingConfig = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = config
            .paths
            .as_ref()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, vec!["z/*", "a/*", "m"]);
        assert_eq!(config.base_url, Some(PathBuf::from("/base")));
    }

    #[test]
    fn test_deserialize_missing_and_null_paths() {
        let config: PathMappingConfig = serde_json::from_str(r#"{"baseUrl": "."}"#).unwrap();
        assert!(config.paths.is_none());

        let config: PathMappingConfig = serde_json::from_str(r#"{"paths": null}"#).unwrap();
        assert!(config.paths.is_none());
    }

    #[test]
    fn test_deserialize_rejects_non_array_outputs() {
        let result: Result<PathMappingConfig, _> =
            serde_json::from_str(r#"{"paths": {"a/*": "src/*"}}"#);
        assert!(result.is_err());
    }
}
