//! `tsconfig.json` loading.
//!
//! Reads the parts of a tsconfig that tsmap needs:
//! - `compilerOptions.baseUrl`, resolved against the directory of the file
//!   that declares it;
//! - `compilerOptions.paths`, kept in declaration order;
//! - `tsmap.moduleTypes` overrides, anchored at the declaring file's directory.
//!
//! Comments and trailing commas are accepted, as `tsc` accepts them.
//! `extends` chains are followed; options from the extending file replace
//! the inherited ones field by field.

use crate::error::{Error, Result};
use crate::mapper::{deserialize_ordered_map, PathEntries, PathMapper, PathMappingConfig};
use crate::overrides::{ModuleTypeOverride, ModuleTypeOverrides, OverrideKind};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tsmap_util::fs::read_to_string_lossy;
use tsmap_util::path::normalize;

/// Default config file name.
pub const TSCONFIG_JSON: &str = "tsconfig.json";

/// Find the nearest `tsconfig.json` by walking up from `cwd`.
#[must_use]
pub fn find_tsconfig(cwd: &Path) -> Option<PathBuf> {
    let mut current = cwd.to_path_buf();

    loop {
        let candidate = current.join(TSCONFIG_JSON);
        if candidate.is_file() {
            return Some(candidate);
        }

        if !current.pop() {
            return None;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTsConfig {
    #[serde(default)]
    extends: Option<Extends>,
    #[serde(default)]
    compiler_options: RawCompilerOptions,
    #[serde(default)]
    tsmap: RawToolOptions,
}

/// `extends` is a single config or, since TypeScript 5.0, a list applied in order.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Extends {
    One(String),
    Many(Vec<String>),
}

impl Extends {
    fn as_slice(&self) -> &[String] {
        match self {
            Self::One(one) => std::slice::from_ref(one),
            Self::Many(many) => many,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCompilerOptions {
    #[serde(default)]
    base_url: Option<PathBuf>,
    #[serde(default, deserialize_with = "deserialize_ordered_map")]
    paths: Option<PathEntries>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawToolOptions {
    #[serde(default, deserialize_with = "deserialize_ordered_map")]
    module_types: Option<Vec<(String, OverrideKind)>>,
}

/// A loaded tsconfig with `extends` applied.
#[derive(Debug, Clone, Default)]
pub struct TsConfig {
    /// The file that was loaded (not the files it extends).
    pub path: PathBuf,
    /// Effective `baseUrl` (absolute) and `paths`.
    pub mapping: PathMappingConfig,
    /// Effective `moduleTypes` entries.
    pub module_types: Vec<ModuleTypeOverride>,
    /// Directory the `moduleTypes` patterns are relative to.
    pub module_types_base: PathBuf,
}

impl TsConfig {
    /// Load `path` and everything it extends.
    pub fn load(path: &Path) -> Result<Self> {
        let path = normalize(&std::path::absolute(path)?);
        let mut seen = HashSet::new();
        let mut config = Self::load_chain(&path, &mut seen)?;
        config.path = path;
        Ok(config)
    }

    fn load_chain(path: &Path, seen: &mut HashSet<PathBuf>) -> Result<Self> {
        if !seen.insert(path.to_path_buf()) {
            return Err(Error::ConfigExtendsCycle {
                path: path.to_path_buf(),
            });
        }

        let raw = read_raw(path)?;
        let dir = path.parent().unwrap_or(Path::new("/")).to_path_buf();

        let mut config = Self::default();
        for extends in raw.extends.as_ref().map_or(&[][..], Extends::as_slice) {
            let parent = Self::load_chain(&resolve_extends(&dir, extends), seen)?;
            config.inherit(parent);
        }

        if let Some(base_url) = raw.compiler_options.base_url {
            config.mapping.base_url = Some(normalize(&dir.join(base_url)));
        }
        if let Some(paths) = raw.compiler_options.paths {
            config.mapping.paths = Some(paths);
        }
        if let Some(module_types) = raw.tsmap.module_types {
            config.module_types = module_types
                .into_iter()
                .map(|(pattern, kind)| ModuleTypeOverride::new(pattern, kind))
                .collect();
            config.module_types_base = dir;
        }

        // Only the current chain counts; a config may be reached twice through siblings.
        seen.remove(path);
        Ok(config)
    }

    /// Layer `later` over `self`, field by field.
    fn inherit(&mut self, later: Self) {
        if later.mapping.base_url.is_some() {
            self.mapping.base_url = later.mapping.base_url;
        }
        if later.mapping.paths.is_some() {
            self.mapping.paths = later.mapping.paths;
        }
        if !later.module_types.is_empty() {
            self.module_types = later.module_types;
            self.module_types_base = later.module_types_base;
        }
    }

    /// Compile the effective `paths` table.
    pub fn path_mapper(&self) -> Result<PathMapper> {
        PathMapper::new(&self.mapping)
    }

    /// Compile the effective `moduleTypes` overrides.
    pub fn overrides(&self) -> Result<ModuleTypeOverrides> {
        ModuleTypeOverrides::compile(&self.module_types_base, self.module_types.iter().cloned())
    }
}

fn read_raw(path: &Path) -> Result<RawTsConfig> {
    let source = read_to_string_lossy(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let json = strip_trailing_commas(&strip_comments(source.trim_start_matches('\u{feff}')));
    if json.trim().is_empty() {
        return Ok(RawTsConfig::default());
    }

    serde_json::from_str(&json).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve an `extends` value relative to the extending config's directory.
///
/// Relative and absolute values name a file (`.json` is appended when the
/// bare name does not exist). Anything else is looked up in `node_modules`
/// directories walking up, where a directory means its `tsconfig.json`.
fn resolve_extends(dir: &Path, extends: &str) -> PathBuf {
    let is_path = extends.starts_with("./")
        || extends.starts_with("../")
        || Path::new(extends).is_absolute();

    if is_path {
        return with_json_fallback(normalize(&dir.join(extends)));
    }

    for ancestor in dir.ancestors() {
        let candidate = ancestor.join("node_modules").join(extends);
        if candidate.is_dir() {
            return candidate.join(TSCONFIG_JSON);
        }
        let candidate = with_json_fallback(candidate);
        if candidate.is_file() {
            return candidate;
        }
    }

    // Not found: report the first place that was looked at.
    dir.join("node_modules").join(extends)
}

fn with_json_fallback(path: PathBuf) -> PathBuf {
    if path.is_file() || path.extension().is_some_and(|ext| ext == "json") {
        return path;
    }
    let mut with_ext = path.into_os_string();
    with_ext.push(".json");
    PathBuf::from(with_ext)
}

/// Strip `//` and `/* */` comments outside of string literals.
fn strip_comments(source: &str) -> String {
    let mut result = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(ch) = chars.next() {
        if in_string {
            result.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match (ch, chars.peek()) {
            ('/', Some('/')) => {
                // Keep the newline so line numbers in parse errors still line up
                for next in chars.by_ref() {
                    if next == '\n' {
                        result.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if next == '\n' {
                        result.push('\n');
                    }
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => {
                if ch == '"' {
                    in_string = true;
                }
                result.push(ch);
            }
        }
    }

    result
}

/// Drop commas that directly precede `}` or `]`. Input must be comment-free.
fn strip_trailing_commas(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut result = String::with_capacity(source.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &ch) in chars.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
        } else if ch == '"' {
            in_string = true;
        } else if ch == ',' {
            let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
            if matches!(next, Some('}' | ']')) {
                continue;
            }
        }
        result.push(ch);
    }

    result
}
