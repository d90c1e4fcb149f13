//! Version and JSON output schema constants.

use std::fmt::Write;

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version of the `--json` documents printed by `tsmap`.
///
/// Covers the `results` entries of `map` (`specifier`, `mapped`, `rule`,
/// `candidates`) and `classify` (`path`, `format`, `override`), the
/// `scope` document with its filtered manifest `data`, and the
/// `ModuleFormat` / `PackageType` spellings inside them. Adding a field
/// keeps the version; renaming or removing one, or changing a spelling,
/// bumps it.
pub const SCHEMA_VERSION: u32 = 1;

/// Returns a formatted version string including build metadata if available.
#[must_use]
pub fn version_string() -> String {
    let mut s = format!("tsmap {VERSION}");

    if let Some(hash) = option_env!("TSMAP_BUILD_GIT_HASH") {
        let _ = write!(s, " ({hash})");
    }

    s
}
