pub mod classify;
pub mod map;
pub mod scope;
pub mod version;

use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tsmap_core::{Config, TsConfig};

/// Load the project's tsconfig, if there is one.
///
/// An explicit `--project` that cannot be loaded is an error; with no
/// tsconfig found the commands run with an empty configuration.
pub fn load_tsconfig(config: &Config) -> Result<Option<TsConfig>> {
    let Some(path) = config.tsconfig_path() else {
        info!(cwd = %config.cwd.display(), "no tsconfig.json found");
        return Ok(None);
    };

    let tsconfig = TsConfig::load(&path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to load {}", path.display()))?;

    debug!(
        path = %tsconfig.path.display(),
        base_url = ?tsconfig.mapping.base_url,
        paths = tsconfig.mapping.paths.as_ref().map_or(0, Vec::len),
        module_types = tsconfig.module_types.len(),
        "loaded tsconfig"
    );

    Ok(Some(tsconfig))
}

/// Make a user-supplied path absolute against the working directory.
///
/// Existing paths are canonicalized; others are kept as joined.
pub fn absolute_input(cwd: &Path, input: &Path) -> PathBuf {
    let joined = cwd.join(input);
    dunce::canonicalize(&joined).unwrap_or(joined)
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{json}");
    Ok(())
}
