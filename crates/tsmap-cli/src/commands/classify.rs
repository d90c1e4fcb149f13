//! `tsmap classify`: module format of files.

use super::{absolute_input, load_tsconfig, print_json};
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;
use tsmap_core::version::SCHEMA_VERSION;
use tsmap_core::{
    resolve_format, Config, ModuleFormat, ModuleFormatClassifier, ModuleTypeOverrides,
    OverrideKind, PackageScopeLookup,
};

#[derive(Serialize)]
struct ClassifyOutput {
    schema_version: u32,
    package_scope: bool,
    results: Vec<ClassifyResult>,
}

#[derive(Serialize)]
struct ClassifyResult {
    path: PathBuf,
    format: ModuleFormat,
    #[serde(rename = "override", skip_serializing_if = "Option::is_none")]
    override_kind: Option<OverrideKind>,
}

/// Run the classify command.
pub fn run(config: &Config, files: &[PathBuf], package_scope: bool, json: bool) -> Result<()> {
    let overrides = match load_tsconfig(config)? {
        Some(tsconfig) => tsconfig
            .overrides()
            .into_diagnostic()
            .wrap_err("Invalid moduleTypes configuration")?,
        None => ModuleTypeOverrides::default(),
    };

    let scopes = PackageScopeLookup::new();
    let classifier = ModuleFormatClassifier::new(&scopes);

    let mut results = Vec::with_capacity(files.len());
    for file in files {
        let path = absolute_input(&config.cwd, file);
        let format = resolve_format(&path, package_scope, &overrides, &classifier)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to classify {}", path.display()))?;
        let override_kind = overrides.lookup(&path);

        debug!(path = %path.display(), %format, ?override_kind, "classified");
        results.push(ClassifyResult {
            path,
            format,
            override_kind,
        });
    }

    debug!(manifests = scopes.cache().stats().entry_count, "scope cache");

    if json {
        return print_json(&ClassifyOutput {
            schema_version: SCHEMA_VERSION,
            package_scope,
            results,
        });
    }

    print_human(&results).into_diagnostic()
}

fn print_human(results: &[ClassifyResult]) -> io::Result<()> {
    let mut out = io::stdout().lock();

    for result in results {
        write!(out, "{}: {}", result.path.display(), result.format)?;
        if let Some(kind) = result.override_kind {
            write!(out, " (moduleTypes: {})", kind.as_str())?;
        }
        writeln!(out)?;
    }

    Ok(())
}
