//! `tsmap scope`: nearest package.json of a path.

use super::{absolute_input, print_json};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tsmap_core::version::SCHEMA_VERSION;
use tsmap_core::{Config, PackageScope, PackageScopeLookup};

#[derive(Serialize)]
struct ScopeOutput {
    schema_version: u32,
    path: PathBuf,
    scope: Option<PackageScope>,
}

/// Run the scope command.
pub fn run(config: &Config, path: &Path, json: bool) -> Result<()> {
    let path = absolute_input(&config.cwd, path);
    let scope = PackageScopeLookup::new()
        .find_package_scope(&path)
        .into_diagnostic()?;

    if json {
        return print_json(&ScopeOutput {
            schema_version: SCHEMA_VERSION,
            path,
            scope,
        });
    }

    match scope {
        Some(scope) => {
            println!("{}", scope.manifest_path().display());
            if let Some(name) = &scope.data.name {
                println!("  name: {name}");
            }
            if let Some(package_type) = scope.data.package_type {
                println!("  type: {}", package_type.as_str());
            }
            if let Some(main) = &scope.data.main {
                println!("  main: {main}");
            }
        }
        None => println!("{}: no package scope", path.display()),
    }

    Ok(())
}
