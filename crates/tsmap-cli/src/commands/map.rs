//! `tsmap map`: candidate paths for specifiers.

use super::{load_tsconfig, print_json};
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;
use tsmap_core::version::SCHEMA_VERSION;
use tsmap_core::{Config, PathMapper};

#[derive(Serialize)]
struct MapOutput {
    schema_version: u32,
    tsconfig: Option<PathBuf>,
    base_url: Option<PathBuf>,
    results: Vec<MapResult>,
}

#[derive(Serialize)]
struct MapResult {
    specifier: String,
    mapped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    rule: Option<String>,
    candidates: Vec<PathBuf>,
}

/// Run the map command.
pub fn run(config: &Config, specifiers: &[String], json: bool) -> Result<()> {
    let tsconfig = load_tsconfig(config)?;

    let mapper = match &tsconfig {
        Some(tsconfig) => tsconfig
            .path_mapper()
            .into_diagnostic()
            .wrap_err("Invalid paths configuration")?,
        None => PathMapper::empty(),
    };

    let results: Vec<MapResult> = specifiers
        .iter()
        .map(|specifier| {
            let result = match mapper.map_with_rule(specifier) {
                Some((rule, candidates)) => MapResult {
                    specifier: specifier.clone(),
                    mapped: true,
                    rule: Some(rule.pattern.to_string()),
                    candidates,
                },
                None => MapResult {
                    specifier: specifier.clone(),
                    mapped: false,
                    rule: None,
                    candidates: Vec::new(),
                },
            };
            debug!(
                specifier = %specifier,
                mapped = result.mapped,
                candidates = result.candidates.len(),
                "mapped specifier"
            );
            result
        })
        .collect();

    if json {
        return print_json(&MapOutput {
            schema_version: SCHEMA_VERSION,
            tsconfig: tsconfig.as_ref().map(|t| t.path.clone()),
            base_url: (!mapper.is_empty()).then(|| mapper.base_dir().to_path_buf()),
            results,
        });
    }

    print_human(&results).into_diagnostic()
}

fn print_human(results: &[MapResult]) -> io::Result<()> {
    let mut out = io::stdout().lock();

    for result in results {
        match &result.rule {
            Some(rule) => {
                writeln!(out, "{} (via \"{rule}\")", result.specifier)?;
                if result.candidates.is_empty() {
                    writeln!(out, "  (rule has no outputs)")?;
                }
                for (i, candidate) in result.candidates.iter().enumerate() {
                    writeln!(out, "  {}. {}", i + 1, candidate.display())?;
                }
            }
            None => writeln!(out, "{}: no mapping", result.specifier)?,
        }
    }

    Ok(())
}
