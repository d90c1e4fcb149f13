use super::print_json;
use miette::Result;
use serde::Serialize;
use tsmap_core::version::{version_string, SCHEMA_VERSION};
use tsmap_core::VERSION;

#[derive(Serialize)]
struct VersionOutput {
    schema_version: u32,
    version: &'static str,
}

pub fn run(json: bool) -> Result<()> {
    if json {
        return print_json(&VersionOutput {
            schema_version: SCHEMA_VERSION,
            version: VERSION,
        });
    }

    println!("{}", version_string());
    Ok(())
}
