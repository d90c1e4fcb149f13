//! Integration tests for `tsmap classify --json` output.

use serial_test::serial;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn cargo_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO"));
    cmd.args(["run", "-p", "tsmap-cli", "--bin", "tsmap", "--"]);
    cmd
}

fn classify_json(cwd: &Path, extra: &[&str], files: &[&str]) -> serde_json::Value {
    let output = cargo_bin()
        .arg("--json")
        .arg("--cwd")
        .arg(cwd)
        .arg("classify")
        .args(extra)
        .args(files)
        .output()
        .expect("Failed to run classify command");

    assert!(
        output.status.success(),
        "classify failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("stdout should be valid JSON")
}

fn formats(json: &serde_json::Value) -> Vec<String> {
    json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["format"].as_str().unwrap().to_string())
        .collect()
}

#[test]
#[serial]
fn test_classify_by_extension() {
    let dir = tempdir().unwrap();

    let json = classify_json(dir.path(), &[], &["a.cjs", "b.mts", "c.js", "d.json"]);

    assert_eq!(json["schema_version"].as_u64(), Some(1));
    assert_eq!(json["package_scope"], false);
    assert_eq!(formats(&json), ["cjs", "esm", "unspecified", "unspecified"]);
}

#[test]
#[serial]
fn test_classify_with_package_scope() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let legacy = dir.path().join("legacy");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&legacy).unwrap();
    fs::write(dir.path().join("package.json"), r#"{"type": "module"}"#).unwrap();
    fs::write(legacy.join("package.json"), r#"{"name": "legacy"}"#).unwrap();

    let json = classify_json(
        dir.path(),
        &["--package-scope"],
        &["src/a.js", "legacy/b.ts", "src/c.cts"],
    );

    assert_eq!(json["package_scope"], true);
    assert_eq!(
        formats(&json),
        ["node-flavored-esm", "node-flavored-cjs", "node-flavored-cjs"]
    );
}

#[test]
#[serial]
fn test_classify_module_types_override() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("tsconfig.json"),
        r#"{"tsmap": {"moduleTypes": {"scripts/**": "cjs", "scripts/esm/**": "esm"}}}"#,
    )
    .unwrap();

    let json = classify_json(
        dir.path(),
        &[],
        &["scripts/build.mjs", "scripts/esm/run.cjs", "src/a.mjs"],
    );

    assert_eq!(formats(&json), ["cjs", "esm", "esm"]);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results[0]["override"], "cjs");
    assert_eq!(results[1]["override"], "esm");
    assert!(results[2].get("override").is_none());
}

#[test]
#[serial]
fn test_classify_malformed_manifest_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("package.json"), "{ not json").unwrap();

    let output = cargo_bin()
        .arg("--cwd")
        .arg(dir.path())
        .args(["classify", "--package-scope", "a.js"])
        .output()
        .expect("Failed to run classify command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("package.json"), "stderr: {stderr}");
}
