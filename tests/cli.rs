/// End-to-end tests for the CLI
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;

fn matches(spdx: &str, score: f64) -> Value {
    serde_json::json!([{ "matches": [{ "license_expression_spdx": spdx, "score": score }] }])
}

fn file(path: &str, detections: Value) -> Value {
    let name = path.rsplit('/').next().unwrap();
    serde_json::json!({ "path": path, "name": name, "type": "file", "license_detections": detections })
}

fn clean_files() -> Vec<Value> {
    vec![
        serde_json::json!({ "path": "third_party/mylib", "name": "mylib", "type": "directory" }),
        file("third_party/mylib/LICENSE", matches("MIT", 100.0)),
        file("third_party/mylib/src/a.c", matches("MIT", 100.0)),
        file("third_party/mylib/src/b.h", matches("X11", 90.0)),
        file("third_party/mylib/Makefile", serde_json::json!([])),
    ]
}

fn mixed_files() -> Vec<Value> {
    let mut files = clean_files();
    files.push(file("third_party/gpllib/LICENSE.txt", matches("GPL-3.0-only", 100.0)));
    files.push(file("third_party/gpllib/x.c", matches("AGPL-3.0-only", 100.0)));
    files.push(file("third_party/bare/bare.c", serde_json::json!([])));
    files
}

fn write_scan(dir: &Path, files: Vec<Value>) -> PathBuf {
    let path = dir.join("scan_result.json");
    let report = serde_json::json!({ "headers": [], "files": files });
    std::fs::write(&path, serde_json::to_string(&report).unwrap()).unwrap();
    path
}

fn json_report(input: &Path, extra: &[&str]) -> Vec<Value> {
    let output = cargo_bin_cmd!("license-verdict")
        .arg(input)
        .args(["--report", "json"])
        .args(extra)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice::<Vec<Value>>(&output.stdout).unwrap()
}

#[test]
fn test_help_succeeds() {
    cargo_bin_cmd!("license-verdict").arg("--help").assert().code(0);
}

#[test]
fn test_invalid_format_is_rejected() {
    cargo_bin_cmd!("license-verdict")
        .args(["--report", "pdf"])
        .assert()
        .code(2);
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("license-verdict")
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_json_verdicts() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_scan(dir.path(), mixed_files());
    let report = json_report(&input, &[]);

    let names: Vec<&str> = report.iter().map(|l| l["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["mylib", "gpllib", "bare"]);

    assert_eq!(report[0]["verdict"], "MIT");
    assert_eq!(report[0]["basis"], "LicenseFiles");
    let presentations: Vec<&str> = report[0]["groups"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["presentation"].as_str().unwrap())
        .collect();
    assert_eq!(presentations, vec!["Consistent", "Consistent"]);

    assert_eq!(report[1]["verdict"], "GPL-3.0-only");
    assert_eq!(report[1]["groups"][0]["license"], "AGPL-3.0-only");
    assert_eq!(report[1]["groups"][0]["presentation"], "Inconsistent");

    assert_eq!(report[2]["verdict"], "Unknown");
    assert_eq!(report[2]["basis"], "Unknown");
    assert_eq!(report[2]["groups"][0]["presentation"], "Absent");
}

#[test]
fn test_strict_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    let mixed = write_scan(dir.path(), mixed_files());
    cargo_bin_cmd!("license-verdict")
        .arg(&mixed)
        .args(["--strict", "--quiet"])
        .assert()
        .code(1);

    let clean_dir = tempfile::tempdir().unwrap();
    let clean = write_scan(clean_dir.path(), clean_files());
    cargo_bin_cmd!("license-verdict")
        .arg(&clean)
        .args(["--strict", "--quiet"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Libraries: 1"));
}

#[test]
fn test_mermaid_and_relations_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_scan(dir.path(), mixed_files());
    let list = dir.path().join("out").join("license_list.mmd");
    let relations = dir.path().join("out").join("license_relation.mmd");

    cargo_bin_cmd!("license-verdict")
        .arg(&input)
        .arg("--mermaid")
        .arg(&list)
        .arg("--relations")
        .arg(&relations)
        .arg("--quiet")
        .assert()
        .success();

    let text = std::fs::read_to_string(&list).unwrap();
    assert!(text.starts_with("---\nconfig:\n    maxTextSize: 90000\n---\ngraph LR\n"));
    assert!(text.contains("gpllib --> gpllib_AGPL_3_0_only"));
    assert!(text.contains("background-color: tomato;"));
    assert!(text.contains("background-color: gray;"));

    let graph = std::fs::read_to_string(&relations).unwrap();
    assert_eq!(graph.lines().next(), Some("graph TD"));
    assert_eq!(graph.lines().count(), 38);
}

#[test]
fn test_tree_export_and_rerender() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_scan(dir.path(), clean_files());
    let tree_path = dir.path().join("license_tree.json");

    json_report(&input, &["--tree-out", tree_path.to_str().unwrap()]);

    let mut tree: Value =
        serde_json::from_str(&std::fs::read_to_string(&tree_path).unwrap()).unwrap();
    assert_eq!(tree["mylib"]["LicenseFiles"]["MIT"][0]["path"], "third_party/mylib/LICENSE");
    tree["mylib"]["OtherFiles"]["X11"][0]["modified"] = Value::Bool(true);
    std::fs::write(&tree_path, serde_json::to_string(&tree).unwrap()).unwrap();

    let list = dir.path().join("list.mmd");
    cargo_bin_cmd!("license-verdict")
        .arg(&tree_path)
        .arg("--from-tree")
        .arg("--mermaid")
        .arg(&list)
        .arg("--quiet")
        .assert()
        .success();
    assert!(std::fs::read_to_string(&list).unwrap().contains("🖊️"));
}

#[test]
fn test_shallow_path_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_scan(dir.path(), vec![file("LICENSE", matches("MIT", 100.0))]);
    cargo_bin_cmd!("license-verdict")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot derive a library name from LICENSE"));
}

#[test]
fn test_project_config_adds_relations() {
    let dir = tempfile::tempdir().unwrap();
    let cfg_dir = dir.path().join(".license-verdict");
    std::fs::create_dir_all(&cfg_dir).unwrap();
    std::fs::write(
        cfg_dir.join("config.toml"),
        "[[relations.extra]]\nouter = \"LicenseRef-acme\"\ninner = \"MIT\"\n",
    )
    .unwrap();

    let mut files = clean_files();
    files.push(file("third_party/mylib/src/c.c", matches("LicenseRef-acme", 100.0)));
    let input = write_scan(dir.path(), files);

    let report = json_report(&input, &[]);
    let acme = report[0]["groups"]
        .as_array()
        .unwrap()
        .iter()
        .find(|g| g["license"] == "LicenseRef-acme")
        .unwrap()
        .clone();
    assert_eq!(acme["presentation"], "Consistent");
}
