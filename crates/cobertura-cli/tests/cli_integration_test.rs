//! Integration tests for the `cobertura` binary
//!
//! Each test runs the binary inside its own temporary project directory laid
//! out like the real one (`data/geojson`, `web/data`).

use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(project: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cobertura"))
        .args(args)
        .current_dir(project)
        .env_remove("COBERTURA_SOURCE_DIR")
        .env_remove("COBERTURA_OUTPUT_DIR")
        .env_remove("COBERTURA_INDEX_PATH")
        .env_remove("COBERTURA_URBAN_PATTERN")
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute command")
}

fn stdout_json(output: &Output) -> Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let source_dir = dir.path().join("data/geojson");
    fs::create_dir_all(&source_dir).unwrap();

    write_json(
        &source_dir.join("URB_ISSSTE.geojson"),
        &json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"CVE_AGEB": "0456", "NOM_MUN": "GÓMEZ PALACIO", "INSTITUCION": "ISSSTE"},
                "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [0, 2], [2, 2], [2, 0], [0, 0]]]}
            }]
        }),
    );

    write_json(
        &source_dir.join("RUR_ISSSTE.geojson"),
        &json!({
            "type": "FeatureCollection",
            "name": "RUR_ISSSTE",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"NOMLOC": "Bermejillo", "NOM_MUN": "Mapimí", "POBTOT": 300, "EXTRA": "x"},
                    "geometry": {"type": "Point", "coordinates": [-103.6, 25.9]}
                },
                {
                    "type": "Feature",
                    "properties": {"NOM_LOC": "Polígono"},
                    "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [0, 1], [1, 1], [0, 0]]]}
                }
            ]
        }),
    );

    dir
}

#[test]
fn test_index_all_json_output() {
    let project = project();

    let output = run(project.path(), &["index", "--category", "all", "--json"]);
    assert!(output.status.success(), "Command should succeed");

    let parsed = stdout_json(&output);
    assert_eq!(parsed["status"], "success");
    let reports = parsed["data"]["reports"].as_array().expect("Should have reports");
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["category"], "urbano");
    assert_eq!(reports[0]["added"], 1);
    assert_eq!(reports[1]["category"], "rural");
    assert_eq!(reports[1]["files_found"], 1);
    assert_eq!(reports[1]["total"], 3);

    let index_path = project.path().join("web/data/search_index.json");
    let index: Value = serde_json::from_str(&fs::read_to_string(index_path).unwrap()).unwrap();
    let names: Vec<&str> =
        index.as_array().unwrap().iter().map(|r| r["n"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["AGEB 0456", "Bermejillo", "Polígono"]);
    assert_eq!(index[0]["m"], "Gómez Palacio");
    assert_eq!(index[1]["i"], "ISSSTE");
}

#[test]
fn test_dry_run_writes_nothing() {
    let project = project();

    let output = run(project.path(), &["index", "--dry-run"]);
    assert!(output.status.success(), "Command should succeed");
    assert!(!project.path().join("web").exists(), "Dry-run should not create outputs");

    let output = run(project.path(), &["optimize", "--dry-run", "--json"]);
    assert!(output.status.success(), "Command should succeed");
    assert!(!project.path().join("web").exists(), "Dry-run should not create outputs");

    let parsed = stdout_json(&output);
    let data = parsed.get("data").expect("Should have data field");
    assert_eq!(data.get("dry_run").and_then(|v| v.as_bool()), Some(true));
    let actions = data["planned_actions"].as_array().unwrap();
    assert_eq!(actions.len(), 4);
}

#[test]
fn test_missing_source_dir_fails() {
    let project = TempDir::new().unwrap();

    let output = run(project.path(), &["index"]);
    assert!(!output.status.success(), "Command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Source directory not found"));
    assert!(!project.path().join("web").exists());
}

#[test]
fn test_optimize_single_dataset() {
    let project = project();

    let output = run(project.path(), &["optimize", "--dataset", "issste", "--json"]);
    assert!(output.status.success(), "Command should succeed");

    let parsed = stdout_json(&output);
    let outcomes = parsed["data"]["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0]["outcome"], "written");
    assert_eq!(outcomes[0]["features_kept"], 1);
    assert_eq!(outcomes[0]["skipped_not_point"], 1);

    let trimmed = fs::read_to_string(project.path().join("web/data/rural_issste.geojson")).unwrap();
    assert!(!trimmed.contains('\n'), "Trimmed output should be compact");
    assert!(trimmed.contains("Mapimí"), "Non-ASCII should be written literally");

    let trimmed: Value = serde_json::from_str(&trimmed).unwrap();
    assert_eq!(trimmed["name"], "RUR_ISSSTE");
    assert_eq!(
        trimmed["features"][0]["properties"],
        json!({"NOM_LOC": "Bermejillo", "NOM_MUN": "Mapimí", "POBTOT": 300, "INSTITUCION": "ISSSTE"})
    );
}

#[test]
fn test_optimize_unknown_dataset_fails() {
    let project = project();

    let output = run(project.path(), &["optimize", "--dataset", "rural_x"]);
    assert!(!output.status.success(), "Command should fail");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown dataset: rural_x"));
}

#[test]
fn test_inspect_reports_counts() {
    let project = project();

    let output = run(project.path(), &["inspect", "--json"]);
    assert!(output.status.success(), "Command should succeed");
    let parsed = stdout_json(&output);
    assert_eq!(parsed["data"]["load"]["status"], "missing");
    assert_eq!(parsed["data"]["records"], 0);

    assert!(run(project.path(), &["index", "--category", "all"]).status.success());

    let output = run(project.path(), &["inspect", "--json", "--show-config"]);
    let parsed = stdout_json(&output);
    let data = &parsed["data"];
    assert_eq!(data["records"], 3);
    assert_eq!(data["sorted"], true);
    assert_eq!(data["categories"], json!([
        {"category": "rural", "records": 2},
        {"category": "urbano", "records": 1}
    ]));
    assert!(data["config"].as_array().unwrap().iter().any(|row| row["key"] == "index_path"));
}
