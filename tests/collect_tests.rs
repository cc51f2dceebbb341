//! Collect Tests
//!
//! Reads the fixture model directory and feeds the collected list back
//! through the transform.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

use waterline_schemas::{
    collect_models, discover_model_files, load_models, transform, write_models, ModelFilter,
    OutputFormat, SchemaFlavor, TransformOptions,
};

fn models_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/models")
}

fn identities(models: &[Value]) -> Vec<&str> {
    models.iter().filter_map(|m| m["identity"].as_str()).collect()
}

#[test]
fn test_discover_skips_non_json_files() {
    let files = discover_model_files(&models_dir()).unwrap();
    let names: Vec<_> = files
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, vec!["archive_box.json", "box.json", "boxset.json"]);
}

#[test]
fn test_collect_in_file_name_order() {
    let models = collect_models(&models_dir(), |_| true).unwrap();
    assert_eq!(identities(&models), vec!["archivebox", "box", "boxset"]);
}

#[test]
fn test_collect_with_exclusion_filter() {
    let filter = ModelFilter::new(&["^archive"]).unwrap();
    let models = collect_models(&models_dir(), |model| filter.allows(model)).unwrap();
    assert_eq!(identities(&models), vec!["box", "boxset"]);
}

#[test]
fn test_collect_empty_directory() {
    let dir = TempDir::new().unwrap();
    let models = collect_models(dir.path(), |_| true).unwrap();
    assert!(models.is_empty());
}

#[test]
fn test_collect_rejects_model_without_identity() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.json"), r#"{"attributes": {}}"#).unwrap();

    let result = collect_models(dir.path(), |_| true);
    assert!(result.is_err());
}

#[test]
fn test_collect_then_generate() {
    let dir = TempDir::new().unwrap();
    let collected = dir.path().join("waterline.json");

    let models = collect_models(&models_dir(), |_| true).unwrap();
    write_models(&collected, &models, OutputFormat::Pretty).unwrap();

    let loaded = load_models(&collected).unwrap();
    assert_eq!(loaded.len(), 3);

    let document = transform(&loaded, &TransformOptions::new(SchemaFlavor::Definitions));
    let keys: Vec<_> = document.definitions.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["archivebox", "box", "boxset"]);
    assert_eq!(
        document.definitions["box"].properties["boxset"].reference.as_deref(),
        Some("#/definitions/boxset")
    );
    assert!(!document.definitions["boxset"].additional_properties);
}
