//! Model collection
//!
//! Gathers model definition files from a directory into one ordered list,
//! dropping models rejected by a filter before they reach the transform.

use regex::Regex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::OutputFormat;
use crate::error::{Result, SchemaError};
use crate::loader::{read_json, write_json};
use crate::model::ModelDefinition;

/// Excludes models whose identity matches any pattern
#[derive(Debug, Clone, Default)]
pub struct ModelFilter {
    exclude: Vec<Regex>,
}

impl ModelFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let exclude = patterns
            .iter()
            .map(|pattern| Regex::new(pattern.as_ref()))
            .collect::<std::result::Result<_, _>>()?;
        Ok(Self { exclude })
    }

    pub fn allows(&self, model: &ModelDefinition) -> bool {
        !self.exclude.iter().any(|re| re.is_match(&model.identity))
    }
}

/// `.json` files directly under `dir`, sorted by file name
pub fn discover_model_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(SchemaError::FileNotFound {
            path: dir.to_path_buf(),
        });
    }

    let files = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();

    Ok(files)
}

/// Read every model file under `dir`, keeping the raw definitions the
/// filter accepts. Each file must hold one model definition object.
pub fn collect_models<F>(dir: &Path, filter: F) -> Result<Vec<Value>>
where
    F: Fn(&ModelDefinition) -> bool,
{
    info!(source = %dir.display(), "Collecting model files");

    let files = discover_model_files(dir)?;
    if files.is_empty() {
        warn!(source = %dir.display(), "No model files found");
    }

    let mut models = Vec::with_capacity(files.len());
    for (index, path) in files.iter().enumerate() {
        debug!(file = %path.display(), "Processing model file");
        let raw = read_json(path)?;
        let model = ModelDefinition::from_value(index, &raw)?;

        if filter(&model) {
            models.push(raw);
        } else {
            debug!(identity = %model.identity, "Excluded by filter");
        }
    }

    info!(files = files.len(), models = models.len(), "Collected models");
    Ok(models)
}

/// Write collected models as a single JSON array file
pub fn write_models(path: &Path, models: &[Value], format: OutputFormat) -> Result<()> {
    write_json(path, &models, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_matches_identity() {
        let filter = ModelFilter::new(&["^archive", "log$"]).unwrap();
        assert!(filter.allows(&ModelDefinition::new("box")));
        assert!(!filter.allows(&ModelDefinition::new("archived_box")));
        assert!(!filter.allows(&ModelDefinition::new("auditlog")));
    }

    #[test]
    fn test_empty_filter_allows_everything() {
        let filter = ModelFilter::default();
        assert!(filter.allows(&ModelDefinition::new("anything")));
    }

    #[test]
    fn test_invalid_filter_pattern() {
        let err = ModelFilter::new(&["("]).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidFilter(_)));
    }

    #[test]
    fn test_missing_directory() {
        let err = discover_model_files(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, SchemaError::FileNotFound { .. }));
    }

    #[test]
    fn test_write_models_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("waterline.json");
        let models = vec![json!({"identity": "box", "attributes": {}})];

        write_models(&path, &models, OutputFormat::Compact).unwrap();
        assert_eq!(read_json(&path).unwrap(), json!(models));
    }
}
