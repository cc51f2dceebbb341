//! Configuration management for the generator
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (waterline-schemas.toml)
//! - Environment variables (WATERLINE_SCHEMAS__*)
//!
//! ## Example config file (waterline-schemas.toml):
//! ```toml
//! [collect]
//! source = "./api/models"
//! output = "./waterline.json"
//! exclude = ["^archive"]
//!
//! [generate]
//! source = "./waterline.json"
//! output = "./schema.json"
//! uri_prefix = "/api/v1"
//!
//! [json_schema]
//! output = "./json-schema.json"
//!
//! [output]
//! format = "pretty"
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::collect::ModelFilter;
use crate::error::Result;
use crate::transform::{SchemaFlavor, TransformOptions};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Model collection settings
    #[serde(default)]
    pub collect: CollectConfig,

    /// Definitions-flavor generation settings
    #[serde(default)]
    pub generate: GenerateConfig,

    /// Swagger-flavor generation settings
    #[serde(default)]
    pub json_schema: JsonSchemaConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Collect configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectConfig {
    /// Directory holding one model definition per `.json` file
    #[serde(default = "default_models_dir")]
    pub source: PathBuf,

    /// Collected model list
    #[serde(default = "default_models_file")]
    pub output: PathBuf,

    /// Identity patterns to exclude
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Generate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Model list produced by `collect`
    #[serde(default = "default_models_file")]
    pub source: PathBuf,

    #[serde(default = "default_schema_file")]
    pub output: PathBuf,

    /// Document id
    #[serde(default)]
    pub id: Option<String>,

    /// Prefix for generated element ids
    #[serde(default)]
    pub uri_prefix: Option<String>,
}

/// JSON-schema (Swagger flavor) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSchemaConfig {
    #[serde(default = "default_json_schema_file")]
    pub output: PathBuf,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Four-space indentation
    #[default]
    Pretty,
    Compact,
}

// Default value functions
fn default_models_dir() -> PathBuf {
    PathBuf::from("./models")
}

fn default_models_file() -> PathBuf {
    PathBuf::from("./waterline.json")
}

fn default_schema_file() -> PathBuf {
    PathBuf::from("./schema.json")
}

fn default_json_schema_file() -> PathBuf {
    PathBuf::from("./json-schema.json")
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            source: default_models_dir(),
            output: default_models_file(),
            exclude: Vec::new(),
        }
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            source: default_models_file(),
            output: default_schema_file(),
            id: None,
            uri_prefix: None,
        }
    }
}

impl Default for JsonSchemaConfig {
    fn default() -> Self {
        Self {
            output: default_json_schema_file(),
        }
    }
}

impl SchemaConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = [
            "waterline-schemas.toml",
            ".waterline-schemas.toml",
            "config/waterline-schemas.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("dev", "waterline", "schemas") {
            let xdg_config = config_dir.config_dir().join("waterline-schemas.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("WATERLINE_SCHEMAS")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Transform options for a flavor. Both flavors share `id` and `uri_prefix`.
    pub fn transform_options(&self, flavor: SchemaFlavor) -> TransformOptions {
        TransformOptions {
            flavor,
            id: self.generate.id.clone(),
            uri_prefix: self.generate.uri_prefix.clone(),
        }
    }

    /// Compile the exclusion patterns
    pub fn model_filter(&self) -> Result<ModelFilter> {
        ModelFilter::new(&self.collect.exclude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = SchemaConfig::default();
        assert_eq!(config.collect.source, PathBuf::from("./models"));
        assert_eq!(config.generate.source, config.collect.output);
        assert_eq!(config.output.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_serialize_config() {
        let config = SchemaConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[collect]"));
        assert!(toml_str.contains("[generate]"));
        assert!(toml_str.contains("[json_schema]"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: SchemaConfig = toml::from_str(
            r#"
            [generate]
            uri_prefix = "/api/"

            [output]
            format = "compact"
            "#,
        )
        .unwrap();

        assert_eq!(config.generate.output, PathBuf::from("./schema.json"));
        assert_eq!(config.output.format, OutputFormat::Compact);

        let options = config.transform_options(SchemaFlavor::Swagger);
        assert_eq!(options.flavor, SchemaFlavor::Swagger);
        assert_eq!(options.uri_prefix.as_deref(), Some("/api/"));
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[generate]\nid = \"http://example.com/schema\"\n").unwrap();

        let config = SchemaConfig::load_from(path.to_str()).unwrap();
        assert_eq!(config.generate.id.as_deref(), Some("http://example.com/schema"));
        assert_eq!(config.collect.source, PathBuf::from("./models"));
    }

    #[test]
    fn test_missing_explicit_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");

        let err = SchemaConfig::load_from(path.to_str()).unwrap_err();
        assert!(matches!(err, SchemaError::Config(_)));
    }
}
