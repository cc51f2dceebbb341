//! JSON file reading and writing

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::OutputFormat;
use crate::error::{Result, SchemaError};
use crate::model::{parse_models, ModelDefinition};

/// Read and parse a JSON file
pub fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SchemaError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => SchemaError::Io(e),
    })?;

    serde_json::from_str(&content).map_err(|source| SchemaError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a model list file (a JSON array of model definitions)
pub fn load_models(path: &Path) -> Result<Vec<ModelDefinition>> {
    parse_models(&read_json(path)?)
}

/// Serialize a value; pretty output uses four-space indentation
pub fn render_json<T: Serialize>(value: &T, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Compact => Ok(serde_json::to_vec(value)?),
        OutputFormat::Pretty => {
            let mut rendered = Vec::new();
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut serializer = serde_json::Serializer::with_formatter(&mut rendered, formatter);
            value.serialize(&mut serializer)?;
            Ok(rendered)
        }
    }
}

/// Serialize a value and write it to `path`
pub fn write_json<T: Serialize>(path: &Path, value: &T, format: OutputFormat) -> Result<()> {
    let rendered = render_json(value, format)?;
    fs::write(path, rendered).map_err(|source| SchemaError::Write {
        path: path.to_path_buf(),
        source,
    })
}
