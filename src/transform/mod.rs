//! Model-to-schema transformation
//!
//! Each attribute flows through a fixed pipeline:
//!
//! ```text
//! AttributeSpec ─► metadata ─► type ─► enum ─► format ─► pattern ─► validations
//!                  (model.rs)  (types.rs)      (formats.rs)
//!               ─► relation shape
//!                  (relations.rs)
//! ```
//!
//! Every stage takes the property built so far and returns it, so "last
//! writer wins" is just stage order. Per-model schemas are then combined by
//! the document assembler, which wires root references and, for the
//! Swagger flavor, hoists nested `$ref` targets.
//!
//! The engine is pure: no I/O, no state across calls.

pub mod document;
pub mod formats;
pub mod model;
pub mod relations;
pub mod types;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::ModelDefinition;
use crate::schema::SchemaDocument;

pub use document::{assemble, hoist_references};
pub use model::{element_id, titleize, transform_model};

/// Meta-schema marker of the definitions flavor
pub const DRAFT_04: &str = "http://json-schema.org/draft-04/schema#";

/// Version marker of the Swagger flavor
pub const SWAGGER_VERSION: &str = "2.0";

/// Output flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaFlavor {
    /// Draft-04 JSON Schema: `$ref` relations, `required` lists
    #[default]
    Definitions,
    /// Flattened Swagger 2.0 flavor: nullable unions, no `required`
    Swagger,
}

/// Options recognized by [`transform`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOptions {
    pub flavor: SchemaFlavor,
    /// Document `id`
    pub id: Option<String>,
    /// Prefix for generated element ids
    pub uri_prefix: Option<String>,
}

impl TransformOptions {
    pub fn new(flavor: SchemaFlavor) -> Self {
        Self {
            flavor,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_uri_prefix(mut self, uri_prefix: impl Into<String>) -> Self {
        self.uri_prefix = Some(uri_prefix.into());
        self
    }
}

/// Transform an ordered model list into one schema document
pub fn transform(models: &[ModelDefinition], options: &TransformOptions) -> SchemaDocument {
    debug!(models = models.len(), flavor = ?options.flavor, "Transforming models");

    let schemas = models
        .iter()
        .map(|model| transform_model(model, options))
        .collect();

    assemble(schemas, options)
}
