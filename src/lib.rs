//! Waterline Schemas
//!
//! Converts declarative model definitions (attribute types, validation keys,
//! `model`/`collection` relations) into a single schema document.
//!
//! ## Flavors
//!
//! - **Definitions**: JSON Schema draft-04. Relations are `$ref`s into
//!   `#/definitions`, models list their `required` attributes.
//! - **Swagger**: Swagger 2.0 flavored and deliberately looser. Relations
//!   and structured values are nullable unions, nothing is required, and
//!   `$ref` targets are hoisted into the referencing model.
//!
//! ## Pipeline
//!
//! ```text
//! models/*.json ──collect──► waterline.json ──parse──► [ModelDefinition]
//!                                                           │
//!                                                       transform
//!                                                           ▼
//!                                 schema.json ◄──write── SchemaDocument
//! ```
//!
//! ```
//! use serde_json::json;
//! use waterline_schemas::{parse_models, transform, SchemaFlavor, TransformOptions};
//!
//! let models = parse_models(&json!([{
//!     "identity": "box",
//!     "attributes": {
//!         "id": {"type": "text", "primaryKey": true, "required": true},
//!         "boxset": {"model": "boxset"}
//!     }
//! }]))
//! .unwrap();
//!
//! let document = transform(&models, &TransformOptions::new(SchemaFlavor::Definitions));
//! assert_eq!(document.definitions["box"].required, Some(vec!["id".to_string()]));
//! ```

pub mod checksum;
pub mod collect;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod schema;
pub mod transform;

pub use checksum::Checksum;
pub use collect::{collect_models, discover_model_files, write_models, ModelFilter};
pub use config::{OutputFormat, SchemaConfig};
pub use error::{Result, SchemaError};
pub use loader::{load_models, read_json, render_json, write_json};
pub use model::{
    parse_models, AttributeSpec, AttributeType, Constraints, FormatKeyword, ModelDefinition,
};
pub use schema::{HoistedDefinition, ModelSchema, SchemaDocument, SchemaProperty, SchemaType};
pub use transform::{transform, SchemaFlavor, TransformOptions};
