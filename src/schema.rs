//! Schema document types
//!
//! The engine's output. Field order in these structs is the key order of
//! the serialized JSON.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON Schema primitive type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
}

/// One property (or sub-schema) entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaProperty {
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Non-standard, copied from the attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<SchemaProperty>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaProperty>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<SchemaProperty>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,
    /// Non-standard: inverse attribute name of a collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
}

impl SchemaProperty {
    /// `{"type": <schema_type>}`
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    /// `{"$ref": <target>}`
    pub fn reference(target: impl Into<String>) -> Self {
        Self {
            reference: Some(target.into()),
            ..Self::default()
        }
    }

    /// `{"anyOf": [...]}`
    pub fn any_of(branches: Vec<SchemaProperty>) -> Self {
        Self {
            any_of: Some(branches),
            ..Self::default()
        }
    }

    /// `{"type": "object", "additionalProperties": true}`
    pub fn open_object() -> Self {
        Self {
            schema_type: Some(SchemaType::Object),
            additional_properties: Some(true),
            ..Self::default()
        }
    }

    /// `$ref` tokens on this property and on its direct `anyOf` branches
    pub fn references(&self) -> impl Iterator<Item = &str> {
        let branches = self.any_of.iter().flatten();
        self.reference
            .as_deref()
            .into_iter()
            .chain(branches.filter_map(|branch| branch.reference.as_deref()))
    }
}

/// A `$ref` target lifted into a model's nested `definitions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoistedDefinition {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    pub properties: IndexMap<String, SchemaProperty>,
    #[serde(default)]
    pub definitions: IndexMap<String, HoistedDefinition>,
}

impl HoistedDefinition {
    pub fn new(properties: IndexMap<String, SchemaProperty>) -> Self {
        Self {
            schema_type: SchemaType::Object,
            properties,
            definitions: IndexMap::new(),
        }
    }
}

/// Per-model schema object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSchema {
    pub id: String,
    /// Non-standard, carried for downstream tooling
    pub identity: String,
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    pub title: String,
    pub description: String,
    pub additional_properties: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    pub properties: IndexMap<String, SchemaProperty>,
    #[serde(default)]
    pub definitions: IndexMap<String, HoistedDefinition>,
}

/// Root document combining every model schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub meta_schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swagger: Option<String>,
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    pub properties: IndexMap<String, SchemaProperty>,
    pub definitions: IndexMap<String, ModelSchema>,
}

impl SchemaDocument {
    /// Every `$ref` token found in model properties, in emission order
    pub fn model_references(&self) -> Vec<&str> {
        self.definitions
            .values()
            .flat_map(|model| model.properties.values())
            .flat_map(|property| {
                property
                    .references()
                    .chain(property.items.iter().flat_map(|items| items.references()))
            })
            .collect()
    }
}
