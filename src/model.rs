//! Model definitions
//!
//! The engine's input unit. Raw JSON model entries are parsed once, up front,
//! into a tagged [`AttributeSpec`] per attribute so the transform pipeline
//! never re-inspects key presence.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};

/// Primitive attribute type vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    String,
    Text,
    Float,
    Integer,
    Boolean,
    Json,
    Array,
    Binary,
    Time,
    Date,
    DateTime,
}

impl AttributeType {
    /// Parse a `type` token, `None` for tokens outside the vocabulary
    pub fn parse(token: &str) -> Option<Self> {
        let parsed = match token {
            "string" => Self::String,
            "text" => Self::Text,
            "float" => Self::Float,
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            "json" => Self::Json,
            "array" => Self::Array,
            "binary" => Self::Binary,
            "time" => Self::Time,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            _ => return None,
        };
        Some(parsed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Float => "float",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Json => "json",
            Self::Array => "array",
            Self::Binary => "binary",
            Self::Time => "time",
            Self::Date => "date",
            Self::DateTime => "datetime",
        }
    }
}

/// Validation-format hint keys. Presence of the key selects the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKeyword {
    Email,
    Url,
    Urlish,
    Ip,
    Ipv4,
    Ipv6,
    CreditCard,
    Uuid,
    Uuidv3,
    Uuidv4,
    Date,
    Array,
    HexColor,
    Hexadecimal,
    String,
    Alpha,
    Numeric,
    Alphanumeric,
    Int,
    Finite,
    Decimal,
    Float,
    Boolean,
    Lowercase,
    Uppercase,
}

impl FormatKeyword {
    /// Scan order. When several keys are present the last one wins.
    pub const ALL: [FormatKeyword; 25] = [
        Self::Email,
        Self::Url,
        Self::Urlish,
        Self::Ip,
        Self::Ipv4,
        Self::Ipv6,
        Self::CreditCard,
        Self::Uuid,
        Self::Uuidv3,
        Self::Uuidv4,
        Self::Date,
        Self::Array,
        Self::HexColor,
        Self::Hexadecimal,
        Self::String,
        Self::Alpha,
        Self::Numeric,
        Self::Alphanumeric,
        Self::Int,
        Self::Finite,
        Self::Decimal,
        Self::Float,
        Self::Boolean,
        Self::Lowercase,
        Self::Uppercase,
    ];

    /// The attribute key, which is also the emitted `format` value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Url => "url",
            Self::Urlish => "urlish",
            Self::Ip => "ip",
            Self::Ipv4 => "ipv4",
            Self::Ipv6 => "ipv6",
            Self::CreditCard => "creditcard",
            Self::Uuid => "uuid",
            Self::Uuidv3 => "uuidv3",
            Self::Uuidv4 => "uuidv4",
            Self::Date => "date",
            Self::Array => "array",
            Self::HexColor => "hexColor",
            Self::Hexadecimal => "hexadecimal",
            Self::String => "string",
            Self::Alpha => "alpha",
            Self::Numeric => "numeric",
            Self::Alphanumeric => "alphanumeric",
            Self::Int => "int",
            Self::Finite => "finite",
            Self::Decimal => "decimal",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Lowercase => "lowercase",
            Self::Uppercase => "uppercase",
        }
    }
}

/// Metadata, format hints and validation keys shared by every attribute shape
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    /// `required` key present (its value is irrelevant)
    pub required: bool,
    pub primary_key: Option<Value>,
    pub description: Option<String>,
    /// `defaultsTo`
    pub default: Option<Value>,
    pub enum_values: Option<Vec<Value>>,
    /// Format keys present on the attribute, in [`FormatKeyword::ALL`] order
    pub formats: Vec<FormatKeyword>,
    pub min: Option<Value>,
    pub max: Option<Value>,
    pub len: Option<Value>,
    pub min_length: Option<Value>,
    pub max_length: Option<Value>,
    pub contains: Option<Value>,
    pub not_contains: Option<Value>,
    pub is: Option<Value>,
    pub regex: Option<Value>,
    pub not: Option<Value>,
    pub not_regex: Option<Value>,
}

impl Constraints {
    fn from_map(attr: &Map<String, Value>) -> Self {
        let key = |name: &str| attr.get(name).cloned();

        Self {
            required: attr.contains_key("required"),
            primary_key: key("primaryKey"),
            description: attr
                .get("description")
                .filter(|v| is_truthy(v))
                .map(value_text),
            default: key("defaultsTo").filter(|v| !v.is_null()),
            enum_values: attr.get("enum").and_then(Value::as_array).cloned(),
            formats: FormatKeyword::ALL
                .into_iter()
                .filter(|format| attr.contains_key(format.as_str()))
                .collect(),
            min: key("min"),
            max: key("max"),
            len: key("len"),
            min_length: key("minLength"),
            max_length: key("maxLength"),
            contains: key("contains"),
            not_contains: key("notContains"),
            is: key("is"),
            regex: key("regex"),
            not: key("not"),
            not_regex: key("notRegex"),
        }
    }
}

/// A plain value attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalarAttribute {
    /// `None` when the token is absent or outside the vocabulary
    pub attribute_type: Option<AttributeType>,
    pub constraints: Constraints,
}

/// `model` attribute: a single foreign record
#[derive(Debug, Clone, PartialEq)]
pub struct ToOneRelation {
    pub model: String,
    pub constraints: Constraints,
}

/// `collection` attribute: many foreign records, linked back through `via`
#[derive(Debug, Clone, PartialEq)]
pub struct ToManyRelation {
    pub collection: String,
    pub via: Option<String>,
    pub constraints: Constraints,
}

/// One declared attribute, classified by which keys it carries
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeSpec {
    Scalar(ScalarAttribute),
    ToOne(ToOneRelation),
    ToMany(ToManyRelation),
    /// Computed value (a callable in the source ORM). Never emitted.
    Ignored,
}

impl AttributeSpec {
    /// Classify a raw attribute value.
    ///
    /// Non-object values stand in for callables and are ignored. Relations
    /// are only recognized when there is no `type` key; `model` takes
    /// precedence over `collection`.
    pub fn from_value(value: &Value) -> Self {
        let Some(attr) = value.as_object() else {
            return Self::Ignored;
        };

        let constraints = Constraints::from_map(attr);

        if let Some(token) = attr.get("type") {
            return Self::Scalar(ScalarAttribute {
                attribute_type: token.as_str().and_then(AttributeType::parse),
                constraints,
            });
        }

        if let Some(model) = attr.get("model") {
            return Self::ToOne(ToOneRelation {
                model: value_text(model),
                constraints,
            });
        }

        if let Some(collection) = attr.get("collection") {
            return Self::ToMany(ToManyRelation {
                collection: value_text(collection),
                via: attr.get("via").map(value_text),
                constraints,
            });
        }

        Self::Scalar(ScalarAttribute {
            attribute_type: None,
            constraints,
        })
    }

    /// Scalar attribute of the given type with no constraints
    pub fn scalar(attribute_type: AttributeType) -> Self {
        Self::Scalar(ScalarAttribute {
            attribute_type: Some(attribute_type),
            constraints: Constraints::default(),
        })
    }

    pub fn constraints(&self) -> Option<&Constraints> {
        match self {
            Self::Scalar(scalar) => Some(&scalar.constraints),
            Self::ToOne(relation) => Some(&relation.constraints),
            Self::ToMany(relation) => Some(&relation.constraints),
            Self::Ignored => None,
        }
    }

    pub fn is_required(&self) -> bool {
        self.constraints().is_some_and(|c| c.required)
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}

/// A data entity description
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDefinition {
    /// Unique key across the model list
    pub identity: String,
    pub export_name: Option<String>,
    /// `true` closes the model to undeclared properties
    pub schema: bool,
    /// Declared attributes in declaration order
    pub attributes: IndexMap<String, AttributeSpec>,
}

impl ModelDefinition {
    /// Create an open model with no attributes
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            export_name: None,
            schema: false,
            attributes: IndexMap::new(),
        }
    }

    pub fn with_export_name(mut self, export_name: impl Into<String>) -> Self {
        self.export_name = Some(export_name.into());
        self
    }

    /// Set the `schema` flag
    pub fn closed(mut self, closed: bool) -> Self {
        self.schema = closed;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, spec: AttributeSpec) -> Self {
        self.attributes.insert(name.into(), spec);
        self
    }

    /// Parse one raw model entry; `index` is its position in the input list
    pub fn from_value(index: usize, value: &Value) -> Result<Self> {
        let model = value.as_object().ok_or_else(|| SchemaError::InvalidModel {
            index,
            reason: format!("expected an object, found {}", json_kind(value)),
        })?;

        let identity = model
            .get("identity")
            .and_then(Value::as_str)
            .filter(|identity| !identity.is_empty())
            .ok_or(SchemaError::MissingIdentity { index })?;

        let export_name = model
            .get("exportName")
            .filter(|v| is_truthy(v))
            .map(value_text);

        let attributes = model
            .get("attributes")
            .and_then(Value::as_object)
            .map(|attrs| {
                attrs
                    .iter()
                    .map(|(name, attr)| (name.clone(), AttributeSpec::from_value(attr)))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            identity: identity.to_string(),
            export_name,
            schema: model.get("schema").is_some_and(is_truthy),
            attributes,
        })
    }
}

/// Parse a JSON array of raw model entries, preserving order
pub fn parse_models(value: &Value) -> Result<Vec<ModelDefinition>> {
    let entries = value.as_array().ok_or_else(|| {
        SchemaError::InvalidFormat(format!(
            "expected an array of models, found {}",
            json_kind(value)
        ))
    })?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| ModelDefinition::from_value(index, entry))
        .collect()
}

/// Text of a scalar JSON value; strings verbatim, anything else as JSON
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_object_attribute_is_ignored() {
        assert!(AttributeSpec::from_value(&json!("[Function]")).is_ignored());
        assert!(AttributeSpec::from_value(&Value::Null).is_ignored());
    }

    #[test]
    fn test_type_key_wins_over_relations() {
        let spec = AttributeSpec::from_value(&json!({"type": "string", "model": "user"}));
        match spec {
            AttributeSpec::Scalar(scalar) => {
                assert_eq!(scalar.attribute_type, Some(AttributeType::String));
            }
            other => panic!("Expected Scalar, got {:?}", other),
        }
    }

    #[test]
    fn test_relation_classification() {
        let to_one = AttributeSpec::from_value(&json!({"model": "boxset", "required": false}));
        assert!(matches!(&to_one, AttributeSpec::ToOne(r) if r.model == "boxset"));
        assert!(to_one.is_required());

        let to_many = AttributeSpec::from_value(&json!({"collection": "Box", "via": "boxset"}));
        match to_many {
            AttributeSpec::ToMany(relation) => {
                assert_eq!(relation.collection, "Box");
                assert_eq!(relation.via.as_deref(), Some("boxset"));
            }
            other => panic!("Expected ToMany, got {:?}", other),
        }
    }

    #[test]
    fn test_untyped_attribute_falls_back_to_scalar() {
        let spec = AttributeSpec::from_value(&json!({"email": true}));
        match spec {
            AttributeSpec::Scalar(scalar) => {
                assert_eq!(scalar.attribute_type, None);
                assert_eq!(scalar.constraints.formats, vec![FormatKeyword::Email]);
            }
            other => panic!("Expected Scalar, got {:?}", other),
        }
    }

    #[test]
    fn test_format_keys_recorded_in_scan_order() {
        let spec = AttributeSpec::from_value(&json!({
            "type": "string",
            "uppercase": 1,
            "email": 0,
            "alpha": false
        }));
        let formats = &spec.constraints().unwrap().formats;
        assert_eq!(
            formats,
            &vec![FormatKeyword::Email, FormatKeyword::Alpha, FormatKeyword::Uppercase]
        );
    }

    #[test]
    fn test_model_requires_identity() {
        let err = ModelDefinition::from_value(3, &json!({"attributes": {}})).unwrap_err();
        assert!(matches!(err, SchemaError::MissingIdentity { index: 3 }));

        let err = ModelDefinition::from_value(0, &json!(["box"])).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidModel { index: 0, .. }));
    }

    #[test]
    fn test_attribute_order_preserved() {
        let model = ModelDefinition::from_value(
            0,
            &json!({
                "identity": "box",
                "schema": true,
                "attributes": {
                    "zeta": {"type": "string"},
                    "alpha": {"type": "integer"},
                    "mid": "fn"
                }
            }),
        )
        .unwrap();

        assert!(model.schema);
        let names: Vec<_> = model.attributes.keys().cloned().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_models_rejects_non_array() {
        let err = parse_models(&json!({"identity": "box"})).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidFormat(_)));
        assert!(parse_models(&json!([])).unwrap().is_empty());
    }
}
