//! Per-model schema construction

use convert_case::{Case, Casing};
use indexmap::IndexMap;
use tracing::debug;

use crate::model::{AttributeSpec, AttributeType, Constraints, ModelDefinition};
use crate::schema::{ModelSchema, SchemaProperty, SchemaType};

use super::{formats, relations, types, SchemaFlavor, TransformOptions};

/// What a pipeline stage may read about the attribute
#[derive(Debug, Clone, Copy)]
pub(crate) struct AttributeContext<'a> {
    pub(crate) attribute_type: Option<AttributeType>,
    pub(crate) constraints: &'a Constraints,
    pub(crate) flavor: SchemaFlavor,
}

type Stage = fn(SchemaProperty, &AttributeContext<'_>) -> SchemaProperty;

/// Applied left to right; a later stage overwrites what an earlier one set
const PIPELINE: &[Stage] = &[
    types::apply_type,
    types::apply_enum,
    formats::apply_format_keyword,
    formats::apply_format_pattern,
    formats::apply_contains,
    formats::apply_bounds,
    formats::apply_lengths,
    formats::apply_explicit_patterns,
];

/// Build the schema object for one model
pub fn transform_model(model: &ModelDefinition, options: &TransformOptions) -> ModelSchema {
    let flavor = options.flavor;
    let title = model
        .export_name
        .clone()
        .unwrap_or_else(|| titleize(&model.identity));

    let (id, description) = match flavor {
        SchemaFlavor::Definitions => (
            element_id(&model.identity, options.uri_prefix.as_deref()),
            String::new(),
        ),
        SchemaFlavor::Swagger => (
            format!("#{}", model.identity),
            format!("{title} schema definition."),
        ),
    };

    let mut required = Vec::new();
    let mut properties = IndexMap::with_capacity(model.attributes.len());

    for (name, spec) in &model.attributes {
        let Some(property) = build_property(name, spec, flavor) else {
            debug!(model = %model.identity, attribute = %name, "Skipping computed attribute");
            continue;
        };

        if spec.is_required() {
            required.push(name.clone());
        }
        properties.insert(name.clone(), property);
    }

    debug!(model = %model.identity, properties = properties.len(), "Transformed model");

    ModelSchema {
        id,
        identity: model.identity.clone(),
        schema_type: SchemaType::Object,
        title,
        description,
        additional_properties: !model.schema,
        // Swagger documents also validate partial updates, so nothing is required there
        required: (flavor == SchemaFlavor::Definitions).then_some(required),
        properties,
        definitions: IndexMap::new(),
    }
}

/// Property for one attribute, `None` for ignored attributes
pub fn build_property(
    name: &str,
    spec: &AttributeSpec,
    flavor: SchemaFlavor,
) -> Option<SchemaProperty> {
    let (attribute_type, constraints) = match spec {
        AttributeSpec::Scalar(scalar) => (scalar.attribute_type, &scalar.constraints),
        AttributeSpec::ToOne(relation) => (None, &relation.constraints),
        AttributeSpec::ToMany(relation) => (None, &relation.constraints),
        AttributeSpec::Ignored => return None,
    };

    let ctx = AttributeContext {
        attribute_type,
        constraints,
        flavor,
    };

    let property = PIPELINE
        .iter()
        .fold(metadata(name, &ctx), |property, stage| stage(property, &ctx));

    let property = match spec {
        AttributeSpec::ToOne(relation) => relations::resolve_to_one(property, relation, flavor),
        AttributeSpec::ToMany(relation) => relations::resolve_to_many(property, relation, flavor),
        AttributeSpec::Scalar(_) | AttributeSpec::Ignored => {
            relations::nullable_structure(property, attribute_type, flavor)
        }
    };

    Some(property)
}

fn metadata(name: &str, ctx: &AttributeContext<'_>) -> SchemaProperty {
    let default = match ctx.flavor {
        SchemaFlavor::Definitions => ctx.constraints.default.clone(),
        SchemaFlavor::Swagger => None,
    };

    SchemaProperty {
        primary_key: ctx.constraints.primary_key.clone(),
        title: Some(titleize(name)),
        description: ctx.constraints.description.clone(),
        default,
        ..SchemaProperty::default()
    }
}

/// `eventName` -> `Event Name`
pub fn titleize(name: &str) -> String {
    name.to_case(Case::Title)
}

/// `/<prefix>/<identity>`, prefix lower-cased with one leading and one
/// trailing slash removed
pub fn element_id(identity: &str, uri_prefix: Option<&str>) -> String {
    match uri_prefix.map(clean_uri).filter(|prefix| !prefix.is_empty()) {
        Some(prefix) => format!("/{prefix}/{identity}"),
        None => format!("/{identity}"),
    }
}

fn clean_uri(uri: &str) -> String {
    let uri = uri.to_lowercase();
    let uri = uri.strip_prefix('/').unwrap_or(&uri);
    uri.strip_suffix('/').unwrap_or(uri).to_string()
}
