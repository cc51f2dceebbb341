//! Document assembly

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::schema::{HoistedDefinition, ModelSchema, SchemaDocument, SchemaProperty, SchemaType};

use super::relations::definition_ref;
use super::{SchemaFlavor, TransformOptions, DRAFT_04, SWAGGER_VERSION};

/// Combine per-model schemas into the root document.
///
/// A repeated identity keeps its first position and the last schema.
pub fn assemble(schemas: Vec<ModelSchema>, options: &TransformOptions) -> SchemaDocument {
    let flavor = options.flavor;
    let is_definitions = flavor == SchemaFlavor::Definitions;

    let mut document = SchemaDocument {
        id: options.id.clone(),
        meta_schema: is_definitions.then(|| DRAFT_04.to_string()),
        swagger: (!is_definitions).then(|| SWAGGER_VERSION.to_string()),
        schema_type: SchemaType::Object,
        required: is_definitions.then(Vec::new),
        properties: IndexMap::with_capacity(schemas.len()),
        definitions: IndexMap::with_capacity(schemas.len()),
    };

    for schema in schemas {
        let identity = schema.identity.clone();
        let reference = match flavor {
            SchemaFlavor::Definitions => definition_ref(&identity),
            SchemaFlavor::Swagger => format!("#{identity}"),
        };

        if document.definitions.contains_key(&identity) {
            warn!(identity = %identity, "Duplicate model identity, keeping the last definition");
        }

        document
            .properties
            .insert(identity.clone(), SchemaProperty::reference(reference));
        document.definitions.insert(identity, schema);
    }

    if flavor == SchemaFlavor::Swagger {
        hoist_references(&mut document);
    }

    document
}

/// Copy every `$ref` target found on a model's properties (or their `anyOf`
/// branches) into that model's nested `definitions`, keeping only the
/// target's `properties`. Targets absent from the document are left alone.
pub fn hoist_references(document: &mut SchemaDocument) {
    let mut hoisted = Vec::new();

    for (identity, model) in &document.definitions {
        for token in model.properties.values().flat_map(|property| property.references()) {
            let name = reference_name(token);
            match document.definitions.get(name) {
                Some(target) => {
                    hoisted.push((identity.clone(), name.to_string(), target.properties.clone()))
                }
                None => debug!(model = %identity, reference = %token, "Leaving dangling reference"),
            }
        }
    }

    for (identity, name, properties) in hoisted {
        debug!(model = %identity, target = %name, "Hoisting referenced definition");
        if let Some(model) = document.definitions.get_mut(&identity) {
            model.definitions.insert(name, HoistedDefinition::new(properties));
        }
    }
}

/// `#boxset` and `#/definitions/boxset` both name `boxset`
fn reference_name(token: &str) -> &str {
    let name = token.strip_prefix('#').unwrap_or(token);
    name.strip_prefix("/definitions/").unwrap_or(name)
}
