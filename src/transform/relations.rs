//! Relation shapes and nullable structured values
//!
//! A relation can travel as a foreign identity (string or integer) or as
//! the expanded record, and may be null. The Swagger flavor encodes exactly
//! that as a union; the definitions flavor points at the target definition
//! instead.

use crate::model::{AttributeType, ToManyRelation, ToOneRelation};
use crate::schema::{SchemaProperty, SchemaType};

use super::SchemaFlavor;

/// `#/definitions/<identity>`
pub fn definition_ref(identity: &str) -> String {
    format!("#/definitions/{identity}")
}

/// null | string | integer | open object
pub fn identity_or_record() -> SchemaProperty {
    SchemaProperty::any_of(vec![
        SchemaProperty::of_type(SchemaType::Null),
        SchemaProperty::of_type(SchemaType::String),
        SchemaProperty::of_type(SchemaType::Integer),
        SchemaProperty::open_object(),
    ])
}

/// To-one relation. The Swagger union replaces the whole property.
pub fn resolve_to_one(
    mut property: SchemaProperty,
    relation: &ToOneRelation,
    flavor: SchemaFlavor,
) -> SchemaProperty {
    match flavor {
        SchemaFlavor::Swagger => identity_or_record(),
        SchemaFlavor::Definitions => {
            property.schema_type = None;
            property.reference = Some(definition_ref(&relation.model));
            property
        }
    }
}

/// To-many relation: an array whose items are the target, plus `via`
pub fn resolve_to_many(
    mut property: SchemaProperty,
    relation: &ToManyRelation,
    flavor: SchemaFlavor,
) -> SchemaProperty {
    let items = match flavor {
        SchemaFlavor::Swagger => identity_or_record(),
        SchemaFlavor::Definitions => {
            SchemaProperty::reference(definition_ref(&relation.collection.to_lowercase()))
        }
    };

    property.schema_type = Some(SchemaType::Array);
    property.items = Some(Box::new(items));
    property.via = relation.via.clone();
    property
}

/// Swagger flavor only: `json` becomes null | open object (replacing the
/// property), `array` items become null | string
pub fn nullable_structure(
    mut property: SchemaProperty,
    attribute_type: Option<AttributeType>,
    flavor: SchemaFlavor,
) -> SchemaProperty {
    if flavor != SchemaFlavor::Swagger {
        return property;
    }

    match attribute_type {
        Some(AttributeType::Json) => SchemaProperty::any_of(vec![
            SchemaProperty::of_type(SchemaType::Null),
            SchemaProperty::open_object(),
        ]),
        Some(AttributeType::Array) => {
            property.items = Some(Box::new(SchemaProperty::any_of(vec![
                SchemaProperty::of_type(SchemaType::Null),
                SchemaProperty::of_type(SchemaType::String),
            ])));
            property
        }
        _ => property,
    }
}
