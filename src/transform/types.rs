//! Attribute type mapping

use crate::model::AttributeType;
use crate::schema::{SchemaProperty, SchemaType};

use super::model::AttributeContext;

/// Attribute type -> (schema type, seeded format)
pub const TYPE_TABLE: &[(AttributeType, SchemaType, Option<&str>)] = &[
    (AttributeType::String, SchemaType::String, None),
    (AttributeType::Text, SchemaType::String, None),
    (AttributeType::Float, SchemaType::Number, None),
    (AttributeType::Integer, SchemaType::Integer, None),
    (AttributeType::Boolean, SchemaType::Boolean, None),
    (AttributeType::Json, SchemaType::Object, None),
    (AttributeType::Array, SchemaType::Array, None),
    (AttributeType::Binary, SchemaType::String, None),
    (AttributeType::Time, SchemaType::String, None),
    (AttributeType::Date, SchemaType::String, Some("date")),
    (AttributeType::DateTime, SchemaType::String, Some("date-time")),
];

/// Schema type and default format for an attribute type; unknown or absent
/// types map to a plain string
pub fn map_type(attribute_type: Option<AttributeType>) -> (SchemaType, Option<&'static str>) {
    attribute_type
        .and_then(|wanted| TYPE_TABLE.iter().find(|(token, _, _)| *token == wanted))
        .map(|&(_, schema_type, format)| (schema_type, format))
        .unwrap_or((SchemaType::String, None))
}

pub(crate) fn apply_type(
    mut property: SchemaProperty,
    ctx: &AttributeContext<'_>,
) -> SchemaProperty {
    let (schema_type, format) = map_type(ctx.attribute_type);
    property.schema_type = Some(schema_type);
    if let Some(format) = format {
        property.format = Some(format.to_string());
    }
    property
}

pub(crate) fn apply_enum(
    mut property: SchemaProperty,
    ctx: &AttributeContext<'_>,
) -> SchemaProperty {
    if let Some(values) = &ctx.constraints.enum_values {
        property.enum_values = Some(values.clone());
    }
    property
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_type_table() {
        let cases = [
            (AttributeType::String, SchemaType::String, None),
            (AttributeType::Text, SchemaType::String, None),
            (AttributeType::Float, SchemaType::Number, None),
            (AttributeType::Integer, SchemaType::Integer, None),
            (AttributeType::Boolean, SchemaType::Boolean, None),
            (AttributeType::Json, SchemaType::Object, None),
            (AttributeType::Array, SchemaType::Array, None),
            (AttributeType::Binary, SchemaType::String, None),
            (AttributeType::Time, SchemaType::String, None),
            (AttributeType::Date, SchemaType::String, Some("date")),
            (AttributeType::DateTime, SchemaType::String, Some("date-time")),
        ];

        for (input, schema_type, format) in cases {
            assert_eq!(map_type(Some(input)), (schema_type, format), "{}", input.as_str());
        }
    }

    #[test]
    fn test_unknown_type_falls_back_to_string() {
        assert_eq!(map_type(None), (SchemaType::String, None));
    }
}
