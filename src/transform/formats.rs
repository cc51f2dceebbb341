//! Format keywords, patterns and validation keys
//!
//! Patterns are ECMA-262 strings suitable for a JSON Schema `pattern`.
//! They carry no flags, so case-insensitive formats spell out both cases.

use crate::model::{value_text, FormatKeyword};
use crate::schema::SchemaProperty;

use super::model::AttributeContext;

const CREDIT_CARD: &str = concat!(
    r"^(?:4[0-9]{12}(?:[0-9]{3})?",
    r"|5[1-5][0-9]{14}",
    r"|(?:222[1-9]|22[3-9][0-9]|2[3-6][0-9]{2}|27[01][0-9]|2720)[0-9]{12}",
    r"|6(?:011|5[0-9][0-9])[0-9]{12}",
    r"|3[47][0-9]{13}",
    r"|3(?:0[0-5]|[68][0-9])[0-9]{11}",
    r"|(?:2131|1800|35[0-9]{3})[0-9]{11}",
    r"|62[0-9]{14})$",
);

/// Format keyword -> pattern. Formats not listed carry no pattern.
pub const FORMAT_PATTERNS: &[(FormatKeyword, &str)] = &[
    (FormatKeyword::Alpha, "^[A-Za-z]+$"),
    (FormatKeyword::Alphanumeric, "^[0-9A-Za-z]+$"),
    (FormatKeyword::Numeric, "^[0-9]+$"),
    (FormatKeyword::Int, "^[0-9]+$"),
    (FormatKeyword::CreditCard, CREDIT_CARD),
    (FormatKeyword::Decimal, r"^[-+]?([0-9]+|\.[0-9]+|[0-9]+\.[0-9]+)$"),
    (FormatKeyword::Hexadecimal, "^[0-9A-Fa-f]+$"),
    (FormatKeyword::HexColor, "^#?([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$"),
    (FormatKeyword::Urlish, r"^\s*([^/]+.)+.+\s*$"),
];

/// Pattern attached to a final `format` value
pub fn pattern_for(format: &str) -> Option<&'static str> {
    FORMAT_PATTERNS
        .iter()
        .find(|(keyword, _)| keyword.as_str() == format)
        .map(|&(_, pattern)| pattern)
}

/// Last format key in scan order wins over the type-seeded format
pub(crate) fn apply_format_keyword(
    mut property: SchemaProperty,
    ctx: &AttributeContext<'_>,
) -> SchemaProperty {
    if let Some(format) = ctx.constraints.formats.last() {
        property.format = Some(format.as_str().to_string());
    }
    property
}

pub(crate) fn apply_format_pattern(
    mut property: SchemaProperty,
    _ctx: &AttributeContext<'_>,
) -> SchemaProperty {
    if let Some(pattern) = property.format.as_deref().and_then(pattern_for) {
        property.pattern = Some(pattern.to_string());
    }
    property
}

/// `contains` sets the pattern, `notContains` becomes a `not` sub-schema
pub(crate) fn apply_contains(
    mut property: SchemaProperty,
    ctx: &AttributeContext<'_>,
) -> SchemaProperty {
    if let Some(contains) = &ctx.constraints.contains {
        property.pattern = Some(value_text(contains));
    }
    if let Some(not_contains) = &ctx.constraints.not_contains {
        property.not = Some(Box::new(SchemaProperty {
            pattern: Some(value_text(not_contains)),
            ..SchemaProperty::default()
        }));
    }
    property
}

pub(crate) fn apply_bounds(
    mut property: SchemaProperty,
    ctx: &AttributeContext<'_>,
) -> SchemaProperty {
    if let Some(min) = &ctx.constraints.min {
        property.minimum = Some(min.clone());
    }
    if let Some(max) = &ctx.constraints.max {
        property.maximum = Some(max.clone());
    }
    property
}

/// `len` first, then explicit `minLength`/`maxLength` override it
pub(crate) fn apply_lengths(
    mut property: SchemaProperty,
    ctx: &AttributeContext<'_>,
) -> SchemaProperty {
    let constraints = ctx.constraints;
    if let Some(len) = &constraints.len {
        property.min_length = Some(len.clone());
        property.max_length = Some(len.clone());
    }
    if let Some(max_length) = &constraints.max_length {
        property.max_length = Some(max_length.clone());
    }
    if let Some(min_length) = &constraints.min_length {
        property.min_length = Some(min_length.clone());
    }
    property
}

/// `is`, `regex`, `not`, `notRegex` in that order, each replacing the pattern
pub(crate) fn apply_explicit_patterns(
    mut property: SchemaProperty,
    ctx: &AttributeContext<'_>,
) -> SchemaProperty {
    let constraints = ctx.constraints;
    let explicit = [
        &constraints.is,
        &constraints.regex,
        &constraints.not,
        &constraints.not_regex,
    ];

    if let Some(pattern) = explicit.into_iter().flatten().last() {
        property.pattern = Some(value_text(pattern));
    }
    property
}
