use std::collections::HashMap;

use serde_json::Value;

use super::types::Document;

/// Where a field's candidate value is taken from.
#[derive(Debug)]
pub enum Source {
    /// `data.attributes[<field name>]`.
    Attribute,
    /// `data.relationships[<rel>].data.id`. The relationship's `data.type`
    /// must equal `resource_type`.
    Relationship {
        rel: &'static str,
        resource_type: &'static str,
    },
}

#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub source: Source,
}

/// Declarative shape of one endpoint's request body: the expected `data.type`
/// literal plus the required fields and where they come from.
#[derive(Debug)]
pub struct Schema {
    pub resource_type: &'static str,
    pub fields: &'static [Field],
}

/// Undifferentiated validation failure. Callers never learn which field
/// failed; every structural problem is the same Bad Request at the boundary.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Bad Request")]
pub struct ValidateError;

/// Checks `doc` against `schema` and returns the extracted integer fields,
/// keyed by field name. Every schema field is guaranteed present and nonzero
/// in the result.
///
/// `expected_ids` pairs a relationship name with a path parameter; the
/// relationship's raw `id` must be a string equal to it. This is a strict
/// string comparison, so a numeric body id never matches a path parameter.
///
/// A value parses as an integer if it is a JSON integer or a string that is
/// entirely base-10 digits. Booleans are rejected outright. A field whose
/// parsed value is zero counts as missing; clients of the original service
/// depend on that.
pub fn validate(
    schema: &Schema,
    doc: &Document,
    expected_ids: &[(&str, &str)],
) -> Result<HashMap<&'static str, i64>, ValidateError> {
    let data = &doc.data;

    if data.resource_type.as_deref() != Some(schema.resource_type) {
        return Err(ValidateError);
    }

    let mut fields = HashMap::new();
    for field in schema.fields {
        let candidate = match &field.source {
            Source::Attribute => data.attributes.get(field.name),
            Source::Relationship { rel, resource_type } => {
                let rel_data = data
                    .relationships
                    .get(*rel)
                    .and_then(|r| r.data.as_ref())
                    .ok_or(ValidateError)?;

                if rel_data.resource_type.as_deref() != Some(*resource_type) {
                    return Err(ValidateError);
                }

                if let Some((_, expected)) = expected_ids.iter().find(|(name, _)| name == rel) {
                    match rel_data.id.as_ref() {
                        Some(Value::String(s)) if s == expected => {}
                        _ => return Err(ValidateError),
                    }
                }

                rel_data.id.as_ref()
            }
        };

        if let Some(value) = candidate.and_then(parse_int) {
            fields.insert(field.name, value);
        }
    }

    let missing = schema
        .fields
        .iter()
        .any(|f| !matches!(fields.get(f.name), Some(v) if *v != 0));
    if missing {
        return Err(ValidateError);
    }

    Ok(fields)
}

fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
