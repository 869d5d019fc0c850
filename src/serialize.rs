//! Projection of a resolved tree into the plain Schema Object value shape.
//!
//! Field order matches the upstream document layout (`$ref`, `type`,
//! `format`, `nullable`, `default`, `enum`, `description`, `items`, bounds,
//! `required`, `properties`, `additionalProperties`, combinators);
//! `serde_json` is built with `preserve_order` so the order survives into
//! output. Absent fields are omitted, never written as null. A node with no
//! emitted fields serializes to `{}` so downstream consumers can tell "no
//! constraints" from "absent".

use serde_json::{json, Map, Value};

use crate::schema::{AdditionalProperties, ResolvedType, SchemaType};
use crate::text;

/// Serialize `ty` for embedding under a `schema` or
/// `components.schemas.<name>` location.
///
/// `is_parameter` applies the parameter-position rules: booleans are
/// rewritten into `{type: integer, enum: [0, 1]}` with the default mapped,
/// and descriptions are suppressed. Child nodes always serialize in body
/// context regardless of the parent's flag.
pub fn emit_schema(ty: &ResolvedType, is_parameter: bool) -> Value {
    if is_parameter && ty.type_ == Some(SchemaType::Boolean) {
        let rewritten = ResolvedType {
            nullable: ty.nullable,
            default: ty
                .default
                .as_ref()
                .map(|v| if *v == Value::Bool(true) { json!(1) } else { json!(0) }),
            description: ty.description.clone(),
            enum_: Some(vec![json!(0), json!(1)]),
            ..ResolvedType::of(ty.context.clone(), SchemaType::Integer)
        };
        return emit_schema(&rewritten, is_parameter);
    }

    let mut values = Map::new();

    if let Some(ref_) = &ty.ref_ {
        values.insert("$ref".into(), json!(ref_));
    }
    if let Some(type_) = ty.type_ {
        values.insert("type".into(), json!(type_.as_str()));
    }
    if let Some(format) = ty.format {
        values.insert("format".into(), json!(format.as_str()));
    }
    if ty.nullable {
        values.insert("nullable".into(), json!(true));
    }
    if let Some(default) = &ty.default {
        if !default.is_null() {
            // An empty structural default on an object node is the explicit
            // empty-object marker, not an empty list.
            let value = if ty.type_ == Some(SchemaType::Object) && is_empty_structure(default) {
                Value::Object(Map::new())
            } else {
                default.clone()
            };
            values.insert("default".into(), value);
        }
    }
    if let Some(enum_) = &ty.enum_ {
        values.insert("enum".into(), Value::Array(enum_.clone()));
    }
    if !is_parameter {
        if let Some(description) = &ty.description {
            if !description.is_empty() {
                values.insert(
                    "description".into(),
                    json!(text::clean_doc_comment(description)),
                );
            }
        }
    }
    if let Some(items) = &ty.items {
        values.insert("items".into(), emit_schema(items, false));
    }
    if let Some(min_length) = ty.min_length {
        values.insert("minLength".into(), json!(min_length));
    }
    if let Some(max_length) = ty.max_length {
        values.insert("maxLength".into(), json!(max_length));
    }
    if let Some(minimum) = ty.minimum {
        values.insert("minimum".into(), json!(minimum));
    }
    if let Some(maximum) = ty.maximum {
        values.insert("maximum".into(), json!(maximum));
    }
    if let Some(min_items) = ty.min_items {
        values.insert("minItems".into(), json!(min_items));
    }
    if let Some(max_items) = ty.max_items {
        values.insert("maxItems".into(), json!(max_items));
    }
    if let Some(required) = &ty.required {
        values.insert("required".into(), json!(required));
    }
    if let Some(properties) = &ty.properties {
        if !properties.is_empty() {
            let mut map = Map::new();
            for (name, property) in properties {
                map.insert(name.clone(), emit_schema(property, false));
            }
            values.insert("properties".into(), Value::Object(map));
        }
    }
    if let Some(additional) = &ty.additional_properties {
        let value = match additional {
            AdditionalProperties::Any(flag) => json!(flag),
            AdditionalProperties::Schema(schema) => emit_schema(schema, false),
        };
        values.insert("additionalProperties".into(), value);
    }
    if let Some(one_of) = &ty.one_of {
        values.insert(
            "oneOf".into(),
            Value::Array(one_of.iter().map(|m| emit_schema(m, false)).collect()),
        );
    }
    if let Some(any_of) = &ty.any_of {
        values.insert(
            "anyOf".into(),
            Value::Array(any_of.iter().map(|m| emit_schema(m, false)).collect()),
        );
    }
    if let Some(all_of) = &ty.all_of {
        values.insert(
            "allOf".into(),
            Value::Array(all_of.iter().map(|m| emit_schema(m, false)).collect()),
        );
    }

    Value::Object(values)
}

fn is_empty_structure(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
