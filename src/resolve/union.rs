//! Union and intersection flattening.
//!
//! Null members hoist to `nullable` on the parent; surviving members are
//! resolved independently, deduplicated structurally, and enum-merged before
//! the representation is chosen (single type, `oneOf`, `anyOf`, `allOf`).

use indexmap::IndexMap;
use serde_json::Value;

use crate::ast::TypeNode;
use crate::report::{Reporter, ResolveError};
use crate::resolve::resolve;
use crate::schema::{ResolvedType, SchemaFormat, SchemaType};
use crate::Definitions;

pub(crate) fn resolve_union(
    context: &str,
    definitions: &Definitions,
    reporter: &Reporter,
    members: &[TypeNode],
) -> Result<ResolvedType, ResolveError> {
    // All-literal unions collapse straight to an enum, pre-empting the
    // general path.
    if members
        .iter()
        .all(|m| matches!(m, TypeNode::ConstStr(_)))
    {
        let values: Vec<&str> = members
            .iter()
            .map(|m| match m {
                TypeNode::ConstStr(v) => v.as_str(),
                _ => unreachable!(),
            })
            .collect();

        // An empty literal invalidates the whole enum.
        if values.iter().any(|v| v.is_empty()) {
            return Ok(ResolvedType::of(context, SchemaType::String));
        }
        return Ok(ResolvedType {
            enum_: Some(values.into_iter().map(Value::from).collect()),
            ..ResolvedType::of(context, SchemaType::String)
        });
    }

    if members
        .iter()
        .all(|m| matches!(m, TypeNode::ConstInt(_)))
    {
        let values: Vec<Value> = members
            .iter()
            .map(|m| match m {
                TypeNode::ConstInt(v) => Value::from(*v),
                _ => unreachable!(),
            })
            .collect();
        return Ok(ResolvedType {
            format: Some(SchemaFormat::Int64),
            enum_: Some(values),
            ..ResolvedType::of(context, SchemaType::Integer)
        });
    }

    resolve_members(context, definitions, reporter, members, false)
}

pub(crate) fn resolve_intersection(
    context: &str,
    definitions: &Definitions,
    reporter: &Reporter,
    members: &[TypeNode],
) -> Result<ResolvedType, ResolveError> {
    resolve_members(context, definitions, reporter, members, true)
}

fn resolve_members(
    context: &str,
    definitions: &Definitions,
    reporter: &Reporter,
    members: &[TypeNode],
    is_intersection: bool,
) -> Result<ResolvedType, ResolveError> {
    let mut nullable = false;
    let mut items: Vec<ResolvedType> = Vec::new();

    for member in members {
        if let TypeNode::Ident(name) = member {
            if name == "null" {
                nullable = true;
                continue;
            }
            if name == "mixed" {
                reporter.warn(context, "Unions and intersections should not contain 'mixed'");
            }
        }
        items.push(resolve(context, definitions, reporter, member)?);
    }

    // Structural dedup, first occurrence wins.
    let mut unique: Vec<ResolvedType> = Vec::new();
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }

    let mut items = merge_enums(context, unique);

    if items.len() == 1 {
        let mut ty = items.remove(0);
        ty.nullable = nullable;
        return Ok(ty);
    }

    if is_intersection {
        return Ok(ResolvedType {
            nullable,
            all_of: Some(items),
            ..ResolvedType::new(context)
        });
    }

    // integer and number are the same thing to OpenAPI consumers picking a
    // oneOf branch, so they count as a collision.
    let type_names: Vec<Option<SchemaType>> = items.iter().map(union_type_name).collect();
    let untyped = type_names.iter().any(Option::is_none);
    let collides = (1..type_names.len()).any(|i| type_names[..i].contains(&type_names[i]));

    if untyped || collides {
        Ok(ResolvedType {
            nullable,
            any_of: Some(items),
            ..ResolvedType::new(context)
        })
    } else {
        Ok(ResolvedType {
            nullable,
            one_of: Some(items),
            ..ResolvedType::new(context)
        })
    }
}

fn union_type_name(ty: &ResolvedType) -> Option<SchemaType> {
    match ty.type_ {
        Some(SchemaType::Integer) => Some(SchemaType::Number),
        other => other,
    }
}

/// Concatenate enum value lists of members sharing a base type. A non-enum
/// member of the same base type cancels that group entirely: the type is not
/// actually constrained to literals, so the merged enum is dropped rather
/// than widened. Rebuilt members carry only `type` and `enum`.
fn merge_enums(context: &str, types: Vec<ResolvedType>) -> Vec<ResolvedType> {
    let mut enums: IndexMap<Option<SchemaType>, Vec<Value>> = IndexMap::new();
    let mut non_enums: Vec<ResolvedType> = Vec::new();

    for ty in types {
        match &ty.enum_ {
            Some(values) => enums.entry(ty.type_).or_default().extend(values.clone()),
            None => non_enums.push(ty),
        }
    }

    for ty in &non_enums {
        enums.shift_remove(&ty.type_);
    }

    let mut out = non_enums;
    for (type_, values) in enums {
        out.push(ResolvedType {
            type_,
            enum_: Some(values),
            ..ResolvedType::new(context)
        });
    }
    out
}
