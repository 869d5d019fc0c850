//! Recursive-descent resolution of type-expression nodes into `ResolvedType`
//! trees.
//!
//! The dispatcher is a single exhaustive match over `TypeNode`; identifier
//! lookup and union/intersection flattening live in submodules. Resolution is
//! a pure function of the node and the definitions set: fatal diagnostics
//! come back as `Err`, recoverable ones go to the `Reporter`.
pub mod ident;
pub mod union;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde_json::{json, Value};

use crate::ast::TypeNode;
use crate::report::{Reporter, ResolveError};
use crate::schema::{AdditionalProperties, ResolvedType, SchemaFormat, SchemaType};
use crate::Definitions;

/// Resolve one type-expression node at `context`.
pub fn resolve(
    context: &str,
    definitions: &Definitions,
    reporter: &Reporter,
    node: &TypeNode,
) -> Result<ResolvedType, ResolveError> {
    match node {
        TypeNode::Param { ty, description } => {
            let mut resolved = resolve(context, definitions, reporter, ty)?;
            resolved.description = Some(description.clone());
            Ok(resolved)
        }

        TypeNode::Ident(name) => ident::resolve_identifier(context, definitions, reporter, name),

        TypeNode::ArrayOf(inner) => {
            let items = resolve(&format!("{context}: items"), definitions, reporter, inner)?;
            Ok(ResolvedType {
                items: Some(Box::new(items)),
                ..ResolvedType::of(context, SchemaType::Array)
            })
        }

        TypeNode::Generic { name, args } => {
            resolve_generic(context, definitions, reporter, node, name, args)
        }

        TypeNode::Shape(fields) => {
            let mut properties = IndexMap::new();
            let mut required = Vec::new();
            for field in fields {
                let ty = resolve(context, definitions, reporter, &field.value)?;
                properties.insert(field.name.clone(), ty);
                if !field.optional {
                    required.push(field.name.clone());
                }
            }
            Ok(ResolvedType {
                properties: Some(properties),
                required: if required.is_empty() { None } else { Some(required) },
                ..ResolvedType::of(context, SchemaType::Object)
            })
        }

        TypeNode::Nullable(inner) => {
            let mut resolved = resolve(context, definitions, reporter, inner)?;
            resolved.nullable = true;
            Ok(resolved)
        }

        TypeNode::Union(members) => union::resolve_union(context, definitions, reporter, members),

        TypeNode::Intersection(members) => {
            union::resolve_intersection(context, definitions, reporter, members)
        }

        TypeNode::ConstStr(value) => Ok(const_string(context, value)),

        TypeNode::ConstInt(value) => Ok(const_integer(context, *value)),

        TypeNode::ConstFloat(_) => Err(ResolveError::UnsupportedConstant {
            context: context.to_string(),
        }),
    }
}

fn resolve_generic(
    context: &str,
    definitions: &Definitions,
    reporter: &Reporter,
    node: &TypeNode,
    name: &str,
    args: &[TypeNode],
) -> Result<ResolvedType, ResolveError> {
    if (name == "array" || name == "list") && args.len() == 1 {
        // `array<empty>` is the empty-list marker.
        if matches!(&args[0], TypeNode::Ident(arg) if arg == "empty") {
            return Ok(ResolvedType {
                max_items: Some(0),
                ..ResolvedType::of(context, SchemaType::Array)
            });
        }
        let items = resolve(context, definitions, reporter, &args[0])?;
        return Ok(ResolvedType {
            items: Some(Box::new(items)),
            ..ResolvedType::of(context, SchemaType::Array)
        });
    }

    if name == "value-of" {
        return Err(ResolveError::ValueOfUnsupported {
            context: context.to_string(),
        });
    }

    if name == "array" && args.len() == 2 {
        if let TypeNode::Ident(key) = &args[0] {
            if key == "string" {
                let value_schema = resolve(
                    &format!("{context}: additionalProperties"),
                    definitions,
                    reporter,
                    &args[1],
                )?;
                return Ok(ResolvedType {
                    additional_properties: Some(AdditionalProperties::Schema(Box::new(
                        value_schema,
                    ))),
                    ..ResolvedType::of(context, SchemaType::Object)
                });
            }
            return Err(ResolveError::NonStringMapKey {
                context: context.to_string(),
                key: key.clone(),
            });
        }
        // Non-identifier keys fall through to the unsupported-node error.
    }

    if name == "int" && args.len() == 2 {
        // Bounds are taken only when literally specified (`int<0, max>` stays
        // open at the top).
        return Ok(ResolvedType {
            format: Some(SchemaFormat::Int64),
            minimum: const_bound(&args[0]),
            maximum: const_bound(&args[1]),
            ..ResolvedType::of(context, SchemaType::Integer)
        });
    }

    Err(ResolveError::UnsupportedNode {
        context: context.to_string(),
        node: node.describe(),
    })
}

fn const_bound(node: &TypeNode) -> Option<i64> {
    match node {
        TypeNode::ConstInt(value) => Some(*value),
        _ => None,
    }
}

fn const_string(context: &str, value: &str) -> ResolvedType {
    // The empty string is not a valid enum value; degrade to plain string.
    if value.is_empty() {
        return ResolvedType::of(context, SchemaType::String);
    }
    ResolvedType {
        enum_: Some(vec![Value::from(value)]),
        ..ResolvedType::of(context, SchemaType::String)
    }
}

fn const_integer(context: &str, value: i64) -> ResolvedType {
    ResolvedType {
        format: Some(SchemaFormat::Int64),
        enum_: Some(vec![json!(value)]),
        ..ResolvedType::of(context, SchemaType::Integer)
    }
}

// ------------------------------- Front API -------------------------------- //

/// Owns the read-only definitions set and the diagnostics sink for one
/// extraction run. Top-level resolutions are independent and side-effect-free
/// on their inputs, so `resolve_many` can fan out across a thread pool.
#[derive(Debug, Default)]
pub struct Resolver {
    definitions: Definitions,
    reporter: Reporter,
}

impl Resolver {
    pub fn new(definitions: Definitions) -> Self {
        Self {
            definitions,
            reporter: Reporter::new(),
        }
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub fn resolve(&self, context: &str, node: &TypeNode) -> Result<ResolvedType, ResolveError> {
        resolve(context, &self.definitions, &self.reporter, node)
    }

    /// Resolve a batch of `(context, node)` jobs in parallel. Output order
    /// matches input order.
    pub fn resolve_many(
        &self,
        jobs: &[(String, TypeNode)],
    ) -> Vec<Result<ResolvedType, ResolveError>> {
        jobs.par_iter()
            .map(|(context, node)| self.resolve(context, node))
            .collect()
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ShapeField;

    fn resolve_one(node: &TypeNode) -> ResolvedType {
        Resolver::new(Definitions::new())
            .resolve("test", node)
            .unwrap()
    }

    #[test]
    fn array_of_resolves_items_under_a_child_context() {
        let t = resolve_one(&TypeNode::array_of(TypeNode::ident("string")));
        assert_eq!(t.type_, Some(SchemaType::Array));
        let items = t.items.unwrap();
        assert_eq!(items.type_, Some(SchemaType::String));
        assert_eq!(items.context, "test: items");
    }

    #[test]
    fn list_generic_resolves_like_array_generic() {
        for name in ["array", "list"] {
            let t = resolve_one(&TypeNode::generic(name, vec![TypeNode::ident("int")]));
            assert_eq!(t.type_, Some(SchemaType::Array));
            assert_eq!(t.items.unwrap().type_, Some(SchemaType::Integer));
        }
    }

    #[test]
    fn array_of_empty_is_the_empty_list_marker() {
        let t = resolve_one(&TypeNode::generic("array", vec![TypeNode::ident("empty")]));
        assert_eq!(t.type_, Some(SchemaType::Array));
        assert_eq!(t.max_items, Some(0));
        assert!(t.items.is_none());
    }

    #[test]
    fn string_keyed_map_becomes_additional_properties() {
        let t = resolve_one(&TypeNode::generic(
            "array",
            vec![TypeNode::ident("string"), TypeNode::ident("mixed")],
        ));
        assert_eq!(t.type_, Some(SchemaType::Object));
        match t.additional_properties.unwrap() {
            AdditionalProperties::Schema(value) => {
                assert_eq!(value.type_, Some(SchemaType::Object));
                assert_eq!(value.context, "test: additionalProperties");
            }
            other => panic!("unexpected additionalProperties: {other:?}"),
        }
    }

    #[test]
    fn non_string_map_key_is_fatal() {
        let err = Resolver::new(Definitions::new())
            .resolve(
                "test",
                &TypeNode::generic(
                    "array",
                    vec![TypeNode::ident("int"), TypeNode::ident("string")],
                ),
            )
            .unwrap_err();
        match err {
            ResolveError::NonStringMapKey { key, .. } => assert_eq!(key, "int"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn value_of_is_fatal() {
        let err = Resolver::new(Definitions::new())
            .resolve(
                "test",
                &TypeNode::generic("value-of", vec![TypeNode::ident("SomeEnum")]),
            )
            .unwrap_err();
        assert!(matches!(err, ResolveError::ValueOfUnsupported { .. }));
    }

    #[test]
    fn unknown_generic_is_fatal() {
        let err = Resolver::new(Definitions::new())
            .resolve(
                "test",
                &TypeNode::generic("Collection", vec![TypeNode::ident("string")]),
            )
            .unwrap_err();
        match err {
            ResolveError::UnsupportedNode { node, .. } => assert!(node.contains("Collection")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn int_range_takes_only_literal_bounds() {
        let t = resolve_one(&TypeNode::generic(
            "int",
            vec![TypeNode::ConstInt(0), TypeNode::ConstInt(100)],
        ));
        assert_eq!(t.type_, Some(SchemaType::Integer));
        assert_eq!(t.format, Some(SchemaFormat::Int64));
        assert_eq!(t.minimum, Some(0));
        assert_eq!(t.maximum, Some(100));

        let t = resolve_one(&TypeNode::generic(
            "int",
            vec![TypeNode::ident("min"), TypeNode::ConstInt(5)],
        ));
        assert_eq!(t.minimum, None);
        assert_eq!(t.maximum, Some(5));
    }

    #[test]
    fn shape_preserves_field_order_and_required() {
        let t = resolve_one(&TypeNode::Shape(vec![
            ShapeField::new("id", TypeNode::ident("int")),
            ShapeField::optional("label", TypeNode::ident("string")),
            ShapeField::new("size", TypeNode::ident("int")),
        ]));
        assert_eq!(t.type_, Some(SchemaType::Object));
        let properties = t.properties.unwrap();
        let keys: Vec<&String> = properties.keys().collect();
        assert_eq!(keys, ["id", "label", "size"]);
        assert_eq!(t.required, Some(vec!["id".into(), "size".into()]));
    }

    #[test]
    fn all_optional_shape_omits_required() {
        let t = resolve_one(&TypeNode::Shape(vec![ShapeField::optional(
            "label",
            TypeNode::ident("string"),
        )]));
        assert_eq!(t.required, None);
    }

    #[test]
    fn nullable_wrapper_hoists_onto_the_resolved_child() {
        let defs: Definitions = ["ShareInfo".to_string()].into_iter().collect();
        let resolver = Resolver::new(defs);
        let t = resolver
            .resolve("test", &TypeNode::nullable(TypeNode::ident("ShareInfo")))
            .unwrap();
        assert!(t.nullable);
        assert_eq!(t.ref_.as_deref(), Some("#/components/schemas/ShareInfo"));
        assert!(t.one_of.is_none() && t.any_of.is_none());
    }

    #[test]
    fn param_tag_attaches_the_description() {
        let t = resolve_one(&TypeNode::Param {
            ty: Box::new(TypeNode::ident("int")),
            description: "The user id".into(),
        });
        assert_eq!(t.type_, Some(SchemaType::Integer));
        assert_eq!(t.description.as_deref(), Some("The user id"));
    }

    #[test]
    fn single_constants_resolve_to_single_value_enums() {
        let t = resolve_one(&TypeNode::ConstStr("yes".into()));
        assert_eq!(t.enum_, Some(vec![json!("yes")]));

        let t = resolve_one(&TypeNode::ConstStr("".into()));
        assert_eq!(t.enum_, None, "empty string is not a valid enum");

        let t = resolve_one(&TypeNode::ConstInt(7));
        assert_eq!(t.enum_, Some(vec![json!(7)]));
        assert_eq!(t.format, Some(SchemaFormat::Int64));
    }

    #[test]
    fn float_constants_are_fatal() {
        let err = Resolver::new(Definitions::new())
            .resolve("test", &TypeNode::ConstFloat(1.5))
            .unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedConstant { .. }));
    }

    #[test]
    fn resolve_many_keeps_job_order() {
        let resolver = Resolver::new(Definitions::new());
        let jobs = vec![
            ("a".to_string(), TypeNode::ident("int")),
            ("b".to_string(), TypeNode::ident("Nope")),
            ("c".to_string(), TypeNode::ident("string")),
        ];
        let results = resolver.resolve_many(&jobs);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().context, "a");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().type_, Some(SchemaType::String));
    }

    #[test]
    fn deep_nesting_resolves_bottom_up() {
        // ?array<string, array{tags: string[], count?: int}>
        let shape = TypeNode::Shape(vec![
            ShapeField::new("tags", TypeNode::array_of(TypeNode::ident("string"))),
            ShapeField::optional("count", TypeNode::ident("int")),
        ]);
        let node = TypeNode::nullable(TypeNode::generic(
            "array",
            vec![TypeNode::ident("string"), shape],
        ));
        let t = resolve_one(&node);
        assert!(t.nullable);
        let value_schema = match t.additional_properties.unwrap() {
            AdditionalProperties::Schema(s) => *s,
            other => panic!("unexpected: {other:?}"),
        };
        let properties = value_schema.properties.unwrap();
        assert_eq!(properties["tags"].type_, Some(SchemaType::Array));
        assert_eq!(value_schema.required, Some(vec!["tags".into()]));
    }
}
