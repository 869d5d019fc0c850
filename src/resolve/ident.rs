use serde_json::json;

use crate::report::{Reporter, ResolveError};
use crate::schema::{AdditionalProperties, ResolvedType, SchemaFormat, SchemaType};
use crate::text;
use crate::Definitions;

/// Map a bare name to its base schema descriptor, or to a `$ref` against the
/// known definitions. A name in neither table is fatal.
pub(crate) fn resolve_identifier(
    context: &str,
    definitions: &Definitions,
    reporter: &Reporter,
    name: &str,
) -> Result<ResolvedType, ResolveError> {
    if name == "array" {
        reporter.warn(
            context,
            "Instead of 'array' use:\n\
             'object' for untyped objects\n\
             'array<string, mixed>' for non-empty objects\n\
             'array<empty>' for empty lists\n\
             'array<YourTypeHere>' for lists",
        );
    }
    let name = name.strip_prefix('\\').unwrap_or(name);

    let resolved = match name {
        "string" | "non-falsy-string" | "numeric-string" => {
            ResolvedType::of(context, SchemaType::String)
        }
        "non-empty-string" => ResolvedType {
            min_length: Some(1),
            ..ResolvedType::of(context, SchemaType::String)
        },
        "int" | "integer" => int64(context),
        "non-negative-int" => ResolvedType {
            minimum: Some(0),
            ..int64(context)
        },
        "positive-int" => ResolvedType {
            minimum: Some(1),
            ..int64(context)
        },
        "negative-int" => ResolvedType {
            maximum: Some(-1),
            ..int64(context)
        },
        "non-positive-int" => ResolvedType {
            maximum: Some(0),
            ..int64(context)
        },
        "bool" | "boolean" => ResolvedType::of(context, SchemaType::Boolean),
        "true" => ResolvedType {
            enum_: Some(vec![json!(true)]),
            ..ResolvedType::of(context, SchemaType::Boolean)
        },
        "false" => ResolvedType {
            enum_: Some(vec![json!(false)]),
            ..ResolvedType::of(context, SchemaType::Boolean)
        },
        "numeric" => ResolvedType::of(context, SchemaType::Number),
        // PHP stores float and double with double precision alike.
        "float" | "double" => ResolvedType {
            format: Some(SchemaFormat::Double),
            ..ResolvedType::of(context, SchemaType::Number)
        },
        "mixed" | "empty" | "array" => ResolvedType::of(context, SchemaType::Object),
        "object" | "stdClass" => ResolvedType {
            additional_properties: Some(AdditionalProperties::Any(true)),
            ..ResolvedType::of(context, SchemaType::Object)
        },
        "null" => ResolvedType {
            nullable: true,
            ..ResolvedType::new(context)
        },
        _ => {
            if definitions.contains(name) {
                ResolvedType {
                    ref_: Some(format!(
                        "#/components/schemas/{}",
                        text::clean_schema_name(name)
                    )),
                    ..ResolvedType::new(context)
                }
            } else {
                return Err(ResolveError::UnknownIdentifier {
                    context: context.to_string(),
                    name: name.to_string(),
                });
            }
        }
    };

    Ok(resolved)
}

fn int64(context: &str) -> ResolvedType {
    ResolvedType {
        format: Some(SchemaFormat::Int64),
        ..ResolvedType::of(context, SchemaType::Integer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defs(names: &[&str]) -> Definitions {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn ident(name: &str) -> ResolvedType {
        resolve_identifier("test", &defs(&[]), &Reporter::new(), name).unwrap()
    }

    #[test]
    fn integer_variants_carry_bounds() {
        let int = ident("int");
        assert_eq!(int.type_, Some(SchemaType::Integer));
        assert_eq!(int.format, Some(SchemaFormat::Int64));
        assert_eq!(int.minimum, None);

        assert_eq!(ident("non-negative-int").minimum, Some(0));
        assert_eq!(ident("positive-int").minimum, Some(1));
        assert_eq!(ident("negative-int").maximum, Some(-1));
        assert_eq!(ident("non-positive-int").maximum, Some(0));
    }

    #[test]
    fn string_variants() {
        assert_eq!(ident("string").type_, Some(SchemaType::String));
        assert_eq!(ident("numeric-string").type_, Some(SchemaType::String));
        assert_eq!(ident("non-empty-string").min_length, Some(1));
    }

    #[test]
    fn boolean_literals_become_single_value_enums() {
        assert_eq!(ident("true").enum_, Some(vec![json!(true)]));
        assert_eq!(ident("false").enum_, Some(vec![json!(false)]));
        assert_eq!(ident("bool").enum_, None);
    }

    #[test]
    fn float_and_double_share_one_descriptor() {
        let f = ident("float");
        assert_eq!(f.type_, Some(SchemaType::Number));
        assert_eq!(f.format, Some(SchemaFormat::Double));
        assert_eq!(ident("double"), f);
    }

    #[test]
    fn untyped_object_opens_additional_properties() {
        let o = ident("object");
        assert_eq!(o.type_, Some(SchemaType::Object));
        assert_eq!(o.additional_properties, Some(AdditionalProperties::Any(true)));
        // mixed stays fully unconstrained
        assert_eq!(ident("mixed").additional_properties, None);
    }

    #[test]
    fn null_is_typeless_and_nullable() {
        let n = ident("null");
        assert!(n.nullable);
        assert_eq!(n.type_, None);
    }

    #[test]
    fn bare_array_warns_but_resolves() {
        let reporter = Reporter::new();
        let t = resolve_identifier("ctx", &defs(&[]), &reporter, "array").unwrap();
        assert_eq!(t.type_, Some(SchemaType::Object));
        let warnings = reporter.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("array<YourTypeHere>"));
    }

    #[test]
    fn known_definition_becomes_ref() {
        let t = resolve_identifier(
            "ctx",
            &defs(&["ShareInfo"]),
            &Reporter::new(),
            "ShareInfo",
        )
        .unwrap();
        assert_eq!(t.ref_.as_deref(), Some("#/components/schemas/ShareInfo"));
        assert_eq!(t.type_, None);
    }

    #[test]
    fn leading_backslash_is_ignored() {
        let t = resolve_identifier(
            "ctx",
            &defs(&["ShareInfo"]),
            &Reporter::new(),
            "\\ShareInfo",
        )
        .unwrap();
        assert_eq!(t.ref_.as_deref(), Some("#/components/schemas/ShareInfo"));
    }

    #[test]
    fn unknown_identifier_is_fatal_and_named() {
        let err =
            resolve_identifier("ctx", &defs(&[]), &Reporter::new(), "NotAThing").unwrap_err();
        match err {
            ResolveError::UnknownIdentifier { context, name } => {
                assert_eq!(context, "ctx");
                assert_eq!(name, "NotAThing");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
