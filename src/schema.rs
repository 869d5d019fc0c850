// Strongly-typed schema tree. No serde_json::Value here except literal
// payloads (enum values, defaults), which are opaque to resolution.

use indexmap::IndexMap;
use serde_json::Value;

/// The OpenAPI primitive/container vocabulary. Absent `type` plus
/// `nullable` is the pure-null schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
}

impl SchemaType {
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Integer => "integer",
            SchemaType::Number => "number",
            SchemaType::Boolean => "boolean",
            SchemaType::Object => "object",
            SchemaType::Array => "array",
        }
    }
}

/// Format refinement of a `SchemaType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Int64,
    Double,
}

impl SchemaFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaFormat::Int64 => "int64",
            SchemaFormat::Double => "double",
        }
    }
}

/// `additionalProperties`: absent, a blanket flag, or a schema for
/// unlisted keys.
#[derive(Debug, Clone, PartialEq)]
pub enum AdditionalProperties {
    Any(bool),
    Schema(Box<ResolvedType>),
}

/// A node in the resolved schema tree.
///
/// Built bottom-up by the resolver, owned by the call that created it and
/// consumed once by the serializer. `context` is the human-readable location
/// carried for diagnostics; it takes part in structural equality because two
/// members of the same union always resolve under the same context string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedType {
    pub context: String,
    /// `#/components/schemas/<name>` pointer; practically exclusive with
    /// `type_` and the combinator lists.
    pub ref_: Option<String>,
    pub type_: Option<SchemaType>,
    pub format: Option<SchemaFormat>,
    pub nullable: bool,
    /// `None` = no default at all. `Some(Value::Null)` = a declared default
    /// of null, which the serializer suppresses like the original does.
    pub default: Option<Value>,
    /// Present only when `type_ == Some(Array)`.
    pub items: Option<Box<ResolvedType>>,
    /// Ordered record fields.
    pub properties: Option<IndexMap<String, ResolvedType>>,
    /// Names of mandatory fields; `None` when no field is mandatory.
    pub required: Option<Vec<String>>,
    pub additional_properties: Option<AdditionalProperties>,
    pub one_of: Option<Vec<ResolvedType>>,
    pub any_of: Option<Vec<ResolvedType>>,
    pub all_of: Option<Vec<ResolvedType>>,
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    /// Literal values, homogeneous in underlying type.
    pub enum_: Option<Vec<Value>>,
    /// Free text from an `@param` tag; emitted in body context only.
    pub description: Option<String>,
}

impl ResolvedType {
    /// Unconstrained node at `context`; combine with struct-update syntax.
    pub fn new(context: impl Into<String>) -> Self {
        ResolvedType {
            context: context.into(),
            ..ResolvedType::default()
        }
    }

    /// Base descriptor: bare `type` at `context`.
    pub fn of(context: impl Into<String>, type_: SchemaType) -> Self {
        ResolvedType {
            type_: Some(type_),
            ..ResolvedType::new(context)
        }
    }
}
