//! Resolve parsed PHP-family type expressions into OpenAPI Schema Objects.
//!
//! Input is a [`TypeNode`] tree from an upstream source parser (native type
//! declarations, doc-comment annotations, literal/const expressions) plus a
//! read-only set of known schema names. Output is a [`ResolvedType`] tree,
//! serialized on demand into a plain ordered value ready to embed under a
//! `schema` or `components.schemas.<name>` location.
//!
//! Design goals:
//! - Exhaustive dispatch over the input sum type; unrecognized shapes fail
//!   loudly instead of dropping information.
//! - Fatal diagnostics are `Err` values, recoverable ones collect in a
//!   [`Reporter`] threaded through every call.
//! - Resolution is pure: same node + same definitions → same tree, safe to
//!   fan out across threads.
//!
//! ```
//! use phpdoc_oas::{Definitions, Resolver, TypeNode, emit_schema};
//!
//! let resolver = Resolver::new(Definitions::new());
//! let node = TypeNode::nullable(TypeNode::array_of(TypeNode::ident("string")));
//! let resolved = resolver.resolve("Controller::method", &node).unwrap();
//! let schema = emit_schema(&resolved, false);
//! assert_eq!(schema["type"], "array");
//! assert_eq!(schema["nullable"], true);
//! ```

pub mod ast;
pub mod report;
pub mod resolve;
pub mod schema;
pub mod serialize;
pub mod text;

use std::collections::BTreeSet;

/// Names of schemas known to exist in the target document. Queried, never
/// mutated, by identifier resolution.
pub type Definitions = BTreeSet<String>;

pub use ast::{ShapeField, TypeNode};
pub use report::{Diagnostic, Reporter, ResolveError};
pub use resolve::{resolve, Resolver};
pub use schema::{AdditionalProperties, ResolvedType, SchemaFormat, SchemaType};
pub use serialize::emit_schema;
