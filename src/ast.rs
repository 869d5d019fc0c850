// Input contract: the type-expression nodes handed over by the upstream
// parser. One tagged union instead of an instanceof ladder, so dispatch
// stays exhaustive when new node shapes appear.

/// A parsed type expression. Covers native declarations, doc-comment
/// annotations and literal/const expressions alike.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    /// A bare primitive or named type (`int`, `string`, `OCA\Foo\Bar`, ...).
    Ident(String),
    /// `?T`
    Nullable(Box<TypeNode>),
    /// `A|B|...`
    Union(Vec<TypeNode>),
    /// `A&B&...`
    Intersection(Vec<TypeNode>),
    /// `T[]`
    ArrayOf(Box<TypeNode>),
    /// `name<arg, ...>` — `array<T>`, `list<T>`, `array<K, V>`, `int<L, U>`,
    /// `value-of<T>` and anything else the doc parser produces.
    Generic { name: String, args: Vec<TypeNode> },
    /// `array{key: T, other?: U, ...}` — ordered, optionally-optional fields.
    Shape(Vec<ShapeField>),
    /// `'literal'`
    ConstStr(String),
    /// `42`
    ConstInt(i64),
    /// Float constants exist in the doc grammar but have no schema mapping.
    ConstFloat(f64),
    /// An `@param` tag: the annotated type plus its free-text description.
    Param {
        ty: Box<TypeNode>,
        description: String,
    },
}

/// One entry of an array-shape: key name, value type, optional marker (`?:`).
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeField {
    pub name: String,
    pub optional: bool,
    pub value: TypeNode,
}

impl ShapeField {
    pub fn new(name: impl Into<String>, value: TypeNode) -> Self {
        Self { name: name.into(), optional: false, value }
    }

    pub fn optional(name: impl Into<String>, value: TypeNode) -> Self {
        Self { name: name.into(), optional: true, value }
    }
}

impl TypeNode {
    pub fn ident(name: impl Into<String>) -> Self {
        TypeNode::Ident(name.into())
    }

    pub fn nullable(inner: TypeNode) -> Self {
        TypeNode::Nullable(Box::new(inner))
    }

    pub fn array_of(inner: TypeNode) -> Self {
        TypeNode::ArrayOf(Box::new(inner))
    }

    pub fn generic(name: impl Into<String>, args: Vec<TypeNode>) -> Self {
        TypeNode::Generic { name: name.into(), args }
    }

    /// Short structural description for diagnostics; never the full subtree.
    pub fn describe(&self) -> String {
        match self {
            TypeNode::Ident(name) => format!("identifier '{name}'"),
            TypeNode::Nullable(_) => "nullable type".into(),
            TypeNode::Union(members) => format!("union of {} members", members.len()),
            TypeNode::Intersection(members) => {
                format!("intersection of {} members", members.len())
            }
            TypeNode::ArrayOf(_) => "array type".into(),
            TypeNode::Generic { name, args } => {
                format!("generic '{name}' with {} arguments", args.len())
            }
            TypeNode::Shape(fields) => format!("array-shape with {} fields", fields.len()),
            TypeNode::ConstStr(value) => format!("string constant '{value}'"),
            TypeNode::ConstInt(value) => format!("integer constant {value}"),
            TypeNode::ConstFloat(value) => format!("float constant {value}"),
            TypeNode::Param { .. } => "parameter tag".into(),
        }
    }
}
