// ── Value ─────────────────────────────────────────────────────────────────

/// A literal value in a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Quoted string: `"editor"`
    Str(String),
    /// Floating-point literal: `0.25` or `3`
    Number(f32),
    /// Boolean literal: `true` / `false`
    Bool(bool),
    /// Unquoted identifier: key references and enum variants (`horizontal`, `all`)
    Ident(String),
}

impl Value {
    /// Short name of the value's kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Ident(_) => "identifier",
        }
    }
}

// ── Prop ──────────────────────────────────────────────────────────────────

/// A single `key: value` property inside a node block.
#[derive(Debug, Clone, PartialEq)]
pub struct Prop {
    pub key: String,
    pub value: Value,
    /// 1-based line of the key.
    pub line: usize,
}

// ── Node ──────────────────────────────────────────────────────────────────

/// One node of a layout document.
///
/// ```text
/// Cell "editor" {
///     weight: 3
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Node type: `"Grid"`, `"Row"`, `"Cell"`, `"Divider"`.
    pub kind: String,
    /// Optional quoted label; rows, cells, and dividers use it as their key.
    pub label: Option<String>,
    /// Properties inside the block (`key: value` items).
    pub props: Vec<Prop>,
    /// Nested nodes inside the block.
    pub children: Vec<Node>,
    /// 1-based line of the node's type name.
    pub line: usize,
}

impl Node {
    /// Look up a property value by key. The last occurrence wins.
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.iter().rev().find(|p| p.key == key).map(|p| &p.value)
    }

    /// Get a property as `f32` if it is a `Number`.
    pub fn prop_f32(&self, key: &str) -> Option<f32> {
        match self.prop(key)? {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Get a property as `bool` if it is a `Bool`.
    pub fn prop_bool(&self, key: &str) -> Option<bool> {
        match self.prop(key)? {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get a property as a name: identifiers and strings both qualify.
    pub fn prop_name(&self, key: &str) -> Option<&str> {
        match self.prop(key)? {
            Value::Ident(s) | Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Children of a given kind, in source order.
    pub fn children_of<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |c| c.kind == kind)
    }
}

// ── Document ──────────────────────────────────────────────────────────────

/// A parsed `.tgrid` file: exactly one root node.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: Node,
}
