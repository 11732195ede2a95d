use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

/// A renderable runtime value.
///
/// The open-ended type universe of the original duck-typed visualizer is
/// modeled as a closed variant set: keyed containers, indexed containers,
/// leaves, and shared (aliasable) nodes. Containers may nest arbitrarily
/// deep; the renderer enforces the depth limit, not the value model.
#[derive(Debug, Clone)]
pub enum Value {
    /// Keyed container. Insertion order is preserved and is the render order.
    Map(IndexMap<String, Value>),
    /// Ordered sequence.
    List(Vec<Value>),
    /// Fixed-shape sequence. Renders like a list, labeled `tuple`.
    Tuple(Vec<Value>),
    /// Set semantics with stable insertion-order iteration.
    Set(Vec<Value>),
    /// A node with no children.
    Leaf(Leaf),
    /// An aliasable node. The same cell may appear at several positions in
    /// one tree; this is also the only way to build a cyclic structure,
    /// which the renderer detects by cell identity.
    Shared(Rc<RefCell<Value>>),
}

impl Value {
    /// Builds a keyed container from `(key, value)` pairs.
    pub fn map<K, I>(entries: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Builds an ordered sequence.
    pub fn list<I: IntoIterator<Item = Value>>(items: I) -> Value {
        Value::List(items.into_iter().collect())
    }

    /// Builds a tuple.
    pub fn tuple<I: IntoIterator<Item = Value>>(items: I) -> Value {
        Value::Tuple(items.into_iter().collect())
    }

    /// Builds a set. Iteration order is the order given here.
    pub fn set<I: IntoIterator<Item = Value>>(items: I) -> Value {
        Value::Set(items.into_iter().collect())
    }

    /// Wraps a value in a fresh shared cell.
    pub fn shared(value: Value) -> Value {
        Value::Shared(Rc::new(RefCell::new(value)))
    }

    pub fn null() -> Value {
        Value::Leaf(Leaf::Null)
    }

    /// Display label shown in parentheses next to the node.
    pub fn type_label(&self) -> String {
        match self {
            Value::Map(_) => "map".to_string(),
            Value::List(_) => "list".to_string(),
            Value::Tuple(_) => "tuple".to_string(),
            Value::Set(_) => "set".to_string(),
            Value::Leaf(leaf) => leaf.label(),
            Value::Shared(cell) => cell.borrow().type_label(),
        }
    }

    /// True for a container with zero elements.
    pub fn is_empty_container(&self) -> bool {
        match self {
            Value::Map(entries) => entries.is_empty(),
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => items.is_empty(),
            Value::Leaf(_) => false,
            Value::Shared(cell) => cell.borrow().is_empty_container(),
        }
    }
}

impl fmt::Display for Value {
    /// Literal form used when a node renders on a leaf line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Leaf(leaf) => leaf.fmt(f),
            Value::Map(entries) => write!(f, "{{..{} entries}}", entries.len()),
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => {
                write!(f, "[..{} items]", items.len())
            }
            Value::Shared(cell) => cell.borrow().fmt(f),
        }
    }
}

/// A childless node: scalars plus the exotic values the visualizer accepts
/// without complaint (binary payloads, errors, references to types and
/// callables). Rendered with the literal textual form, no escaping or
/// truncation regardless of length.
#[derive(Debug, Clone)]
pub enum Leaf {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
    Bytes(Vec<u8>),
    /// Reference to a type definition; labeled `class: Name`.
    Class(String),
    /// Reference to a callable; labeled `function: name`.
    Function(String),
    /// An error object carried as data, labeled with its kind.
    Error { kind: String, message: String },
    /// Anything else, carried with a caller-supplied type name and repr.
    Opaque { type_name: String, repr: String },
}

impl Leaf {
    pub fn label(&self) -> String {
        match self {
            Leaf::Int(_) => "int".to_string(),
            Leaf::Float(_) => "float".to_string(),
            Leaf::Str(_) => "str".to_string(),
            Leaf::Bool(_) => "bool".to_string(),
            Leaf::Null => "null".to_string(),
            Leaf::Bytes(_) => "bytes".to_string(),
            Leaf::Class(name) => format!("class: {name}"),
            Leaf::Function(name) => format!("function: {name}"),
            Leaf::Error { kind, .. } => kind.clone(),
            Leaf::Opaque { type_name, .. } => type_name.clone(),
        }
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Int(v) => write!(f, "{v}"),
            Leaf::Float(v) => write!(f, "{v}"),
            Leaf::Str(v) => write!(f, "{v}"),
            Leaf::Bool(v) => write!(f, "{v}"),
            Leaf::Null => write!(f, "null"),
            Leaf::Bytes(bytes) => {
                write!(f, "0x")?;
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            Leaf::Class(name) => write!(f, "{name}"),
            Leaf::Function(name) => write!(f, "{name}"),
            Leaf::Error { message, .. } => write!(f, "{message}"),
            Leaf::Opaque { repr, .. } => write!(f, "{repr}"),
        }
    }
}

impl From<Leaf> for Value {
    fn from(leaf: Leaf) -> Value {
        Value::Leaf(leaf)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Value {
        Value::Leaf(Leaf::Int(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Value {
        Value::Leaf(Leaf::Int(v.into()))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Value {
        Value::Leaf(Leaf::Float(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Value {
        Value::Leaf(Leaf::Bool(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Value {
        Value::Leaf(Leaf::Str(v.to_string()))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Value {
        Value::Leaf(Leaf::Str(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_labels() {
        assert_eq!(Leaf::Int(1).label(), "int");
        assert_eq!(Leaf::Null.label(), "null");
        assert_eq!(Leaf::Class("User".into()).label(), "class: User");
        assert_eq!(Leaf::Function("score".into()).label(), "function: score");
        assert_eq!(
            Leaf::Error {
                kind: "ValueError".into(),
                message: "bad".into()
            }
            .label(),
            "ValueError"
        );
    }

    #[test]
    fn leaf_display() {
        assert_eq!(Leaf::Bytes(vec![1, 2, 3]).to_string(), "0x010203");
        assert_eq!(Leaf::Bool(true).to_string(), "true");
        assert_eq!(
            Leaf::Opaque {
                type_name: "range".into(),
                repr: "range(0..5)".into()
            }
            .to_string(),
            "range(0..5)"
        );
    }

    #[test]
    fn container_labels() {
        assert_eq!(Value::map([("a", Value::from(1))]).type_label(), "map");
        assert_eq!(Value::list([]).type_label(), "list");
        assert_eq!(Value::tuple([]).type_label(), "tuple");
        assert_eq!(Value::set([]).type_label(), "set");
    }

    #[test]
    fn shared_delegates_to_target() {
        let shared = Value::shared(Value::from(7));
        assert_eq!(shared.type_label(), "int");
        assert_eq!(shared.to_string(), "7");
        assert!(!shared.is_empty_container());
        assert!(Value::shared(Value::list([])).is_empty_container());
    }

    #[test]
    fn map_preserves_insertion_order() {
        let value = Value::map([
            ("zebra", Value::from(1)),
            ("apple", Value::from(2)),
            ("mango", Value::from(3)),
        ]);
        let Value::Map(entries) = value else {
            panic!("expected a map")
        };
        let keys: Vec<_> = entries.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zebra", "apple", "mango"]);
    }
}
