//! Decoded document tree
//!
//! The builder never looks at raw text. Decoders hand it a [`Node`] tree,
//! which is either a keyed record, an ordered list, or a scalar leaf.

use serde_json::Value;
use std::collections::BTreeMap;

/// A primitive leaf in a decoded document
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
}

impl Scalar {
    /// Name of the dynamic type, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::I8(_) => "i8",
            Scalar::I16(_) => "i16",
            Scalar::I32(_) => "i32",
            Scalar::I64(_) => "i64",
            Scalar::U8(_) => "u8",
            Scalar::U16(_) => "u16",
            Scalar::U32(_) => "u32",
            Scalar::U64(_) => "u64",
            Scalar::F32(_) => "f32",
            Scalar::F64(_) => "f64",
            Scalar::String(_) => "string",
            Scalar::Bytes(_) => "bytes",
        }
    }
}

/// A node of a decoded document
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Mapping from string keys to nodes
    Record(BTreeMap<String, Node>),
    /// Ordered list of nodes
    List(Vec<Node>),
    /// Primitive leaf
    Scalar(Scalar),
}

impl Node {
    /// Name of the node's dynamic type, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Record(_) => "record",
            Node::List(_) => "list",
            Node::Scalar(scalar) => scalar.type_name(),
        }
    }

    /// A document root must be a record or a list
    pub fn is_document_root(&self) -> bool {
        matches!(self, Node::Record(_) | Node::List(_))
    }

    /// Build a record node from key/value pairs
    pub fn record<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        Node::Record(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Node::Scalar(scalar)
    }
}

impl From<&Value> for Node {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Node::Scalar(Scalar::Null),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(*b)),
            Value::Number(n) => {
                let scalar = if let Some(i) = n.as_i64() {
                    i32::try_from(i).map_or(Scalar::I64(i), Scalar::I32)
                } else if let Some(u) = n.as_u64() {
                    Scalar::U64(u)
                } else {
                    Scalar::F64(n.as_f64().unwrap_or(f64::NAN))
                };
                Node::Scalar(scalar)
            }
            Value::String(s) => Node::Scalar(Scalar::String(s.clone())),
            Value::Array(items) => Node::List(items.iter().map(Node::from).collect()),
            Value::Object(map) => Node::Record(
                map.iter()
                    .map(|(k, v)| (k.clone(), Node::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::from(&value)
    }
}
