//! Field kind classification

use super::types::FieldKind;
use super::value::{Node, Scalar};

/// Classify a node into a field kind
///
/// Returns `None` for dynamic types without a kind (null, byte blobs,
/// unsigned integers beyond the 64-bit signed range). Callers turn that
/// into an `UnsupportedType` error.
pub fn classify(value: &Node) -> Option<FieldKind> {
    match value {
        Node::Record(_) => Some(FieldKind::Record),
        Node::List(_) => Some(FieldKind::List),
        Node::Scalar(scalar) => classify_scalar(scalar),
    }
}

fn classify_scalar(scalar: &Scalar) -> Option<FieldKind> {
    match scalar {
        Scalar::Bool(_) => Some(FieldKind::Boolean),
        Scalar::I8(_) | Scalar::I16(_) | Scalar::I32(_) | Scalar::U8(_) | Scalar::U16(_) => {
            Some(FieldKind::Integer)
        }
        Scalar::I64(_) | Scalar::U32(_) => Some(FieldKind::Integer64),
        Scalar::U64(u) => i64::try_from(*u).ok().map(|_| FieldKind::Integer64),
        Scalar::F32(_) | Scalar::F64(_) => Some(FieldKind::Float),
        Scalar::String(_) => Some(FieldKind::String),
        Scalar::Null | Scalar::Bytes(_) => None,
    }
}
