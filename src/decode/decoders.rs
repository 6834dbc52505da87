//! Decoder implementations
//!
//! Each decoder handles a specific document format.

use super::types::DocumentDecoder;
use crate::error::{Error, Result};
use crate::schema::Node;
use serde_json::Value;

/// Reject documents whose root is a scalar
pub fn ensure_document_root(node: Node) -> Result<Node> {
    if node.is_document_root() {
        Ok(node)
    } else {
        Err(Error::unsupported_root(format!(
            "scalar of type {}",
            node.type_name()
        )))
    }
}

// ============================================================================
// JSON Decoder
// ============================================================================

/// Decoder for a single JSON document
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self
    }
}

impl DocumentDecoder for JsonDecoder {
    fn decode(&self, body: &str) -> Result<Node> {
        let value: Value = serde_json::from_str(body).map_err(|e| {
            Error::decode(format!(
                "Failed to parse JSON at line {}, column {}: {e}",
                e.line(),
                e.column()
            ))
        })?;
        ensure_document_root(Node::from(value))
    }
}

// ============================================================================
// JSONL Decoder
// ============================================================================

/// JSON Lines decoder; the lines become the items of a root list
#[derive(Debug, Clone, Default)]
pub struct JsonlDecoder;

impl JsonlDecoder {
    /// Create a new JSONL decoder
    pub fn new() -> Self {
        Self
    }
}

impl DocumentDecoder for JsonlDecoder {
    fn decode(&self, body: &str) -> Result<Node> {
        let mut items = Vec::new();

        for (line_num, line) in body.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let value: Value = serde_json::from_str(line).map_err(|e| {
                Error::decode(format!("Failed to parse JSONL at line {}: {e}", line_num + 1))
            })?;
            items.push(Node::from(value));
        }

        Ok(Node::List(items))
    }
}

// ============================================================================
// YAML Decoder
// ============================================================================

/// Decoder for a single YAML document
#[derive(Debug, Clone, Default)]
pub struct YamlDecoder;

impl YamlDecoder {
    /// Create a new YAML decoder
    pub fn new() -> Self {
        Self
    }
}

impl DocumentDecoder for YamlDecoder {
    fn decode(&self, body: &str) -> Result<Node> {
        let value: Value = serde_yaml::from_str(body).map_err(|e| {
            let message = match e.location() {
                Some(location) => format!(
                    "Failed to parse YAML at line {}, column {}: {e}",
                    location.line(),
                    location.column()
                ),
                None => format!("Failed to parse YAML: {e}"),
            };
            Error::decode(message)
        })?;
        ensure_document_root(Node::from(value))
    }
}
