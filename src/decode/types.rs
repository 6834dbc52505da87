//! Decoder types and traits

use super::decoders::{JsonDecoder, JsonlDecoder, YamlDecoder};
use crate::error::Result;
use crate::schema::Node;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Format of an input document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecoderFormat {
    /// JSON format (default)
    #[default]
    Json,
    /// JSON Lines format (one JSON value per line)
    Jsonl,
    /// YAML format
    Yaml,
}

impl DecoderFormat {
    /// Pick a format from a file extension, defaulting to JSON
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("jsonl" | "ndjson") => DecoderFormat::Jsonl,
            Some("yaml" | "yml") => DecoderFormat::Yaml,
            _ => DecoderFormat::Json,
        }
    }

    /// Decoder for this format
    pub fn decoder(self) -> Box<dyn DocumentDecoder> {
        match self {
            DecoderFormat::Json => Box::new(JsonDecoder::new()),
            DecoderFormat::Jsonl => Box::new(JsonlDecoder::new()),
            DecoderFormat::Yaml => Box::new(YamlDecoder::new()),
        }
    }
}

/// Trait for decoding document text into a node tree
pub trait DocumentDecoder: Send + Sync {
    /// Decode the document; the root is always a record or a list
    fn decode(&self, body: &str) -> Result<Node>;
}
