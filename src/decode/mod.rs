//! Document decoder module
//!
//! Supports: JSON, JSONL, YAML
//!
//! # Overview
//!
//! Decoders turn document text into a [`Node`](crate::schema::Node) tree for
//! the schema builder. Scalar roots are rejected here, before any record is
//! registered.

mod decoders;
mod types;

pub use decoders::{ensure_document_root, JsonDecoder, JsonlDecoder, YamlDecoder};
pub use types::{DecoderFormat, DocumentDecoder};
