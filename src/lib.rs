// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::unused_async)]

//! # togo
//!
//! Infer named struct definitions from JSON-like documents.
//!
//! Every record found in a document becomes a named struct. Records that
//! share a name are merged into one shape, and structs are emitted deepest
//! first so a struct is always declared before the structs that use it.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use togo::config::BuildOptions;
//! use togo::render::{GoRenderer, Renderer};
//! use togo::schema::infer_structs;
//!
//! let value = serde_json::json!({"name": "a", "addr": {"zip": 1}});
//! let registry = infer_structs(&value, &BuildOptions::default())?;
//! print!("{}", GoRenderer::new("models").render(&registry)?);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────────────────────┐   ┌────────────┐
//! │  Decoders  │──▶│        SchemaBuilder         │──▶│ Renderers  │
//! │ JSON/JSONL │   │ classify → trace → grow      │   │ Go / JSON  │
//! │ YAML       │   └──────────────┬───────────────┘   └────────────┘
//! └────────────┘                  │
//!                   ┌─────────────▼────────────────┐
//!                   │        StructRegistry        │
//!                   │ NameRegistry │ LevelCache    │
//!                   └──────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Configuration files and build options
pub mod config;

/// Field classification, records and the schema builder
pub mod schema;

/// Record store, level cache and name reservation
pub mod registry;

/// Document decoders (JSON, JSONL, YAML)
pub mod decode;

/// Go and JSON renderers
pub mod render;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{BuildOptions, Config};
pub use error::{Error, Result};
pub use registry::{SharedRegistry, StructRegistry};
pub use schema::{infer_structs, Field, FieldKind, Node, Record, SchemaBuilder};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
