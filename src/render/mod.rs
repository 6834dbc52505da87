//! Source renderers
//!
//! Turn a populated [`StructRegistry`] into text. Records are emitted in
//! registry iteration order, so nested records come first.

mod go;
mod json;

pub use go::{go_identifier, GoRenderer};
pub use json::JsonRenderer;

use crate::error::Result;
use crate::registry::StructRegistry;

/// Trait for rendering every record of a registry
pub trait Renderer: Send + Sync {
    /// Render the registry into a single document
    fn render(&self, registry: &StructRegistry) -> Result<String>;
}
