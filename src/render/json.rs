//! JSON renderer

use super::Renderer;
use crate::error::Result;
use crate::registry::StructRegistry;

/// Renders the registry as a pretty JSON array of records
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, registry: &StructRegistry) -> Result<String> {
        let records = registry.iter().collect::<Result<Vec<_>>>()?;
        Ok(serde_json::to_string_pretty(&records)?)
    }
}
