//! Registry shared between conversion jobs
//!
//! Builds take the write lock for their whole run, so registry mutations
//! are serialized and never interleave with readers.

use super::store::StructRegistry;
use crate::config::BuildOptions;
use crate::error::Result;
use crate::schema::{Node, Record, SchemaBuilder};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Cloneable handle to a registry used by several jobs
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<StructRegistry>>,
}

impl SharedRegistry {
    /// Wrap an existing registry
    pub fn new(registry: StructRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Run one build under the write lock
    pub async fn build(&self, tree: &Node, options: &BuildOptions) -> Result<Record> {
        let mut registry = self.inner.write().await;
        SchemaBuilder::new(&mut registry, options.clone()).build(tree)
    }

    /// Read the registry under the read lock
    pub async fn read<R>(&self, f: impl FnOnce(&StructRegistry) -> R) -> R {
        let registry = self.inner.read().await;
        f(&registry)
    }

    /// Clone every record in iteration order
    pub async fn snapshot(&self) -> Result<Vec<Record>> {
        self.read(StructRegistry::to_vec).await
    }

    /// Number of registered records
    pub async fn len(&self) -> usize {
        self.read(StructRegistry::len).await
    }

    pub async fn is_empty(&self) -> bool {
        self.read(StructRegistry::is_empty).await
    }

    /// Take the registry back once no other handle is alive
    pub fn into_inner(self) -> Option<StructRegistry> {
        Arc::try_unwrap(self.inner).ok().map(RwLock::into_inner)
    }
}
