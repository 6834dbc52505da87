//! Struct registry module
//!
//! Stores discovered records and decides the order they are emitted in.
//!
//! # Components
//!
//! - **LevelCache**: Name to nesting level index with promotion-only moves
//! - **NameRegistry**: Unique name reservation with numeric suffixes
//! - **StructRegistry**: Record store iterated deepest level first
//! - **SharedRegistry**: Lock-guarded handle for concurrent jobs

mod level_cache;
mod names;
mod shared;
mod store;

pub use level_cache::{LevelCache, LevelName, LevelNames, Location};
pub use names::{NameRegistry, DEFAULT_SUFFIX_BOUND};
pub use shared::SharedRegistry;
pub use store::{StructRegistry, Structs};
