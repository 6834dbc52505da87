//! Schema inference module
//!
//! Infers named record definitions from decoded documents.
//!
//! # Features
//!
//! - **Classification**: Maps dynamic values onto a closed set of field kinds,
//!   widening narrow numeric types
//! - **Record Growth**: Same-named records seen at different places are
//!   reconciled into one definition
//! - **List Homogeneity**: Lists must hold a single element kind
//! - **Nested Lists**: Tracks how many lists enclose an element

mod builder;
mod classify;
mod trace;
mod types;
mod value;

pub use builder::{infer_structs, SchemaBuilder};
pub use classify::classify;
pub use trace::{PathStep, Trace};
pub use types::{Field, FieldKind, ListShape, Record};
pub use value::{Node, Scalar};

#[cfg(test)]
mod tests;
