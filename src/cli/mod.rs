//! CLI module
//!
//! Command-line interface for converting documents into struct definitions.
//!
//! # Commands
//!
//! - `generate` - Infer records from documents and render them
//! - `levels` - Show the nesting level of every inferred record
//! - `validate-config` - Check a configuration file

mod commands;
mod runner;

pub use commands::{BuildArgs, Cli, Commands, OutputFormat};
pub use runner::Runner;
