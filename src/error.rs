//! Error types for togo
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for togo
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Schema Errors
    // ============================================================================
    #[error("Unsupported value type '{type_name}' at '{path}'")]
    UnsupportedType { path: String, type_name: String },

    #[error("Heterogeneous list at '{path}': expected {expected}, found {found}")]
    HeterogeneousList {
        path: String,
        expected: String,
        found: String,
    },

    #[error("Field mismatch in record '{record}': existing {existing}, incoming {incoming}")]
    FieldMismatch {
        record: String,
        existing: String,
        incoming: String,
    },

    #[error("Cannot grow record '{target}' with record '{incoming}'")]
    RecordIdentity { target: String, incoming: String },

    #[error("Unsupported document root: {found}")]
    UnsupportedRootShape { found: String },

    // ============================================================================
    // Registry Errors
    // ============================================================================
    #[error("Cache '{cache}' has no entry for '{key}': {message}")]
    CacheLookup {
        cache: String,
        key: String,
        message: String,
    },

    #[error("Name '{name}' is taken and no free suffix exists below {bound}")]
    NameExhaustion { name: String, bound: usize },

    #[error("Registry is inconsistent: '{name}' is cached but has no record")]
    RegistryInconsistent { name: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Input / Output Errors
    // ============================================================================
    #[error("Failed to decode document: {message}")]
    Decode { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an unsupported type error
    pub fn unsupported_type(path: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::UnsupportedType {
            path: path.into(),
            type_name: type_name.into(),
        }
    }

    /// Create a heterogeneous list error
    pub fn heterogeneous_list(
        path: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::HeterogeneousList {
            path: path.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a field mismatch error
    pub fn field_mismatch(
        record: impl Into<String>,
        existing: impl Into<String>,
        incoming: impl Into<String>,
    ) -> Self {
        Self::FieldMismatch {
            record: record.into(),
            existing: existing.into(),
            incoming: incoming.into(),
        }
    }

    /// Create an unsupported root shape error
    pub fn unsupported_root(found: impl Into<String>) -> Self {
        Self::UnsupportedRootShape {
            found: found.into(),
        }
    }

    /// Create a cache lookup error
    pub fn cache_lookup(
        cache: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::CacheLookup {
            cache: cache.into(),
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a render error
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Check if this error came from schema inference or from the struct
    /// registry it writes into (as opposed to decoding, configuration or I/O)
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedType { .. }
                | Error::HeterogeneousList { .. }
                | Error::FieldMismatch { .. }
                | Error::RecordIdentity { .. }
                | Error::UnsupportedRootShape { .. }
                | Error::CacheLookup { .. }
                | Error::NameExhaustion { .. }
                | Error::RegistryInconsistent { .. }
        )
    }
}

/// Result type alias for togo
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
