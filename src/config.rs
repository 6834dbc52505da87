//! Configuration for conversion jobs
//!
//! Configuration can be loaded from YAML or JSON:
//!
//! ```yaml
//! build:
//!   root_name: Payload
//!   enforce_unique_name: false
//!   annotate: true
//! registry:
//!   name_suffix_bound: 99
//! render:
//!   package: models
//! ```
//!
//! Every section and key is optional.

use crate::error::{Error, Result};
use crate::registry::{StructRegistry, DEFAULT_SUFFIX_BOUND};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static PACKAGE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z_][a-z0-9_]*$").expect("package name regex init failed"));

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete configuration loaded from a file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Schema builder options
    pub build: BuildOptions,

    /// Struct registry options
    pub registry: RegistryOptions,

    /// Output rendering options
    pub render: RenderOptions,
}

impl Config {
    /// Load a config file; `.json` files are parsed as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }

    /// Parse and validate a YAML config
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate option values
    pub fn validate(&self) -> Result<()> {
        if self.build.root_name.trim().is_empty() {
            return Err(Error::config("build.root_name must not be empty"));
        }
        if self.registry.name_suffix_bound == 0 {
            return Err(Error::config("registry.name_suffix_bound must be at least 1"));
        }
        if !PACKAGE_NAME.is_match(&self.render.package) {
            return Err(Error::config(format!(
                "render.package '{}' is not a valid package name",
                self.render.package
            )));
        }
        Ok(())
    }

    /// Create an empty registry configured by this config
    pub fn new_registry(&self) -> StructRegistry {
        StructRegistry::with_suffix_bound(self.registry.name_suffix_bound)
    }
}

// ============================================================================
// Build Options
// ============================================================================

/// Options for one schema build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Name of the record describing the document root
    pub root_name: String,

    /// Force every discovered record name to be unique by suffixing
    pub enforce_unique_name: bool,

    /// Attach `json:"<key>"` annotations to fields
    pub annotate: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            root_name: "Root".to_string(),
            enforce_unique_name: false,
            annotate: true,
        }
    }
}

impl BuildOptions {
    /// Set the root record name
    #[must_use]
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    /// Enable/disable unique name enforcement
    #[must_use]
    pub fn with_unique_names(mut self, enabled: bool) -> Self {
        self.enforce_unique_name = enabled;
        self
    }

    /// Enable/disable field annotations
    #[must_use]
    pub fn with_annotations(mut self, enabled: bool) -> Self {
        self.annotate = enabled;
        self
    }
}

// ============================================================================
// Registry Options
// ============================================================================

/// Struct registry options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryOptions {
    /// Suffixes tried (exclusive) before a name counts as exhausted
    pub name_suffix_bound: usize,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            name_suffix_bound: DEFAULT_SUFFIX_BOUND,
        }
    }
}

// ============================================================================
// Render Options
// ============================================================================

/// Output rendering options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Package clause for generated Go source
    pub package: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            package: "main".to_string(),
        }
    }
}
