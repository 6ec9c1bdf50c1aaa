//! Configuration System
//!
//! Layered configuration for the width engine: built-in defaults, a global
//! user file, workspace files and `SIZEHINT__*` environment variables, merged
//! with the `config` crate. Holds the host view configuration snapshot, rule
//! table overrides, cache settings and logging settings.

use crate::cache::CacheConfig;
use crate::logging::LoggingConfig;
use crate::rules::{RuleOverrides, RuleTables};
use crate::view_config::ViewConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizehintConfig {
    /// Host view configuration (catalog vars, media image entries)
    #[serde(default)]
    pub view: ViewConfig,

    /// Additions to the built-in rule tables
    #[serde(default)]
    pub rules: RuleOverrides,

    /// Dedup cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Rules(String),
    Cache(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Rules(msg) => write!(f, "Rules: {}", msg),
            ValidationError::Cache(msg) => write!(f, "Cache: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl SizehintConfig {
    /// Built-in tables with this configuration's overrides applied.
    pub fn rule_tables(&self) -> RuleTables {
        RuleTables::builtin().with_overrides(&self.rules)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.rule_tables().validate() {
            errors.push(ValidationError::Rules(e.to_string()));
        }

        if self.cache.max_entries == Some(0) {
            errors.push(ValidationError::Cache(
                "max_entries must be greater than zero".to_string(),
            ));
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
