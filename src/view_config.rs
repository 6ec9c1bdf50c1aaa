//! Host view configuration
//!
//! The storefront's theme configuration exposes namespaced variables (image
//! sizes for the catalog) and per-image media entries keyed by image id.
//! The resolver reads it through [`ViewConfigSource`] so hosts can plug in
//! their own lookup; [`ViewConfig`] is the in-crate snapshot loaded from
//! configuration files.

use crate::error::ResolveError;
use crate::types::{ConfigVars, Width};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Namespace holding catalog image size variables.
pub const CATALOG_NAMESPACE: &str = "catalog";

/// Lookup capability supplied by the host.
pub trait ViewConfigSource: Send + Sync {
    /// All variables of `namespace`. A missing namespace is an empty map.
    fn vars(&self, namespace: &str) -> Result<ConfigVars, ResolveError>;

    /// Configured width of the media image entry `image_id`, if any.
    fn media_image_width(&self, image_id: &str) -> Result<Option<Width>, ResolveError>;

    /// Namespace the resolver reads for area identifiers.
    fn catalog_namespace(&self) -> &str {
        CATALOG_NAMESPACE
    }
}

/// One media image entry from the view configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaImage {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub image_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Width>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Width>,
}

/// Snapshot of the host view configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_catalog_namespace")]
    pub catalog_namespace: String,

    /// namespace -> variable -> value
    #[serde(default, deserialize_with = "deserialize_namespaces")]
    pub vars: BTreeMap<String, ConfigVars>,

    /// image id -> media entry
    #[serde(default)]
    pub media: BTreeMap<String, MediaImage>,
}

fn default_catalog_namespace() -> String {
    CATALOG_NAMESPACE.to_string()
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            catalog_namespace: default_catalog_namespace(),
            vars: BTreeMap::new(),
            media: BTreeMap::new(),
        }
    }
}

impl ViewConfig {
    /// Set a catalog variable, creating the namespace if needed.
    pub fn with_catalog_var(mut self, name: &str, value: &str) -> Self {
        self.vars
            .entry(self.catalog_namespace.clone())
            .or_default()
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_media_width(mut self, image_id: &str, width: Width) -> Self {
        self.media.entry(image_id.to_string()).or_default().width = Some(width);
        self
    }

    pub fn catalog_vars(&self) -> ConfigVars {
        self.vars
            .get(&self.catalog_namespace)
            .cloned()
            .unwrap_or_default()
    }
}

impl ViewConfigSource for ViewConfig {
    fn vars(&self, namespace: &str) -> Result<ConfigVars, ResolveError> {
        Ok(self.vars.get(namespace).cloned().unwrap_or_default())
    }

    fn media_image_width(&self, image_id: &str) -> Result<Option<Width>, ResolveError> {
        Ok(self
            .media
            .get(image_id)
            .and_then(|image| image.width)
            .filter(|w| *w > 0))
    }

    fn catalog_namespace(&self) -> &str {
        &self.catalog_namespace
    }
}

/// Theme files write sizes both as strings and as bare integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawVar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

impl RawVar {
    fn into_string(self) -> String {
        match self {
            RawVar::Text(s) => s,
            RawVar::Integer(i) => i.to_string(),
            RawVar::Float(f) => f.to_string(),
            RawVar::Flag(b) => b.to_string(),
        }
    }
}

fn deserialize_namespaces<'de, D>(deserializer: D) -> Result<BTreeMap<String, ConfigVars>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, BTreeMap<String, RawVar>> = BTreeMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(namespace, vars)| {
            let vars = vars
                .into_iter()
                .map(|(name, value)| (name, value.into_string()))
                .collect();
            (namespace, vars)
        })
        .collect())
}
