//! Core types shared by the resolver, annotator and host adapters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Pixel width stamped onto a URL. Never zero when produced by the resolver.
pub type Width = u32;

/// Variables from one namespace of the host view configuration.
pub type ConfigVars = BTreeMap<String, String>;

/// Description of where an image is being used, built fresh for every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UsageContext {
    /// Catalog image display area, e.g. `category_page_grid`.
    Area { area_id: String },
    /// Block image type with an optional width set on the block itself.
    Role {
        role_id: String,
        configured_width: Option<Width>,
    },
    /// Raw media URL with an embedded filename (WYSIWYG content).
    Path { raw_url: String },
}

impl UsageContext {
    pub fn area(area_id: impl Into<String>) -> Self {
        UsageContext::Area {
            area_id: area_id.into(),
        }
    }

    pub fn role(role_id: impl Into<String>, configured_width: Option<Width>) -> Self {
        UsageContext::Role {
            role_id: role_id.into(),
            configured_width,
        }
    }

    pub fn path(raw_url: impl Into<String>) -> Self {
        UsageContext::Path {
            raw_url: raw_url.into(),
        }
    }

    /// The identifier that drives resolution, for diagnostics.
    pub fn identifier(&self) -> &str {
        match self {
            UsageContext::Area { area_id } => area_id,
            UsageContext::Role { role_id, .. } => role_id,
            UsageContext::Path { raw_url } => raw_url,
        }
    }
}

/// Which strategy produced a width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum WidthSource {
    ExactOverride,
    ConfigMapping { var: String },
    DerivedKey { var: String },
    Pattern { rule: String },
    Explicit,
    MediaImageData,
    PathRule { rule: String },
    PathDefault,
}

impl fmt::Display for WidthSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidthSource::ExactOverride => write!(f, "exact override"),
            WidthSource::ConfigMapping { var } => write!(f, "config mapping ({})", var),
            WidthSource::DerivedKey { var } => write!(f, "derived key ({})", var),
            WidthSource::Pattern { rule } => write!(f, "pattern rule {}", rule),
            WidthSource::Explicit => write!(f, "explicit block width"),
            WidthSource::MediaImageData => write!(f, "media image data"),
            WidthSource::PathRule { rule } => write!(f, "path rule {}", rule),
            WidthSource::PathDefault => write!(f, "path default"),
        }
    }
}

/// A successfully resolved width and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolved {
    pub width: Width,
    pub source: WidthSource,
}

impl Resolved {
    pub fn new(width: Width, source: WidthSource) -> Self {
        Self { width, source }
    }
}

/// Why no width was produced. Callers must leave the URL untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Unresolved {
    #[error("no table or rule matched")]
    NoMatch,

    #[error("not an image URL")]
    NotAnImage,

    #[error("malformed URL")]
    MalformedUrl,

    #[error("URL already carries a width parameter")]
    AlreadyAnnotated,

    #[error("config variable {var} has non-numeric or zero value {value:?}")]
    MalformedConfig { var: String, value: String },

    #[error("view configuration unavailable: {message}")]
    ConfigUnavailable { message: String },
}

/// Outcome of a width resolution.
pub type Resolution = Result<Resolved, Unresolved>;

/// Collapse a resolution to the plain optional width the annotator takes.
pub fn width_of(resolution: &Resolution) -> Option<Width> {
    resolution.as_ref().ok().map(|r| r.width)
}
