//! Host adapters
//!
//! The three integration points a storefront host calls into:
//! - [`CatalogUrlBuilder`]: wraps the host's catalog image URL builder,
//! - [`BlockImageRewriter`]: post-processes rendered product image blocks,
//! - [`MediaDirectiveFilter`]: post-processes WYSIWYG media directive URLs.
//!
//! Adapters never fail: an unresolved width leaves the URL or HTML as the
//! host produced it, and the reason is logged.

mod block_image;
mod catalog_url;
mod media_directive;

pub use block_image::{BlockImage, BlockImageRewriter};
pub use catalog_url::{BaseUrlBuilder, CatalogUrlBuilder};
pub use media_directive::MediaDirectiveFilter;

use crate::cache::DedupCache;
use crate::config::SizehintConfig;
use crate::error::SizehintError;
use crate::resolver::WidthResolver;
use crate::types::Unresolved;
use crate::view_config::ViewConfigSource;
use std::sync::Arc;
use tracing::{debug, warn};

/// Shared collaborators injected into every adapter.
#[derive(Clone)]
pub struct AdapterDeps {
    pub resolver: Arc<WidthResolver>,
    pub source: Arc<dyn ViewConfigSource>,
    pub cache: Arc<DedupCache>,
}

impl AdapterDeps {
    pub fn new(
        resolver: Arc<WidthResolver>,
        source: Arc<dyn ViewConfigSource>,
        cache: Arc<DedupCache>,
    ) -> Self {
        Self {
            resolver,
            source,
            cache,
        }
    }

    /// Wire resolver, view configuration and cache from loaded configuration.
    pub fn from_config(config: &SizehintConfig) -> Result<Self, SizehintError> {
        let resolver = WidthResolver::new(config.rule_tables())?;
        Ok(Self::new(
            Arc::new(resolver),
            Arc::new(config.view.clone()),
            Arc::new(DedupCache::from_config(&config.cache)),
        ))
    }
}

/// Log an unresolved width. Configuration problems are warnings; a plain
/// miss is expected for many images.
pub(crate) fn log_unresolved(adapter: &'static str, identifier: &str, reason: &Unresolved) {
    match reason {
        Unresolved::ConfigUnavailable { .. } | Unresolved::MalformedConfig { .. } => {
            warn!(adapter, identifier, reason = %reason, "Width resolution failed");
        }
        _ => {
            debug!(adapter, identifier, reason = %reason, "Image left unannotated");
        }
    }
}
