//! Catalog image URL construction.

use super::{log_unresolved, AdapterDeps};
use crate::annotate::annotate;
use crate::types::{width_of, UsageContext};

/// The host's own URL builder (cache path or placeholder URL).
pub trait BaseUrlBuilder: Send + Sync {
    fn url(&self, base_file_path: &str, display_area: &str) -> String;
}

impl<F> BaseUrlBuilder for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn url(&self, base_file_path: &str, display_area: &str) -> String {
        self(base_file_path, display_area)
    }
}

/// Decorates a [`BaseUrlBuilder`], appending the display area's width.
pub struct CatalogUrlBuilder<B> {
    inner: B,
    deps: AdapterDeps,
}

impl<B: BaseUrlBuilder> CatalogUrlBuilder<B> {
    pub fn new(inner: B, deps: AdapterDeps) -> Self {
        Self { inner, deps }
    }

    /// URL for `base_file_path` shown in `display_area`.
    pub fn get_url(&self, base_file_path: &str, display_area: &str) -> String {
        let url = self.inner.url(base_file_path, display_area);
        self.annotate_url(&url, display_area)
    }

    /// Annotate a URL the host already built for `display_area`.
    pub fn annotate_url(&self, url: &str, display_area: &str) -> String {
        let resolution = self
            .deps
            .resolver
            .resolve(&UsageContext::area(display_area), self.deps.source.as_ref());
        if let Err(reason) = &resolution {
            log_unresolved("catalog_url", display_area, reason);
        }
        annotate(url, width_of(&resolution))
    }
}
