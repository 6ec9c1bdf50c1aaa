//! WYSIWYG media directive filtering.

use super::{log_unresolved, AdapterDeps};
use crate::annotate::{try_annotate, WIDTH_TOKEN};
use crate::cache::CacheStats;
use crate::resolver::is_image_url;
use crate::types::{Resolution, Unresolved};

/// Annotates URLs produced by the content filter's media directive.
///
/// Results are memoized in the injected [`crate::cache::DedupCache`], so the
/// same image referenced several times in one page is resolved once.
pub struct MediaDirectiveFilter {
    deps: AdapterDeps,
}

impl MediaDirectiveFilter {
    pub fn new(deps: AdapterDeps) -> Self {
        Self { deps }
    }

    /// `rendered_url` is the URL the directive produced; `directive_url` is
    /// the `url` argument written in the content (may be empty).
    pub fn after_media_directive(&self, rendered_url: &str, directive_url: &str) -> String {
        if !is_image_url(rendered_url) {
            return rendered_url.to_string();
        }

        self.deps.cache.get_or_compute(rendered_url, || {
            if rendered_url.contains(WIDTH_TOKEN) {
                return rendered_url.to_string();
            }
            let annotated = self
                .resolve(rendered_url, directive_url)
                .and_then(|resolved| try_annotate(rendered_url, resolved.width));
            match annotated {
                Ok(url) => url,
                Err(reason) => {
                    log_unresolved("media_directive", rendered_url, &reason);
                    rendered_url.to_string()
                }
            }
        })
    }

    fn resolve(&self, rendered_url: &str, directive_url: &str) -> Resolution {
        let resolver = &self.deps.resolver;
        if directive_url.is_empty() {
            return resolver.resolve_path(rendered_url);
        }
        match resolver.resolve_path(directive_url) {
            Err(Unresolved::NotAnImage) => resolver.resolve_path(rendered_url),
            other => other,
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.deps.cache.stats()
    }

    /// Forget every memoized URL.
    pub fn clear_cache(&self) {
        self.deps.cache.clear();
    }
}
