//! Product image block post-render rewriting.

use super::{log_unresolved, AdapterDeps};
use crate::annotate::annotate_html_img_srcs;
use crate::types::{UsageContext, Width};
use serde::{Deserialize, Serialize};

/// What the host knows about a rendered image block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockImage {
    /// Width set on the block itself.
    pub width: Option<Width>,
    /// Image type (role) of the block, e.g. `category_page_grid`.
    pub image_type: Option<String>,
}

impl BlockImage {
    pub fn new(image_type: &str, width: Option<Width>) -> Self {
        Self {
            width,
            image_type: Some(image_type.to_string()),
        }
    }
}

pub struct BlockImageRewriter {
    deps: AdapterDeps,
}

impl BlockImageRewriter {
    pub fn new(deps: AdapterDeps) -> Self {
        Self { deps }
    }

    /// Stamp the block's width onto every catalog product `src` in `html`.
    pub fn after_to_html(&self, block: &BlockImage, html: &str) -> String {
        let role = block.image_type.as_deref().unwrap_or_default();
        let context = UsageContext::role(role, block.width);
        match self
            .deps
            .resolver
            .resolve(&context, self.deps.source.as_ref())
        {
            Ok(resolved) => annotate_html_img_srcs(html, resolved.width),
            Err(reason) => {
                log_unresolved("block_image", role, &reason);
                html.to_string()
            }
        }
    }
}
