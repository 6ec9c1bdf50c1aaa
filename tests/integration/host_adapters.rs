//! Integration tests for the host adapters sharing one engine instance

use sizehint::adapters::{
    AdapterDeps, BlockImage, BlockImageRewriter, CatalogUrlBuilder, MediaDirectiveFilter,
};
use sizehint::cache::DedupCache;
use sizehint::error::ResolveError;
use sizehint::resolver::WidthResolver;
use sizehint::types::{ConfigVars, Width};
use sizehint::view_config::{ViewConfig, ViewConfigSource};
use std::sync::Arc;
use std::thread;

fn deps_with(view: ViewConfig) -> AdapterDeps {
    AdapterDeps::new(
        Arc::new(WidthResolver::default()),
        Arc::new(view),
        Arc::new(DedupCache::new()),
    )
}

fn storefront_view() -> ViewConfig {
    ViewConfig::default()
        .with_catalog_var("product_list_image_size", "240")
        .with_catalog_var("product_base_image_size", "300")
        .with_media_width("category_page_grid", 280)
}

/// A host whose theme configuration cannot be read.
struct BrokenSource;

impl ViewConfigSource for BrokenSource {
    fn vars(&self, _namespace: &str) -> Result<ConfigVars, ResolveError> {
        Err(ResolveError::ConfigUnavailable("theme not loaded".to_string()))
    }

    fn media_image_width(&self, _image_id: &str) -> Result<Option<Width>, ResolveError> {
        Err(ResolveError::ConfigUnavailable("theme not loaded".to_string()))
    }
}

#[test]
fn test_catalog_url_builder_annotates_host_urls() {
    let builder = CatalogUrlBuilder::new(
        |path: &str, _area: &str| format!("https://shop.example/media/catalog/product/cache/1{}", path),
        deps_with(storefront_view()),
    );

    assert_eq!(
        builder.get_url("/a/b/ab.jpg", "category_page_grid"),
        "https://shop.example/media/catalog/product/cache/1/a/b/ab.jpg?w=240"
    );
    // forced minimum for the main product image
    assert_eq!(
        builder.get_url("/a/b/ab.jpg", "product_base_image"),
        "https://shop.example/media/catalog/product/cache/1/a/b/ab.jpg?w=700"
    );
    // unknown area: host URL unchanged
    assert_eq!(
        builder.get_url("/a/b/ab.jpg", "footer_logo"),
        "https://shop.example/media/catalog/product/cache/1/a/b/ab.jpg"
    );
}

#[test]
fn test_catalog_url_builder_survives_config_failure() {
    let deps = AdapterDeps::new(
        Arc::new(WidthResolver::default()),
        Arc::new(BrokenSource),
        Arc::new(DedupCache::new()),
    );
    let builder = CatalogUrlBuilder::new(|path: &str, _area: &str| path.to_string(), deps);

    assert_eq!(builder.get_url("/x.jpg", "category_page_grid"), "/x.jpg");
    // exact overrides never touch the source
    assert_eq!(builder.get_url("/x.jpg", "product_gallery"), "/x.jpg?w=700");
}

#[test]
fn test_block_rewriter_uses_role_width() {
    let rewriter = BlockImageRewriter::new(deps_with(storefront_view()));
    let html = r#"<img src="https://shop.example/media/catalog/product/p.jpg"><img src="/static/x.png">"#;

    let by_media = rewriter.after_to_html(&BlockImage::new("category_page_grid", None), html);
    assert!(by_media.contains("p.jpg?w=280"));
    assert!(by_media.contains(r#"src="/static/x.png""#));

    let explicit = rewriter.after_to_html(&BlockImage::new("category_page_grid", Some(160)), html);
    assert!(explicit.contains("p.jpg?w=160"));

    let unknown = rewriter.after_to_html(&BlockImage::default(), html);
    assert_eq!(unknown, html);
}

#[test]
fn test_media_filter_first_annotation_wins() {
    let filter = MediaDirectiveFilter::new(deps_with(ViewConfig::default()));
    let rendered = "https://shop.example/media/wysiwyg/home/home-main-spring.jpg";

    let first = filter.after_media_directive(rendered, "wysiwyg/home/home-main-spring.jpg");
    assert_eq!(first, format!("{}?w=1440", rendered));

    // a different directive would resolve differently, but the cache answers
    let second = filter.after_media_directive(rendered, "wysiwyg/blog/thumb.jpg");
    assert_eq!(second, first);

    let stats = filter.cache_stats();
    assert_eq!(stats.entries, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);

    filter.clear_cache();
    assert_eq!(filter.cache_stats().entries, 0);
}

#[test]
fn test_media_filter_skips_non_images() {
    let filter = MediaDirectiveFilter::new(deps_with(ViewConfig::default()));
    let pdf = "https://shop.example/media/downloads/manual.pdf";
    assert_eq!(filter.after_media_directive(pdf, "downloads/manual.pdf"), pdf);
    assert_eq!(filter.cache_stats().entries, 0);
}

#[test]
fn test_media_filter_directive_fallback() {
    let filter = MediaDirectiveFilter::new(deps_with(ViewConfig::default()));
    // empty directive: the rendered URL decides
    let rendered = "https://shop.example/media/wysiwyg/category/shoes.png";
    assert_eq!(
        filter.after_media_directive(rendered, ""),
        format!("{}?w=600", rendered)
    );

    // the CDN host name never selects a rule
    let cdn = "https://hero-cdn.example/media/wysiwyg/icons/cart.png";
    assert_eq!(filter.after_media_directive(cdn, ""), format!("{}?w=960", cdn));
}

#[test]
fn test_adapters_share_engine_across_threads() {
    let deps = deps_with(storefront_view());
    let filter = Arc::new(MediaDirectiveFilter::new(deps.clone()));
    let urls: Vec<String> = (0..16)
        .map(|i| format!("https://shop.example/media/wysiwyg/product/p{}.jpg", i % 4))
        .collect();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let filter = Arc::clone(&filter);
            let urls = urls.clone();
            thread::spawn(move || {
                urls.iter()
                    .map(|url| filter.after_media_directive(url, ""))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        let results = handle.join().unwrap();
        for (url, out) in urls.iter().zip(results) {
            assert_eq!(out, format!("{}?w=480", url));
        }
    }
    assert_eq!(deps.cache.len(), 4);
}
