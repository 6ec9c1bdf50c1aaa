//! Integration tests for URL and HTML annotation

use sizehint::annotate::{annotate, annotate_html_img_srcs, count_catalog_srcs, try_annotate};
use sizehint::types::Unresolved;

const PRODUCT_LIST: &str = r#"<ol class="products">
  <li><img class="photo" src="https://shop.example/media/catalog/product/cache/1/a/b/ab-1.jpg" alt="One"></li>
  <li><img src="https://shop.example/media/catalog/product/cache/1/c/d/cd-2.jpg?v=3" alt="Two"></li>
  <li><img src="https://shop.example/media/catalog/product/cache/1/e/f/ef-3.jpg?w=120" alt="Three"></li>
  <li><img src="https://shop.example/static/frontend/theme/images/placeholder.jpg" alt=""></li>
</ol>"#;

#[test]
fn test_annotate_examples() {
    assert_eq!(annotate("https://x/img.jpg", Some(700)), "https://x/img.jpg?w=700");
    assert_eq!(
        annotate("https://x/img.jpg?foo=1", Some(700)),
        "https://x/img.jpg?foo=1&w=700"
    );
    assert_eq!(annotate("https://x/img.jpg?w=500", Some(700)), "https://x/img.jpg?w=500");
    assert_eq!(annotate("https://x/img.jpg", None), "https://x/img.jpg");
}

#[test]
fn test_try_annotate_reasons() {
    assert_eq!(
        try_annotate("https://x/img.jpg?w=500", 700),
        Err(Unresolved::AlreadyAnnotated)
    );
    assert_eq!(try_annotate("", 700), Err(Unresolved::MalformedUrl));
    assert_eq!(
        try_annotate("https://x/a\u{7}b.jpg", 700),
        Err(Unresolved::MalformedUrl)
    );
    assert_eq!(
        try_annotate("https://x/my photo.jpg", 700).unwrap(),
        "https://x/my photo.jpg?w=700"
    );
    assert_eq!(
        try_annotate("https://x/img.jpg#zoom", 640).unwrap(),
        "https://x/img.jpg?w=640#zoom"
    );
}

#[test]
fn test_html_rewrites_only_catalog_srcs() {
    assert_eq!(count_catalog_srcs(PRODUCT_LIST), 3);

    let out = annotate_html_img_srcs(PRODUCT_LIST, 240);
    assert!(out.contains(r#"src="https://shop.example/media/catalog/product/cache/1/a/b/ab-1.jpg?w=240""#));
    assert!(out.contains(r#"src="https://shop.example/media/catalog/product/cache/1/c/d/cd-2.jpg?v=3&w=240""#));
    // already annotated src keeps its own width
    assert!(out.contains(r#"ef-3.jpg?w=120""#));
    assert!(!out.contains("ef-3.jpg?w=120&w=240"));
    // outside the catalog product path
    assert!(out.contains(r#"src="https://shop.example/static/frontend/theme/images/placeholder.jpg""#));

    assert_eq!(out.matches("w=").count(), 3);
}

#[test]
fn test_html_rewrite_keeps_unencoded_spaces() {
    let html = r#"<li><img src="/media/catalog/product/a b.jpg" alt="a b"></li>"#;
    let out = annotate_html_img_srcs(html, 300);
    assert_eq!(
        out,
        r#"<li><img src="/media/catalog/product/a b.jpg?w=300" alt="a b"></li>"#
    );
}

#[test]
fn test_html_rewrite_is_idempotent() {
    let once = annotate_html_img_srcs(PRODUCT_LIST, 240);
    let twice = annotate_html_img_srcs(&once, 480);
    assert_eq!(once, twice);
}

#[test]
fn test_malformed_html_passes_through() {
    let broken = r#"<div><img src="https://shop.example/media/catalog/product/x.jpg <p>"#;
    assert_eq!(annotate_html_img_srcs(broken, 300), broken);
}
