//! Property-based tests for annotation idempotence and cache keys

use proptest::prelude::*;
use sizehint::annotate::{annotate, annotate_html_img_srcs, strip_width_params};
use sizehint::cache::{normalize_key, DedupCache};

fn url_strategy() -> impl Strategy<Value = String> {
    (
        "[a-z]{1,8}",
        "[a-z0-9/_-]{0,24}",
        "(jpg|png|webp|gif)",
        proptest::option::of("[a-v]{1,4}=[0-9]{1,3}"),
    )
        .prop_map(|(host, path, ext, query)| match query {
            Some(q) => format!("https://{}.example/{}.{}?{}", host, path, ext, q),
            None => format!("https://{}.example/{}.{}", host, path, ext),
        })
}

proptest! {
    /// Annotating twice never adds a second width.
    #[test]
    fn annotate_is_idempotent(url in url_strategy(), w1 in 1u32..4000, w2 in 1u32..4000) {
        let once = annotate(&url, Some(w1));
        let twice = annotate(&once, Some(w2));
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.matches("w=").count(), 1);
    }

    /// The width is appended, never inserted: the source URL is a prefix.
    #[test]
    fn annotate_preserves_source(url in url_strategy(), width in 1u32..4000) {
        let out = annotate(&url, Some(width));
        prop_assert!(out.starts_with(&url));
        let suffix = format!("w={}", width);
        prop_assert!(out.ends_with(&suffix));
    }

    /// An annotated URL and its source share a cache key.
    #[test]
    fn normalized_key_ignores_width(url in url_strategy(), width in 1u32..4000) {
        let annotated = annotate(&url, Some(width));
        prop_assert_eq!(normalize_key(&annotated), normalize_key(&url));
        prop_assert_eq!(strip_width_params(&annotated), url);
    }

    /// The first stored value wins for every later lookup of the same key.
    #[test]
    fn cache_returns_first_result(url in url_strategy(), w1 in 1u32..4000, w2 in 1u32..4000) {
        let cache = DedupCache::new();
        let first = cache.get_or_compute(&url, || annotate(&url, Some(w1)));
        let second = cache.get_or_compute(&url, || annotate(&url, Some(w2)));
        prop_assert_eq!(first, second);
        prop_assert_eq!(cache.len(), 1);
    }

    /// Each catalog src gets exactly one width parameter.
    #[test]
    fn html_srcs_get_one_width(names in proptest::collection::vec("[a-z0-9]{1,10}", 1..8), width in 1u32..4000) {
        let html: String = names
            .iter()
            .map(|n| format!(r#"<img src="/media/catalog/product/{}.jpg">"#, n))
            .collect();
        let out = annotate_html_img_srcs(&html, width);
        prop_assert_eq!(out.matches("w=").count(), names.len());
        prop_assert_eq!(annotate_html_img_srcs(&out, width), out);
    }
}
