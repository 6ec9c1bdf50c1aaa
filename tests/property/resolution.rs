//! Property-based tests for determinism of width resolution

use proptest::prelude::*;
use sizehint::resolver::{is_image_url, WidthResolver};
use sizehint::types::{ConfigVars, Unresolved, UsageContext};
use sizehint::view_config::ViewConfig;

/// Same inputs always resolve to the same outcome, and widths are never zero.
#[test]
fn test_area_resolution_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let resolver = WidthResolver::default();

    runner
        .run(
            &("[a-z_]{1,32}", proptest::option::of(1u32..5000)),
            |(area_id, configured)| {
                let mut view = ViewConfig::default();
                if let Some(width) = configured {
                    view = view.with_catalog_var("product_list_image_size", &width.to_string());
                }
                let first = resolver.resolve(&UsageContext::area(area_id.as_str()), &view);
                let second = resolver.resolve(&UsageContext::area(area_id.as_str()), &view);
                assert_eq!(first, second);
                if let Ok(resolved) = first {
                    assert!(resolved.width > 0);
                }
                Ok(())
            },
        )
        .unwrap();
}

proptest! {
    /// Once the extension check passes, path resolution always yields a width.
    #[test]
    fn path_resolution_is_total_for_images(
        path in "[a-zA-Z0-9/_-]{0,40}",
        ext in "(jpg|JPEG|png|gif|webp|svg|bmp)",
    ) {
        let url = format!("https://cdn.example/media/{}.{}", path, ext);
        prop_assert!(is_image_url(&url));
        let resolved = WidthResolver::default().resolve_path(&url);
        prop_assert!(resolved.is_ok());
        prop_assert!(resolved.unwrap().width > 0);
    }

    /// Non-image extensions never resolve.
    #[test]
    fn path_resolution_rejects_non_images(
        path in "[a-z0-9/_-]{0,40}",
        ext in "(txt|pdf|html|css|js|mp4)",
    ) {
        let url = format!("https://cdn.example/media/{}.{}", path, ext);
        prop_assert_eq!(WidthResolver::default().resolve_path(&url), Err(Unresolved::NotAnImage));
    }

    /// Exact overrides win whatever the configuration holds.
    #[test]
    fn overrides_ignore_config(value in "[0-9]{1,4}|[a-z]{1,6}") {
        let resolver = WidthResolver::default();
        let vars: ConfigVars = [("product_gallery_size".to_string(), value)]
            .into_iter()
            .collect();
        let resolved = resolver.resolve_area("product_gallery", &vars).unwrap();
        prop_assert_eq!(resolved.width, 700);
    }

    /// The base image never resolves below the floor from configuration.
    #[test]
    fn base_image_has_floor(size in -5000i64..5000) {
        let resolver = WidthResolver::default();
        let vars: ConfigVars = [("product_base_image_size".to_string(), size.to_string())]
            .into_iter()
            .collect();
        let width = resolver.resolve_area("product_base_image", &vars).unwrap().width;
        prop_assert!(width >= 500);
        if size >= 500 {
            prop_assert_eq!(i64::from(width), size);
        } else {
            prop_assert_eq!(width, 700);
        }
    }
}
