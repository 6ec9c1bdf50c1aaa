//! URL annotation
//!
//! Appends `w=<width>` to image URLs and rewrites catalog product `src`
//! attributes in rendered HTML. Annotation is idempotent: a URL that already
//! contains a raw `w=` token is never touched again. Nothing here parses HTML;
//! only `src="..."` attribute values are pattern-matched.

use crate::types::{Unresolved, Width};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Raw token that marks a URL as already annotated.
pub const WIDTH_TOKEN: &str = "w=";

/// Catalog product media path inside `src` attribute values.
pub const CATALOG_PRODUCT_PATH: &str = "/media/catalog/product/";

static CATALOG_SRC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(src=")([^"]*/media/catalog/product/[^"]+)""#)
        .expect("catalog src pattern is valid")
});

static WIDTH_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[?&]w=\d+").expect("width param pattern is valid"));

/// Append `w=<width>` to `url`, or return it unchanged when there is no
/// width, the URL already carries `w=`, or the URL cannot be inspected.
pub fn annotate(url: &str, width: Option<Width>) -> String {
    match width {
        Some(width) => try_annotate(url, width).unwrap_or_else(|_| url.to_string()),
        None => url.to_string(),
    }
}

/// Like [`annotate`] but reports why the URL was left alone.
pub fn try_annotate(url: &str, width: Width) -> Result<String, Unresolved> {
    if width == 0 {
        return Err(Unresolved::NoMatch);
    }
    if !is_inspectable(url) {
        return Err(Unresolved::MalformedUrl);
    }
    if url.contains(WIDTH_TOKEN) {
        return Err(Unresolved::AlreadyAnnotated);
    }

    let (base, fragment) = match url.find('#') {
        Some(idx) => url.split_at(idx),
        None => (url, ""),
    };
    Ok(format!(
        "{}{}{}{}{}",
        base,
        query_glue(base),
        WIDTH_TOKEN,
        width,
        fragment
    ))
}

/// Separator to put before a new query parameter.
fn query_glue(base: &str) -> &'static str {
    match base.find('?') {
        None => "?",
        Some(idx) => {
            let query = &base[idx + 1..];
            if query.is_empty() || query.ends_with('&') {
                ""
            } else {
                "&"
            }
        }
    }
}

/// Empty URLs and URLs with control characters are left alone. Spaces and
/// other unencoded characters do not hide the query string, so they are fine.
fn is_inspectable(url: &str) -> bool {
    !url.is_empty() && !url.chars().any(char::is_control)
}

/// Rewrite every catalog product `src` attribute in `html`.
pub fn annotate_html_img_srcs(html: &str, width: Width) -> String {
    if width == 0 {
        return html.to_string();
    }
    CATALOG_SRC
        .replace_all(html, |caps: &Captures<'_>| {
            format!("{}{}\"", &caps[1], annotate(&caps[2], Some(width)))
        })
        .into_owned()
}

/// Number of catalog product `src` attributes in `html`.
pub fn count_catalog_srcs(html: &str) -> usize {
    CATALOG_SRC.find_iter(html).count()
}

/// `url` with every `?w=<digits>`/`&w=<digits>` removed and trailing `?`/`&`
/// trimmed.
pub fn strip_width_params(url: &str) -> String {
    let stripped = WIDTH_PARAM.replace_all(url, "");
    stripped.trim_end_matches(['?', '&']).to_string()
}
