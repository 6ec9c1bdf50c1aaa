//! Width Resolver
//!
//! Maps a [`UsageContext`] to a [`Resolution`]. Every strategy is a pure
//! function of the context, the rule tables and the configuration snapshot
//! passed in; nothing is cached here.
//!
//! Area identifiers go through, in order:
//! 1. the exact override table,
//! 2. the area -> config variable mapping,
//! 3. derived `<area>_size` config keys,
//! 4. the area pattern table.
//!
//! Media paths are matched against the path pattern table once the URL is
//! known to point at an image. Block roles use an explicit block width or the
//! media image entry of the view configuration.

use crate::error::TableError;
use crate::rules::{Matcher, RuleTables, Subject};
use crate::types::{ConfigVars, Resolution, Resolved, UsageContext, Unresolved, Width, WidthSource};
use crate::view_config::ViewConfigSource;
use tracing::{debug, trace};

/// Extensions treated as images by path-based resolution.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg", "bmp"];

/// Main product image area; its configured width has a floor.
pub const BASE_IMAGE_AREA: &str = "product_base_image";
/// Configured base image widths below this are replaced.
pub const BASE_IMAGE_MIN_WIDTH: Width = 500;
/// Width used when the configured base image width is below the floor.
pub const BASE_IMAGE_FLOOR_WIDTH: Width = 700;

/// Resolves usage contexts against a validated set of rule tables.
#[derive(Debug, Clone)]
pub struct WidthResolver {
    tables: RuleTables,
}

impl WidthResolver {
    /// Build a resolver, rejecting tables that fail validation.
    pub fn new(tables: RuleTables) -> Result<Self, TableError> {
        tables.validate()?;
        Ok(Self { tables })
    }

    pub fn tables(&self) -> &RuleTables {
        &self.tables
    }

    /// Resolve any usage context, reading configuration from `source`.
    pub fn resolve(&self, context: &UsageContext, source: &dyn ViewConfigSource) -> Resolution {
        let resolution = match context {
            UsageContext::Area { area_id } => {
                if self.tables.area_overrides.contains_key(area_id) {
                    self.resolve_area(area_id, &ConfigVars::new())
                } else {
                    match source.vars(source.catalog_namespace()) {
                        Ok(vars) => self.resolve_area(area_id, &vars),
                        Err(e) => Err(Unresolved::ConfigUnavailable {
                            message: e.to_string(),
                        }),
                    }
                }
            }
            UsageContext::Role {
                role_id,
                configured_width,
            } => self.resolve_role(role_id, *configured_width, source),
            UsageContext::Path { raw_url } => self.resolve_path(raw_url),
        };

        if let Err(reason) = &resolution {
            debug!(
                identifier = context.identifier(),
                reason = %reason,
                "No width resolved"
            );
        }
        resolution
    }

    /// Resolve a catalog display area against catalog config variables.
    pub fn resolve_area(&self, area_id: &str, vars: &ConfigVars) -> Resolution {
        if let Some(width) = self.tables.area_overrides.get(area_id) {
            return Ok(Resolved::new(*width, WidthSource::ExactOverride));
        }

        if let Some(var) = self.tables.config_mapping.get(area_id) {
            if let Some(value) = vars.get(var) {
                let width = if area_id == BASE_IMAGE_AREA {
                    parse_base_image_width(var, value)?
                } else {
                    parse_width(var, value)?
                };
                return Ok(Resolved::new(
                    width,
                    WidthSource::ConfigMapping { var: var.clone() },
                ));
            }
        }

        for key in derived_keys(area_id) {
            if let Some(value) = vars.get(&key) {
                let width = parse_width(&key, value)?;
                return Ok(Resolved::new(width, WidthSource::DerivedKey { var: key }));
            }
        }

        let lowered = area_id.to_lowercase();
        match self
            .tables
            .area_patterns
            .first_match(&Subject::identifier(&lowered))
        {
            Some(rule) => {
                trace!(area_id, rule = %rule.name, "Area resolved by pattern default");
                Ok(Resolved::new(
                    rule.width,
                    WidthSource::Pattern {
                        rule: rule.name.clone(),
                    },
                ))
            }
            None => Err(Unresolved::NoMatch),
        }
    }

    /// Resolve a block image role.
    pub fn resolve_role(
        &self,
        role_id: &str,
        configured_width: Option<Width>,
        source: &dyn ViewConfigSource,
    ) -> Resolution {
        if let Some(width) = configured_width.filter(|w| *w > 0) {
            return Ok(Resolved::new(width, WidthSource::Explicit));
        }
        if role_id.is_empty() {
            return Err(Unresolved::NoMatch);
        }
        match source.media_image_width(role_id) {
            Ok(Some(width)) if width > 0 => Ok(Resolved::new(width, WidthSource::MediaImageData)),
            Ok(_) => Err(Unresolved::NoMatch),
            Err(e) => Err(Unresolved::ConfigUnavailable {
                message: e.to_string(),
            }),
        }
    }

    /// Resolve a WYSIWYG media URL by its path. Scheme and host never take
    /// part in matching. With the built-in table every image URL gets a width.
    pub fn resolve_path(&self, raw_url: &str) -> Resolution {
        if !is_image_url(raw_url) {
            return Err(Unresolved::NotAnImage);
        }
        let full = url_path(raw_url).to_lowercase();
        let file = file_name(raw_url).to_lowercase();
        let subject = Subject {
            full: &full,
            file: &file,
        };
        match self.tables.path_patterns.first_match(&subject) {
            Some(rule) if rule.matcher == Matcher::Always => {
                Ok(Resolved::new(rule.width, WidthSource::PathDefault))
            }
            Some(rule) => Ok(Resolved::new(
                rule.width,
                WidthSource::PathRule {
                    rule: rule.name.clone(),
                },
            )),
            None => Err(Unresolved::NoMatch),
        }
    }
}

impl Default for WidthResolver {
    fn default() -> Self {
        Self {
            tables: RuleTables::builtin(),
        }
    }
}

/// Candidate config keys derived from an area identifier, in lookup order.
pub fn derived_keys(area_id: &str) -> Vec<String> {
    let direct = format!("{}_size", area_id);
    let collapsed = format!(
        "{}_size",
        area_id.replace("_page_", "_").replace("_category_", "_")
    );
    if collapsed == direct {
        vec![direct]
    } else {
        vec![direct, collapsed]
    }
}

fn parse_width(var: &str, value: &str) -> Result<Width, Unresolved> {
    match value.trim().parse::<Width>() {
        Ok(width) if width > 0 => Ok(width),
        _ => Err(Unresolved::MalformedConfig {
            var: var.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Base image sizes are signed: zero and negative values take the floor too.
fn parse_base_image_width(var: &str, value: &str) -> Result<Width, Unresolved> {
    let malformed = || Unresolved::MalformedConfig {
        var: var.to_string(),
        value: value.to_string(),
    };
    let size = value.trim().parse::<i64>().map_err(|_| malformed())?;
    if size < i64::from(BASE_IMAGE_MIN_WIDTH) {
        return Ok(BASE_IMAGE_FLOOR_WIDTH);
    }
    Width::try_from(size).map_err(|_| malformed())
}

/// Path component of a URL: no scheme, authority, query or fragment.
pub fn url_path(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let without_query = &url[..end];
    match without_query.find("://") {
        Some(idx) => {
            let rest = &without_query[idx + 3..];
            match rest.find('/') {
                Some(slash) => &rest[slash..],
                None => "",
            }
        }
        None => without_query,
    }
}

/// Last segment of the URL path.
pub fn file_name(url: &str) -> &str {
    let path = url_path(url);
    path.rsplit('/').next().unwrap_or(path)
}

/// True when the URL path ends in one of [`IMAGE_EXTENSIONS`], any case.
pub fn is_image_url(url: &str) -> bool {
    let name = file_name(url);
    match name.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}
