//! Width rule tables
//!
//! All width heuristics live here as data: ordered `(predicate, width)` tables
//! for pattern defaults, plus the two exact lookup tables used for catalog
//! display areas. Tables carry a version string so a change in precedence is
//! visible in diagnostics and in `sizehint check-tables` output.
//!
//! Area identifiers and media paths use separate pattern tables: their
//! literal widths differ for similarly named concepts, and banner/hero
//! detection only exists for media paths.

use crate::error::TableError;
use crate::types::Width;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Path marker for the homepage hero slot.
pub const HOME_HERO_MARKER: &str = "wysiwyg/home/home-main";
/// Path markers for homepage sections.
pub const HOMEPAGE_MARKERS: &[&str] = &["wysiwyg/homepage", "wysiwyg/home"];
/// Path marker for category page content.
pub const CATEGORY_MARKER: &str = "wysiwyg/category";
/// Path marker for product page content.
pub const PRODUCT_MARKER: &str = "wysiwyg/product";

/// Subject a rule is evaluated against. Both fields are lowercased.
#[derive(Debug, Clone, Copy)]
pub struct Subject<'a> {
    /// Full identifier or path.
    pub full: &'a str,
    /// Last path segment (equal to `full` for area identifiers).
    pub file: &'a str,
}

impl<'a> Subject<'a> {
    /// Subject for an identifier with no path structure.
    pub fn identifier(id: &'a str) -> Self {
        Self { full: id, file: id }
    }
}

/// Predicate over a [`Subject`]. Substring tests are case-sensitive; callers
/// lowercase the subject first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Matcher {
    /// Matches everything; used for a table's trailing default.
    Always,
    /// Needle occurs anywhere in the full subject.
    Contains(String),
    /// Needle occurs in the filename only.
    FileContains(String),
    AllOf(Vec<Matcher>),
    AnyOf(Vec<Matcher>),
}

impl Matcher {
    pub fn contains(needle: &str) -> Self {
        Matcher::Contains(needle.to_string())
    }

    pub fn file_contains(needle: &str) -> Self {
        Matcher::FileContains(needle.to_string())
    }

    /// `AnyOf` over plain `Contains` needles.
    pub fn any(needles: &[&str]) -> Self {
        Matcher::AnyOf(needles.iter().map(|n| Matcher::contains(n)).collect())
    }

    /// `AllOf` over plain `Contains` needles.
    pub fn all(needles: &[&str]) -> Self {
        Matcher::AllOf(needles.iter().map(|n| Matcher::contains(n)).collect())
    }

    pub fn matches(&self, subject: &Subject<'_>) -> bool {
        match self {
            Matcher::Always => true,
            Matcher::Contains(needle) => subject.full.contains(needle.as_str()),
            Matcher::FileContains(needle) => subject.file.contains(needle.as_str()),
            Matcher::AllOf(inner) => inner.iter().all(|m| m.matches(subject)),
            Matcher::AnyOf(inner) => inner.iter().any(|m| m.matches(subject)),
        }
    }
}

/// One row of a pattern table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidthRule {
    pub name: String,
    pub matcher: Matcher,
    pub width: Width,
}

impl WidthRule {
    pub fn new(name: &str, matcher: Matcher, width: Width) -> Self {
        Self {
            name: name.to_string(),
            matcher,
            width,
        }
    }
}

/// Ordered pattern table; the first matching rule wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    pub name: String,
    pub version: String,
    pub rules: Vec<WidthRule>,
}

impl RuleTable {
    /// Defaults for catalog display-area identifiers.
    pub fn area_defaults() -> Self {
        Self {
            name: "area".to_string(),
            version: "area-2".to_string(),
            rules: vec![
                WidthRule::new("page_image_large", Matcher::all(&["page_image", "large"]), 700),
                WidthRule::new("page_image_medium", Matcher::all(&["page_image", "medium"]), 700),
                WidthRule::new("page_image_small", Matcher::all(&["page_image", "small"]), 275),
                WidthRule::new(
                    "main_product_image",
                    Matcher::any(&["base_image", "main_image", "product_image"]),
                    700,
                ),
                WidthRule::new("category", Matcher::contains("category"), 240),
                WidthRule::new("thumbnail", Matcher::any(&["thumbnail", "swatch"]), 88),
                WidthRule::new("related", Matcher::any(&["related", "upsell"]), 200),
                WidthRule::new("gallery", Matcher::any(&["gallery", "media"]), 700),
            ],
        }
    }

    /// Defaults for WYSIWYG media paths. Ends with an unconditional rule.
    pub fn media_path_defaults() -> Self {
        let hero = Matcher::any(&["banner", "hero", HOME_HERO_MARKER]);
        Self {
            name: "media_path".to_string(),
            version: "path-2".to_string(),
            rules: vec![
                WidthRule::new("banner", hero, 1440),
                WidthRule::new(
                    "thumbnail",
                    Matcher::AnyOf(vec![
                        Matcher::contains("thumb"),
                        Matcher::file_contains("small"),
                    ]),
                    360,
                ),
                WidthRule::new("medium", Matcher::contains("medium"), 600),
                WidthRule::new("large", Matcher::contains("large"), 1080),
                WidthRule::new("homepage", Matcher::any(HOMEPAGE_MARKERS), 960),
                WidthRule::new("category", Matcher::contains(CATEGORY_MARKER), 600),
                WidthRule::new("product", Matcher::contains(PRODUCT_MARKER), 480),
                WidthRule::new("default", Matcher::Always, 960),
            ],
        }
    }

    pub fn first_match(&self, subject: &Subject<'_>) -> Option<&WidthRule> {
        self.rules.iter().find(|rule| rule.matcher.matches(subject))
    }

    /// True when the table ends in a rule that always matches.
    pub fn is_total(&self) -> bool {
        self.rules
            .last()
            .map(|rule| rule.matcher == Matcher::Always)
            .unwrap_or(false)
    }

    pub fn validate(&self) -> Result<(), TableError> {
        if let Some(rule) = self.rules.iter().find(|rule| rule.width == 0) {
            return Err(TableError::ZeroWidth {
                table: self.name.clone(),
                rule: rule.name.clone(),
            });
        }
        Ok(())
    }
}

/// Additions and replacements applied on top of the built-in tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOverrides {
    /// Extra exact widths per area identifier.
    #[serde(default)]
    pub area_overrides: BTreeMap<String, Width>,

    /// Extra area identifier to config variable mappings.
    #[serde(default)]
    pub config_mapping: BTreeMap<String, String>,

    /// Replacement for the area pattern table.
    #[serde(default)]
    pub area_patterns: Option<RuleTable>,

    /// Replacement for the media path pattern table.
    #[serde(default)]
    pub path_patterns: Option<RuleTable>,
}

impl RuleOverrides {
    pub fn is_empty(&self) -> bool {
        self.area_overrides.is_empty()
            && self.config_mapping.is_empty()
            && self.area_patterns.is_none()
            && self.path_patterns.is_none()
    }
}

/// Every table the resolver consults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTables {
    /// Area identifier to literal width; config is never read for these.
    pub area_overrides: BTreeMap<String, Width>,
    /// Area identifier to the view config variable holding its width.
    pub config_mapping: BTreeMap<String, String>,
    pub area_patterns: RuleTable,
    pub path_patterns: RuleTable,
}

impl RuleTables {
    pub fn builtin() -> Self {
        let area_overrides = [
            ("product_page_image_small", 88),
            ("product_page_image_medium", 700),
            ("product_page_image_large", 700),
            ("product_page_main_image", 700),
            ("product_page_main_image_default", 700),
            ("product_image", 700),
            ("product_gallery", 700),
            ("product_gallery_main", 700),
            ("product_media_main", 700),
            ("product_media_gallery", 700),
        ]
        .into_iter()
        .map(|(id, width)| (id.to_string(), width))
        .collect();

        let config_mapping = [
            ("product_base_image", "product_base_image_size"),
            ("category_page_list", "product_list_image_size"),
            ("category_page_grid", "product_list_image_size"),
            ("category_page_grid_narrow", "product_list_image_size"),
            ("category_page_grid_wide", "product_base_image_size"),
            ("product_small_image", "product_small_image_sidebar_size"),
            ("product_thumbnail_image", "product_base_image_icon_size"),
            ("product_swatch_image", "product_base_image_icon_size"),
            ("related_products_list", "product_list_image_size"),
            ("upsell_products_list", "product_list_image_size"),
            ("crosssell_products_list", "product_list_image_size"),
        ]
        .into_iter()
        .map(|(id, var)| (id.to_string(), var.to_string()))
        .collect();

        Self {
            area_overrides,
            config_mapping,
            area_patterns: RuleTable::area_defaults(),
            path_patterns: RuleTable::media_path_defaults(),
        }
    }

    /// Built-in tables with `overrides` merged in. Conflicts are not checked
    /// here; see [`RuleTables::validate`].
    pub fn with_overrides(mut self, overrides: &RuleOverrides) -> Self {
        for (id, width) in &overrides.area_overrides {
            self.area_overrides.insert(id.clone(), *width);
        }
        for (id, var) in &overrides.config_mapping {
            self.config_mapping.insert(id.clone(), var.clone());
        }
        if let Some(table) = &overrides.area_patterns {
            self.area_patterns = table.clone();
        }
        if let Some(table) = &overrides.path_patterns {
            self.path_patterns = table.clone();
        }
        self
    }

    /// Identifiers present in both exact tables, sorted.
    pub fn conflicts(&self) -> Vec<String> {
        let overrides: BTreeSet<&String> = self.area_overrides.keys().collect();
        self.config_mapping
            .keys()
            .filter(|id| overrides.contains(id))
            .cloned()
            .collect()
    }

    pub fn validate(&self) -> Result<(), TableError> {
        let conflicts = self.conflicts();
        if !conflicts.is_empty() {
            return Err(TableError::Conflict {
                identifiers: conflicts,
            });
        }
        if let Some((id, _)) = self.area_overrides.iter().find(|(_, w)| **w == 0) {
            return Err(TableError::ZeroOverride {
                identifier: id.clone(),
            });
        }
        self.area_patterns.validate()?;
        self.path_patterns.validate()
    }
}

impl Default for RuleTables {
    fn default() -> Self {
        Self::builtin()
    }
}
