//! Site snapshot types consumed by the build.
//!
//! These mirror the records exported by the CMS: one [`Site`] with its
//! [`Template`], optional [`Footprint`], and every [`Page`] (published or not)
//! with its raw [`Block`]s. The build only reads them. Block content stays an
//! untyped JSON value here and is validated into [`crate::block::BlockContent`]
//! when a page is compiled.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Base markup, styles and script shared by every page of a site.
///
/// Each section may be absent or empty; the build substitutes built-in
/// defaults for `base_html` and `base_css`, and skips `scripts.js` when
/// `base_js` is blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    pub base_html: Option<String>,
    pub base_css: Option<String>,
    pub base_js: Option<String>,
}

/// Supplementary static fragments layered over a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Footprint {
    pub footer_html: Option<String>,
}

/// A site and everything needed to build it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Site {
    pub brand_name: String,
    /// CSS variable name (without `--`) → colour value.
    ///
    /// A `BTreeMap` so the generated `:root` block is emitted in a stable
    /// (sorted) order regardless of how the export serialized it.
    pub custom_colors: BTreeMap<String, String>,
    #[serde(alias = "template_footprint")]
    pub footprint: Option<Footprint>,
    /// Exactly one template per site; `None` is rejected by the builder.
    pub template: Option<Template>,
    pub pages: Vec<Page>,
}

/// A page of a site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    /// Unique within the site. `"home"` maps to `/` and `index.html`.
    pub slug: String,
    pub title: String,
    pub meta_title: String,
    pub meta_description: String,
    /// Navigation position.
    pub order: i64,
    pub is_published: bool,
    pub blocks: Vec<Block>,
}

/// A raw content block as stored by the CMS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub block_type: String,
    /// Render position within the page.
    #[serde(default)]
    pub order: i64,
    /// Kind-specific mapping; `null` or missing is treated as `{}`.
    #[serde(default)]
    pub content: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn site_deserializes_from_minimal_json() {
        let site: Site = serde_json::from_value(json!({ "brand_name": "Acme" })).unwrap();
        assert_eq!(site.brand_name, "Acme");
        assert!(site.custom_colors.is_empty());
        assert!(site.footprint.is_none());
        assert!(site.template.is_none());
        assert!(site.pages.is_empty());
    }

    #[test]
    fn template_footprint_alias_accepted() {
        let site: Site = serde_json::from_value(json!({
            "brand_name": "Acme",
            "template_footprint": { "footer_html": "<footer>f</footer>" }
        }))
        .unwrap();
        let footer = site.footprint.and_then(|f| f.footer_html);
        assert_eq!(footer.as_deref(), Some("<footer>f</footer>"));
    }

    #[test]
    fn page_defaults_to_unpublished() {
        let page: Page = serde_json::from_value(json!({ "slug": "about" })).unwrap();
        assert!(!page.is_published);
        assert_eq!(page.order, 0);
        assert!(page.blocks.is_empty());
    }

    #[test]
    fn block_content_defaults_to_null() {
        let block: Block = serde_json::from_value(json!({ "block_type": "text" })).unwrap();
        assert!(block.content.is_null());
        assert_eq!(block.order, 0);
    }

    #[test]
    fn custom_colors_iterate_sorted() {
        let site: Site = serde_json::from_value(json!({
            "custom_colors": { "secondary": "#00f", "primary": "#f00" }
        }))
        .unwrap();
        let keys: Vec<&str> = site.custom_colors.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["primary", "secondary"]);
    }
}
