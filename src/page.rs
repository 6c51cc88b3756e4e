//! Page compilation.
//!
//! A page is compiled by rendering its blocks in `order` (ties keep their
//! position in the page), joining the fragments with newlines, and filling
//! the template slots with the result plus the site-wide navigation, footer
//! and script tag computed once by the builder.

use crate::block::{BlockContent, BlockError};
use crate::naming::display_name;
use crate::render::BlockRenderer;
use crate::template::{Slot, SlotValues, default_base_html, substitute};
use crate::types::{Block, Page, Site, Template};
use std::borrow::Cow;
use thiserror::Error;

/// A block whose content failed validation.
#[derive(Error, Debug)]
#[error("block #{index} (`{block_type}`, order {order}): {source}")]
pub struct InvalidBlock {
    /// Position of the block in the page's block list.
    pub index: usize,
    pub block_type: String,
    pub order: i64,
    #[source]
    pub source: BlockError,
}

/// Compiled HTML for one page plus everything worth reporting about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPage {
    pub html: String,
    pub unresolved_tokens: Vec<String>,
    pub unused_slots: Vec<Slot>,
    pub unknown_blocks: Vec<String>,
}

/// The footprint footer, or an empty string.
pub fn footer_html(site: &Site) -> &str {
    site.footprint
        .as_ref()
        .and_then(|f| f.footer_html.as_deref())
        .unwrap_or_default()
}

/// The template's page skeleton, or the built-in one when it is blank.
pub fn base_html(template: &Template) -> Cow<'_, str> {
    match template.base_html.as_deref() {
        Some(html) if !html.trim().is_empty() => Cow::Borrowed(html),
        _ => Cow::Owned(default_base_html()),
    }
}

/// Blocks sorted by `order`, ties in page order, paired with their index.
pub fn ordered_blocks(page: &Page) -> Vec<(usize, &Block)> {
    let mut blocks: Vec<(usize, &Block)> = page.blocks.iter().enumerate().collect();
    blocks.sort_by_key(|(_, block)| block.order);
    blocks
}

/// Compiles pages of one site against shared, precomputed fragments.
#[derive(Debug, Clone)]
pub struct PageCompiler<'a> {
    site: &'a Site,
    base_html: Cow<'a, str>,
    navigation: &'a str,
    footer: &'a str,
    scripts: &'a str,
    renderer: BlockRenderer,
}

impl<'a> PageCompiler<'a> {
    pub fn new(
        site: &'a Site,
        template: &'a Template,
        navigation: &'a str,
        footer: &'a str,
        renderer: BlockRenderer,
    ) -> Self {
        Self {
            site,
            base_html: base_html(template),
            navigation,
            footer,
            scripts: "",
            renderer,
        }
    }

    /// Markup for the `{{scripts}}` slot.
    pub fn with_scripts(mut self, scripts: &'a str) -> Self {
        self.scripts = scripts;
        self
    }

    /// Rendered blocks joined with newlines. Unknown block types are skipped.
    pub fn render_content(&self, page: &Page) -> Result<(String, Vec<String>), InvalidBlock> {
        let mut fragments = Vec::with_capacity(page.blocks.len());
        let mut unknown = Vec::new();
        for (index, block) in ordered_blocks(page) {
            let content = BlockContent::from_block(block).map_err(|source| InvalidBlock {
                index,
                block_type: block.block_type.clone(),
                order: block.order,
                source,
            })?;
            if let BlockContent::Unknown(block_type) = &content {
                tracing::warn!(
                    page = %page.slug,
                    block_type = %block_type,
                    order = block.order,
                    "Skipping block of unknown type"
                );
                unknown.push(block_type.clone());
                continue;
            }
            fragments.push(self.renderer.render(&content).into_string());
        }
        Ok((fragments.join("\n"), unknown))
    }

    pub fn compile(&self, page: &Page) -> Result<CompiledPage, InvalidBlock> {
        let (content, unknown_blocks) = self.render_content(page)?;

        let name = display_name(page);
        let meta_title = if page.meta_title.trim().is_empty() {
            name
        } else {
            page.meta_title.as_str()
        };
        let brand_name = self.renderer.text(&self.site.brand_name).into_string();
        let page_title = self.renderer.text(name).into_string();
        let meta_title = self.renderer.text(meta_title).into_string();
        let meta_description = self.renderer.text(&page.meta_description).into_string();

        let values = SlotValues {
            brand_name: &brand_name,
            page_title: &page_title,
            meta_title: &meta_title,
            meta_description: &meta_description,
            content: &content,
            navigation: self.navigation,
            footer: self.footer,
            scripts: self.scripts,
        };
        let filled = substitute(&self.base_html, &values);

        Ok(CompiledPage {
            html: filled.html,
            unresolved_tokens: filled.unresolved,
            unused_slots: filled.unused,
            unknown_blocks,
        })
    }
}

/// Compile a single page with default rendering settings.
pub fn compile_page(
    page: &Page,
    site: &Site,
    template: &Template,
    navigation: &str,
    footer: &str,
) -> Result<CompiledPage, InvalidBlock> {
    PageCompiler::new(site, template, navigation, footer, BlockRenderer::default()).compile(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{block, page, site};
    use crate::types::Footprint;
    use serde_json::json;

    fn template(html: &str) -> Template {
        Template {
            base_html: Some(html.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn blocks_rendered_in_order() {
        let mut p = page("home", "Home", 0);
        p.blocks = vec![
            block("text", 3, json!({ "text": "third" })),
            block("text", 1, json!({ "text": "first" })),
            block("text", 2, json!({ "text": "second" })),
        ];
        let s = site(vec![]);
        let compiled = compile_page(&p, &s, &template("{{content}}"), "", "").unwrap();

        let first = compiled.html.find("first").unwrap();
        let second = compiled.html.find("second").unwrap();
        let third = compiled.html.find("third").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn equal_orders_keep_page_position() {
        let mut p = page("home", "Home", 0);
        p.blocks = vec![
            block("text", 0, json!({ "text": "a" })),
            block("text", 0, json!({ "text": "b" })),
        ];
        let order: Vec<usize> = ordered_blocks(&p).iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn fragments_joined_with_newline() {
        let mut p = page("home", "Home", 0);
        p.blocks = vec![
            block("text", 0, json!({ "text": "a" })),
            block("text", 1, json!({ "text": "b" })),
        ];
        let s = site(vec![]);
        let compiled = compile_page(&p, &s, &template("{{content}}"), "", "").unwrap();
        assert_eq!(compiled.html.matches('\n').count(), 1);
    }

    #[test]
    fn unknown_blocks_skipped_and_reported() {
        let mut p = page("home", "Home", 0);
        p.blocks = vec![
            block("carousel", 0, json!({})),
            block("text", 1, json!({ "text": "kept" })),
        ];
        let s = site(vec![]);
        let compiled = compile_page(&p, &s, &template("{{content}}"), "", "").unwrap();
        assert!(compiled.html.contains("kept"));
        assert!(!compiled.html.starts_with('\n'));
        assert_eq!(compiled.unknown_blocks, vec!["carousel".to_string()]);
    }

    #[test]
    fn unknown_block_leaves_no_empty_line() {
        let s = site(vec![]);
        let t = template("{{content}}");
        let mut plain = page("home", "Home", 0);
        plain.blocks = vec![
            block("text", 0, json!({ "text": "a" })),
            block("text", 2, json!({ "text": "b" })),
        ];
        let mut mixed = plain.clone();
        mixed.blocks.insert(1, block("carousel", 1, json!({})));

        let expected = compile_page(&plain, &s, &t, "", "").unwrap().html;
        let compiled = compile_page(&mixed, &s, &t, "", "").unwrap();
        assert_eq!(compiled.html, expected);
        assert_eq!(compiled.html.matches('\n').count(), 1);
        assert!(!compiled.html.contains("\n\n"));
    }

    #[test]
    fn invalid_block_reports_position() {
        let mut p = page("home", "Home", 0);
        p.blocks = vec![
            block("text", 0, json!({ "text": "ok" })),
            block("faq", 5, json!({ "items": "nope" })),
        ];
        let s = site(vec![]);
        let err = compile_page(&p, &s, &template("{{content}}"), "", "").unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.order, 5);
        assert_eq!(err.block_type, "faq");
    }

    #[test]
    fn text_slots_filled() {
        let mut p = page("about", "About", 1);
        p.meta_title = "About Acme".to_string();
        p.meta_description = "Who we are".to_string();
        let mut s = site(vec![]);
        s.brand_name = "Acme".to_string();
        let compiled = compile_page(
            &p,
            &s,
            &template("{{brand_name}}|{{page_title}}|{{meta_title}}|{{meta_description}}"),
            "",
            "",
        )
        .unwrap();
        assert_eq!(compiled.html, "Acme|About|About Acme|Who we are");
    }

    #[test]
    fn meta_title_falls_back_to_display_name() {
        let p = page("pricing", "", 0);
        let s = site(vec![]);
        let compiled =
            compile_page(&p, &s, &template("{{meta_title}}/{{page_title}}"), "", "").unwrap();
        assert_eq!(compiled.html, "pricing/pricing");
    }

    #[test]
    fn brand_name_is_escaped() {
        let p = page("home", "Home", 0);
        let mut s = site(vec![]);
        s.brand_name = "A & B".to_string();
        let compiled = compile_page(&p, &s, &template("{{brand_name}}"), "", "").unwrap();
        assert_eq!(compiled.html, "A &amp; B");
    }

    #[test]
    fn navigation_and_footer_inserted_verbatim() {
        let p = page("home", "Home", 0);
        let s = site(vec![]);
        let compiled = compile_page(
            &p,
            &s,
            &template("{{navigation}}{{footer}}"),
            "<nav>n</nav>",
            "<footer>f</footer>",
        )
        .unwrap();
        assert_eq!(compiled.html, "<nav>n</nav><footer>f</footer>");
    }

    #[test]
    fn footer_from_footprint() {
        let mut s = site(vec![]);
        assert_eq!(footer_html(&s), "");
        s.footprint = Some(Footprint { footer_html: None });
        assert_eq!(footer_html(&s), "");
        s.footprint = Some(Footprint {
            footer_html: Some("<footer>x</footer>".to_string()),
        });
        assert_eq!(footer_html(&s), "<footer>x</footer>");
    }

    #[test]
    fn blank_template_uses_default_skeleton() {
        let p = page("home", "Home", 0);
        let s = site(vec![]);
        for html in [None, Some(String::new()), Some("  ".to_string())] {
            let t = Template {
                base_html: html,
                ..Default::default()
            };
            let compiled = compile_page(&p, &s, &t, "", "").unwrap();
            assert!(compiled.html.starts_with("<!DOCTYPE html>"));
            assert!(compiled.html.contains("<title>Home</title>"));
            assert!(!compiled.html.contains("{{"));
        }
    }

    #[test]
    fn unresolved_tokens_reported() {
        let p = page("home", "Home", 0);
        let s = site(vec![]);
        let compiled =
            compile_page(&p, &s, &template("{{content}}{{sidebar}}"), "", "").unwrap();
        assert_eq!(compiled.unresolved_tokens, vec!["sidebar".to_string()]);
        assert!(compiled.html.ends_with("{{sidebar}}"));
    }

    #[test]
    fn scripts_slot_filled_when_set() {
        let p = page("home", "Home", 0);
        let s = site(vec![]);
        let t = template("{{scripts}}");
        let compiler = PageCompiler::new(&s, &t, "", "", BlockRenderer::default())
            .with_scripts("<script src=\"/scripts.js\" defer></script>");
        assert_eq!(
            compiler.compile(&p).unwrap().html,
            "<script src=\"/scripts.js\" defer></script>"
        );
    }
}
