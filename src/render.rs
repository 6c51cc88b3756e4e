//! Block rendering.
//!
//! Turns one [`BlockContent`] into an HTML fragment. Rendering is a pure
//! function of the content and the escaping mode; it knows nothing about the
//! page or site the block belongs to.
//!
//! ## Markup
//!
//! Every fragment is a single element carrying `block` plus a kind class
//! (`block-hero`, `block-faq`, ...), so templates can style blocks without
//! knowing the renderer's internals:
//!
//! | Kind | Root element |
//! |------|--------------|
//! | hero | `section.block-hero` with optional inline background image |
//! | article | `article.block-article` |
//! | text | `section.block-text` |
//! | image | `figure.block-image` |
//! | text_image | `section.block-text-image`, flex layout driven by `image_position` |
//! | gallery | `section.block-gallery` wrapping a `div.gallery-grid` |
//! | cta | `section.block-cta` with inline colours and a `div.cta-buttons` row |
//! | faq | `section.block-faq`, one `<details>` per question |
//!
//! ## Escaping
//!
//! Authored text is HTML-escaped by default (maud interpolation). A renderer
//! built with `escape_html = false` inserts text verbatim, which reproduces
//! sites authored with inline markup in their content but lets that content
//! inject arbitrary HTML.

use crate::block::{
    BlockContent, BlockError, CtaContent, FaqContent, GalleryContent, HeroContent, ImageContent,
    TextContent, TextImageContent,
};
use maud::{Markup, PreEscaped, html};
use serde_json::Value;

/// Renders validated block content to HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRenderer {
    escape_html: bool,
}

impl Default for BlockRenderer {
    fn default() -> Self {
        Self { escape_html: true }
    }
}

impl BlockRenderer {
    pub fn new(escape_html: bool) -> Self {
        Self { escape_html }
    }

    pub fn escapes_html(&self) -> bool {
        self.escape_html
    }

    /// Render one block. [`BlockContent::Unknown`] renders as empty markup.
    pub fn render(&self, content: &BlockContent) -> Markup {
        match content {
            BlockContent::Hero(hero) => self.hero(hero),
            BlockContent::Article(article) => html! {
                article.block.block-article { (self.prose(article)) }
            },
            BlockContent::Text(text) => html! {
                section.block.block-text { (self.prose(text)) }
            },
            BlockContent::Image(image) => self.image(image),
            BlockContent::TextImage(text_image) => self.text_image(text_image),
            BlockContent::Gallery(gallery) => self.gallery(gallery),
            BlockContent::Cta(cta) => self.cta(cta),
            BlockContent::Faq(faq) => self.faq(faq),
            BlockContent::Unknown(_) => html! {},
        }
    }

    /// Validate and render a raw `(block_type, content)` pair.
    pub fn render_raw(&self, block_type: &str, content: &Value) -> Result<String, BlockError> {
        let content = BlockContent::parse(block_type, content)?;
        Ok(self.render(&content).into_string())
    }

    /// Authored text, escaped or verbatim depending on the mode.
    pub(crate) fn text(&self, value: &str) -> Markup {
        if self.escape_html {
            html! { (value) }
        } else {
            PreEscaped(value.to_string())
        }
    }

    fn hero(&self, hero: &HeroContent) -> Markup {
        let background = hero
            .background_image()
            .map(|url| self.text(&format!("background-image: url('{}');", css_url(url))));
        html! {
            section.block.block-hero style=[background] {
                div.hero-content {
                    h1.hero-title { (self.text(hero.title())) }
                    @if let Some(subtitle) = hero.subtitle() {
                        p.hero-subtitle { (self.text(subtitle)) }
                    }
                    @if let Some(cta) = hero.call_to_action() {
                        a.btn.btn-primary.hero-cta href=(self.text(cta.url)) { (self.text(cta.text)) }
                    }
                }
            }
        }
    }

    /// Heading (only when titled) and body shared by article and text blocks.
    fn prose(&self, content: &TextContent) -> Markup {
        html! {
            @if let Some(title) = content.title() {
                h2.block-title { (self.text(title)) }
            }
            div.block-body { (self.text(content.text())) }
        }
    }

    fn image(&self, image: &ImageContent) -> Markup {
        html! {
            figure.block.block-image {
                img src=(self.text(image.url())) alt=(self.text(image.alt())) loading="lazy";
                @if let Some(caption) = image.caption() {
                    figcaption { (self.text(caption)) }
                }
            }
        }
    }

    fn text_image(&self, content: &TextImageContent) -> Markup {
        let position = content.image_position;
        let size = content.image_size;
        html! {
            section.block.block-text-image
                data-position=(position.as_str())
                data-size=(size.as_str())
                style={ "display: flex; flex-direction: " (position.flex_direction()) "; gap: 2rem;" } {
                div.text-image-media style={ "flex: 0 0 auto; width: " (size.width()) ";" } {
                    img src=(self.text(content.image_url())) alt=(self.text(content.image_alt())) loading="lazy";
                }
                div.text-image-body style="flex: 1 1 0;" {
                    @if let Some(title) = content.title() {
                        h2.block-title { (self.text(title)) }
                    }
                    div.block-body { (self.text(content.text())) }
                }
            }
        }
    }

    fn gallery(&self, gallery: &GalleryContent) -> Markup {
        html! {
            section.block.block-gallery {
                div.gallery-grid {
                    @for image in &gallery.images {
                        figure.gallery-item {
                            img src=(self.text(image.url())) alt=(self.text(image.alt())) loading="lazy";
                        }
                    }
                }
            }
        }
    }

    fn cta(&self, cta: &CtaContent) -> Markup {
        let colors = self.text(&format!(
            "background-color: {}; color: {};",
            cta.background_color(),
            cta.text_color()
        ));
        html! {
            section.block.block-cta style=(colors) {
                div.cta-content {
                    @if let Some(title) = cta.title() {
                        h2.cta-title { (self.text(title)) }
                    }
                    @if let Some(description) = cta.description() {
                        p.cta-description { (self.text(description)) }
                    }
                    div.cta-buttons {
                        @for button in &cta.buttons {
                            a class={ "btn btn-" (self.text(button.style())) } href=(self.text(button.url())) {
                                (self.text(button.text()))
                            }
                        }
                    }
                }
            }
        }
    }

    fn faq(&self, faq: &FaqContent) -> Markup {
        html! {
            section.block.block-faq {
                @if let Some(title) = faq.title() {
                    h2.faq-title { (self.text(title)) }
                }
                div.faq-list {
                    @for item in &faq.items {
                        details.faq-item {
                            summary.faq-question { (self.text(item.question())) }
                            div.faq-answer { (self.text(item.answer())) }
                        }
                    }
                }
            }
        }
    }
}

/// Render a raw block with default (escaping) settings.
pub fn render_block(block_type: &str, content: &Value) -> Result<String, BlockError> {
    BlockRenderer::default().render_raw(block_type, content)
}

/// Percent-encode the characters that could end a quoted CSS `url()`.
fn css_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '\'' | '"' | '(' | ')' | '\\' => out.push_str(&format!("%{:02X}", c as u32)),
            c if c.is_ascii_whitespace() || c.is_ascii_control() => {
                out.push_str(&format!("%{:02X}", c as u32))
            }
            c => out.push(c),
        }
    }
    out
}
