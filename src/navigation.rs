//! Site navigation.
//!
//! Navigation is built once per build from the published pages and handed to
//! every page unchanged. Pages are listed by their `order`; pages sharing an
//! `order` keep the order in which the site lists them.

use crate::naming::{display_name, page_url};
use crate::render::BlockRenderer;
use crate::types::{Page, Site};
use maud::{Markup, html};

/// Published pages sorted by `order`, ties kept in site order.
pub fn published_pages(site: &Site) -> Vec<&Page> {
    let mut pages: Vec<&Page> = site.pages.iter().filter(|p| p.is_published).collect();
    pages.sort_by_key(|p| p.order);
    pages
}

/// Render the navigation container for the given (already ordered) pages.
pub fn render_nav(pages: &[&Page], renderer: &BlockRenderer) -> Markup {
    html! {
        nav.site-nav {
            ul.nav-links {
                @for page in pages {
                    li {
                        a href=(renderer.text(&page_url(&page.slug))) {
                            (renderer.text(display_name(page)))
                        }
                    }
                }
            }
        }
    }
}
