//! Slug conventions shared by navigation and file assembly.
//!
//! Every page is addressed by its slug. The reserved `home` slug is the site
//! root; everything else lives one level below it:
//!
//! | Slug | URL | Output file |
//! |------|-----|-------------|
//! | `home` | `/` | `index.html` |
//! | `about` | `/about` | `about.html` |
//!
//! Output is flat, so slugs must not contain path separators.
//!
//! ## Display Names
//!
//! A page shows its title wherever a human-readable name is needed (nav
//! links, the `{{page_title}}` slot). Untitled pages fall back to their slug.

use crate::types::Page;
use thiserror::Error;

/// Slug mapped to the site root.
pub const HOME_SLUG: &str = "home";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug is empty")]
    Empty,
    #[error("slug `{0}` contains a path separator")]
    PathSeparator(String),
    #[error("slug `{0}` contains `..`")]
    ParentReference(String),
}

/// Reject slugs that cannot become a flat output filename.
pub fn validate_slug(slug: &str) -> Result<(), SlugError> {
    if slug.trim().is_empty() {
        return Err(SlugError::Empty);
    }
    if slug.contains('/') || slug.contains('\\') {
        return Err(SlugError::PathSeparator(slug.to_string()));
    }
    if slug.contains("..") {
        return Err(SlugError::ParentReference(slug.to_string()));
    }
    Ok(())
}

pub fn is_home(slug: &str) -> bool {
    slug == HOME_SLUG
}

/// Site-relative URL for a page.
pub fn page_url(slug: &str) -> String {
    if is_home(slug) {
        "/".to_string()
    } else {
        format!("/{slug}")
    }
}

/// Output filename for a page.
pub fn page_filename(slug: &str) -> String {
    if is_home(slug) {
        "index.html".to_string()
    } else {
        format!("{slug}.html")
    }
}

/// Title, or slug when the title is blank.
pub fn display_name(page: &Page) -> &str {
    if page.title.trim().is_empty() {
        &page.slug
    } else {
        &page.title
    }
}
