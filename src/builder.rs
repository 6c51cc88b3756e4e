//! Site build orchestration.
//!
//! [`SiteBuilder::build`] turns a [`Site`] snapshot into the complete set of
//! files to deploy:
//!
//! ```text
//! index.html      ← published page with slug "home"
//! {slug}.html     ← every other published page
//! styles.css      ← always
//! scripts.js      ← only when the template has script text
//! ```
//!
//! The build is a pure function of the snapshot: no I/O, no shared state,
//! and files are kept in a `BTreeMap`, so identical input always yields a
//! byte-identical [`BuildOutput`] (see [`BuildOutput::fingerprint`]).
//! Navigation and the footer are computed once and shared by every page,
//! which lets pages compile in parallel without changing the result.
//!
//! Preconditions the builder refuses to guess about:
//! - a site without a template,
//! - slugs that cannot become a flat filename,
//! - two published pages deriving the same filename, ignoring ASCII case
//!   (e.g. `home` and `index`, or `About` and `about`).

use crate::assets::{SCRIPT_FILENAME, STYLESHEET_FILENAME, build_script, build_stylesheet};
use crate::naming::{SlugError, display_name, page_filename, validate_slug};
use crate::navigation::{published_pages, render_nav};
use crate::page::{CompiledPage, InvalidBlock, PageCompiler, footer_html};
use crate::render::BlockRenderer;
use crate::template::Slot;
use crate::types::{Page, Site};
use maud::html;
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("site `{0}` has no template")]
    MissingTemplate(String),
    #[error("invalid page slug: {0}")]
    InvalidSlug(#[from] SlugError),
    #[error("pages `{first}` and `{second}` both build to `{filename}`")]
    FilenameCollision {
        filename: String,
        first: String,
        second: String,
    },
    #[error("page `{page}`: {source}")]
    InvalidBlock {
        page: String,
        #[source]
        source: InvalidBlock,
    },
    #[error("page `{page}`: template token `{token}` has no value")]
    UnresolvedPlaceholder { page: String, token: String },
}

/// Knobs for a build. See [`crate::config::BuildConfig::build_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// HTML-escape authored text.
    pub escape_html: bool,
    /// Fail on template tokens with no matching slot.
    pub strict_placeholders: bool,
    /// Compile pages on the rayon pool.
    pub parallel: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            escape_html: true,
            strict_placeholders: false,
            parallel: true,
        }
    }
}

/// Non-fatal findings from a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    UnknownBlockType { page: String, block_type: String },
    UnresolvedPlaceholder { page: String, token: String },
    UnusedSlot { page: String, slot: Slot },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::UnknownBlockType { page, block_type } => {
                write!(f, "{page}: skipped block of unknown type `{block_type}`")
            }
            BuildWarning::UnresolvedPlaceholder { page, token } => {
                write!(f, "{page}: template token `{token}` left as-is")
            }
            BuildWarning::UnusedSlot { page, slot } => {
                write!(f, "{page}: template has no `{}` token", slot.token())
            }
        }
    }
}

/// A page that made it into the output, in navigation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPage {
    pub slug: String,
    pub title: String,
    pub filename: String,
}

/// Everything a build produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutput {
    /// Output filename → file content.
    pub files: BTreeMap<String, String>,
    pub pages: Vec<BuiltPage>,
    pub warnings: Vec<BuildWarning>,
}

impl BuildOutput {
    /// SHA-256 of every file, keyed by filename.
    pub fn file_hashes(&self) -> BTreeMap<&str, String> {
        self.files
            .iter()
            .map(|(name, content)| (name.as_str(), hash_content(content)))
            .collect()
    }

    /// SHA-256 over all `(filename, content)` pairs in filename order.
    ///
    /// Two builds with the same fingerprint deploy the same bytes.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for (name, content) in &self.files {
            hasher.update(name.as_bytes());
            hasher.update(b"\0");
            hasher.update((content.len() as u64).to_le_bytes());
            hasher.update(content.as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }
}

/// SHA-256 of a file's content, as lowercase hex.
pub fn hash_content(content: &str) -> String {
    format!("{:x}", Sha256::digest(content.as_bytes()))
}

/// Builds sites with a fixed set of [`BuildOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SiteBuilder {
    options: BuildOptions,
}

impl SiteBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> BuildOptions {
        self.options
    }

    pub fn build(&self, site: &Site) -> Result<BuildOutput, BuildError> {
        let template = site
            .template
            .as_ref()
            .ok_or_else(|| BuildError::MissingTemplate(site.brand_name.clone()))?;

        let pages = published_pages(site);
        let filenames = assign_filenames(&pages)?;

        let renderer = BlockRenderer::new(self.options.escape_html);
        let navigation = render_nav(&pages, &renderer).into_string();
        let script = build_script(template);
        let script_tag = match script {
            Some(_) => html! { script src={ "/" (SCRIPT_FILENAME) } defer {} }.into_string(),
            None => String::new(),
        };
        let compiler = PageCompiler::new(site, template, &navigation, footer_html(site), renderer)
            .with_scripts(&script_tag);

        let compiled: Vec<Result<CompiledPage, InvalidBlock>> = if self.options.parallel {
            pages.par_iter().map(|page| compiler.compile(page)).collect()
        } else {
            pages.iter().map(|page| compiler.compile(page)).collect()
        };

        let mut output = BuildOutput::default();
        for ((page, filename), result) in pages.iter().zip(filenames).zip(compiled) {
            let compiled = result.map_err(|source| BuildError::InvalidBlock {
                page: page.slug.clone(),
                source,
            })?;
            self.collect_warnings(page, &compiled, &mut output.warnings)?;
            output.pages.push(BuiltPage {
                slug: page.slug.clone(),
                title: display_name(page).to_string(),
                filename: filename.clone(),
            });
            output.files.insert(filename, compiled.html);
        }

        output.files.insert(
            STYLESHEET_FILENAME.to_string(),
            build_stylesheet(site, template),
        );
        if let Some(js) = script {
            output.files.insert(SCRIPT_FILENAME.to_string(), js.to_string());
        }

        tracing::info!(
            site = %site.brand_name,
            pages = output.pages.len(),
            files = output.files.len(),
            warnings = output.warnings.len(),
            "Site build complete"
        );
        Ok(output)
    }

    fn collect_warnings(
        &self,
        page: &Page,
        compiled: &CompiledPage,
        warnings: &mut Vec<BuildWarning>,
    ) -> Result<(), BuildError> {
        for block_type in &compiled.unknown_blocks {
            warnings.push(BuildWarning::UnknownBlockType {
                page: page.slug.clone(),
                block_type: block_type.clone(),
            });
        }
        for token in &compiled.unresolved_tokens {
            if self.options.strict_placeholders {
                return Err(BuildError::UnresolvedPlaceholder {
                    page: page.slug.clone(),
                    token: token.clone(),
                });
            }
            tracing::warn!(page = %page.slug, token = %token, "Unresolved template token");
            warnings.push(BuildWarning::UnresolvedPlaceholder {
                page: page.slug.clone(),
                token: token.clone(),
            });
        }
        for slot in &compiled.unused_slots {
            tracing::debug!(page = %page.slug, slot = slot.name(), "Template has no token for slot");
            warnings.push(BuildWarning::UnusedSlot {
                page: page.slug.clone(),
                slot: *slot,
            });
        }
        Ok(())
    }
}

/// Derive one filename per page, rejecting bad slugs and collisions.
fn assign_filenames(pages: &[&Page]) -> Result<Vec<String>, BuildError> {
    let mut owners: BTreeMap<String, &str> = BTreeMap::new();
    let mut filenames = Vec::with_capacity(pages.len());
    for page in pages {
        validate_slug(&page.slug)?;
        let filename = page_filename(&page.slug);
        // Case-insensitive filesystems would fold `About.html` onto `about.html`.
        match owners.entry(filename.to_ascii_lowercase()) {
            Entry::Occupied(existing) => {
                return Err(BuildError::FilenameCollision {
                    filename,
                    first: existing.get().to_string(),
                    second: page.slug.clone(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(&page.slug);
            }
        }
        filenames.push(filename);
    }
    Ok(filenames)
}

/// Build with default options.
pub fn build(site: &Site) -> Result<BuildOutput, BuildError> {
    SiteBuilder::default().build(site)
}
