//! # Blockpress
//!
//! A static site compiler for a multi-tenant CMS. Each tenant site is stored
//! as structured data: pages made of typed content blocks, a brand, a colour
//! palette, and a template with HTML/CSS/JS. Blockpress turns one such
//! snapshot into the flat set of files a static host can serve.
//!
//! # Architecture: Three Layers
//!
//! ```text
//! 1. Render    block (type + JSON content)  →  HTML fragment
//! 2. Compile   page + template + fragments   →  complete HTML document
//! 3. Build     site snapshot                 →  { filename → content }
//! ```
//!
//! Each layer is a pure function of its input. Nothing here touches the
//! filesystem except [`manifest`] (writing a finished build) and [`config`]
//! (reading `blockpress.toml`), so the whole pipeline is testable in memory.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | The site snapshot: `Site`, `Page`, `Block`, `Template`, `Footprint` |
//! | [`block`] | Block kinds and typed, validated block content |
//! | [`render`] | Layer 1: turns one block into an HTML fragment using Maud |
//! | [`template`] | `{{token}}` slots and single-pass substitution |
//! | [`navigation`] | Published-page ordering and the shared nav bar |
//! | [`page`] | Layer 2: compiles one page into a full document |
//! | [`assets`] | `styles.css` (colour variables + template CSS) and `scripts.js` |
//! | [`naming`] | Slug validation and slug → URL / filename mapping |
//! | [`builder`] | Layer 3: builds every output file for a site |
//! | [`manifest`] | Content-addressed writes of a build into an output directory |
//! | [`config`] | `blockpress.toml` loading, validation, and merging |
//! | [`output`] | CLI output formatting of build results |
//!
//! # Design Decisions
//!
//! ## Escaping By Default
//!
//! Block fragments are generated with [Maud](https://maud.lambda.xyz/), so
//! every interpolated value is HTML-escaped. Authored text therefore cannot
//! inject markup into a tenant's site. Tenants whose content relies on inline
//! markup can opt out with `escape_html = false`; see
//! [`render::BlockRenderer`]. Template HTML, the footprint footer, and the
//! template CSS/JS are owned by the site operator and are always inserted
//! verbatim.
//!
//! ## Deterministic Output
//!
//! Pages and blocks are ordered by a stable sort on `order`, so ties keep
//! their snapshot position. Custom colours are a sorted map. Output files are
//! a `BTreeMap`. The same snapshot therefore always produces byte-identical
//! output, which is what makes [`manifest`] skip unchanged files and what
//! [`builder::BuildOutput::fingerprint`] reports.
//!
//! ## Single-Pass Substitution
//!
//! Template tokens are replaced in one left-to-right scan. Values inserted
//! into a slot are never scanned again, so a page body that mentions
//! `{{footer}}` stays literal text.
//!
//! ## Refuse Rather Than Guess
//!
//! A site with no template, a slug that cannot become a flat filename, and
//! two pages that would write the same file are all build errors. Unknown
//! block types are the exception: they are skipped with a warning so a newer
//! CMS schema doesn't break older builders.

pub mod assets;
pub mod block;
pub mod builder;
pub mod config;
pub mod manifest;
pub mod naming;
pub mod navigation;
pub mod output;
pub mod page;
pub mod render;
pub mod template;
pub mod types;

pub use builder::{BuildError, BuildOptions, BuildOutput, SiteBuilder, build};
pub use render::render_block;

#[cfg(test)]
pub(crate) mod test_helpers;
