//! Shared test utilities for the blockpress test suite.
//!
//! Builders for snapshot entities and lookups over a [`BuildOutput`] that
//! panic with the available names on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut home = page("home", "Home", 0);
//! home.blocks = vec![block("text", 0, json!({ "text": "Hi" }))];
//! let output = build(&site(vec![home])).unwrap();
//!
//! assert_eq!(file_names(&output), vec!["index.html", "styles.css"]);
//! assert!(find_file(&output, "index.html").contains("Hi"));
//! ```

use crate::builder::BuildOutput;
use crate::types::{Block, Page, Site, Template};
use serde_json::Value;

// =========================================================================
// Snapshot builders
// =========================================================================

/// A published page with empty meta fields and no blocks.
pub fn page(slug: &str, title: &str, order: i64) -> Page {
    Page {
        slug: slug.to_string(),
        title: title.to_string(),
        order,
        is_published: true,
        ..Default::default()
    }
}

pub fn block(block_type: &str, order: i64, content: Value) -> Block {
    Block {
        block_type: block_type.to_string(),
        order,
        content,
    }
}

/// Template with every slot used and a one-rule stylesheet.
pub fn template() -> Template {
    Template {
        base_html: Some(
            "<html><head><title>{{meta_title}}</title>\
             <meta name=\"description\" content=\"{{meta_description}}\"></head>\
             <body><h1>{{brand_name}}: {{page_title}}</h1>{{navigation}}\
             <main>{{content}}</main>{{footer}}</body></html>"
                .to_string(),
        ),
        base_css: Some("body{}".to_string()),
        base_js: None,
    }
}

/// A site named "Test Site" using [`template`].
pub fn site(pages: Vec<Page>) -> Site {
    Site {
        brand_name: "Test Site".to_string(),
        template: Some(template()),
        pages,
        ..Default::default()
    }
}

// =========================================================================
// Output lookups
// =========================================================================

/// Output filenames in map order.
pub fn file_names(output: &BuildOutput) -> Vec<&str> {
    output.files.keys().map(String::as_str).collect()
}

/// Content of an output file. Panics if missing.
pub fn find_file<'a>(output: &'a BuildOutput, name: &str) -> &'a str {
    output
        .files
        .get(name)
        .map(String::as_str)
        .unwrap_or_else(|| panic!("file '{name}' not found. Available: {:?}", file_names(output)))
}

/// Assert that `needles` occur in `haystack` in the given order.
pub fn assert_in_order(haystack: &str, needles: &[&str]) {
    let mut cursor = 0;
    for needle in needles {
        match haystack[cursor..].find(needle) {
            Some(pos) => cursor += pos + needle.len(),
            None => panic!("'{needle}' not found after byte {cursor} in:\n{haystack}"),
        }
    }
}
