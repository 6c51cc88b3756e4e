//! CLI output formatting for builds.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Pages lead with their
//! navigation position and title; the file they were written to follows the
//! arrow. Files that don't belong to a page are listed as assets.
//!
//! # Output Format
//!
//! ```text
//! Pages
//!     001 Home → index.html
//!     002 About → about.html
//!
//! Assets
//!     scripts.js
//!     styles.css
//!
//! Warnings
//!     home: skipped block of unknown type `carousel`
//!
//! Built 2 pages, 4 files
//! Fingerprint: 3f2a…
//! ```
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::builder::BuildOutput;
use crate::manifest::WriteStats;
use std::collections::BTreeSet;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Format the result of a build.
pub fn format_build_output(output: &BuildOutput) -> Vec<String> {
    let mut lines = Vec::new();

    if !output.pages.is_empty() {
        lines.push("Pages".to_string());
        for (i, page) in output.pages.iter().enumerate() {
            lines.push(format!(
                "{}{} {} \u{2192} {}",
                indent(1),
                format_index(i + 1),
                page.title,
                page.filename
            ));
        }
        lines.push(String::new());
    }

    let page_files: BTreeSet<&str> = output.pages.iter().map(|p| p.filename.as_str()).collect();
    let assets: Vec<&str> = output
        .files
        .keys()
        .map(String::as_str)
        .filter(|name| !page_files.contains(name))
        .collect();
    if !assets.is_empty() {
        lines.push("Assets".to_string());
        for name in assets {
            lines.push(format!("{}{}", indent(1), name));
        }
        lines.push(String::new());
    }

    if !output.warnings.is_empty() {
        lines.push("Warnings".to_string());
        for warning in &output.warnings {
            lines.push(format!("{}{}", indent(1), warning));
        }
        lines.push(String::new());
    }

    lines.push(format!(
        "Built {}, {}",
        plural(output.pages.len(), "page", "pages"),
        plural(output.files.len(), "file", "files")
    ));
    lines.push(format!("Fingerprint: {}", output.fingerprint()));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(output: &BuildOutput) {
    for line in format_build_output(output) {
        println!("{}", line);
    }
}

/// Format the result of writing a build to disk.
pub fn format_write_stats(stats: &WriteStats, output_dir: &Path) -> Vec<String> {
    vec![format!("Output: {} \u{2192} {}", stats, output_dir.display())]
}

pub fn print_write_stats(stats: &WriteStats, output_dir: &Path) {
    for line in format_write_stats(stats, output_dir) {
        println!("{}", line);
    }
}
