//! Output manifest for idempotent writes.
//!
//! A build always produces the full file map in memory; this module decides
//! what actually has to touch the disk. Deploy tooling and CDNs key caches on
//! file contents, so rewriting an unchanged file (and bumping its mtime) is
//! noise at best.
//!
//! # Design
//!
//! The manifest is **content-addressed**: each output filename maps to the
//! SHA-256 of the content last written there. On the next write:
//!
//! 1. A file whose hash matches its manifest entry **and** still exists on
//!    disk is left alone.
//! 2. Anything else is (re)written.
//! 3. Files listed in the old manifest but absent from the new build are
//!    removed, so unpublished pages disappear from the output directory.
//!
//! Files the manifest never recorded are never deleted, and entries that
//! are not a plain filename inside the output directory are ignored.
//!
//! ## Storage
//!
//! The manifest is a JSON file at `<output_dir>/.blockpress-manifest.json`.
//! A missing, corrupt or wrong-version manifest is treated as empty, which
//! simply rewrites every file.

use crate::builder::BuildOutput;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Name of the manifest file within the output directory.
const MANIFEST_FILENAME: &str = ".blockpress-manifest.json";

/// Bump to invalidate existing manifests when the format changes.
const MANIFEST_VERSION: u32 = 1;

/// On-disk record of what the last write produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputManifest {
    pub version: u32,
    /// Build fingerprint of the last write.
    pub fingerprint: String,
    /// Output filename → SHA-256 of its content.
    pub entries: BTreeMap<String, String>,
}

impl OutputManifest {
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION,
            fingerprint: String::new(),
            entries: BTreeMap::new(),
        }
    }

    /// Manifest describing `output`.
    pub fn from_output(output: &BuildOutput) -> Self {
        Self {
            version: MANIFEST_VERSION,
            fingerprint: output.fingerprint(),
            entries: output
                .file_hashes()
                .into_iter()
                .map(|(name, hash)| (name.to_string(), hash))
                .collect(),
        }
    }

    /// Load from the output directory. Returns an empty manifest if the file
    /// doesn't exist or can't be parsed (version mismatch, corruption).
    pub fn load(output_dir: &Path) -> Self {
        let path = manifest_path(output_dir);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        let manifest: Self = match serde_json::from_str(&content) {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unreadable output manifest");
                return Self::empty();
            }
        };
        if manifest.version != MANIFEST_VERSION {
            return Self::empty();
        }
        manifest
    }

    pub fn save(&self, output_dir: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(manifest_path(output_dir), json)
    }

    /// Whether `name` was last written with content hashing to `hash`.
    pub fn is_current(&self, name: &str, hash: &str) -> bool {
        self.entries.get(name).is_some_and(|h| h == hash)
    }
}

/// Summary of what a write did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteStats {
    pub unchanged: u32,
    pub written: u32,
    pub removed: u32,
}

impl WriteStats {
    pub fn total(&self) -> u32 {
        self.unchanged + self.written
    }
}

impl fmt::Display for WriteStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unchanged > 0 {
            write!(
                f,
                "{} unchanged, {} written ({} total)",
                self.unchanged,
                self.written,
                self.total()
            )?;
        } else {
            write!(f, "{} written", self.written)?;
        }
        if self.removed > 0 {
            write!(f, ", {} removed", self.removed)?;
        }
        Ok(())
    }
}

/// Write `output` into `output_dir`.
///
/// With `use_manifest` false every file is rewritten and nothing is removed,
/// but a fresh manifest is still saved for the next run.
pub fn write_output(
    output: &BuildOutput,
    output_dir: &Path,
    use_manifest: bool,
) -> io::Result<WriteStats> {
    std::fs::create_dir_all(output_dir)?;
    let previous = if use_manifest {
        OutputManifest::load(output_dir)
    } else {
        OutputManifest::empty()
    };
    let next = OutputManifest::from_output(output);
    let mut stats = WriteStats::default();

    for (name, content) in &output.files {
        let path = output_dir.join(name);
        let hash = &next.entries[name];
        if previous.is_current(name, hash) && path.exists() {
            stats.unchanged += 1;
            continue;
        }
        std::fs::write(&path, content)?;
        stats.written += 1;
    }

    for stale in previous.entries.keys().filter(|n| !next.entries.contains_key(*n)) {
        if !is_flat_filename(stale) {
            tracing::warn!(entry = %stale, "Ignoring manifest entry outside the output directory");
            continue;
        }
        let path = output_dir.join(stale);
        match std::fs::remove_file(&path) {
            Ok(()) => stats.removed += 1,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }

    next.save(output_dir)?;
    tracing::debug!(
        dir = %output_dir.display(),
        written = stats.written,
        unchanged = stats.unchanged,
        removed = stats.removed,
        "Output written"
    );
    Ok(stats)
}

/// A single normal path component: no separators, no `.`/`..`, not absolute.
fn is_flat_filename(name: &str) -> bool {
    let mut components = Path::new(name).components();
    !name.contains('\\')
        && matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        )
}

/// Resolve the manifest path for an output directory.
pub fn manifest_path(output_dir: &Path) -> PathBuf {
    output_dir.join(MANIFEST_FILENAME)
}
