// Fingerprint aggregation module
// Freezes unordered hash results into the canonical listing and master digest

use std::path::Path;

use crate::digest::{AlgorithmRegistry, FileHasher};
use crate::error::FingerprintError;

/// Separator between digest and path in the canonical listing
pub const LISTING_SEPARATOR: &str = "  ";

/// One hashed file: digest plus root-relative listing path
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FileEntry {
    pub digest: String,
    pub path: String,
}

/// Canonical, sorted set of (digest, path) pairs representing one
/// dataset snapshot, together with its derived master digest.
///
/// Two fingerprints are semantically equal iff their canonical listings
/// are byte-identical.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Fingerprint {
    algorithm: String,
    entries: Vec<FileEntry>,
    master: Option<String>,
}

impl Fingerprint {
    /// Freeze a set of entries into a canonical fingerprint.
    ///
    /// Entries may arrive in any order (enumeration order, completion
    /// order, listing order); this is the single place a total order is
    /// imposed. The master digest is derived here and cached.
    pub fn from_entries(
        algorithm: &str,
        mut entries: Vec<FileEntry>,
    ) -> Result<Self, FingerprintError> {
        AlgorithmRegistry::validate(algorithm)?;

        // Canonical order: (digest, path), plain byte comparison. This is
        // a durable format decision; the master digest depends on it.
        entries.sort_by(|a, b| a.digest.cmp(&b.digest).then_with(|| a.path.cmp(&b.path)));

        let master = Self::derive_master(algorithm, &entries)?;

        Ok(Self {
            algorithm: algorithm.to_string(),
            entries,
            master,
        })
    }

    fn derive_master(
        algorithm: &str,
        entries: &[FileEntry],
    ) -> Result<Option<String>, FingerprintError> {
        match entries {
            // Never hashed from nothing: an empty fingerprint has no master.
            [] => Ok(None),
            // A single file is its own fingerprint.
            [only] => Ok(Some(only.digest.clone())),
            _ => {
                let text = render_listing(entries);
                FileHasher::new().hash_text(&text, algorithm).map(Some)
            }
        }
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the digest recorded for a listing path
    pub fn digest_for(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| entry.digest.as_str())
    }

    /// The single digest summarizing the whole fingerprint, `None` for
    /// an empty fingerprint
    pub fn master_digest(&self) -> Option<&str> {
        self.master.as_deref()
    }

    /// Short form of the master digest (first 7 hex characters), handy
    /// for display
    pub fn master_digest_short(&self) -> Option<&str> {
        self.master.as_deref().map(|m| &m[..7.min(m.len())])
    }

    /// Render the canonical listing text: one `digest  path` line per
    /// entry, canonical order, trailing newline on every line
    pub fn listing_text(&self) -> String {
        render_listing(&self.entries)
    }
}

fn render_listing(entries: &[FileEntry]) -> String {
    let mut text = String::new();
    for entry in entries {
        text.push_str(&entry.digest);
        text.push_str(LISTING_SEPARATOR);
        text.push_str(&entry.path);
        text.push('\n');
    }
    text
}

/// Conventional listing file name for a data root: the root's own name
/// with the algorithm as extension, e.g. "dataset.sha256"
pub fn suggested_listing_name(root: &Path, algorithm: &str) -> String {
    let stem = root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "checksums".to_string());
    format!("{}.{}", stem, algorithm)
}
