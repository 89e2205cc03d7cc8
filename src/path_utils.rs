// Portable path handling for checksum listings
// Listing paths always use forward slashes regardless of host OS

use std::path::{Path, PathBuf};

/// Render a root-relative path in listing form: components joined with
/// `/`, never starting with `./` or `/`. Non-UTF-8 components are
/// decoded lossily; the listing is defined as UTF-8 text.
pub fn to_listing_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Turn a listing path back into a native relative path
pub fn from_listing_path(listing_path: &str) -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(listing_path.replace('/', "\\"))
    } else {
        PathBuf::from(listing_path)
    }
}

/// Resolve a listing path against the directory it was generated from
pub fn resolve_path(listing_path: &str, base_dir: &Path) -> PathBuf {
    base_dir.join(from_listing_path(listing_path))
}
