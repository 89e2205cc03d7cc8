// File enumeration module
// Lists every regular file under a root as portable relative paths

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use crate::error::FingerprintError;
use crate::path_utils;

/// A file discovered during enumeration, before hashing
#[derive(Debug, Clone)]
pub struct WalkedFile {
    /// Root-relative path in listing form (forward slashes)
    pub relative: String,
    /// Absolute or caller-relative path used to open the file
    pub absolute: PathBuf,
}

/// Enumerate every regular file under `root`.
///
/// Traversal order is filesystem-dependent and carries no meaning; the
/// aggregator imposes the canonical order later. Hidden files are
/// included, symlinks are not followed. A root that is itself a regular
/// file yields exactly one entry named after the file.
pub fn enumerate(root: &Path) -> Result<Vec<WalkedFile>, FingerprintError> {
    let metadata = match fs::metadata(root) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(FingerprintError::NotFound {
                path: root.to_path_buf(),
            })
        }
        Err(e) => {
            return Err(FingerprintError::from_io_error(
                e,
                "reading root metadata",
                Some(root.to_path_buf()),
            ))
        }
    };

    if metadata.is_file() {
        let relative = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        return Ok(vec![WalkedFile {
            relative,
            absolute: root.to_path_buf(),
        }]);
    }

    if !metadata.is_dir() {
        return Err(FingerprintError::NotADirectoryOrFile {
            path: root.to_path_buf(),
        });
    }

    // Walk in a separate rayon pool so directory traversal never competes
    // with the hashing workers.
    let mut files = Vec::new();
    for entry_result in WalkDir::new(root)
        .parallelism(jwalk::Parallelism::RayonNewPool(0))
        .skip_hidden(false)
        .follow_links(false)
    {
        // A fingerprint that silently omits files is worse than no
        // fingerprint, so walk errors fail the enumeration.
        let entry = entry_result.map_err(|e| FingerprintError::Io {
            path: Some(root.to_path_buf()),
            operation: "walking directory".to_string(),
            source: io::Error::new(io::ErrorKind::Other, e.to_string()),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = match path.strip_prefix(root) {
            Ok(rel) => path_utils::to_listing_path(rel),
            Err(_) => path_utils::to_listing_path(&path),
        };

        files.push(WalkedFile {
            relative,
            absolute: path,
        });
    }

    Ok(files)
}
