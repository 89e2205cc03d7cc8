// Centralized error handling module
// Provides typed, context-rich failures for every engine operation

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for the fingerprint engine
/// Distinguishes "could not start" (bad root, bad algorithm) from
/// "failed partway" (I/O during hashing) from "could not parse listing"
#[derive(Debug)]
pub enum FingerprintError {
    /// Root path errors, surfaced before any hashing starts
    NotFound { path: PathBuf },
    NotADirectoryOrFile { path: PathBuf },

    /// Unknown algorithm name, surfaced at construction, never defaulted
    UnsupportedAlgorithm { algorithm: String, supported: Vec<String> },

    /// File system errors during hashing, fatal for the whole run
    FileNotFound { path: PathBuf },
    PermissionDenied { path: PathBuf, operation: String },
    Io { path: Option<PathBuf>, operation: String, source: io::Error },

    /// Checksum listing syntax errors on load, fail the whole parse
    MalformedListing { path: PathBuf, line: usize, reason: String },
}

impl fmt::Display for FingerprintError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FingerprintError::NotFound { path } => {
                writeln!(f, "Path not found: {}", path.display())?;
                write!(f, "Suggestion: Check that the data path is correct and exists")
            }
            FingerprintError::NotADirectoryOrFile { path } => {
                writeln!(f, "Not a directory or regular file: {}", path.display())?;
                write!(f, "Suggestion: Point the engine at a directory or a regular file")
            }
            FingerprintError::UnsupportedAlgorithm { algorithm, supported } => {
                writeln!(f, "Unsupported hash algorithm: {}", algorithm)?;
                write!(f, "Suggestion: Use one of: {}", supported.join(", "))
            }
            FingerprintError::FileNotFound { path } => {
                writeln!(f, "File not found: {}", path.display())?;
                write!(f, "Suggestion: Check that the file path is correct and the file exists")
            }
            FingerprintError::PermissionDenied { path, operation } => {
                writeln!(f, "Permission denied while {} file: {}", operation, path.display())?;
                write!(f, "Suggestion: Check file permissions or run with appropriate privileges")
            }
            FingerprintError::Io { path, operation, source } => {
                if let Some(p) = path {
                    writeln!(f, "I/O error while {} file {}: {}", operation, p.display(), source)?;
                } else {
                    writeln!(f, "I/O error while {}: {}", operation, source)?;
                }
                write!(f, "Suggestion: Check file permissions and disk space")
            }
            FingerprintError::MalformedListing { path, line, reason } => {
                writeln!(
                    f,
                    "Malformed checksum listing {} at line {}: {}",
                    path.display(),
                    line,
                    reason
                )?;
                write!(f, "Suggestion: Check that the listing format is correct (digest  path)")
            }
        }
    }
}

impl std::error::Error for FingerprintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FingerprintError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl FingerprintError {
    /// Create an I/O error with context about the operation and optional path
    pub fn from_io_error(err: io::Error, operation: &str, path: Option<PathBuf>) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => {
                if let Some(p) = path {
                    FingerprintError::FileNotFound { path: p }
                } else {
                    FingerprintError::Io {
                        path: None,
                        operation: operation.to_string(),
                        source: err,
                    }
                }
            }
            io::ErrorKind::PermissionDenied => {
                if let Some(p) = path {
                    FingerprintError::PermissionDenied {
                        path: p,
                        operation: operation.to_string(),
                    }
                } else {
                    FingerprintError::Io {
                        path: None,
                        operation: operation.to_string(),
                        source: err,
                    }
                }
            }
            _ => FingerprintError::Io {
                path,
                operation: operation.to_string(),
                source: err,
            },
        }
    }
}

impl From<io::Error> for FingerprintError {
    fn from(err: io::Error) -> Self {
        FingerprintError::from_io_error(err, "unknown operation", None)
    }
}
