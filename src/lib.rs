// Data Integrity Fingerprint library
// Deterministic directory-tree fingerprints: enumeration, parallel
// hashing, canonical aggregation, listing I/O and comparison

pub mod compare;
pub mod digest;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod listing;
pub mod path_utils;
pub mod walk;

// Re-export commonly used types for convenience
pub use compare::{compare, CompareReport};
pub use digest::{AlgorithmInfo, AlgorithmRegistry, FileHasher, Hasher, DEFAULT_ALGORITHM};
pub use engine::{FingerprintEngine, GenerateProgress, ProgressCallback};
pub use error::FingerprintError;
pub use fingerprint::{suggested_listing_name, FileEntry, Fingerprint, LISTING_SEPARATOR};
pub use listing::ListingFile;
pub use walk::{enumerate, WalkedFile};
