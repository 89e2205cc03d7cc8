// Digest algorithm module
// Provides the algorithm registry and streaming file hashing

use std::fs::File;
use std::io::Read;
use std::path::Path;

use memmap2::Mmap;
use sha2::Digest;

use crate::error::FingerprintError;

/// Default algorithm used when the caller expresses no preference
pub const DEFAULT_ALGORITHM: &str = "sha256";

/// Trait for hash algorithm implementations
pub trait Hasher: Send + std::fmt::Debug {
    /// Update the hasher with new data
    fn update(&mut self, data: &[u8]);

    /// Finalize the hash and return the raw digest bytes
    fn finalize(self: Box<Self>) -> Vec<u8>;

    /// Get the output size in bytes
    fn output_size(&self) -> usize;
}

/// Adapter exposing any RustCrypto digest through the object-safe trait
struct RustCryptoHasher<D: Digest>(D);

impl<D: Digest> std::fmt::Debug for RustCryptoHasher<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RustCryptoHasher")
    }
}

impl<D: Digest + Send + 'static> Hasher for RustCryptoHasher<D> {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Digest::finalize(self.0).to_vec()
    }

    fn output_size(&self) -> usize {
        <D as Digest>::output_size()
    }
}

// blake3 does not implement the RustCrypto Digest trait, so it gets its
// own adapter over the crate's inherent API.
struct Blake3Hasher(blake3::Hasher);

impl std::fmt::Debug for Blake3Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Blake3Hasher")
    }
}

impl Hasher for Blake3Hasher {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.0.finalize().as_bytes().to_vec()
    }

    fn output_size(&self) -> usize {
        32 // 256 bits
    }
}

/// Information about a hash algorithm
#[derive(Debug, Clone, serde::Serialize)]
pub struct AlgorithmInfo {
    pub name: String,
    pub output_bits: usize,
    /// Length of the hex digest in characters, fixed per algorithm
    pub hex_length: usize,
}

// Canonical algorithm names and their output widths in bits. The set is
// closed: resolution happens once at construction, never per block.
const ALGORITHMS: &[(&str, usize)] = &[
    ("md5", 128),
    ("sha1", 160),
    ("sha224", 224),
    ("sha256", 256),
    ("sha384", 384),
    ("sha512", 512),
    ("sha3-224", 224),
    ("sha3-256", 256),
    ("sha3-384", 384),
    ("sha3-512", 512),
    ("blake2b-512", 512),
    ("blake2s-256", 256),
    ("blake3", 256),
];

/// Registry for hash algorithms
pub struct AlgorithmRegistry;

impl AlgorithmRegistry {
    /// Resolve a user-supplied name (aliases included) to its canonical form
    fn canonical_name(algorithm: &str) -> Result<&'static str, FingerprintError> {
        let lower = algorithm.to_lowercase();
        let name = match lower.as_str() {
            "md5" => "md5",
            "sha1" | "sha-1" => "sha1",
            "sha224" | "sha-224" => "sha224",
            "sha256" | "sha-256" => "sha256",
            "sha384" | "sha-384" => "sha384",
            "sha512" | "sha-512" => "sha512",
            "sha3-224" => "sha3-224",
            "sha3-256" => "sha3-256",
            "sha3-384" => "sha3-384",
            "sha3-512" => "sha3-512",
            "blake2b" | "blake2b-512" => "blake2b-512",
            "blake2s" | "blake2s-256" => "blake2s-256",
            "blake3" => "blake3",
            _ => {
                return Err(FingerprintError::UnsupportedAlgorithm {
                    algorithm: algorithm.to_string(),
                    supported: Self::supported_algorithms(),
                })
            }
        };
        Ok(name)
    }

    /// Check an algorithm name without constructing a hasher
    pub fn validate(algorithm: &str) -> Result<(), FingerprintError> {
        Self::canonical_name(algorithm).map(|_| ())
    }

    /// Get a fresh hasher instance for the specified algorithm
    pub fn get_hasher(algorithm: &str) -> Result<Box<dyn Hasher>, FingerprintError> {
        let hasher: Box<dyn Hasher> = match Self::canonical_name(algorithm)? {
            "md5" => Box::new(RustCryptoHasher(md5::Md5::new())),
            "sha1" => Box::new(RustCryptoHasher(sha1::Sha1::new())),
            "sha224" => Box::new(RustCryptoHasher(sha2::Sha224::new())),
            "sha256" => Box::new(RustCryptoHasher(sha2::Sha256::new())),
            "sha384" => Box::new(RustCryptoHasher(sha2::Sha384::new())),
            "sha512" => Box::new(RustCryptoHasher(sha2::Sha512::new())),
            "sha3-224" => Box::new(RustCryptoHasher(sha3::Sha3_224::new())),
            "sha3-256" => Box::new(RustCryptoHasher(sha3::Sha3_256::new())),
            "sha3-384" => Box::new(RustCryptoHasher(sha3::Sha3_384::new())),
            "sha3-512" => Box::new(RustCryptoHasher(sha3::Sha3_512::new())),
            "blake2b-512" => Box::new(RustCryptoHasher(blake2::Blake2b512::new())),
            "blake2s-256" => Box::new(RustCryptoHasher(blake2::Blake2s256::new())),
            "blake3" => Box::new(Blake3Hasher(blake3::Hasher::new())),
            _ => unreachable!("canonical_name returns only registry entries"),
        };
        Ok(hasher)
    }

    /// Length of the hex digest for the specified algorithm, in characters
    pub fn digest_length(algorithm: &str) -> Result<usize, FingerprintError> {
        let name = Self::canonical_name(algorithm)?;
        let bits = ALGORITHMS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, bits)| *bits)
            .expect("canonical name is in the registry table");
        Ok(bits / 4)
    }

    /// List all supported algorithm names, sorted
    pub fn supported_algorithms() -> Vec<String> {
        let mut names: Vec<String> = ALGORITHMS.iter().map(|(n, _)| n.to_string()).collect();
        names.sort();
        names
    }

    /// List all supported algorithms with their digest widths
    pub fn list_algorithms() -> Vec<AlgorithmInfo> {
        ALGORITHMS
            .iter()
            .map(|(name, bits)| AlgorithmInfo {
                name: name.to_string(),
                output_bits: *bits,
                hex_length: bits / 4,
            })
            .collect()
    }

    /// Infer the algorithm from a listing file name, e.g. "data.sha256".
    /// A trailing ".xz" compression suffix is ignored.
    pub fn from_extension(path: &Path) -> Option<String> {
        let mut path = path.to_path_buf();
        if path.extension().and_then(|e| e.to_str()) == Some("xz") {
            path = path.with_extension("");
        }
        let ext = path.extension()?.to_str()?;
        Self::canonical_name(ext).ok().map(|name| name.to_string())
    }
}

// Block size for streaming reads: large enough to amortize syscall
// overhead, small enough to bound peak memory for huge files.
const DEFAULT_BLOCK_SIZE: usize = 64 * 1024;

// Files below this size are memory mapped instead of read in blocks.
const MMAP_THRESHOLD: u64 = 2 * 1024 * 1024 * 1024; // 2GB

/// File hasher with streaming I/O
///
/// For files smaller than 2GB, memory maps the file to avoid
/// kernel-to-userspace copy overhead. Larger files fall back to buffered
/// reading in fixed-size blocks. Reading is strictly sequential per file.
pub struct FileHasher {
    block_size: usize,
}

impl FileHasher {
    /// Create a new FileHasher with the default 64KB block size
    pub fn new() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }

    /// Create a new FileHasher with a custom block size
    pub fn with_block_size(block_size: usize) -> Self {
        Self { block_size }
    }

    /// Stream one file through a fresh hasher and return its hex digest
    pub fn hash_file(&self, path: &Path, algorithm: &str) -> Result<String, FingerprintError> {
        let mut hasher = AlgorithmRegistry::get_hasher(algorithm)?;

        let file = File::open(path).map_err(|e| {
            FingerprintError::from_io_error(e, "reading", Some(path.to_path_buf()))
        })?;

        let file_size = file
            .metadata()
            .map_err(|e| {
                FingerprintError::from_io_error(e, "reading metadata", Some(path.to_path_buf()))
            })?
            .len();

        if file_size > 0 && file_size < MMAP_THRESHOLD {
            match unsafe { Mmap::map(&file) } {
                Ok(mmap) => hasher.update(&mmap[..]),
                Err(_) => self.hash_blocks(&mut hasher, file, path)?,
            }
        } else {
            self.hash_blocks(&mut hasher, file, path)?;
        }

        Ok(bytes_to_hex(&hasher.finalize()))
    }

    /// Hash a text string (UTF-8 bytes) and return its hex digest
    pub fn hash_text(&self, text: &str, algorithm: &str) -> Result<String, FingerprintError> {
        let mut hasher = AlgorithmRegistry::get_hasher(algorithm)?;
        hasher.update(text.as_bytes());
        Ok(bytes_to_hex(&hasher.finalize()))
    }

    fn hash_blocks(
        &self,
        hasher: &mut Box<dyn Hasher>,
        mut file: File,
        path: &Path,
    ) -> Result<(), FingerprintError> {
        let mut buffer = vec![0u8; self.block_size];

        loop {
            let bytes_read = file.read(&mut buffer).map_err(|e| {
                FingerprintError::from_io_error(e, "reading", Some(path.to_path_buf()))
            })?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(())
    }
}

impl Default for FileHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert raw digest bytes to a lowercase hexadecimal string
fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
