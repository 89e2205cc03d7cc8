// Tests for digest module
// Algorithm registry and streaming file hashing

use std::fs;
use std::path::Path;

use dif::{AlgorithmRegistry, FileHasher, FingerprintError};

#[test]
fn test_hash_file_sha256() {
    let temp_file = "test_digest_sha256_temp.txt";
    fs::write(temp_file, b"hello world").unwrap();

    let hasher = FileHasher::new();
    let digest = hasher.hash_file(Path::new(temp_file), "sha256").unwrap();

    assert_eq!(
        digest,
        "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
    );

    fs::remove_file(temp_file).unwrap();
}

#[test]
fn test_hash_file_md5_and_sha1() {
    let temp_file = "test_digest_md5_sha1_temp.txt";
    fs::write(temp_file, b"hello world").unwrap();

    let hasher = FileHasher::new();
    let md5 = hasher.hash_file(Path::new(temp_file), "md5").unwrap();
    let sha1 = hasher.hash_file(Path::new(temp_file), "sha1").unwrap();

    assert_eq!(md5, "5eb63bbbe01eeed093cb22bb8f5acdc3");
    assert_eq!(sha1, "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed");

    fs::remove_file(temp_file).unwrap();
}

#[test]
fn test_hash_empty_file() {
    let temp_file = "test_digest_empty_temp.txt";
    fs::write(temp_file, b"").unwrap();

    let hasher = FileHasher::new();
    let digest = hasher.hash_file(Path::new(temp_file), "sha256").unwrap();

    // SHA-256 of the empty input
    assert_eq!(
        digest,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );

    fs::remove_file(temp_file).unwrap();
}

#[test]
fn test_hash_text_matches_file_content() {
    let temp_file = "test_digest_text_temp.txt";
    fs::write(temp_file, b"hello world").unwrap();

    let hasher = FileHasher::new();
    let from_file = hasher.hash_file(Path::new(temp_file), "sha256").unwrap();
    let from_text = hasher.hash_text("hello world", "sha256").unwrap();

    assert_eq!(from_file, from_text);

    fs::remove_file(temp_file).unwrap();
}

#[test]
fn test_streaming_independent_of_block_size() {
    // File larger than the default 64KB block
    let temp_file = "test_digest_blocks_temp.txt";
    let data = vec![b'a'; 100 * 1024];
    fs::write(temp_file, &data).unwrap();

    let default_blocks = FileHasher::new()
        .hash_file(Path::new(temp_file), "sha256")
        .unwrap();
    let small_blocks = FileHasher::with_block_size(4096)
        .hash_file(Path::new(temp_file), "sha256")
        .unwrap();

    assert_eq!(default_blocks.len(), 64);
    assert_eq!(default_blocks, small_blocks);

    fs::remove_file(temp_file).unwrap();
}

#[test]
fn test_file_not_found_error() {
    let hasher = FileHasher::new();
    let result = hasher.hash_file(Path::new("nonexistent_digest_file.txt"), "sha256");

    match result {
        Err(FingerprintError::FileNotFound { .. }) => {}
        Err(FingerprintError::Io { .. }) => {}
        other => panic!("Expected FileNotFound or Io, got {:?}", other),
    }
}

#[test]
fn test_unsupported_algorithm_error() {
    let result = AlgorithmRegistry::get_hasher("sha3000");

    match result {
        Err(FingerprintError::UnsupportedAlgorithm {
            algorithm,
            supported,
        }) => {
            assert_eq!(algorithm, "sha3000");
            assert!(supported.contains(&"sha256".to_string()));
            assert!(supported.contains(&"md5".to_string()));
        }
        other => panic!("Expected UnsupportedAlgorithm, got {:?}", other),
    }
}

#[test]
fn test_digest_lengths() {
    assert_eq!(AlgorithmRegistry::digest_length("md5").unwrap(), 32);
    assert_eq!(AlgorithmRegistry::digest_length("sha1").unwrap(), 40);
    assert_eq!(AlgorithmRegistry::digest_length("sha224").unwrap(), 56);
    assert_eq!(AlgorithmRegistry::digest_length("sha256").unwrap(), 64);
    assert_eq!(AlgorithmRegistry::digest_length("sha384").unwrap(), 96);
    assert_eq!(AlgorithmRegistry::digest_length("sha512").unwrap(), 128);
    assert_eq!(AlgorithmRegistry::digest_length("blake3").unwrap(), 64);
}

#[test]
fn test_supported_algorithms_cover_minimum_set() {
    let supported = AlgorithmRegistry::supported_algorithms();

    for name in ["md5", "sha1", "sha224", "sha256", "sha384", "sha512"] {
        assert!(supported.contains(&name.to_string()), "missing {}", name);
    }

    // Sorted for stable display
    let mut sorted = supported.clone();
    sorted.sort();
    assert_eq!(supported, sorted);
}

#[test]
fn test_algorithm_aliases_and_case() {
    let temp_file = "test_digest_alias_temp.txt";
    fs::write(temp_file, b"alias").unwrap();

    let hasher = FileHasher::new();
    let canonical = hasher.hash_file(Path::new(temp_file), "sha256").unwrap();
    let hyphenated = hasher.hash_file(Path::new(temp_file), "sha-256").unwrap();
    let uppercase = hasher.hash_file(Path::new(temp_file), "SHA256").unwrap();

    assert_eq!(canonical, hyphenated);
    assert_eq!(canonical, uppercase);

    fs::remove_file(temp_file).unwrap();
}

#[test]
fn test_algorithm_from_extension() {
    assert_eq!(
        AlgorithmRegistry::from_extension(Path::new("dataset.sha256")),
        Some("sha256".to_string())
    );
    assert_eq!(
        AlgorithmRegistry::from_extension(Path::new("dataset.sha256.xz")),
        Some("sha256".to_string())
    );
    assert_eq!(
        AlgorithmRegistry::from_extension(Path::new("dataset.md5")),
        Some("md5".to_string())
    );
    assert_eq!(AlgorithmRegistry::from_extension(Path::new("dataset.txt")), None);
    assert_eq!(AlgorithmRegistry::from_extension(Path::new("dataset")), None);
}

#[test]
fn test_list_algorithms_widths() {
    let infos = AlgorithmRegistry::list_algorithms();

    let sha256 = infos.iter().find(|i| i.name == "sha256").unwrap();
    assert_eq!(sha256.output_bits, 256);
    assert_eq!(sha256.hex_length, 64);

    for info in &infos {
        assert_eq!(info.hex_length, info.output_bits / 4);
    }
}
