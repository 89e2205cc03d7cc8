// Checksum listing file handler
// Reads and writes the canonical listing format, with optional xz compression

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use xz2::read::XzDecoder;
use xz2::write::XzEncoder;

use crate::digest::AlgorithmRegistry;
use crate::error::FingerprintError;
use crate::fingerprint::{FileEntry, Fingerprint, LISTING_SEPARATOR};

/// Handler for reading and writing checksum listing files
///
/// The on-disk format is bit-exact UTF-8 text: one
/// `<digest><two spaces><relative/path>` line per file, lines in
/// canonical (digest, path) order, trailing newline on every line. No
/// header and no embedded algorithm tag; the algorithm is inferred
/// externally (conventionally from the file extension) and passed in
/// explicitly when loading.
pub struct ListingFile;

impl ListingFile {
    /// Check if a path has .xz extension (compressed listing)
    pub fn is_compressed(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext == "xz")
            .unwrap_or(false)
    }

    /// Open a listing file, automatically decompressing if it has .xz
    /// extension
    pub fn open_reader(path: &Path) -> Result<Box<dyn BufRead>, FingerprintError> {
        let file = File::open(path).map_err(|e| {
            FingerprintError::from_io_error(e, "opening listing", Some(path.to_path_buf()))
        })?;

        if Self::is_compressed(path) {
            Ok(Box::new(BufReader::new(XzDecoder::new(file))))
        } else {
            Ok(Box::new(BufReader::new(file)))
        }
    }

    /// Compress a listing file with LZMA, creating a sibling with an
    /// added .xz extension
    pub fn compress_listing(input_path: &Path) -> Result<PathBuf, FingerprintError> {
        let input_file = File::open(input_path).map_err(|e| {
            FingerprintError::from_io_error(
                e,
                "opening listing for compression",
                Some(input_path.to_path_buf()),
            )
        })?;

        let output_path = match input_path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => input_path.with_extension(format!("{}.xz", ext)),
            None => input_path.with_extension("xz"),
        };

        let output_file = File::create(&output_path).map_err(|e| {
            FingerprintError::from_io_error(
                e,
                "creating compressed listing",
                Some(output_path.clone()),
            )
        })?;

        // Compression level 6: good balance of speed and ratio
        let mut encoder = XzEncoder::new(output_file, 6);
        let mut reader = BufReader::new(input_file);
        std::io::copy(&mut reader, &mut encoder).map_err(|e| {
            FingerprintError::from_io_error(e, "compressing listing", Some(input_path.to_path_buf()))
        })?;
        encoder.finish().map_err(|e| {
            FingerprintError::from_io_error(e, "finalizing compression", Some(output_path.clone()))
        })?;

        Ok(output_path)
    }

    /// Write a fingerprint's canonical listing to a file
    pub fn save(fingerprint: &Fingerprint, output: &Path) -> Result<(), FingerprintError> {
        let file = File::create(output).map_err(|e| {
            FingerprintError::from_io_error(e, "creating listing file", Some(output.to_path_buf()))
        })?;
        let mut writer = std::io::BufWriter::new(file);

        writer
            .write_all(fingerprint.listing_text().as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| {
                FingerprintError::from_io_error(e, "writing listing", Some(output.to_path_buf()))
            })
    }

    /// Load a fingerprint from a checksum listing file.
    ///
    /// Any malformed line fails the whole parse: a listing that silently
    /// loses entries would verify less than the caller believes.
    pub fn load(path: &Path, algorithm: &str) -> Result<Fingerprint, FingerprintError> {
        let digest_length = AlgorithmRegistry::digest_length(algorithm)?;
        let reader = Self::open_reader(path)?;

        let mut entries = Vec::new();
        for (line_index, line_result) in reader.lines().enumerate() {
            let line = line_result.map_err(|e| {
                FingerprintError::from_io_error(e, "reading listing", Some(path.to_path_buf()))
            })?;

            let entry = Self::parse_line(&line, digest_length).map_err(|reason| {
                FingerprintError::MalformedListing {
                    path: path.to_path_buf(),
                    line: line_index + 1,
                    reason,
                }
            })?;
            entries.push(entry);
        }

        // Re-sorting on load keeps round trips byte-identical even for
        // listings written by tools with a different ordering.
        Fingerprint::from_entries(algorithm, entries)
    }

    /// Parse a single listing line with a fixed-width digest field.
    ///
    /// The digest length is known and constant per algorithm, so paths
    /// containing consecutive spaces parse unambiguously (a split on the
    /// first two-space run would not).
    pub fn parse_line(line: &str, digest_length: usize) -> Result<FileEntry, String> {
        let bytes = line.as_bytes();
        let separator = LISTING_SEPARATOR.as_bytes();

        if bytes.len() < digest_length + separator.len() + 1 {
            return Err(format!(
                "expected a {}-character digest, two spaces and a path",
                digest_length
            ));
        }

        if !bytes[..digest_length]
            .iter()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        {
            return Err("digest field is not lowercase hexadecimal".to_string());
        }

        if &bytes[digest_length..digest_length + separator.len()] != separator {
            return Err("missing two-space separator after digest".to_string());
        }

        // The digest field is all ASCII, so these byte offsets are valid
        // character boundaries.
        Ok(FileEntry {
            digest: line[..digest_length].to_string(),
            path: line[digest_length + separator.len()..].to_string(),
        })
    }
}
