// Fingerprint generation engine
// Dispatches per-file hashing over a bounded worker pool

use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam_channel::unbounded;
use rayon::prelude::*;

use crate::digest::{AlgorithmRegistry, FileHasher};
use crate::error::FingerprintError;
use crate::fingerprint::{FileEntry, Fingerprint};
use crate::walk;

/// Progress information emitted after each completed hash job.
///
/// Emission order reflects completion order, not enumeration order.
#[derive(Debug, Clone, serde::Serialize)]
pub struct GenerateProgress {
    pub files_completed: usize,
    pub files_total: usize,
    pub current_file: String,
}

/// Type alias for progress callback function
pub type ProgressCallback = Box<dyn Fn(GenerateProgress) + Send + Sync>;

/// Engine for generating fingerprints with bounded parallelism
///
/// The worker count defaults to the host's available parallelism; one
/// worker degenerates to strictly sequential execution. The callback
/// runs synchronously on whichever worker finished the job, so it must
/// be cheap; synchronizing callback side effects is the caller's
/// responsibility.
pub struct FingerprintEngine {
    hasher: FileHasher,
    workers: usize,
    progress_callback: Option<Arc<ProgressCallback>>,
}

impl FingerprintEngine {
    /// Create a new engine with default settings
    pub fn new() -> Self {
        Self {
            hasher: FileHasher::new(),
            workers: num_cpus::get(),
            progress_callback: None,
        }
    }

    /// Set the number of hashing workers (minimum one)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the block size used for streaming file reads
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.hasher = FileHasher::with_block_size(block_size);
        self
    }

    /// Set a progress callback function
    pub fn with_progress_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(GenerateProgress) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Arc::new(Box::new(callback)));
        self
    }

    /// Generate the fingerprint for a directory tree or single file.
    ///
    /// Every enumerated file is hashed exactly once. Results are
    /// collected in completion order and sorted once by the aggregator,
    /// so the master digest is independent of walk order, worker count
    /// and scheduling. The first hashing error aborts the run: no
    /// partial fingerprint is ever returned, and nothing is retried.
    pub fn generate(
        &self,
        root: &Path,
        algorithm: &str,
    ) -> Result<Fingerprint, FingerprintError> {
        // Reject unknown algorithms before touching the filesystem
        AlgorithmRegistry::validate(algorithm)?;

        let files = walk::enumerate(root)?;
        if files.is_empty() {
            return Fingerprint::from_entries(algorithm, Vec::new());
        }

        // The pool lives for exactly one run and is torn down on every
        // exit path when dropped.
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|e| FingerprintError::Io {
                path: None,
                operation: "building worker pool".to_string(),
                source: io::Error::new(io::ErrorKind::Other, e.to_string()),
            })?;

        let total = files.len();
        let completed = AtomicUsize::new(0);
        let (sender, receiver) = unbounded::<FileEntry>();

        let outcome: Result<(), FingerprintError> = pool.install(|| {
            files.par_iter().try_for_each_with(sender, |sender, file| {
                let digest = self.hasher.hash_file(&file.absolute, algorithm)?;
                let _ = sender.send(FileEntry {
                    digest,
                    path: file.relative.clone(),
                });

                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                if let Some(ref callback) = self.progress_callback {
                    callback(GenerateProgress {
                        files_completed: done,
                        files_total: total,
                        current_file: file.relative.clone(),
                    });
                }

                Ok(())
            })
        });
        outcome?;

        // Every sender is dropped once the pool returns, so this drains
        // the channel and stops.
        let entries: Vec<FileEntry> = receiver.into_iter().collect();
        Fingerprint::from_entries(algorithm, entries)
    }
}

impl Default for FingerprintEngine {
    fn default() -> Self {
        Self::new()
    }
}
