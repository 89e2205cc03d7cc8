// Comparison module
// Classifies every path across two fingerprints as matching, mismatching
// or missing

use std::collections::HashMap;

use crate::fingerprint::Fingerprint;

/// Result of comparing a candidate fingerprint against a reference
///
/// `mismatching` holds candidate paths whose digest differs from the
/// reference or which the reference does not know at all; `missing`
/// holds reference paths absent from the candidate. Path lists are
/// sorted for deterministic output.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CompareReport {
    pub matching: Vec<String>,
    pub mismatching: Vec<String>,
    pub missing: Vec<String>,
}

impl CompareReport {
    /// Number of conflicting paths: mismatching plus missing
    pub fn conflicts(&self) -> usize {
        self.mismatching.len() + self.missing.len()
    }

    /// True when the candidate matches the reference exactly
    pub fn is_clean(&self) -> bool {
        self.conflicts() == 0
    }

    /// Display the comparison report in plain text format
    pub fn display(&self) {
        print!("{}", self.to_plain_text());
    }

    /// Format the comparison report as plain text string
    pub fn to_plain_text(&self) -> String {
        let mut output = String::new();

        output.push_str("\n=== Fingerprint Comparison Report ===\n\n");

        output.push_str("Summary:\n");
        output.push_str(&format!("  Matching:     {} files\n", self.matching.len()));
        output.push_str(&format!("  Mismatching:  {} files\n", self.mismatching.len()));
        output.push_str(&format!("  Missing:      {} files\n", self.missing.len()));
        output.push_str(&format!("  Conflicts:    {}\n", self.conflicts()));

        if self.is_clean() {
            output.push_str("\nNo conflicts. The candidate matches the reference.\n");
            return output;
        }

        if !self.mismatching.is_empty() {
            output.push_str("\nMismatching Files (changed, or unknown to the reference):\n");
            for path in &self.mismatching {
                output.push_str(&format!("  ! {}\n", path));
            }
        }

        if !self.missing.is_empty() {
            output.push_str("\nMissing Files (in reference but not in candidate):\n");
            for path in &self.missing {
                output.push_str(&format!("  - {}\n", path));
            }
        }

        output.push('\n');
        output
    }

    /// Format the comparison report as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        #[derive(serde::Serialize)]
        struct JsonOutput<'a> {
            metadata: Metadata,
            summary: Summary,
            matching: &'a [String],
            mismatching: &'a [String],
            missing: &'a [String],
        }

        #[derive(serde::Serialize)]
        struct Metadata {
            timestamp: String,
        }

        #[derive(serde::Serialize)]
        struct Summary {
            matching_count: usize,
            mismatching_count: usize,
            missing_count: usize,
            conflict_count: usize,
        }

        let output = JsonOutput {
            metadata: Metadata {
                timestamp: chrono::Utc::now().to_rfc3339(),
            },
            summary: Summary {
                matching_count: self.matching.len(),
                mismatching_count: self.mismatching.len(),
                missing_count: self.missing.len(),
                conflict_count: self.conflicts(),
            },
            matching: &self.matching,
            mismatching: &self.mismatching,
            missing: &self.missing,
        };

        serde_json::to_string_pretty(&output)
    }
}

/// Compare a candidate fingerprint against a reference.
///
/// Pure map comparison over the two entry sets; no I/O, linear in the
/// total number of distinct paths.
pub fn compare(candidate: &Fingerprint, reference: &Fingerprint) -> CompareReport {
    let reference_digests: HashMap<&str, &str> = reference
        .entries()
        .iter()
        .map(|entry| (entry.path.as_str(), entry.digest.as_str()))
        .collect();
    let candidate_paths: HashMap<&str, &str> = candidate
        .entries()
        .iter()
        .map(|entry| (entry.path.as_str(), entry.digest.as_str()))
        .collect();

    let mut matching = Vec::new();
    let mut mismatching = Vec::new();
    let mut missing = Vec::new();

    for entry in candidate.entries() {
        match reference_digests.get(entry.path.as_str()) {
            Some(digest) if *digest == entry.digest => matching.push(entry.path.clone()),
            _ => mismatching.push(entry.path.clone()),
        }
    }

    for entry in reference.entries() {
        if !candidate_paths.contains_key(entry.path.as_str()) {
            missing.push(entry.path.clone());
        }
    }

    matching.sort();
    mismatching.sort();
    missing.sort();

    CompareReport {
        matching,
        mismatching,
        missing,
    }
}
