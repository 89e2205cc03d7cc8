// Tests for compare module
// Classification of matching, mismatching and missing paths

use dif::{compare, FileEntry, Fingerprint};

fn fingerprint(entries: &[(&str, &str)]) -> Fingerprint {
    let entries = entries
        .iter()
        .map(|(digest, path)| FileEntry {
            digest: digest.repeat(64),
            path: path.to_string(),
        })
        .collect();
    Fingerprint::from_entries("sha256", entries).unwrap()
}

#[test]
fn test_compare_reference_scenario() {
    // reference: {a.txt: 111..., b.txt: 222...}
    // candidate: {a.txt: 111..., c.txt: 333...}
    let reference = fingerprint(&[("1", "a.txt"), ("2", "b.txt")]);
    let candidate = fingerprint(&[("1", "a.txt"), ("3", "c.txt")]);

    let report = compare(&candidate, &reference);

    assert_eq!(report.matching, vec!["a.txt".to_string()]);
    assert_eq!(report.mismatching, vec!["c.txt".to_string()]);
    assert_eq!(report.missing, vec!["b.txt".to_string()]);
    assert_eq!(report.conflicts(), 2);
    assert!(!report.is_clean());
}

#[test]
fn test_compare_identical_fingerprints() {
    let reference = fingerprint(&[("1", "a.txt"), ("2", "b.txt"), ("3", "c.txt")]);
    let candidate = fingerprint(&[("1", "a.txt"), ("2", "b.txt"), ("3", "c.txt")]);

    let report = compare(&candidate, &reference);

    assert_eq!(report.matching.len(), 3);
    assert!(report.mismatching.is_empty());
    assert!(report.missing.is_empty());
    assert_eq!(report.conflicts(), 0);
    assert!(report.is_clean());
}

#[test]
fn test_compare_changed_digest_is_mismatching() {
    let reference = fingerprint(&[("1", "a.txt"), ("2", "b.txt")]);
    let candidate = fingerprint(&[("1", "a.txt"), ("9", "b.txt")]);

    let report = compare(&candidate, &reference);

    assert_eq!(report.matching, vec!["a.txt".to_string()]);
    assert_eq!(report.mismatching, vec!["b.txt".to_string()]);
    assert!(report.missing.is_empty());
    assert_eq!(report.conflicts(), 1);
}

#[test]
fn test_compare_empty_candidate() {
    let reference = fingerprint(&[("1", "a.txt"), ("2", "b.txt")]);
    let candidate = fingerprint(&[]);

    let report = compare(&candidate, &reference);

    assert!(report.matching.is_empty());
    assert!(report.mismatching.is_empty());
    assert_eq!(report.missing.len(), 2);
    assert_eq!(report.conflicts(), 2);
}

#[test]
fn test_compare_empty_reference() {
    let reference = fingerprint(&[]);
    let candidate = fingerprint(&[("1", "a.txt")]);

    let report = compare(&candidate, &reference);

    // Everything the candidate has is unknown to the reference
    assert!(report.matching.is_empty());
    assert_eq!(report.mismatching, vec!["a.txt".to_string()]);
    assert!(report.missing.is_empty());
    assert_eq!(report.conflicts(), 1);
}

#[test]
fn test_compare_output_is_sorted() {
    let reference = fingerprint(&[("1", "z.txt"), ("2", "a.txt"), ("3", "m.txt")]);
    let candidate = fingerprint(&[("9", "z.txt"), ("8", "a.txt"), ("7", "m.txt")]);

    let report = compare(&candidate, &reference);

    assert_eq!(
        report.mismatching,
        vec!["a.txt".to_string(), "m.txt".to_string(), "z.txt".to_string()]
    );
}

#[test]
fn test_report_plain_text() {
    let reference = fingerprint(&[("1", "a.txt"), ("2", "b.txt")]);
    let candidate = fingerprint(&[("1", "a.txt"), ("3", "c.txt")]);

    let text = compare(&candidate, &reference).to_plain_text();

    assert!(text.contains("Matching:     1 files"));
    assert!(text.contains("Mismatching:  1 files"));
    assert!(text.contains("Missing:      1 files"));
    assert!(text.contains("Conflicts:    2"));
    assert!(text.contains("! c.txt"));
    assert!(text.contains("- b.txt"));
}

#[test]
fn test_report_plain_text_clean() {
    let reference = fingerprint(&[("1", "a.txt")]);
    let candidate = fingerprint(&[("1", "a.txt")]);

    let text = compare(&candidate, &reference).to_plain_text();

    assert!(text.contains("No conflicts"));
}

#[test]
fn test_report_json() {
    let reference = fingerprint(&[("1", "a.txt"), ("2", "b.txt")]);
    let candidate = fingerprint(&[("1", "a.txt"), ("3", "c.txt")]);

    let json = compare(&candidate, &reference).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["summary"]["matching_count"], 1);
    assert_eq!(value["summary"]["mismatching_count"], 1);
    assert_eq!(value["summary"]["missing_count"], 1);
    assert_eq!(value["summary"]["conflict_count"], 2);
    assert_eq!(value["mismatching"][0], "c.txt");
    assert!(value["metadata"]["timestamp"].is_string());
}

#[test]
fn test_compare_round_trip_after_save_and_load() {
    use dif::ListingFile;
    use std::fs;
    use std::path::Path;

    let reference = fingerprint(&[("1", "a.txt"), ("2", "b.txt")]);
    let listing = "test_compare_round_trip.sha256";
    ListingFile::save(&reference, Path::new(listing)).unwrap();

    let loaded = ListingFile::load(Path::new(listing), "sha256").unwrap();
    let report = compare(&reference, &loaded);

    assert!(report.is_clean());
    assert_eq!(report.matching.len(), 2);

    fs::remove_file(listing).unwrap();
}
