//! The comparison engine: diffs two platform catalogs for one locale and
//! produces a [`LocalizationReport`].
//!
//! The source catalog is typically the Android side and the reference catalog
//! the iOS side, which is treated as the source of truth when resolving
//! differences downstream. The comparison itself is symmetric data: swapping
//! the inputs swaps the per-key source/reference values.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{catalog::StringCatalog, placeholder::count_placeholders};

/// Per-shared-key comparison metadata. Derived once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRecord {
    pub key: String,
    pub source_value: String,
    pub reference_value: String,

    /// Plain value equality, not locale-aware.
    pub is_exact_match: bool,

    /// True only when the values are not exactly equal but their lowercase
    /// forms are. Simple lowercase comparison; no locale case folding.
    pub is_case_insensitive_match: bool,

    pub source_placeholder_count: usize,
    pub reference_placeholder_count: usize,

    /// Placeholder counts differ. Drives the synchronizer's safety gate,
    /// not an error in itself.
    pub has_placeholder_mismatch: bool,

    /// Optional telemetry: `1.0 − normalized Levenshtein distance`.
    /// `None` for exact matches, where the distance is zero by definition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,
}

impl ComparisonRecord {
    fn build(key: &str, source_value: &str, reference_value: &str) -> Self {
        let is_exact_match = source_value == reference_value;
        let is_case_insensitive_match =
            !is_exact_match && source_value.to_lowercase() == reference_value.to_lowercase();
        let source_placeholder_count = count_placeholders(source_value);
        let reference_placeholder_count = count_placeholders(reference_value);
        let similarity = if is_exact_match {
            None
        } else {
            Some(similarity_score(source_value, reference_value))
        };

        ComparisonRecord {
            key: key.to_string(),
            source_value: source_value.to_string(),
            reference_value: reference_value.to_string(),
            is_exact_match,
            is_case_insensitive_match,
            source_placeholder_count,
            reference_placeholder_count,
            has_placeholder_mismatch: source_placeholder_count != reference_placeholder_count,
            similarity,
        }
    }
}

/// The full comparison result for one catalog pair. Built once, read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalizationReport {
    /// Entries whose keys exist only in the source catalog.
    pub unique_to_source: StringCatalog,
    /// Entries whose keys exist only in the reference catalog.
    pub unique_to_reference: StringCatalog,
    /// Source catalog restricted to the shared keys.
    pub common_source: StringCatalog,
    /// Reference catalog restricted to the shared keys.
    pub common_reference: StringCatalog,
    /// One record per shared key.
    pub comparisons: BTreeMap<String, ComparisonRecord>,
}

impl LocalizationReport {
    /// Records whose values are not exactly equal.
    ///
    /// No particular order is promised beyond key order; consumers own any
    /// presentation sort (e.g. mismatched placeholders first).
    pub fn differences(&self) -> Vec<&ComparisonRecord> {
        self.comparisons
            .values()
            .filter(|record| !record.is_exact_match)
            .collect()
    }

    pub fn exact_matches(&self) -> Vec<&ComparisonRecord> {
        self.comparisons
            .values()
            .filter(|record| record.is_exact_match)
            .collect()
    }

    /// Differences whose placeholder counts disagree between platforms.
    pub fn mismatched_placeholders(&self) -> Vec<&ComparisonRecord> {
        self.comparisons
            .values()
            .filter(|record| record.has_placeholder_mismatch)
            .collect()
    }
}

/// Compares two catalogs and builds the full report.
///
/// An absent key on either side simply yields no [`ComparisonRecord`];
/// asymmetric key sets are expected data, not an error. The result is
/// deterministic for a given pair of catalogs.
pub fn compare(source: &StringCatalog, reference: &StringCatalog) -> LocalizationReport {
    let common_source = source.common_with(reference);
    let common_reference = reference.common_with(source);

    let comparisons = common_source
        .iter()
        .map(|(key, source_value)| {
            let reference_value = common_reference.get(key).unwrap_or_default();
            (
                key.clone(),
                ComparisonRecord::build(key, source_value, reference_value),
            )
        })
        .collect();

    LocalizationReport {
        unique_to_source: source.not_present_in(reference),
        unique_to_reference: reference.not_present_in(source),
        common_source,
        common_reference,
        comparisons,
    }
}

fn similarity_score(a: &str, b: &str) -> f32 {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let max_len = a_len.max(b_len);
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f32 / max_len as f32
}

// Two-row dynamic-programming edit distance over chars.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(prev[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut prev, &mut current);
    }

    prev[b.len()]
}
