//! Document-level operations: synchronizing an Android document from
//! reference-platform values, and merging locale values into a base template.
//!
//! Both operations mutate the caller-owned [`StringsDocument`] in place and
//! return a report describing what happened. They hold no state across calls
//! and are deterministic for a given set of inputs.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    analyzer::ComparisonRecord,
    catalog::StringCatalog,
    formats::android_strings::{DocumentNode, StringsDocument},
    sanitize::{TextReplacement, sanitize},
};

/// The default placeholder rewrite rules: Android specifiers become the
/// iOS-style `%@` and escaped percents collapse.
pub fn default_replacements() -> Vec<TextReplacement> {
    vec![
        TextReplacement::new("%d", "%@"),
        TextReplacement::new("%s", "%@"),
        TextReplacement::new("%f", "%@"),
        TextReplacement::new("%%", "%"),
    ]
}

/// Options controlling document synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// When true (the default), an entry whose placeholder counts differ
    /// between platforms is left untouched instead of being overwritten.
    pub block_on_placeholder_mismatch: bool,
    /// Ordered sanitizer rules applied to every reference value before it is
    /// written into the document.
    pub rules: Vec<TextReplacement>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions {
            block_on_placeholder_mismatch: true,
            rules: default_replacements(),
        }
    }
}

/// A replacement withheld by the placeholder-mismatch safety gate.
/// Deliberate no-op, not an error: blindly applying it could corrupt
/// runtime formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockedReplacement {
    pub key: String,
    pub source_placeholders: usize,
    pub reference_placeholders: usize,
}

/// Outcome of one synchronization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Entries whose value was overwritten with the sanitized reference value.
    pub replaced: usize,
    /// Replacements withheld by the placeholder-mismatch gate.
    pub blocked: Vec<BlockedReplacement>,
    /// Difference keys with no matching entry in the document. Tolerated
    /// drift between the document and the catalog parsed from it.
    pub missing: Vec<String>,
}

/// Rewrites `document` entries named by `differences` with the sanitized
/// reference value, honoring the placeholder-mismatch block policy.
///
/// Entries not mentioned in `differences` are left byte-for-byte untouched.
pub fn synchronize_document(
    document: &mut StringsDocument,
    differences: &[&ComparisonRecord],
    options: &SyncOptions,
) -> SyncReport {
    // One pass to index entry positions, so the whole sync is O(n + d).
    // Duplicate keys resolve to the last occurrence, like the catalogs.
    let index: HashMap<String, usize> = document
        .nodes
        .iter()
        .enumerate()
        .filter_map(|(position, node)| match node {
            DocumentNode::Entry(entry) => Some((entry.name.clone(), position)),
            DocumentNode::Comment(_) => None,
        })
        .collect();

    let mut report = SyncReport::default();

    for record in differences {
        if record.has_placeholder_mismatch && options.block_on_placeholder_mismatch {
            report.blocked.push(BlockedReplacement {
                key: record.key.clone(),
                source_placeholders: record.source_placeholder_count,
                reference_placeholders: record.reference_placeholder_count,
            });
            continue;
        }

        let Some(&position) = index.get(&record.key) else {
            report.missing.push(record.key.clone());
            continue;
        };

        if let DocumentNode::Entry(entry) = &mut document.nodes[position] {
            entry.value = sanitize(&record.reference_value, &options.rules);
            report.replaced += 1;
        }
    }

    report
}

/// Outcome of one template merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Non-translatable entries removed from the document.
    pub removed: usize,
    /// Entries filled with a value from the other locale.
    pub filled: usize,
    /// Entries blanked because the other locale has no value for the key.
    pub blanked: usize,
}

/// Rewrites a base/template document with values from another locale of the
/// same platform.
///
/// Entries flagged `translatable="false"` are removed entirely: untranslatable
/// strings have no cross-locale equivalent and must not appear in generated
/// locale variants. Remaining entries take the other locale's value, or the
/// empty string when the key is untranslated there. Keys present only in
/// `other_locale` are ignored; the template's key set is authoritative.
pub fn merge_template(template: &mut StringsDocument, other_locale: &StringCatalog) -> MergeReport {
    let mut report = MergeReport::default();

    template.nodes.retain_mut(|node| match node {
        DocumentNode::Entry(entry) => {
            if !entry.is_translatable() {
                report.removed += 1;
                return false;
            }
            match other_locale.get(&entry.name) {
                Some(value) => {
                    entry.value = value.to_string();
                    report.filled += 1;
                }
                None => {
                    entry.value.clear();
                    report.blanked += 1;
                }
            }
            true
        }
        DocumentNode::Comment(_) => true,
    });

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{analyzer::compare, traits::Parser};
    use indoc::indoc;

    const ORIGINAL_XML: &str = indoc! {r#"
        <resources>
            <string name="android_only" translatable="false">wont be overridden</string>
            <string name="another_android_only">wont be overridden</string>
            <!-- Comments are not stripped -->
            <string name="shared_key_1">To Be Replaced 1</string>
            <string name="shared_key_2">To Be Replaced 2</string>
            <string name="shared_key_3">To Be Replaced 3</string>
        </resources>
    "#};

    fn catalog(pairs: &[(&str, &str)]) -> StringCatalog {
        pairs.iter().copied().collect()
    }

    fn differences_for(
        android: &[(&str, &str)],
        ios: &[(&str, &str)],
    ) -> Vec<ComparisonRecord> {
        compare(&catalog(android), &catalog(ios))
            .differences()
            .into_iter()
            .cloned()
            .collect()
    }

    fn value_of(document: &StringsDocument, name: &str) -> String {
        document
            .entries()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value.clone())
            .unwrap_or_else(|| panic!("no entry named {}", name))
    }

    #[test]
    fn test_synchronize_replaces_differences_with_sanitized_values() {
        let mut document = StringsDocument::from_str(ORIGINAL_XML).unwrap();
        let differences = differences_for(
            &[
                ("shared_key_1", "To Be Replaced 1"),
                ("shared_key_2", "To Be Replaced %d and %s"),
            ],
            &[
                ("shared_key_1", "ios replacement 1"),
                ("shared_key_2", "ios values sanitized %@ and %s"),
            ],
        );
        let refs: Vec<&ComparisonRecord> = differences.iter().collect();

        let report = synchronize_document(&mut document, &refs, &SyncOptions::default());

        assert_eq!(report.replaced, 2);
        assert!(report.blocked.is_empty());
        assert_eq!(value_of(&document, "shared_key_1"), "ios replacement 1");
        assert_eq!(
            value_of(&document, "shared_key_2"),
            "ios values sanitized %@ and %@"
        );
        // Untouched entries keep their values.
        assert_eq!(value_of(&document, "android_only"), "wont be overridden");
    }

    #[test]
    fn test_block_policy_withholds_mismatched_placeholders() {
        let mut document = StringsDocument::from_str(ORIGINAL_XML).unwrap();
        let differences = differences_for(
            &[("shared_key_3", "You have %d items in %s")],
            &[("shared_key_3", "You have %@ items")],
        );
        let refs: Vec<&ComparisonRecord> = differences.iter().collect();

        let report = synchronize_document(&mut document, &refs, &SyncOptions::default());

        assert_eq!(report.replaced, 0);
        assert_eq!(report.blocked.len(), 1);
        assert_eq!(report.blocked[0].key, "shared_key_3");
        assert_eq!(report.blocked[0].source_placeholders, 2);
        assert_eq!(report.blocked[0].reference_placeholders, 1);
        assert_eq!(value_of(&document, "shared_key_3"), "To Be Replaced 3");
    }

    #[test]
    fn test_block_policy_irrelevant_without_mismatches() {
        let differences = differences_for(
            &[("shared_key_1", "old")],
            &[("shared_key_1", "new")],
        );
        let refs: Vec<&ComparisonRecord> = differences.iter().collect();

        let mut blocked = StringsDocument::from_str(ORIGINAL_XML).unwrap();
        let mut unblocked = StringsDocument::from_str(ORIGINAL_XML).unwrap();
        synchronize_document(&mut blocked, &refs, &SyncOptions::default());
        synchronize_document(
            &mut unblocked,
            &refs,
            &SyncOptions {
                block_on_placeholder_mismatch: false,
                ..SyncOptions::default()
            },
        );

        assert_eq!(blocked, unblocked);
    }

    #[test]
    fn test_unblocked_mismatch_is_applied() {
        let mut document = StringsDocument::from_str(ORIGINAL_XML).unwrap();
        let differences = differences_for(
            &[("shared_key_3", "%d things")],
            &[("shared_key_3", "no placeholders")],
        );
        let refs: Vec<&ComparisonRecord> = differences.iter().collect();

        let report = synchronize_document(
            &mut document,
            &refs,
            &SyncOptions {
                block_on_placeholder_mismatch: false,
                ..SyncOptions::default()
            },
        );

        assert_eq!(report.replaced, 1);
        assert_eq!(value_of(&document, "shared_key_3"), "no placeholders");
    }

    #[test]
    fn test_key_missing_from_document_is_skipped() {
        let mut document = StringsDocument::from_str(ORIGINAL_XML).unwrap();
        let differences = differences_for(
            &[("not_in_document", "a")],
            &[("not_in_document", "b")],
        );
        let refs: Vec<&ComparisonRecord> = differences.iter().collect();

        let report = synchronize_document(&mut document, &refs, &SyncOptions::default());
        assert_eq!(report.replaced, 0);
        assert_eq!(report.missing, vec!["not_in_document".to_string()]);
    }

    #[test]
    fn test_merge_removes_untranslatable_and_fills_common_keys() {
        let mut template = StringsDocument::from_str(ORIGINAL_XML).unwrap();
        let french = catalog(&[
            ("shared_key_1", "French Value 1"),
            ("shared_key_2", "French Value 2"),
            ("shared_key_3", "French Value 3"),
            ("french_only", "ignored"),
        ]);

        let report = merge_template(&mut template, &french);

        assert_eq!(report.removed, 1);
        assert_eq!(report.filled, 3);
        assert_eq!(report.blanked, 1);
        assert!(template.entries().all(|entry| entry.name != "android_only"));
        assert_eq!(value_of(&template, "shared_key_1"), "French Value 1");
        assert_eq!(value_of(&template, "another_android_only"), "");
        // Keys only in the other locale are not added.
        assert!(template.entries().all(|entry| entry.name != "french_only"));
    }

    #[test]
    fn test_merge_with_empty_locale_blanks_every_translatable_entry() {
        let mut template = StringsDocument::from_str(ORIGINAL_XML).unwrap();
        let report = merge_template(&mut template, &StringCatalog::new("fr"));

        assert_eq!(report.removed, 1);
        assert_eq!(report.filled, 0);
        assert_eq!(report.blanked, 4);
        assert!(template.entries().all(|entry| entry.value.is_empty()));
    }

    #[test]
    fn test_merge_preserves_comments() {
        let mut template = StringsDocument::from_str(ORIGINAL_XML).unwrap();
        merge_template(&mut template, &StringCatalog::new("fr"));
        assert!(template.nodes.iter().any(|node| matches!(
            node,
            DocumentNode::Comment(text) if text.contains("Comments are not stripped")
        )));
    }

    #[test]
    fn test_merged_template_serializes_blanked_entries_explicitly() {
        let mut template = StringsDocument::from_str(ORIGINAL_XML).unwrap();
        merge_template(&mut template, &StringCatalog::new("fr"));

        let mut out = Vec::new();
        template.to_writer(&mut out).unwrap();
        let out_str = String::from_utf8(out).unwrap();
        assert!(out_str.contains("<string name=\"another_android_only\"></string>"));
    }
}
