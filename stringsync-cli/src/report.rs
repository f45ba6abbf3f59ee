//! Tabular report files for one locale's comparison: unique keys per
//! platform, exact matches, and differences with their safety flags.

use std::path::{Path, PathBuf};

use stringsync::{ComparisonRecord, LocalizationReport, StringCatalog};

const UNIQUE_ANDROID_STRINGS_FILE: &str = "unique-android-strings.csv";
const UNIQUE_IOS_STRINGS_FILE: &str = "unique-ios-strings.csv";
const EXACT_MATCH_FILE: &str = "exact-matches.csv";
const DIFFERENCES_FILE: &str = "differences.csv";

/// Writes the four report files for one locale into `output_dir`.
/// Returns the number of placeholder-mismatch warnings found.
pub fn write_reports(output_dir: &Path, report: &LocalizationReport) -> Result<usize, String> {
    write_unique(
        &output_dir.join(UNIQUE_ANDROID_STRINGS_FILE),
        &["Android Key", "Android Value"],
        &report.unique_to_source,
    )?;
    write_unique(
        &output_dir.join(UNIQUE_IOS_STRINGS_FILE),
        &["iOS Key", "iOS Value"],
        &report.unique_to_reference,
    )?;
    write_exact_matches(output_dir, report)?;
    write_differences(output_dir, report)
}

fn csv_writer(path: &Path) -> Result<csv::Writer<std::fs::File>, String> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .from_path(path)
        .map_err(|e| format!("Failed to create report '{}': {}", path.display(), e))
}

fn finish(mut writer: csv::Writer<std::fs::File>, path: &Path) -> Result<(), String> {
    writer
        .flush()
        .map_err(|e| format!("Failed to write report '{}': {}", path.display(), e))
}

fn write_row(
    writer: &mut csv::Writer<std::fs::File>,
    path: &Path,
    row: &[&str],
) -> Result<(), String> {
    writer
        .write_record(row)
        .map_err(|e| format!("Failed to write report '{}': {}", path.display(), e))
}

fn write_unique(path: &Path, header: &[&str], catalog: &StringCatalog) -> Result<(), String> {
    let mut writer = csv_writer(path)?;
    write_row(&mut writer, path, header)?;
    for (key, value) in catalog.iter() {
        write_row(&mut writer, path, &[key.as_str(), value.as_str()])?;
    }
    finish(writer, path)
}

fn write_exact_matches(output_dir: &Path, report: &LocalizationReport) -> Result<(), String> {
    let path = output_dir.join(EXACT_MATCH_FILE);
    let mut matches = report.exact_matches();
    matches.sort_by(|a, b| a.key.cmp(&b.key));

    let mut writer = csv_writer(&path)?;
    write_row(&mut writer, &path, &["Key", "Android Value", "iOS Value"])?;
    for record in matches {
        write_row(
            &mut writer,
            &path,
            &[
                record.key.as_str(),
                record.source_value.as_str(),
                record.reference_value.as_str(),
            ],
        )?;
    }
    finish(writer, &path)
}

fn write_differences(output_dir: &Path, report: &LocalizationReport) -> Result<usize, String> {
    let differences = sorted_differences(report);
    let warnings = report.mismatched_placeholders().len();

    let path = differences_path(output_dir, warnings);
    let mut writer = csv_writer(&path)?;
    write_row(
        &mut writer,
        &path,
        &[
            "Key",
            "Android Value",
            "iOS Value",
            "Has Mismatched Placeholder",
            "Is Case Insensitive Match",
        ],
    )?;
    for record in differences {
        let mismatch = record.has_placeholder_mismatch.to_string();
        let case_insensitive = record.is_case_insensitive_match.to_string();
        write_row(
            &mut writer,
            &path,
            &[
                record.key.as_str(),
                record.source_value.as_str(),
                record.reference_value.as_str(),
                mismatch.as_str(),
                case_insensitive.as_str(),
            ],
        )?;
    }
    finish(writer, &path)?;
    Ok(warnings)
}

/// Presentation order: mismatched placeholders first, then case-insensitive
/// matches, then key ascending.
fn sorted_differences(report: &LocalizationReport) -> Vec<&ComparisonRecord> {
    let mut differences = report.differences();
    differences.sort_by(|a, b| {
        b.has_placeholder_mismatch
            .cmp(&a.has_placeholder_mismatch)
            .then(b.is_case_insensitive_match.cmp(&a.is_case_insensitive_match))
            .then(a.key.cmp(&b.key))
    });
    differences
}

/// The differences file name carries the warning count when placeholder
/// mismatches were detected, so they are impossible to miss in a file browser.
fn differences_path(output_dir: &Path, warnings: usize) -> PathBuf {
    if warnings > 0 {
        output_dir.join(format!("{} WARNINGS - {}", warnings, DIFFERENCES_FILE))
    } else {
        output_dir.join(DIFFERENCES_FILE)
    }
}
