//! The `diff` command: compare a single Android/iOS file pair and render
//! the comparison as human-readable text or JSON.

use std::path::Path;

use serde_json::json;
use stringsync::formats::ios_strings;
use stringsync::traits::Parser;
use stringsync::{LocalizationReport, compare};

use crate::validation::{validate_file_path, validate_output_path};

#[derive(Debug, Clone)]
pub struct DiffOptions {
    pub android: String,
    pub ios: String,
    pub output: Option<String>,
    pub json: bool,
}

fn print_or_write(output: Option<&String>, content: &str) -> Result<(), String> {
    if let Some(path) = output {
        std::fs::write(path, content).map_err(|e| format!("Failed to write {}: {}", path, e))?;
        println!("Report written: {}", path);
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn render_human(report: &LocalizationReport) -> String {
    let mut lines = Vec::new();
    lines.push("=== Diff ===".to_string());
    lines.push(format!("Android-only keys: {}", report.unique_to_source.len()));
    lines.push(format!("iOS-only keys: {}", report.unique_to_reference.len()));
    lines.push(format!("Shared keys: {}", report.comparisons.len()));
    lines.push(format!("Exact matches: {}", report.exact_matches().len()));
    lines.push(format!("Differences: {}", report.differences().len()));

    if !report.unique_to_source.is_empty() {
        let keys: Vec<_> = report.unique_to_source.keys().cloned().collect();
        lines.push(format!("\nAndroid-only: {}", keys.join(", ")));
    }
    if !report.unique_to_reference.is_empty() {
        let keys: Vec<_> = report.unique_to_reference.keys().cloned().collect();
        lines.push(format!("\niOS-only: {}", keys.join(", ")));
    }

    let differences = report.differences();
    if !differences.is_empty() {
        lines.push("\nDiffering values:".to_string());
        for record in differences {
            let marker = if record.has_placeholder_mismatch {
                " [placeholder mismatch]"
            } else {
                ""
            };
            lines.push(format!(
                "  {}: '{}' vs '{}'{}",
                record.key, record.source_value, record.reference_value, marker
            ));
        }
    }

    lines.join("\n")
}

fn render_json(report: &LocalizationReport) -> Result<String, String> {
    let differences: Vec<_> = report
        .differences()
        .iter()
        .map(|record| {
            json!({
                "key": record.key,
                "android": record.source_value,
                "ios": record.reference_value,
                "case_insensitive_match": record.is_case_insensitive_match,
                "android_placeholders": record.source_placeholder_count,
                "ios_placeholders": record.reference_placeholder_count,
                "placeholder_mismatch": record.has_placeholder_mismatch,
                "similarity": record.similarity,
            })
        })
        .collect();

    let rendered = json!({
        "summary": {
            "android_only": report.unique_to_source.len(),
            "ios_only": report.unique_to_reference.len(),
            "shared": report.comparisons.len(),
            "exact_matches": report.exact_matches().len(),
            "differences": report.differences().len(),
        },
        "android_only": report.unique_to_source.keys().collect::<Vec<_>>(),
        "ios_only": report.unique_to_reference.keys().collect::<Vec<_>>(),
        "differences": differences,
    });

    serde_json::to_string_pretty(&rendered)
        .map_err(|e| format!("Failed to serialize diff report JSON: {}", e))
}

pub fn run_diff_command(opts: DiffOptions) -> Result<(), String> {
    validate_file_path(Path::new(&opts.android))?;
    validate_file_path(Path::new(&opts.ios))?;
    if let Some(output) = &opts.output {
        validate_output_path(Path::new(output))?;
    }

    let document = stringsync::StringsDocument::read_from(&opts.android)
        .map_err(|e| format!("Failed to parse '{}': {}", opts.android, e))?;
    for warning in &document.warnings {
        eprintln!("{}: {}", opts.android, warning);
    }
    let ios = ios_strings::Format::read_from(&opts.ios)
        .map_err(|e| format!("Failed to parse '{}': {}", opts.ios, e))?;
    for warning in &ios.warnings {
        eprintln!("{}: {}", opts.ios, warning);
    }

    let report = compare(&document.catalog(""), &ios.into_catalog(""));

    if opts.json {
        let rendered = render_json(&report)?;
        print_or_write(opts.output.as_ref(), &rendered)?;
    } else {
        let rendered = render_human(&report);
        print_or_write(opts.output.as_ref(), &rendered)?;
    }

    Ok(())
}
