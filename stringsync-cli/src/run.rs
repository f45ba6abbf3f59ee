//! The `run` command: config-driven synchronization of every configured
//! locale. The main locale is processed first; each additional locale is
//! independent, so a failure in one is reported and the others still run.

use std::path::{Path, PathBuf};

use stringsync::formats::ios_strings;
use stringsync::traits::Parser;
use stringsync::{
    StringCatalog, StringsDocument, SyncOptions, compare, merge_template, synchronize_document,
};

use crate::config::{LocaleBundle, RunConfig, load_config};
use crate::report::write_reports;
use crate::validation::{validate_file_path, validate_output_path};

const FIXED_STRINGS_FILE: &str = "strings.xml";

pub fn run_sync_command(config_path: &str) -> Result<(), String> {
    let config = load_config(config_path)?;
    println!("Loaded configuration from {}", config_path);

    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| format!("Cannot create output directory: {}", e))?;

    let mut failures = Vec::new();

    if let Err(e) = sync_main_locale(&config) {
        failures.push(format!("{}: {}", config.main.language, e));
    }

    for bundle in &config.locales {
        if let Err(e) = sync_secondary_locale(&config, bundle) {
            eprintln!("Locale '{}' failed: {}", bundle.language, e);
            failures.push(format!("{}: {}", bundle.language, e));
        }
    }

    if failures.is_empty() {
        println!("✅ Synchronization complete: {}", config.output_dir.display());
        Ok(())
    } else {
        Err(format!(
            "{} locale run(s) failed: {}",
            failures.len(),
            failures.join("; ")
        ))
    }
}

fn sync_main_locale(config: &RunConfig) -> Result<(), String> {
    let bundle = &config.main;
    println!(
        "Synchronizing main language: {} for Android: {} from iOS: {}",
        bundle.language,
        bundle.android_file.display(),
        bundle.ios_file.display()
    );

    let document = load_android_document(&bundle.android_file)?;
    let android = document.catalog(&bundle.language);
    sync_bundle(config, bundle, document, android)
}

fn sync_secondary_locale(config: &RunConfig, bundle: &LocaleBundle) -> Result<(), String> {
    println!(
        "Synchronizing locale: {} for Android: {} from iOS: {}",
        bundle.language,
        bundle.android_file.display(),
        bundle.ios_file.display()
    );

    // The comparison always runs over the locale's own Android strings; the
    // merged template only decides which document gets rewritten, so keys the
    // locale never translated stay blank instead of being filled from iOS.
    let locale_document = load_android_document(&bundle.android_file)?;
    let android = locale_document.catalog(&bundle.language);

    let document = if config.use_base_template {
        println!(
            "Using main Android strings as base template. Merging {} into {}",
            bundle.android_file.display(),
            config.main.android_file.display()
        );
        let mut template = load_android_document(&config.main.android_file)?;
        let merge = merge_template(&mut template, &android);
        println!(
            "Template merge: {} filled, {} blanked, {} untranslatable removed",
            merge.filled, merge.blanked, merge.removed
        );
        template
    } else {
        println!("Using {} directly", bundle.android_file.display());
        locale_document
    };

    sync_bundle(config, bundle, document, android)
}

fn sync_bundle(
    config: &RunConfig,
    bundle: &LocaleBundle,
    mut document: StringsDocument,
    android: StringCatalog,
) -> Result<(), String> {
    let ios = load_ios_catalog(&bundle.ios_file, &bundle.language)?;

    println!("Total Android strings: {}", android.len());
    println!("Total iOS strings: {}", ios.len());

    let report = compare(&android, &ios);

    let locale_dir = config.output_dir.join(&bundle.language);
    validate_output_path(&locale_dir.join(FIXED_STRINGS_FILE))?;

    let warnings = write_reports(&locale_dir, &report)?;
    println!("Unique Android strings: {}", report.unique_to_source.len());
    println!("Unique iOS strings: {}", report.unique_to_reference.len());
    println!("Exact matches: {}", report.exact_matches().len());
    println!("Total differences: {}", report.differences().len());
    if warnings > 0 {
        println!(
            "\n!! WARNING: Detected {} strings with mismatched placeholder counts !!\n",
            warnings
        );
    }

    if report.differences().is_empty() {
        println!("Platform localizations match for shared keys!");
        return Ok(());
    }

    println!("Generating corrected Android strings file with iOS values applied.");
    let sync = synchronize_document(
        &mut document,
        &report.differences(),
        &SyncOptions {
            block_on_placeholder_mismatch: config.block_placeholder_mismatch,
            rules: config.rules(),
        },
    );
    println!("Replaced: {}", sync.replaced);
    for blocked in &sync.blocked {
        println!(
            "Blocked '{}': Android has {} placeholder(s), iOS has {}",
            blocked.key, blocked.source_placeholders, blocked.reference_placeholders
        );
    }
    for missing in &sync.missing {
        println!("Key '{}' not found in document, skipped", missing);
    }

    let destination = if config.overwrite_in_place {
        bundle.android_file.clone()
    } else {
        locale_dir.join(FIXED_STRINGS_FILE)
    };
    document
        .write_to(&destination)
        .map_err(|e| format!("Failed to write '{}': {}", destination.display(), e))?;
    println!("Wrote {}", destination.display());

    Ok(())
}

fn load_android_document(path: &Path) -> Result<StringsDocument, String> {
    validate_file_path(path)?;
    let document = StringsDocument::read_from(path)
        .map_err(|e| format!("Failed to parse '{}': {}", path.display(), e))?;
    for warning in &document.warnings {
        eprintln!("{}: {}", path.display(), warning);
    }
    Ok(document)
}

fn load_ios_catalog(path: &PathBuf, language: &str) -> Result<StringCatalog, String> {
    validate_file_path(path)?;
    let format = ios_strings::Format::read_from(path)
        .map_err(|e| format!("Failed to parse '{}': {}", path.display(), e))?;
    for warning in &format.warnings {
        eprintln!("{}: {}", path.display(), warning);
    }
    Ok(format.into_catalog(language))
}
