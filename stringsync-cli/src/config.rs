//! Run configuration: one TOML file describing the locale bundles to
//! synchronize and the policy knobs for the run.
//!
//! Everything is passed by value into each locale run; there is no
//! process-wide state.

use std::path::PathBuf;

use serde::Deserialize;
use stringsync::{TextReplacement, default_replacements};

use crate::validation::validate_language_code;

/// The full configuration for one `stringsync run` invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Directory receiving per-locale report files and fixed documents.
    pub output_dir: PathBuf,

    /// Withhold replacements whose placeholder counts disagree.
    #[serde(default = "default_true")]
    pub block_placeholder_mismatch: bool,

    /// Merge each secondary locale into the main Android document before
    /// synchronizing, instead of using the locale's own document directly.
    #[serde(default = "default_true")]
    pub use_base_template: bool,

    /// Write the fixed document over the original Android file instead of
    /// into the output directory.
    #[serde(default)]
    pub overwrite_in_place: bool,

    /// Ordered sanitizer rules applied to every reference value.
    #[serde(default = "default_rules")]
    pub replacements: Vec<ReplacementRule>,

    /// The primary locale bundle.
    pub main: LocaleBundle,

    /// Additional locale bundles, processed independently after the main one.
    #[serde(default)]
    pub locales: Vec<LocaleBundle>,
}

impl RunConfig {
    pub fn rules(&self) -> Vec<TextReplacement> {
        self.replacements
            .iter()
            .map(|rule| TextReplacement::new(rule.target.clone(), rule.replacement.clone()))
            .collect()
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_language_code(&self.main.language)?;
        for bundle in &self.locales {
            validate_language_code(&bundle.language)?;
        }
        Ok(())
    }
}

/// One ordered `target` → `replacement` rewrite rule.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplacementRule {
    pub target: String,
    pub replacement: String,
}

/// One language's pair of platform files.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocaleBundle {
    pub language: String,
    pub android_file: PathBuf,
    pub ios_file: PathBuf,
}

fn default_true() -> bool {
    true
}

fn default_rules() -> Vec<ReplacementRule> {
    default_replacements()
        .into_iter()
        .map(|rule| ReplacementRule {
            target: rule.target,
            replacement: rule.replacement,
        })
        .collect()
}

/// Loads and validates a [`RunConfig`] from a TOML file.
pub fn load_config(path: &str) -> Result<RunConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config '{}': {}", path, e))?;
    let config: RunConfig =
        toml::from_str(&content).map_err(|e| format!("Failed to parse config '{}': {}", path, e))?;
    config.validate()?;
    Ok(config)
}
