#![forbid(unsafe_code)]
//! Cross-platform localized-string reconciliation for Rust.
//!
//! stringsync diffs one platform's translation catalog against another's
//! (typically Android `strings.xml` against Apple `.strings`), validates
//! placeholder counts, and rewrites the Android document with the
//! reference-platform values, including template merges across locale
//! variants.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stringsync::{StringsDocument, compare, synchronize_document, SyncOptions};
//! use stringsync::formats::ios_strings;
//! use stringsync::traits::Parser;
//!
//! let mut document = StringsDocument::read_from("res/values/strings.xml")?;
//! let android = document.catalog("en");
//! let ios = ios_strings::Format::read_from("en.lproj/Localizable.strings")?
//!     .into_catalog("en");
//!
//! let report = compare(&android, &ios);
//! synchronize_document(&mut document, &report.differences(), &SyncOptions::default());
//! document.write_to("out/strings.xml")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Design
//!
//! - All core transforms run over already-loaded, in-memory data; the only
//!   I/O lives in the parsers and writers.
//! - Asymmetric key sets between catalogs are expected data, never errors.
//! - A placeholder-count mismatch blocks replacement by default: a deliberate
//!   data-safety gate, reported rather than raised.

pub mod analyzer;
pub mod catalog;
pub mod error;
pub mod formats;
pub mod operations;
pub mod placeholder;
pub mod sanitize;
pub mod traits;

// Re-export most used types for easy consumption
pub use crate::{
    analyzer::{ComparisonRecord, LocalizationReport, compare},
    catalog::StringCatalog,
    error::Error,
    formats::android_strings::{DocumentNode, StringEntry, StringsDocument},
    operations::{
        BlockedReplacement, MergeReport, SyncOptions, SyncReport, default_replacements,
        merge_template, synchronize_document,
    },
    placeholder::count_placeholders,
    sanitize::{TextReplacement, sanitize},
};
