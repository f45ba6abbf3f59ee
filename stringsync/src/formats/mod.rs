//! The two platform text-resource formats stringsync reconciles.
//!
//! `android_strings` parses Android `strings.xml` into an order-preserving
//! structured document (the one the synchronizer and template merger mutate
//! in place); `ios_strings` parses Apple `.strings` key-value files. Both
//! yield a [`crate::StringCatalog`] for the analyzer.

pub mod android_strings;
pub mod ios_strings;

pub use android_strings::{DocumentNode, StringEntry, StringsDocument};
pub use ios_strings::Format as IosStringsFormat;
