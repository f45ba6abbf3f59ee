//! Support for Apple `.strings` localization files.
//!
//! The parser is line-based: each `"key" = "value";` pair on a line becomes
//! one entry, blank lines are ignored, and malformed lines are skipped with a
//! diagnostic rather than failing the whole parse. Duplicate keys resolve to
//! the last occurrence. Files are decoded BOM-aware, so UTF-16 `.strings`
//! files (common in Xcode exports) read transparently.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{catalog::StringCatalog, error::Error, traits::Parser};

lazy_static! {
    static ref PAIR_REGEX: Regex = Regex::new(r#""(.+?)"\s*=\s*"(.*?)"\s*;"#).unwrap();
}

/// A parsed Apple `.strings` file: ordered key-value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    pub pairs: Vec<(String, String)>,
    /// Diagnostics for non-blank lines that matched no pair.
    pub warnings: Vec<String>,
}

impl Format {
    /// Flattens the pairs into a catalog; duplicate keys resolve to the
    /// last occurrence.
    pub fn into_catalog(self, language: &str) -> StringCatalog {
        let mut catalog = StringCatalog::new(language);
        for (key, value) in self.pairs {
            catalog.insert(key, value);
        }
        catalog
    }
}

impl Parser for Format {
    /// Parse from any reader.
    fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self, Error> {
        let mut pairs = Vec::new();
        let mut warnings = Vec::new();

        for line in reader.lines() {
            let line = line.map_err(Error::Io)?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with("/*") {
                continue;
            }

            let mut matched = false;
            for capture in PAIR_REGEX.captures_iter(trimmed) {
                pairs.push((capture[1].to_string(), capture[2].to_string()));
                matched = true;
            }
            if !matched {
                warnings.push(format!("skipped malformed line: {}", trimmed));
            }
        }

        Ok(Format { pairs, warnings })
    }

    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut content = String::new();
        for (key, value) in &self.pairs {
            content.push_str(&format!("\"{}\" = \"{}\";\n", key, value));
        }
        writer.write_all(content.as_bytes()).map_err(Error::Io)
    }

    /// Override default file reading to support BOM-aware decoding
    /// (e.g. UTF-16 Apple `.strings`).
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        // Auto-detect BOM, decode to UTF-8; passthrough UTF-8
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Self::from_str(&decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Parser;

    #[test]
    fn test_parse_basic_pairs() {
        let content = r#"
        "hello" = "Hello, world!";
        "bye" = "Goodbye";
        "#;
        let parsed = Format::from_str(content).unwrap();
        assert_eq!(parsed.pairs.len(), 2);
        assert_eq!(parsed.pairs[0], ("hello".to_string(), "Hello, world!".to_string()));
        assert_eq!(parsed.pairs[1], ("bye".to_string(), "Goodbye".to_string()));
    }

    #[test]
    fn test_blank_lines_and_comments_ignored() {
        let content = r#"

        // Comment line
        /* Block comment */
        "good" = "yes";

        "#;
        let parsed = Format::from_str(content).unwrap();
        assert_eq!(parsed.pairs.len(), 1);
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_malformed_line_skipped_with_warning() {
        let content = r#"
        "good" = "yes";
        bad line without pair
        "another" = "ok";
        "#;
        let parsed = Format::from_str(content).unwrap();
        assert_eq!(parsed.pairs.len(), 2);
        assert_eq!(parsed.warnings.len(), 1);
        assert!(parsed.warnings[0].contains("bad line"));
    }

    #[test]
    fn test_empty_value_allowed() {
        let content = r#""empty" = "";"#;
        let parsed = Format::from_str(content).unwrap();
        assert_eq!(parsed.pairs.len(), 1);
        assert_eq!(parsed.pairs[0].1, "");
    }

    #[test]
    fn test_duplicate_keys_last_wins_in_catalog() {
        let content = r#"
        "dup" = "first";
        "dup" = "second";
        "#;
        let catalog = Format::from_str(content).unwrap().into_catalog("en");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("dup"), Some("second"));
    }

    #[test]
    fn test_multiple_pairs_on_one_line() {
        let content = r#""a" = "1"; "b" = "2";"#;
        let parsed = Format::from_str(content).unwrap();
        assert_eq!(parsed.pairs.len(), 2);
    }

    #[test]
    fn test_round_trip_serialization() {
        let content = "\"bye\" = \"Goodbye!\";\n";
        let parsed = Format::from_str(content).unwrap();
        let mut output = Vec::new();
        parsed.to_writer(&mut output).unwrap();
        let reparsed = Format::from_str(&String::from_utf8(output).unwrap()).unwrap();
        assert_eq!(parsed.pairs, reparsed.pairs);
    }

    #[test]
    fn test_read_utf16_file_with_bom() {
        use std::io::Write as _;

        let mut bytes: Vec<u8> = vec![0xFF, 0xFE]; // UTF-16LE BOM
        for unit in "\"hello\" = \"Bonjour\";\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();

        let parsed = Format::read_from(file.path()).unwrap();
        assert_eq!(parsed.pairs.len(), 1);
        assert_eq!(parsed.pairs[0], ("hello".to_string(), "Bonjour".to_string()));
    }
}
