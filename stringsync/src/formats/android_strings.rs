//! Support for Android `strings.xml` as an in-memory structured document.
//!
//! Unlike a plain key-value parse, the document keeps entry order, comments,
//! and every `<string>` attribute so the synchronizer can rewrite individual
//! values and serialize the file back with everything else intact. Only
//! singular `<string>` elements are recognized; other elements are skipped
//! with a warning.

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::io::{BufRead, Write};

use crate::{catalog::StringCatalog, error::Error, traits::Parser};

/// An ordered node of a parsed `strings.xml` document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentNode {
    /// A `<string>` element.
    Entry(StringEntry),
    /// An XML comment, preserved verbatim.
    Comment(String),
}

/// One `<string>` element: key attribute, text value, and the remaining
/// attributes in original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringEntry {
    pub name: String,
    pub value: String,
    /// All attributes other than `name`, in document order.
    pub attributes: Vec<(String, String)>,
}

impl StringEntry {
    /// The `translatable` flag. Absent attribute defaults to translatable;
    /// only a value case-insensitively equal to `"false"` marks the entry
    /// as non-translatable.
    pub fn is_translatable(&self) -> bool {
        self.attributes
            .iter()
            .find(|(key, _)| key == "translatable")
            .map(|(_, value)| !value.eq_ignore_ascii_case("false"))
            .unwrap_or(true)
    }
}

/// A parsed `strings.xml` document: the mutable tree the synchronizer and
/// template merger operate on. Exclusively owned by the caller for the
/// duration of a merge or sync call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringsDocument {
    pub nodes: Vec<DocumentNode>,
    /// Diagnostics for entries that could not be parsed and were skipped.
    pub warnings: Vec<String>,
}

impl StringsDocument {
    /// Iterates the `<string>` entries in document order.
    pub fn entries(&self) -> impl Iterator<Item = &StringEntry> {
        self.nodes.iter().filter_map(|node| match node {
            DocumentNode::Entry(entry) => Some(entry),
            DocumentNode::Comment(_) => None,
        })
    }

    /// Flattens the document into a key → value catalog.
    ///
    /// Duplicate keys resolve to the last occurrence, matching the catalog
    /// parsers' policy. Non-translatable entries are included; the template
    /// merger, not the catalog, decides their fate.
    pub fn catalog(&self, language: &str) -> StringCatalog {
        let mut catalog = StringCatalog::new(language);
        for entry in self.entries() {
            catalog.insert(entry.name.clone(), entry.value.clone());
        }
        catalog
    }
}

impl Parser for StringsDocument {
    /// Parse from any reader.
    ///
    /// Malformed `<string>` elements (e.g. missing the `name` attribute) are
    /// skipped and recorded in `warnings` rather than failing the document.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut nodes = Vec::new();
        let mut warnings = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if e.name().as_ref() == b"string" => {
                    match parse_string_entry(e, &mut xml_reader)? {
                        Some(entry) => nodes.push(DocumentNode::Entry(entry)),
                        None => warnings.push(
                            "skipped <string> element without a 'name' attribute".to_string(),
                        ),
                    }
                }
                Ok(Event::Empty(ref e)) if e.name().as_ref() == b"string" => {
                    match parse_attributes(e)? {
                        Some((name, attributes)) => nodes.push(DocumentNode::Entry(StringEntry {
                            name,
                            value: String::new(),
                            attributes,
                        })),
                        None => warnings.push(
                            "skipped <string> element without a 'name' attribute".to_string(),
                        ),
                    }
                }
                Ok(Event::Comment(e)) => {
                    let text = e.unescape().map_err(Error::XmlParse)?.to_string();
                    nodes.push(DocumentNode::Comment(text));
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::XmlParse(e)),
            }
            buf.clear();
        }

        Ok(StringsDocument { nodes, warnings })
    }

    /// Write to any writer (file, memory, etc.).
    ///
    /// Empty values are rendered as an explicit `<string name="k"></string>`
    /// element, never self-closing, so every key stays visible as one entry.
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new(&mut writer);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

        xml_writer.write_event(Event::Start(BytesStart::new("resources")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

        for node in &self.nodes {
            xml_writer.write_event(Event::Text(BytesText::new("    ")))?;
            match node {
                DocumentNode::Entry(entry) => {
                    let mut elem = BytesStart::new("string");
                    elem.push_attribute(("name", entry.name.as_str()));
                    for (key, value) in &entry.attributes {
                        elem.push_attribute((key.as_str(), value.as_str()));
                    }
                    xml_writer.write_event(Event::Start(elem))?;
                    xml_writer.write_event(Event::Text(BytesText::new(&entry.value)))?;
                    xml_writer.write_event(Event::End(BytesEnd::new("string")))?;
                }
                DocumentNode::Comment(text) => {
                    xml_writer.write_event(Event::Comment(BytesText::new(text)))?;
                }
            }
            xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new("resources")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        Ok(())
    }
}

fn parse_attributes(e: &BytesStart) -> Result<Option<(String, Vec<(String, String)>)>, Error> {
    let mut name = None;
    let mut attributes = Vec::new();

    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::DataMismatch(e.to_string()))?;
        let value = attr.unescape_value()?.to_string();
        match attr.key.as_ref() {
            b"name" => name = Some(value),
            key => attributes.push((String::from_utf8_lossy(key).to_string(), value)),
        }
    }

    Ok(name.map(|name| (name, attributes)))
}

fn parse_string_entry<R: BufRead>(
    e: &BytesStart,
    xml_reader: &mut Reader<R>,
) -> Result<Option<StringEntry>, Error> {
    let parsed = parse_attributes(e)?;

    let mut buf = Vec::new();
    // Read until text or end
    let value = loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Text(e)) => {
                let v = e.unescape().map_err(Error::XmlParse)?.to_string();
                break v;
            }
            Ok(Event::End(_)) => break String::new(),
            Ok(Event::Eof) => {
                return Err(Error::InvalidResource("Unexpected EOF".to_string()));
            }
            Ok(_) => (),
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    };

    Ok(parsed.map(|(name, attributes)| StringEntry {
        name,
        value,
        attributes,
    }))
}
