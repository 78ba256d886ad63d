//! XML reading via quick-xml.
//!
//! Tags keep their `prefix:` as written; namespace declarations land in
//! [`Node::namespaces`](super::Node::namespaces).

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

use super::{TreeBuilder, TreeDocument, TreeError};

impl TreeDocument {
    /// Parse an XML document from a string.
    pub fn parse_str(input: &str) -> Result<Self, TreeError> {
        Self::parse_bytes(input.as_bytes())
    }

    /// Parse an XML document from raw bytes.
    pub fn parse_bytes(input: &[u8]) -> Result<Self, TreeError> {
        read(input, TreeBuilder::new())
    }

    /// Read and parse an XML file, recording its path as provenance.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TreeError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let mut builder = TreeBuilder::new();
        builder.file(path);
        let doc = read(&bytes, builder)?;
        tracing::debug!("Loaded {} elements from {}", doc.len(), path.display());
        Ok(doc)
    }
}

fn read(input: &[u8], mut builder: TreeBuilder) -> Result<TreeDocument, TreeError> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                start_element(&mut builder, e)?;
            }
            Ok(Event::Empty(ref e)) => {
                start_element(&mut builder, e)?;
                builder.end();
            }
            Ok(Event::End(_)) => {
                builder.end();
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| TreeError::xml(format!("Text error: {e}")))?;
                builder.text(&text);
            }
            Ok(Event::CData(ref e)) => {
                let text = std::str::from_utf8(e)
                    .map_err(|e| TreeError::xml(format!("CDATA error: {e}")))?;
                builder.text(text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(TreeError::xml(format!(
                    "XML parse error at position {}: {e}",
                    reader.error_position()
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    builder.finish()
}

fn start_element(builder: &mut TreeBuilder, e: &BytesStart<'_>) -> Result<(), TreeError> {
    let name = e.name();
    let tag = std::str::from_utf8(name.as_ref())
        .map_err(|e| TreeError::xml(format!("Invalid tag name: {e}")))?;
    builder.start(tag);

    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| TreeError::xml(format!("Attribute error: {e}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| TreeError::xml(format!("Attribute key error: {e}")))?;
        let value = attr
            .unescape_value()
            .map_err(|e| TreeError::xml(format!("Attribute value error: {e}")))?;
        builder.attribute(key, value.into_owned());
    }
    Ok(())
}
