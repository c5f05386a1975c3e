//! Tree-structured document access
//!
//! The decoding pipeline only ever needs three primitives from the parsed
//! document: find an element by tag, read an attribute, and read text content.
//! [`DocumentAccessor`] captures exactly that, so the decoder never depends on
//! a concrete tree type. [`XmlElement`] is the owned tree built with
//! `quick-xml` that the reader uses by default.

use std::io::BufRead;
use std::str::FromStr;

use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::SierraError;

/// Read-only view over one element of a parsed document.
///
/// Lookups by tag search all descendants in document order, so
/// `root.child("samplingrate")` finds the element wherever it is nested.
pub trait DocumentAccessor {
    /// Local name of this element (namespace prefix stripped)
    fn name(&self) -> &str;

    /// First descendant element named `tag`, depth-first in document order
    fn child(&self, tag: &str) -> Option<&Self>;

    /// Every descendant element named `tag`, in document order
    fn children(&self, tag: &str) -> Vec<&Self>;

    /// Raw value of the attribute `name`, if present
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Concatenated text content directly owned by this element
    fn text(&self) -> &str;

    /// Like [`child`](Self::child) but fails with `MissingElement`
    fn required_child(&self, tag: &str) -> Result<&Self, SierraError> {
        self.child(tag)
            .ok_or_else(|| SierraError::MissingElement(tag.to_string()))
    }

    /// Like [`attribute`](Self::attribute) but fails with `MissingAttribute`
    fn required_attribute(&self, name: &str) -> Result<&str, SierraError> {
        self.attribute(name)
            .ok_or_else(|| SierraError::MissingAttribute {
                element: self.name().to_string(),
                attribute: name.to_string(),
            })
    }

    /// Attribute value, or `default` when the attribute is absent
    fn attribute_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.attribute(name).unwrap_or(default)
    }

    /// Parse a required attribute into `T`
    fn parse_attribute<T: FromStr>(&self, name: &str) -> Result<T, SierraError> {
        let raw = self.required_attribute(name)?;
        parse_value(name, raw)
    }

    /// Parse an optional attribute into `T`, falling back to `default`
    fn parse_attribute_or<T: FromStr>(&self, name: &str, default: T) -> Result<T, SierraError> {
        match self.attribute(name) {
            Some(raw) => parse_value(name, raw),
            None => Ok(default),
        }
    }

    /// Parse the text content of this element into `T`
    fn parse_text<T: FromStr>(&self) -> Result<T, SierraError> {
        parse_value(self.name(), self.text())
    }
}

fn parse_value<T: FromStr>(field: &str, raw: &str) -> Result<T, SierraError> {
    raw.trim()
        .parse()
        .map_err(|_| SierraError::invalid_value(field, raw))
}

/// Owned XML element tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
    text: String,
}

impl XmlElement {
    /// Create an empty element named `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse a complete document and return its root element
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, SierraError> {
        let mut reader = Reader::from_reader(reader);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => stack.push(Self::from_start(e, reader.decoder())?),
                Event::Empty(ref e) => {
                    let element = Self::from_start(e, reader.decoder())?;
                    Self::attach(&mut stack, &mut root, element);
                }
                Event::End(_) => {
                    if let Some(element) = stack.pop() {
                        Self::attach(&mut stack, &mut root, element);
                    }
                }
                Event::Text(ref t) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&t.unescape()?);
                    }
                }
                Event::CData(t) => {
                    if let Some(top) = stack.last_mut() {
                        let bytes = t.into_inner();
                        top.text.push_str(std::str::from_utf8(&bytes)?);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        root.ok_or_else(|| SierraError::MissingElement("document root".to_string()))
    }

    /// Parse a complete document held in memory
    pub fn parse_str(xml: &str) -> Result<Self, SierraError> {
        Self::from_reader(xml.as_bytes())
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builder-style child appender
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style text setter
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    fn from_start(start: &BytesStart, decoder: Decoder) -> Result<Self, SierraError> {
        let name = std::str::from_utf8(start.local_name().as_ref())?.to_string();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = std::str::from_utf8(attr.key.local_name().as_ref())?.to_string();
            let value = attr.decode_and_unescape_value(decoder)?.into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            ..Default::default()
        })
    }

    fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None => {
                if root.is_none() {
                    *root = Some(element);
                }
            }
        }
    }

    fn collect_named<'a>(&'a self, tag: &str, out: &mut Vec<&'a XmlElement>) {
        for child in &self.children {
            if child.name == tag {
                out.push(child);
            }
            child.collect_named(tag, out);
        }
    }
}

impl DocumentAccessor for XmlElement {
    fn name(&self) -> &str {
        &self.name
    }

    fn child(&self, tag: &str) -> Option<&Self> {
        self.children.iter().find_map(|child| {
            if child.name == tag {
                Some(child)
            } else {
                child.child(tag)
            }
        })
    }

    fn children(&self, tag: &str) -> Vec<&Self> {
        let mut out = Vec::new();
        self.collect_named(tag, &mut out);
        out
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn text(&self) -> &str {
        &self.text
    }
}
