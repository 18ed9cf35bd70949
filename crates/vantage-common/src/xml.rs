//! Minimal owned XML element tree.
//!
//! The configuration service exchanges small XML documents with a known
//! envelope but an open object schema. Parsing into a lightweight tree lets
//! each object type run a hand-written static decoder that tolerates unknown
//! attributes and elements.

use crate::error::{ClientError, ClientResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;

/// An owned XML element: name, attributes, child elements, and merged text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Element name.
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order.
    pub children: Vec<XmlElement>,
    /// Concatenated text content (excluding child element text).
    pub text: String,
}

impl XmlElement {
    /// Parse the first element of an XML document.
    pub fn parse(input: &str) -> ClientResult<Self> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => stack.push(element_from_start(&start)?),
                Ok(Event::Empty(start)) => {
                    let element = element_from_start(&start)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => return Ok(element),
                    }
                }
                Ok(Event::Text(text)) => {
                    if let Some(top) = stack.last_mut() {
                        let unescaped = text.unescape().map_err(decode_err)?;
                        top.text.push_str(&unescaped);
                    }
                }
                Ok(Event::CData(data)) => {
                    if let Some(top) = stack.last_mut() {
                        top.text
                            .push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| ClientError::Decode("unbalanced end tag".into()))?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => return Ok(element),
                    }
                }
                Ok(Event::Eof) => {
                    return Err(ClientError::Decode("unexpected end of XML document".into()))
                }
                Ok(_) => {}
                Err(err) => return Err(decode_err(err)),
            }
        }
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Look up an attribute, reporting a decode error when missing.
    pub fn require_attribute(&self, name: &str) -> ClientResult<&str> {
        self.attribute(name).ok_or_else(|| {
            ClientError::Decode(format!("<{}> is missing attribute {name:?}", self.name))
        })
    }

    /// Find the first child element with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Iterate over all child elements with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Text content of the first child element with the given name.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|child| child.text.as_str())
    }

    /// Text content of a required child element.
    pub fn require_child_text(&self, name: &str) -> ClientResult<&str> {
        self.child_text(name).ok_or_else(|| {
            ClientError::Decode(format!("<{}> is missing element <{name}>", self.name))
        })
    }
}

fn element_from_start(start: &BytesStart<'_>) -> ClientResult<XmlElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(decode_err)?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(decode_err)?.into_owned();
        attributes.push((key, value));
    }

    Ok(XmlElement {
        name,
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

fn decode_err(err: impl std::fmt::Display) -> ClientError {
    ClientError::Decode(format!("XML parse error: {err}"))
}

/// Escape text for inclusion in an XML document.
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}
