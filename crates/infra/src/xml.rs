//! Minimal XML tree for ADT payloads
//!
//! ADT responses are small documents; they are read into an owned tree and
//! queried by local element name, ignoring namespace prefixes
//! (`chkrun:checkMessage` matches `checkMessage`).

use std::borrow::Cow;

use adtkit_domain::{AdtError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::errors::InfraError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Qualified name as written, e.g. `chkrun:checkMessage`
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Direct text content, CDATA included
    pub text: String,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn local_name(&self) -> &str {
        local(&self.name)
    }

    /// Attribute value by qualified or local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .or_else(|| self.attributes.iter().find(|(key, _)| local(key) == local(name)))
            .map(|(_, value)| value.as_str())
    }

    /// First descendant (or self) with the given local name.
    pub fn find(&self, name: &str) -> Option<&XmlNode> {
        if self.local_name() == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// All descendants (and self) with the given local name, document order.
    pub fn find_all<'a>(&'a self, name: &str) -> Vec<&'a XmlNode> {
        let mut found = Vec::new();
        self.collect(name, &mut found);
        found
    }

    fn collect<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlNode>) {
        if self.local_name() == name {
            found.push(self);
        }
        for child in &self.children {
            child.collect(name, found);
        }
    }

    /// Text of the first descendant with the given local name, if non-empty.
    pub fn text_of(&self, name: &str) -> Option<String> {
        self.find(name).map(XmlNode::deep_text).filter(|text| !text.is_empty())
    }

    /// Own text followed by all descendant text.
    pub fn deep_text(&self) -> String {
        let mut text = self.text.clone();
        for child in &self.children {
            let nested = child.deep_text();
            if !nested.is_empty() {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(&nested);
            }
        }
        text
    }
}

fn local(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

/// Parse a document and return its root element.
pub fn parse(xml: &str) -> Result<XmlNode> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref start)) => stack.push(open(start)?),
            Ok(Event::Empty(ref start)) => {
                let node = open(start)?;
                close(node, &mut stack, &mut root);
            }
            Ok(Event::End(_)) => {
                if let Some(node) = stack.pop() {
                    close(node, &mut stack, &mut root);
                }
            }
            Ok(Event::Text(text)) => {
                if let Some(node) = stack.last_mut() {
                    let text = text.unescape().map_err(|err| AdtError::from(InfraError::from(err)))?;
                    node.text.push_str(&text);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(AdtError::Xml(format!(
                    "XML parse error at position {}: {err}",
                    reader.error_position()
                )));
            }
            _ => {}
        }
    }

    root.ok_or_else(|| AdtError::Xml("document has no root element".into()))
}

fn open(start: &BytesStart<'_>) -> Result<XmlNode> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute =
            attribute.map_err(|err| AdtError::Xml(format!("invalid attribute on <{name}>: {err}")))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|err| AdtError::from(InfraError::from(err)))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(XmlNode { name, attributes, ..Default::default() })
}

fn close(node: XmlNode, stack: &mut [XmlNode], root: &mut Option<XmlNode>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => {
            if root.is_none() {
                *root = Some(node);
            }
        }
    }
}

/// Escape text for element content and attribute values.
pub fn escape(value: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(value)
}

/// Values of an `asx:abap` payload (`<DATA><FIELD>value</FIELD>...</DATA>`).
pub fn abap_values(xml: &str) -> Result<Vec<(String, String)>> {
    let root = parse(xml)?;
    let data = root
        .find("DATA")
        .ok_or_else(|| AdtError::Xml(format!("missing DATA element in <{}>", root.name)))?;
    Ok(data
        .children
        .iter()
        .map(|field| (field.local_name().to_string(), field.deep_text()))
        .collect())
}
