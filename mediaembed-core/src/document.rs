//! Descriptor document parsing.
//!
//! Providers answer with XML (`<oembed>...</oembed>`) or a JSON object.
//! Both are reduced to the one query the pipeline needs: the text of the
//! first field with a given name, in document order.

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde_json::{Map, Value};

use crate::error::DocumentError;
use crate::models::DescriptorFormat;

// ============================================================================
// Descriptor Document
// ============================================================================

/// A parsed descriptor document.
#[derive(Debug, Clone)]
pub enum DescriptorDocument {
    /// XML descriptor.
    Xml(XmlDocument),
    /// JSON descriptor.
    Json(Map<String, Value>),
}

impl DescriptorDocument {
    /// Parses `input` in the given format.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a well-formed document.
    pub fn parse(format: DescriptorFormat, input: &str) -> Result<Self, DocumentError> {
        match format {
            DescriptorFormat::Xml => XmlDocument::parse(input).map(Self::Xml),
            DescriptorFormat::Json => parse_json_object(input).map(Self::Json),
        }
    }

    /// Returns the text of the first field named `tag`.
    pub fn first_element_text(&self, tag: &str) -> Option<String> {
        match self {
            Self::Xml(doc) => doc.first_element_text(tag).map(str::to_string),
            Self::Json(map) => find_json_field(map, tag),
        }
    }

    /// Returns true if a field named `tag` exists.
    pub fn has_element(&self, tag: &str) -> bool {
        self.first_element_text(tag).is_some()
    }
}

// ============================================================================
// XML
// ============================================================================

/// Flattened XML document: every element with its text content, in
/// document order.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    elements: Vec<XmlElement>,
}

#[derive(Debug, Clone)]
struct XmlElement {
    name: String,
    /// Concatenated text of the element and all its descendants.
    text: String,
}

impl XmlDocument {
    /// Parses an XML document.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed XML, a missing root element, unclosed
    /// elements, unknown entities, or content after the root element.
    pub fn parse(input: &str) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(false);

        let mut elements: Vec<XmlElement> = Vec::new();
        let mut open: Vec<usize> = Vec::new();
        let mut root_closed = false;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    if root_closed {
                        return Err(DocumentError::TrailingContent);
                    }
                    let name = reader.decoder().decode(e.name().as_ref())?.into_owned();
                    open.push(elements.len());
                    elements.push(XmlElement {
                        name,
                        text: String::new(),
                    });
                }
                Event::Empty(e) => {
                    if root_closed {
                        return Err(DocumentError::TrailingContent);
                    }
                    let name = reader.decoder().decode(e.name().as_ref())?.into_owned();
                    elements.push(XmlElement {
                        name,
                        text: String::new(),
                    });
                    if open.is_empty() {
                        root_closed = true;
                    }
                }
                Event::End(_) => {
                    open.pop();
                    if open.is_empty() {
                        root_closed = true;
                    }
                }
                Event::Text(e) => {
                    let text = reader.decoder().decode(&e)?;
                    append_text(&mut elements, &open, &text, root_closed)?;
                }
                Event::GeneralRef(e) => {
                    let entity = reader.decoder().decode(&e)?;
                    let text = resolve_entity(&entity)?;
                    append_text(&mut elements, &open, &text, root_closed)?;
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e);
                    append_text(&mut elements, &open, &text, root_closed)?;
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions, doctype
                _ => {}
            }
        }

        if let Some(&idx) = open.last() {
            return Err(DocumentError::Unclosed(elements[idx].name.clone()));
        }
        if elements.is_empty() {
            return Err(DocumentError::NoRoot);
        }

        Ok(Self { elements })
    }

    /// Name of the root element.
    pub fn root_name(&self) -> &str {
        // parse() guarantees at least one element
        self.elements.first().map_or("", |e| e.name.as_str())
    }

    /// Returns the text of the first element named `tag`.
    pub fn first_element_text(&self, tag: &str) -> Option<&str> {
        self.elements
            .iter()
            .find(|e| e.name == tag)
            .map(|e| e.text.as_str())
    }
}

/// Appends text to every open element.
fn append_text(
    elements: &mut [XmlElement],
    open: &[usize],
    text: &str,
    root_closed: bool,
) -> Result<(), DocumentError> {
    if open.is_empty() {
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err(if root_closed {
            DocumentError::TrailingContent
        } else {
            DocumentError::NoRoot
        });
    }
    for &idx in open {
        elements[idx].text.push_str(text);
    }
    Ok(())
}

/// Resolves a predefined or numeric entity reference.
fn resolve_entity(entity: &str) -> Result<String, DocumentError> {
    let resolved = match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => entity.strip_prefix('#').and_then(|num| {
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => num.parse::<u32>().ok(),
            };
            code.and_then(char::from_u32)
        }),
    };
    resolved
        .map(String::from)
        .ok_or_else(|| DocumentError::UnknownEntity(entity.to_string()))
}

// ============================================================================
// JSON
// ============================================================================

fn parse_json_object(input: &str) -> Result<Map<String, Value>, DocumentError> {
    match serde_json::from_str::<Value>(input)? {
        Value::Object(map) => Ok(map),
        Value::Array(_) => Err(DocumentError::NotAnObject("array")),
        Value::String(_) => Err(DocumentError::NotAnObject("string")),
        Value::Number(_) => Err(DocumentError::NotAnObject("number")),
        Value::Bool(_) => Err(DocumentError::NotAnObject("boolean")),
        Value::Null => Err(DocumentError::NotAnObject("null")),
    }
}

/// Depth-first search: direct keys first, then nested values in order.
fn find_json_field(map: &Map<String, Value>, tag: &str) -> Option<String> {
    if let Some(value) = map.get(tag) {
        if let Some(text) = scalar_text(value) {
            return Some(text);
        }
    }
    map.values().find_map(|value| find_in_value(value, tag))
}

fn find_in_value(value: &Value, tag: &str) -> Option<String> {
    match value {
        Value::Object(map) => find_json_field(map, tag),
        Value::Array(items) => items.iter().find_map(|item| find_in_value(item, tag)),
        _ => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
