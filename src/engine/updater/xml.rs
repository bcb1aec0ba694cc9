//! Minimal XML element tree
//!
//! Builds an owned tree from an OTA response while rejecting documents that
//! are not well-formed. Attributes are ignored; the OTA schema carries all of
//! its data in element text.

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XmlError {
    #[error("{0}")]
    Syntax(String),
    #[error("Unclosed element: <{0}>")]
    Unclosed(String),
    #[error("Unexpected closing tag")]
    UnexpectedEnd,
    #[error("Content after the root element")]
    TrailingContent,
    #[error("Text outside the root element")]
    TextOutsideRoot,
    #[error("Unknown entity: &{0};")]
    UnknownEntity(String),
    #[error("Document has no root element")]
    NoRoot,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    text: String,
    pub children: Vec<Element>,
}

impl Element {
    fn new(name: &[u8]) -> Self {
        Self {
            name: String::from_utf8_lossy(name).to_string(),
            ..Self::default()
        }
    }

    /// Parse a complete document and return its root element
    pub fn parse(input: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    if root.is_some() {
                        return Err(XmlError::TrailingContent);
                    }
                    check_attributes(e)?;
                    stack.push(Element::new(e.name().as_ref()));
                }
                Ok(Event::Empty(ref e)) => {
                    check_attributes(e)?;
                    close_element(&mut stack, &mut root, Element::new(e.name().as_ref()))?;
                }
                Ok(Event::End(_)) => {
                    let element = stack.pop().ok_or(XmlError::UnexpectedEnd)?;
                    close_element(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(ref e)) => {
                    let text = e
                        .decode()
                        .map_err(|err| XmlError::Syntax(err.to_string()))?;
                    append_text(&mut stack, &text)?;
                }
                Ok(Event::CData(ref e)) => {
                    let text = std::str::from_utf8(e.as_ref())
                        .map_err(|err| XmlError::Syntax(err.to_string()))?;
                    append_text(&mut stack, text)?;
                }
                Ok(Event::GeneralRef(ref e)) => {
                    let text = resolve_reference(e)?;
                    append_text(&mut stack, &text)?;
                }
                Ok(Event::Eof) => break,
                // Declarations, comments, processing instructions, doctype
                Ok(_) => {}
                Err(err) => return Err(XmlError::Syntax(err.to_string())),
            }
        }

        if let Some(open) = stack.pop() {
            return Err(XmlError::Unclosed(open.name));
        }
        root.ok_or(XmlError::NoRoot)
    }

    /// Text content with surrounding whitespace removed
    ///
    /// Only the text before the first child element counts; text following a
    /// child belongs to that child's tail and is dropped. Entity references
    /// and CDATA sections are decoded and joined before trimming.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// First direct child with the given tag
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).map(|child| child.text().to_string())
    }

    /// First element with the given tag, this one included, in document order
    pub fn find(&self, name: &str) -> Option<&Element> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }
}

fn close_element(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(XmlError::TrailingContent),
    }
    Ok(())
}

/// Attributes are unused, but a malformed one still makes the document invalid
fn check_attributes(start: &BytesStart<'_>) -> Result<(), XmlError> {
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| XmlError::Syntax(err.to_string()))?;
        if attribute.value.contains(&b'<') {
            return Err(XmlError::Syntax(format!(
                "'<' in value of attribute {}",
                String::from_utf8_lossy(attribute.key.as_ref())
            )));
        }
    }
    Ok(())
}

fn append_text(stack: &mut [Element], text: &str) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(element) if element.children.is_empty() => element.text.push_str(text),
        Some(_) => {}
        None if text.trim().is_empty() => {}
        None => return Err(XmlError::TextOutsideRoot),
    }
    Ok(())
}

fn resolve_reference(reference: &BytesRef<'_>) -> Result<String, XmlError> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(|err| XmlError::Syntax(err.to_string()))?
    {
        return Ok(ch.to_string());
    }

    let name = reference
        .decode()
        .map_err(|err| XmlError::Syntax(err.to_string()))?;
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| XmlError::UnknownEntity(name.to_string()))
}
