use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{CompareError, Result};

/// A parsed XML element with namespace-stripped tag name.
///
/// Text is accumulated from the character data directly inside the element;
/// for the leaf nodes the comparator cares about that is the whole content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Local tag name (namespace prefix removed)
    pub tag: String,

    /// Attributes in document order, xmlns declarations excluded
    pub attributes: Vec<(String, String)>,

    /// Character data inside this element
    pub text: String,

    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    /// True when this element has no child elements
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

fn element_from_start(e: &BytesStart<'_>) -> Result<Element> {
    let tag = String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| CompareError::parse(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }
        let value = attr
            .unescape_value()
            .map_err(|err| CompareError::parse(err.to_string()))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        tag,
        attributes,
        text: String::new(),
        children: Vec::new(),
    })
}

/// Parse an XML document into an element tree.
///
/// Malformed markup (mismatched tags, bad entities, truncated input) comes
/// back as [`CompareError::Parse`] with the underlying reader message. A
/// document with no root element, or more than one, is also a parse error.
pub fn parse(text: &str) -> Result<Element> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                if root.is_some() && stack.is_empty() {
                    return Err(CompareError::parse("multiple root elements"));
                }
                stack.push(element_from_start(e)?);
            }
            Ok(Event::Empty(ref e)) => {
                let element = element_from_start(e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None if root.is_none() => root = Some(element),
                    None => return Err(CompareError::parse("multiple root elements")),
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some(current) = stack.last_mut() {
                    let unescaped = e
                        .unescape()
                        .map_err(|err| CompareError::parse(err.to_string()))?;
                    current.text.push_str(&unescaped);
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::End(_)) => {
                // The reader rejects mismatched end tags before we get here.
                let element = stack
                    .pop()
                    .ok_or_else(|| CompareError::parse("unexpected closing tag"))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(CompareError::parse(err.to_string())),
        }
    }

    if !stack.is_empty() {
        return Err(CompareError::parse("unclosed element at end of document"));
    }
    root.ok_or_else(|| CompareError::parse("no root element"))
}
