//! In-memory XML element tree.
//!
//! Offers are exported by appending their attribute maps to an [`Element`]
//! with [`append_map`]. The finished tree is rendered through an
//! [`XmlWriter`].

use crate::error::{Error, Result};
use crate::value::{AttributeMap, Value};
use crate::writer::{XmlOptions, XmlWriter};
use std::io::{self, Write};

/// A child of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Nested element.
    Element(Element),
    /// Escaped text content.
    Text(String),
    /// Text written inside a CDATA section.
    CData(String),
}

/// An XML element with ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    children: Vec<Node>,
}

impl Element {
    /// Creates an empty element.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// The element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All child nodes in document order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Whether the element has no children at all.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Appends a child element and returns a reference to it.
    pub fn append(&mut self, child: Element) -> &mut Element {
        self.children.push(Node::Element(child));
        match self.children.last_mut() {
            Some(Node::Element(element)) => element,
            _ => unreachable!("an element was just pushed"),
        }
    }

    /// Appends escaped text.
    pub fn push_text<S: Into<String>>(&mut self, text: S) {
        self.children.push(Node::Text(text.into()));
    }

    /// Appends a CDATA section.
    pub fn push_cdata<S: Into<String>>(&mut self, data: S) {
        self.children.push(Node::CData(data.into()));
    }

    /// Child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// The first child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name == name)
    }

    /// Every child element with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |element| element.name == name)
    }

    /// Whether any direct content of this element is CDATA.
    pub fn is_cdata(&self) -> bool {
        self.children.iter().any(|node| matches!(node, Node::CData(_)))
    }

    /// Concatenated text and CDATA content of this element and its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Element(element) => element.collect_text(out),
                Node::Text(text) | Node::CData(text) => out.push_str(text),
            }
        }
    }

    /// Writes this element and its descendants.
    pub fn write_to<W: Write>(&self, writer: &mut XmlWriter<W>) -> io::Result<()> {
        match self.children.as_slice() {
            [Node::Text(text)] => return writer.write_leaf(&self.name, text, false),
            [Node::CData(data)] => return writer.write_leaf(&self.name, data, true),
            _ => {}
        }

        writer.start_element(&self.name)?;
        for node in &self.children {
            match node {
                Node::Element(element) => element.write_to(writer)?,
                Node::Text(text) => writer.write_text(text)?,
                Node::CData(data) => writer.write_cdata(data)?,
            }
        }
        writer.end_element()
    }

    /// Writes this element as the root of a document.
    pub fn write_document<W: Write>(&self, out: W, options: &XmlOptions) -> io::Result<W> {
        let mut writer = XmlWriter::from_options(out, options);
        if options.declaration {
            writer.write_declaration()?;
        }
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(writer.into_inner())
    }

    /// Renders this element as a document string.
    pub fn to_xml_string(&self, options: &XmlOptions) -> io::Result<String> {
        let buffer = self.write_document(Vec::new(), options)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Whether `name` matches the XML `Name` production.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}')
}

/// Appends every truthy entry of `map` to `node` as child elements.
///
/// Nested maps become container elements, lists repeat the element once per
/// item, and scalars become leaf text. Keys listed in `cdata_fields` have
/// their text wrapped in CDATA at every depth.
///
/// Every key that would become an element is checked first; an invalid name
/// fails with nothing appended.
pub fn append_map(
    node: &mut Element,
    map: &AttributeMap,
    cdata_fields: &[&str],
) -> Result<()> {
    check_names(map)?;
    append_entries(node, map, cdata_fields);
    Ok(())
}

fn check_names(map: &AttributeMap) -> Result<()> {
    for (key, value) in map {
        if !value.is_truthy() {
            continue;
        }
        if !is_valid_name(key) {
            return Err(Error::invalid_element_name(key.as_str()));
        }
        check_nested(value)?;
    }
    Ok(())
}

fn check_nested(value: &Value) -> Result<()> {
    match value {
        Value::Map(nested) => check_names(nested),
        Value::List(items) => items.iter().try_for_each(check_nested),
        _ => Ok(()),
    }
}

fn append_entries(node: &mut Element, map: &AttributeMap, cdata_fields: &[&str]) {
    for (key, value) in map {
        append_value(node, key, value, cdata_fields);
    }
}

fn append_value(node: &mut Element, key: &str, value: &Value, cdata_fields: &[&str]) {
    if !value.is_truthy() {
        return;
    }

    match value {
        Value::Map(nested) => {
            let child = node.append(Element::new(key));
            append_entries(child, nested, cdata_fields);
        }
        Value::List(items) => {
            for item in items {
                append_value(node, key, item, cdata_fields);
            }
        }
        scalar => {
            let Some(text) = scalar.to_text() else {
                return;
            };
            let child = node.append(Element::new(key));
            if cdata_fields.contains(&key) {
                child.push_cdata(text);
            } else {
                child.push_text(text);
            }
        }
    }
}
