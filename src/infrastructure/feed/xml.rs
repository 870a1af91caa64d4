//! Minimal namespace-aware element tree built on `quick-xml`.
//!
//! Feed translators need random access to children (first `title`, every
//! `category`, nested `itunes:category`), so the event stream is folded into
//! an owned tree before translation. Text and child elements are kept in
//! document order so mixed content can be read back unchanged.

use std::borrow::Cow;

use quick_xml::NsReader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::Reader;

use crate::error::FeedError;

/// Maximum element nesting accepted in a feed document.
pub const MAX_DEPTH: usize = 64;

/// Content of an element, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Character data; CDATA sections are stored verbatim.
    Text(String),
    Element(Element),
}

/// An XML element with its resolved namespace URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub namespace: Option<String>,
    pub name: String,
    /// Attributes keyed by their qualified name (`href`, `xml:lang`).
    pub attributes: Vec<(String, String)>,
    pub nodes: Vec<Node>,
}

impl Element {
    /// True when the element has local name `name` in namespace `ns`.
    ///
    /// `None` matches only elements outside any namespace. Namespace URIs
    /// compare case-insensitively because podcast feeds disagree on the
    /// capitalization of the iTunes DTD URI.
    pub fn is(&self, ns: Option<&str>, name: &str) -> bool {
        self.name == name && same_namespace(self.namespace.as_deref(), ns)
    }

    /// True when the element lives in namespace `ns`.
    pub fn in_namespace(&self, ns: &str) -> bool {
        same_namespace(self.namespace.as_deref(), Some(ns))
    }

    /// Child elements, skipping text.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    pub fn has_children(&self) -> bool {
        self.children().next().is_some()
    }

    pub fn child(&self, ns: Option<&str>, name: &str) -> Option<&Element> {
        self.children().find(|c| c.is(ns, name))
    }

    pub fn children_named<'a>(
        &'a self,
        ns: Option<&'a str>,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children().filter(move |c| c.is(ns, name))
    }

    /// Trimmed text of the first matching child, if non-empty.
    pub fn child_text(&self, ns: Option<&str>, name: &str) -> Option<String> {
        self.child(ns, name).and_then(Element::trimmed_text)
    }

    /// Trimmed, non-empty texts of every matching child, in document order.
    pub fn children_text(&self, ns: Option<&str>, name: &str) -> Vec<String> {
        self.children_named(ns, name)
            .filter_map(Element::trimmed_text)
            .collect()
    }

    /// The element's own character data, ignoring child elements.
    pub fn text(&self) -> String {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    pub fn trimmed_text(&self) -> Option<String> {
        non_blank(&self.text())
    }

    /// Serialized content between the element's start and end tags.
    ///
    /// Elements are written with their local names; namespace declarations
    /// are not reproduced.
    pub fn inner_xml(&self) -> Option<String> {
        let mut out = String::new();
        write_nodes(&self.nodes, &mut out);
        non_blank(&out)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.trim().is_empty())
    }
}

fn non_blank(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn write_nodes(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(&escape(text.as_str())),
            Node::Element(element) => {
                out.push('<');
                out.push_str(&element.name);
                for (key, value) in &element.attributes {
                    if key == "xmlns" || key.starts_with("xmlns:") {
                        continue;
                    }
                    out.push_str(&format!(" {}=\"{}\"", key, escape(value.as_str())));
                }
                if element.nodes.is_empty() {
                    out.push_str("/>");
                } else {
                    out.push('>');
                    write_nodes(&element.nodes, out);
                    out.push_str(&format!("</{}>", element.name));
                }
            }
        }
    }
}

fn same_namespace(actual: Option<&str>, expected: Option<&str>) -> bool {
    match (actual, expected) {
        (None, None) => true,
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

/// Parses a complete document and returns its root element.
///
/// The encoding named in the XML declaration is honoured. Predefined XML and
/// HTML5 named entities are expanded; `quick-xml` never expands custom
/// `<!ENTITY>` declarations, so documents cannot pull in external resources.
///
/// # Errors
///
/// Returns [`FeedError::Parse`] for malformed XML, an undefined entity, a
/// missing root element or nesting deeper than [`MAX_DEPTH`].
pub fn parse_document(bytes: &[u8]) -> Result<Element, FeedError> {
    let mut reader = NsReader::from_reader(bytes);

    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        let (resolved, event) = reader.read_resolved_event_into(&mut buf).map_err(parse_error)?;
        let namespace = namespace_uri(resolved);

        match event {
            Event::Start(e) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(FeedError::Parse(format!(
                        "nesting depth exceeds maximum of {MAX_DEPTH} levels"
                    )));
                }
                stack.push(open_element(&reader, namespace, &e)?);
            }
            Event::Empty(e) => {
                let element = open_element(&reader, namespace, &e)?;
                close_element(element, &mut stack, &mut root);
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    close_element(element, &mut stack, &mut root);
                }
            }
            Event::Text(e) => {
                if let Some(current) = stack.last_mut() {
                    push_text(current, e.unescape().map_err(parse_error)?);
                }
            }
            Event::CData(e) => {
                if let Some(current) = stack.last_mut() {
                    push_text(current, e.decode().map_err(parse_error)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    root.ok_or_else(|| FeedError::Parse("document has no root element".to_string()))
}

fn parse_error(e: impl std::fmt::Display) -> FeedError {
    FeedError::Parse(e.to_string())
}

fn push_text(element: &mut Element, text: Cow<'_, str>) {
    match element.nodes.last_mut() {
        Some(Node::Text(last)) => last.push_str(&text),
        _ => element.nodes.push(Node::Text(text.into_owned())),
    }
}

fn namespace_uri(resolved: ResolveResult<'_>) -> Option<String> {
    match resolved {
        ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
        _ => None,
    }
}

fn open_element(
    reader: &Reader<&[u8]>,
    namespace: Option<String>,
    e: &BytesStart<'_>,
) -> Result<Element, FeedError> {
    let decoder = reader.decoder();
    let mut attributes = Vec::new();

    for attr in e.attributes() {
        let attr = match attr {
            Ok(attr) => attr,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping malformed attribute");
                continue;
            }
        };
        let key = decoder.decode(attr.key.as_ref()).map_err(parse_error)?;
        let value = attr
            .decode_and_unescape_value(decoder)
            .map_err(parse_error)?;
        attributes.push((key.into_owned(), value.into_owned()));
    }

    let name = decoder
        .decode(e.local_name().as_ref())
        .map_err(parse_error)?
        .into_owned();

    Ok(Element {
        namespace,
        name,
        attributes,
        nodes: Vec::new(),
    })
}

fn close_element(element: Element, stack: &mut [Element], root: &mut Option<Element>) {
    match stack.last_mut() {
        Some(parent) => parent.nodes.push(Node::Element(element)),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}
