//! Forward-only, namespace-aware node cursor over a markup document.
//!
//! Wraps `quick_xml::Reader` and resolves prefixes itself, so every element
//! and attribute comes out with its namespace URI attached. Comments,
//! processing instructions and the XML declaration are skipped.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::HydrateError;
use crate::namespaces::{XML_NS, XMLNS_NS};

// ── Nodes ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Name as written, e.g. `x:Key`.
    pub qname: String,
    /// Name without its prefix, e.g. `Key`.
    pub local: String,
    /// Namespace URI. Unprefixed attributes have none (empty string).
    pub namespace: String,
    /// Value with entities expanded.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    pub qname: String,
    pub local: String,
    pub namespace: String,
    pub attributes: Vec<Attribute>,
    /// `<Label />` form: no content and no matching end node follows.
    pub self_closing: bool,
}

impl StartTag {
    /// Attribute by namespace and local name.
    pub fn attribute(&self, namespace: &str, local: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.namespace == namespace && a.local == local)
    }

    /// Property elements are spelled `Owner.Property`.
    pub fn is_property_element(&self) -> bool {
        self.local.contains('.')
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(StartTag),
    EndElement { qname: String },
    Text(String),
    Whitespace,
    Eof,
}

// ── Cursor ────────────────────────────────────────────────────────────────

pub struct Cursor<'s> {
    src: &'s str,
    reader: Reader<&'s [u8]>,
    /// One `(prefix, uri)` list per open element; the default namespace uses
    /// the empty prefix.
    scopes: Vec<Vec<(String, String)>>,
    /// Byte offset where the most recent node started.
    node_start: usize,
}

impl<'s> Cursor<'s> {
    pub fn new(src: &'s str) -> Self {
        Self {
            src,
            reader: Reader::from_str(src),
            scopes: Vec::new(),
            node_start: 0,
        }
    }

    /// 1-based line and column of the most recent node.
    pub fn position(&self) -> (usize, usize) {
        let upto = &self.src[..self.node_start.min(self.src.len())];
        let line = upto.matches('\n').count() + 1;
        let col = match upto.rfind('\n') {
            Some(nl) => upto[nl + 1..].chars().count() + 1,
            None => upto.chars().count() + 1,
        };
        (line, col)
    }

    /// A structure error pinned to the most recent node.
    pub fn error(&self, message: impl Into<String>) -> HydrateError {
        HydrateError::structure(message).at(self.position())
    }

    pub fn next_node(&mut self) -> Result<Node, HydrateError> {
        loop {
            self.node_start = self.reader.buffer_position() as usize;
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(e) => return Err(self.error(format!("malformed markup: {e}"))),
            };
            match event {
                Event::Start(e) => {
                    let tag = self.open(&e, false)?;
                    return Ok(Node::Element(tag));
                }
                Event::Empty(e) => {
                    let tag = self.open(&e, true);
                    self.scopes.pop();
                    return tag.map(Node::Element);
                }
                Event::End(e) => {
                    self.scopes.pop();
                    let qname = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    return Ok(Node::EndElement { qname });
                }
                Event::Text(e) => {
                    let text = match e.unescape() {
                        Ok(text) => text.into_owned(),
                        Err(err) => return Err(self.error(format!("bad text content: {err}"))),
                    };
                    if text.trim().is_empty() {
                        return Ok(Node::Whitespace);
                    }
                    return Ok(Node::Text(text));
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    return Ok(Node::Text(text));
                }
                Event::Eof => return Ok(Node::Eof),
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {
                    log::trace!("skipping non-content node");
                }
            }
        }
    }

    /// Push the element's namespace scope and resolve its names.
    fn open(&mut self, e: &BytesStart<'_>, self_closing: bool) -> Result<StartTag, HydrateError> {
        let mut raw = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| self.error(format!("bad attribute: {err}")))?;
            let qname = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|err| self.error(format!("bad value for `{qname}`: {err}")))?
                .into_owned();
            raw.push((qname, value));
        }

        let scope = raw
            .iter()
            .filter_map(|(qname, value)| match split_qname(qname) {
                (None, "xmlns") => Some((String::new(), value.clone())),
                (Some("xmlns"), prefix) => Some((prefix.to_string(), value.clone())),
                _ => None,
            })
            .collect();
        self.scopes.push(scope);

        let qname = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let (prefix, local) = split_qname(&qname);
        let namespace = self.namespace_of(prefix.unwrap_or(""))?.to_string();
        let local = local.to_string();

        let mut attributes = Vec::with_capacity(raw.len());
        for (qname, value) in raw {
            let (prefix, local) = split_qname(&qname);
            let namespace = match (prefix, local) {
                (None, "xmlns") | (Some("xmlns"), _) => XMLNS_NS.to_string(),
                (None, _) => String::new(),
                (Some(p), _) => self.namespace_of(p)?.to_string(),
            };
            let local = local.to_string();
            attributes.push(Attribute { qname, local, namespace, value });
        }

        Ok(StartTag { qname, local, namespace, attributes, self_closing })
    }

    fn namespace_of(&self, prefix: &str) -> Result<&str, HydrateError> {
        match prefix {
            "xml" => return Ok(XML_NS),
            "xmlns" => return Ok(XMLNS_NS),
            _ => {}
        }
        let bound = self
            .scopes
            .iter()
            .rev()
            .flat_map(|scope| scope.iter())
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str());
        match (bound, prefix) {
            (Some(uri), _) => Ok(uri),
            (None, "") => Ok(""),
            (None, p) => Err(self.error(format!("undeclared namespace prefix `{p}`"))),
        }
    }
}

fn split_qname(qname: &str) -> (Option<&str>, &str) {
    match qname.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, qname),
    }
}
