//! Fragment nodes.

use html5ever::tendril::StrTendril;
use html5ever::{Attribute, LocalName, QualName};
use markup5ever::{namespace_url, ns};
use std::fmt;
use std::ops::Deref;

/// A node stored in a [`Fragment`](super::Fragment) arena.
#[derive(Clone)]
pub enum Node {
    /// The synthetic container every fragment hangs from.
    Root,

    /// Text.
    Text(Text),

    /// An element.
    Element(Element),
}

impl Node {
    /// Returns true if node is an element.
    pub fn is_element(&self) -> bool {
        matches!(*self, Node::Element(_))
    }

    /// Returns self as text.
    pub fn as_text(&self) -> Option<&Text> {
        match *self {
            Node::Text(ref t) => Some(t),
            _ => None,
        }
    }

    /// Returns self as an element.
    pub fn as_element(&self) -> Option<&Element> {
        match *self {
            Node::Element(ref e) => Some(e),
            _ => None,
        }
    }

    /// Returns self as a mutable element.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match *self {
            Node::Element(ref mut e) => Some(e),
            _ => None,
        }
    }
}

// Always use one line.
impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match *self {
            Node::Root => write!(f, "Root"),
            Node::Text(ref t) => write!(f, "Text({:?})", t),
            Node::Element(ref e) => write!(f, "Element({:?})", e),
        }
    }
}

/// HTML text.
#[derive(Clone, PartialEq, Eq)]
pub struct Text {
    /// The text.
    pub text: StrTendril,
}

impl Text {
    /// Text node holding `text`.
    pub fn new(text: &str) -> Self {
        Text {
            text: StrTendril::from_slice(text),
        }
    }
}

impl Deref for Text {
    type Target = str;

    fn deref(&self) -> &str {
        self.text.deref()
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{:?}", self.deref())
    }
}

/// An HTML element. The local name is always lowercase.
#[derive(Clone, PartialEq, Eq)]
pub struct Element {
    /// The element name.
    pub name: QualName,

    /// The element attributes in source order.
    pub attrs: Vec<Attribute>,
}

impl Element {
    /// Build an element from parser output, folding the tag name to lowercase.
    pub fn new(name: QualName, attrs: Vec<Attribute>) -> Self {
        let name = if name.local.bytes().any(|b| b.is_ascii_uppercase()) {
            QualName::new(
                name.prefix,
                name.ns,
                LocalName::from(name.local.to_ascii_lowercase()),
            )
        } else {
            name
        };

        Element { name, attrs }
    }

    /// A fresh attribute-less html element.
    pub fn html(tag: &str) -> Self {
        Element::new(
            QualName::new(None, ns!(html), LocalName::from(tag)),
            Vec::new(),
        )
    }

    /// Returns the element name.
    pub fn name(&self) -> &str {
        self.name.local.deref()
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "<{}", self.name())?;
        for a in self.attrs.iter() {
            write!(f, " {}={:?}", a.name.local.deref(), a.value.deref())?;
        }
        write!(f, ">")
    }
}
