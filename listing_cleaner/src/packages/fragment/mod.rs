//! HTML fragments held in an index arena.
//!
//! The parser builds an `RcDom`; it is copied once into a [`Fragment`] whose
//! nodes live in a flat `Vec` and refer to each other by [`NodeId`]. Edits
//! (detach, replace, unwrap) only rewrite index lists, so ids collected
//! before an edit stay valid after it. A detached node keeps its subtree but
//! is no longer reachable from the root.

use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_fragment, LocalName, ParseOpts, QualName};
use markup5ever::{namespace_url, ns};
use markup5ever_rcdom::{Handle, NodeData as DomData, RcDom};
use std::io;

pub mod node;
mod serializable;

pub use node::{Element, Node, Text};

/// Stable handle to a node in a [`Fragment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Slot {
    value: Node,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An owned HTML fragment rooted at a synthetic container.
#[derive(Debug, Clone)]
pub struct Fragment {
    nodes: Vec<Slot>,
}

impl Default for Fragment {
    fn default() -> Self {
        Self::new()
    }
}

impl Fragment {
    /// Creates an empty fragment holding only the root.
    pub fn new() -> Self {
        Fragment {
            nodes: vec![Slot {
                value: Node::Root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Parses a string of HTML as the content of a `<body>` container.
    ///
    /// Parsing does not fail: malformed markup is repaired the way browsers
    /// repair it. Comments, doctypes and processing instructions are dropped.
    pub fn parse(html: &str) -> Self {
        let dom = parse_fragment(
            RcDom::default(),
            ParseOpts::default(),
            QualName::new(None, ns!(html), LocalName::from("body")),
            Vec::new(),
        )
        .one(html);

        let mut fragment = Fragment::new();
        let root = fragment.root();

        // The fragment parser nests its output under a synthetic <html>.
        let container = dom
            .document
            .children
            .borrow()
            .iter()
            .find(|child| matches!(child.data, DomData::Element { .. }))
            .cloned();

        if let Some(container) = container {
            let mut stack: Vec<(Handle, NodeId)> = container
                .children
                .borrow()
                .iter()
                .rev()
                .map(|child| (child.clone(), root))
                .collect();

            while let Some((handle, parent)) = stack.pop() {
                let value = match handle.data {
                    DomData::Text { ref contents } => Node::Text(Text {
                        text: contents.borrow().clone(),
                    }),
                    DomData::Element {
                        ref name,
                        ref attrs,
                        ..
                    } => Node::Element(Element::new(name.clone(), attrs.borrow().clone())),
                    _ => continue,
                };
                let is_element = value.is_element();
                let id = fragment.append(parent, value);

                if is_element {
                    stack.extend(
                        handle
                            .children
                            .borrow()
                            .iter()
                            .rev()
                            .map(|child| (child.clone(), id)),
                    );
                }
            }
        }

        fragment
    }

    /// The synthetic root.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Create a detached node.
    pub fn create(&mut self, value: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Slot {
            value,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create a node as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, value: Node) -> NodeId {
        let id = self.create(value);
        self.nodes[id.0].parent = Some(parent);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// The node value.
    pub fn value(&self, id: NodeId) -> &Node {
        &self.nodes[id.0].value
    }

    /// The node value, mutably.
    pub fn value_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0].value
    }

    /// The element behind `id`, if it is one.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.value(id).as_element()
    }

    /// Lowercase tag name of an element node.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(Element::name)
    }

    /// The parent link. `None` for the root and for detached nodes.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// The parent, provided it is an element and not the root.
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|p| self.value(*p).is_element())
    }

    /// Ordered children.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    fn position(&self, id: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.parent(id)?;
        let index = self.children(parent).iter().position(|c| *c == id)?;
        Some((parent, index))
    }

    /// Nearest preceding sibling that is an element.
    pub fn prev_sibling_element(&self, id: NodeId) -> Option<NodeId> {
        let (parent, index) = self.position(id)?;
        self.children(parent)[..index]
            .iter()
            .rev()
            .find(|c| self.value(**c).is_element())
            .copied()
    }

    /// Nearest following sibling that is an element.
    pub fn next_sibling_element(&self, id: NodeId) -> Option<NodeId> {
        self.following_sibling_elements(id).next()
    }

    /// Following sibling elements in document order.
    pub fn following_sibling_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let rest: &[NodeId] = match self.position(id) {
            Some((parent, index)) => &self.children(parent)[index + 1..],
            None => &[],
        };
        rest.iter()
            .copied()
            .filter(move |c| self.value(*c).is_element())
    }

    /// Number of parent hops up to the top of the tree `id` belongs to.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// True if the root is reachable through parent links.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root() {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Descendants of `id` in document order, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();

        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev());
        }

        out
    }

    /// Descendant elements of `id` whose tag is one of `tags`, in document order.
    pub fn select(&self, id: NodeId, tags: &[&str]) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|d| self.tag(*d).map_or(false, |t| tags.iter().any(|x| *x == t)))
            .collect()
    }

    /// Concatenated text of every text node under `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.value(id).as_text() {
            return text.to_string();
        }
        let mut out = String::new();
        for d in self.descendants(id) {
            if let Some(text) = self.value(d).as_text() {
                out.push_str(text);
            }
        }
        out
    }

    /// Detach `id` (and its subtree) from its parent. No-op when already detached.
    pub fn detach(&mut self, id: NodeId) -> bool {
        match self.position(id) {
            Some((parent, index)) => {
                self.nodes[parent.0].children.remove(index);
                self.nodes[id.0].parent = None;
                true
            }
            None => false,
        }
    }

    /// Put the detached node `new` where `old` sits and detach `old`.
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> bool {
        match self.position(old) {
            Some((parent, index)) => {
                self.detach(new);
                self.nodes[parent.0].children[index] = new;
                self.nodes[new.0].parent = Some(parent);
                self.nodes[old.0].parent = None;
                true
            }
            None => false,
        }
    }

    /// Splice the children of `id` into its parent at its position and drop
    /// the empty shell. Returns the moved children.
    pub fn unwrap(&mut self, id: NodeId) -> Vec<NodeId> {
        let (parent, index) = match self.position(id) {
            Some(position) => position,
            None => return Vec::new(),
        };
        let children = std::mem::take(&mut self.nodes[id.0].children);

        for child in children.iter() {
            self.nodes[child.0].parent = Some(parent);
        }
        self.nodes[parent.0]
            .children
            .splice(index..=index, children.iter().copied());
        self.nodes[id.0].parent = None;

        children
    }

    /// Remove every attribute of an element.
    pub fn clear_attrs(&mut self, id: NodeId) {
        if let Some(element) = self.value_mut(id).as_element_mut() {
            element.attrs.clear();
        }
    }

    /// Serialize the children of the root into HTML.
    pub fn inner_html(&self) -> io::Result<String> {
        let opts = SerializeOpts {
            scripting_enabled: false,
            traversal_scope: TraversalScope::ChildrenOnly(None),
            create_missing_parent: false,
        };
        let mut buf = Vec::new();
        serialize(&mut buf, self, opts)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
