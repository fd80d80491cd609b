use std::io::Error;

use html5ever::serialize::{Serialize, Serializer, TraversalScope};

use super::{Fragment, Node, NodeId};

impl Serialize for Fragment {
    fn serialize<S: Serializer>(
        &self,
        serializer: &mut S,
        traversal_scope: TraversalScope,
    ) -> Result<(), Error> {
        serialize(self, self.root(), serializer, traversal_scope)
    }
}

enum Edge {
    Open(NodeId),
    Close(NodeId),
}

/// Walk the subtree at `start` without recursion, emitting open and close edges.
fn serialize<S: Serializer>(
    fragment: &Fragment,
    start: NodeId,
    serializer: &mut S,
    traversal_scope: TraversalScope,
) -> Result<(), Error> {
    let children_only = matches!(traversal_scope, TraversalScope::ChildrenOnly(_));
    let mut stack = vec![Edge::Open(start)];

    while let Some(edge) = stack.pop() {
        match edge {
            Edge::Open(id) => {
                stack.push(Edge::Close(id));
                stack.extend(fragment.children(id).iter().rev().map(|c| Edge::Open(*c)));

                if id == start && children_only {
                    continue;
                }
                match *fragment.value(id) {
                    Node::Text(ref text) => serializer.write_text(text)?,
                    Node::Element(ref elem) => {
                        let attrs = elem.attrs.iter().map(|a| (&a.name, &a.value[..]));
                        serializer.start_elem(elem.name.clone(), attrs)?;
                    }
                    Node::Root => (),
                }
            }
            Edge::Close(id) => {
                if id == start && children_only {
                    continue;
                }
                if let Some(elem) = fragment.value(id).as_element() {
                    serializer.end_elem(elem.name.clone())?;
                }
            }
        }
    }

    Ok(())
}
