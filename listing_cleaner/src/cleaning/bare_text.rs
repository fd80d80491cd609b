//! Paragraph wrapping for top level text.

use log::debug;

use crate::packages::fragment::{Element, Fragment, Node, NodeId, Text};
use crate::utils::trim_text;

/// Tag created around top level text.
pub const WRAPPER_TAG: &str = "p";

/// Replace each non-blank text node directly under the root with a paragraph
/// holding the trimmed text. Returns the number of nodes wrapped.
pub fn wrap_bare_text(fragment: &mut Fragment) -> usize {
    let root = fragment.root();
    let bare: Vec<(NodeId, String)> = fragment
        .children(root)
        .iter()
        .filter_map(|id| {
            let text = trim_text(fragment.value(*id).as_text()?);
            (!text.is_empty()).then(|| (*id, text.to_string()))
        })
        .collect();

    let wrapped = bare.len();

    for (id, text) in bare {
        let paragraph = fragment.create(Node::Element(Element::html(WRAPPER_TAG)));
        fragment.append(paragraph, Node::Text(Text::new(&text)));
        fragment.replace(id, paragraph);
    }

    debug!("bare text pass: wrapped={wrapped}");

    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn wrap(html: &str) -> String {
        let mut fragment = Fragment::parse(html);
        wrap_bare_text(&mut fragment);
        fragment.inner_html().unwrap()
    }

    #[test]
    fn plain_text_gets_paragraph() {
        assert_eq!(wrap("Plain text with no tags"), "<p>Plain text with no tags</p>");
    }

    #[test]
    fn only_top_level_text_is_wrapped() {
        assert_eq!(
            wrap("  lead <p>inner</p>\n<b>bold</b> tail  "),
            "<p>lead</p><p>inner</p>\n<b>bold</b><p>tail</p>"
        );
    }
}
