//! Table to list conversion.

use log::debug;

use crate::packages::fragment::{Element, Fragment, Node, NodeId, Text};
use crate::utils::trim_text;

/// Joins the cell texts of one row.
pub const CELL_SEPARATOR: &str = " – ";

/// Text of one row: trimmed cell texts joined by [`CELL_SEPARATOR`].
pub fn row_text(fragment: &Fragment, row: NodeId) -> String {
    fragment
        .select(row, &["td", "th"])
        .into_iter()
        .map(|cell| trim_text(&fragment.text_content(cell)).to_string())
        .collect::<Vec<_>>()
        .join(CELL_SEPARATOR)
}

/// Build a detached `ul` holding one `li` per row of `table`.
fn table_to_list(fragment: &mut Fragment, table: NodeId) -> NodeId {
    let rows: Vec<String> = fragment
        .select(table, &["tr"])
        .into_iter()
        .map(|row| row_text(fragment, row))
        .collect();

    let list = fragment.create(Node::Element(Element::html("ul")));

    for row in rows {
        let item = fragment.append(list, Node::Element(Element::html("li")));
        // rows without cells still count
        if !row.is_empty() {
            fragment.append(item, Node::Text(Text::new(&row)));
        }
    }

    list
}

/// Replace every attached table with a list. Returns the number converted.
pub fn flatten_tables(fragment: &mut Fragment) -> usize {
    let root = fragment.root();
    let mut flattened = 0;

    for table in fragment.select(root, &["table"]) {
        // nested in a table converted earlier
        if !fragment.is_attached(table) {
            continue;
        }
        let list = table_to_list(fragment, table);
        if fragment.replace(table, list) {
            flattened += 1;
        }
    }

    debug!("table pass: flattened={flattened}");

    flattened
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn flatten(html: &str) -> String {
        let mut fragment = Fragment::parse(html);
        flatten_tables(&mut fragment);
        fragment.inner_html().unwrap()
    }

    #[test]
    fn rows_become_items() {
        assert_eq!(
            flatten("<table><tr><th> Size </th><th>EU</th></tr><tr><td>M</td><td><b>40</b></td></tr></table>"),
            "<ul><li>Size – EU</li><li>M – 40</li></ul>"
        );
    }

    #[test]
    fn empty_row_keeps_item() {
        assert_eq!(
            flatten("<table><tr></tr><tr><td>x</td></tr></table>"),
            "<ul><li></li><li>x</li></ul>"
        );
    }

    #[test]
    fn list_takes_table_position() {
        assert_eq!(
            flatten("<div>a<table><tr><td>1</td></tr></table>b</div>"),
            "<div>a<ul><li>1</li></ul>b</div>"
        );
    }

    #[test]
    fn nested_table_rows_follow_outer_table() {
        let mut fragment = Fragment::parse(
            "<table><tr><td>a<table><tr><td>b</td></tr></table></td></tr></table>",
        );
        assert_eq!(flatten_tables(&mut fragment), 1);
        assert_eq!(
            fragment.inner_html().unwrap(),
            "<ul><li>ab – b</li><li>b</li></ul>"
        );
    }
}
