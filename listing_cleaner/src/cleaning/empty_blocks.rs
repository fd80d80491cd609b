//! Removal of text-less block containers.

use log::debug;
use phf::phf_set;

use crate::packages::fragment::Fragment;
use crate::utils::is_blank;

/// Containers removed when they hold no text.
pub static EMPTY_BLOCK_TAGS: phf::Set<&'static str> = phf_set! {
    "p",
    "div",
};

/// Detach every block container whose trimmed text is empty. Returns the
/// number detached.
pub fn prune_empty_blocks(fragment: &mut Fragment) -> usize {
    let root = fragment.root();
    let mut pruned = 0;

    for id in fragment.descendants(root) {
        let is_block = fragment
            .tag(id)
            .map_or(false, |tag| EMPTY_BLOCK_TAGS.contains(tag));

        if is_block
            && fragment.is_attached(id)
            && is_blank(&fragment.text_content(id))
            && fragment.detach(id)
        {
            pruned += 1;
        }
    }

    debug!("empty block pass: pruned={pruned}");

    pruned
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn prune(html: &str) -> String {
        let mut fragment = Fragment::parse(html);
        prune_empty_blocks(&mut fragment);
        fragment.inner_html().unwrap()
    }

    #[test]
    fn drops_empty_and_whitespace_blocks() {
        assert_eq!(prune("<div></div><p>   </p><p>Keep</p>"), "<p>Keep</p>");
    }

    #[test]
    fn text_decides_not_children() {
        assert_eq!(
            prune("<div><p><br></p><span>&nbsp;</span></div><p><b>x</b></p>"),
            "<p><b>x</b></p>"
        );
    }

    #[test]
    fn other_tags_untouched() {
        assert_eq!(prune("<li></li><h2> </h2>"), "<li></li><h2> </h2>");
    }

    #[test]
    fn counts_outermost_only() {
        let mut fragment = Fragment::parse("<div><p></p><p></p></div>");
        assert_eq!(prune_empty_blocks(&mut fragment), 1);
    }
}
