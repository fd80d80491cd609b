//! Media removal and orphaned caption detection.
//!
//! Marking is read only and happens for every image and table before the
//! tree changes. The marked nodes are then detached shallowest first, so a
//! node whose ancestor is already gone is skipped instead of touched.

use hashbrown::HashSet;
use log::debug;

use super::Cleaner;
use crate::packages::fragment::{Fragment, NodeId};

const IMAGE_TAG: &str = "img";
const TABLE_TAG: &str = "table";
const ANCHOR_TAG: &str = "a";

/// Insertion ordered set of nodes to delete.
#[derive(Debug, Default)]
pub struct RemovalSet {
    order: Vec<NodeId>,
    seen: HashSet<NodeId>,
}

impl RemovalSet {
    /// Queue a node for removal. Returns false if it was queued already.
    pub fn mark(&mut self, id: NodeId) -> bool {
        if self.seen.insert(id) {
            self.order.push(id);
            true
        } else {
            false
        }
    }

    /// Number of queued nodes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Detach every queued node that is still attached, shallowest first.
    /// Returns the number of nodes actually detached.
    pub fn apply(self, fragment: &mut Fragment) -> usize {
        let mut order = self.order;
        // stable, equal depths keep marking order
        order.sort_by_cached_key(|id| fragment.depth(*id));

        let mut removed = 0;

        for id in order {
            if fragment.is_attached(id) && fragment.detach(id) {
                removed += 1;
            }
        }

        removed
    }
}

/// The nearest element, starting at `start` and walking up, that has a
/// following sibling element. Never returns the root.
pub fn block_ancestor(fragment: &Fragment, start: Option<NodeId>) -> Option<NodeId> {
    let mut current = start;

    while let Some(id) = current {
        if fragment.next_sibling_element(id).is_some() {
            return Some(id);
        }
        current = fragment.parent_element(id);
    }

    None
}

/// Mark caption candidates around one media element.
fn mark_captions(fragment: &Fragment, media: NodeId, cleaner: &Cleaner, marks: &mut RemovalSet) {
    let is_orphan = |id: NodeId| cleaner.orphans.is_orphan(&fragment.text_content(id));
    let parent = fragment.parent_element(media);

    if let Some(parent) = parent {
        if is_orphan(parent) {
            marks.mark(parent);
        }
    }

    if let Some(prev) = fragment.prev_sibling_element(media) {
        if is_orphan(prev) {
            marks.mark(prev);
        }
    }

    if let Some(next) = fragment.next_sibling_element(media) {
        if is_orphan(next) {
            marks.mark(next);
        }
    }

    if let Some(block) = block_ancestor(fragment, parent) {
        if let Some(caption) = fragment
            .following_sibling_elements(block)
            .take(cleaner.caption_scan_limit)
            .find(|sibling| is_orphan(*sibling))
        {
            marks.mark(caption);
        }
    }
}

/// Collect every node the media pass deletes.
pub fn mark_media(fragment: &Fragment, cleaner: &Cleaner) -> RemovalSet {
    let mut marks = RemovalSet::default();
    let root = fragment.root();

    for media in fragment.select(root, &[IMAGE_TAG, TABLE_TAG]) {
        let is_image = fragment.tag(media) == Some(IMAGE_TAG);

        if is_image || !cleaner.tables_to_lists {
            marks.mark(media);
        }

        mark_captions(fragment, media, cleaner, &mut marks);

        if is_image {
            if let Some(parent) = fragment.parent_element(media) {
                if fragment.tag(parent) == Some(ANCHOR_TAG) {
                    marks.mark(parent);
                }
            }
        }
    }

    if !cleaner.remove_tags.is_empty() {
        for id in fragment.descendants(root) {
            if fragment
                .tag(id)
                .map_or(false, |tag| cleaner.remove_tags.contains(tag))
            {
                marks.mark(id);
            }
        }
    }

    marks
}

/// Mark and delete media, captions and dropped tags. Returns the number of
/// nodes detached.
pub fn strip_media(fragment: &mut Fragment, cleaner: &Cleaner) -> usize {
    let marks = mark_media(fragment, cleaner);
    let marked = marks.len();
    let removed = marks.apply(fragment);

    debug!("media pass: marked={marked} removed={removed}");

    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::CleaningConfig;
    use pretty_assertions::assert_eq;

    fn cleaner(phrases: &[&str], tables_to_lists: bool) -> Cleaner {
        let mut config = CleaningConfig::default();
        config
            .with_orphan_phrases(phrases.iter())
            .with_tables_to_lists(tables_to_lists);
        Cleaner::new(&config)
    }

    fn strip(html: &str, cleaner: &Cleaner) -> String {
        let mut fragment = Fragment::parse(html);
        strip_media(&mut fragment, cleaner);
        fragment.inner_html().unwrap()
    }

    #[test]
    fn images_removed_without_phrases() {
        let c = cleaner(&[], false);
        assert_eq!(strip(r#"<p>a<img src="x.jpg">b</p>"#, &c), "<p>ab</p>");
    }

    #[test]
    fn parent_caption_removed_with_image() {
        let c = cleaner(&["photo above"], false);
        assert_eq!(
            strip(r#"<p><img src="x.jpg"><br>see photo above</p><p>keep</p>"#, &c),
            "<p>keep</p>"
        );
    }

    #[test]
    fn sibling_captions_removed_at_top_level() {
        let c = cleaner(&["viz foto"], false);
        assert_eq!(
            strip("<span>Viz foto</span><img src=a><em>viz foto níže</em><b>stay</b>", &c),
            "<b>stay</b>"
        );
    }

    #[test]
    fn matching_parent_takes_siblings_with_it() {
        let c = cleaner(&["viz foto"], false);
        assert_eq!(
            strip("<div><span>viz foto</span><img src=a><b>x</b></div><p>y</p>", &c),
            "<p>y</p>"
        );
    }

    #[test]
    fn image_in_anchor_drops_anchor() {
        let c = cleaner(&[], false);
        assert_eq!(
            strip(r#"<p>x<a href="/big.jpg"><img src="small.jpg">zoom</a>y</p>"#, &c),
            "<p>xy</p>"
        );
    }

    #[test]
    fn forward_scan_from_block_ancestor() {
        let c = cleaner(&["size chart"], false);
        let html = "<p><a href=#><img src=a></a></p><p>one</p><p>two</p><p>Size chart above</p><p>size chart again</p>";
        assert_eq!(
            strip(html, &c),
            "<p></p><p>one</p><p>two</p><p>size chart again</p>"
        );
    }

    #[test]
    fn forward_scan_is_bounded() {
        let mut config = CleaningConfig::default();
        config
            .with_orphan_phrases(["caption"])
            .with_caption_scan_limit(2);
        let c = Cleaner::new(&config);
        let html = "<div><img src=a></div><p>one</p><p>two</p><p>caption</p>";
        assert_eq!(strip(html, &c), "<div></div><p>one</p><p>two</p><p>caption</p>");
    }

    #[test]
    fn tables_kept_for_flattening_but_captions_still_marked() {
        let c = cleaner(&["table below"], true);
        assert_eq!(
            strip("<p>See table below</p><table><tr><td>x</td></tr></table>", &c),
            "<table><tbody><tr><td>x</td></tr></tbody></table>"
        );
        let c = cleaner(&[], false);
        assert_eq!(strip("<p>a</p><table><tr><td>x</td></tr></table>", &c), "<p>a</p>");
    }

    #[test]
    fn media_at_root_has_no_block_ancestor() {
        let fragment = Fragment::parse("<img src=a><p>x</p>");
        let img = fragment.select(fragment.root(), &["img"])[0];
        assert_eq!(block_ancestor(&fragment, fragment.parent_element(img)), None);
    }

    #[test]
    fn removal_skips_detached_descendants() {
        let mut fragment = Fragment::parse("<div><p><b>x</b></p></div><i>y</i>");
        let root = fragment.root();
        let b = fragment.select(root, &["b"])[0];
        let div = fragment.select(root, &["div"])[0];
        let mut marks = RemovalSet::default();
        assert!(marks.mark(b));
        assert!(marks.mark(div));
        assert!(!marks.mark(div));
        assert_eq!(marks.apply(&mut fragment), 1);
        assert_eq!(fragment.inner_html().unwrap(), "<i>y</i>");
    }

    #[test]
    fn remove_tags_drop_content() {
        let mut config = CleaningConfig::default();
        config.with_remove_tags(["script", "style"]);
        let c = Cleaner::new(&config);
        assert_eq!(
            strip("<p>a<script>alert(1)</script></p><style>p{}</style>", &c),
            "<p>a</p>"
        );
    }
}
