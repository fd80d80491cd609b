//! Tag whitelist normalization.
//!
//! Disallowed elements are unwrapped, never deleted, so their text stays in
//! place. Allowed elements lose every attribute.

use hashbrown::HashSet;
use log::debug;

use crate::packages::fragment::{Fragment, NodeId};

/// Unwrap every element whose tag is not in `allowed_tags` and clear the
/// attributes of the rest. Returns the number of elements unwrapped.
pub fn normalize_tags(fragment: &mut Fragment, allowed_tags: &HashSet<String>) -> usize {
    let root = fragment.root();
    let mut stack: Vec<NodeId> = fragment.children(root).iter().rev().copied().collect();
    let mut unwrapped = 0;

    while let Some(id) = stack.pop() {
        let allowed = match fragment.tag(id) {
            Some(tag) => allowed_tags.contains(tag),
            None => continue,
        };

        let children = if allowed {
            fragment.clear_attrs(id);
            fragment.children(id).to_vec()
        } else {
            unwrapped += 1;
            fragment.unwrap(id)
        };

        // spliced children are evaluated before the following siblings
        stack.extend(children.into_iter().rev());
    }

    debug!("whitelist pass: unwrapped={unwrapped}");

    unwrapped
}
