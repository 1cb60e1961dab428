//! Entity catalog (all artists, all tags, ...).
//!
//! The page is a fragment whose header is an index switcher (two links, e.g.
//! "popular" / "A-Z"). Five `children` links below `root[1]` sit the anchors:
//!
//! ```text
//! ["$","a",key,{"href":"/artist/ito","title":"伊藤","children":[count, "Ito"]}]
//! ```

use tracing::{trace, warn};

use super::clean_name;
use crate::node::{walk, Children, ElementNode, Step, StreamNode};
use crate::result::TagInfo;
use crate::url_utils::path_segments;

const ANCHORS: &[Step<'static>] = &[
    Step::Slot(1),
    Step::Child(0),
    Step::Child(0),
    Step::Child(0),
    Step::Child(0),
    Step::Children,
];

/// Class fragment of the catalog header.
pub const INDEX_CLASS: &str = "index";

/// Whether a listing header is the catalog's index switcher.
#[must_use]
pub fn is_catalog_header(header: ElementNode<'_>) -> bool {
    if !header.has_class(INDEX_CLASS) {
        return false;
    }
    let children = header.children();
    children.len() == 2
        && children
            .iter()
            .all(|child| child.as_element().is_some_and(|e| e.href().is_some()))
}

/// Decodes the anchors of an entity catalog. A broken chain yields nothing.
#[must_use]
pub fn decode_catalog(root: &StreamNode) -> Vec<TagInfo> {
    let anchors = Children::of(walk(root, ANCHORS));
    if anchors.is_empty() {
        trace!("catalog anchor collection not found");
    }
    anchors
        .iter()
        .filter_map(StreamNode::as_element)
        .filter_map(decode_anchor)
        .collect()
}

fn decode_anchor(anchor: ElementNode<'_>) -> Option<TagInfo> {
    let href = anchor.href()?;
    let segments = path_segments(href);
    let [category, id] = segments.as_slice() else {
        warn!(href, "catalog href is not /category/id");
        return None;
    };
    if category.trim().is_empty() || id.trim().is_empty() {
        warn!(href, "catalog href has an empty segment");
        return None;
    }

    let Some(name) = anchor.prop_text("title").and_then(clean_name) else {
        trace!(href, "catalog entry without title");
        return None;
    };
    let english_name = anchor
        .child(1)
        .and_then(StreamNode::first_text)
        .as_deref()
        .and_then(clean_name);

    Some(TagInfo {
        id: (*id).to_string(),
        name,
        english_name,
        category: (*category).to_string(),
    })
}
