//! Search result grid.
//!
//! On search pages the root is one element. The grid sits at
//! `root.children[1]`; when that position is absent, it is the first element
//! with a grid class under `root.children[0]`, searched child by child.
//! Cards carry the comic directly: `{ "id", "title", "cover" }`.

use tracing::debug;

use super::items::collect_items;
use super::{build_comic, dedupe_by_id, keep_valid};
use crate::node::{ElementNode, StreamNode};
use crate::options::Options;
use crate::result::Comic;

/// Class fragment marking a card grid.
pub const GRID_CLASS: &str = "grid";

/// Finds the result grid of an element-rooted page.
#[must_use]
pub fn locate_grid(root: &StreamNode) -> Option<ElementNode<'_>> {
    let root = root.as_element()?;
    match root.child(1) {
        Some(shallow) => shallow.as_element().filter(|e| e.has_class(GRID_CLASS)),
        None => root
            .child_element(0)?
            .children()
            .iter()
            .find_map(|child| child.elements().find(|e| e.has_class(GRID_CLASS))),
    }
}

/// Decodes the cards of a result grid.
#[must_use]
pub fn decode_grid_list(grid: ElementNode<'_>, options: &Options) -> Vec<Comic> {
    let base = options.base();
    let items = collect_items(grid.prop("children"));
    if items.is_empty() {
        debug!("result grid has no cards");
    }
    let comics = keep_valid(
        "grid",
        items.into_iter().map(|item| {
            build_comic(
                item.prop("id").and_then(StreamNode::as_id),
                item.prop("title").and_then(StreamNode::as_text),
                item.prop("cover").and_then(StreamNode::as_text),
                base.as_ref(),
            )
        }),
    );
    dedupe_by_id(comics)
}
