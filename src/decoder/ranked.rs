//! Ranked ("popular") listing.
//!
//! `root[1] → children[0]` is the grid container; its children are ranking
//! cards whose props wrap the comic: `{ "rank": 1, "comic": { "id", "title", "cover" } }`.

use tracing::debug;

use super::items::collect_items;
use super::{build_comic, dedupe_by_id, keep_valid};
use crate::node::{walk_element, Step, StreamNode};
use crate::options::Options;
use crate::result::Comic;

const GRID: &[Step<'static>] = &[Step::Slot(1), Step::Child(0)];

/// Decodes the cards of a ranked listing, in rank order as rendered.
#[must_use]
pub fn decode_ranked_list(root: &StreamNode, options: &Options) -> Vec<Comic> {
    let Some(grid) = walk_element(root, GRID).filter(|grid| grid.has_class("grid")) else {
        debug!("ranked listing has no grid container");
        return Vec::new();
    };

    let base = options.base();
    let comics = keep_valid(
        "ranked",
        collect_items(grid.prop("children")).into_iter().map(|item| {
            let comic = item.prop("comic");
            let field = |name: &str| comic.and_then(|c| c.field(name));
            build_comic(
                field("id").and_then(StreamNode::as_id),
                field("title").and_then(StreamNode::as_text),
                field("cover").and_then(StreamNode::as_text),
                base.as_ref(),
            )
        }),
    );
    dedupe_by_id(comics)
}
