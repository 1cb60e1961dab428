//! Flat ("new uploads") listing.
//!
//! The content element hands its article collection to a client component:
//! `root[1] → children[0] → props.articles`, each article being
//! `{ "id": 123, "attributes": { "title": ..., "thumbnail": ... } }`.

use tracing::debug;

use super::{build_comic, dedupe_by_id, keep_valid};
use crate::node::{walk, Step, StreamNode};
use crate::options::Options;
use crate::result::Comic;

const ARTICLES: &[Step<'static>] = &[Step::Slot(1), Step::Child(0), Step::Prop("articles")];
const TITLE: &[Step<'static>] = &[Step::Key("attributes"), Step::Key("title")];
const THUMBNAIL: &[Step<'static>] = &[Step::Key("attributes"), Step::Key("thumbnail")];

/// Decodes the article collection of a flat listing.
#[must_use]
pub fn decode_flat_list(root: &StreamNode, options: &Options) -> Vec<Comic> {
    let Some(articles) = walk(root, ARTICLES).and_then(StreamNode::as_list) else {
        debug!("flat listing has no article collection");
        return Vec::new();
    };

    let base = options.base();
    let comics = keep_valid(
        "flat",
        articles.iter().map(|article| {
            build_comic(
                article.field("id").and_then(StreamNode::as_id),
                walk(article, TITLE).and_then(StreamNode::as_text),
                walk(article, THUMBNAIL).and_then(StreamNode::as_text),
                base.as_ref(),
            )
        }),
    );
    dedupe_by_id(comics)
}
