//! Page variant classification.
//!
//! A payload root is classified purely by shape. Listing pages are fragments
//! (`[header, content, ...]`, so slot 1 is a list); every other page is one
//! element (slot 1 is its type text).

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::decoder::catalog::{decode_catalog, is_catalog_header};
use crate::decoder::detail::{self, decode_detail};
use crate::decoder::grid::{decode_grid_list, locate_grid};
use crate::decoder::list::decode_flat_list;
use crate::decoder::pagination::decode_last_page;
use crate::decoder::ranked::decode_ranked_list;
use crate::node::{ElementNode, StreamNode};
use crate::options::Options;
use crate::patterns::{is_no_result_heading, is_popular_title};
use crate::result::{ComicPage, DecodeResult};

/// Page layouts the decoders know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    FlatList,
    RankedList,
    GridList,
    Catalog,
    Detail,
    NoResults,
    Unrecognized,
}

impl Variant {
    /// Whether the variant is a comic listing.
    #[must_use]
    pub fn is_listing(self) -> bool {
        matches!(self, Self::FlatList | Self::RankedList | Self::GridList)
    }
}

const HEADINGS: &[&str] = &["h1", "h2", "h3"];

fn is_heading(element: &ElementNode<'_>) -> bool {
    element.tag().is_some_and(|tag| HEADINGS.contains(&tag))
}

/// Classifies a payload root.
#[must_use]
pub fn classify(root: &StreamNode) -> Variant {
    let variant = match root.get(1) {
        Some(StreamNode::List(_)) => classify_listing(root),
        Some(StreamNode::Text(_)) => classify_element(root),
        _ => Variant::Unrecognized,
    };
    trace!(?variant, "classified payload");
    variant
}

fn classify_listing(root: &StreamNode) -> Variant {
    let header = root.get(0).and_then(StreamNode::as_element);
    if header.is_some_and(is_catalog_header) {
        return Variant::Catalog;
    }
    match header.and_then(listing_title) {
        Some(title) if is_popular_title(&title) => Variant::RankedList,
        _ => Variant::FlatList,
    }
}

/// Title of a listing header: its first `h1`-`h3`, else its first text.
fn listing_title(header: ElementNode<'_>) -> Option<String> {
    header
        .node()
        .elements()
        .find(is_heading)
        .map(|heading| heading.text_content())
        .or_else(|| header.first_text())
}

fn classify_element(root: &StreamNode) -> Variant {
    if locate_grid(root).is_some() {
        return Variant::GridList;
    }
    let no_results = root
        .elements()
        .filter(is_heading)
        .any(|heading| is_no_result_heading(&heading.text_content()));
    if no_results {
        return Variant::NoResults;
    }
    if detail::locate(root).is_ok() {
        Variant::Detail
    } else {
        Variant::Unrecognized
    }
}

/// Runs the decoder of `variant` on `root`.
///
/// Listing results carry the last page of the same root when it has a
/// pagination control. A detail page whose record is invalid is
/// [`DecodeResult::Unrecognized`].
#[must_use]
pub fn decode_variant(root: &StreamNode, variant: Variant, options: &Options) -> DecodeResult {
    let comics = match variant {
        Variant::FlatList => decode_flat_list(root, options),
        Variant::RankedList => decode_ranked_list(root, options),
        Variant::GridList => locate_grid(root)
            .map(|grid| decode_grid_list(grid, options))
            .unwrap_or_default(),
        Variant::Catalog => return DecodeResult::EntityCatalog(decode_catalog(root)),
        Variant::Detail => {
            return decode_detail(root, options).map_or(DecodeResult::Unrecognized, |comic| {
                DecodeResult::ComicDetail(Box::new(comic))
            });
        }
        Variant::NoResults => return DecodeResult::EmptyList,
        Variant::Unrecognized => return DecodeResult::Unrecognized,
    };

    debug!(?variant, count = comics.len(), "listing decoded");
    DecodeResult::ComicList(ComicPage {
        comics,
        last_page: decode_last_page(root),
    })
}

/// [`classify`] then [`decode_variant`].
#[must_use]
pub fn classify_and_decode(root: &StreamNode, options: &Options) -> DecodeResult {
    decode_variant(root, classify(root), options)
}
