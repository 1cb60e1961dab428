//! Decoding orchestration.
//!
//! A page carries several payload blocks; only some of them describe the
//! page content. Blocks are classified one by one and the first one whose
//! variant fits the caller's intent and yields records wins. When no block
//! does, the markup fallback gets a turn.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::classify::{classify, decode_variant, Variant};
use crate::decoder::pagination::decode_last_page;
use crate::decoder::reader::decode_reader;
use crate::error::{Error, Result};
use crate::fallback::{extract_from_markup, extract_images_from_markup};
use crate::node::StreamNode;
use crate::options::Options;
use crate::reassemble::{reassemble, ChunkMap};
use crate::result::{ComicPage, DecodeResult};

/// What the caller expects the page to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Latest uploads listing.
    Latest,
    /// Popular / ranking listing.
    Ranking,
    /// Search results.
    Search,
    /// One comic's detail page.
    Detail,
    /// Entity catalog (all artists, all tags, ...).
    TagIndex,
    /// Reader page with the comic's page images.
    Reader,
}

/// How well a variant answers an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fit {
    Preferred,
    Acceptable,
}

impl Intent {
    pub const ALL: [Self; 6] = [
        Self::Latest,
        Self::Ranking,
        Self::Search,
        Self::Detail,
        Self::TagIndex,
        Self::Reader,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Ranking => "ranking",
            Self::Search => "search",
            Self::Detail => "detail",
            Self::TagIndex => "tag_index",
            Self::Reader => "reader",
        }
    }

    /// Parses the snake_case name of an intent.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|intent| intent.as_str() == name.trim())
    }

    /// Whether the intent expects a comic listing.
    #[must_use]
    pub fn is_listing(self) -> bool {
        matches!(self, Self::Latest | Self::Ranking | Self::Search)
    }

    /// Result reported when nothing was decoded.
    #[must_use]
    pub fn empty_result(self) -> DecodeResult {
        if self.is_listing() {
            DecodeResult::EmptyList
        } else {
            DecodeResult::Unrecognized
        }
    }

    fn fit(self, variant: Variant) -> Option<Fit> {
        match (self, variant) {
            (Self::Latest, Variant::FlatList)
            | (Self::Ranking, Variant::RankedList)
            | (Self::Search, Variant::GridList | Variant::NoResults)
            | (Self::Detail, Variant::Detail)
            | (Self::TagIndex, Variant::Catalog) => Some(Fit::Preferred),
            (Self::Latest | Self::Ranking | Self::Search, variant) if variant.is_listing() => Some(Fit::Acceptable),
            _ => None,
        }
    }
}

/// Parsed blocks in inspection order: preferred ids first, then document order.
fn ordered_roots<'c>(chunks: &'c ChunkMap, options: &Options) -> Vec<(&'c str, StreamNode)> {
    let preferred = options.preferred_blocks.iter().filter_map(|id| chunks.block(id));
    let rest = chunks
        .blocks()
        .iter()
        .filter(|block| !options.preferred_blocks.contains(&block.id));

    preferred
        .chain(rest)
        .filter_map(|block| block.parse().map(|root| (block.id.as_str(), root)))
        .collect()
}

/// Decodes reassembled blocks; `None` when no block answers the intent.
#[must_use]
pub fn decode_chunks(chunks: &ChunkMap, intent: Intent, options: &Options) -> Option<DecodeResult> {
    let roots = ordered_roots(chunks, options);

    if intent == Intent::Reader {
        return roots.iter().find_map(|(id, root)| {
            let images = decode_reader(root, options);
            (!images.is_empty()).then(|| {
                debug!(block = *id, count = images.len(), "reader images decoded");
                DecodeResult::PageImages(images)
            })
        });
    }

    let classified: Vec<(&str, &StreamNode, Variant)> =
        roots.iter().map(|(id, root)| (*id, root, classify(root))).collect();

    for wanted in [Fit::Preferred, Fit::Acceptable] {
        for &(id, root, variant) in &classified {
            if intent.fit(variant) != Some(wanted) {
                continue;
            }
            if variant == Variant::NoResults {
                debug!(block = id, "page reports no results");
                return Some(DecodeResult::EmptyList);
            }
            let result = decode_variant(root, variant, options);
            if result.is_empty() {
                trace!(block = id, ?variant, "block decoded to nothing");
                continue;
            }
            debug!(block = id, ?variant, "block decoded");
            return Some(with_last_page(result, &roots));
        }
    }
    None
}

/// Fills a missing last page from any block with a pagination control.
fn with_last_page(result: DecodeResult, roots: &[(&str, StreamNode)]) -> DecodeResult {
    match result {
        DecodeResult::ComicList(ComicPage { comics, last_page: None }) => DecodeResult::ComicList(ComicPage {
            comics,
            last_page: roots.iter().find_map(|(_, root)| decode_last_page(root)),
        }),
        other => other,
    }
}

fn decode_markup(html: &str, intent: Intent, options: &Options, roots: &[(&str, StreamNode)]) -> Option<DecodeResult> {
    let result = if intent.is_listing() {
        let comics = extract_from_markup(html, options);
        DecodeResult::ComicList(ComicPage { comics, last_page: None })
    } else if intent == Intent::Reader {
        DecodeResult::PageImages(extract_images_from_markup(html, options))
    } else {
        return None;
    };
    (!result.is_empty()).then(|| with_last_page(result, roots))
}

/// Decodes a page, reporting why nothing was found.
///
/// # Errors
/// [`Error::MissingBlock`] when the page carries no payload at all and the
/// fallback found nothing, [`Error::Unrecognized`] when no block answered.
pub fn try_decode(html: &str, intent: Intent, options: &Options) -> Result<DecodeResult> {
    let chunks = reassemble(html);
    if let Some(result) = decode_chunks(&chunks, intent, options) {
        return Ok(result);
    }

    if options.markup_fallback {
        let roots = ordered_roots(&chunks, options);
        if let Some(result) = decode_markup(html, intent, options, &roots) {
            debug!(intent = intent.as_str(), "decoded from markup");
            return Ok(result);
        }
    }

    if chunks.is_empty() {
        Err(Error::MissingBlock(intent.as_str().to_string()))
    } else {
        Err(Error::Unrecognized)
    }
}

/// Decodes a page with custom options. Never fails: nothing found is
/// [`Intent::empty_result`].
#[must_use]
pub fn decode_with_options(html: &str, intent: Intent, options: &Options) -> DecodeResult {
    try_decode(html, intent, options).unwrap_or_else(|err| {
        debug!(intent = intent.as_str(), error = %err, "nothing decoded");
        intent.empty_result()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_names_round_trip() {
        for intent in Intent::ALL {
            assert_eq!(Intent::from_name(intent.as_str()), Some(intent));
        }
        assert_eq!(Intent::from_name("detail "), Some(Intent::Detail));
        assert_eq!(Intent::from_name("Detail"), None);
    }

    #[test]
    fn test_listing_intents_accept_other_listings() {
        assert_eq!(Intent::Latest.fit(Variant::FlatList), Some(Fit::Preferred));
        assert_eq!(Intent::Latest.fit(Variant::GridList), Some(Fit::Acceptable));
        assert_eq!(Intent::Search.fit(Variant::NoResults), Some(Fit::Preferred));
        assert_eq!(Intent::Latest.fit(Variant::NoResults), None);
        assert_eq!(Intent::Detail.fit(Variant::FlatList), None);
        assert_eq!(Intent::TagIndex.fit(Variant::Catalog), Some(Fit::Preferred));
    }

    #[test]
    fn test_empty_results_per_intent() {
        assert_eq!(Intent::Search.empty_result(), DecodeResult::EmptyList);
        assert_eq!(Intent::Detail.empty_result(), DecodeResult::Unrecognized);
        assert_eq!(Intent::Reader.empty_result(), DecodeResult::Unrecognized);
    }

    #[test]
    fn test_page_without_payload() {
        let options = Options {
            markup_fallback: false,
            ..Options::default()
        };
        assert_eq!(
            try_decode("<html></html>", Intent::Latest, &options),
            Err(Error::MissingBlock("latest".to_string()))
        );
        assert_eq!(decode_with_options("<html></html>", Intent::Latest, &options), DecodeResult::EmptyList);
    }
}
