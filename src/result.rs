//! Result types for decoding output.
//!
//! Every record here is created fresh per decode call and never mutated
//! after it is returned.

use serde::{Deserialize, Serialize};

/// One entity tag attached to a comic (artist, parody, language, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Last path segment of the tag link.
    pub id: String,

    /// Display name, cleaned of `\r` artifacts.
    pub name: String,
}

/// A normalized comic record.
///
/// A record with an empty `id`, `title` or `cover_url` is never emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comic {
    /// Site identifier of the comic.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Absolute cover image URL.
    pub cover_url: String,

    /// Free-form content tags.
    pub tags: Vec<Tag>,

    pub artists: Vec<Tag>,

    pub groups: Vec<Tag>,

    pub parodies: Vec<Tag>,

    pub categories: Vec<Tag>,

    pub characters: Vec<Tag>,

    pub languages: Vec<Tag>,

    /// Page image URLs, in reading order.
    ///
    /// Decoding never fills it. Reader pages decode to
    /// [`DecodeResult::PageImages`]; callers attach those URLs here.
    pub image_list: Vec<String>,
}

impl Comic {
    /// Creates a listing record with no tags.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, cover_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            cover_url: cover_url.into(),
            ..Self::default()
        }
    }

    /// Whether the mandatory fields are all present.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && !self.title.is_empty() && !self.cover_url.is_empty()
    }

    /// All entity tags of the comic, grouped tags first in header order.
    pub fn all_tags(&self) -> impl Iterator<Item = &Tag> {
        self.artists
            .iter()
            .chain(&self.groups)
            .chain(&self.parodies)
            .chain(&self.categories)
            .chain(&self.characters)
            .chain(&self.tags)
            .chain(&self.languages)
    }
}

/// One entry of an entity-type catalog (all artists, all parodies, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInfo {
    pub id: String,

    pub name: String,

    /// Romanized or translated name, when the site shows one.
    pub english_name: Option<String>,

    /// First path segment of the entry link (`artist`, `tag`, ...).
    pub category: String,
}

/// A page of listing results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComicPage {
    /// Records in page order, distinct by id.
    pub comics: Vec<Comic>,

    /// Number of the last page, when a pagination control was found.
    pub last_page: Option<u32>,
}

/// Outcome of decoding one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum DecodeResult {
    /// Listing page (latest, ranking, search).
    ComicList(ComicPage),

    /// Detail page of one comic, with entity tags.
    ComicDetail(Box<Comic>),

    /// The page explicitly reports no results, or nothing was found.
    EmptyList,

    /// Catalog of one entity type.
    EntityCatalog(Vec<TagInfo>),

    /// Page image URLs of a reader page.
    PageImages(Vec<String>),

    /// No known layout matched.
    Unrecognized,
}

impl DecodeResult {
    /// Whether the result carries no records at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::ComicList(page) => page.comics.is_empty(),
            Self::ComicDetail(_) => false,
            Self::EntityCatalog(entries) => entries.is_empty(),
            Self::PageImages(images) => images.is_empty(),
            Self::EmptyList | Self::Unrecognized => true,
        }
    }

    /// Listing records, if this is a listing result.
    #[must_use]
    pub fn comics(&self) -> &[Comic] {
        match self {
            Self::ComicList(page) => &page.comics,
            _ => &[],
        }
    }

    /// Last page number, if this is a listing result with pagination.
    #[must_use]
    pub fn last_page(&self) -> Option<u32> {
        match self {
            Self::ComicList(page) => page.last_page,
            _ => None,
        }
    }
}
