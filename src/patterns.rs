//! Compiled regex patterns and locale vocabularies.
//!
//! All patterns are compiled once at first use via `LazyLock`. Locale
//! vocabularies map one canonical concept to every surface string the site
//! renders for it (English, Japanese, Chinese).

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Flight stream markers
// =============================================================================

/// Matches one text chunk pushed into the flight buffer:
/// `self.__next_f.push([1,"<escaped text>"])`.
///
/// Group 1 is the still-escaped chunk text. Escaped quotes never end the match.
pub static FLIGHT_CHUNK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"self\.__next_f\.push\(\[\s*1\s*,\s*"((?:[^"\\]|\\.)*)"\s*\]\)"#).expect("FLIGHT_CHUNK regex")
});

/// Matches the `page=N` style query value at the end of a pagination href.
pub static PAGE_QUERY_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=\s*(\d+)\s*$").expect("PAGE_QUERY_VALUE regex"));

// =============================================================================
// Locale vocabularies
// =============================================================================

/// Keywords marking a ranked ("popular") listing title, lower-cased.
pub const POPULAR_KEYWORDS: &[&str] = &["popular", "ranking", "人気", "ランキング", "热门", "排行"];

/// Heading phrases of an empty search result page, lower-cased.
pub const NO_RESULT_PHRASES: &[&str] = &[
    "no results",
    "nothing found",
    "見つかりませんでした",
    "結果がありません",
    "没有找到",
    "未找到",
];

/// Sentinel the site renders for an absent tag value.
pub const MISSING_VALUE: &str = "N/A";

/// Entity tag groups of a comic detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagGroup {
    Artists,
    Groups,
    Parodies,
    Categories,
    Characters,
    Tags,
    Languages,
}

/// Accepted header spellings per group. Matching is case-sensitive.
pub const TAG_GROUP_HEADERS: &[(TagGroup, &[&str])] = &[
    (TagGroup::Artists, &["Artists", "アーティスト", "作者"]),
    (TagGroup::Groups, &["Groups", "グループ", "团体"]),
    (TagGroup::Parodies, &["Parodies", "パロディ", "原作"]),
    (TagGroup::Categories, &["Categories", "カテゴリー", "分类"]),
    (TagGroup::Characters, &["Characters", "キャラクター", "角色"]),
    (TagGroup::Tags, &["Tags", "タグ", "标签"]),
    (TagGroup::Languages, &["Languages", "言語", "语言"]),
];

impl TagGroup {
    /// Resolves a rendered group header (`"Tags:"`, `"タグ："`) to its group.
    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim().trim_end_matches([':', '：']).trim_end();
        TAG_GROUP_HEADERS
            .iter()
            .find(|(_, surfaces)| surfaces.contains(&header))
            .map(|(group, _)| *group)
    }
}

/// Whether a listing title marks a ranked listing.
#[must_use]
pub fn is_popular_title(title: &str) -> bool {
    let title = title.to_lowercase();
    POPULAR_KEYWORDS.iter().any(|keyword| title.contains(keyword))
}

/// Whether a heading reports an empty search result.
#[must_use]
pub fn is_no_result_heading(text: &str) -> bool {
    let text = text.to_lowercase();
    NO_RESULT_PHRASES.iter().any(|phrase| text.contains(phrase))
}
