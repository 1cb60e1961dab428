//! Record decoders, one per page variant.
//!
//! Every decoder walks a fixed path of its variant and recovers locally: a
//! bad item, group or entry is skipped and logged, siblings still decode.

pub mod catalog;
pub mod detail;
pub mod grid;
pub mod items;
pub mod list;
pub mod pagination;
pub mod ranked;
pub mod reader;

use std::collections::HashSet;

use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::patterns::MISSING_VALUE;
use crate::result::Comic;
use crate::url_utils::absolutize;

/// Cleans a rendered name: literal `\r`/`\n` artifacts and surrounding
/// whitespace go, blank and `N/A` names are rejected.
///
/// # Examples
/// ```
/// use rsc_comics::decoder::clean_name;
///
/// assert_eq!(clean_name(" big eyes\\r ").as_deref(), Some("big eyes"));
/// assert_eq!(clean_name("N/A"), None);
/// ```
#[must_use]
pub fn clean_name(raw: &str) -> Option<String> {
    let cleaned = raw
        .replace("\\r", "")
        .replace("\\n", "")
        .replace(['\r', '\n'], "");
    let cleaned = cleaned.trim();
    (!cleaned.is_empty() && cleaned != MISSING_VALUE).then(|| cleaned.to_string())
}

/// Builds a listing record, rejecting missing fields and unresolvable covers.
pub(crate) fn build_comic(
    id: Option<String>,
    title: Option<&str>,
    cover: Option<&str>,
    base: Option<&Url>,
) -> Result<Comic> {
    let id = id.ok_or_else(|| Error::InvalidRecord("missing id".to_string()))?;
    let title = title
        .and_then(clean_name)
        .ok_or_else(|| Error::InvalidRecord(format!("comic {id} has no title")))?;
    let cover = cover
        .and_then(|cover| absolutize(cover, base))
        .ok_or_else(|| Error::InvalidRecord(format!("comic {id} has no absolute cover")))?;
    Ok(Comic::new(id, title, cover))
}

/// Keeps the first record per id, preserving order.
#[must_use]
pub fn dedupe_by_id(comics: Vec<Comic>) -> Vec<Comic> {
    let mut seen = HashSet::new();
    let before = comics.len();
    let unique: Vec<Comic> = comics.into_iter().filter(|comic| seen.insert(comic.id.clone())).collect();
    if unique.len() < before {
        debug!(dropped = before - unique.len(), "duplicate comics removed");
    }
    unique
}

/// Collects records from `results`, logging and skipping the failures.
pub(crate) fn keep_valid(variant: &'static str, results: impl IntoIterator<Item = Result<Comic>>) -> Vec<Comic> {
    results
        .into_iter()
        .filter_map(|result| match result {
            Ok(comic) => Some(comic),
            Err(err) => {
                debug!(variant, error = %err, "list item skipped");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_name_strips_artifacts() {
        assert_eq!(clean_name("name\r\n").as_deref(), Some("name"));
        assert_eq!(clean_name("\\rname\\n").as_deref(), Some("name"));
        assert_eq!(clean_name("   "), None);
        assert_eq!(clean_name(" N/A "), None);
    }

    #[test]
    fn test_build_comic_requires_all_fields() {
        let base = Url::parse("https://comics.example/").ok();

        let ok = build_comic(Some("1".into()), Some("Title"), Some("/c/1.jpg"), base.as_ref());
        assert_eq!(ok.map(|c| c.cover_url).ok().as_deref(), Some("https://comics.example/c/1.jpg"));

        assert!(build_comic(None, Some("Title"), Some("/c/1.jpg"), base.as_ref()).is_err());
        assert!(build_comic(Some("1".into()), Some(" "), Some("/c/1.jpg"), base.as_ref()).is_err());
        assert!(build_comic(Some("1".into()), Some("Title"), None, base.as_ref()).is_err());
        assert!(build_comic(Some("1".into()), Some("Title"), Some("/c/1.jpg"), None).is_err());
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let comics = vec![
            Comic::new("1", "A", "https://x/a.jpg"),
            Comic::new("2", "B", "https://x/b.jpg"),
            Comic::new("1", "A again", "https://x/a2.jpg"),
        ];
        let unique = dedupe_by_id(comics);
        let titles: Vec<_> = unique.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }
}
