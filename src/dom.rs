//! Markup access for the fallback extractor.
//!
//! Thin helpers over `dom_query` for reading comic cards straight from the
//! rendered HTML when the flight payload gives nothing.

pub use dom_query::{Document, Selection};
pub use tendril::StrTendril;

/// Parse an HTML document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Non-blank attribute value.
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// First non-blank value among `names`, tried in order.
///
/// Lazy-loaded images keep the real source in `data-src` and a placeholder
/// in `src`, so callers list `data-src` first.
#[must_use]
pub fn first_attribute(sel: &Selection, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| get_attribute(sel, name))
}

/// All text of the selection and its descendants.
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Trimmed text of the first match of `selector` under `sel`.
#[must_use]
pub fn select_text(sel: &Selection, selector: &str) -> Option<String> {
    let found = sel.select(selector).first();
    if !found.exists() {
        return None;
    }
    let text = text_content(&found);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Each node of `selection` as its own single-node selection, in document order.
pub fn each<'a, 'b>(selection: &'b Selection<'a>) -> impl Iterator<Item = Selection<'a>> + 'b {
    selection.nodes().iter().map(|node| Selection::from(*node))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_attribute_prefers_order() {
        let doc = parse(r#"<img src="placeholder.gif" data-src="https://cdn.example/real.jpg">"#);
        let img = doc.select("img");

        assert_eq!(
            first_attribute(&img, &["data-src", "src"]).as_deref(),
            Some("https://cdn.example/real.jpg")
        );
        assert_eq!(first_attribute(&img, &["src"]).as_deref(), Some("placeholder.gif"));
        assert_eq!(first_attribute(&img, &["alt"]), None);
    }

    #[test]
    fn test_blank_attribute_is_missing() {
        let doc = parse(r#"<a href="  ">x</a>"#);
        assert_eq!(get_attribute(&doc.select("a"), "href"), None);
    }

    #[test]
    fn test_select_text_takes_first_match() {
        let doc = parse(r#"<div><p class="t"> One </p><p class="t">Two</p></div>"#);
        let root = doc.select("div");
        assert_eq!(select_text(&root, ".t").as_deref(), Some("One"));
        assert_eq!(select_text(&root, ".missing"), None);
    }

    #[test]
    fn test_each_keeps_document_order() {
        let doc = parse(r#"<a href="/1">1</a><a href="/2">2</a>"#);
        let hrefs: Vec<_> = each(&doc.select("a"))
            .filter_map(|a| get_attribute(&a, "href"))
            .collect();
        assert_eq!(hrefs, vec!["/1", "/2"]);
    }
}
