//! Configuration options for payload decoding.
//!
//! The `Options` struct controls how records are normalized and which
//! fallbacks the orchestrator may use when the streamed payload yields nothing.

use url::Url;

/// Configuration options for decoding.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rsc_comics::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     base_url: Some("https://comics.example".to_string()),
///     markup_fallback: false,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Site origin used to resolve relative cover and page image URLs.
    ///
    /// Records whose cover cannot be made absolute are dropped, so leaving
    /// this unset only accepts covers that are already absolute (or
    /// protocol-relative, which get `https:`).
    ///
    /// Default: `None`
    pub base_url: Option<String>,

    /// Path fragment identifying links to a comic in raw markup.
    ///
    /// Default: `"/comic/"`
    pub content_path: String,

    /// CSS selector for the title node inside a comic card in raw markup.
    ///
    /// Default: `".title"`
    pub title_selector: String,

    /// Query parameter of the reader link that carries the comic id.
    ///
    /// Default: `"id"`
    pub reader_query_param: String,

    /// Scan raw markup when the streamed payload yields no records.
    ///
    /// Default: `true`
    pub markup_fallback: bool,

    /// Block ids to inspect before all other blocks, in this order.
    ///
    /// Default: empty (blocks are inspected in document order)
    pub preferred_blocks: Vec<String>,
}

impl Options {
    /// Parsed `base_url`, if it is a valid absolute URL.
    #[must_use]
    pub fn base(&self) -> Option<Url> {
        self.base_url.as_deref().and_then(crate::url_utils::parse_url)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_url: None,
            content_path: "/comic/".to_string(),
            title_selector: ".title".to_string(),
            reader_query_param: "id".to_string(),
            markup_fallback: true,
            preferred_blocks: Vec::new(),
        }
    }
}
