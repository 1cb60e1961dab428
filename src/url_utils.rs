//! URL Utility Functions
//!
//! Cover and page image resolution, plus the href dissection the decoders
//! need: path segments, the last segment as an id, and query parameters.

use url::Url;

/// Base used to parse site-relative hrefs when only their path and query matter.
const PLACEHOLDER_ORIGIN: &str = "https://localhost/";

/// Check if a string is a valid absolute http(s) URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if s.is_empty() {
        return (false, None);
    }

    // Must start with http:// or https://
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Parse a URL string into a Url object.
///
/// # Returns
/// * `Some(Url)` if valid absolute URL, `None` otherwise
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    match is_absolute_url(url_str) {
        (true, parsed) => parsed,
        (false, _) => None,
    }
}

/// Make an image or link URL absolute.
///
/// Protocol-relative URLs (`//cdn.example/x.jpg`) get `https:`; relative
/// ones are joined onto `base`.
///
/// # Returns
/// * The absolute URL, or `None` when it is empty or cannot be resolved
#[must_use]
pub fn absolutize(url_str: &str, base: Option<&Url>) -> Option<String> {
    let url_str = url_str.trim();

    if url_str.is_empty() || url_str.starts_with('$') {
        return None;
    }

    if let Some(rest) = url_str.strip_prefix("//") {
        let candidate = format!("https://{rest}");
        return parse_url(&candidate).map(|_| candidate);
    }

    if is_absolute_url(url_str).0 {
        return Some(url_str.to_string());
    }

    let resolved = base?.join(url_str).ok()?;
    is_absolute_url(resolved.as_str()).0.then(|| resolved.to_string())
}

/// Strip query string and fragment from an href.
#[must_use]
pub fn strip_query(href: &str) -> &str {
    let end = href.find(['?', '#']).unwrap_or(href.len());
    &href[..end]
}

/// Path segments of an href after trimming surrounding slashes.
///
/// Inner empty segments are kept, so `"/a//b/"` yields three segments.
///
/// # Examples
/// ```
/// use rsc_comics::url_utils::path_segments;
///
/// assert_eq!(path_segments("/artist/ito/"), vec!["artist", "ito"]);
/// assert_eq!(path_segments("https://x.example/tag/a?page=2"), vec!["tag", "a"]);
/// assert!(path_segments("/").is_empty());
/// ```
#[must_use]
pub fn path_segments(href: &str) -> Vec<&str> {
    let path = strip_query(href.trim());
    // Segments are sliced from the href text: `Url::path_segments` would
    // percent-encode non-ASCII slugs, and ids must match the href as written.
    let path = if is_absolute_url(path).0 {
        let after_scheme = path.split_once("://").map_or(path, |(_, rest)| rest);
        after_scheme.find('/').map_or("", |slash| &after_scheme[slash..])
    } else {
        path
    };

    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}

/// Last non-empty path segment of an href.
///
/// # Examples
/// ```
/// use rsc_comics::url_utils::last_path_segment;
///
/// assert_eq!(last_path_segment("/tag/big-eyes/").as_deref(), Some("big-eyes"));
/// assert_eq!(last_path_segment("/comic/123?ref=home").as_deref(), Some("123"));
/// assert_eq!(last_path_segment("/"), None);
/// ```
#[must_use]
pub fn last_path_segment(href: &str) -> Option<String> {
    path_segments(href)
        .into_iter()
        .rev()
        .map(str::trim)
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Value of query parameter `name` in an absolute or site-relative href.
#[must_use]
pub fn query_param(href: &str, name: &str) -> Option<String> {
    let base = Url::parse(PLACEHOLDER_ORIGIN).ok()?;
    let url = base.join(href.trim()).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
