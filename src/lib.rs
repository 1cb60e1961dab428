//! # rsc-comics
//!
//! Decodes comic listings, details, tags and pagination from the React
//! Server Component ("flight") stream that server-rendered pages embed in
//! their HTML.
//!
//! ## Quick Start
//!
//! ```rust
//! use rsc_comics::{decode, DecodeResult, Intent};
//!
//! let html = r#"<html><body><script>self.__next_f.push([1,"5:[[\"$\",\"h2\",null,{\"children\":\"New\"}],[\"$\",\"section\",null,{\"children\":[\"$\",\"$L9\",null,{\"articles\":[{\"id\":7,\"attributes\":{\"title\":\"Seven\",\"thumbnail\":\"https://cdn.example/7.jpg\"}}]}]}]]\n"])</script></body></html>"#;
//!
//! let result = decode(html, Intent::Latest);
//! assert_eq!(result.comics()[0].title, "Seven");
//! ```
//!
//! ## Pipeline
//!
//! - **Reassembly** ([`reassemble()`]): pushed chunks are unescaped and joined
//!   into `id:content` payload blocks, re-joining lines cut at chunk borders
//! - **Classification** ([`classify()`]): each block's tree is matched against
//!   the known page layouts
//! - **Decoding** ([`decoder`]): one decoder per layout, each recovering
//!   locally from bad items
//! - **Fallback** ([`fallback`]): comic cards read from the markup when the
//!   stream yields nothing

mod decode;
mod error;
mod options;
mod result;

/// Flight chunk reassembly into payload blocks.
pub mod reassemble;

/// Streamed value tree and element views.
pub mod node;

/// Page variant classification.
pub mod classify;

/// Record decoders per page variant.
pub mod decoder;

/// Markup-based fallback extraction.
pub mod fallback;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Compiled patterns and locale vocabularies.
pub mod patterns;

/// URL utilities for resolution and href dissection.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

// Public API - re-exports
pub use classify::{classify, classify_and_decode, Variant};
pub use decode::{decode_chunks, decode_with_options, try_decode, Intent};
pub use error::{Error, Result};
pub use node::{ElementNode, StreamNode};
pub use options::Options;
pub use reassemble::{reassemble, ChunkMap, PayloadBlock};
pub use result::{Comic, ComicPage, DecodeResult, Tag, TagInfo};

/// Decodes a page with default options.
///
/// Never fails: a page with nothing usable yields [`DecodeResult::EmptyList`]
/// for listing intents and [`DecodeResult::Unrecognized`] otherwise.
#[must_use]
pub fn decode(html: &str, intent: Intent) -> DecodeResult {
    decode_with_options(html, intent, &Options::default())
}

/// Decodes raw page bytes, detecting their charset first.
#[must_use]
pub fn decode_bytes(html: &[u8], intent: Intent) -> DecodeResult {
    decode_bytes_with_options(html, intent, &Options::default())
}

/// [`decode_bytes`] with custom options.
#[must_use]
pub fn decode_bytes_with_options(html: &[u8], intent: Intent, options: &Options) -> DecodeResult {
    let html = encoding::transcode_to_utf8(html);
    decode_with_options(&html, intent, options)
}
