//! Markup fallback.
//!
//! When the flight payload yields nothing, comic cards are read from the
//! rendered HTML instead: a card is a link to a comic page that wraps a cover
//! image and a title node.

use std::collections::HashSet;

use tracing::{debug, trace};
use url::Url;

use crate::decoder::{build_comic, dedupe_by_id, keep_valid};
use crate::dom::{self, Selection};
use crate::error::Result;
use crate::options::Options;
use crate::result::Comic;
use crate::url_utils::{absolutize, last_path_segment};

const IMAGE_SOURCES: &[&str] = &["data-src", "src"];

/// Comic cards found in raw markup, deduplicated by id in document order.
#[must_use]
pub fn extract_from_markup(html: &str, options: &Options) -> Vec<Comic> {
    let doc = dom::parse(html);
    let base = options.base();

    let anchors = doc.select("a[href]");
    let comics = keep_valid(
        "markup",
        dom::each(&anchors)
            .filter(|anchor| {
                dom::get_attribute(anchor, "href").is_some_and(|href| href.contains(&options.content_path))
            })
            .filter_map(|anchor| {
                let img = anchor.select("img").first();
                if !img.exists() {
                    trace!("comic link without image");
                    return None;
                }
                Some(card(&anchor, &img, options, base.as_ref()))
            }),
    );

    debug!(count = comics.len(), "markup fallback");
    dedupe_by_id(comics)
}

fn card(anchor: &Selection, img: &Selection, options: &Options, base: Option<&Url>) -> Result<Comic> {
    let id = dom::get_attribute(anchor, "href").and_then(|href| last_path_segment(&href));
    let title = dom::select_text(anchor, &options.title_selector);
    let cover = dom::first_attribute(img, IMAGE_SOURCES);
    build_comic(id, title.as_deref(), cover.as_deref(), base)
}

/// Page images of a reader page in raw markup.
#[must_use]
pub fn extract_images_from_markup(html: &str, options: &Options) -> Vec<String> {
    let doc = dom::parse(html);
    let reader = doc.select(r#"[class*="reader"]"#).first();
    if !reader.exists() {
        debug!("no reader container in markup");
        return Vec::new();
    }

    let base = options.base();
    let images = reader.select("img");
    let mut seen = HashSet::new();
    let mut urls = Vec::new();
    for img in dom::each(&images) {
        let Some(url) = dom::first_attribute(&img, IMAGE_SOURCES)
            .and_then(|src| absolutize(&src, base.as_ref()))
        else {
            continue;
        };
        if seen.insert(url.clone()) {
            urls.push(url);
        }
    }
    urls
}
