//! Page images of a reader page.

use std::collections::HashSet;

use tracing::debug;

use crate::node::StreamNode;
use crate::options::Options;
use crate::url_utils::absolutize;

/// Class fragment of the reader container.
pub const READER_CLASS: &str = "reader";

/// Image URLs inside the first reader container, in page order.
///
/// Lazy-loaded images carry the real URL in `data-src`; it wins over `src`.
#[must_use]
pub fn decode_reader(root: &StreamNode, options: &Options) -> Vec<String> {
    let Some(reader) = root.elements().find(|e| e.has_class(READER_CLASS)) else {
        debug!("no reader container");
        return Vec::new();
    };

    let base = options.base();
    let mut seen = HashSet::new();
    reader
        .node()
        .elements()
        .filter(|e| e.tag() == Some("img"))
        .filter_map(|img| img.prop_text("data-src").or_else(|| img.prop_text("src")))
        .filter_map(|src| absolutize(src, base.as_ref()))
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_images_in_order() {
        let root = StreamNode::parse(
            r#"["$","main",null,{"children":[
                ["$","img",null,{"src":"https://cdn.example/logo.png"}],
                ["$","div",null,{"className":"reader-pages","children":[
                    ["$","img","1",{"src":"/p/1.webp"}],
                    ["$","figure",null,{"children":["$","img","2",{"data-src":"/p/2.webp","src":"/placeholder.gif"}]}],
                    ["$","img","1b",{"src":"/p/1.webp"}],
                    ["$","img","x",{"src":"$undefined"}]
                ]}]
            ]}]"#,
        )
        .unwrap_or_default();
        let options = Options {
            base_url: Some("https://comics.example".to_string()),
            ..Options::default()
        };

        assert_eq!(
            decode_reader(&root, &options),
            vec!["https://comics.example/p/1.webp", "https://comics.example/p/2.webp"]
        );
    }

    #[test]
    fn test_no_reader_container() {
        let root = StreamNode::parse(r#"["$","main",null,{"children":["$","img",null,{"src":"https://x.example/a.jpg"}]}]"#)
            .unwrap_or_default();
        assert!(decode_reader(&root, &Options::default()).is_empty());
    }
}
