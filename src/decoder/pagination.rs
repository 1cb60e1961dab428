//! Last page number from the pagination control.
//!
//! The control is the first `nav` element, in document order, that yields a
//! page number; tab and breadcrumb navs before it are skipped. Its first
//! child holds three slots: previous controls, the page-number list,
//! next/last controls.

use tracing::{debug, trace};

use crate::node::{ElementNode, StreamNode};
use crate::patterns::PAGE_QUERY_VALUE;

/// Finds the last page number announced by the page's pagination control.
#[must_use]
pub fn decode_last_page(root: &StreamNode) -> Option<u32> {
    root.elements()
        .filter(|e| e.tag() == Some("nav"))
        .find_map(last_page_of_nav)
}

fn last_page_of_nav(nav: ElementNode<'_>) -> Option<u32> {
    let Some(container) = nav.child_element(0) else {
        trace!("nav without pagination container");
        return None;
    };

    let href = container
        .child_element(2)
        .and_then(|controls| controls.child_element(1))
        .and_then(link_href)
        .or_else(|| {
            trace!("no last-page control, using page-number list");
            last_listed_href(container)
        })?;

    let page = parse_page_number(href);
    if page.is_none() {
        debug!(href, "unparsable pagination href");
    }
    page
}

/// Page number after the last `=` of an href (`/?page=12` gives 12).
#[must_use]
pub fn parse_page_number(href: &str) -> Option<u32> {
    PAGE_QUERY_VALUE
        .captures(href)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn last_listed_href(container: ElementNode<'_>) -> Option<&str> {
    let list = container.child_element(1)?;
    let last = list.children().as_slice().last()?.as_element()?;
    link_href(last)
}

/// Href of an entry, or of the first link inside it.
fn link_href(entry: ElementNode<'_>) -> Option<&str> {
    entry
        .href()
        .or_else(|| entry.node().elements().find_map(|e| e.href()))
}
