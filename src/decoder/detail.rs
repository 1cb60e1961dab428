//! Comic detail page.
//!
//! Layout under the root element:
//!
//! ```text
//! root.children[0]                 container
//!   .children[0]                   reader link (href "/reader?id=..."), wraps the cover <img>
//!   .children[1]                   info section
//!     .children[0]                 title heading
//!     .children[1]                 tag-groups container
//!       .children[i]               one group: [header, entries...] or [header, [entries...]]
//! ```
//!
//! Group headers are matched against the locale vocabulary in
//! [`crate::patterns::TAG_GROUP_HEADERS`]; unknown headers are ignored.

use tracing::{debug, trace};

use super::build_comic;
use crate::error::{Error, Result};
use crate::node::{Children, ElementNode, StreamNode};
use crate::options::Options;
use crate::patterns::TagGroup;
use crate::result::{Comic, Tag};
use crate::url_utils::{last_path_segment, query_param};

/// The fixed anchors of a detail page.
#[derive(Debug, Clone, Copy)]
pub struct DetailLayout<'a> {
    pub reader_link: ElementNode<'a>,
    pub title: ElementNode<'a>,
    pub tag_groups: ElementNode<'a>,
}

/// Resolves the detail chain down to the tag-groups container.
pub fn locate(root: &StreamNode) -> Result<DetailLayout<'_>> {
    let container = root
        .as_element()
        .and_then(|root| root.child_element(0))
        .ok_or(Error::UnexpectedShape("detail container"))?;
    let reader_link = container.child_element(0).ok_or(Error::UnexpectedShape("reader link"))?;
    let info = container.child_element(1).ok_or(Error::UnexpectedShape("info section"))?;
    Ok(DetailLayout {
        reader_link,
        title: info.child_element(0).ok_or(Error::UnexpectedShape("title heading"))?,
        tag_groups: info.child_element(1).ok_or(Error::UnexpectedShape("tag groups"))?,
    })
}

/// Decodes a detail page into one comic with its entity tags.
///
/// `None` only when the fixed chain is missing or the comic lacks id, title
/// or cover; a broken tag group or entry is skipped.
#[must_use]
pub fn decode_detail(root: &StreamNode, options: &Options) -> Option<Comic> {
    let layout = match locate(root) {
        Ok(layout) => layout,
        Err(err) => {
            debug!(error = %err, "detail chain not found");
            return None;
        }
    };

    let id = layout
        .reader_link
        .href()
        .and_then(|href| query_param(href, &options.reader_query_param));
    let cover = layout
        .reader_link
        .node()
        .elements()
        .find(|e| e.tag() == Some("img"))
        .and_then(|img| img.prop_text("data-src").or_else(|| img.prop_text("src")));
    let title = layout.title.text_content();

    let mut comic = match build_comic(id, Some(title.as_str()), cover, options.base().as_ref()) {
        Ok(comic) => comic,
        Err(err) => {
            debug!(error = %err, "detail record rejected");
            return None;
        }
    };

    for group in layout.tag_groups.children().iter() {
        let Some(group) = group.as_element() else {
            trace!("non-element in tag groups");
            continue;
        };
        if let Some((kind, tags)) = decode_group(group) {
            group_tags_mut(&mut comic, kind).extend(tags);
        }
    }

    Some(comic)
}

fn group_tags_mut(comic: &mut Comic, group: TagGroup) -> &mut Vec<Tag> {
    match group {
        TagGroup::Artists => &mut comic.artists,
        TagGroup::Groups => &mut comic.groups,
        TagGroup::Parodies => &mut comic.parodies,
        TagGroup::Categories => &mut comic.categories,
        TagGroup::Characters => &mut comic.characters,
        TagGroup::Tags => &mut comic.tags,
        TagGroup::Languages => &mut comic.languages,
    }
}

/// Whether a group holds its entries in one nested list.
///
/// Nested: exactly two children, the second a plain list. A group with one
/// entry in the flat shape also has two children, but that entry is an
/// element node.
#[must_use]
pub fn is_nested_group(children: &Children<'_>) -> bool {
    children.len() == 2 && children.get(1).is_some_and(|second| second.is_list() && second.as_element().is_none())
}

/// Decodes one tag group into its kind and accepted tags.
#[must_use]
pub fn decode_group(group: ElementNode<'_>) -> Option<(TagGroup, Vec<Tag>)> {
    let children = group.children();
    let header = children.get(0).and_then(StreamNode::first_text)?;
    let Some(kind) = TagGroup::from_header(&header) else {
        trace!(header = header.trim(), "unknown tag group ignored");
        return None;
    };

    let entries: &[StreamNode] = if is_nested_group(&children) {
        children.get(1).and_then(StreamNode::as_list).unwrap_or_default()
    } else {
        children.as_slice().get(1..).unwrap_or_default()
    };

    let tags = entries.iter().filter_map(decode_entry).collect();
    Some((kind, tags))
}

/// Decodes one group entry. Plain-text entries carry no link and yield nothing.
#[must_use]
pub fn decode_entry(entry: &StreamNode) -> Option<Tag> {
    let element = entry.as_element()?;
    let link = if element.href().is_some() {
        element
    } else {
        element
            .children()
            .iter()
            .find_map(|child| child.as_element().filter(|e| e.href().is_some()))?
    };

    let href = link.href()?;
    let Some(id) = last_path_segment(href) else {
        debug!(href, "tag link without id segment");
        return None;
    };
    let Some(name) = link.first_text().as_deref().and_then(super::clean_name) else {
        trace!(href, "tag without usable name");
        return None;
    };
    Some(Tag { id, name })
}
