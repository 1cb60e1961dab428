//! List item collections.
//!
//! A grid's `children` holds its cards in one of two encodings:
//!
//! - nested: a list of element nodes, one per card;
//! - flattened: the cards' slots spliced into one list,
//!   `"$", type, key, props, "$", type, key, props, ...`.
//!
//! The flattened walk resynchronizes one slot at a time after a quadruple
//! that does not look like a card.

use std::collections::BTreeMap;

use tracing::trace;

use crate::node::{StreamNode, ELEMENT_MARKER};

/// Type tags of list cards are client component references.
pub const CLIENT_COMPONENT_PREFIX: &str = "$L";

/// Whether an element type is a list card.
#[must_use]
pub fn is_card_type(tag: &str) -> bool {
    tag.starts_with(CLIENT_COMPONENT_PREFIX)
}

/// One card of a collection.
#[derive(Debug, Clone, Copy)]
pub struct Item<'a> {
    pub key: &'a StreamNode,
    pub props: &'a BTreeMap<String, StreamNode>,
}

impl<'a> Item<'a> {
    #[must_use]
    pub fn prop(&self, name: &str) -> Option<&'a StreamNode> {
        self.props.get(name)
    }
}

/// Cards of a collection, whichever encoding it uses.
#[must_use]
pub fn collect_items(collection: Option<&StreamNode>) -> Vec<Item<'_>> {
    let Some(slots) = collection.and_then(StreamNode::as_list) else {
        return Vec::new();
    };
    match slots.first() {
        Some(StreamNode::List(_)) => nested_items(slots),
        Some(StreamNode::Text(_)) => FlattenedItems::new(slots).collect(),
        _ => Vec::new(),
    }
}

fn nested_items(slots: &[StreamNode]) -> Vec<Item<'_>> {
    slots
        .iter()
        .filter_map(|slot| {
            let element = slot.as_element()?;
            if !element.tag().is_some_and(is_card_type) {
                trace!(tag = ?element.tag(), "non-card element in collection");
                return None;
            }
            Some(Item {
                key: element.key(),
                props: element.props(),
            })
        })
        .collect()
}

/// Walks a flattened collection four slots at a time.
///
/// A quadruple is accepted when slot 0 is the element marker, slot 1 a card
/// type and slot 3 an object. Otherwise the cursor moves by one slot.
pub struct FlattenedItems<'a> {
    slots: &'a [StreamNode],
    cursor: usize,
}

impl<'a> FlattenedItems<'a> {
    #[must_use]
    pub fn new(slots: &'a [StreamNode]) -> Self {
        Self { slots, cursor: 0 }
    }
}

impl<'a> Iterator for FlattenedItems<'a> {
    type Item = Item<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(quad) = self.slots.get(self.cursor..self.cursor + 4) {
            let is_card = quad[0].as_text() == Some(ELEMENT_MARKER) && quad[1].as_text().is_some_and(is_card_type);
            match (is_card, quad[3].as_object()) {
                (true, Some(props)) => {
                    self.cursor += 4;
                    return Some(Item { key: &quad[2], props });
                }
                _ => {
                    trace!(cursor = self.cursor, "resynchronizing flattened collection");
                    self.cursor += 1;
                }
            }
        }
        None
    }
}
