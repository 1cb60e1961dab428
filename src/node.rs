//! Streamed value tree.
//!
//! A flight payload decodes to a plain JSON value. [`StreamNode`] is that
//! value as an owned tagged union, and [`ElementNode`] is the borrowed view of
//! the `["$", type, key, props]` convention used for virtual UI elements.
//!
//! Fixed paths into the tree are expressed as [`Step`] sequences and resolved
//! with [`walk`], so a missing link anywhere in a path is a single `None`
//! instead of a panic on raw indexing.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde_json::Value;

/// Slot 0 of every element node.
pub const ELEMENT_MARKER: &str = "$";

/// An immutable node of a decoded payload.
///
/// References the protocol can express (`"$1a"` strings) are never resolved;
/// they stay as text.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StreamNode {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<StreamNode>),
    Object(BTreeMap<String, StreamNode>),
}

impl From<Value> for StreamNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            // Non-finite numbers cannot come out of JSON; map the impossible case to NaN.
            Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect()),
        }
    }
}

impl StreamNode {
    /// Parses payload content into a tree.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Value>(raw).map(Self::from)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[StreamNode]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&BTreeMap<String, StreamNode>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// List slot `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&StreamNode> {
        self.as_list().and_then(|items| items.get(index))
    }

    /// Object field `key`.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&StreamNode> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Identifier value: non-empty text, or an integral number.
    #[must_use]
    pub fn as_id(&self) -> Option<String> {
        match self {
            Self::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            #[allow(clippy::cast_possible_truncation)]
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 && *n >= 0.0 => Some(format!("{}", *n as u64)),
            _ => None,
        }
    }

    /// Views this node as an element, if it follows the 4-slot convention.
    #[must_use]
    pub fn as_element(&self) -> Option<ElementNode<'_>> {
        ElementNode::from_node(self)
    }

    /// All element nodes below (and including) this node, in pre-order.
    #[must_use]
    pub fn elements(&self) -> Elements<'_> {
        Elements { stack: vec![self] }
    }

    /// Text rendered by this subtree, concatenated in order.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out, false);
        out
    }

    /// First non-blank text rendered by this subtree.
    #[must_use]
    pub fn first_text(&self) -> Option<String> {
        let mut out = String::new();
        collect_text(self, &mut out, true);
        (!out.trim().is_empty()).then_some(out)
    }
}

/// Text as rendered: `$$` escapes a literal dollar, other `$` strings are references.
fn rendered_text(s: &str) -> Option<Cow<'_, str>> {
    if let Some(rest) = s.strip_prefix("$$") {
        Some(Cow::Owned(format!("${rest}")))
    } else if s.starts_with('$') {
        None
    } else {
        Some(Cow::Borrowed(s))
    }
}

/// Depth-first text collection. Returns true once `first_only` found text.
fn collect_text(node: &StreamNode, out: &mut String, first_only: bool) -> bool {
    match node {
        StreamNode::Text(s) => {
            if let Some(text) = rendered_text(s) {
                if first_only && text.trim().is_empty() {
                    return false;
                }
                out.push_str(&text);
                return first_only;
            }
            false
        }
        StreamNode::Number(_) if !first_only => {
            if let Some(id) = node.as_id() {
                out.push_str(&id);
            }
            false
        }
        StreamNode::List(items) => {
            if let Some(element) = node.as_element() {
                return element
                    .prop("children")
                    .is_some_and(|children| collect_text(children, out, first_only));
            }
            items.iter().any(|item| collect_text(item, out, first_only))
        }
        _ => false,
    }
}

/// Pre-order iterator over element nodes.
pub struct Elements<'a> {
    stack: Vec<&'a StreamNode>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = ElementNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                StreamNode::List(items) => {
                    if let Some(element) = ElementNode::from_node(node) {
                        // Props in reverse so `children` order is kept on pop.
                        self.stack.extend(element.props.values().rev());
                        return Some(element);
                    }
                    self.stack.extend(items.iter().rev());
                }
                StreamNode::Object(map) => self.stack.extend(map.values().rev()),
                _ => {}
            }
        }
        None
    }
}

/// Borrowed view of a `["$", type, key, props]` element.
#[derive(Debug, Clone, Copy)]
pub struct ElementNode<'a> {
    node: &'a StreamNode,
    slots: &'a [StreamNode],
    props: &'a BTreeMap<String, StreamNode>,
}

impl<'a> ElementNode<'a> {
    /// Views `node` as an element: a list whose slot 0 is the marker and
    /// slot 3 an object.
    #[must_use]
    pub fn from_node(node: &'a StreamNode) -> Option<Self> {
        let slots = node.as_list()?;
        if slots.len() < 4 || slots[0].as_text() != Some(ELEMENT_MARKER) {
            return None;
        }
        let props = slots[3].as_object()?;
        Some(Self { node, slots, props })
    }

    /// The underlying node.
    #[must_use]
    pub fn node(&self) -> &'a StreamNode {
        self.node
    }

    /// Element type: an HTML tag (`"div"`) or a component reference (`"$L1e"`).
    #[must_use]
    pub fn tag(&self) -> Option<&'a str> {
        self.slots[1].as_text()
    }

    /// Slot 2, the React key.
    #[must_use]
    pub fn key(&self) -> &'a StreamNode {
        &self.slots[2]
    }

    #[must_use]
    pub fn props(&self) -> &'a BTreeMap<String, StreamNode> {
        self.props
    }

    #[must_use]
    pub fn prop(&self, name: &str) -> Option<&'a StreamNode> {
        self.props.get(name)
    }

    /// Non-empty text prop (references excluded).
    #[must_use]
    pub fn prop_text(&self, name: &str) -> Option<&'a str> {
        self.prop(name)
            .and_then(StreamNode::as_text)
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.starts_with('$'))
    }

    #[must_use]
    pub fn class_name(&self) -> Option<&'a str> {
        self.prop_text("className").or_else(|| self.prop_text("class"))
    }

    /// Whether the class attribute contains `fragment`.
    #[must_use]
    pub fn has_class(&self, fragment: &str) -> bool {
        self.class_name().is_some_and(|class| class.contains(fragment))
    }

    #[must_use]
    pub fn href(&self) -> Option<&'a str> {
        self.prop_text("href")
    }

    /// The `children` prop, normalized over its singleton and list forms.
    #[must_use]
    pub fn children(&self) -> Children<'a> {
        Children::of(self.prop("children"))
    }

    /// Child `index`, tolerant of a singleton `children`.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&'a StreamNode> {
        self.children().get(index)
    }

    #[must_use]
    pub fn child_element(&self, index: usize) -> Option<ElementNode<'a>> {
        self.child(index).and_then(ElementNode::from_node)
    }

    /// Concatenated rendered text of the element.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.node.text_content()
    }

    /// First non-blank rendered text of the element.
    #[must_use]
    pub fn first_text(&self) -> Option<String> {
        self.node.first_text()
    }
}

/// The `children` of an element.
///
/// The stream encodes one child as the child itself and several as a list;
/// this type hides the difference.
#[derive(Debug, Clone, Copy)]
pub enum Children<'a> {
    None,
    Single(&'a StreamNode),
    Many(&'a [StreamNode]),
}

impl<'a> Children<'a> {
    #[must_use]
    pub fn of(node: Option<&'a StreamNode>) -> Self {
        match node {
            None | Some(StreamNode::Null) => Self::None,
            Some(node @ StreamNode::List(items)) => {
                if ElementNode::from_node(node).is_some() {
                    Self::Single(node)
                } else {
                    Self::Many(items)
                }
            }
            Some(node) => Self::Single(node),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Single(_) => 1,
            Self::Many(items) => items.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'a StreamNode> {
        match self {
            Self::None => None,
            Self::Single(node) => (index == 0).then_some(*node),
            Self::Many(items) => items.get(index),
        }
    }

    /// The children as a slice (a singleton becomes a one-element slice).
    #[must_use]
    pub fn as_slice(&self) -> &'a [StreamNode] {
        match self {
            Self::None => &[],
            Self::Single(node) => std::slice::from_ref(*node),
            Self::Many(items) => items,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'a, StreamNode> {
        self.as_slice().iter()
    }
}

/// One step of a fixed path into the tree.
#[derive(Debug, Clone, Copy)]
pub enum Step<'s> {
    /// Raw list slot.
    Slot(usize),
    /// Element prop.
    Prop(&'s str),
    /// Element `children` prop, whatever its form.
    Children,
    /// Element child by index, tolerant of a singleton `children`.
    Child(usize),
    /// Object field.
    Key(&'s str),
}

/// Follows `path` from `node`; `None` as soon as a step does not apply.
#[must_use]
pub fn walk<'a>(node: &'a StreamNode, path: &[Step<'_>]) -> Option<&'a StreamNode> {
    path.iter().try_fold(node, |current, step| match *step {
        Step::Slot(index) => current.get(index),
        Step::Prop(name) => current.as_element()?.prop(name),
        Step::Children => current.as_element()?.prop("children"),
        Step::Child(index) => current.as_element()?.child(index),
        Step::Key(key) => current.field(key),
    })
}

/// [`walk`], then view the target as an element.
#[must_use]
pub fn walk_element<'a>(node: &'a StreamNode, path: &[Step<'_>]) -> Option<ElementNode<'a>> {
    walk(node, path).and_then(ElementNode::from_node)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(json: &str) -> StreamNode {
        StreamNode::parse(json).unwrap_or_default()
    }

    #[test]
    fn test_element_requires_marker_and_props() {
        assert!(node(r#"["$","div",null,{}]"#).as_element().is_some());
        assert!(node(r#"["x","div",null,{}]"#).as_element().is_none());
        assert!(node(r#"["$","div",null,"props"]"#).as_element().is_none());
        assert!(node(r#"["$","div",null]"#).as_element().is_none());
    }

    #[test]
    fn test_singleton_and_list_children_read_alike() {
        let single = node(r#"["$","div",null,{"children":["$","span",null,{"children":"a"}]}]"#);
        let many = node(r#"["$","div",null,{"children":[["$","span",null,{"children":"a"}]]}]"#);

        for root in [&single, &many] {
            let element = root.as_element().unwrap_or_else(|| panic!("element"));
            assert_eq!(element.children().len(), 1);
            let child = element.child_element(0).unwrap_or_else(|| panic!("child"));
            assert_eq!(child.tag(), Some("span"));
            assert!(element.child(1).is_none());
        }
    }

    #[test]
    fn test_walk_stops_on_missing_step() {
        let root = node(r#"["$","div",null,{"children":[["$","a",null,{"href":"/x"}],{"k":[1,2]}]}]"#);

        let href = walk(&root, &[Step::Child(0), Step::Prop("href")]);
        assert_eq!(href.and_then(StreamNode::as_text), Some("/x"));

        let deep = walk(&root, &[Step::Child(1), Step::Key("k"), Step::Slot(1)]);
        assert_eq!(deep, Some(&StreamNode::Number(2.0)));

        assert!(walk(&root, &[Step::Child(5), Step::Prop("href")]).is_none());
        assert!(walk(&root, &[Step::Child(1), Step::Children]).is_none());
    }

    #[test]
    fn test_text_skips_references_and_unescapes_dollars() {
        let root = node(r#"["$","h1",null,{"children":["Popular ","$L3","$$5 deals"]}]"#);
        assert_eq!(root.text_content(), "Popular $5 deals");
        assert_eq!(root.first_text().as_deref(), Some("Popular "));
    }

    #[test]
    fn test_first_text_skips_blank_leaves() {
        let root = node(r#"["$","a",null,{"children":[" ",["$","span",null,{"children":"name"}],["$","span",null,{"children":"12"}]]}]"#);
        assert_eq!(root.first_text().as_deref(), Some("name"));
    }

    #[test]
    fn test_elements_preorder() {
        let root = node(
            r#"[["$","nav",null,{"children":["$","a",null,{}]}],["$","div",null,{"children":[["$","b",null,{}]]}]]"#,
        );
        let tags: Vec<_> = root.elements().filter_map(|e| e.tag()).collect();
        assert_eq!(tags, vec!["nav", "a", "div", "b"]);
    }

    #[test]
    fn test_as_id_accepts_integral_numbers() {
        assert_eq!(StreamNode::Number(12345.0).as_id().as_deref(), Some("12345"));
        assert_eq!(StreamNode::Number(1.5).as_id(), None);
        assert_eq!(StreamNode::Text("  ".to_string()).as_id(), None);
        assert_eq!(StreamNode::Text(" 77 ".to_string()).as_id().as_deref(), Some("77"));
    }
}
