//! Flight chunk reassembly.
//!
//! The page pushes its server payload as escaped text chunks
//! (`self.__next_f.push([1,"..."])`). Concatenated and unescaped, the chunks
//! form `id:content` lines, but a line can be cut at any chunk boundary. The
//! [`Reassembler`] re-joins such cut lines through a single-slot fragment
//! buffer and keeps every line whose content is a well-formed List or Object.
//!
//! Reassembly never fails. Lines that cannot be resolved are dropped and
//! logged; callers treat a missing id as "no data for this block".

use std::collections::HashMap;

use serde::de::IgnoredAny;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::node::StreamNode;
use crate::patterns::FLIGHT_CHUNK;

/// One reassembled payload line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadBlock {
    pub id: String,
    pub raw_content: String,
}

impl PayloadBlock {
    /// Parses the content into a tree.
    ///
    /// Content was validated on commit, so this only fails on inputs built by hand.
    pub fn try_parse(&self) -> Result<StreamNode> {
        StreamNode::parse(&self.raw_content).map_err(|err| {
            trace!(block = %self.id, error = %err, "payload block does not parse");
            Error::MalformedChunk(self.id.clone())
        })
    }

    /// [`Self::try_parse`], logging and absorbing the failure.
    #[must_use]
    pub fn parse(&self) -> Option<StreamNode> {
        self.try_parse()
            .inspect_err(|err| warn!(error = %err, "payload block skipped"))
            .ok()
    }
}

/// Block id to raw content, in document order.
///
/// An id appears at most once: the first valid line for it wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkMap {
    blocks: Vec<PayloadBlock>,
    index: HashMap<String, usize>,
}

impl ChunkMap {
    /// Raw content of block `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.block(id).map(|block| block.raw_content.as_str())
    }

    #[must_use]
    pub fn block(&self, id: &str) -> Option<&PayloadBlock> {
        self.index.get(id).map(|&i| &self.blocks[i])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Blocks in the order their lines completed.
    #[must_use]
    pub fn blocks(&self) -> &[PayloadBlock] {
        &self.blocks
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|block| block.id.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Records a block unless the id is already taken.
    fn insert(&mut self, id: &str, content: &str) -> bool {
        if self.index.contains_key(id) {
            trace!(block = id, "duplicate block id ignored");
            return false;
        }
        self.index.insert(id.to_string(), self.blocks.len());
        self.blocks.push(PayloadBlock {
            id: id.to_string(),
            raw_content: content.to_string(),
        });
        true
    }
}

/// Outcome of reading one line as `id:content`.
enum Line<'a> {
    /// Well-formed List/Object content.
    Complete(&'a str, &'a str),
    /// Starts like a List/Object but does not parse yet.
    Truncated,
    /// Anything else: instructions, text rows, lines without an id.
    Discard,
}

fn classify_line(line: &str) -> Line<'_> {
    let Some((id, content)) = line.split_once(':') else {
        return Line::Discard;
    };
    let id = id.trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Line::Discard;
    }
    let content = content.trim();
    if !content.starts_with(['[', '{']) {
        return Line::Discard;
    }
    if serde_json::from_str::<IgnoredAny>(content).is_ok() {
        Line::Complete(id, content)
    } else {
        Line::Truncated
    }
}

/// One reassembly session.
///
/// Holds the fragment buffer for exactly one document. Create a fresh session
/// per document; [`reassemble`] does this for you.
#[derive(Debug, Default)]
pub struct Reassembler {
    blocks: ChunkMap,
    pending: Option<String>,
}

impl Reassembler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk exactly as it appears inside the push call (still escaped).
    pub fn push_chunk(&mut self, escaped: &str) {
        self.push_text(&unescape_chunk(escaped));
    }

    /// Feeds already unescaped stream text.
    pub fn push_text(&mut self, text: &str) {
        for line in text.split('\n') {
            // Empty pieces only come from line terminators at chunk edges.
            if !line.trim().is_empty() {
                self.push_line(line);
            }
        }
    }

    fn push_line(&mut self, line: &str) {
        if let Some(fragment) = self.pending.take() {
            let joined = format!("{fragment}{line}");
            match classify_line(&joined) {
                Line::Complete(id, content) => {
                    trace!(block = id, "fragment completed");
                    self.blocks.insert(id, content);
                }
                Line::Truncated | Line::Discard => {
                    warn!(fragment_len = joined.len(), "dropping unresolved fragment");
                }
            }
            return;
        }

        match classify_line(line) {
            Line::Complete(id, content) => {
                self.blocks.insert(id, content);
            }
            Line::Truncated => self.pending = Some(line.to_string()),
            Line::Discard => trace!(line_len = line.len(), "non-data line discarded"),
        }
    }

    /// Ends the session. A fragment still pending is dropped.
    #[must_use]
    pub fn finish(self) -> ChunkMap {
        if let Some(fragment) = self.pending {
            warn!(fragment_len = fragment.len(), "stream ended inside a fragment");
        }
        self.blocks
    }
}

/// Reassembles all flight chunks of an HTML document into payload blocks.
#[must_use]
pub fn reassemble(html: &str) -> ChunkMap {
    let mut session = Reassembler::new();
    let mut chunks = 0usize;
    for captures in FLIGHT_CHUNK.captures_iter(html) {
        if let Some(chunk) = captures.get(1) {
            session.push_chunk(chunk.as_str());
            chunks += 1;
        }
    }
    let blocks = session.finish();
    debug!(chunks, blocks = blocks.len(), "flight stream reassembled");
    blocks
}

/// Reverses the string-literal escaping of a chunk in one pass.
///
/// Because every backslash pair is consumed as a unit, an escaped backslash
/// followed by `r` or `n` stays a JSON escape instead of becoming a control
/// character.
#[must_use]
pub fn unescape_chunk(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('u') => match read_hex4(&mut chars) {
                Some(high @ 0xD800..=0xDBFF) => {
                    let mut lookahead = chars.clone();
                    let low = if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
                        read_hex4(&mut lookahead)
                    } else {
                        None
                    };
                    match low {
                        Some(low @ 0xDC00..=0xDFFF) => {
                            chars = lookahead;
                            let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                            out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                        }
                        _ => out.push(char::REPLACEMENT_CHARACTER),
                    }
                }
                Some(code) => out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)),
                None => out.push_str("\\u"),
            },
            // \" \\ \/ and unknown escapes keep the escaped character.
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

fn read_hex4(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let digits: String = chars.clone().take(4).collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    chars.nth(3);
    u32::from_str_radix(&digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(chunk: &str) -> String {
        // Escape the way the page does: backslashes, quotes, newlines.
        let escaped = chunk.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n");
        format!("<script>self.__next_f.push([1,\"{escaped}\"])</script>")
    }

    #[test]
    fn test_complete_lines_are_committed() {
        let html = push("1:I[\"x\",[],\"\"]\n2:[\"$\",\"div\",null,{}]\n3:{\"a\":1}\n");
        let blocks = reassemble(&html);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks.get("2"), Some(r#"["$","div",null,{}]"#));
        assert_eq!(blocks.get("3"), Some(r#"{"a":1}"#));
        assert!(blocks.get("1").is_none());
    }

    #[test]
    fn test_line_split_across_chunks_equals_unsplit() {
        let line = r#"7:["$","div",null,{"children":[["$","a",null,{"href":"/x"}]]}]"#;
        let whole = reassemble(&push(&format!("{line}\n")));

        for cut in [5, 20, line.len() - 2] {
            let html = format!("{}{}", push(&line[..cut]), push(&format!("{}\n", &line[cut..])));
            assert_eq!(reassemble(&html), whole, "cut at {cut}");
        }
        assert_eq!(whole.get("7"), Some(&line[2..]));
    }

    #[test]
    fn test_first_writer_wins() {
        let html = push("5:[1]\n5:[2]\n");
        let blocks = reassemble(&html);
        assert_eq!(blocks.get("5"), Some("[1]"));
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_non_data_lines_are_discarded() {
        let html = push("0:\"$Sreact.fragment\"\n4:T1a,some text\nno separator here\n:[1]\n6:[true]\n");
        let blocks = reassemble(&html);
        assert_eq!(blocks.ids().collect::<Vec<_>>(), vec!["6"]);
    }

    #[test]
    fn test_unresolved_fragment_is_dropped_and_next_line_still_read() {
        let mut session = Reassembler::new();
        session.push_text("8:[1,2");
        session.push_text("garbage\n9:[3]\n");
        let blocks = session.finish();

        assert!(!blocks.contains("8"));
        assert_eq!(blocks.get("9"), Some("[3]"));
    }

    #[test]
    fn test_sessions_do_not_share_fragments() {
        let first = reassemble(&push("8:[1,"));
        let second = reassemble(&push("2]\n"));
        assert!(first.is_empty());
        assert!(second.is_empty());
    }

    #[test]
    fn test_unescape_basic_sequences() {
        assert_eq!(unescape_chunk(r#"a\"b\\c\nd"#), "a\"b\\c\nd");
        assert_eq!(unescape_chunk(r"\/x\t"), "/x\t");
    }

    #[test]
    fn test_unescape_keeps_escaped_backslash_before_r_and_n() {
        // JS-escaped JSON escapes: \\r and \\n must stay two-character JSON escapes.
        assert_eq!(unescape_chunk(r"x\\ry\\n"), r"x\ry\n");
        assert_eq!(unescape_chunk(r"x\ry"), "x\ry");
    }

    #[test]
    fn test_unescape_unicode() {
        assert_eq!(unescape_chunk(r"\u30bf\u30b0"), "タグ");
        assert_eq!(unescape_chunk(r"\ud83d\ude00"), "\u{1F600}");
        assert_eq!(unescape_chunk(r"\ud83dx"), "\u{FFFD}x");
        assert_eq!(unescape_chunk(r"\uzz"), r"\uzz");
    }

    #[test]
    fn test_hand_built_block_reports_malformed_chunk() {
        let block = PayloadBlock {
            id: "x1".to_string(),
            raw_content: "[1,".to_string(),
        };
        assert_eq!(block.try_parse(), Err(Error::MalformedChunk("x1".to_string())));
        assert!(block.parse().is_none());
    }
}
