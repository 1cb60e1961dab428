//! Page fixtures shared by the integration tests.
//!
//! Payload JSON is built as text and wrapped into flight push scripts the
//! same way a server-rendered page embeds it.

#![allow(dead_code)]

/// Escapes stream text as a JS string literal body.
pub fn escape_chunk(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

/// One push script carrying `chunk`.
pub fn script(chunk: &str) -> String {
    format!(r#"<script>self.__next_f.push([1,"{}"])</script>"#, escape_chunk(chunk))
}

/// A page whose body pushes `chunks` in order, preceded by `markup`.
pub fn page_with_markup(markup: &str, chunks: &[String]) -> String {
    let mut html = String::from(
        r#"<!DOCTYPE html><html><head><meta charset="utf-8"></head><body><script>(self.__next_f=self.__next_f||[]).push([0])</script>"#,
    );
    html.push_str(markup);
    for chunk in chunks {
        html.push_str(&script(chunk));
    }
    html.push_str("</body></html>");
    html
}

pub fn page(chunks: &[String]) -> String {
    page_with_markup("", chunks)
}

/// One `id:content` stream line. Layout whitespace in `payload` is removed.
pub fn line(id: &str, payload: &str) -> String {
    format!("{id}:{}\n", compact(payload))
}

/// Joins a multi-line JSON literal into one line.
pub fn compact(json: &str) -> String {
    json.lines().map(str::trim).collect()
}

pub fn cover(id: u32) -> String {
    format!("https://cdn.example/covers/{id}.jpg")
}

// =============================================================================
// Listing payloads
// =============================================================================

pub fn article(id: u32, title: &str) -> String {
    format!(
        r#"{{"id":{id},"attributes":{{"title":"{title}","thumbnail":"{}"}}}}"#,
        cover(id)
    )
}

pub fn flat_listing(title: &str, articles: &[String]) -> String {
    format!(
        r#"[["$","h2",null,{{"children":"{title}"}}],["$","section",null,{{"children":["$","$L5",null,{{"articles":[{}]}}]}}]]"#,
        articles.join(",")
    )
}

pub fn ranked_card(rank: u32, id: u32, title: &str) -> String {
    format!(
        r#"["$","$L9","{id}",{{"rank":{rank},"comic":{{"id":{id},"title":"{title}","cover":"{}"}}}}]"#,
        cover(id)
    )
}

pub fn ranked_listing(title: &str, cards: &[String]) -> String {
    format!(
        r#"[["$","header",null,{{"children":["$","h2",null,{{"children":"{title}"}}]}}],["$","div",null,{{"children":["$","div",null,{{"className":"grid grid-cols-2","children":[{}]}}]}}]]"#,
        cards.join(",")
    )
}

pub fn grid_card(id: u32, title: &str) -> String {
    format!(
        r#"["$","$L12","{id}",{{"id":"{id}","title":"{title}","cover":"{}"}}]"#,
        cover(id)
    )
}

/// Nested collection: a list of card elements.
pub fn nested(cards: &[String]) -> String {
    format!("[{}]", cards.join(","))
}

/// Flattened collection: the cards' slots spliced into one list.
pub fn flattened(cards: &[String]) -> String {
    let slots: Vec<&str> = cards.iter().map(|card| &card[1..card.len() - 1]).collect();
    format!("[{}]", slots.join(","))
}

pub fn search_page(collection: &str) -> String {
    format!(
        r#"["$","main",null,{{"children":[["$","h1",null,{{"children":"Search results"}}],["$","div",null,{{"className":"grid gap-4","children":{collection}}}]]}}]"#
    )
}

pub fn no_results_page(heading: &str) -> String {
    format!(
        r#"["$","main",null,{{"children":["$","div",null,{{"className":"empty","children":[["$","h2",null,{{"children":"{heading}"}}],["$","p",null,{{"children":"Try another keyword"}}]]}}]}}]"#
    )
}

// =============================================================================
// Pagination
// =============================================================================

fn page_link(n: u32) -> String {
    format!(r#"["$","li","{n}",{{"children":["$","a",null,{{"href":"/?page={n}","children":"{n}"}}]}}]"#)
}

/// A `nav` element with `pages` page-number entries and, when `last` is
/// given, next/last controls pointing at it.
pub fn nav(pages: u32, last: Option<u32>) -> String {
    let entries: Vec<_> = (1..=pages).map(page_link).collect();
    let mut slots = vec![
        r#"["$","a",null,{"href":"/?page=1","children":"«"}]"#.to_string(),
        format!(r#"["$","ul",null,{{"children":[{}]}}]"#, entries.join(",")),
    ];
    if let Some(last) = last {
        slots.push(format!(
            r#"["$","div",null,{{"children":[["$","a",null,{{"href":"/?page=2","children":"›"}}],["$","a",null,{{"href":"/?page={last}","children":"»"}}]]}}]"#
        ));
    }
    format!(
        r#"["$","nav",null,{{"className":"pagination","children":["$","div",null,{{"children":[{}]}}]}}]"#,
        slots.join(",")
    )
}

// =============================================================================
// Detail and catalog
// =============================================================================

pub fn tag_link(href: &str, name: &str) -> String {
    format!(
        r#"["$","a","{href}",{{"href":"{href}","children":[["$","span",null,{{"children":"{name}"}}],["$","span",null,{{"children":"2.1K"}}]]}}]"#
    )
}

/// One tag group; `nested` wraps the entries in a single list.
pub fn tag_group(header: &str, entries: &[String], nested: bool) -> String {
    let header = format!(r#"["$","span",null,{{"className":"label","children":"{header}:"}}]"#);
    let body = if nested {
        format!("[{}]", entries.join(","))
    } else {
        entries.join(",")
    };
    if body.is_empty() {
        format!(r#"["$","div",null,{{"children":[{header}]}}]"#)
    } else {
        format!(r#"["$","div",null,{{"children":[{header},{body}]}}]"#)
    }
}

pub fn detail_page(id: u32, title: &str, groups: &[String]) -> String {
    format!(
        r#"["$","main",null,{{"children":[
            ["$","div",null,{{"className":"detail","children":[
                ["$","a",null,{{"href":"/reader?id={id}","children":["$","img",null,{{"src":"{cover}","alt":"{title}"}}]}}],
                ["$","div",null,{{"className":"info","children":[
                    ["$","h1",null,{{"children":"{title}"}}],
                    ["$","div",null,{{"className":"tags","children":[{groups}]}}]
                ]}}]
            ]}}],
            ["$","$L20",null,{{"comicId":{id}}}]
        ]}}]"#,
        cover = cover(id),
        groups = groups.join(",")
    )
}

pub fn catalog_anchor(href: &str, title: &str, english: &str) -> String {
    format!(
        r#"["$","a","{href}",{{"href":"{href}","title":"{title}","children":[["$","span",null,{{"children":"{title}"}}],"{english}"]}}]"#
    )
}

pub fn catalog_page(anchors: &[String]) -> String {
    format!(
        r#"[
            ["$","div",null,{{"className":"index-switch","children":[["$","a",null,{{"href":"/artists","children":"Popular"}}],["$","a",null,{{"href":"/artists?sort=name","children":"A-Z"}}]]}}],
            ["$","main",null,{{"children":["$","section",null,{{"children":["$","div",null,{{"children":["$","ul",null,{{"children":["$","li",null,{{"children":[{}]}}]}}]}}]}}]}}]
        ]"#,
        anchors.join(",")
    )
}

pub fn reader_page(images: &[&str]) -> String {
    let imgs: Vec<_> = images
        .iter()
        .enumerate()
        .map(|(i, src)| format!(r#"["$","img","{i}",{{"src":"{src}","loading":"lazy"}}]"#))
        .collect();
    format!(
        r#"["$","main",null,{{"children":[["$","h1",null,{{"children":"Reader"}}],["$","div",null,{{"className":"reader-pages","children":[{}]}}]]}}]"#,
        imgs.join(",")
    )
}
