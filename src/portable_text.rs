//! Portable-text rendering for CMS article bodies.
//!
//! Supported nodes:
//!
//! | `_type` | Output |
//! |---------|--------|
//! | `block` with `style` `normal`/`h1`-`h4`/`blockquote` | `<p>`, `<h2>`-`<h4>`, `<blockquote>` |
//! | `block` with `listItem` `bullet`/`number` | grouped into `<ul>`/`<ol>` |
//! | `image` | `<figure><img>` via the CDN, when a builder is available |
//!
//! Span marks `strong`, `em`, `code`, `underline` and `strike-through` map to
//! the matching inline elements; mark keys that name a `link` mark definition
//! become anchors. Unknown node types are skipped. Headings start at `<h2>`
//! because the page title owns the `<h1>`.

use crate::image_url::{Fit, ImageUrlBuilder};
use crate::model::{SanityImage, null_default};
use maud::{Markup, html};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(tag = "_type", rename_all = "lowercase")]
enum Node {
    Block(Block),
    Image(SanityImage),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Block {
    style: Option<String>,
    list_item: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    children: Vec<Span>,
    #[serde(default, deserialize_with = "null_default")]
    mark_defs: Vec<MarkDef>,
}

#[derive(Debug, Deserialize)]
struct Span {
    #[serde(default, deserialize_with = "null_default")]
    text: String,
    #[serde(default, deserialize_with = "null_default")]
    marks: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct MarkDef {
    #[serde(rename = "_key")]
    key: String,
    #[serde(rename = "_type")]
    kind: String,
    href: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Number,
}

/// A top-level element after list grouping.
enum Item<'a> {
    Block(&'a Block),
    List(ListKind, Vec<&'a Block>),
    Image(&'a SanityImage),
}

fn decode(blocks: &[Value]) -> Vec<Node> {
    blocks
        .iter()
        .filter_map(|value| match Node::deserialize(value) {
            Ok(node) => Some(node),
            Err(e) => {
                tracing::debug!(error = %e, "skipping undecodable portable-text node");
                None
            }
        })
        .collect()
}

fn group(nodes: &[Node]) -> Vec<Item<'_>> {
    let mut items: Vec<Item> = Vec::new();
    for node in nodes {
        match node {
            Node::Block(block) => match list_kind(block) {
                Some(kind) => match items.last_mut() {
                    Some(Item::List(current, entries)) if *current == kind => entries.push(block),
                    _ => items.push(Item::List(kind, vec![block])),
                },
                None => items.push(Item::Block(block)),
            },
            Node::Image(image) => items.push(Item::Image(image)),
            Node::Unknown => {}
        }
    }
    items
}

fn list_kind(block: &Block) -> Option<ListKind> {
    match block.list_item.as_deref()? {
        "number" => Some(ListKind::Number),
        _ => Some(ListKind::Bullet),
    }
}

/// Render portable-text `blocks` to HTML. Images are dropped when no builder
/// is given.
pub fn render(blocks: &[Value], images: Option<&ImageUrlBuilder>) -> Markup {
    let nodes = decode(blocks);
    let items = group(&nodes);
    html! {
        @for item in &items {
            @match item {
                Item::Block(block) => (render_block(block)),
                Item::List(ListKind::Bullet, entries) => ul {
                    @for entry in entries { li { (render_spans(entry)) } }
                },
                Item::List(ListKind::Number, entries) => ol {
                    @for entry in entries { li { (render_spans(entry)) } }
                },
                Item::Image(image) => (render_image(image, images)),
            }
        }
    }
}

fn render_block(block: &Block) -> Markup {
    let content = render_spans(block);
    match block.style.as_deref().unwrap_or("normal") {
        "h1" | "h2" => html! { h2 { (content) } },
        "h3" => html! { h3 { (content) } },
        "h4" | "h5" | "h6" => html! { h4 { (content) } },
        "blockquote" => html! { blockquote { (content) } },
        _ => html! { p { (content) } },
    }
}

fn render_spans(block: &Block) -> Markup {
    html! {
        @for span in &block.children {
            (marked(&span.text, &span.marks, &block.mark_defs))
        }
    }
}

/// Wrap `text` in its marks, first mark outermost.
fn marked(text: &str, marks: &[String], defs: &[MarkDef]) -> Markup {
    let Some((first, rest)) = marks.split_first() else {
        return html! { (text) };
    };
    let inner = marked(text, rest, defs);
    match first.as_str() {
        "strong" => html! { strong { (inner) } },
        "em" => html! { em { (inner) } },
        "code" => html! { code { (inner) } },
        "underline" => html! { u { (inner) } },
        "strike-through" => html! { s { (inner) } },
        key => {
            let href = defs
                .iter()
                .find(|d| d.key == key && d.kind == "link")
                .and_then(|d| d.href.as_deref())
                .filter(|href| is_safe_href(href));
            match href {
                Some(href) if is_external(href) => html! {
                    a href=(href) target="_blank" rel="noopener noreferrer" { (inner) }
                },
                Some(href) => html! { a href=(href) { (inner) } },
                None => inner,
            }
        }
    }
}

fn is_external(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

/// Only web, mail and phone links, or site-relative paths.
fn is_safe_href(href: &str) -> bool {
    is_external(href)
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || (href.starts_with('/') && !href.starts_with("//"))
}

fn render_image(image: &SanityImage, images: Option<&ImageUrlBuilder>) -> Markup {
    let Some(url) = images.and_then(|b| {
        b.image(image)
            .width(800)
            .fit(Fit::Max)
            .auto_format()
            .url()
    }) else {
        return html! {};
    };
    html! {
        figure {
            img src=(url) alt=(image.alt.as_deref().unwrap_or_default()) loading="lazy";
        }
    }
}

/// Concatenated span text, one line per block.
pub fn plain_text(blocks: &[Value]) -> String {
    decode(blocks)
        .iter()
        .filter_map(|node| match node {
            Node::Block(block) => Some(
                block
                    .children
                    .iter()
                    .map(|s| s.text.as_str())
                    .collect::<String>(),
            ),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Minutes to read at 200 words per minute, at least 1.
pub fn reading_time(blocks: &[Value]) -> u32 {
    reading_time_of(&plain_text(blocks))
}

/// Reading time of already extracted text.
pub fn reading_time_of(text: &str) -> u32 {
    let words = text.split_whitespace().count() as u32;
    (words / 200).max(1)
}
