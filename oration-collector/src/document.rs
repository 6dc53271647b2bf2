//! Speech text and speaker extraction from a single document page.

use std::sync::LazyLock;

use oration_common::UNKNOWN_SPEAKER;
use scraper::{Html, Selector};

static CONTENT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.field-docs-content").expect("content selector"));
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3.diet-title").expect("title selector"));
static TITLE_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("title link selector"));

/// What a document page yielded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Whitespace-normalised text of the content block. `None` when the
    /// block is missing or holds no text.
    pub text: Option<String>,
    /// Name from the title link, or [`UNKNOWN_SPEAKER`].
    pub speaker: String,
}

pub fn parse_document(html: &str) -> Document {
    let document = Html::parse_document(html);

    let text = document
        .select(&CONTENT)
        .next()
        .map(|block| normalize_whitespace(block.text()))
        .filter(|t| !t.is_empty());

    let speaker = document
        .select(&TITLE)
        .next()
        .and_then(|title| title.select(&TITLE_LINK).next())
        .map(|link| normalize_whitespace(link.text()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_SPEAKER.to_string());

    Document { text, speaker }
}

/// Join text nodes with single spaces; paragraph breaks are not kept.
fn normalize_whitespace<'a>(nodes: impl Iterator<Item = &'a str>) -> String {
    nodes
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
