// src/sanitizer/text.rs

use std::collections::HashSet;
use std::sync::LazyLock;

use ammonia::Builder;
use regex::Regex;

use super::policy::Policy;

/// Default excerpt length, in characters.
pub const DEFAULT_EXCERPT_LENGTH: usize = 200;

const ELLIPSIS: &str = "...";

/// Elements whose boundaries separate words in the extracted text.
const TEXT_BREAK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

// The intermediate markup carries no attributes, so every tag is `<name>`, `</name>` or `<name/>`.
static BARE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z][A-Za-z0-9]*\s*/?>").expect("valid regex"));

static CHARACTER_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^&(?:#[0-9]+|#[xX][0-9A-Fa-f]+|[A-Za-z][A-Za-z0-9]*);").expect("valid regex")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Strips every tag from `html`, keeping text content in document order.
///
/// Contents of forbidden tags (scripts, styles, ...) are dropped, not kept as text.
/// Markup-significant characters in the text stay entity-escaped, so the result never
/// contains `<` or `>`.
pub fn strip_html(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let policy = Policy::shared_default();
    let forbidden = policy.forbidden_tag_names();
    let break_tags: HashSet<&str> = TEXT_BREAK_TAGS
        .iter()
        .copied()
        .filter(|tag| !forbidden.contains(tag))
        .collect();

    let mut builder = Builder::empty();
    builder
        .tags(break_tags)
        .clean_content_tags(forbidden)
        .link_rel(None)
        .strip_comments(true);

    let skeleton = builder.clean(html).to_string();
    let spaced = BARE_TAG.replace_all(&skeleton, " ");

    collapse_whitespace(&spaced)
}

/// Collapses every whitespace run into a single space and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Cuts `text` to at most `max_length` characters, appending `...` when cut.
///
/// The cut is by character, not by word.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    match text.char_indices().nth(max_length) {
        None => text.to_string(),
        Some((cut, _)) => with_ellipsis(&text[..cut]),
    }
}

/// Plain-text preview of `html`, at most `max_length` characters plus `...`.
///
/// The plain text keeps character references escaped (`&amp;`, `&lt;`, ...). A cut
/// that would land inside one is moved back to just before its `&`, so the preview
/// may come out a few characters shorter than `max_length`.
pub fn generate_safe_excerpt(html: &str, max_length: usize) -> String {
    if html.is_empty() {
        return String::new();
    }

    let text = strip_html(html);
    match text.char_indices().nth(max_length) {
        None => text,
        Some((cut, _)) => with_ellipsis(&text[..entity_boundary(&text, cut)]),
    }
}

fn with_ellipsis(head: &str) -> String {
    format!("{}{}", head.trim_end(), ELLIPSIS)
}

/// Moves `cut` back to the start of a character reference it would split.
fn entity_boundary(text: &str, cut: usize) -> usize {
    let Some(amp) = text[..cut].rfind('&') else {
        return cut;
    };

    match CHARACTER_REFERENCE.find(&text[amp..]) {
        Some(reference) if amp + reference.end() > cut => amp,
        _ => cut,
    }
}
