// src/sanitizer/links.rs

use lol_html::{RewriteStrSettings, element, rewrite_str};
use url::Url;

use super::html::sanitize_html;

pub const EXTERNAL_LINK_TARGET: &str = "_blank";
pub const EXTERNAL_LINK_REL: &str = "noopener noreferrer";

/// Sanitize article body HTML for rendering.
///
/// Runs the default filter first, then hardens every absolute `http(s)` link so it
/// opens in a new browsing context without an `opener` or referrer. Relative and
/// in-page links are left alone.
pub fn sanitize_article_content(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let filtered = sanitize_html(content, None);
    harden_external_links(&filtered)
}

/// Second pass over already-filtered markup.
///
/// Overwrites any existing `target`/`rel` on external anchors. On rewriter failure
/// the filtered markup is returned as-is.
pub fn harden_external_links(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let rewritten = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("a[href]", |el| {
                let external = el
                    .get_attribute("href")
                    .is_some_and(|href| is_external_href(&href));

                if external {
                    el.set_attribute("target", EXTERNAL_LINK_TARGET)?;
                    el.set_attribute("rel", EXTERNAL_LINK_REL)?;
                }
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    );

    match rewritten {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!("Link hardening skipped, returning filtered markup: {}", e);
            html.to_string()
        }
    }
}

/// Absolute `http://` or `https://` URL, classified the way a browser would navigate it.
///
/// Tabs and newlines anywhere and leading/trailing C0 controls are ignored, as the URL
/// parser ignores them. Protocol-relative `//host` links count as internal.
pub fn is_external_href(href: &str) -> bool {
    let normalized: String = href
        .trim_matches(|c: char| c.is_ascii_control() || c == ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect();

    let has_prefix = |prefix: &str| {
        normalized
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };

    if has_prefix("http://") || has_prefix("https://") {
        return true;
    }

    Url::parse(&normalized).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}
