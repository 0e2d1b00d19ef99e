// src/sanitizer/html.rs

use std::borrow::Cow;

use ammonia::{Builder, UrlRelative};

use super::policy::{Policy, PolicyOverrides};

const MAX_CLEAN_PASSES: usize = 4;

/// Clean untrusted HTML using the ammonia library.
///
/// The default policy is used unless `overrides` is given, in which case a new
/// policy is merged from the defaults for this call only.
///
/// Note:
/// 1. Forbidden tags (`<script>`, `<iframe>`, ...) are removed with their entire content.
/// 2. Tags outside the allowlist lose only their own wrapper; their children stay in place.
/// 3. Malformed input never fails, html5ever always produces some tree.
pub fn sanitize_html(dirty: &str, overrides: Option<&PolicyOverrides>) -> String {
    if dirty.is_empty() {
        return String::new();
    }

    match overrides {
        Some(overrides) => clean_with_policy(dirty, &Policy::shared_default().merge(overrides)),
        None => clean_with_policy(dirty, Policy::shared_default()),
    }
}

/// Clean `dirty` against an explicit policy.
pub fn clean_with_policy(dirty: &str, policy: &Policy) -> String {
    if dirty.is_empty() {
        return String::new();
    }

    let builder = builder_for(policy);
    let mut cleaned = builder.clean(dirty).to_string();
    let mut passes = 1;

    // Removing wrappers can leave nesting the parser would not build itself
    // (content foster-parented out of a dropped table, for one), so the output is
    // cleaned again until it reparses to itself.
    while passes < MAX_CLEAN_PASSES {
        let again = builder.clean(&cleaned).to_string();
        passes += 1;
        if again == cleaned {
            break;
        }
        cleaned = again;
    }

    tracing::debug!(
        input_len = dirty.len(),
        output_len = cleaned.len(),
        passes,
        "sanitized html fragment"
    );
    cleaned
}

/// Translates a policy into an ammonia builder.
///
/// ammonia only knows allowlists, so forbidden names are subtracted up front and
/// checked once more in the attribute filter, which also drops any value carrying
/// markup delimiters. `rel` is managed by the link pass, never by ammonia.
pub(crate) fn builder_for(policy: &Policy) -> Builder<'_> {
    let mut builder = Builder::empty();
    let filter_policy = policy.clone();
    builder
        .tags(policy.effective_tags())
        .clean_content_tags(policy.forbidden_tag_names())
        .generic_attributes(policy.effective_attributes())
        .generic_attribute_prefixes(policy.data_attribute_prefixes())
        .url_schemes(policy.url_schemes())
        .url_relative(UrlRelative::PassThrough)
        .link_rel(None)
        .strip_comments(true)
        .attribute_filter(move |_element, attribute, value| {
            // Attribute values are serialized without escaping `<`/`>`.
            if !filter_policy.permits_attribute(attribute) || value.contains(['<', '>']) {
                None
            } else {
                Some(Cow::Borrowed(value))
            }
        });
    builder
}
