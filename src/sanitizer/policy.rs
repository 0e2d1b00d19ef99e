// src/sanitizer/policy.rs

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::Deserialize;

/// Tags kept by default: inline formatting, headings, lists, quote/code blocks,
/// anchors, media and generic containers.
pub const DEFAULT_ALLOWED_TAGS: &[&str] = &[
    "p", "br", "hr", "strong", "b", "em", "i", "u", "s", "del", "blockquote", "code", "pre", "h1",
    "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "a", "img", "video", "audio", "source", "div",
    "span",
];

/// Attributes kept by default on any retained tag.
pub const DEFAULT_ALLOWED_ATTRIBUTES: &[&str] = &[
    "href", "target", "rel", "src", "alt", "title", "width", "height", "controls", "autoplay",
    "loop", "muted", "poster", "class",
];

/// Tags removed together with everything inside them.
pub const DEFAULT_FORBIDDEN_TAGS: &[&str] = &["script", "style", "iframe", "object", "embed"];

/// Inline event handlers that never survive.
pub const DEFAULT_FORBIDDEN_ATTRIBUTES: &[&str] = &["onerror", "onload", "onclick", "onmouseover"];

/// Schemes accepted in URL-bearing attributes. Relative URLs are always accepted.
pub const DEFAULT_URL_SCHEMES: &[&str] = &["http", "https", "mailto"];

const DATA_ATTRIBUTE_PREFIX: &str = "data-";

static DEFAULT_POLICY: LazyLock<Policy> = LazyLock::new(Policy::default);

/// Immutable sanitization policy.
///
/// Names are stored lowercase. A `Policy` is never mutated after construction;
/// [`Policy::merge`] builds a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    allowed_tags: HashSet<String>,
    allowed_attributes: HashSet<String>,
    forbidden_tags: HashSet<String>,
    forbidden_attributes: HashSet<String>,
    allow_data_attributes: bool,
    allowed_url_schemes: HashSet<String>,
}

/// Caller-supplied overrides. Any field that is present fully replaces the
/// corresponding default; sets are not unioned.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyOverrides {
    pub allowed_tags: Option<Vec<String>>,
    pub allowed_attributes: Option<Vec<String>>,
    pub forbidden_tags: Option<Vec<String>>,
    pub forbidden_attributes: Option<Vec<String>>,
    pub allow_data_attributes: Option<bool>,
    pub allowed_url_schemes: Option<Vec<String>>,
}

fn name_set<I, S>(names: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| name.as_ref().trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect()
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            allowed_tags: name_set(DEFAULT_ALLOWED_TAGS),
            allowed_attributes: name_set(DEFAULT_ALLOWED_ATTRIBUTES),
            forbidden_tags: name_set(DEFAULT_FORBIDDEN_TAGS),
            forbidden_attributes: name_set(DEFAULT_FORBIDDEN_ATTRIBUTES),
            allow_data_attributes: false,
            allowed_url_schemes: name_set(DEFAULT_URL_SCHEMES),
        }
    }
}

impl Policy {
    /// The process-wide default policy.
    pub fn shared_default() -> &'static Policy {
        &DEFAULT_POLICY
    }

    /// Builds a new policy with `overrides` applied over `self`.
    pub fn merge(&self, overrides: &PolicyOverrides) -> Policy {
        let pick = |over: &Option<Vec<String>>, base: &HashSet<String>| match over {
            Some(names) => name_set(names),
            None => base.clone(),
        };

        Policy {
            allowed_tags: pick(&overrides.allowed_tags, &self.allowed_tags),
            allowed_attributes: pick(&overrides.allowed_attributes, &self.allowed_attributes),
            forbidden_tags: pick(&overrides.forbidden_tags, &self.forbidden_tags),
            forbidden_attributes: pick(&overrides.forbidden_attributes, &self.forbidden_attributes),
            allow_data_attributes: overrides
                .allow_data_attributes
                .unwrap_or(self.allow_data_attributes),
            allowed_url_schemes: pick(&overrides.allowed_url_schemes, &self.allowed_url_schemes),
        }
    }

    pub fn allowed_tags(&self) -> &HashSet<String> {
        &self.allowed_tags
    }

    pub fn allowed_attributes(&self) -> &HashSet<String> {
        &self.allowed_attributes
    }

    pub fn forbidden_tags(&self) -> &HashSet<String> {
        &self.forbidden_tags
    }

    pub fn forbidden_attributes(&self) -> &HashSet<String> {
        &self.forbidden_attributes
    }

    pub fn allow_data_attributes(&self) -> bool {
        self.allow_data_attributes
    }

    pub fn allowed_url_schemes(&self) -> &HashSet<String> {
        &self.allowed_url_schemes
    }

    /// Whether an element named `tag` survives. The forbidden check runs first.
    pub fn permits_tag(&self, tag: &str) -> bool {
        let tag = tag.to_ascii_lowercase();
        if self.forbidden_tags.contains(&tag) {
            return false;
        }
        self.allowed_tags.contains(&tag)
    }

    /// Whether an attribute named `name` survives on a retained element.
    /// Forbidden names and disabled `data-*` names are rejected before the allowlist is consulted.
    pub fn permits_attribute(&self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        if self.forbidden_attributes.contains(&name) {
            return false;
        }
        if name.starts_with(DATA_ATTRIBUTE_PREFIX) {
            return self.allow_data_attributes;
        }
        self.allowed_attributes.contains(&name)
    }

    /// Allowed tags with every forbidden tag removed.
    pub(crate) fn effective_tags(&self) -> HashSet<&str> {
        self.allowed_tags
            .iter()
            .map(String::as_str)
            .filter(|tag| self.permits_tag(tag))
            .collect()
    }

    /// Allowed attributes with forbidden and (when disabled) `data-*` names removed.
    pub(crate) fn effective_attributes(&self) -> HashSet<&str> {
        self.allowed_attributes
            .iter()
            .map(String::as_str)
            .filter(|name| self.permits_attribute(name))
            .collect()
    }

    pub(crate) fn data_attribute_prefixes(&self) -> HashSet<&str> {
        if self.allow_data_attributes {
            HashSet::from([DATA_ATTRIBUTE_PREFIX])
        } else {
            HashSet::new()
        }
    }

    pub(crate) fn forbidden_tag_names(&self) -> HashSet<&str> {
        self.forbidden_tags.iter().map(String::as_str).collect()
    }

    pub(crate) fn url_schemes(&self) -> HashSet<&str> {
        self.allowed_url_schemes.iter().map(String::as_str).collect()
    }
}
