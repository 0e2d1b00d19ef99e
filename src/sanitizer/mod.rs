// src/sanitizer/mod.rs

pub mod html;
pub mod links;
pub mod policy;
pub mod text;

pub use html::{clean_with_policy, sanitize_html};
pub use links::{
    EXTERNAL_LINK_REL, EXTERNAL_LINK_TARGET, harden_external_links, sanitize_article_content,
};
pub use policy::{Policy, PolicyOverrides};
pub use text::{DEFAULT_EXCERPT_LENGTH, generate_safe_excerpt, strip_html, truncate_text};
