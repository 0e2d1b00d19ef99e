// src/models/content.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::sanitizer::PolicyOverrides;

/// Upper bound accepted for any requested excerpt/truncation length.
pub const MAX_EXCERPT_LENGTH: usize = 10_000;

/// DTO for sanitizing arbitrary HTML, optionally with a per-request policy.
#[derive(Debug, Deserialize)]
pub struct SanitizeRequest {
    pub content: String,

    /// Overrides merged over the default policy for this request only.
    #[serde(default)]
    pub options: Option<PolicyOverrides>,
}

/// DTO for endpoints that take a single HTML body.
#[derive(Debug, Deserialize)]
pub struct ContentRequest {
    pub content: String,
}

/// DTO for excerpt generation.
#[derive(Debug, Deserialize, Validate)]
pub struct ExcerptRequest {
    pub content: String,

    /// Defaults to 200 characters.
    #[validate(range(
        min = 1,
        max = MAX_EXCERPT_LENGTH,
        message = "max_length must be between 1 and 10000"
    ))]
    pub max_length: Option<usize>,
}

/// DTO for truncating already-plain text.
#[derive(Debug, Deserialize, Validate)]
pub struct TruncateRequest {
    pub text: String,

    #[validate(range(
        min = 1,
        max = MAX_EXCERPT_LENGTH,
        message = "max_length must be between 1 and 10000"
    ))]
    pub max_length: usize,
}

#[derive(Debug, Serialize)]
pub struct HtmlResponse {
    pub html: String,
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
}

/// All three views of an article body, as a preview page needs them.
#[derive(Debug, Serialize)]
pub struct RenderedArticle {
    /// Sanitized markup with external links hardened.
    pub html: String,
    pub text: String,
    pub excerpt: String,
}
