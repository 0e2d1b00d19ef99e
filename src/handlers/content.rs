// src/handlers/content.rs

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::content::{
        ContentRequest, ExcerptRequest, HtmlResponse, RenderedArticle, SanitizeRequest,
        TextResponse, TruncateRequest,
    },
    sanitizer::{
        DEFAULT_EXCERPT_LENGTH, generate_safe_excerpt, sanitize_article_content, sanitize_html,
        strip_html, truncate_text,
    },
};

/// Rejects bodies larger than the configured limit before any parsing work.
fn ensure_within_limit(config: &Config, field: &str, value: &str) -> Result<(), AppError> {
    if value.len() > config.max_content_length {
        return Err(AppError::PayloadTooLarge(format!(
            "{} exceeds {} bytes",
            field, config.max_content_length
        )));
    }
    Ok(())
}

/// Sanitize arbitrary HTML.
/// Accepts optional policy overrides, merged over the defaults for this request only.
pub async fn sanitize(
    State(config): State<Config>,
    payload: Result<Json<SanitizeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    ensure_within_limit(&config, "content", &payload.content)?;

    let html = sanitize_html(&payload.content, payload.options.as_ref());

    Ok(Json(HtmlResponse { html }))
}

/// Sanitize an article body and harden its external links.
pub async fn sanitize_article(
    State(config): State<Config>,
    payload: Result<Json<ContentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    ensure_within_limit(&config, "content", &payload.content)?;

    Ok(Json(HtmlResponse {
        html: sanitize_article_content(&payload.content),
    }))
}

/// Extract plain text from HTML.
pub async fn strip(
    State(config): State<Config>,
    payload: Result<Json<ContentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    ensure_within_limit(&config, "content", &payload.content)?;

    Ok(Json(TextResponse {
        text: strip_html(&payload.content),
    }))
}

/// Truncate plain text to `max_length` characters.
pub async fn truncate(
    State(config): State<Config>,
    payload: Result<Json<TruncateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;
    ensure_within_limit(&config, "text", &payload.text)?;

    Ok(Json(TextResponse {
        text: truncate_text(&payload.text, payload.max_length),
    }))
}

/// Build a short plain-text preview of an HTML body.
pub async fn excerpt(
    State(config): State<Config>,
    payload: Result<Json<ExcerptRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;
    ensure_within_limit(&config, "content", &payload.content)?;

    let max_length = payload.max_length.unwrap_or(DEFAULT_EXCERPT_LENGTH);

    Ok(Json(TextResponse {
        text: generate_safe_excerpt(&payload.content, max_length),
    }))
}

/// Render every view of an article at once (body, plain text, excerpt).
pub async fn render(
    State(config): State<Config>,
    payload: Result<Json<ContentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    ensure_within_limit(&config, "content", &payload.content)?;

    let html = sanitize_article_content(&payload.content);
    let text = strip_html(&html);
    let excerpt = truncate_text(&text, DEFAULT_EXCERPT_LENGTH);

    tracing::debug!(
        html_len = html.len(),
        text_len = text.len(),
        "rendered article preview"
    );

    Ok(Json(RenderedArticle {
        html,
        text,
        excerpt,
    }))
}
