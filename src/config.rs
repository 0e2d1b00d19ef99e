// src/config.rs

use std::env;
use dotenvy::dotenv;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_dir: String,
    /// Largest accepted `content` field, in bytes.
    pub max_content_length: usize,
    /// CORS origins allowed to call the API.
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .map(|v| v.parse::<u16>().expect("PORT must be a valid port number"))
            .unwrap_or(3000);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let max_content_length = env::var("MAX_CONTENT_LENGTH")
            .map(|v| {
                v.parse::<usize>()
                    .expect("MAX_CONTENT_LENGTH must be a positive integer")
            })
            .unwrap_or(100_000);

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                ]
            });

        Self {
            host,
            port,
            rust_log,
            log_dir,
            max_content_length,
            allowed_origins,
        }
    }
}

/// Splits a comma-separated origin list, panicking on entries that are not URLs.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            let url = Url::parse(origin)
                .unwrap_or_else(|e| panic!("ALLOWED_ORIGINS entry '{}' is invalid: {}", origin, e));
            url.origin().ascii_serialization()
        })
        .collect()
}
