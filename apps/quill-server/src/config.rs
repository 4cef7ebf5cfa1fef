//! Application configuration loaded from environment variables.

use std::env;

use chrono::TimeDelta;

use quill_core::feed::PageSize;
use quill_infra::JwtConfig;
use quill_infra::accounts::DEFAULT_RESET_TTL_MINUTES;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Default page size of the paginated feed.
    pub feed_page_size: PageSize,
    pub jwt: JwtConfig,
    pub reset_code_ttl: TimeDelta,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            feed_page_size: PageSize::default(),
            jwt: JwtConfig::default(),
            reset_code_ttl: TimeDelta::minutes(DEFAULT_RESET_TTL_MINUTES),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            feed_page_size: env::var("FEED_PAGE_SIZE")
                .ok()
                .map(|raw| Self::parse_page_size(&raw))
                .unwrap_or(defaults.feed_page_size),
            jwt: JwtConfig::from_env(),
            reset_code_ttl: env::var("RESET_CODE_TTL_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(TimeDelta::minutes)
                .unwrap_or(defaults.reset_code_ttl),
        }
    }

    /// Only the two feed layouts are accepted: 6 (compact) or 12 (standard).
    fn parse_page_size(raw: &str) -> PageSize {
        match raw.trim().parse().ok().and_then(PageSize::from_layout) {
            Some(size) => size,
            None => {
                tracing::warn!(value = %raw, "FEED_PAGE_SIZE must be 6 or 12, using 12");
                PageSize::STANDARD
            }
        }
    }
}
