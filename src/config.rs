use anyhow::{bail, Context, Result};
use std::time::Duration;

use crate::i18n::Language;

#[derive(Debug, Clone)]
pub struct Config {
    // CMS backend
    pub api_url: String,
    pub request_timeout: Duration,

    // Server
    pub port: u16,

    // Localization
    pub default_language: Language,

    // Admin
    pub api_key: Option<String>,

    // Layout cache refresh times (HH:MM, UTC)
    pub refresh_times: Vec<String>,

    // Listing
    pub news_page_size: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var("API_URL").context("API_URL not set")?;
        let api_url = api_url.trim().trim_end_matches('/').to_string();
        if api_url.is_empty() {
            bail!("API_URL is empty");
        }

        let default_language = match std::env::var("DEFAULT_LANGUAGE") {
            Ok(code) => Language::from_code(code.trim())
                .with_context(|| format!("Invalid DEFAULT_LANGUAGE '{}'", code))?,
            Err(_) => Language::canonical(),
        };

        let refresh_times = std::env::var("REFRESH_TIMES")
            .unwrap_or_else(|_| "03:00".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            api_url,
            request_timeout: Duration::from_secs(
                std::env::var("REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(15),
            ),

            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            default_language,

            api_key: std::env::var("API_KEY")
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),

            refresh_times,

            news_page_size: std::env::var("NEWS_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n: &u32| *n > 0)
                .unwrap_or(9),
        })
    }

    /// Config pointing at the given CMS base URL with every other field defaulted.
    pub fn for_api(api_url: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(15),
            port: 8080,
            default_language: Language::canonical(),
            api_key: None,
            refresh_times: vec!["03:00".to_string()],
            news_page_size: 9,
        }
    }
}
