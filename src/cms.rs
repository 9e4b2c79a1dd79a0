//! Client for the institute's CMS REST backend.
//!
//! Every read returns raw JSON (`serde_json::Value`); the records are
//! LocalizedRecords and are interpreted at render time through the resolver.

use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::retry::{with_retry_if, RetryConfig};

#[derive(Debug, Error)]
pub enum CmsError {
    #[error("invalid CMS URL '{0}'")]
    InvalidUrl(String),

    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path} not found")]
    NotFound { path: String },

    #[error("CMS error ({status}) on {path}: {body}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },

    #[error("failed to parse response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CmsError {
    /// Transport failures and 5xx responses are worth retrying; anything the
    /// backend rejected deliberately is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            CmsError::Transport { .. } => true,
            CmsError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CmsError::NotFound { .. })
    }
}

/// News list filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NewsKind {
    #[default]
    All,
    News,
    Announcement,
}

impl NewsKind {
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("news") => NewsKind::News,
            Some("announcement") => NewsKind::Announcement,
            _ => NewsKind::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NewsKind::All => "all",
            NewsKind::News => "news",
            NewsKind::Announcement => "announcement",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsQuery {
    pub page: u32,
    pub page_size: u32,
    pub kind: NewsKind,
}

impl NewsQuery {
    pub fn new(page: u32, page_size: u32, kind: NewsKind) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            kind,
        }
    }
}

/// One page of the paginated posts endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsPage {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<Value>,
}

impl NewsPage {
    pub fn total_pages(&self, page_size: u32) -> u64 {
        let page_size = u64::from(page_size.max(1));
        self.count.div_ceil(page_size)
    }
}

/// Application submitted through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Application {
    pub name: String,
    pub phone: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    base_url: Url,
    retry: RetryConfig,
}

impl CmsClient {
    pub fn new(config: &Config) -> Result<Self, CmsError> {
        let base_url = Url::parse(&config.api_url)
            .map_err(|_| CmsError::InvalidUrl(config.api_url.clone()))?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|source| CmsError::Transport {
                path: config.api_url.clone(),
                source,
            })?;

        Ok(Self {
            http,
            base_url,
            retry: RetryConfig::page_request(),
        })
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Base URL as configured, without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, CmsError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CmsError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Value, CmsError> {
        let url = self.endpoint(segments)?;
        let path = url.path().to_string();

        with_retry_if(
            &self.retry,
            &format!("GET {}", path),
            || self.get_once(url.clone(), &path, query),
            CmsError::is_retryable,
        )
        .await
    }

    async fn get_once(
        &self,
        url: Url,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, CmsError> {
        debug!("GET {}", path);

        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| CmsError::Transport {
                path: path.to_string(),
                source,
            })?;

        read_json(response, path).await
    }

    pub async fn company_info(&self) -> Result<Value, CmsError> {
        self.get_json(&["main", "company"], &[]).await
    }

    pub async fn menus(&self) -> Result<Value, CmsError> {
        self.get_json(&["menu", "menus"], &[]).await
    }

    pub async fn home(&self) -> Result<Value, CmsError> {
        self.get_json(&["main", "home"], &[]).await
    }

    pub async fn page(&self, slug: &str) -> Result<Value, CmsError> {
        self.get_json(&["menu", "pages-users", slug, ""], &[]).await
    }

    pub async fn news(&self, query: NewsQuery) -> Result<NewsPage, CmsError> {
        let mut params = vec![
            ("page", query.page.to_string()),
            ("page_size", query.page_size.to_string()),
        ];
        if query.kind != NewsKind::All {
            params.push(("type", query.kind.as_str().to_string()));
        }

        let value = self.get_json(&["api", "posts", ""], &params).await?;
        serde_json::from_value(value).map_err(|source| CmsError::Decode {
            path: "/api/posts/".to_string(),
            source,
        })
    }

    pub async fn news_item(&self, id: &str) -> Result<Value, CmsError> {
        self.get_json(&["api", "posts", id, ""], &[]).await
    }

    pub async fn employee(&self, id: &str) -> Result<Value, CmsError> {
        self.get_json(&["menu", "employees", id, ""], &[]).await
    }

    pub async fn laboratory(&self, id: &str) -> Result<Value, CmsError> {
        self.get_json(&["menu", "laboratories", id, ""], &[]).await
    }

    pub async fn department(&self, id: &str) -> Result<Value, CmsError> {
        self.get_json(&["menu", "departments", id, ""], &[]).await
    }

    pub async fn scientific_direction(&self, slug: &str) -> Result<Value, CmsError> {
        self.get_json(&["menu", "scientific-direction", slug, ""], &[]).await
    }

    pub async fn postgraduate_education(&self, slug: &str) -> Result<Value, CmsError> {
        self.get_json(&["menu", "postgraduate-education", slug, ""], &[]).await
    }

    pub async fn search(&self, query: &str) -> Result<Value, CmsError> {
        self.get_json(&["main", "search", ""], &[("q", query.to_string())])
            .await
    }

    /// Submit a contact-form application. Not retried: a timeout after the
    /// backend accepted it would otherwise create duplicates.
    pub async fn submit_application(&self, application: &Application) -> Result<(), CmsError> {
        let url = self.endpoint(&["parts", "applications", ""])?;
        let path = url.path().to_string();

        let response = self
            .http
            .post(url)
            .json(application)
            .send()
            .await
            .map_err(|source| CmsError::Transport {
                path: path.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CmsError::Status {
                path,
                status: status.as_u16(),
                body,
            });
        }

        info!("Application from {} submitted", application.name);
        Ok(())
    }
}

async fn read_json(response: reqwest::Response, path: &str) -> Result<Value, CmsError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(CmsError::NotFound {
            path: path.to_string(),
        });
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CmsError::Status {
            path: path.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    let body = response.text().await.map_err(|source| CmsError::Transport {
        path: path.to_string(),
        source,
    })?;

    serde_json::from_str(&body).map_err(|source| CmsError::Decode {
        path: path.to_string(),
        source,
    })
}
