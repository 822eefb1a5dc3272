use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::types::ContentItem;

pub const CONTENT_PATH: &str = "api/v1/content";

/// Opaque credential sent verbatim in the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self { Self(token.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("server responded with {status}{}", message_suffix(.message))]
    Status { status: u16, message: Option<String> },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Remote side of the content collection.
#[async_trait]
pub trait ContentApi: Send + Sync {
    async fn create_content(&self, item: &ContentItem, token: &AuthToken) -> Result<(), ApiError>;
}

#[async_trait]
impl<T: ContentApi + ?Sized> ContentApi for &T {
    async fn create_content(&self, item: &ContentItem, token: &AuthToken) -> Result<(), ApiError> {
        (**self).create_content(item, token).await
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

#[derive(Deserialize)]
struct ErrorBody { message: Option<String> }

/// `ContentApi` over HTTP with reqwest.
#[derive(Clone)]
pub struct HttpContentApi {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpContentApi {
    pub fn new(base_url: &Url, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(concat!("cloudbrain/", env!("CARGO_PKG_VERSION")));
        if let Some(t) = timeout { builder = builder.timeout(t); }
        let client = builder.build().context("building http client")?;
        let endpoint = base_url.join(CONTENT_PATH).with_context(|| format!("invalid api url: {base_url}"))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url { &self.endpoint }
}

#[async_trait]
impl ContentApi for HttpContentApi {
    async fn create_content(&self, item: &ContentItem, token: &AuthToken) -> Result<(), ApiError> {
        tracing::debug!(endpoint = %self.endpoint, title = %item.title, "posting content");
        let resp = self.client
            .post(self.endpoint.clone())
            .header(reqwest::header::AUTHORIZATION, token.as_str())
            .json(item)
            .send()
            .await?;
        let status = resp.status();
        if status.is_success() { return Ok(()); }
        // Body is best-effort; servers usually send {"message": "..."}.
        let message = resp.text().await.ok()
            .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
            .and_then(|b| b.message);
        Err(ApiError::Status { status: status.as_u16(), message })
    }
}
