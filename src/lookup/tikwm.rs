use super::{LookupError, ResolvedMedia, VideoResolver};
use crate::config::{lookup_timeout, DEFAULT_TITLE, TIKWM_API_URL};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct TikwmResponse {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<TikwmData>,
}

#[derive(Debug, Deserialize)]
struct TikwmData {
    #[serde(default)]
    play: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

/// Lookup backed by the tikwm HTTP API.
pub struct TikwmResolver {
    http: HttpClient,
    endpoint: String,
}

impl TikwmResolver {
    /// Create a resolver for `endpoint` whose requests are bounded by `timeout`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| HttpClient::new());
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint this resolver queries.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn into_media(response: TikwmResponse) -> Result<ResolvedMedia, LookupError> {
        let data = response.data.ok_or_else(|| {
            LookupError::MissingData(response.msg.unwrap_or_else(|| "no message".to_string()))
        })?;

        let title = data
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        Ok(ResolvedMedia {
            video_url: data.play,
            title,
        })
    }
}

impl Default for TikwmResolver {
    fn default() -> Self {
        Self::new(TIKWM_API_URL, lookup_timeout())
    }
}

#[async_trait]
impl VideoResolver for TikwmResolver {
    async fn resolve(&self, link: &str) -> Result<ResolvedMedia, LookupError> {
        debug!(link = %link, "Looking up video");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("url", link)])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let parsed: TikwmResponse = serde_json::from_str(&body)?;
        Self::into_media(parsed)
    }
}
