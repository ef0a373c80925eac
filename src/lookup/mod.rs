//! Video metadata lookup.
//!
//! A [`VideoResolver`] turns a TikTok link into a direct, watermark-free video URL and a
//! title. [`TikwmResolver`] is the production implementation backed by the tikwm API.

mod tikwm;

pub use tikwm::TikwmResolver;

use thiserror::Error;

/// Result of resolving one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMedia {
    /// Direct no-watermark video URL, absent when the API did not return one
    pub video_url: Option<String>,
    /// Video title, already defaulted when the API returned none
    pub title: String,
}

/// Errors raised while looking up a link.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The request exceeded the lookup timeout
    #[error("lookup timed out: {0}")]
    Timeout(String),
    /// Connection or transport failure
    #[error("network error: {0}")]
    Network(String),
    /// The API answered with a non-success status
    #[error("lookup API returned status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },
    /// The body was not the expected JSON document
    #[error("malformed lookup response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The response carried no `data` object
    #[error("lookup response has no data: {0}")]
    MissingData(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else if let Some(status) = e.status() {
            Self::Status {
                status: status.as_u16(),
            }
        } else {
            Self::Network(e.to_string())
        }
    }
}

/// Resolves TikTok links to downloadable media.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait VideoResolver: Send + Sync {
    /// Look up one link.
    ///
    /// An absent video URL is not an error here; delivery fails later instead.
    async fn resolve(&self, link: &str) -> Result<ResolvedMedia, LookupError>;
}
