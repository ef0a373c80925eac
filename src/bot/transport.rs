//! Outbound chat transport.
//!
//! The dispatch loop talks to a [`ChatSink`] bound to one chat, so it can be driven by
//! Telegram in production and by a recording sink in tests.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile, ParseMode};
use thiserror::Error;
use tracing::debug;

/// Errors raised while delivering a message or video to the chat.
#[derive(Debug, Error)]
pub enum SendError {
    /// The lookup did not return a video URL
    #[error("no video URL to send")]
    MissingVideoUrl,
    /// The video URL could not be parsed
    #[error("invalid video URL {url}: {reason}")]
    InvalidVideoUrl {
        /// URL as returned by the lookup
        url: String,
        /// Parser error
        reason: String,
    },
    /// Telegram rejected the request or could not be reached
    #[error("Telegram send error: {0}")]
    Telegram(String),
}

impl From<teloxide::RequestError> for SendError {
    fn from(e: teloxide::RequestError) -> Self {
        Self::Telegram(e.to_string())
    }
}

/// Delivery primitives for a single chat.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatSink: Send + Sync {
    /// Send a plain text message.
    async fn send_text(&self, text: &str) -> Result<(), SendError>;

    /// Send a video by URL with a plain-text caption; markup is up to the sink.
    async fn send_video(&self, video_url: &str, caption: &str) -> Result<(), SendError>;
}

/// Wraps a caption in bold HTML, escaping user-provided text.
#[must_use]
pub fn render_caption_html(caption: &str) -> String {
    format!("<b>{}</b>", html_escape::encode_text(caption))
}

/// Telegram-backed sink bound to the chat a message came from.
pub struct TelegramChatSink {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramChatSink {
    /// Create a sink that sends into `chat_id`.
    pub const fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl ChatSink for TelegramChatSink {
    async fn send_text(&self, text: &str) -> Result<(), SendError> {
        self.bot.send_message(self.chat_id, text).await?;
        Ok(())
    }

    async fn send_video(&self, video_url: &str, caption: &str) -> Result<(), SendError> {
        let url = reqwest::Url::parse(video_url).map_err(|e| SendError::InvalidVideoUrl {
            url: video_url.to_string(),
            reason: e.to_string(),
        })?;

        debug!(chat_id = self.chat_id.0, "Sending video");
        self.bot
            .send_video(self.chat_id, InputFile::url(url))
            .caption(render_caption_html(caption))
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(())
    }
}
