//! Configuration and settings management
//!
//! Loads the bot token from config files and environment variables and defines the
//! compiled-in limits of the download pipeline.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Maximum number of links processed from a single message.
pub const MAX_LINKS: usize = 5;

/// tikwm lookup endpoint that resolves a TikTok link to a no-watermark video.
pub const TIKWM_API_URL: &str = "https://www.tikwm.com/api/";

/// Per-request timeout for the lookup API (seconds).
pub const LOOKUP_TIMEOUT_SECS: u64 = 15;

/// Maximum caption title length (characters).
pub const TITLE_MAX_CHARS: usize = 50;

/// Title used when the video has none.
pub const DEFAULT_TITLE: &str = "Video TikTok";

/// Timeout applied to every lookup API call.
#[must_use]
pub const fn lookup_timeout() -> Duration {
    Duration::from_secs(LOOKUP_TIMEOUT_SECS)
}

/// Errors raised while loading settings at startup.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Config sources could not be read or deserialized
    #[error("failed to load configuration: {0}")]
    Load(#[from] ConfigError),
    /// `TELEGRAM_BOT_TOKEN` is unset or empty
    #[error("TELEGRAM_BOT_TOKEN is not set in the environment")]
    MissingToken,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    telegram_bot_token: Option<String>,
}

/// Application settings loaded once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Telegram Bot API token
    pub telegram_bot_token: String,
}

/// Build the layered config: optional files, then `APP__*` vars, then plain env vars.
///
/// # Errors
///
/// Returns a `ConfigError` if a present config file is malformed.
pub fn build_config() -> Result<Config, ConfigError> {
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
        // Not checked into git
        .add_source(File::with_name("config/local").required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        // UPPER_SNAKE_CASE env vars map onto snake_case keys; empty values count as unset
        .add_source(Environment::default().ignore_empty(true))
        .build()
}

impl Settings {
    /// Load settings from the environment and optional config files.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tiktok_batch_bot::config::Settings;
    ///
    /// let settings = Settings::new().expect("TELEGRAM_BOT_TOKEN must be set");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingToken` when no token is configured.
    pub fn new() -> Result<Self, ConfigurationError> {
        Self::from_config(build_config()?)
    }

    /// Deserialize and validate settings from an already built `Config`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingToken` when the token key is absent or blank.
    pub fn from_config(config: Config) -> Result<Self, ConfigurationError> {
        let raw: RawSettings = config.try_deserialize()?;

        match raw.telegram_bot_token {
            Some(token) if !token.trim().is_empty() => Ok(Self {
                telegram_bot_token: token.trim().to_string(),
            }),
            _ => Err(ConfigurationError::MissingToken),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(token: Option<&str>) -> Result<Config, ConfigError> {
        let mut builder = Config::builder();
        if let Some(token) = token {
            builder = builder.set_override("telegram_bot_token", token)?;
        }
        builder.build()
    }

    #[test]
    fn test_token_loaded() -> Result<(), Box<dyn std::error::Error>> {
        let settings = Settings::from_config(config_with(Some("123:abc"))?)?;
        assert_eq!(settings.telegram_bot_token, "123:abc");
        Ok(())
    }

    #[test]
    fn test_missing_token_is_configuration_error() -> Result<(), ConfigError> {
        let result = Settings::from_config(config_with(None)?);
        assert!(matches!(result, Err(ConfigurationError::MissingToken)));
        Ok(())
    }

    #[test]
    fn test_blank_token_is_configuration_error() -> Result<(), ConfigError> {
        let result = Settings::from_config(config_with(Some("   "))?);
        assert!(matches!(result, Err(ConfigurationError::MissingToken)));
        Ok(())
    }

    #[test]
    fn test_compiled_limits() {
        assert_eq!(MAX_LINKS, 5);
        assert_eq!(lookup_timeout(), Duration::from_secs(15));
    }
}
