#![deny(missing_docs)]
//! TikTok batch downloader bot.
//!
//! A Telegram bot that picks TikTok links out of chat messages, resolves each one to a
//! watermark-free video through the tikwm API and sends the videos back to the chat.

/// Telegram bot implementation
pub mod bot;
/// Caption formatting for relayed videos
pub mod caption;
/// Configuration management
pub mod config;
/// TikTok link extraction
pub mod links;
/// Log output redaction
pub mod logging;
/// Video metadata lookup
pub mod lookup;
/// Text helpers
pub mod utils;
