/// Per-message download pipeline
pub mod dispatch;
/// Command handlers
pub mod handlers;
/// Telegram dispatcher setup and message routing
pub mod runner;
/// Outbound chat transport
pub mod transport;
