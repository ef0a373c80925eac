use crate::config::MAX_LINKS;
use anyhow::Result;
use teloxide::{prelude::*, utils::command::BotCommands};
use tracing::info;

/// Supported commands for the bot
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    /// Show the welcome and usage message
    #[command(description = "Start the bot.")]
    Start,
    /// Show the usage message
    #[command(description = "How to use the bot.")]
    Help,
}

// Helper function to get user name from Message
fn get_user_name(msg: &Message) -> String {
    if let Some(ref user) = msg.from {
        if let Some(ref username) = user.username {
            return username.clone();
        }
        if !user.first_name.is_empty() {
            return user.first_name.clone();
        }
    }
    "Unknown".to_string()
}

/// Static usage text sent for `/start` and `/help`.
#[must_use]
pub fn usage_text() -> String {
    format!(
        "👋 Selamat datang di TikTok Batch Downloader\n\n\
         📥 Cara menggunakan:\n\
         Kirim beberapa link TikTok dalam 1 pesan\n\
         (Maksimal {MAX_LINKS} link)\n\n\
         🧾 Contoh format:\n\
         https://vt.tiktok.com/xxxxxx\n\
         https://www.tiktok.com/@user/video/yyyyy\n\
         https://vt.tiktok.com/zzzzzz\n\n\
         ⚙️ Sistem otomatis:\n\
         • Link ke-1 → Part 1\n\
         • Link ke-2 → Part 2\n\
         • Judul dari caption video\n\
         • Tanpa watermark\n\
         • Dikirim sebagai video\n\n\
         🚀 Silakan kirim link TikTok sekarang"
    )
}

/// Start/help handler
///
/// # Errors
///
/// Returns an error if the usage message cannot be sent.
pub async fn start(bot: Bot, msg: Message) -> Result<()> {
    let user_name = get_user_name(&msg);
    info!("User {user_name} in chat {} requested usage.", msg.chat.id.0);

    bot.send_message(msg.chat.id, usage_text()).await?;
    Ok(())
}
