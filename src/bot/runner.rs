use crate::bot::dispatch;
use crate::bot::handlers::{self, Command};
use crate::bot::transport::TelegramChatSink;
use crate::config::{Settings, MAX_LINKS};
use crate::lookup::VideoResolver;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use tracing::{error, info};

/// Run the Telegram long-polling loop until the process is stopped.
pub async fn run_bot(settings: Arc<Settings>, resolver: Arc<dyn VideoResolver>) {
    let bot = Bot::new(settings.telegram_bot_token.clone());
    let handler = setup_handler();

    info!("🤖 TikTok Batch Downloader bot is running...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![resolver])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

/// Returns `true` for text that Telegram treats as a bot command.
#[must_use]
pub fn is_command(text: &str) -> bool {
    text.starts_with('/')
}

fn setup_handler() -> UpdateHandler<teloxide::RequestError> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(
            dptree::filter(|msg: Message| msg.text().is_some_and(|t| !is_command(t)))
                .endpoint(handle_text),
        )
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
) -> Result<(), teloxide::RequestError> {
    let res = match cmd {
        Command::Start | Command::Help => handlers::start(bot, msg).await,
    };
    if let Err(e) = res {
        error!("Command error: {}", e);
    }
    respond(())
}

/// Hands the message to its own task so slow batches never hold up the dispatcher.
async fn handle_text(
    bot: Bot,
    msg: Message,
    resolver: Arc<dyn VideoResolver>,
) -> Result<(), teloxide::RequestError> {
    let Some(text) = msg.text().map(ToOwned::to_owned) else {
        return respond(());
    };
    let chat_id = msg.chat.id;

    tokio::spawn(async move {
        let sink = TelegramChatSink::new(bot, chat_id);
        match dispatch::process_message(&text, MAX_LINKS, resolver.as_ref(), &sink).await {
            Ok(report) if !report.links.is_empty() => info!(
                chat_id = chat_id.0,
                delivered = report.delivered(),
                failed = report.failed(),
                "Batch finished"
            ),
            Ok(_) => {}
            Err(e) => error!(chat_id = chat_id.0, "Batch aborted: {}", e),
        }
    });

    respond(())
}
