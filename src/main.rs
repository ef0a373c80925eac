use dotenvy::dotenv;
use std::sync::Arc;
use tiktok_batch_bot::bot::runner::run_bot;
use tiktok_batch_bot::config::Settings;
use tiktok_batch_bot::logging::init_logging;
use tiktok_batch_bot::lookup::{TikwmResolver, VideoResolver};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load .env file
    dotenv().ok();

    init_logging();

    info!("Starting TikTok Batch Downloader bot...");

    let settings = init_settings();
    let resolver: Arc<dyn VideoResolver> = Arc::new(TikwmResolver::default());

    run_bot(settings, resolver).await;
}

fn init_settings() -> Arc<Settings> {
    match Settings::new() {
        Ok(s) => {
            info!("Configuration loaded successfully.");
            Arc::new(s)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    }
}
