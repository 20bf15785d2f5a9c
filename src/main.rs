use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use leakosint_bot::bot::{self, SessionController, SessionSettings};
use leakosint_bot::config::BotConfig;
use leakosint_bot::dialogue::ConversationState;
use leakosint_bot::search_client::LeakOsintClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Missing credentials are fatal
    let config = BotConfig::from_env()?;

    info!(token_prefix = %config.telegram_token_prefix(), "Starting LeakOSINT Telegram bot");
    info!(
        api_url = %config.search.api_url,
        lang = %config.default_language,
        limit = config.search.result_limit,
        "Search service configured"
    );

    let bot = Bot::new(&config.telegram_token);
    let search = LeakOsintClient::new(config.search.clone())?;

    let controller = Arc::new(SessionController::new(
        Arc::new(bot.clone()),
        Arc::new(search),
        ConversationState::new(config.default_language),
        SessionSettings::from(&config),
    ));

    info!("Bot initialized, starting dispatcher");

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint({
            let controller = Arc::clone(&controller);
            move |msg: Message| {
                let controller = Arc::clone(&controller);
                async move { bot::message_handler(msg, controller).await }
            }
        }))
        .branch(Update::filter_callback_query().endpoint({
            let controller = Arc::clone(&controller);
            move |q: CallbackQuery| {
                let controller = Arc::clone(&controller);
                async move { bot::callback_handler(q, controller).await }
            }
        }));

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
