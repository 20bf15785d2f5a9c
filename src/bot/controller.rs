//! Session controller: inbound events, shared dependencies and delivery helpers

use anyhow::Result;
use std::sync::Arc;
use teloxide::types::{CallbackQuery, ChatId, Message};
use tracing::warn;

use crate::config::BotConfig;
use crate::dialogue::ConversationState;
use crate::search_client::SearchService;

use super::channel::{ChatChannel, SendOptions};
use super::ui_builder::with_watermark;

/// Command that shows the greeting instead of searching
pub const START_COMMAND: &str = "/start";

/// Inbound text message
#[derive(Debug, Clone, PartialEq)]
pub struct TextEvent {
    pub chat_id: ChatId,
    pub sender_id: Option<u64>,
    pub username: Option<String>,
    pub text: Option<String>,
}

impl TextEvent {
    pub fn from_message(msg: &Message) -> Self {
        Self {
            chat_id: msg.chat.id,
            sender_id: msg.from.as_ref().map(|user| user.id.0),
            username: msg.from.as_ref().and_then(|user| user.username.clone()),
            text: msg.text().map(str::to_string),
        }
    }
}

/// Inbound inline keyboard callback
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackEvent {
    pub callback_id: String,
    /// Missing when the originating message is no longer available
    pub chat_id: Option<ChatId>,
    pub sender_id: u64,
    pub username: Option<String>,
    pub data: Option<String>,
}

impl CallbackEvent {
    pub fn from_query(q: &CallbackQuery) -> Self {
        Self {
            callback_id: q.id.to_string(),
            chat_id: q.message.as_ref().map(|msg| msg.chat().id),
            sender_id: q.from.id.0,
            username: q.from.username.clone(),
            data: q.data.clone(),
        }
    }
}

/// Actions carried in inline keyboard callback data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    GenerateToken,
    ChangeLanguage,
    Unknown(String),
}

impl CallbackAction {
    pub fn parse(data: &str) -> Self {
        match data {
            "generate_token" => CallbackAction::GenerateToken,
            "change_language" => CallbackAction::ChangeLanguage,
            other => CallbackAction::Unknown(other.to_string()),
        }
    }

    pub fn data(&self) -> &str {
        match self {
            CallbackAction::GenerateToken => "generate_token",
            CallbackAction::ChangeLanguage => "change_language",
            CallbackAction::Unknown(data) => data,
        }
    }
}

/// Per-search settings taken from the configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub result_limit: u32,
    pub chunk_limit: usize,
}

impl From<&BotConfig> for SessionSettings {
    fn from(config: &BotConfig) -> Self {
        Self {
            result_limit: config.search.result_limit,
            chunk_limit: config.chunk_limit,
        }
    }
}

/// Dispatches inbound events to greeting, search, token and language handling
///
/// The handlers live in `message_handler` and `callback_handler`.
pub struct SessionController {
    pub(crate) channel: Arc<dyn ChatChannel>,
    pub(crate) search: Arc<dyn SearchService>,
    pub(crate) state: ConversationState,
    pub(crate) settings: SessionSettings,
}

impl SessionController {
    pub fn new(
        channel: Arc<dyn ChatChannel>,
        search: Arc<dyn SearchService>,
        state: ConversationState,
        settings: SessionSettings,
    ) -> Self {
        Self {
            channel,
            search,
            state,
            settings,
        }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Send `text` with the attribution watermark appended
    pub(crate) async fn deliver(
        &self,
        chat_id: ChatId,
        text: &str,
        options: SendOptions,
    ) -> Result<()> {
        self.channel
            .send_text(chat_id, with_watermark(text), options)
            .await
    }

    /// Answer a callback query; failures are logged and otherwise ignored
    pub(crate) async fn acknowledge(&self, callback_id: &str, text: Option<String>) {
        if let Err(e) = self.channel.answer_callback(callback_id, text).await {
            warn!(callback_id, error = %e, "Failed to answer callback query");
        }
    }
}
