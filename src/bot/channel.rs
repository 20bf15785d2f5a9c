//! Outbound chat transport

use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{CallbackQueryId, ChatAction, InlineKeyboardMarkup, ParseMode};

/// Per-message delivery options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendOptions {
    /// Send with `parse_mode=HTML`
    pub html: bool,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl SendOptions {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn html() -> Self {
        Self {
            html: true,
            keyboard: None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: InlineKeyboardMarkup) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}

/// Operations the bot performs against the chat platform
#[async_trait]
pub trait ChatChannel: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: String, options: SendOptions) -> Result<()>;

    async fn send_typing(&self, chat_id: ChatId) -> Result<()>;

    async fn answer_callback(&self, callback_id: &str, text: Option<String>) -> Result<()>;
}

#[async_trait]
impl ChatChannel for Bot {
    async fn send_text(&self, chat_id: ChatId, text: String, options: SendOptions) -> Result<()> {
        let mut request = self.send_message(chat_id, text);
        if options.html {
            request = request.parse_mode(ParseMode::Html);
        }
        if let Some(keyboard) = options.keyboard {
            request = request.reply_markup(keyboard);
        }
        request.await?;
        Ok(())
    }

    async fn send_typing(&self, chat_id: ChatId) -> Result<()> {
        self.send_chat_action(chat_id, ChatAction::Typing).await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<String>) -> Result<()> {
        let mut request = self.answer_callback_query(CallbackQueryId(callback_id.to_string()));
        if let Some(text) = text {
            request = request.text(text);
        }
        request.await?;
        Ok(())
    }
}
