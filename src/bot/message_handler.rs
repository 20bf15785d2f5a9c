//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, error, info, warn};

use crate::localization::t;
use crate::result_formatter::format_search_result;
use crate::search_types::{SearchRequest, SearchResult};

use super::channel::SendOptions;
use super::controller::{SessionController, TextEvent, START_COMMAND};
use super::ui_builder::{create_start_keyboard, format_search_error};

impl SessionController {
    /// Handle one inbound text message
    pub async fn handle_text(&self, event: TextEvent) -> Result<()> {
        let text = match event.text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text,
            _ => {
                debug!(chat_id = %event.chat_id, "Ignoring message without text");
                return Ok(());
            }
        };

        if text == START_COMMAND {
            debug!(chat_id = %event.chat_id, user_id = ?event.sender_id, "Sending greeting");
            return self.send_greeting(event.chat_id).await;
        }

        info!(
            chat_id = %event.chat_id,
            user_id = ?event.sender_id,
            username = ?event.username,
            query_length = text.len(),
            "Received search query"
        );
        self.run_search(event.chat_id, text).await
    }

    async fn send_greeting(&self, chat_id: ChatId) -> Result<()> {
        let keyboard = create_start_keyboard(self.state.language());
        self.deliver(chat_id, &t("welcome"), SendOptions::plain().with_keyboard(keyboard))
            .await
    }

    async fn run_search(&self, chat_id: ChatId, query: &str) -> Result<()> {
        if let Err(e) = self.channel.send_typing(chat_id).await {
            warn!(chat_id = %chat_id, error = %e, "Failed to send typing indicator");
        }

        let request = SearchRequest {
            query: query.to_string(),
            language: self.state.language(),
            limit: self.settings.result_limit,
        };

        let result = match self.search.search(&request).await {
            Ok(result) => result,
            Err(e) => {
                error!(chat_id = %chat_id, error = %e, "Search request failed");
                return self
                    .deliver(chat_id, &format_search_error(&e), SendOptions::plain())
                    .await;
            }
        };

        if let Err(e) = self.deliver_results(chat_id, &result).await {
            error!(chat_id = %chat_id, error = %e, "Failed to deliver search results");
            self.deliver(chat_id, &format_search_error(&e), SendOptions::plain())
                .await?;
        }

        Ok(())
    }

    /// Send each rendered block, stopping at the first rejected one
    async fn deliver_results(&self, chat_id: ChatId, result: &SearchResult) -> Result<()> {
        let blocks = format_search_result(result, self.settings.chunk_limit);
        info!(chat_id = %chat_id, blocks = blocks.len(), "Delivering search results");
        for block in &blocks {
            self.deliver(chat_id, block, SendOptions::html()).await?;
        }
        Ok(())
    }
}

/// Teloxide endpoint for message updates
pub async fn message_handler(msg: Message, controller: Arc<SessionController>) -> Result<()> {
    let event = TextEvent::from_message(&msg);
    if let Err(e) = controller.handle_text(event).await {
        error!(chat_id = %msg.chat.id, error = %e, "Failed to handle message");
    }
    Ok(())
}
