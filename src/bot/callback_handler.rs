//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::{debug, error, info};

use crate::localization::t;
use crate::token::generate_ephemeral_token;

use super::channel::SendOptions;
use super::controller::{CallbackAction, CallbackEvent, SessionController};
use super::ui_builder::{
    format_language_ack, format_language_changed, format_token_message, token_owner_label,
};

impl SessionController {
    /// Handle one inline keyboard callback
    pub async fn handle_callback(&self, event: CallbackEvent) -> Result<()> {
        debug!(user_id = event.sender_id, data = ?event.data, "Received callback query");

        let Some(chat_id) = event.chat_id else {
            debug!(user_id = event.sender_id, "Dropping callback without chat context");
            return Ok(());
        };

        match CallbackAction::parse(event.data.as_deref().unwrap_or("")) {
            CallbackAction::GenerateToken => self.issue_token(chat_id, &event).await,
            CallbackAction::ChangeLanguage => self.toggle_language(chat_id, &event).await,
            CallbackAction::Unknown(data) => {
                debug!(user_id = event.sender_id, data = %data, "Ignoring unknown callback action");
                self.acknowledge(&event.callback_id, None).await;
                Ok(())
            }
        }
    }

    async fn issue_token(&self, chat_id: ChatId, event: &CallbackEvent) -> Result<()> {
        let token = generate_ephemeral_token();
        let owner = token_owner_label(event.username.as_deref(), event.sender_id);
        info!(chat_id = %chat_id, user_id = event.sender_id, "Issuing ephemeral token");

        self.acknowledge(&event.callback_id, Some(t("token-callback-ack")))
            .await;

        self.deliver(chat_id, &format_token_message(&owner, &token), SendOptions::html())
            .await
    }

    async fn toggle_language(&self, chat_id: ChatId, event: &CallbackEvent) -> Result<()> {
        let language = self.state.toggle_language();
        info!(chat_id = %chat_id, user_id = event.sender_id, lang = %language, "Language changed");

        self.acknowledge(&event.callback_id, Some(format_language_ack(language)))
            .await;

        self.deliver(chat_id, &format_language_changed(language), SendOptions::plain())
            .await
    }
}

/// Teloxide endpoint for callback query updates
pub async fn callback_handler(q: CallbackQuery, controller: Arc<SessionController>) -> Result<()> {
    let event = CallbackEvent::from_query(&q);
    if let Err(e) = controller.handle_callback(event).await {
        error!(user_id = %q.from.id, error = %e, "Failed to handle callback query");
    }
    Ok(())
}
