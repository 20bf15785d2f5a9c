//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::dialogue::Language;
use crate::localization::{t, t_args};
use crate::text_processing::escape_html;

use super::controller::CallbackAction;

/// Attribution appended to every outgoing message
pub const WATERMARK: &str = "This tool is created by Arshdeep singh, for educational purposes only.";

/// Append the attribution watermark after a blank line
pub fn with_watermark(text: &str) -> String {
    format!("{text}\n\n— {WATERMARK}")
}

/// Create the inline keyboard shown with the greeting
pub fn create_start_keyboard(language: Language) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback(
            t("button-generate-token"),
            CallbackAction::GenerateToken.data(),
        ),
        InlineKeyboardButton::callback(
            t_args("button-change-language", &[("lang", language.label())]),
            CallbackAction::ChangeLanguage.data(),
        ),
    ]])
}

/// Label naming the user a token was issued for
pub fn token_owner_label(username: Option<&str>, user_id: u64) -> String {
    match username {
        Some(username) => format!("@{username}"),
        None => t_args("token-owner-anonymous", &[("id", &user_id.to_string())]),
    }
}

/// HTML notice carrying a freshly issued token
pub fn format_token_message(owner: &str, token: &str) -> String {
    format!(
        "{}\n<code>{}</code>\n{}",
        t_args("token-generated", &[("owner", &escape_html(owner))]),
        escape_html(token),
        t("token-save-warning")
    )
}

pub fn format_language_changed(language: Language) -> String {
    t_args("language-changed", &[("lang", language.label())])
}

pub fn format_language_ack(language: Language) -> String {
    t_args("language-callback-ack", &[("lang", language.label())])
}

/// Failure notice for a search that could not be fetched or delivered
pub fn format_search_error(reason: &dyn std::fmt::Display) -> String {
    t_args("search-failed", &[("reason", &reason.to_string())])
}
