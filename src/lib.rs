//! # LeakOSINT Telegram Bot
//!
//! A Telegram bot that relays free-text queries to the LeakOSINT search API
//! and renders the results as size-limited, HTML-escaped chat messages.

pub mod bot;
pub mod config;
pub mod dialogue;
pub mod errors;
pub mod localization;
pub mod result_formatter;
pub mod search_client;
pub mod search_types;
pub mod text_processing;
pub mod token;
