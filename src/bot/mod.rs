//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules for better organization:
//! - `channel`: Outbound transport trait and its `teloxide::Bot` implementation
//! - `controller`: Inbound events and the session controller
//! - `message_handler`: Handles incoming text messages (greeting and search)
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `ui_builder`: Creates keyboards and formats messages

pub mod callback_handler;
pub mod channel;
pub mod controller;
pub mod message_handler;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::message_handler;

pub use channel::{ChatChannel, SendOptions};
pub use controller::{CallbackAction, CallbackEvent, SessionController, SessionSettings, TextEvent};
pub use ui_builder::{with_watermark, WATERMARK};
