//! Conversation state shared by all chats: the language sent with every search.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Language requested from the search API
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    En,
}

impl Language {
    /// Code sent to the API (`"ru"` / `"en"`)
    pub fn code(self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
        }
    }

    /// Upper-case label shown to users
    pub fn label(self) -> &'static str {
        match self {
            Language::Ru => "RU",
            Language::En => "EN",
        }
    }

    /// The other language
    pub fn toggled(self) -> Self {
        match self {
            Language::Ru => Language::En,
            Language::En => Language::Ru,
        }
    }

    /// Parse a language code, ignoring case and surrounding whitespace
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ru" => Some(Language::Ru),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    fn to_bits(self) -> u8 {
        match self {
            Language::Ru => 0,
            Language::En => 1,
        }
    }

    fn from_bits(bits: u8) -> Self {
        if bits & 1 == 0 {
            Language::Ru
        } else {
            Language::En
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Process-wide language cell
///
/// Clones share the same cell. Last writer wins; a search already in flight
/// keeps the language it read.
#[derive(Clone, Debug)]
pub struct ConversationState {
    language: Arc<AtomicU8>,
}

impl ConversationState {
    pub fn new(language: Language) -> Self {
        Self {
            language: Arc::new(AtomicU8::new(language.to_bits())),
        }
    }

    pub fn language(&self) -> Language {
        Language::from_bits(self.language.load(Ordering::SeqCst))
    }

    pub fn set_language(&self, language: Language) {
        self.language.store(language.to_bits(), Ordering::SeqCst);
    }

    /// Flip the language and return the new value
    pub fn toggle_language(&self) -> Language {
        let previous = self.language.fetch_xor(1, Ordering::SeqCst);
        Language::from_bits(previous).toggled()
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new(Language::default())
    }
}
