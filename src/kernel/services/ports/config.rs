use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const MIN_QUICK_SUGGESTIONS_DELAY_MS: u64 = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnippetMode {
    Top,
    Bottom,
    #[default]
    Inline,
    None,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    #[serde(alias = "quickSuggestions")]
    pub quick_suggestions: bool,
    /// Milliseconds; negative disables quick suggestions.
    #[serde(alias = "quickSuggestionsDelay")]
    pub quick_suggestions_delay: i64,
    #[serde(alias = "suggestOnTriggerCharacters")]
    pub suggest_on_trigger_characters: bool,
    #[serde(alias = "snippetSuggestions")]
    pub snippet_suggestions: SnippetMode,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            quick_suggestions: true,
            quick_suggestions_delay: 10,
            suggest_on_trigger_characters: true,
            snippet_suggestions: SnippetMode::Inline,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    editor: SuggestConfig,
}

impl SuggestConfig {
    /// Effective debounce delay, `None` when quick suggestions are off.
    pub fn quick_suggestions_delay(&self) -> Option<Duration> {
        if !self.quick_suggestions || self.quick_suggestions_delay < 0 {
            return None;
        }
        let ms = (self.quick_suggestions_delay as u64).max(MIN_QUICK_SUGGESTIONS_DELAY_MS);
        Some(Duration::from_millis(ms))
    }

    /// Reads the `editor` object of a settings document.
    pub fn from_settings_json(text: &str) -> Result<Self, serde_json::Error> {
        let settings: SettingsFile = serde_json::from_str(text)?;
        Ok(settings.editor)
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/config.rs"]
mod tests;
