//! Quick suggest: decides on every cursor change whether typing continues the
//! tracked word or starts a new one, and owns the debounce deadline.

use std::time::Instant;

use crate::kernel::services::ports::{CursorChange, SuggestConfig};
use crate::models::{DocumentSnapshot, Word};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickSuggestDecision {
    /// Non-keyboard move, non-empty selection, or the word went away.
    Cancel,
    /// Quick suggestions are off; visible suggestions should close.
    Disabled,
    /// Still typing the tracked word.
    Continued(Word),
    /// A new word started; a fetch is due at `deadline`.
    Scheduled { word: Word, deadline: Instant },
}

#[derive(Debug, Default)]
pub struct QuickSuggest {
    tracked: Option<Word>,
    deadline: Option<Instant>,
}

impl QuickSuggest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_cursor_change(
        &mut self,
        change: &CursorChange,
        document: Option<&DocumentSnapshot>,
        config: &SuggestConfig,
        now: Instant,
    ) -> QuickSuggestDecision {
        if !change.is_plain_keyboard_edit() {
            self.clear();
            return QuickSuggestDecision::Cancel;
        }

        let Some(delay) = config.quick_suggestions_delay() else {
            self.clear();
            return QuickSuggestDecision::Disabled;
        };

        let Some(word) = document.and_then(|doc| Word::at(doc, change.position)) else {
            self.clear();
            return QuickSuggestDecision::Cancel;
        };

        if self
            .tracked
            .as_ref()
            .is_some_and(|tracked| word.continues(tracked))
        {
            self.tracked = Some(word.clone());
            return QuickSuggestDecision::Continued(word);
        }

        let deadline = now + delay;
        tracing::trace!(
            target: "suggest.quick",
            word = %word.text,
            delay_ms = delay.as_millis() as u64,
            "quick suggest scheduled"
        );
        self.tracked = Some(word.clone());
        self.deadline = Some(deadline);
        QuickSuggestDecision::Scheduled { word, deadline }
    }

    /// Takes the deadline once it has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                let overshoot = now.duration_since(deadline);
                if overshoot.as_millis() > 5 {
                    tracing::debug!(
                        target: "suggest.quick",
                        overshoot_ms = overshoot.as_millis() as u64,
                        "quick suggest debounce overshoot"
                    );
                }
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn tracked(&self) -> Option<&Word> {
        self.tracked.as_ref()
    }

    /// Tracks `word` without scheduling, e.g. the anchor after a trigger character.
    pub fn track(&mut self, word: Word) {
        self.tracked = Some(word);
    }

    pub fn cancel_pending(&mut self) {
        self.deadline = None;
    }

    pub fn clear(&mut self) {
        self.tracked = None;
        self.deadline = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/quick_suggest.rs"]
mod tests;
