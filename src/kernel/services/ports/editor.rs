use crate::models::{DocumentSnapshot, Position};

use super::SuggestConfig;

/// Query surface of the editor hosting the suggest controller.
pub trait EditorHost {
    /// Current document, `None` when the editor has no model attached.
    fn document(&self) -> Option<DocumentSnapshot>;

    fn cursor(&self) -> Position;

    fn is_read_only(&self) -> bool;

    fn config(&self) -> SuggestConfig;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorChangeSource {
    Keyboard,
    Mouse,
    /// Programmatic moves, including text inserted by an accepted suggestion.
    Api,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorChangeReason {
    NotSet,
    Explicit,
    Paste,
    Undo,
    Redo,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorChange {
    pub position: Position,
    pub selection_empty: bool,
    pub source: CursorChangeSource,
    pub reason: CursorChangeReason,
}

impl CursorChange {
    /// Cursor moved by typing with an empty selection.
    pub fn typed(position: Position) -> Self {
        Self {
            position,
            selection_empty: true,
            source: CursorChangeSource::Keyboard,
            reason: CursorChangeReason::Edit,
        }
    }

    pub fn is_plain_keyboard_edit(&self) -> bool {
        self.selection_empty
            && self.source == CursorChangeSource::Keyboard
            && self.reason == CursorChangeReason::Edit
    }
}

/// Notifications delivered by the host. For one keystroke the host sends
/// `CursorChanged` before `Typed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    ConfigurationChanged,
    ModelChanged,
    LanguageChanged,
    CursorChanged(CursorChange),
    Typed(char),
}
