//! Events published by the suggest controller.

use compact_str::CompactString;

use crate::kernel::services::ports::SuggestItem;
use crate::models::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggeredEvent {
    pub position: Position,
    pub is_automatic: bool,
    /// A list (or a pending fetch) was already showing and is being replaced.
    pub retrigger: bool,
    pub trigger_character: Option<char>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionsEvent {
    pub position: Position,
    pub prefix: CompactString,
    pub items: Vec<SuggestItem>,
    pub incomplete: bool,
    pub is_automatic: bool,
    /// Explicit list kept on screen although nothing matches the prefix anymore.
    pub frozen: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    Requested,
    WordEnded,
    Disabled,
    NoSuggestions,
    FetchFailed,
    ModelChanged,
    Accepted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelledEvent {
    pub reason: CancelReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedEvent {
    pub item: SuggestItem,
    pub overwrite_before: usize,
    pub overwrite_after: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChangedEvent {
    pub index: usize,
    pub item: Option<SuggestItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestEvent {
    Triggered(TriggeredEvent),
    SuggestionsAvailable(SuggestionsEvent),
    Cancelled(CancelledEvent),
    Accepted(AcceptedEvent),
    SelectionChanged(SelectionChangedEvent),
}
