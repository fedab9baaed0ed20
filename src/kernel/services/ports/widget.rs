use crate::kernel::events::{CancelledEvent, SuggestionsEvent, TriggeredEvent};

use super::SuggestItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusedItem {
    pub index: usize,
    pub item: SuggestItem,
}

/// Presentation capability: the suggestion list UI.
pub trait SuggestWidget {
    fn show_triggered(&mut self, event: &TriggeredEvent);

    fn show_suggestions(&mut self, event: &SuggestionsEvent);

    fn show_did_cancel(&mut self, event: &CancelledEvent);

    fn hide(&mut self);

    fn is_visible(&self) -> bool;

    fn focused_item(&self) -> Option<FocusedItem>;

    fn select_next(&mut self);

    fn select_previous(&mut self);

    fn select_next_page(&mut self);

    fn select_previous_page(&mut self);

    fn toggle_details(&mut self);

    fn dispose(&mut self) {}
}

/// Applies an accepted suggestion to the document.
pub trait SuggestInsertion {
    fn insert(&mut self, item: &SuggestItem, overwrite_before: usize, overwrite_after: usize);
}

/// Narrows a fetched list to what matches the typed prefix. Ranking lives
/// behind this seam.
pub trait SuggestFilter {
    fn filter(&self, items: &[SuggestItem], prefix: &str) -> Vec<SuggestItem>;
}
