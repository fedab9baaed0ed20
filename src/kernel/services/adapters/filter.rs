use crate::kernel::services::ports::{SuggestFilter, SuggestItem};

/// Case-insensitive prefix match on `filter_text`, falling back to the label.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixFilter;

impl SuggestFilter for PrefixFilter {
    fn filter(&self, items: &[SuggestItem], prefix: &str) -> Vec<SuggestItem> {
        if prefix.is_empty() {
            return items.to_vec();
        }
        items
            .iter()
            .filter(|item| starts_with_ignore_case(item.filter_key(), prefix))
            .cloned()
            .collect()
    }
}

fn starts_with_ignore_case(haystack: &str, needle: &str) -> bool {
    let mut hay = haystack.chars().flat_map(char::to_lowercase);
    needle
        .chars()
        .flat_map(char::to_lowercase)
        .all(|n| hay.next() == Some(n))
}
