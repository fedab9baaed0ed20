//! Data models

pub mod document;
pub mod position;
pub mod word;

pub use document::{slice_to_cow, DocumentSnapshot};
pub use position::Position;
pub use word::{is_continuation, is_word_char, Word};
