use std::borrow::Cow;

use compact_str::CompactString;
use ropey::{Rope, RopeSlice};

use super::Position;

pub fn slice_to_cow(slice: RopeSlice<'_>) -> Cow<'_, str> {
    match slice.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(slice.to_string()),
    }
}

/// Immutable view of a document at one edit version.
///
/// Cloning shares the underlying rope, so snapshots can be handed to
/// providers running on the async executor.
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    rope: Rope,
    language_id: CompactString,
    version: u64,
}

impl DocumentSnapshot {
    pub fn new(text: &str, language_id: impl Into<CompactString>) -> Self {
        Self::from_rope(Rope::from_str(text), language_id)
    }

    pub fn from_rope(rope: Rope, language_id: impl Into<CompactString>) -> Self {
        Self {
            rope,
            language_id: language_id.into(),
            version: 0,
        }
    }

    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line text without its trailing line break.
    pub fn line_text(&self, line: usize) -> Option<Cow<'_, str>> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let slice = self.rope.line(line);
        let len = line_len_without_break(slice);
        Some(slice_to_cow(slice.slice(..len)))
    }

    pub fn line_len(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        line_len_without_break(self.rope.line(line))
    }

    pub fn clamp(&self, position: Position) -> Position {
        let last_line = self.rope.len_lines().saturating_sub(1);
        let line = position.line.min(last_line);
        Position {
            line,
            column: position.column.min(self.line_len(line)),
        }
    }
}

fn line_len_without_break(slice: RopeSlice<'_>) -> usize {
    let mut len = slice.len_chars();
    if len > 0 && slice.char(len - 1) == '\n' {
        len -= 1;
    }
    if len > 0 && slice.char(len - 1) == '\r' {
        len -= 1;
    }
    len
}

#[cfg(test)]
#[path = "../../tests/unit/models/document.rs"]
mod tests;
