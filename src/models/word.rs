//! Word under the cursor and the continuation relation used to suppress
//! redundant fetches while an identifier is being typed.

use compact_str::CompactString;
use unicode_xid::UnicodeXID;

use super::{DocumentSnapshot, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub line: usize,
    pub start_column: usize,
    pub end_column: usize,
    pub text: CompactString,
}

impl Word {
    /// Word that ends exactly at `position`.
    ///
    /// Returns `None` when no word touches the cursor, when the cursor sits
    /// inside a word rather than at its end, or when the token is purely
    /// numeric.
    pub fn at(document: &DocumentSnapshot, position: Position) -> Option<Word> {
        let line = document.line_text(position.line)?;
        let chars: Vec<char> = line.chars().collect();
        if position.column > chars.len() {
            return None;
        }

        let mut start = position.column;
        while start > 0 && is_word_char(chars[start - 1]) {
            start -= 1;
        }
        let mut end = position.column;
        while end < chars.len() && is_word_char(chars[end]) {
            end += 1;
        }
        if start == end || end != position.column {
            return None;
        }

        let text: CompactString = chars[start..end].iter().collect();
        if is_numeric(&text) {
            return None;
        }

        Some(Word {
            line: position.line,
            start_column: start,
            end_column: end,
            text,
        })
    }

    /// Empty word anchored at `position`. Typing an identifier right after a
    /// trigger character continues it.
    pub fn anchor(position: Position) -> Word {
        Word {
            line: position.line,
            start_column: position.column,
            end_column: position.column,
            text: CompactString::default(),
        }
    }

    pub fn start(&self) -> Position {
        Position::new(self.line, self.start_column)
    }

    pub fn end(&self) -> Position {
        Position::new(self.line, self.end_column)
    }

    pub fn len(&self) -> usize {
        self.end_column - self.start_column
    }

    pub fn is_empty(&self) -> bool {
        self.start_column == self.end_column
    }

    pub fn continues(&self, previous: &Word) -> bool {
        is_continuation(previous, self)
    }
}

/// `next` continues `previous`: same anchor, grown end, and textual extension.
pub fn is_continuation(previous: &Word, next: &Word) -> bool {
    previous.line == next.line
        && previous.start_column == next.start_column
        && next.end_column > previous.end_column
        && next.text.starts_with(previous.text.as_str())
}

pub fn is_word_char(ch: char) -> bool {
    ch == '_' || UnicodeXID::is_xid_continue(ch)
}

fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_numeric)
}

#[cfg(test)]
#[path = "../../tests/unit/models/word.rs"]
mod tests;
