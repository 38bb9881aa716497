use serde::{Deserialize, Serialize};
use std::{fmt, ops::Range};

/// A zero-based line and column in a text document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Shift the position by `delta` lines, keeping the column.
    ///
    /// Saturates at line 0 so a removal larger than the position's line
    /// clamps to the top of the file.
    #[must_use]
    pub fn translate(self, delta: i32) -> Self {
        Self {
            line: self.line.saturating_add_signed(delta),
            column: self.column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A single content change reported by the host editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    /// Replaced range, in pre-edit coordinates.
    pub range: Range<Position>,
    pub text: String,
}

impl TextChange {
    pub fn new(range: Range<Position>, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    /// Pure insertion at `at`.
    pub fn insert(at: Position, text: impl Into<String>) -> Self {
        Self::new(at..at, text)
    }
}

/// A selection with a fixed anchor and a moving active end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

impl Selection {
    /// Zero-width selection, i.e. a plain cursor.
    pub fn caret(position: Position) -> Self {
        Self {
            anchor: position,
            active: position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_moves_line_only() {
        let pos = Position::new(5, 7);
        assert_eq!(pos.translate(3), Position::new(8, 7));
        assert_eq!(pos.translate(-2), Position::new(3, 7));
        assert_eq!(pos.translate(0), pos);
    }

    #[test]
    fn translate_saturates_at_top() {
        assert_eq!(Position::new(1, 4).translate(-5), Position::new(0, 4));
    }

    #[test]
    fn caret_is_zero_width() {
        let sel = Selection::caret(Position::new(2, 3));
        assert_eq!(sel.anchor, sel.active);
    }
}
