//! Host editor notifications consumed by the [`Controller`](crate::Controller).
//!
//! Events are pure data. How the host delivers them (callbacks, polling, a
//! channel) does not matter as long as they arrive one at a time in the order
//! the editor produced them.

use crate::position::{Position, Selection, TextChange};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// The content of a document changed. A batch always carries at least
    /// one change.
    TextChanged {
        path: PathBuf,
        changes: Vec<TextChange>,
    },

    /// The selections of a document changed. The first selection is the
    /// primary one.
    SelectionChanged {
        path: PathBuf,
        selections: Vec<Selection>,
    },
}

impl EditorEvent {
    /// Single-change edit starting at `at`.
    pub fn edit(path: impl Into<PathBuf>, at: Position, text: impl Into<String>) -> Self {
        Self::TextChanged {
            path: path.into(),
            changes: vec![TextChange::insert(at, text)],
        }
    }

    /// Cursor moved to `position` with no selection.
    pub fn caret(path: impl Into<PathBuf>, position: Position) -> Self {
        Self::SelectionChanged {
            path: path.into(),
            selections: vec![Selection::caret(position)],
        }
    }
}
