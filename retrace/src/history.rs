//! Recorded edit positions and the cursors used to walk them backwards.
//!
//! [`History`] is the chronological list across every file. [`FilePositions`]
//! holds the same positions scoped to one file. Both are corrected in place by
//! [`shift_lines`](History::shift_lines) when an edit inserts or removes lines,
//! so a stored position always points at the line it was recorded on.

use crate::position::Position;
use std::path::{Path, PathBuf};

/// Where the next backward step will read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum ReplayCursor {
    /// Past the most recent entry; the next step reads the last entry.
    #[default]
    End,
    /// The next step reads this index.
    At(usize),
    /// Stepped below the oldest entry. Stays here until reset.
    Exhausted,
}

impl ReplayCursor {
    /// Return the index to read and move one step towards the start.
    fn step_back(&mut self, len: usize) -> Option<usize> {
        let index = match *self {
            Self::End => len.checked_sub(1)?,
            Self::At(index) if index < len => index,
            Self::At(_) | Self::Exhausted => return None,
        };
        *self = match index.checked_sub(1) {
            Some(prev) => Self::At(prev),
            None => Self::Exhausted,
        };
        Some(index)
    }

    fn reset(&mut self) {
        *self = Self::End;
    }
}

/// One recorded visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub path: PathBuf,
    pub position: Position,
}

impl HistoryEntry {
    pub fn new(path: impl Into<PathBuf>, position: Position) -> Self {
        Self {
            path: path.into(),
            position,
        }
    }
}

fn shift(position: &mut Position, start_line: u32, delta: i32) -> bool {
    if position.line >= start_line {
        *position = position.translate(delta);
        true
    } else {
        false
    }
}

/// Chronological multi-file position history.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: ReplayCursor,
}

impl History {
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Read the next unvisited entry walking backwards, if any remain.
    pub fn step_back(&mut self) -> Option<&HistoryEntry> {
        let index = self.cursor.step_back(self.entries.len())?;
        self.entries.get(index)
    }

    pub fn reset_cursor(&mut self) {
        self.cursor.reset();
    }

    /// Translate every entry for `path` at or below `start_line` by `delta`
    /// lines. Returns how many entries moved.
    pub fn shift_lines(&mut self, path: &Path, start_line: u32, delta: i32) -> usize {
        self.entries
            .iter_mut()
            .filter(|entry| entry.path == path)
            .map(|entry| shift(&mut entry.position, start_line, delta))
            .filter(|moved| *moved)
            .count()
    }
}

/// Positions recorded inside a single file, oldest first.
#[derive(Debug, Default)]
pub struct FilePositions {
    positions: Vec<Position>,
    cursor: ReplayCursor,
}

impl FilePositions {
    pub fn push(&mut self, position: Position) {
        self.positions.push(position);
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn step_back(&mut self) -> Option<Position> {
        let index = self.cursor.step_back(self.positions.len())?;
        self.positions.get(index).copied()
    }

    pub fn reset_cursor(&mut self) {
        self.cursor.reset();
    }

    pub fn shift_lines(&mut self, start_line: u32, delta: i32) -> usize {
        self.positions
            .iter_mut()
            .map(|position| shift(position, start_line, delta))
            .filter(|moved| *moved)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(entries: &[(&str, u32)]) -> History {
        let mut history = History::default();
        for (path, line) in entries {
            history.push(HistoryEntry::new(*path, Position::new(*line, 0)));
        }
        history
    }

    #[test]
    fn cursor_walks_back_then_exhausts() {
        let mut cursor = ReplayCursor::default();
        assert_eq!(cursor.step_back(3), Some(2));
        assert_eq!(cursor.step_back(3), Some(1));
        assert_eq!(cursor.step_back(3), Some(0));
        assert_eq!(cursor, ReplayCursor::Exhausted);
        assert_eq!(cursor.step_back(3), None);
    }

    #[test]
    fn cursor_on_empty_list_stays_at_end() {
        let mut cursor = ReplayCursor::default();
        assert_eq!(cursor.step_back(0), None);
        assert_eq!(cursor, ReplayCursor::End);
    }

    #[test]
    fn reset_restarts_from_latest() {
        let mut history = history_of(&[("a", 1), ("b", 2)]);
        assert_eq!(history.step_back().map(|e| e.position.line), Some(2));
        history.reset_cursor();
        assert_eq!(history.step_back().map(|e| e.position.line), Some(2));
        assert_eq!(history.step_back().map(|e| e.position.line), Some(1));
        assert!(history.step_back().is_none());
    }

    #[test]
    fn shift_only_touches_same_file_at_or_below_start() {
        let mut history = history_of(&[("a", 1), ("a", 4), ("b", 9), ("a", 7)]);
        let moved = history.shift_lines(Path::new("a"), 4, 2);
        assert_eq!(moved, 2);

        let lines: Vec<_> = history
            .entries()
            .iter()
            .map(|e| (e.path.to_str().unwrap_or_default(), e.position.line))
            .collect();
        assert_eq!(lines, vec![("a", 1), ("a", 6), ("b", 9), ("a", 9)]);
    }

    #[test]
    fn negative_shift_moves_lines_up() {
        let mut positions = FilePositions::default();
        positions.push(Position::new(2, 1));
        positions.push(Position::new(10, 3));
        assert_eq!(positions.shift_lines(8, -4), 1);
        assert_eq!(
            positions.positions(),
            &[Position::new(2, 1), Position::new(6, 3)]
        );
    }
}
