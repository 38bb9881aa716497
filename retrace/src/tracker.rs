//! Edit position tracking state machine.
//!
//! Every cursor move reaches the tracker through [`EditPositionTracker::on_new_position`].
//! Whether that move is recorded depends on the file's [`FileState`]:
//!
//! ```text
//!   Idle --on_new_edit--> Waiting --on_new_position--> Idle   (records the position)
//!   Idle --replay-------> Changing --on_new_position--> Idle  (swallowed)
//!   Idle --on_new_position--> Idle                            (user navigation)
//! ```
//!
//! Recording a position and plain user navigation both restart replay from
//! the newest entry. Only a replay echo leaves the walk where it was.
//!
//! When an edit leaves the cursor on a different line than where the edit
//! started, lines were inserted or removed. Every recorded position in that
//! file at or below the edit start is shifted by the same delta before the new
//! position is appended.

use crate::{
    history::{FilePositions, History, HistoryEntry},
    navigation::{NavigationError, NavigationSink, Replay},
    position::Position,
};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

/// Tracker handle shared between the event controller and the command surface.
pub type SharedTracker = Arc<Mutex<EditPositionTracker>>;

/// Per-file position of the edit/navigation cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileState {
    #[default]
    Idle,
    /// An edit started; the next position event is its consequence.
    Waiting,
    /// A replay moved the cursor; the next position event is its echo.
    Changing,
}

#[derive(Debug, Default)]
pub struct EditPositionTracker {
    states: FxHashMap<PathBuf, FileState>,
    history: History,
    file_positions: FxHashMap<PathBuf, FilePositions>,
    /// Start of the most recent edit in any file.
    edit_anchor: Option<Position>,
}

impl EditPositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedTracker {
        Arc::new(Mutex::new(Self::new()))
    }

    /// A text change starting at `position` was applied to `path`.
    pub fn on_new_edit(&mut self, path: &Path, position: Position) {
        tracing::trace!(path = %path.display(), %position, "edit started");
        self.edit_anchor = Some(position);
        self.states.insert(path.to_path_buf(), FileState::Waiting);
    }

    /// The primary cursor of `path` settled at `position`.
    pub fn on_new_position(&mut self, path: &Path, position: Position) {
        let previous = self
            .states
            .insert(path.to_path_buf(), FileState::Idle)
            .unwrap_or_default();

        match previous {
            FileState::Waiting => {
                if let Some(anchor) = self.edit_anchor {
                    if anchor.line != position.line {
                        self.update_positions(path, anchor.line, position.line);
                    }
                }
                tracing::debug!(path = %path.display(), %position, "recorded edit position");
                self.history.push(HistoryEntry::new(path, position));
                self.file_positions
                    .entry(path.to_path_buf())
                    .or_default()
                    .push(position);
                self.reset_cursors();
            },
            FileState::Changing => {
                tracing::trace!(path = %path.display(), %position, "swallowed replay echo");
            },
            FileState::Idle => self.reset_cursors(),
        }
    }

    fn reset_cursors(&mut self) {
        self.history.reset_cursor();
        for positions in self.file_positions.values_mut() {
            positions.reset_cursor();
        }
    }

    /// Shift recorded positions of `path` at or below `start_line` by
    /// `end_line - start_line` lines.
    fn update_positions(&mut self, path: &Path, start_line: u32, end_line: u32) {
        let delta = line_delta(start_line, end_line);
        let moved = self.history.shift_lines(path, start_line, delta);
        if let Some(positions) = self.file_positions.get_mut(path) {
            positions.shift_lines(start_line, delta);
        }
        tracing::debug!(
            path = %path.display(),
            start_line,
            delta,
            moved,
            "adjusted recorded lines"
        );
    }

    /// Step the history cursor back and return the entry to show.
    ///
    /// The caller opens `entry.path` through a [`NavigationSink`] and hands
    /// the result to [`finish_replay`](Self::finish_replay). See
    /// [`Commands`](crate::Commands).
    pub fn begin_replay(&mut self) -> Option<HistoryEntry> {
        self.history.step_back().cloned()
    }

    /// Like [`begin_replay`](Self::begin_replay), restricted to positions
    /// recorded in `path`.
    pub fn begin_replay_in_file(&mut self, path: &Path) -> Option<HistoryEntry> {
        let position = self.file_positions.get_mut(path)?.step_back()?;
        Some(HistoryEntry::new(path, position))
    }

    /// Finish a replay once the sink has tried to open `entry.path`.
    ///
    /// On success the file is marked [`FileState::Changing`] before the
    /// selection is requested, so the echoed position event is swallowed. On
    /// failure nothing changes.
    pub fn finish_replay<S>(
        &mut self,
        entry: HistoryEntry,
        opened: Result<(), NavigationError>,
        sink: &S,
    ) -> Replay
    where
        S: NavigationSink + ?Sized,
    {
        match opened {
            Ok(()) => {
                self.states.insert(entry.path.clone(), FileState::Changing);
                sink.select(&entry.path, entry.position);
                tracing::debug!(path = %entry.path.display(), position = %entry.position, "replayed");
                Replay::Navigated(entry)
            },
            Err(error) => {
                tracing::debug!(path = %entry.path.display(), %error, "replay navigation failed");
                Replay::Failed { entry, error }
            },
        }
    }

    /// Every recorded position, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn positions_in(&self, path: &Path) -> &[Position] {
        self.file_positions
            .get(path)
            .map(FilePositions::positions)
            .unwrap_or_default()
    }

    pub fn state_of(&self, path: &Path) -> FileState {
        self.states.get(path).copied().unwrap_or_default()
    }

    pub fn edit_anchor(&self) -> Option<Position> {
        self.edit_anchor
    }
}

fn line_delta(start_line: u32, end_line: u32) -> i32 {
    let delta = i64::from(end_line) - i64::from(start_line);
    i32::try_from(delta).unwrap_or(if delta < 0 { i32::MIN } else { i32::MAX })
}
