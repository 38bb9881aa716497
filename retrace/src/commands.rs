//! User-invocable commands.
//!
//! Replay is split around the asynchronous open so the tracker lock is not
//! held while the sink works. Events the sink echoes in the meantime can still
//! reach the tracker through the [`Controller`](crate::Controller).

use crate::{
    history::HistoryEntry,
    navigation::{NavigationSink, Replay},
    tracker::SharedTracker,
};
use std::path::Path;
use thiserror::Error;

/// Jump to the previous edit position across all files.
pub const GOTO_LAST_EDIT: &str = "navigate.gotoLastEdit";
/// Jump to the previous edit position within the active file.
pub const GOTO_LAST_EDIT_IN_FILE: &str = "navigate.gotoLastEditInFile";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Command {0} needs an active file")]
    NoActiveFile(&'static str),
}

pub struct Commands {
    tracker: SharedTracker,
}

impl Commands {
    pub fn new(tracker: SharedTracker) -> Self {
        Self { tracker }
    }

    pub async fn goto_last_edit<S>(&self, sink: &S) -> Replay
    where
        S: NavigationSink + ?Sized,
    {
        let entry = self.tracker.lock().begin_replay();
        self.replay(entry, sink).await
    }

    pub async fn goto_last_edit_in_file<S>(&self, path: &Path, sink: &S) -> Replay
    where
        S: NavigationSink + ?Sized,
    {
        let entry = self.tracker.lock().begin_replay_in_file(path);
        self.replay(entry, sink).await
    }

    /// Open `entry` through `sink` with the tracker unlocked, then record the
    /// outcome.
    async fn replay<S>(&self, entry: Option<HistoryEntry>, sink: &S) -> Replay
    where
        S: NavigationSink + ?Sized,
    {
        let Some(entry) = entry else {
            return Replay::Exhausted;
        };
        let opened = sink.open(&entry.path).await;
        self.tracker.lock().finish_replay(entry, opened, sink)
    }

    /// Run the command registered under `name`.
    pub async fn dispatch<S>(
        &self,
        name: &str,
        active: Option<&Path>,
        sink: &S,
    ) -> Result<Replay, CommandError>
    where
        S: NavigationSink + ?Sized,
    {
        tracing::debug!(command = name, "dispatch");
        match name {
            GOTO_LAST_EDIT => Ok(self.goto_last_edit(sink).await),
            GOTO_LAST_EDIT_IN_FILE => {
                let path = active.ok_or(CommandError::NoActiveFile(GOTO_LAST_EDIT_IN_FILE))?;
                Ok(self.goto_last_edit_in_file(path, sink).await)
            },
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{position::Position, test::RecordingSink, tracker::EditPositionTracker};

    fn seeded() -> SharedTracker {
        let tracker = EditPositionTracker::shared();
        {
            let mut guard = tracker.lock();
            guard.on_new_edit(Path::new("a"), Position::new(2, 0));
            guard.on_new_position(Path::new("a"), Position::new(2, 1));
        }
        tracker
    }

    #[test]
    fn dispatches_known_commands() {
        let commands = Commands::new(seeded());
        let sink = RecordingSink::new();

        let replay = smol::block_on(commands.dispatch(GOTO_LAST_EDIT, None, &sink));
        assert!(matches!(replay, Ok(Replay::Navigated(_))));
        assert_eq!(
            sink.selections(),
            vec![(std::path::PathBuf::from("a"), Position::new(2, 1))]
        );
    }

    #[test]
    fn in_file_command_needs_active_file() {
        let commands = Commands::new(seeded());
        let sink = RecordingSink::new();

        let err = smol::block_on(commands.dispatch(GOTO_LAST_EDIT_IN_FILE, None, &sink));
        assert_eq!(
            err.err(),
            Some(CommandError::NoActiveFile(GOTO_LAST_EDIT_IN_FILE))
        );

        let ok = smol::block_on(commands.dispatch(
            GOTO_LAST_EDIT_IN_FILE,
            Some(Path::new("a")),
            &sink,
        ));
        assert!(matches!(ok, Ok(Replay::Navigated(_))));
    }

    #[test]
    fn unknown_command_is_rejected() {
        let commands = Commands::new(seeded());
        let sink = RecordingSink::new();
        let err = smol::block_on(commands.dispatch("navigate.nowhere", None, &sink));
        assert_eq!(err.err(), Some(CommandError::Unknown("navigate.nowhere".into())));
        assert!(sink.opened().is_empty());
    }
}
