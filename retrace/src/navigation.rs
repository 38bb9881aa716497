//! The outbound side of replay: asking the host editor to show a position.
//!
//! The [`NavigationSink`] trait enables dependency injection: a host editor
//! implements it against its own document API, the CLI implements it against
//! the filesystem, and tests use an in-memory recorder.

use crate::{history::HistoryEntry, position::Position};
use async_trait::async_trait;
use std::{
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Errors that can occur while opening a file for replay.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// The file no longer exists
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// The file exists but cannot be read
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The host refused to show the file
    #[error("Navigation declined for {0}")]
    Declined(PathBuf),

    /// Any other I/O failure
    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl NavigationError {
    /// Classify an I/O error raised while opening `path`.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Host facility that opens a file and moves its selection.
#[async_trait]
pub trait NavigationSink: Send + Sync {
    /// Open `path` and make it the active document.
    async fn open(&self, path: &Path) -> Result<(), NavigationError>;

    /// Place a zero-width selection at `position` in the already opened `path`.
    ///
    /// Implementations are expected to echo a selection-changed event for
    /// `path` back to the tracker.
    fn select(&self, path: &Path, position: Position);
}

/// Outcome of one replay step.
#[derive(Debug)]
pub enum Replay {
    /// Nothing left to replay.
    Exhausted,
    /// The sink opened the file and the selection was requested.
    Navigated(HistoryEntry),
    /// The sink could not open the file. Tracker state is unchanged.
    Failed {
        entry: HistoryEntry,
        error: NavigationError,
    },
}

impl Replay {
    pub fn entry(&self) -> Option<&HistoryEntry> {
        match self {
            Self::Exhausted => None,
            Self::Navigated(entry) | Self::Failed { entry, .. } => Some(entry),
        }
    }

    pub fn is_navigated(&self) -> bool {
        matches!(self, Self::Navigated(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_are_classified() {
        let path = Path::new("missing.rs");
        let err = NavigationError::from_io(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, NavigationError::NotFound(p) if p == path));

        let err = NavigationError::from_io(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, NavigationError::PermissionDenied(_)));

        let err = NavigationError::from_io(path, io::Error::other("disk on fire"));
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn replay_entry_accessor() {
        assert!(Replay::Exhausted.entry().is_none());

        let entry = HistoryEntry::new("a.rs", Position::new(1, 2));
        let replay = Replay::Navigated(entry.clone());
        assert!(replay.is_navigated());
        assert_eq!(replay.entry(), Some(&entry));

        let failed = Replay::Failed {
            entry: entry.clone(),
            error: NavigationError::Declined(entry.path.clone()),
        };
        assert!(!failed.is_navigated());
        assert_eq!(failed.entry(), Some(&entry));
    }
}
