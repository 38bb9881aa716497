//! Edit position history for text editors.
//!
//! [`EditPositionTracker`] watches edit and selection notifications from a host
//! editor, records where edits left the cursor, keeps those positions correct
//! as lines are inserted or removed, and replays them backwards through a
//! [`NavigationSink`]. The [`outline`] module provides a rule driven symbol
//! outline for the same host.

pub mod commands;
pub mod config;
mod controller;
pub mod events;
pub mod history;
pub mod navigation;
pub mod outline;
pub mod paths;
mod position;
pub mod tracker;


pub use commands::{CommandError, Commands, GOTO_LAST_EDIT, GOTO_LAST_EDIT_IN_FILE};
pub use config::Config;
pub use controller::Controller;
pub use events::EditorEvent;
pub use history::HistoryEntry;
pub use navigation::{NavigationError, NavigationSink, Replay};
pub use outline::{SymbolInformation, SymbolKind, SymbolProvider};
pub use position::{Position, Selection, TextChange};
pub use tracker::{EditPositionTracker, FileState, SharedTracker};
