//! JSON-lines editor event scripts.
//!
//! ```text
//! {"event": "edit", "path": "src/lib.rs", "line": 2, "column": 0, "text": "\n\n\n"}
//! {"event": "move", "path": "src/lib.rs", "line": 5, "column": 0}
//! {"event": "goto"}
//! {"event": "goto", "path": "src/lib.rs"}
//! ```
//!
//! Blank lines and lines starting with `//` are skipped.

use anyhow::{Context, Result};
use retrace::{EditorEvent, Position};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Event(EditorEvent),
    /// Run goto-last-edit, scoped to `path` when given.
    Goto(Option<PathBuf>),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum RawStep {
    Edit {
        path: PathBuf,
        line: u32,
        #[serde(default)]
        column: u32,
        #[serde(default)]
        text: String,
    },
    Move {
        path: PathBuf,
        line: u32,
        #[serde(default)]
        column: u32,
    },
    Goto {
        #[serde(default)]
        path: Option<PathBuf>,
    },
}

impl From<RawStep> for Step {
    fn from(raw: RawStep) -> Self {
        match raw {
            RawStep::Edit {
                path,
                line,
                column,
                text,
            } => Step::Event(EditorEvent::edit(path, Position::new(line, column), text)),
            RawStep::Move { path, line, column } => {
                Step::Event(EditorEvent::caret(path, Position::new(line, column)))
            },
            RawStep::Goto { path } => Step::Goto(path),
        }
    }
}

pub fn parse(source: &str) -> Result<Vec<Step>> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with("//")
        })
        .map(|(index, line)| {
            serde_json::from_str::<RawStep>(line)
                .map(Step::from)
                .with_context(|| format!("Invalid script step on line {}", index + 1))
        })
        .collect()
}
