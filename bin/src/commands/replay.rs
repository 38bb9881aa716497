use crate::{
    cli::ReplayArgs,
    navigator::FsNavigator,
    script::{self, Step},
};
use anyhow::{Context, Result};
use retrace::{Commands, Controller, EditPositionTracker, HistoryEntry, Replay};
use std::{fmt, path::Path};

/// What a replay run did, printed by the binary.
#[derive(Debug, Default)]
pub struct ReplayReport {
    /// One line per goto-last-edit command, in order.
    pub jumps: Vec<String>,
    pub history: Vec<HistoryEntry>,
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for jump in &self.jumps {
            writeln!(f, "{jump}")?;
        }
        writeln!(f, "history ({} entries, oldest first):", self.history.len())?;
        for entry in &self.history {
            writeln!(f, "  {}:{}", entry.path.display(), entry.position)?;
        }
        Ok(())
    }
}

fn describe(replay: &Replay) -> String {
    match replay {
        Replay::Exhausted => "goto: no earlier edit".to_string(),
        Replay::Navigated(entry) => format!("goto: {}:{}", entry.path.display(), entry.position),
        Replay::Failed { entry, error } => {
            format!("goto: skipped {}: {error}", entry.path.display())
        },
    }
}

pub async fn run(args: ReplayArgs) -> Result<ReplayReport> {
    let source = tokio::fs::read_to_string(&args.script)
        .await
        .with_context(|| format!("Failed to read script: {}", args.script.display()))?;
    let mut steps = script::parse(&source)?;
    steps.extend(std::iter::repeat_with(|| Step::Goto(None)).take(args.goto));

    let root = match args.root {
        Some(root) => root,
        None => args
            .script
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };

    Ok(run_steps(steps, FsNavigator::new(root)).await)
}

/// Feed `steps` through a fresh tracker, delivering the navigator's selection
/// echoes after every goto.
pub async fn run_steps(steps: Vec<Step>, navigator: FsNavigator) -> ReplayReport {
    let tracker = EditPositionTracker::shared();
    let controller = Controller::new(tracker.clone());
    let commands = Commands::new(tracker.clone());
    let mut report = ReplayReport::default();

    for step in steps {
        match step {
            Step::Event(event) => controller.handle(&event),
            Step::Goto(path) => {
                let replay = match path {
                    Some(path) => commands.goto_last_edit_in_file(&path, &navigator).await,
                    None => commands.goto_last_edit(&navigator).await,
                };
                report.jumps.push(describe(&replay));
                for echo in navigator.drain() {
                    controller.handle(&echo);
                }
            },
        }
    }

    report.history = tracker.lock().history().to_vec();
    report
}
