use crate::{events::EditorEvent, tracker::SharedTracker};

/// Feeds host editor events into the tracker.
///
/// Only the first change of a batch and the primary selection matter: the
/// first change marks where the edit started, the primary selection's active
/// end is where the cursor settled.
pub struct Controller {
    tracker: SharedTracker,
}

impl Controller {
    pub fn new(tracker: SharedTracker) -> Self {
        Self { tracker }
    }

    pub fn handle(&self, event: &EditorEvent) {
        match event {
            EditorEvent::TextChanged { path, changes } => {
                let Some(first) = changes.first() else {
                    tracing::warn!(path = %path.display(), "dropping text change event without changes");
                    return;
                };
                tracing::trace!(
                    path = %path.display(),
                    changes = changes.len(),
                    inserted = first.text.len(),
                    "text changed"
                );
                self.tracker.lock().on_new_edit(path, first.range.start);
            },
            EditorEvent::SelectionChanged { path, selections } => {
                let Some(primary) = selections.first() else {
                    tracing::warn!(path = %path.display(), "dropping selection event without selections");
                    return;
                };
                self.tracker.lock().on_new_position(path, primary.active);
            },
        }
    }

    pub fn tracker(&self) -> &SharedTracker {
        &self.tracker
    }
}
