use async_trait::async_trait;
use parking_lot::Mutex;
use retrace::{EditorEvent, NavigationError, NavigationSink, Position};
use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
};

/// [`NavigationSink`] backed by the local filesystem.
///
/// `open` succeeds when the file exists and can be read. `select` queues the
/// selection event an editor would emit, to be fed back through the
/// controller by the caller.
pub struct FsNavigator {
    root: PathBuf,
    echoes: Mutex<VecDeque<EditorEvent>>,
}

impl FsNavigator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            echoes: Mutex::new(VecDeque::new()),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Take every queued selection event, oldest first.
    pub fn drain(&self) -> Vec<EditorEvent> {
        self.echoes.lock().drain(..).collect()
    }
}

#[async_trait]
impl NavigationSink for FsNavigator {
    async fn open(&self, path: &Path) -> Result<(), NavigationError> {
        let resolved = self.resolve(path);
        let metadata = tokio::fs::metadata(&resolved)
            .await
            .map_err(|err| NavigationError::from_io(path, err))?;
        if !metadata.is_file() {
            return Err(NavigationError::Declined(path.to_path_buf()));
        }
        tokio::fs::File::open(&resolved)
            .await
            .map_err(|err| NavigationError::from_io(path, err))?;
        tracing::debug!("opened {}", resolved.display());
        Ok(())
    }

    fn select(&self, path: &Path, position: Position) {
        self.echoes
            .lock()
            .push_back(EditorEvent::caret(path, position));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn opens_existing_files_only() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join("a.rs"), "fn a() {}").unwrap();
        std::fs::create_dir(tmp.path().join("dir")).unwrap();
        let navigator = FsNavigator::new(tmp.path());

        assert!(navigator.open(Path::new("a.rs")).await.is_ok());
        assert!(matches!(
            navigator.open(Path::new("missing.rs")).await,
            Err(NavigationError::NotFound(_))
        ));
        assert!(matches!(
            navigator.open(Path::new("dir")).await,
            Err(NavigationError::Declined(_))
        ));
    }

    #[test]
    fn select_queues_caret_echo() {
        let navigator = FsNavigator::new(".");
        navigator.select(Path::new("a.rs"), Position::new(3, 1));
        navigator.select(Path::new("b.rs"), Position::new(0, 0));

        assert_eq!(
            navigator.drain(),
            vec![
                EditorEvent::caret("a.rs", Position::new(3, 1)),
                EditorEvent::caret("b.rs", Position::new(0, 0)),
            ]
        );
        assert!(navigator.drain().is_empty());
    }
}
