use std::path::{Path, PathBuf};

pub struct RetracePaths {
    /// Directory holding a project `.retrace/`; `None` for the system config dir.
    pub workspace_root: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
}

pub fn discover(start_dir: &Path) -> RetracePaths {
    if let Some(dir) = walk_ancestors(start_dir) {
        tracing::info!("found project .retrace directory: {}", dir.display());
        let root = dir.parent().map(Path::to_path_buf);
        return paths_from_dir(&dir, root);
    }

    match system_config_dir() {
        Some(dir) => {
            tracing::info!("using system config directory: {}", dir.display());
            paths_from_dir(&dir, None)
        },
        None => {
            tracing::debug!("no .retrace directory found");
            RetracePaths {
                workspace_root: None,
                config_path: None,
            }
        },
    }
}

fn walk_ancestors(start_dir: &Path) -> Option<PathBuf> {
    let mut current = Some(start_dir);
    while let Some(dir) = current {
        let candidate = dir.join(".retrace");
        if candidate.is_dir() {
            return Some(candidate);
        }
        current = dir.parent();
    }
    None
}

fn system_config_dir() -> Option<PathBuf> {
    let dir = dirs::config_dir()?.join("retrace");
    if dir.is_dir() {
        Some(dir)
    } else {
        None
    }
}

fn paths_from_dir(dir: &Path, workspace_root: Option<PathBuf>) -> RetracePaths {
    let config = dir.join("config.toml");
    RetracePaths {
        workspace_root,
        config_path: config.is_file().then_some(config),
    }
}
