use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, SystemTime};
use tokio::sync::mpsc as tokio_mpsc;

use crate::error::HostError;
use crate::host::{file, Entity};

/// How often the world file is re-checked when no notify event arrives
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Watches a world file and sends the full entity list whenever it changes
pub struct WorldWatcher {
    _watcher: RecommendedWatcher,
    path: PathBuf,
}

impl WorldWatcher {
    /// Start watching `path`. Reloaded worlds arrive on `world_tx`.
    pub fn new(
        path: impl AsRef<Path>,
        world_tx: tokio_mpsc::Sender<Vec<Entity>>,
    ) -> Result<Self, HostError> {
        let path = path.as_ref().to_path_buf();

        let (tx, rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                if let Ok(event) = res {
                    let _ = tx.send(event);
                }
            },
            Config::default(),
        )
        .map_err(|e| HostError::StoreUnavailable(e.to_string()))?;

        watcher
            .watch(&path, RecursiveMode::NonRecursive)
            .map_err(|e| HostError::StoreUnavailable(e.to_string()))?;

        let watch_path = path.clone();
        let mut last_modified = modified_at(&watch_path);

        tokio::task::spawn_blocking(move || loop {
            let changed = match rx.recv_timeout(POLL_INTERVAL) {
                Ok(_event) => true,
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    // Some editors replace the file instead of writing it,
                    // which not every backend reports
                    let modified = modified_at(&watch_path);
                    let changed = modified != last_modified;
                    last_modified = modified;
                    changed
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => return,
            };

            if !changed {
                continue;
            }
            last_modified = modified_at(&watch_path);

            match file::load_world(&watch_path) {
                Ok(entities) => {
                    if world_tx.blocking_send(entities).is_err() {
                        return; // Channel closed
                    }
                }
                Err(e) => tracing::warn!(error = %e, "failed to reload world file"),
            }
        });

        Ok(Self {
            _watcher: watcher,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn modified_at(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
