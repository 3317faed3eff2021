//! Vault file watcher
//!
//! Watches the vault directory so the crawl can rerun when a document is
//! edited. Changes to configured targets are the crawler's own writes and do
//! not count.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::vault::reference;

/// Debounce window: collect events before crawling.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(750);

/// How often the fallback poll watcher checks for changes.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("Watch error: {0}")]
    Notify(#[from] notify::Error),

    #[error("Watcher stopped")]
    Disconnected,
}

/// Whether a batch of changed references warrants a new crawl.
///
/// Only documents count, and neither configured targets nor anything in a
/// hidden folder (such as the settings file) triggers a crawl.
pub fn should_crawl(changed: &[String], targets: &[String], extension: &str) -> bool {
    changed.iter().any(|changed| {
        let cleaned = reference::clean(changed);
        reference::has_extension(&cleaned, extension)
            && !cleaned.split('/').any(|segment| segment.starts_with('.'))
            && !targets.iter().any(|t| t == &cleaned)
    })
}

/// Recursive watcher on a vault root
pub struct VaultWatcher {
    #[allow(dead_code)]
    watcher: RecommendedWatcher,
    rx: Receiver<PathBuf>,
}

impl VaultWatcher {
    pub fn new(root: &Path) -> Result<Self, WatchError> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: std::result::Result<Event, notify::Error>| match res {
                Ok(event) => {
                    if event.kind.is_create() || event.kind.is_modify() || event.kind.is_remove() {
                        for path in event.paths {
                            let _ = tx.send(path);
                        }
                    }
                }
                Err(e) => log::warn!("Watch error: {}", e),
            },
            Config::default().with_poll_interval(POLL_INTERVAL),
        )?;

        watcher.watch(root, RecursiveMode::Recursive)?;
        log::info!("Watching {:?} for changes", root);

        Ok(Self { watcher, rx })
    }

    /// Block until something changes, then collect further changes until the
    /// window has passed
    pub fn next_batch(&self, window: Duration) -> Result<Vec<PathBuf>, WatchError> {
        let first = self.rx.recv().map_err(|_| WatchError::Disconnected)?;
        let mut batch = vec![first];

        let deadline = Instant::now() + window;
        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            match self.rx.recv_timeout(deadline - now) {
                Ok(path) => {
                    if !batch.contains(&path) {
                        batch.push(path);
                    }
                }
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        Ok(batch)
    }
}
