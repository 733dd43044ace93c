//! Site-set file watcher for automatic reconfiguration.
//!
//! The directory holding the site set is watched rather than the file, so
//! saves that replace the file (write a temp file, rename it over) keep
//! being seen. Events for sibling files are ignored.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_sites;
use crate::config::sites::SiteSet;

/// Sends a freshly loaded [`SiteSet`] every time the site file changes.
pub struct SiteWatcher {
    path: PathBuf,
    backend_kind: String,
    update_tx: mpsc::UnboundedSender<SiteSet>,
}

impl SiteWatcher {
    /// Returns the watcher and the receiving end of its updates.
    pub fn new(path: &Path, backend_kind: &str) -> (Self, mpsc::UnboundedReceiver<SiteSet>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            backend_kind: backend_kind.to_string(),
            update_tx,
        };
        (watcher, update_rx)
    }

    /// Directory to watch: the file's parent, or `.` for a bare file name.
    fn watch_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Start delivering updates. Dropping the returned handle stops them.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let dir = self.watch_dir();
        let file_name = self.path.file_name().map(OsString::from);
        let SiteWatcher {
            path,
            backend_kind,
            update_tx,
        } = self;

        let handler = move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::error!(error = %e, "Site watch error");
                    return;
                }
            };
            if !touches_site_file(&event, file_name.as_deref()) {
                return;
            }

            match load_sites(&path, &backend_kind) {
                Ok(sites) => {
                    tracing::info!(path = %path.display(), "Site set reloaded");
                    let _ = update_tx.send(sites);
                }
                Err(e) => tracing::error!(
                    path = %path.display(),
                    error = %e,
                    "Site set reload failed, keeping current pools"
                ),
            }
        };

        let mut watcher = RecommendedWatcher::new(
            handler,
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(dir = %dir.display(), "Site watcher started");
        Ok(watcher)
    }
}

/// Whether `event` creates or modifies the file named `file_name`.
fn touches_site_file(event: &Event, file_name: Option<&std::ffi::OsStr>) -> bool {
    if !(event.kind.is_modify() || event.kind.is_create()) {
        return false;
    }
    let Some(name) = file_name else {
        return false;
    };
    event.paths.iter().any(|p| p.file_name() == Some(name))
}
