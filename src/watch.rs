//! # Watch Service - refresh the outline whenever its document is saved
//!
//! [`WatchService`] owns an [`OutlineProvider`] over a file-backed [`TextDocument`] and a
//! debounced file watcher on the document's directory. Every create/modify event for the
//! document reloads its text and runs a full [`refresh`](OutlineProvider::refresh), which
//! in turn sends [`Event::ForestChanged`] to the host's channel.
//!
//! The parent directory is watched rather than the file itself, so editors that save by
//! writing a temporary file and renaming it over the original are still picked up.
//!
//! ```rust,no_run
//! use comment_outline::{config::OutlineConfig, event::Event, watch::WatchService};
//! use std::{path::PathBuf, sync::mpsc::channel};
//!
//! let (tx, rx) = channel::<Event>();
//! let service = WatchService::new(PathBuf::from("src/main.rs"), &OutlineConfig::default(), tx)?;
//!
//! for event in rx {
//!     if event == Event::ForestChanged {
//!         print!("{}", service.snapshot());
//!     }
//! }
//! # Ok::<(), comment_outline::OutlineError>(())
//! ```
//!
//! ## Threading Model
//!
//! The provider lives behind an `Arc<parking_lot::RwLock<_>>`. The debouncer thread takes
//! the write lock for the whole reload + rebuild, so readers only ever see a completed
//! forest and the last pass to finish wins.

use crate::{
    config::OutlineConfig,
    error::OutlineError,
    event::Event,
    forest::Forest,
    provider::OutlineProvider,
    source::TextDocument,
};

use notify_debouncer_full::{
    new_debouncer,
    notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher},
    DebounceEventResult, Debouncer, FileIdMap,
};
use parking_lot::RwLock;
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    sync::{mpsc::Sender, Arc},
    time::Duration,
};

type DocumentWatcher = Debouncer<RecommendedWatcher, FileIdMap>;

pub type SharedProvider = Arc<RwLock<OutlineProvider<TextDocument>>>;

pub struct WatchService {
    provider: SharedProvider,
    path: PathBuf,
    watch_dir: PathBuf,
    debouncer: DocumentWatcher,
}

impl WatchService {
    pub fn new(
        path: PathBuf,
        config: &OutlineConfig,
        event_tx: Sender<Event>,
    ) -> Result<Self, OutlineError> {
        let path = path.canonicalize()?;
        let file_name = path
            .file_name()
            .map(OsString::from)
            .ok_or_else(|| OutlineError::NotFound(format!("{path:?} does not name a file")))?;
        let watch_dir = path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| OutlineError::NotFound(format!("{path:?} has no parent directory")))?;

        let document = TextDocument::from_path(&path)?;
        let mut provider = OutlineProvider::with_config(document, config)?;
        provider.attach(event_tx);
        let provider: SharedProvider = Arc::new(RwLock::new(provider));

        let handler_provider = provider.clone();
        let mut debouncer = new_debouncer(
            Duration::from_millis(config.watch.debounce_ms),
            None,
            move |result: DebounceEventResult| match result {
                Ok(events) => {
                    let saved = events.iter().any(|event| {
                        matches!(event.event.kind, EventKind::Create(_) | EventKind::Modify(_))
                            && event
                                .paths
                                .iter()
                                .any(|p| p.file_name() == Some(file_name.as_os_str()))
                    });
                    if saved {
                        tracing::info!("[WatchService] document saved, refreshing outline");
                        if let Err(e) = reload_and_refresh(&handler_provider) {
                            tracing::warn!("[WatchService] could not reload document: {e}");
                        }
                    }
                }
                Err(errors) => {
                    tracing::error!("Notify debouncer returned errors: {:?}", errors);
                }
            },
        )?;
        debouncer
            .watcher()
            .watch(&watch_dir, RecursiveMode::NonRecursive)?;
        tracing::info!("[WatchService] watching {:?}", path);

        Ok(WatchService {
            provider,
            path,
            watch_dir,
            debouncer,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn provider(&self) -> SharedProvider {
        self.provider.clone()
    }

    /// The most recently completed forest.
    pub fn snapshot(&self) -> Arc<Forest> {
        self.provider.read().snapshot()
    }

    /// Reload and rebuild without waiting for a file-system event.
    pub fn refresh(&self) -> Result<(), OutlineError> {
        reload_and_refresh(&self.provider)
    }

    pub fn stop(mut self) -> Result<(), OutlineError> {
        let unwatch_res = self.debouncer.watcher().unwatch(&self.watch_dir);
        tracing::debug!("Unwatch_res(path: {:?}) = {:?}", self.watch_dir, unwatch_res);
        unwatch_res?;
        Ok(())
    }
}

fn reload_and_refresh(provider: &SharedProvider) -> Result<(), OutlineError> {
    let mut provider = provider.write();
    provider.source_mut().reload()?;
    provider.refresh();
    Ok(())
}
