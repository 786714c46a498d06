//! Event source backed by notify
//!
//! notify delivers events on its own backend thread. The handler classifies
//! each event and forwards it onto unbounded tokio channels, one for events
//! and one for asynchronous backend errors, so the control loop can select
//! over both.

use crate::error::WatchError;
use crate::WatchEvent;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use tokio::sync::mpsc;

/// Something paths can be subscribed to
pub trait EventSource {
    /// Subscribe a single path (non-recursive)
    fn watch(&mut self, path: &Path) -> Result<(), WatchError>;
}

/// Receiving ends of an event source
pub struct EventStream {
    /// Classified file system events
    pub events: mpsc::UnboundedReceiver<WatchEvent>,
    /// Errors reported by the backend while running
    pub errors: mpsc::UnboundedReceiver<notify::Error>,
}

/// Platform-recommended notify watcher
///
/// Dropping it releases the OS watch descriptors and closes the stream.
pub struct NotifySource {
    watcher: RecommendedWatcher,
}

impl NotifySource {
    /// Create the backend and the channels it feeds
    pub fn new() -> Result<(Self, EventStream), WatchError> {
        let (event_tx, events) = mpsc::unbounded_channel();
        let (error_tx, errors) = mpsc::unbounded_channel();

        let watcher = RecommendedWatcher::new(
            move |res: notify::Result<notify::Event>| match res {
                Ok(event) => {
                    for watch_event in WatchEvent::from_notify(event) {
                        // Receiver gone means we are shutting down
                        let _ = event_tx.send(watch_event);
                    }
                }
                Err(err) => {
                    let _ = error_tx.send(err);
                }
            },
            notify::Config::default(),
        )
        .map_err(WatchError::Init)?;

        Ok((Self { watcher }, EventStream { events, errors }))
    }
}

impl EventSource for NotifySource {
    fn watch(&mut self, path: &Path) -> Result<(), WatchError> {
        self.watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|source| WatchError::Register {
                path: path.to_path_buf(),
                source,
            })
    }
}
