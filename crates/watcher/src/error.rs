//! Error types for the file watching system.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during file watching operations.
#[derive(Error, Debug)]
pub enum WatchError {
    /// The notification backend could not be created.
    #[error("failed to initialize file watcher: {0}")]
    Init(#[source] notify::Error),

    /// A path could not be subscribed.
    #[error("failed to watch {}: {source}", .path.display())]
    Register {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// Directory traversal failed.
    #[error("failed to walk project tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// The backend reported an error while running.
    #[error("file watching error: {0}")]
    Backend(#[source] notify::Error),

    /// The backend stopped delivering events.
    #[error("file watcher event stream closed")]
    StreamClosed,
}
