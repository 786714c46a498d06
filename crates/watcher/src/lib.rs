//! File system watching for gomon
//!
//! This crate provides:
//! - A notify-backed event source bridged onto tokio channels
//! - Hidden/deny-list directory pruning and source file filtering
//! - One-shot registration of the watch set at startup
//! - The single-window debounce state machine

pub mod debounce;
pub mod error;
pub mod ignore;
pub mod registrar;
pub mod source;

pub use debounce::{DebounceState, Debouncer, Observed, Restart};
pub use error::WatchError;
pub use ignore::IgnoreRules;
pub use registrar::{register, WatchSet};
pub use source::{EventSource, EventStream, NotifySource};

use notify::event::{MetadataKind, ModifyKind};
use std::path::PathBuf;

/// File system event
#[derive(Debug, Clone)]
pub struct WatchEvent {
    /// Path that changed
    pub path: PathBuf,
    /// Type of change
    pub kind: EventKind,
}

impl WatchEvent {
    /// Convert a raw notify event into one `WatchEvent` per affected path
    pub fn from_notify(event: notify::Event) -> Vec<WatchEvent> {
        let kind = EventKind::classify(&event.kind);
        event
            .paths
            .into_iter()
            .map(|path| WatchEvent { path, kind })
            .collect()
    }
}

/// Type of file system event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// File content written
    Write,
    /// Write observed through a modification-time change
    WriteMetadata,
    /// Permissions, ownership or other metadata changed
    Metadata,
    /// File created
    Create,
    /// File deleted
    Delete,
    /// File renamed
    Rename,
    /// Access or unknown event
    Other,
}

impl EventKind {
    /// Map notify's event kind onto gomon's classification
    pub fn classify(kind: &notify::EventKind) -> Self {
        match kind {
            notify::EventKind::Modify(ModifyKind::Data(_))
            | notify::EventKind::Modify(ModifyKind::Any) => EventKind::Write,
            notify::EventKind::Modify(ModifyKind::Metadata(MetadataKind::WriteTime)) => {
                EventKind::WriteMetadata
            }
            notify::EventKind::Modify(ModifyKind::Metadata(_)) => EventKind::Metadata,
            notify::EventKind::Modify(ModifyKind::Name(_)) => EventKind::Rename,
            notify::EventKind::Create(_) => EventKind::Create,
            notify::EventKind::Remove(_) => EventKind::Delete,
            _ => EventKind::Other,
        }
    }

    /// Only content writes count towards a restart
    pub fn is_write_like(self) -> bool {
        matches!(self, EventKind::Write | EventKind::WriteMetadata)
    }
}
