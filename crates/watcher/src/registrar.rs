//! Startup registration of watched paths
//!
//! Walks the target once and subscribes every watched file with the event
//! source. The watch set is fixed afterwards: files created later are not
//! picked up.
//!
//! Registration is fail-fast. The first walk or subscription error aborts
//! the whole registration, since a partially watched project would silently
//! miss edits.

use crate::error::WatchError;
use crate::ignore::IgnoreRules;
use crate::source::EventSource;
use gomon_core::Target;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::{DirEntry, WalkDir};

/// Paths subscribed for change notification
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WatchSet {
    paths: BTreeSet<PathBuf>,
}

impl WatchSet {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }
}

/// Register the target's files with `source` and return the watch set
pub fn register<S>(
    target: &Target,
    rules: &IgnoreRules,
    source: &mut S,
) -> Result<WatchSet, WatchError>
where
    S: EventSource + ?Sized,
{
    let mut set = WatchSet::default();

    match target {
        Target::File(path) => add(&mut set, source, path)?,
        Target::Project(root) => {
            let walker = WalkDir::new(root)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| !is_pruned(entry, rules));

            for entry in walker {
                let entry = entry?;
                // Symlinks are not followed but are registered like files
                if !entry.file_type().is_dir() && IgnoreRules::is_watched_file(entry.path()) {
                    add(&mut set, source, entry.path())?;
                }
            }
        }
    }

    Ok(set)
}

fn add<S>(set: &mut WatchSet, source: &mut S, path: &Path) -> Result<(), WatchError>
where
    S: EventSource + ?Sized,
{
    source.watch(path)?;
    info!("watching changes for {}", path.display());
    set.paths.insert(path.to_path_buf());
    Ok(())
}

/// The root itself is never pruned
fn is_pruned(entry: &DirEntry, rules: &IgnoreRules) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    if rules.should_prune_dir(&name) {
        info!("skipping dir {}", entry.path().display());
        return true;
    }
    false
}
