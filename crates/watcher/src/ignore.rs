//! Ignore rules for the project walk
//!
//! Two independent directory predicates are composed by the registrar:
//! 1. Hidden entries (any name starting with `.`, except `.` itself)
//! 2. Deny-listed names (`vendor` plus `skip_dirs` from `.gomon.toml`)
//!
//! Files are kept only when they are Go sources and not test files.

use gomon_core::{Config, DEFAULT_SKIP_DIRS, TEST_FILE_MARKER};
use std::path::Path;

/// Ignore rule set
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    /// Directory names that are pruned wholesale
    denylist: Vec<String>,
}

impl IgnoreRules {
    /// Built-in deny list plus the configured extra directories
    pub fn from_config(config: &Config) -> Self {
        let mut denylist: Vec<String> = DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect();
        for dir in &config.skip_dirs {
            if !denylist.contains(dir) {
                denylist.push(dir.clone());
            }
        }
        Self { denylist }
    }

    /// Check whether a directory entry name is hidden
    ///
    /// A lone `.` is the current directory, not a hidden entry.
    pub fn is_hidden_entry(name: &str) -> bool {
        name.len() > 1 && name.starts_with('.')
    }

    /// Check whether a directory name is on the deny list
    pub fn is_denylisted(&self, name: &str) -> bool {
        self.denylist.iter().any(|d| d == name)
    }

    /// Check whether a directory should be pruned from the walk
    pub fn should_prune_dir(&self, name: &str) -> bool {
        Self::is_hidden_entry(name) || self.is_denylisted(name)
    }

    /// Check whether a file is a watched Go source file
    pub fn is_watched_file(path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        gomon_core::target::has_source_extension(path) && !name.contains(TEST_FILE_MARKER)
    }

    /// Get the effective deny list
    pub fn denylist(&self) -> &[String] {
        &self.denylist
    }
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
