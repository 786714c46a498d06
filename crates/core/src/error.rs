//! Error types for startup resolution

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop gomon before anything is launched.
#[derive(Error, Debug)]
pub enum SetupError {
    /// The watch target does not exist or cannot be inspected.
    #[error("cannot access {}: {source}", .path.display())]
    TargetNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File mode was given something other than a Go source file.
    #[error("cannot run non-Go file {}", .0.display())]
    UnsupportedFileType(PathBuf),

    /// Directory mode was given a directory without a module manifest.
    #[error("no go.mod file found in {}", .0.display())]
    MissingProjectMarker(PathBuf),

    /// `.gomon.toml` exists but could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `.gomon.toml` exists but is not valid.
    #[error("invalid config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
