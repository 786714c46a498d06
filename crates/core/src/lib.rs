//! Core types for gomon
//!
//! This crate provides:
//! - Run target resolution (`RunSpec`, `Target`)
//! - Toolchain constants (source extension, manifest, test marker)
//! - `.gomon.toml` configuration
//! - Setup error taxonomy

pub mod config;
pub mod error;
pub mod target;

// Re-export main types for convenience
pub use config::Config;
pub use error::SetupError;
pub use target::{RunSpec, Target};

use std::time::Duration;

/// Extension of watched source files (without the dot)
pub const SOURCE_EXTENSION: &str = "go";

/// Project-definition file that must exist at the root in directory mode
pub const MANIFEST_FILE: &str = "go.mod";

/// Substring that marks a source file as a test file
pub const TEST_FILE_MARKER: &str = "_test";

/// Directory names that are never descended into
pub const DEFAULT_SKIP_DIRS: &[&str] = &["vendor"];

/// Quiet period after the last write before a restart fires
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Common result type used throughout gomon-core
pub type Result<T> = std::result::Result<T, SetupError>;
