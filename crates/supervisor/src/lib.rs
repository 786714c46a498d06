//! Process supervision for gomon
//!
//! This crate provides:
//! - `ProcessHandle` (pid + process group of the live child)
//! - The `Launcher` seam and the OS-backed `CommandLauncher`
//! - `Supervisor`, which owns the one live generation and restarts it
//!   stop-before-start

pub mod error;
pub mod launcher;
pub mod process;
pub mod supervisor;

// Re-exports
pub use error::SupervisorError;
pub use launcher::{CommandLauncher, Launcher};
pub use process::{Generation, ProcessHandle};
pub use supervisor::Supervisor;

/// Result type for supervisor operations
pub type Result<T> = std::result::Result<T, SupervisorError>;
