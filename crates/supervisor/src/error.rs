//! Error types for process supervision

use thiserror::Error;

/// Errors raised while launching or terminating a generation.
#[derive(Error, Debug)]
pub enum SupervisorError {
    /// The build tool could not be spawned.
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The OS returned a process id gomon cannot signal safely.
    #[error("launched process has no usable pid")]
    InvalidPid,

    /// Signalling the process group failed.
    #[error("failed to kill process group {pgid}: {source}")]
    Kill {
        pgid: u32,
        #[source]
        source: nix::Error,
    },
}
