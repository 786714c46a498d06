//! Launching and killing generations
//!
//! `Launcher` is the seam between the supervisor's bookkeeping and the OS.
//! `CommandLauncher` is the real implementation: every child leads a fresh
//! process group so the whole tree (`go run` plus the binary it builds) can be
//! killed with one signal without touching gomon itself.

use crate::error::SupervisorError;
use crate::process::ProcessHandle;
use crate::Result;
use gomon_core::RunSpec;
use nix::errno::Errno;
use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Starts and kills supervised processes
pub trait Launcher {
    /// Start `spec` without waiting for it; `generation` is for logging
    fn launch(&mut self, spec: &RunSpec, generation: u64) -> Result<ProcessHandle>;

    /// Unconditionally kill every process in the handle's group
    fn terminate_group(&mut self, handle: ProcessHandle) -> Result<()>;
}

/// Launcher backed by `tokio::process`
///
/// Must be used from within a tokio runtime: each child is reaped by a
/// detached task so killed generations do not linger as zombies.
#[derive(Debug, Default)]
pub struct CommandLauncher;

impl CommandLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl Launcher for CommandLauncher {
    fn launch(&mut self, spec: &RunSpec, generation: u64) -> Result<ProcessHandle> {
        let mut command = Command::new(spec.build_tool());
        command
            .args(spec.command_args())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .process_group(0);
        if let Some(dir) = spec.working_dir() {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|source| SupervisorError::Launch {
            command: spec.display_command(),
            source,
        })?;

        let Some(handle) = child.id().and_then(ProcessHandle::group_leader) else {
            let _ = child.start_kill();
            return Err(SupervisorError::InvalidPid);
        };

        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => match status.code() {
                    Some(code) => info!("generation {} exited with status {}", generation, code),
                    None => debug!("generation {} terminated: {}", generation, status),
                },
                Err(e) => warn!("failed to reap generation {}: {}", generation, e),
            }
        });

        Ok(handle)
    }

    fn terminate_group(&mut self, handle: ProcessHandle) -> Result<()> {
        let pgid = handle.pgid();
        // ProcessHandle guarantees 0 < pgid <= i32::MAX
        let pgrp = Pid::from_raw(pgid as i32);

        match killpg(pgrp, Signal::SIGKILL) {
            Ok(()) => Ok(()),
            // Group already gone
            Err(Errno::ESRCH) => {
                debug!("process group {} already exited", pgid);
                Ok(())
            }
            Err(source) => Err(SupervisorError::Kill { pgid, source }),
        }
    }
}
