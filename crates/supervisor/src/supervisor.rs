//! Generation bookkeeping
//!
//! The supervisor is the only owner of the live `ProcessHandle`. Restarting
//! always kills the previous generation before the next one is launched, so
//! two generations never compete for the same port or lock file.

use crate::launcher::Launcher;
use crate::process::Generation;
use crate::Result;
use gomon_core::RunSpec;
use owo_colors::OwoColorize;
use tracing::{info, warn};

/// Owns at most one live generation of the supervised command
pub struct Supervisor<L: Launcher> {
    launcher: L,
    current: Option<Generation>,
    launched: u64,
}

impl<L: Launcher> Supervisor<L> {
    pub fn new(launcher: L) -> Self {
        Self {
            launcher,
            current: None,
            launched: 0,
        }
    }

    /// Launch a new generation without waiting for it
    ///
    /// A generation that is still tracked is stopped first. On launch
    /// failure nothing is tracked and the next trigger simply tries again.
    pub fn start(&mut self, spec: &RunSpec) -> Result<Generation> {
        self.stop();

        info!("exec: {}", spec.display_command());
        let number = self.launched + 1;
        let handle = self.launcher.launch(spec, number)?;

        self.launched = number;
        let generation = Generation { number, handle };
        self.current = Some(generation);

        println!("{}", "==============".dimmed());
        println!("{}", "Program Output:".bold());
        Ok(generation)
    }

    /// Kill the current generation's process group, if there is one
    ///
    /// Fire-and-forget: the handle is dropped immediately and exit is not
    /// awaited. Returns the generation that was stopped.
    pub fn stop(&mut self) -> Option<Generation> {
        let generation = self.current.take()?;

        info!("killing previous process: {}", generation.handle);
        if let Err(e) = self.launcher.terminate_group(generation.handle) {
            warn!("failed to stop generation {}: {}", generation.number, e);
        }
        Some(generation)
    }

    /// Stop the current generation, then start a new one
    pub fn restart(&mut self, spec: &RunSpec) -> Result<Generation> {
        self.stop();
        self.start(spec)
    }

    pub fn current_generation(&self) -> Option<Generation> {
        self.current
    }

    /// Number of generations launched so far
    pub fn launched(&self) -> u64 {
        self.launched
    }
}
