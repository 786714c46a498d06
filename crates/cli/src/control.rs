//! Control plane event loop
//!
//! One task selects over every trigger:
//! - termination signals (checked first)
//! - asynchronous watcher errors
//! - raw file system events, fed to the debouncer
//! - the debounce deadline
//! - manual restart requests
//!
//! All supervisor calls happen on this task, so the live process handle is
//! never shared. Debounced and manual restarts take the same path.

use crate::operator::ManualRestart;
use crate::signals::ShutdownSignal;
use gomon_core::RunSpec;
use supervisor::{Launcher, Supervisor};
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, info};
use watcher::{Debouncer, EventStream, Observed, WatchError, WatchEvent};

/// Channels the control loop listens on
pub struct Inputs {
    pub stream: EventStream,
    pub manual: mpsc::Receiver<ManualRestart>,
    pub shutdown: mpsc::Receiver<ShutdownSignal>,
}

/// Owns the event source, the supervisor and the debounce state
pub struct ControlPlane<S, L: Launcher> {
    /// Kept alive until shutdown, dropping it releases the OS watches
    source: S,
    supervisor: Supervisor<L>,
    debouncer: Debouncer,
    spec: RunSpec,
}

impl<S, L: Launcher> ControlPlane<S, L> {
    pub fn new(source: S, supervisor: Supervisor<L>, spec: RunSpec) -> Self {
        Self {
            source,
            supervisor,
            debouncer: Debouncer::new(),
            spec,
        }
    }

    /// Launch the first generation and run until shutdown
    ///
    /// Returns the signal that ended the loop. A watcher failure stops the
    /// current generation and is returned as an error.
    pub async fn run(mut self, mut inputs: Inputs) -> Result<ShutdownSignal, WatchError> {
        self.restart();

        loop {
            let deadline = self.debouncer.deadline();

            tokio::select! {
                biased;

                Some(signal) = inputs.shutdown.recv() => {
                    return Ok(self.shutdown(signal));
                }

                Some(err) = inputs.stream.errors.recv() => {
                    error!("file watcher failed: {}", err);
                    self.supervisor.stop();
                    return Err(WatchError::Backend(err));
                }

                event = inputs.stream.events.recv() => match event {
                    Some(event) => self.observe(event),
                    None => {
                        self.supervisor.stop();
                        return Err(WatchError::StreamClosed);
                    }
                },

                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if self.debouncer.on_timer(Instant::now()).is_some() {
                        info!("no further change detected, restarting...");
                        self.restart();
                    }
                }

                Some(ManualRestart) = inputs.manual.recv() => {
                    info!("manual restart requested, restarting...");
                    self.restart();
                }
            }
        }
    }

    fn observe(&mut self, event: WatchEvent) {
        match self.debouncer.on_event(event.kind, Instant::now()) {
            Observed::Armed => {
                info!("detected change in {}", event.path.display());
                info!(
                    "waiting for {}ms to verify file closure",
                    self.debouncer.window().as_millis()
                );
            }
            Observed::Extended => debug!("further write to {}", event.path.display()),
            Observed::Ignored => {
                debug!("ignoring {:?} event for {}", event.kind, event.path.display())
            }
        }
    }

    /// Stop-then-start; a failed launch is logged and left for the next trigger
    fn restart(&mut self) {
        if let Err(e) = self.supervisor.restart(&self.spec) {
            error!("{}", e);
        }
    }

    fn shutdown(mut self, signal: ShutdownSignal) -> ShutdownSignal {
        info!("signal received: {}", signal);
        self.supervisor.stop();
        drop(self.source);
        info!("file watcher closed, exiting");
        signal
    }
}
