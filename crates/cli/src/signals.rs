//! Termination signal listener

use std::fmt;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Signal that requests an orderly shutdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownSignal::Interrupt => write!(f, "interrupt (SIGINT)"),
            ShutdownSignal::Terminate => write!(f, "terminated (SIGTERM)"),
        }
    }
}

/// Install SIGINT/SIGTERM handlers and forward them to `tx`
///
/// Must be called from within a tokio runtime. Once installed, these signals
/// no longer kill gomon directly.
pub fn spawn_listener(tx: mpsc::Sender<ShutdownSignal>) -> std::io::Result<JoinHandle<()>> {
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    Ok(tokio::spawn(async move {
        loop {
            let received = tokio::select! {
                Some(()) = interrupt.recv() => ShutdownSignal::Interrupt,
                Some(()) = terminate.recv() => ShutdownSignal::Terminate,
                else => break,
            };

            if tx.send(received).await.is_err() {
                break;
            }
        }
    }))
}
