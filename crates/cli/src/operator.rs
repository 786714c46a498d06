//! Operator input
//!
//! Reads whitespace-delimited tokens from stdin. Every literal `rst` token
//! requests one manual restart; anything else is ignored.
//!
//! The reader runs on a plain thread, never on the runtime's blocking pool,
//! so a pending read does not keep the runtime alive at shutdown.

use std::io::BufRead;
use std::thread::JoinHandle;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Token that triggers a manual restart
pub const RESTART_COMMAND: &str = "rst";

/// A manual restart request from the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualRestart;

/// Count restart tokens on one input line
pub fn restart_requests(line: &str) -> usize {
    line.split_whitespace()
        .filter(|token| *token == RESTART_COMMAND)
        .count()
}

/// Spawn the reader thread feeding `tx`
pub fn spawn_reader<R>(reader: R, tx: mpsc::Sender<ManualRestart>) -> std::io::Result<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    std::thread::Builder::new()
        .name("gomon-operator".to_string())
        .spawn(move || read_commands(reader, &tx))
}

fn read_commands<R: BufRead>(reader: R, tx: &mpsc::Sender<ManualRestart>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("stopped reading operator input: {}", e);
                return;
            }
        };

        for _ in 0..restart_requests(&line) {
            if tx.blocking_send(ManualRestart).is_err() {
                // Control loop is gone
                return;
            }
        }
    }
    debug!("operator input closed");
}
