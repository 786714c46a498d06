//! Handles to launched generations

use std::fmt;

/// Opaque handle to a running child and its process group
///
/// Both ids are strictly positive and fit in `pid_t`, so signalling the group
/// can never address group 0 (our own) or "every process" (-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessHandle {
    pid: u32,
    pgid: u32,
}

impl ProcessHandle {
    /// Handle for a child that leads its own process group
    pub fn group_leader(pid: u32) -> Option<Self> {
        Self::new(pid, pid)
    }

    pub fn new(pid: u32, pgid: u32) -> Option<Self> {
        if is_signalable(pid) && is_signalable(pgid) {
            Some(Self { pid, pgid })
        } else {
            None
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn pgid(&self) -> u32 {
        self.pgid
    }
}

impl fmt::Display for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pid {} (group {})", self.pid, self.pgid)
    }
}

fn is_signalable(id: u32) -> bool {
    id > 0 && i32::try_from(id).is_ok()
}

/// One lifetime of the supervised child
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation {
    /// Monotonic launch counter, starting at 1
    pub number: u64,
    pub handle: ProcessHandle,
}
