//! gomon binary execution helpers
//!
//! `GomonCommand` runs the binary to completion (setup failures), while
//! `GomonSession` keeps it running and lets tests feed stdin, watch stdout
//! line by line and send signals.

use anyhow::{Context, Result};
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

/// Path of the binary under test
fn gomon_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_gomon"))
}

/// One-shot command builder with a timeout
pub struct GomonCommand {
    working_dir: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl GomonCommand {
    /// Create a new command in the given working directory
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        Self {
            working_dir: working_dir.as_ref().to_path_buf(),
            args: Vec::new(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Add command arguments
    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Execute, killing the process if it outlives the timeout
    pub fn execute(&self) -> Result<CommandResult> {
        let child = Command::new(gomon_binary())
            .args(&self.args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to spawn gomon")?;

        let pid = child.id();
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let _ = tx.send(child.wait_with_output());
        });

        let output = match rx.recv_timeout(self.timeout) {
            Ok(output) => output.context("Failed to wait for gomon")?,
            Err(_) => {
                let _ = kill(Pid::from_raw(pid as i32), Signal::SIGKILL);
                anyhow::bail!("gomon {:?} did not exit within {:?}", self.args, self.timeout);
            }
        };

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }

    /// Execute and expect failure
    pub fn assert_failure(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded:\nArgs: {:?}\nStdout: {}",
                self.args,
                result.stdout
            );
        }

        Ok(result)
    }
}

/// Command execution result
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    /// Check if command succeeded
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Check if stderr contains text
    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }
}

/// A running gomon process
pub struct GomonSession {
    child: Child,
    stdin: Option<ChildStdin>,
    lines: Receiver<String>,
    seen: Vec<String>,
}

impl GomonSession {
    /// Start gomon in `working_dir` with `args`
    pub fn spawn(working_dir: impl AsRef<Path>, args: &[&str]) -> Result<Self> {
        let mut child = Command::new(gomon_binary())
            .args(args)
            .current_dir(working_dir.as_ref())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .context("Failed to spawn gomon")?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take().context("stdout was not captured")?;

        let (tx, lines) = mpsc::channel();
        std::thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            child,
            stdin,
            lines,
            seen: Vec::new(),
        })
    }

    /// Number of output lines so far that contain `needle`
    pub fn count(&self, needle: &str) -> usize {
        self.seen.iter().filter(|line| line.contains(needle)).count()
    }

    /// Block until `needle` has appeared on `times` lines
    pub fn wait_for_count(&mut self, needle: &str, times: usize, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;

        while self.count(needle) < times {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.lines.recv_timeout(remaining) {
                Ok(line) => self.seen.push(line),
                Err(RecvTimeoutError::Timeout) => anyhow::bail!(
                    "timed out waiting for {} x {:?}; output so far:\n{}",
                    times,
                    needle,
                    self.seen.join("\n")
                ),
                Err(RecvTimeoutError::Disconnected) => anyhow::bail!(
                    "gomon output closed while waiting for {:?}; output:\n{}",
                    needle,
                    self.seen.join("\n")
                ),
            }
        }
        Ok(())
    }

    /// Block until `needle` appears once
    pub fn wait_for(&mut self, needle: &str, timeout: Duration) -> Result<()> {
        let times = self.count(needle) + 1;
        self.wait_for_count(needle, times, timeout)
    }

    /// Write operator input
    pub fn send(&mut self, input: &str) -> Result<()> {
        let stdin = self.stdin.as_mut().context("stdin already closed")?;
        stdin.write_all(input.as_bytes())?;
        stdin.flush()?;
        Ok(())
    }

    /// Send SIGTERM and wait for gomon to exit
    pub fn terminate(&mut self, timeout: Duration) -> Result<ExitStatus> {
        kill(Pid::from_raw(self.child.id() as i32), Signal::SIGTERM)?;

        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = self.child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                anyhow::bail!("gomon did not exit within {:?} of SIGTERM", timeout);
            }
            std::thread::sleep(Duration::from_millis(20));
        }
    }

    /// Collect the remaining output after exit
    pub fn drain(&mut self, timeout: Duration) {
        while let Ok(line) = self.lines.recv_timeout(timeout) {
            self.seen.push(line);
        }
    }
}

impl Drop for GomonSession {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Macro for convenient command construction
///
/// Usage:
/// ```
/// gomon!(dir, "main.py").assert_failure()?;
/// ```
#[macro_export]
macro_rules! gomon {
    ($dir:expr, $($arg:expr),*) => {{
        let mut cmd = $crate::common::cli::GomonCommand::new($dir);
        cmd.args(&[$($arg),*]);
        cmd
    }};
}
