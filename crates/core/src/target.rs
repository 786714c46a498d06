//! Run target resolution
//!
//! Turns the startup path and forwarded arguments into an immutable
//! `RunSpec` describing what to launch on every generation.

use crate::config::Config;
use crate::error::SetupError;
use crate::{MANIFEST_FILE, SOURCE_EXTENSION};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// What gomon is watching and running
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A single Go source file, run as `go run <file> <args...>`
    File(PathBuf),
    /// A Go module root, run as `go run .` from inside the root
    Project(PathBuf),
}

impl Target {
    /// Directory that holds the project configuration
    pub fn config_dir(&self) -> PathBuf {
        match self {
            Target::File(path) => match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            },
            Target::Project(root) => root.clone(),
        }
    }
}

/// Immutable description of the command launched on every restart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSpec {
    target: Target,
    args: Vec<String>,
    build_tool: String,
}

impl RunSpec {
    /// Resolve the startup path into a run target
    ///
    /// Fails with:
    /// - `TargetNotFound` when the path cannot be stat'ed
    /// - `MissingProjectMarker` for a directory without `go.mod`
    /// - `UnsupportedFileType` for a file without the `.go` extension
    ///
    /// Also returns the loaded `.gomon.toml` configuration.
    pub fn resolve(path: &Path, args: Vec<String>) -> Result<(Self, Config), SetupError> {
        let target = Self::resolve_target(path)?;
        let config = Config::load(&target.config_dir())?;
        let spec = Self::new(target, args, &config);
        Ok((spec, config))
    }

    /// Inspect `path` and decide between file and directory mode
    pub fn resolve_target(path: &Path) -> Result<Target, SetupError> {
        let metadata = std::fs::metadata(path).map_err(|source| SetupError::TargetNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        if metadata.is_dir() {
            tracing::info!("directory detected");
            if !path.join(MANIFEST_FILE).is_file() {
                return Err(SetupError::MissingProjectMarker(path.to_path_buf()));
            }
            Ok(Target::Project(path.to_path_buf()))
        } else {
            tracing::info!("file detected");
            if !has_source_extension(path) {
                return Err(SetupError::UnsupportedFileType(path.to_path_buf()));
            }
            Ok(Target::File(path.to_path_buf()))
        }
    }

    /// Build a run spec for an already resolved target
    pub fn new(target: Target, args: Vec<String>, config: &Config) -> Self {
        let args = match target {
            Target::File(_) => args,
            Target::Project(_) => {
                if !args.is_empty() {
                    tracing::warn!(
                        "ignoring {} argument(s): arguments are only forwarded in file mode",
                        args.len()
                    );
                }
                Vec::new()
            }
        };

        Self {
            target,
            args,
            build_tool: config.build_tool.clone(),
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn build_tool(&self) -> &str {
        &self.build_tool
    }

    /// Arguments passed to the build tool: `run <file> <args...>` or `run .`
    pub fn command_args(&self) -> Vec<OsString> {
        let mut argv = vec![OsString::from("run")];
        match &self.target {
            Target::File(path) => {
                argv.push(path.clone().into_os_string());
                argv.extend(self.args.iter().map(OsString::from));
            }
            Target::Project(_) => argv.push(OsString::from(".")),
        }
        argv
    }

    /// Working directory for the child, `None` to inherit gomon's own
    pub fn working_dir(&self) -> Option<&Path> {
        match &self.target {
            Target::File(_) => None,
            Target::Project(root) => Some(root),
        }
    }

    /// Human-readable form of the launched command, for status lines
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.build_tool.clone()];
        parts.extend(
            self.command_args()
                .iter()
                .map(|arg| arg.to_string_lossy().into_owned()),
        );
        parts.join(" ")
    }
}

/// Check whether a path carries the watched source extension
pub fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == SOURCE_EXTENSION)
        .unwrap_or(false)
}
