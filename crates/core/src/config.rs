//! Project-level configuration (`.gomon.toml`)
//!
//! The file is optional. It lives in the project root in directory mode and
//! next to the watched file in file mode.

use crate::error::SetupError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the optional configuration file
pub const CONFIG_FILE: &str = ".gomon.toml";

/// gomon configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Executable invoked as `<build_tool> run ...` (default: "go")
    #[serde(default = "default_build_tool")]
    pub build_tool: String,

    /// Directory names pruned in addition to the built-in deny list
    #[serde(default)]
    pub skip_dirs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            build_tool: default_build_tool(),
            skip_dirs: vec![],
        }
    }
}

impl Config {
    /// Load `.gomon.toml` from `dir`, falling back to defaults when absent
    pub fn load(dir: &Path) -> Result<Self, SetupError> {
        let path = dir.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| SetupError::ConfigRead {
            path: path.clone(),
            source,
        })?;

        let config: Config =
            toml::from_str(&contents).map_err(|source| SetupError::ConfigParse {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}

fn default_build_tool() -> String {
    "go".to_string()
}
