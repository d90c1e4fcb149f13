use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Runtime configuration for the tsmap CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Current working directory.
    pub cwd: PathBuf,

    /// Whether to emit JSON logs.
    pub json_logs: bool,

    /// Verbosity level (0 = INFO, 1 = DEBUG, 2+ = TRACE).
    pub verbosity: u8,

    /// Explicit tsconfig path. When unset, the nearest `tsconfig.json`
    /// above `cwd` is used.
    pub project: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            json_logs: false,
            verbosity: 0,
            project: None,
        }
    }
}

impl Config {
    /// Create a new config with the given working directory.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            ..Default::default()
        }
    }

    /// Set verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set JSON log output.
    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }

    /// Set an explicit tsconfig path (relative paths are taken from `cwd`).
    #[must_use]
    pub fn with_project(mut self, project: Option<PathBuf>) -> Self {
        self.project = project.map(|p| self.cwd.join(p));
        self
    }

    /// The tsconfig to load: the explicit project, or the nearest one above `cwd`.
    #[must_use]
    pub fn tsconfig_path(&self) -> Option<PathBuf> {
        self.project
            .clone()
            .or_else(|| crate::tsconfig::find_tsconfig(&self.cwd))
    }
}
