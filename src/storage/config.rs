//! Configuration handling
//!
//! Two layers are read, each only when a command needs it:
//! - `~/.config/awkit-tasks/config.toml` (global, TOML): output defaults.
//!   `AWKIT_CONFIG_DIR` overrides the directory. Skipped when the format is
//!   given on the command line.
//! - `.ai/config/workflow.yaml` (project, YAML): the AI Workflow Kit config.
//!   Only `specs.base_path` is read, and only to resolve spec names;
//!   everything else in the file belongs to other tools and is ignored.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the global config directory
pub const CONFIG_DIR_ENV: &str = "AWKIT_CONFIG_DIR";

/// Directory marking a project root
pub const PROJECT_DIR: &str = ".ai";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing tasks file path. Provide a tasks.md path or --spec <name>.")]
    MissingTasksFile,

    #[error("Tasks file not found: {}", .0.display())]
    TasksFileNotFound(PathBuf),

    #[error("Failed to read tasks file: {}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not in an AI Workflow Kit project (no .ai directory found)")]
    NotInProject,

    #[error("Invalid spec name '{0}': must be a single directory name")]
    InvalidSpecName(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

impl GlobalConfig {
    /// Returns the global config directory
    pub fn dir() -> Option<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Some(PathBuf::from(dir));
        }

        ProjectDirs::from("dev", "awkit", "awkit-tasks")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration, defaulting when no file exists
    pub fn load() -> Result<Self> {
        let config_dir = match Self::dir() {
            Some(dir) => dir,
            None => return Ok(Self::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse global config: {}", config_path.display()))
    }
}

/// Spec location settings from `workflow.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecsConfig {
    /// Directory holding one subdirectory per spec, relative to the root
    pub base_path: String,
}

impl Default for SpecsConfig {
    fn default() -> Self {
        Self {
            base_path: ".ai/specs".to_string(),
        }
    }
}

/// The subset of `workflow.yaml` this tool reads
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WorkflowConfig {
    pub specs: SpecsConfig,
}

impl WorkflowConfig {
    /// Loads `workflow.yaml` from a project root, defaulting when absent
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = Self::path(project_root);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).with_context(|| {
            format!("Failed to read workflow config: {}", config_path.display())
        })?;

        Self::parse(&content).with_context(|| {
            format!("Failed to parse workflow config: {}", config_path.display())
        })
    }

    fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        // A comment-only document is null, not a mapping
        serde_yaml::from_str::<Option<Self>>(content)
            .map(Option::unwrap_or_default)
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Path of `workflow.yaml` under a project root
    pub fn path(project_root: &Path) -> PathBuf {
        project_root
            .join(PROJECT_DIR)
            .join("config")
            .join("workflow.yaml")
    }
}

/// Finds the project root by looking for an `.ai/` directory
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(PROJECT_DIR).is_dir() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}
