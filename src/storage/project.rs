//! Project layout
//!
//! Resolves spec names to their `tasks.md` under the configured specs
//! directory. `workflow.yaml` is read when a project is opened, so only
//! commands that resolve specs depend on it.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

use super::config::{find_project_root, ConfigError, WorkflowConfig};

/// File name of a spec's task list
pub const TASKS_FILE: &str = "tasks.md";

/// An AI Workflow Kit project
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    workflow: WorkflowConfig,
}

impl Project {
    /// Opens the project containing the current directory
    pub fn open_current() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        Self::open_from(&cwd)
    }

    /// Opens the project containing `start`
    pub fn open_from(start: &Path) -> Result<Self> {
        let root = find_project_root(start).ok_or(ConfigError::NotInProject)?;
        let workflow = WorkflowConfig::load(&root)?;
        Ok(Self { root, workflow })
    }

    /// Returns the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the directory holding all specs
    pub fn specs_dir(&self) -> PathBuf {
        self.root.join(&self.workflow.specs.base_path)
    }

    /// Returns the `tasks.md` path for a spec
    ///
    /// The name must be a single normal path component, so it cannot leave
    /// the specs directory.
    pub fn tasks_path(&self, spec: &str) -> Result<PathBuf, ConfigError> {
        let mut components = Path::new(spec).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) if !spec.contains(['/', '\\']) => {
                Ok(self.specs_dir().join(spec).join(TASKS_FILE))
            }
            _ => Err(ConfigError::InvalidSpecName(spec.to_string())),
        }
    }

    /// Lists specs that have a `tasks.md`, sorted by name
    pub fn spec_names(&self) -> Result<Vec<String>, ConfigError> {
        let dir = self.specs_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir).map_err(|source| ConfigError::Unreadable {
            path: dir.clone(),
            source,
        })?;

        let mut names: Vec<String> = entries
            .flatten()
            .filter(|entry| entry.path().join(TASKS_FILE).is_file())
            .filter_map(|entry| entry.file_name().to_str().map(String::from))
            .collect();
        names.sort();

        Ok(names)
    }
}
