//! tasks.md documents on disk

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::{parse, Task};

use super::config::ConfigError;

/// A parsed tasks document and where it came from
#[derive(Debug, Clone)]
pub struct TasksDocument {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl TasksDocument {
    /// Reads and parses a tasks file
    ///
    /// A missing or unreadable file (including invalid UTF-8) is a
    /// configuration error. Any readable content parses, possibly to nothing.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ConfigError::TasksFileNotFound(path.clone()),
            _ => ConfigError::Unreadable {
                path: path.clone(),
                source,
            },
        })?;

        Ok(Self::from_content(path, &content))
    }

    /// Parses content that was already read from `path`
    pub fn from_content(path: impl Into<PathBuf>, content: &str) -> Self {
        Self {
            path: path.into(),
            tasks: parse(content),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Top-level tasks in document order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns (completed, total) main task counts
    pub fn progress(&self) -> (usize, usize) {
        let done = self.tasks.iter().filter(|t| t.is_completed()).count();
        (done, self.tasks.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_parses_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.md");
        fs::write(&path, "# Tasks\n\n- [x] 1. First\n- [ ] 2. Second\n  - _depends_on: 1_\n").unwrap();

        let doc = TasksDocument::load(&path).unwrap();
        assert_eq!(doc.path(), path.as_path());
        assert_eq!(doc.tasks().len(), 2);
        assert_eq!(doc.progress(), (1, 2));
    }

    #[test]
    fn empty_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.md");
        fs::write(&path, "").unwrap();

        let doc = TasksDocument::load(&path).unwrap();
        assert!(doc.tasks().is_empty());
        assert_eq!(doc.progress(), (0, 0));
    }

    #[test]
    fn missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.md");

        let err = TasksDocument::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TasksFileNotFound(p) if p == path));
    }

    #[test]
    fn directory_is_unreadable() {
        let dir = TempDir::new().unwrap();

        let err = TasksDocument::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Unreadable { .. }));
    }

    #[test]
    fn invalid_utf8_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.md");
        fs::write(&path, [0x2d, 0x20, 0xff, 0xfe]).unwrap();

        let err = TasksDocument::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Unreadable { .. }));
    }
}
