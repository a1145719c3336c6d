//! Task domain model
//!
//! A task is one checklist line of a `tasks.md` document. Main tasks carry
//! dependencies and own their subtasks; subtasks are display grouping only.

use serde::{Deserialize, Serialize};

/// One checklist item (main task or subtask)
///
/// Tasks are value objects: the parser builds them once and nothing mutates
/// them afterwards. Re-parse the source text to observe a state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: String,
    title: String,
    completed: bool,
    #[serde(default)]
    depends_on: Vec<String>,
    #[serde(default)]
    subtasks: Vec<Task>,
    #[serde(default)]
    optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    issue: Option<u64>,
}

impl Task {
    /// Creates a task with no dependencies or subtasks
    pub fn new(id: impl Into<String>, title: impl Into<String>, completed: bool) -> Self {
        Self {
            id: id.into(),
            title: title.into().trim().to_string(),
            completed,
            depends_on: Vec::new(),
            subtasks: Vec::new(),
            optional: false,
            issue: None,
        }
    }

    /// Adds a dependency on another task id
    pub fn with_dependency(mut self, id: impl Into<String>) -> Self {
        self.depends_on.push(id.into());
        self
    }

    /// Adds several dependencies, preserving their order
    pub fn with_dependencies<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Appends a subtask
    pub fn with_subtask(mut self, subtask: Task) -> Self {
        self.subtasks.push(subtask);
        self
    }

    /// Marks the task as optional (`- [ ]* 1.1 ...`)
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Links the task to a GitHub issue number
    pub fn with_issue(mut self, issue: Option<u64>) -> Self {
        self.issue = issue;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Declared dependency ids, in the order they appeared
    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }

    pub fn subtasks(&self) -> &[Task] {
        &self.subtasks
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Issue number from an `<!-- Issue #N -->` annotation, if any
    pub fn issue(&self) -> Option<u64> {
        self.issue
    }

    /// Returns true if the task declares a dependency on `id`
    pub fn depends_on_id(&self, id: &str) -> bool {
        self.depends_on.iter().any(|d| d == id)
    }

    /// Returns (completed, total) subtask counts
    pub fn subtask_progress(&self) -> (usize, usize) {
        let done = self.subtasks.iter().filter(|s| s.completed).count();
        (done, self.subtasks.len())
    }

    /// Returns a checkbox marker for display
    pub fn checkbox(&self) -> &'static str {
        if self.completed {
            "[x]"
        } else {
            "[ ]"
        }
    }

    pub(crate) fn push_dependencies<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.depends_on.extend(ids);
    }

    pub(crate) fn push_subtask(&mut self, subtask: Task) {
        self.subtasks.push(subtask);
    }
}
