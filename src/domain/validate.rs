//! Strict validation of a parsed task list
//!
//! Scheduling is permissive and never reports problems. This pass is the
//! opt-in counterpart: it lists everything the scheduler would have
//! tolerated or silently dropped.

use serde::Serialize;
use thiserror::Error;

use super::graph::DependencyGraph;
use super::task::Task;

/// A problem found in a task list
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    #[error("Task {task} depends on unknown task {missing}")]
    DanglingDependency { task: String, missing: String },

    /// Members are listed in document order, not along the cycle's edges
    #[error("Dependency cycle among tasks: {}", .members.join(", "))]
    Cycle { members: Vec<String> },

    #[error("Duplicate task id: {id} ({count} occurrences)")]
    DuplicateId { id: String, count: usize },

    #[error("Subtask {subtask} does not belong to task {parent}")]
    MisplacedSubtask { parent: String, subtask: String },
}

/// Outcome of [`validate`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns true if no issues were found
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Ids of every task caught in a cycle
    pub fn cyclic_ids(&self) -> impl Iterator<Item = &str> {
        self.issues
            .iter()
            .filter_map(|issue| match issue {
                ValidationIssue::Cycle { members } => Some(members),
                _ => None,
            })
            .flatten()
            .map(String::as_str)
    }
}

/// Checks a task list for dangling references, cycles, duplicate ids and
/// subtasks filed under the wrong parent
///
/// Issues are grouped by kind in that order; within a kind they follow
/// document order.
pub fn validate(tasks: &[Task]) -> ValidationReport {
    let graph = DependencyGraph::from_tasks(tasks);
    let mut issues = Vec::new();

    for task in tasks {
        let mut seen: Vec<&str> = Vec::new();
        for dep in task.depends_on() {
            if !graph.contains(dep) && !seen.contains(&dep.as_str()) {
                seen.push(dep);
                issues.push(ValidationIssue::DanglingDependency {
                    task: task.id().to_string(),
                    missing: dep.clone(),
                });
            }
        }
    }

    for cycle in graph.cycles() {
        issues.push(ValidationIssue::Cycle {
            members: cycle.iter().map(|t| t.id().to_string()).collect(),
        });
    }

    for id in graph.duplicate_ids() {
        let count = tasks.iter().filter(|t| t.id() == id).count();
        issues.push(ValidationIssue::DuplicateId {
            id: id.to_string(),
            count,
        });
    }

    for task in tasks {
        for subtask in task.subtasks() {
            let prefix = subtask.id().split('.').next().unwrap_or_default();
            if prefix != task.id() {
                issues.push(ValidationIssue::MisplacedSubtask {
                    parent: task.id().to_string(),
                    subtask: subtask.id().to_string(),
                });
            }
        }
    }

    ValidationReport { issues }
}
