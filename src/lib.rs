//! awkit-tasks - Task dependency graph engine for the AI Workflow Kit
//!
//! Parses a `tasks.md` checklist into main tasks with subtasks and
//! `_depends_on:_` declarations, then answers scheduling questions: what
//! can run now, in which order, and what can run in parallel.
//!
//! ```
//! use awkit_tasks::{executable_tasks, parse};
//!
//! let tasks = parse("- [x] 1. First\n- [ ] 2. Second\n  - _depends_on: 1_");
//! let next: Vec<_> = executable_tasks(&tasks).iter().map(|t| t.id()).collect();
//! assert_eq!(next, ["2"]);
//! ```

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{
    executable_tasks, parallel_waves, parse, topological_order, validate, DependencyGraph, Task,
    ValidationIssue, ValidationReport,
};
