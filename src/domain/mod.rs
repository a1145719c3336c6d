//! Domain models for the task engine
//!
//! Contains the core logic without any I/O concerns: text in, plain data out.

mod task;
mod parser;
mod graph;
mod schedule;
mod validate;

pub use task::Task;
pub use parser::parse;
pub use graph::DependencyGraph;
pub use schedule::{executable_tasks, parallel_waves, topological_order};
pub use validate::{validate, ValidationIssue, ValidationReport};
