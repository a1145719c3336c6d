//! Task list queries (order, next, parallel)
//!
//! Each query parses the document and prints a scheduling view of its main
//! tasks. Dependency cycles never fail a query; the affected tasks are just
//! missing from the output (see `validate`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use super::output::Output;
use crate::domain::{executable_tasks, parallel_waves, topological_order, Task};
use crate::storage::{ConfigError, Project, TasksDocument};

/// Where to read the task list from
#[derive(Debug, Clone, Args)]
pub struct TaskSource {
    /// Path to a tasks.md file
    pub file: Option<PathBuf>,

    /// Spec name, resolved to <specs.base_path>/<spec>/tasks.md
    #[arg(long, short, conflicts_with = "file")]
    pub spec: Option<String>,
}

impl TaskSource {
    /// Resolves the path from the current directory and parses the document
    pub fn load(&self, output: &Output) -> Result<TasksDocument> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        self.load_from(&cwd, output)
    }

    /// Resolves the path and parses the document
    ///
    /// Only `--spec` looks for the project; a plain path never reads
    /// project configuration.
    pub fn load_from(&self, cwd: &Path, output: &Output) -> Result<TasksDocument> {
        let path = match (&self.file, &self.spec) {
            (Some(file), _) => file.clone(),
            (None, Some(spec)) => {
                let project = Project::open_from(cwd)?;
                output.verbose_ctx(
                    "load",
                    &format!("Resolving spec '{}' in {}", spec, project.root().display()),
                );
                project.tasks_path(spec)?
            }
            (None, None) => return Err(ConfigError::MissingTasksFile.into()),
        };

        output.verbose_ctx("load", &format!("Reading tasks file: {}", path.display()));
        let doc = TasksDocument::load(path)?;
        output.verbose_ctx("load", &format!("Parsed {} tasks", doc.tasks().len()));

        Ok(doc)
    }
}

/// Which scheduling view to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    /// All tasks, dependencies first
    #[default]
    Order,
    /// Tasks that can start now
    Next,
    /// Incomplete tasks grouped into parallel waves
    Parallel,
}

/// Prints the task list in the requested mode
pub fn list(output: &Output, doc: &TasksDocument, mode: ListMode) -> Result<()> {
    match mode {
        ListMode::Order => order(output, doc.tasks()),
        ListMode::Next => next(output, doc.tasks()),
        ListMode::Parallel => parallel(output, doc.tasks()),
    }

    Ok(())
}

/// Show all tasks in topological order
fn order(output: &Output, tasks: &[Task]) {
    let sorted = topological_order(tasks);
    report_omitted(output, "order", tasks.len(), sorted.len());

    if output.is_json() {
        output.data(&sorted);
    } else if tasks.is_empty() {
        println!("No tasks found.");
    } else {
        println!("Tasks (topological order):");
        for task in sorted {
            println!("  {} {}", task.checkbox(), describe(task));
        }
    }
}

/// Show tasks whose dependencies are satisfied
fn next(output: &Output, tasks: &[Task]) {
    let executable = executable_tasks(tasks);
    output.verbose_ctx(
        "next",
        &format!("Found {} executable tasks", executable.len()),
    );

    if output.is_json() {
        output.data(&executable);
    } else if tasks.is_empty() {
        println!("No tasks found.");
    } else if executable.is_empty() {
        println!("No executable tasks (all completed or blocked)");
    } else {
        println!("Next executable task(s):");
        for task in executable {
            println!("  {} {}", task.checkbox(), describe(task));
        }
    }
}

/// Show incomplete tasks grouped into waves
fn parallel(output: &Output, tasks: &[Task]) {
    let waves = parallel_waves(tasks);
    let pending = tasks.iter().filter(|t| !t.is_completed()).count();
    let placed: usize = waves.iter().map(Vec::len).sum();
    report_omitted(output, "parallel", pending, placed);

    if output.is_json() {
        output.data(&waves);
    } else if tasks.is_empty() {
        println!("No tasks found.");
    } else if waves.is_empty() {
        println!("No tasks to schedule (all completed or blocked)");
    } else {
        println!("Parallel execution groups:");
        for (i, wave) in waves.iter().enumerate() {
            println!();
            println!("  Wave {}:", i + 1);
            for task in wave {
                println!("    - {}", describe(task));
            }
        }
    }
}

fn report_omitted(output: &Output, context: &str, expected: usize, placed: usize) {
    if placed < expected {
        output.verbose_ctx(
            context,
            &format!(
                "{} task(s) omitted: dependency cycle (run `validate` for details)",
                expected - placed
            ),
        );
    }
}

/// Formats `<id>. <title>` with issue link, subtask progress and dependencies
fn describe(task: &Task) -> String {
    let mut line = format!("{}. {}", task.id(), task.title());

    if let Some(issue) = task.issue() {
        line.push_str(&format!(" (#{})", issue));
    }

    let (done, total) = task.subtask_progress();
    if total > 0 {
        line.push_str(&format!(" [{}/{} subtasks]", done, total));
    }

    if !task.depends_on().is_empty() {
        line.push_str(&format!(" (depends on: {})", task.depends_on().join(", ")));
    }

    line
}
