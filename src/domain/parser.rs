//! tasks.md parser
//!
//! Recognizes three line shapes and ignores everything else:
//!
//! ```text
//! - [ ] 1. Main task title <!-- Issue #12 -->
//!   - [x] 1.1 Subtask title
//!   - [ ]* 1.2 Optional subtask
//!   - _depends_on: 2, 3_
//! ```
//!
//! Subtask and dependency lines attach to the most recent main task. The
//! parser is total: malformed lines are skipped, never reported.

use std::sync::LazyLock;

use regex::Regex;

use super::task::Task;

static MAIN_TASK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-\s*\[([ xX])\]\s*(\d+)\.\s+(.+)$").unwrap());

static SUBTASK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+-\s*\[([ xX])\](\*?)\s*(\d+\.\d+)\s+(.+)$").unwrap());

static DEPENDS_ON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+-?\s*_depends_on:\s*([^_]+)_").unwrap());

static ISSUE_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\s*Issue\s*#(\d+)\s*-->").unwrap());

/// A recognized line of a tasks document
#[derive(Debug, Clone, PartialEq)]
enum Line {
    Main(Task),
    Subtask(Task),
    DependsOn(Vec<String>),
}

/// Parses tasks.md content into top-level tasks in document order
pub fn parse(content: &str) -> Vec<Task> {
    let mut tasks: Vec<Task> = Vec::new();
    let mut current: Option<usize> = None;

    for line in content.lines() {
        match classify(line) {
            Some(Line::Main(task)) => {
                tasks.push(task);
                current = Some(tasks.len() - 1);
            }
            Some(Line::Subtask(subtask)) => {
                if let Some(idx) = current {
                    tasks[idx].push_subtask(subtask);
                }
            }
            Some(Line::DependsOn(ids)) => {
                if let Some(idx) = current {
                    tasks[idx].push_dependencies(ids);
                }
            }
            None => {}
        }
    }

    tasks
}

/// Matches a single line against the grammar, main task shape first
fn classify(line: &str) -> Option<Line> {
    if let Some(caps) = MAIN_TASK_RE.captures(line) {
        let (title, issue) = split_issue_ref(&caps[3]);
        let task = Task::new(&caps[2], title, is_checked(&caps[1])).with_issue(issue);
        return Some(Line::Main(task));
    }

    if let Some(caps) = SUBTASK_RE.captures(line) {
        let (title, issue) = split_issue_ref(&caps[4]);
        let task = Task::new(&caps[3], title, is_checked(&caps[1]))
            .with_optional(&caps[2] == "*")
            .with_issue(issue);
        return Some(Line::Subtask(task));
    }

    if let Some(caps) = DEPENDS_ON_RE.captures(line) {
        let ids = caps[1]
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect();
        return Some(Line::DependsOn(ids));
    }

    None
}

fn is_checked(mark: &str) -> bool {
    mark.eq_ignore_ascii_case("x")
}

/// Removes `<!-- Issue #N -->` annotations, returning the trimmed title and
/// the first issue number found
fn split_issue_ref(text: &str) -> (String, Option<u64>) {
    let issue = ISSUE_REF_RE
        .captures(text)
        .and_then(|caps| caps[1].parse().ok());
    let title = ISSUE_REF_RE.replace_all(text, "").trim().to_string();
    (title, issue)
}
