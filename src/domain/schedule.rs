//! Scheduling queries over a parsed task list
//!
//! All three are total: unknown dependency ids count as satisfied and tasks
//! caught in a cycle are silently left out. Run `validate` to find out what
//! was dropped.

use super::graph::DependencyGraph;
use super::task::Task;

/// Tasks that are not completed and whose dependencies are all completed
/// or unknown, in document order
pub fn executable_tasks(tasks: &[Task]) -> Vec<&Task> {
    DependencyGraph::from_tasks(tasks).ready_tasks()
}

/// All tasks with dependencies first, ties broken by ascending id string
pub fn topological_order(tasks: &[Task]) -> Vec<&Task> {
    DependencyGraph::from_tasks(tasks).topological_order()
}

/// Incomplete tasks grouped into waves of mutually independent work
pub fn parallel_waves(tasks: &[Task]) -> Vec<Vec<&Task>> {
    DependencyGraph::from_tasks(tasks).parallel_waves()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse;

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id().to_string()).collect()
    }

    #[test]
    fn executable_after_completed_dependency() {
        let tasks = parse("- [x] 1. First\n- [ ] 2. Second\n  - _depends_on: 1_");

        assert_eq!(ids(&executable_tasks(&tasks)), vec!["2"]);
    }

    #[test]
    fn executable_excludes_blocked_and_completed() {
        let tasks = parse("- [ ] 1. First\n- [ ] 2. Second\n  - _depends_on: 1_\n- [x] 3. Third");

        assert_eq!(ids(&executable_tasks(&tasks)), vec!["1"]);
    }

    #[test]
    fn unknown_dependency_counts_as_satisfied() {
        let tasks = parse("- [ ] 2. Second\n  - _depends_on: 1_");

        assert_eq!(ids(&executable_tasks(&tasks)), vec!["2"]);
        assert_eq!(ids(&topological_order(&tasks)), vec!["2"]);
        assert_eq!(parallel_waves(&tasks).len(), 1);
    }

    #[test]
    fn executable_keeps_document_order() {
        let tasks = parse("- [ ] 3. C\n- [ ] 1. A\n- [ ] 2. B");

        assert_eq!(ids(&executable_tasks(&tasks)), vec!["3", "1", "2"]);
    }

    #[test]
    fn topological_order_includes_completed_tasks() {
        let tasks = parse("- [ ] 2. Second\n  - _depends_on: 1_\n- [x] 1. First");

        assert_eq!(ids(&topological_order(&tasks)), vec!["1", "2"]);
    }

    #[test]
    fn waves_for_diamond() {
        let content = "- [ ] 1. Root\n- [ ] 2. Left\n  - _depends_on: 1_\n- [ ] 3. Right\n  - _depends_on: 1_\n- [ ] 4. Join\n  - _depends_on: 2, 3_";
        let tasks = parse(content);

        let waves: Vec<_> = parallel_waves(&tasks).iter().map(|w| ids(w)).collect();
        assert_eq!(waves, vec![vec!["1"], vec!["2", "3"], vec!["4"]]);
    }

    #[test]
    fn waves_for_fan_in() {
        let tasks = parse("- [ ] 1. A\n- [ ] 2. B\n- [ ] 3. C\n  - _depends_on: 1, 2_");

        let waves: Vec<_> = parallel_waves(&tasks).iter().map(|w| ids(w)).collect();
        assert_eq!(waves, vec![vec!["1", "2"], vec!["3"]]);
    }

    #[test]
    fn empty_input_gives_empty_results() {
        let tasks = parse("");

        assert!(executable_tasks(&tasks).is_empty());
        assert!(topological_order(&tasks).is_empty());
        assert!(parallel_waves(&tasks).is_empty());
    }

    #[test]
    fn all_completed_gives_no_waves() {
        let tasks = parse("- [x] 1. A\n- [x] 2. B");

        assert!(executable_tasks(&tasks).is_empty());
        assert!(parallel_waves(&tasks).is_empty());
        assert_eq!(topological_order(&tasks).len(), 2);
    }

    #[test]
    fn subtasks_are_not_scheduled() {
        let tasks = parse("- [ ] 1. Main\n  - [ ] 1.1 Sub\n  - [ ] 1.2 Sub");

        assert_eq!(ids(&topological_order(&tasks)), vec!["1"]);
        assert_eq!(ids(&executable_tasks(&tasks)), vec!["1"]);
    }
}
