//! Dependency graph for tasks
//!
//! One node per main task, in document order, with an edge
//! `dependency -> dependent` for every resolvable `depends_on` entry.
//! Uses petgraph for graph operations.
//!
//! Dependencies naming an id that no main task carries are dropped while
//! building the graph, which makes them count as satisfied everywhere.

use std::collections::{BTreeSet, HashMap};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use super::task::Task;

/// A dependency graph over a parsed task list
#[derive(Debug)]
pub struct DependencyGraph<'a> {
    /// Node weights index into `tasks`
    graph: DiGraph<usize, ()>,

    tasks: &'a [Task],

    /// Map from task id to every node carrying it
    node_map: HashMap<&'a str, Vec<NodeIndex>>,
}

impl<'a> DependencyGraph<'a> {
    /// Builds a graph from main tasks
    pub fn from_tasks(tasks: &'a [Task]) -> Self {
        let mut graph = DiGraph::with_capacity(tasks.len(), tasks.len());
        let mut node_map: HashMap<&'a str, Vec<NodeIndex>> = HashMap::new();

        // First pass: add all nodes
        for (pos, task) in tasks.iter().enumerate() {
            let idx = graph.add_node(pos);
            node_map.entry(task.id()).or_default().push(idx);
        }

        // Second pass: add all edges
        for (pos, task) in tasks.iter().enumerate() {
            let task_idx = NodeIndex::new(pos);
            for dep_id in task.depends_on() {
                let Some(dep_nodes) = node_map.get(dep_id.as_str()) else {
                    continue;
                };
                for dep_idx in dep_nodes {
                    // update_edge keeps repeated dependencies to a single edge
                    graph.update_edge(*dep_idx, task_idx, ());
                }
            }
        }

        Self {
            graph,
            tasks,
            node_map,
        }
    }

    fn task(&self, idx: NodeIndex) -> &'a Task {
        &self.tasks[self.graph[idx]]
    }

    /// Returns the direct dependencies of the task at `pos`
    pub fn dependencies(&self, pos: usize) -> Vec<&'a Task> {
        self.neighbors(pos, Direction::Incoming)
    }

    /// Returns the direct dependents of the task at `pos`
    pub fn dependents(&self, pos: usize) -> Vec<&'a Task> {
        self.neighbors(pos, Direction::Outgoing)
    }

    fn neighbors(&self, pos: usize, dir: Direction) -> Vec<&'a Task> {
        if pos >= self.tasks.len() {
            return vec![];
        }

        let mut found: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(NodeIndex::new(pos), dir)
            .collect();
        found.sort();
        found.into_iter().map(|idx| self.task(idx)).collect()
    }

    /// Returns true if some main task carries `id`
    pub fn contains(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    /// Returns the number of tasks in the graph
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns true if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Ids that occur on more than one main task, sorted
    pub fn duplicate_ids(&self) -> Vec<&'a str> {
        let mut dups: Vec<&'a str> = self
            .node_map
            .iter()
            .filter(|(_, nodes)| nodes.len() > 1)
            .map(|(id, _)| *id)
            .collect();
        dups.sort_unstable();
        dups
    }

    /// Returns tasks that are not completed and whose dependencies are all
    /// completed, in document order
    pub fn ready_tasks(&self) -> Vec<&'a Task> {
        self.graph
            .node_indices()
            .filter(|idx| {
                let task = self.task(*idx);
                !task.is_completed()
                    && self
                        .graph
                        .neighbors_directed(*idx, Direction::Incoming)
                        .all(|dep| self.task(dep).is_completed())
            })
            .map(|idx| self.task(idx))
            .collect()
    }

    /// Returns tasks in topological order (dependencies before dependents)
    ///
    /// Kahn's algorithm. Among ready tasks the smallest id string goes
    /// first, document position breaking ties. Tasks on or behind a cycle
    /// never become ready and are left out.
    pub fn topological_order(&self) -> Vec<&'a Task> {
        let mut in_degree: Vec<usize> = self
            .graph
            .node_indices()
            .map(|idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .count()
            })
            .collect();

        let mut ready: BTreeSet<(&'a str, NodeIndex)> = self
            .graph
            .node_indices()
            .filter(|idx| in_degree[idx.index()] == 0)
            .map(|idx| (self.task(idx).id(), idx))
            .collect();

        let mut order = Vec::with_capacity(self.len());

        while let Some((_, current)) = ready.pop_first() {
            order.push(self.task(current));

            for dependent in self.graph.neighbors_directed(current, Direction::Outgoing) {
                let degree = &mut in_degree[dependent.index()];
                *degree -= 1;
                if *degree == 0 {
                    ready.insert((self.task(dependent).id(), dependent));
                }
            }
        }

        order
    }

    /// Groups incomplete tasks into waves that can run in parallel
    ///
    /// Completed tasks count as already placed. Each wave holds every
    /// remaining task whose dependencies are all placed; building stops when
    /// a pass places nothing.
    pub fn parallel_waves(&self) -> Vec<Vec<&'a Task>> {
        let mut placed: Vec<bool> = self.tasks.iter().map(Task::is_completed).collect();
        let mut remaining: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|idx| !placed[idx.index()])
            .collect();

        let mut waves = Vec::new();

        while !remaining.is_empty() {
            let (wave, blocked): (Vec<NodeIndex>, Vec<NodeIndex>) =
                remaining.into_iter().partition(|idx| {
                    self.graph
                        .neighbors_directed(*idx, Direction::Incoming)
                        .all(|dep| placed[dep.index()])
                });

            if wave.is_empty() {
                // Cycle or dependency on a task stuck in one
                break;
            }

            for idx in &wave {
                placed[idx.index()] = true;
            }
            waves.push(wave.into_iter().map(|idx| self.task(idx)).collect());
            remaining = blocked;
        }

        waves
    }

    /// Returns each dependency cycle as its member tasks in document order
    ///
    /// A cycle is a strongly connected component with more than one task,
    /// or a single task that depends on itself.
    pub fn cycles(&self) -> Vec<Vec<&'a Task>> {
        let mut cycles: Vec<Vec<NodeIndex>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| match scc.as_slice() {
                [single] => self.graph.find_edge(*single, *single).is_some(),
                _ => true,
            })
            .map(|mut scc| {
                scc.sort();
                scc
            })
            .collect();
        cycles.sort();

        cycles
            .into_iter()
            .map(|scc| scc.into_iter().map(|idx| self.task(idx)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id().to_string()).collect()
    }

    fn task(id: &str, deps: &[&str]) -> Task {
        Task::new(id, format!("Task {}", id), false).with_dependencies(deps.iter().copied())
    }

    fn done(id: &str, deps: &[&str]) -> Task {
        Task::new(id, format!("Task {}", id), true).with_dependencies(deps.iter().copied())
    }

    #[test]
    fn empty_graph() {
        let graph = DependencyGraph::from_tasks(&[]);
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
        assert!(graph.topological_order().is_empty());
        assert!(graph.parallel_waves().is_empty());
        assert!(graph.ready_tasks().is_empty());
        assert!(graph.cycles().is_empty());
    }

    #[test]
    fn dependencies_and_dependents() {
        let tasks = vec![task("1", &[]), task("2", &["1"]), task("3", &["1", "2"])];
        let graph = DependencyGraph::from_tasks(&tasks);

        assert_eq!(graph.len(), 3);
        assert!(graph.contains("2"));
        assert!(!graph.contains("9"));
        assert_eq!(ids(&graph.dependencies(2)), vec!["1", "2"]);
        assert_eq!(ids(&graph.dependents(0)), vec!["2", "3"]);
        assert!(graph.dependencies(7).is_empty());
    }

    #[test]
    fn unknown_and_repeated_dependencies_add_no_edges() {
        let tasks = vec![task("1", &[]), task("2", &["1", "1", "missing"])];
        let graph = DependencyGraph::from_tasks(&tasks);

        assert_eq!(ids(&graph.dependencies(1)), vec!["1"]);
    }

    #[test]
    fn ready_tasks() {
        let tasks = vec![done("1", &[]), task("2", &["1"]), task("3", &["2"]), task("4", &[])];
        let graph = DependencyGraph::from_tasks(&tasks);

        assert_eq!(ids(&graph.ready_tasks()), vec!["2", "4"]);
    }

    #[test]
    fn topological_order() {
        // 3 -> 2 -> 1 (1 depends on 2, 2 depends on 3)
        let tasks = vec![task("1", &["2"]), task("2", &["3"]), task("3", &[])];
        let graph = DependencyGraph::from_tasks(&tasks);

        assert_eq!(ids(&graph.topological_order()), vec!["3", "2", "1"]);
    }

    #[test]
    fn topological_ties_break_lexically() {
        let tasks = vec![task("2", &[]), task("10", &[]), task("1", &[])];
        let graph = DependencyGraph::from_tasks(&tasks);

        assert_eq!(ids(&graph.topological_order()), vec!["1", "10", "2"]);
    }

    #[test]
    fn topological_order_omits_cycles() {
        let tasks = vec![
            task("1", &[]),
            task("2", &["3"]),
            task("3", &["2"]),
            task("4", &["2"]),
            task("5", &["5"]),
        ];
        let graph = DependencyGraph::from_tasks(&tasks);

        assert_eq!(ids(&graph.topological_order()), vec!["1"]);
    }

    #[test]
    fn parallel_waves() {
        let tasks = vec![task("1", &[]), task("2", &[]), task("3", &["1", "2"])];
        let graph = DependencyGraph::from_tasks(&tasks);

        let waves: Vec<_> = graph.parallel_waves().iter().map(|w| ids(w)).collect();
        assert_eq!(waves, vec![vec!["1", "2"], vec!["3"]]);
    }

    #[test]
    fn waves_skip_completed_and_stop_at_cycles() {
        let tasks = vec![
            done("1", &[]),
            task("2", &["1"]),
            task("3", &["4"]),
            task("4", &["3"]),
            task("5", &["2"]),
        ];
        let graph = DependencyGraph::from_tasks(&tasks);

        let waves: Vec<_> = graph.parallel_waves().iter().map(|w| ids(w)).collect();
        assert_eq!(waves, vec![vec!["2"], vec!["5"]]);
    }

    #[test]
    fn cycles_are_reported_in_document_order() {
        let tasks = vec![
            task("1", &["3"]),
            task("2", &[]),
            task("3", &["1"]),
            task("4", &["4"]),
        ];
        let graph = DependencyGraph::from_tasks(&tasks);

        let cycles: Vec<_> = graph.cycles().iter().map(|c| ids(c)).collect();
        assert_eq!(cycles, vec![vec!["1", "3"], vec!["4"]]);
    }

    #[test]
    fn duplicate_ids_resolve_to_every_carrier() {
        let tasks = vec![done("1", &[]), task("1", &[]), task("2", &["1"])];
        let graph = DependencyGraph::from_tasks(&tasks);

        assert_eq!(graph.duplicate_ids(), vec!["1"]);
        assert_eq!(graph.dependencies(2).len(), 2);
        // The incomplete "1" still blocks "2"
        assert_eq!(ids(&graph.ready_tasks()), vec!["1"]);
    }

    #[test]
    fn performance_500_tasks() {
        use std::time::Instant;

        let tasks: Vec<Task> = (1..=500)
            .map(|i| {
                let t = Task::new(i.to_string(), format!("Task {}", i), false);
                if i > 1 {
                    t.with_dependency((i - 1).to_string())
                } else {
                    t
                }
            })
            .collect();

        let start = Instant::now();
        let graph = DependencyGraph::from_tasks(&tasks);
        let order = graph.topological_order();
        let waves = graph.parallel_waves();
        let duration = start.elapsed();

        assert_eq!(order.len(), 500);
        assert_eq!(waves.len(), 500);
        assert!(duration.as_millis() < 2000, "Scheduling took {:?}", duration);
    }
}
