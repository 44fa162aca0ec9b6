use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Write as _;

use crate::license::table::RelationTable;

/// Directed graph of license inclusion facts.
///
/// Every edge points from the narrower license to the wider one
/// (`inner -> outer`). The graph is filled once through
/// [`add_relationship`](Self::add_relationship) and then only queried.
#[derive(Debug, Default, Clone)]
pub struct RelationGraph {
    index: HashMap<String, usize>,
    labels: Vec<String>,
    successors: Vec<Vec<usize>>,
    predecessors: Vec<Vec<usize>>,
    /// Stored edges in insertion order, as `(from, to)`.
    edges: Vec<(usize, usize)>,
    edge_set: HashSet<(usize, usize)>,
}

/// Traversal direction for [`RelationGraph::reachable_count`].
#[derive(Debug, Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

/// The running selection of [`RelationGraph::estimate_most_strong_node`].
enum Selection<'a> {
    Known {
        id: &'a str,
        ancestors: usize,
        descendants: usize,
    },
    Unknown(&'a str),
}

impl RelationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph by applying every pair of `table`, in order.
    pub fn from_table(table: &RelationTable) -> Self {
        let mut graph = Self::new();
        for (outer, inner) in table.pairs() {
            graph.add_relationship(outer, inner);
        }
        graph
    }

    /// Record that `inner` is contained in `outer`.
    ///
    /// The stored edge runs `inner -> outer`, the reverse of the argument
    /// order. Repeating a call adds nothing.
    pub fn add_relationship(&mut self, outer: &str, inner: &str) {
        let from = self.intern(inner);
        let to = self.intern(outer);
        if self.edge_set.insert((from, to)) {
            self.edges.push((from, to));
            self.successors[from].push(to);
            self.predecessors[to].push(from);
        }
    }

    fn intern(&mut self, id: &str) -> usize {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.labels.len();
        self.index.insert(id.to_string(), idx);
        self.labels.push(id.to_string());
        self.successors.push(Vec::new());
        self.predecessors.push(Vec::new());
        idx
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether `inner` is subsumed by `outer`: a path runs from `outer` to
    /// `inner`. Unknown identifiers are never included in anything.
    pub fn is_included(&self, inner: &str, outer: &str) -> bool {
        let (Some(&target), Some(&start)) = (self.index.get(inner), self.index.get(outer)) else {
            return false;
        };
        if start == target {
            return true;
        }

        let mut visited = vec![false; self.labels.len()];
        let mut queue = VecDeque::from([start]);
        visited[start] = true;
        while let Some(node) = queue.pop_front() {
            for &next in &self.successors[node] {
                if next == target {
                    return true;
                }
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
        false
    }

    /// Number of distinct nodes reachable from `start` in `direction`,
    /// excluding `start` itself.
    fn reachable_count(&self, start: usize, direction: Direction) -> usize {
        let adjacency = match direction {
            Direction::Forward => &self.successors,
            Direction::Backward => &self.predecessors,
        };

        let mut visited = vec![false; self.labels.len()];
        let mut queue = VecDeque::from([start]);
        visited[start] = true;
        let mut count = 0;
        while let Some(node) = queue.pop_front() {
            for &next in &adjacency[node] {
                if !visited[next] {
                    visited[next] = true;
                    if next != start {
                        count += 1;
                    }
                    queue.push_back(next);
                }
            }
        }
        count
    }

    /// Number of nodes with a path to `id`, or `None` if `id` is unknown.
    pub fn ancestor_count(&self, id: &str) -> Option<usize> {
        let idx = *self.index.get(id)?;
        Some(self.reachable_count(idx, Direction::Backward))
    }

    /// Number of nodes reachable from `id`, or `None` if `id` is unknown.
    pub fn descendant_count(&self, id: &str) -> Option<usize> {
        let idx = *self.index.get(id)?;
        Some(self.reachable_count(idx, Direction::Forward))
    }

    /// Pick the most restrictive license among `candidates`.
    ///
    /// A candidate the graph does not know always takes over the selection,
    /// and a known candidate never displaces such an unknown one. Between
    /// known candidates, fewer ancestors wins, then fewer descendants.
    pub fn estimate_most_strong_node<'a, I>(&self, candidates: I) -> Option<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut selection: Option<Selection<'a>> = None;

        for id in candidates {
            let (Some(ancestors), Some(descendants)) =
                (self.ancestor_count(id), self.descendant_count(id))
            else {
                tracing::debug!(license = id, "candidate is not in the relation graph");
                selection = Some(Selection::Unknown(id));
                continue;
            };

            let replace = match &selection {
                None => true,
                Some(Selection::Unknown(_)) => false,
                Some(Selection::Known {
                    ancestors: held_ancestors,
                    descendants: held_descendants,
                    ..
                }) => {
                    ancestors < *held_ancestors
                        || (ancestors == *held_ancestors && descendants < *held_descendants)
                }
            };

            if replace {
                selection = Some(Selection::Known {
                    id,
                    ancestors,
                    descendants,
                });
            }
        }

        selection.map(|s| match s {
            Selection::Known { id, .. } | Selection::Unknown(id) => id.to_string(),
        })
    }

    /// Render every stored edge as a Mermaid flowchart line, wider license
    /// first.
    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("graph TD");
        for &(from, to) in &self.edges {
            let inner = &self.labels[from];
            let outer = &self.labels[to];
            let _ = write!(
                out,
                "\n    {}(\"{}\") --> {}(\"{}\")",
                node_id(outer),
                outer,
                node_id(inner),
                inner
            );
        }
        out
    }
}

/// Mermaid-safe node id for a license identifier.
pub fn node_id(label: &str) -> String {
    label.replace(['-', '.', ' '], "_")
}
