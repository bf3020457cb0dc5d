//! Stable topological sorter.

use super::types::{Anchor, CycleError, Placement, SortError};
use indexmap::IndexMap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A registered value with its constraints.
#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    placement: Placement,
}

/// Orders named values under `before` / `after` constraints.
///
/// The result is a linear extension of the constraint graph. Whenever more
/// than one node is ready, the one registered earliest is emitted next, so
/// unconstrained nodes keep their registration order and the output is
/// reproducible for a given registration sequence.
///
/// Constraints naming an unregistered node are ignored at sort time. This
/// lets independently loaded extensions register ordering hints against
/// nodes that may never show up.
///
/// # Examples
///
/// ```
/// use u_predicate::sorter::{Placement, TopologicalSorter};
///
/// let mut sorter = TopologicalSorter::new();
/// sorter.add("b", 2, Placement::new()).unwrap();
/// sorter.add("a", 1, Placement::new().before("b")).unwrap();
/// sorter.add("c", 3, Placement::new()).unwrap();
///
/// let names: Vec<&str> = sorter.sorted().unwrap().into_iter().map(|(n, _)| n).collect();
/// assert_eq!(names, vec!["a", "b", "c"]);
/// ```
///
/// # References
///
/// Kahn (1962), "Topological sorting of large networks"
#[derive(Debug, Clone)]
pub struct TopologicalSorter<T> {
    nodes: IndexMap<String, Node<T>>,
}

impl<T> TopologicalSorter<T> {
    /// Creates an empty sorter.
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
        }
    }

    /// Registers `value` under `name`.
    ///
    /// Fails without modifying the sorter if `name` is already taken.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        value: T,
        placement: Placement,
    ) -> Result<(), SortError> {
        let name = name.into();
        if self.nodes.contains_key(&name) {
            return Err(SortError::DuplicateName(name));
        }
        tracing::trace!(
            name = %name,
            before = placement.before.len(),
            after = placement.after.len(),
            "registered node"
        );
        self.nodes.insert(name, Node { value, placement });
        Ok(())
    }

    /// Removes a node, returning its value.
    ///
    /// Constraints other nodes hold against `name` become no-ops.
    pub fn remove(&mut self, name: &str) -> Option<T> {
        self.nodes.shift_remove(name).map(|node| node.value)
    }

    /// Returns the value registered under `name`.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.nodes.get(name).map(|node| &node.value)
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.nodes.keys().map(String::as_str).collect()
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Computes the total order.
    ///
    /// Ranks are assigned as `FIRST = 0`, nodes `1..=n` in registration
    /// order, `LAST = n + 1`; the ready set is a min-heap on rank. Only
    /// unconstrained nodes are placed between the sentinels; a node with
    /// any constraint is placed by its constraints alone.
    pub fn sorted(&self) -> Result<Vec<(&str, &T)>, CycleError> {
        let n = self.nodes.len();
        let first = 0;
        let last = n + 1;
        let total = n + 2;

        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); total];
        let mut in_degree: Vec<usize> = vec![0; total];
        let mut add_edge = |from: usize, to: usize| {
            successors[from].push(to);
            in_degree[to] += 1;
        };

        add_edge(first, last);

        for (idx, (name, node)) in self.nodes.iter().enumerate() {
            let rank = idx + 1;
            for anchor in &node.placement.before {
                if let Some(target) = self.resolve(name, anchor) {
                    add_edge(rank, target);
                }
            }
            for anchor in &node.placement.after {
                if let Some(source) = self.resolve(name, anchor) {
                    add_edge(source, rank);
                }
            }
            if node.placement.is_unconstrained() {
                add_edge(first, rank);
                add_edge(rank, last);
            }
        }

        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree == 0)
            .map(|(rank, _)| Reverse(rank))
            .collect();

        let mut emitted: Vec<usize> = Vec::with_capacity(total);
        while let Some(Reverse(rank)) = ready.pop() {
            emitted.push(rank);
            for &next in &successors[rank] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.push(Reverse(next));
                }
            }
        }

        if emitted.len() != total {
            return Err(self.cycle_error(&successors, &emitted));
        }

        Ok(emitted
            .into_iter()
            .filter(|&rank| rank != first && rank != last)
            .filter_map(|rank| self.nodes.get_index(rank - 1))
            .map(|(name, node)| (name.as_str(), &node.value))
            .collect())
    }

    /// Maps an anchor to a rank, or `None` for an unknown name.
    fn resolve(&self, owner: &str, anchor: &Anchor) -> Option<usize> {
        match anchor {
            Anchor::First => Some(0),
            Anchor::Last => Some(self.nodes.len() + 1),
            Anchor::Name(target) => {
                let rank = self.nodes.get_index_of(target.as_str()).map(|i| i + 1);
                if rank.is_none() {
                    tracing::debug!(
                        node = owner,
                        target = %target,
                        "ignoring constraint on unregistered node"
                    );
                }
                rank
            }
        }
    }

    fn label(&self, rank: usize) -> String {
        if rank == 0 {
            Anchor::First.to_string()
        } else if rank == self.nodes.len() + 1 {
            Anchor::Last.to_string()
        } else {
            self.nodes
                .get_index(rank - 1)
                .map(|(name, _)| name.clone())
                .unwrap_or_default()
        }
    }

    /// Builds the error from the ranks left over after sorting.
    ///
    /// Leftover sinks are stripped repeatedly; what survives lies on a cycle.
    fn cycle_error(&self, successors: &[Vec<usize>], emitted: &[usize]) -> CycleError {
        let mut remaining = vec![true; successors.len()];
        for &rank in emitted {
            remaining[rank] = false;
        }

        loop {
            let sinks: Vec<usize> = (0..successors.len())
                .filter(|&r| remaining[r] && !successors[r].iter().any(|&s| remaining[s]))
                .collect();
            if sinks.is_empty() {
                break;
            }
            for r in sinks {
                remaining[r] = false;
            }
        }

        let dependencies = (0..successors.len())
            .filter(|&r| remaining[r])
            .map(|r| {
                let mut after: Vec<usize> = successors[r]
                    .iter()
                    .copied()
                    .filter(|&s| remaining[s])
                    .collect();
                after.sort_unstable();
                after.dedup();
                (
                    self.label(r),
                    after.into_iter().map(|s| self.label(s)).collect(),
                )
            })
            .collect();

        CycleError::new(dependencies)
    }
}

impl<T> Default for TopologicalSorter<T> {
    fn default() -> Self {
        Self::new()
    }
}
