//! Bounded breadth-first exploration of a kinetic network.

use crate::classify::NodeClassifier;
use kinemeter_api::{Direction, ExplorationBudget, GridPos, NetworkSnapshot, Node, SpatialLookup};
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Bookkeeping from a single exploration run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExplorationStats {
    /// Nodes classified and folded into the snapshot.
    pub visited: u32,
    /// `node_at` calls issued against the lookup.
    pub lookups: u32,
    /// The budget stopped the traversal while nodes were still queued.
    pub truncated: bool,
}

#[derive(Debug, Clone, Default)]
pub struct NetworkExplorer {
    classifier: NodeClassifier,
}

impl NetworkExplorer {
    pub fn new(classifier: NodeClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &NodeClassifier {
        &self.classifier
    }

    pub fn explore(
        &self,
        origin: &Node,
        budget: ExplorationBudget,
        lookup: &dyn SpatialLookup,
    ) -> NetworkSnapshot {
        self.explore_with_stats(origin, budget, lookup).0
    }

    /// Resolves `origin` once and explores from there. An empty position yields
    /// [`NetworkSnapshot::empty`].
    pub fn explore_at(
        &self,
        origin: GridPos,
        budget: ExplorationBudget,
        lookup: &dyn SpatialLookup,
    ) -> NetworkSnapshot {
        match lookup.node_at(origin) {
            Some(node) => self.explore(&node, budget, lookup),
            None => NetworkSnapshot::empty(),
        }
    }

    /// Visits at most `budget.max_nodes` nodes and issues at most six lookups per visited node.
    pub fn explore_with_stats(
        &self,
        origin: &Node,
        budget: ExplorationBudget,
        lookup: &dyn SpatialLookup,
    ) -> (NetworkSnapshot, ExplorationStats) {
        let max_nodes = budget.max_nodes.max(1);
        let mut snapshot = NetworkSnapshot::empty();
        let mut stats = ExplorationStats::default();

        let mut visited: HashSet<GridPos> = HashSet::new();
        let mut queue: VecDeque<Node> = VecDeque::new();
        visited.insert(origin.pos);
        queue.push_back(origin.clone());

        while let Some(current) = queue.pop_front() {
            snapshot.accumulate(self.classifier.classify(&current));
            stats.visited += 1;

            if snapshot.node_count >= max_nodes {
                let truncated =
                    !queue.is_empty() || has_unvisited_node(&current, &visited, lookup, &mut stats);
                stats.truncated = truncated;
                break;
            }

            for dir in Direction::ALL {
                let next = lookup.neighbor(current.pos, dir);
                // Marked before the lookup so cyclic adjacency never re-enqueues a cell.
                if !visited.insert(next) {
                    continue;
                }
                stats.lookups += 1;
                if let Some(node) = lookup.node_at(next) {
                    queue.push_back(node);
                }
            }
        }

        if stats.truncated {
            debug!(
                max_nodes,
                origin = %origin.pos,
                "exploration capped by node budget"
            );
        }

        (snapshot, stats)
    }
}

/// Probes the neighbours of the last visited node so truncation is reported even when the queue
/// happened to be empty. Stays within the six-lookups-per-node bound.
fn has_unvisited_node(
    node: &Node,
    visited: &HashSet<GridPos>,
    lookup: &dyn SpatialLookup,
    stats: &mut ExplorationStats,
) -> bool {
    Direction::ALL.into_iter().any(|dir| {
        let next = lookup.neighbor(node.pos, dir);
        if visited.contains(&next) {
            return false;
        }
        stats.lookups += 1;
        lookup.node_at(next).is_some()
    })
}
