// src/graph/eulerian.rs
//! Randomized Eulerian walk with backtracking.
//!
//! The walk is a single depth-first pass. At each step it prefers an
//! unconsumed outgoing edge whose destination has not been walked yet, and
//! only when none is left takes any unconsumed edge (that is how a closed
//! circuit gets back to its start). When it strands itself before every edge
//! is consumed it picks a random walked node, unwinds the tail of the walk
//! back to it and carries on from there. Unwinding past the start fails the
//! starting node; the search then moves on to the next candidate.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::{AssemblyError, Result};
use crate::graph::store::{DeBruijnGraph, EdgeId, NodeId};

pub const DEFAULT_MAX_BACKTRACKS: usize = 10_000;

/// Start/end classification by degree imbalance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartCandidates {
    /// Nodes with `outdegree == indegree + 1`
    pub starts: Vec<NodeId>,
    /// Nodes with `indegree == outdegree + 1`
    pub ends: Vec<NodeId>,
}

pub fn classify_nodes(graph: &DeBruijnGraph) -> StartCandidates {
    let mut candidates = StartCandidates::default();
    for node in graph.nodes() {
        let indegree = graph.indegree(node);
        let outdegree = graph.outdegree(node);
        if outdegree == indegree + 1 {
            candidates.starts.push(node);
        } else if indegree == outdegree + 1 {
            candidates.ends.push(node);
        }
    }
    candidates
}

/// Longest walk recorded before a starting node was abandoned.
#[derive(Debug, Clone)]
pub struct PartialPath {
    pub count: usize,
    pub path: Vec<EdgeId>,
    pub starting_node: NodeId,
}

/// A walk that consumed every edge of the graph exactly once.
#[derive(Debug, Clone)]
pub struct EulerianTrail {
    pub edges: Vec<EdgeId>,
    pub start: NodeId,
    pub backtracks: usize,
}

impl EulerianTrail {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn spell(&self, graph: &DeBruijnGraph) -> String {
        graph.spell(&self.edges)
    }

    /// Every live node label occurs somewhere in the spelled sequence.
    pub fn covers_all_nodes(&self, graph: &DeBruijnGraph) -> bool {
        let sequence = self.spell(graph);
        graph.node_count() > 0 && graph.nodes().all(|n| sequence.contains(graph.label(n)))
    }
}

/// Searches for an Eulerian trail, trying each path-start candidate in turn.
pub struct EulerianPathFinder<R: Rng> {
    rng: R,
    max_backtracks: usize,
    partial_paths: Vec<PartialPath>,
    /// How many edges in the current walk end at each node
    arrivals: Vec<u32>,
    consumed: usize,
    start: Option<NodeId>,
}

impl<R: Rng> EulerianPathFinder<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            max_backtracks: DEFAULT_MAX_BACKTRACKS,
            partial_paths: Vec::new(),
            arrivals: Vec::new(),
            consumed: 0,
            start: None,
        }
    }

    /// Give up on a starting node after this many dead ends.
    pub fn with_max_backtracks(mut self, max_backtracks: usize) -> Self {
        self.max_backtracks = max_backtracks;
        self
    }

    /// Best partial paths recorded whenever backtracking exhausted a walk.
    pub fn partial_paths(&self) -> &[PartialPath] {
        &self.partial_paths
    }

    /// Find a trail using every live edge exactly once.
    ///
    /// Walked flags are left set on success so the caller can inspect them;
    /// they are cleared between failed starting nodes.
    pub fn find(&mut self, graph: &mut DeBruijnGraph) -> Result<EulerianTrail> {
        if graph.edge_count() == 0 {
            return Err(AssemblyError::EmptyGraph);
        }

        let candidates = classify_nodes(graph);
        if candidates.starts.len() > 1 {
            warn!("multiple starting nodes {}", candidates.starts.len());
        }

        let starts = if candidates.starts.is_empty() {
            info!("Choosing random starting node");
            // pruning can leave nodes with no edges; a walk cannot start there
            let nodes: Vec<NodeId> = graph.nodes().filter(|&n| graph.outdegree(n) > 0).collect();
            nodes.choose(&mut self.rng).copied().into_iter().collect()
        } else {
            candidates.starts
        };

        let total = starts.len();
        for (index, &start) in starts.iter().enumerate() {
            self.reset(graph);
            match self.try_walk(graph, start) {
                Ok(trail) => {
                    info!(
                        "Found Eulerian trail of {} edges from {} after {} backtracks",
                        trail.len(),
                        graph.label(start),
                        trail.backtracks
                    );
                    return Ok(trail);
                }
                Err(AssemblyError::BadStartingNode { .. }) => {
                    info!("Bad Starting Node {} of {}", index + 1, total);
                }
                Err(e) => return Err(e),
            }
        }

        self.reset(graph);
        Err(AssemblyError::NoEulerianCycle { candidates: total })
    }

    fn reset(&mut self, graph: &mut DeBruijnGraph) {
        graph.reset_walked();
        self.arrivals.clear();
        self.arrivals.resize(graph.nodes().map(|n| n.0 + 1).max().unwrap_or(0), 0);
        self.consumed = 0;
        self.start = None;
    }

    fn try_walk(&mut self, graph: &mut DeBruijnGraph, start: NodeId) -> Result<EulerianTrail> {
        let mut cycle: Vec<EdgeId> = Vec::new();
        let mut backtracks = 0;
        let mut current = start;

        self.start = Some(start);
        graph.set_node_walked(start, true);

        while self.consumed < graph.edge_count() {
            if let Some(edge) = self.sample_unwalked_edge(graph, current) {
                cycle.push(edge);
                current = self.walk(graph, edge);
                continue;
            }

            backtracks += 1;
            if backtracks > self.max_backtracks {
                debug!(
                    "Backtrack limit {} reached from {}",
                    self.max_backtracks,
                    graph.label(start)
                );
                return Err(AssemblyError::BadStartingNode { node: start });
            }

            let new_node = self.find_new_partial_node(graph).unwrap_or(start);

            let Some(mut last) = cycle.pop() else {
                return Err(AssemblyError::BadStartingNode { node: start });
            };
            self.unwalk(graph, last);

            // Edges popped after the first, newest first; reversed they are
            // the walk as it stood before unwinding.
            let mut popped: Vec<EdgeId> = Vec::new();
            while graph.edge(last).from() != new_node {
                let Some(edge) = cycle.pop() else {
                    popped.reverse();
                    self.record_partial_path(graph, popped, start);
                    return Err(AssemblyError::BadStartingNode { node: start });
                };
                self.unwalk(graph, edge);
                popped.push(edge);
                last = edge;
            }

            // new_node may have nothing left to take; the next iteration then
            // backtracks again.
            current = new_node;
        }

        Ok(EulerianTrail {
            edges: cycle,
            start,
            backtracks,
        })
    }

    /// Pick a random unconsumed outgoing edge, preferring ones that lead to
    /// a node the walk has not reached yet.
    fn sample_unwalked_edge(&mut self, graph: &DeBruijnGraph, node: NodeId) -> Option<EdgeId> {
        let unwalked: Vec<EdgeId> = graph
            .outgoing(node)
            .iter()
            .copied()
            .filter(|&e| !graph.edge(e).is_walked())
            .collect();

        let fresh: Vec<EdgeId> = unwalked
            .iter()
            .copied()
            .filter(|&e| !graph.node(graph.edge(e).to()).is_walked())
            .collect();

        fresh
            .choose(&mut self.rng)
            .or_else(|| unwalked.choose(&mut self.rng))
            .copied()
    }

    /// Any node the current walk has reached.
    fn find_new_partial_node(&mut self, graph: &DeBruijnGraph) -> Option<NodeId> {
        let walkable: Vec<NodeId> = graph.nodes().filter(|&n| graph.node(n).is_walked()).collect();
        walkable.choose(&mut self.rng).copied()
    }

    fn walk(&mut self, graph: &mut DeBruijnGraph, edge: EdgeId) -> NodeId {
        let to = graph.edge(edge).to();
        graph.set_edge_walked(edge, true);
        graph.set_node_walked(to, true);
        self.arrivals[to.0] += 1;
        self.consumed += 1;
        to
    }

    fn unwalk(&mut self, graph: &mut DeBruijnGraph, edge: EdgeId) {
        let to = graph.edge(edge).to();
        graph.set_edge_walked(edge, false);
        self.arrivals[to.0] -= 1;
        if self.arrivals[to.0] == 0 && self.start != Some(to) {
            graph.set_node_walked(to, false);
        }
        self.consumed -= 1;
    }

    fn record_partial_path(
        &mut self,
        graph: &DeBruijnGraph,
        path: Vec<EdgeId>,
        starting_node: NodeId,
    ) {
        let best = self.partial_paths.iter().map(|p| p.count).max().unwrap_or(0);
        if path.len() <= best {
            return;
        }

        debug!(
            "new best count path {}, total node count: {}, total edges count: {}",
            path.len(),
            graph.node_count(),
            graph.edge_count()
        );
        self.partial_paths.push(PartialPath {
            count: path.len(),
            path,
            starting_node,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_classify_linear_path() {
        let graph = DeBruijnGraph::from_kmers(&["ACG", "CGT"]).unwrap();
        let candidates = classify_nodes(&graph);
        assert_eq!(candidates.starts, vec![graph.find_node("AC").unwrap()]);
        assert_eq!(candidates.ends, vec![graph.find_node("GT").unwrap()]);
    }

    #[test]
    fn test_linear_path_has_no_backtracks() {
        let mut graph = DeBruijnGraph::from_kmers(&["ACG", "CGT", "GTA"]).unwrap();
        let mut finder = EulerianPathFinder::new(StdRng::seed_from_u64(7));
        let trail = finder.find(&mut graph).unwrap();

        assert_eq!(trail.len(), 3);
        assert_eq!(trail.backtracks, 0);
        assert_eq!(trail.spell(&graph), "ACGTA");
        assert!(trail.covers_all_nodes(&graph));
    }

    #[test]
    fn test_empty_graph_is_an_error() {
        let mut graph = DeBruijnGraph::new();
        let mut finder = EulerianPathFinder::new(StdRng::seed_from_u64(1));
        assert!(matches!(finder.find(&mut graph), Err(AssemblyError::EmptyGraph)));
    }

    #[test]
    fn test_two_sinks_never_succeed() {
        // AC -> CG -> GT and CG -> GA: no trail covers both sinks
        let mut graph = DeBruijnGraph::from_kmers(&["ACG", "CGT", "CGA"]).unwrap();
        let mut finder = EulerianPathFinder::new(StdRng::seed_from_u64(3)).with_max_backtracks(50);
        let result = finder.find(&mut graph);

        assert!(matches!(result, Err(AssemblyError::NoEulerianCycle { candidates: 1 })));
        assert!(graph.edge_ids().all(|e| !graph.edge(e).is_walked()));
    }

    #[test]
    fn test_sample_prefers_unwalked_destination() {
        let mut graph = DeBruijnGraph::new();
        let s = graph.add_node("S");
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let to_a = graph.add_edge(s, a);
        let to_b = graph.add_edge(s, b);
        graph.set_node_walked(s, true);
        graph.set_node_walked(a, true);

        for seed in 0..50 {
            let mut finder = EulerianPathFinder::new(StdRng::seed_from_u64(seed));
            assert_eq!(finder.sample_unwalked_edge(&graph, s), Some(to_b));
        }

        // every destination walked: any unconsumed edge will do
        graph.set_node_walked(b, true);
        let mut seen = Vec::new();
        for seed in 0..50 {
            let mut finder = EulerianPathFinder::new(StdRng::seed_from_u64(seed));
            let edge = finder.sample_unwalked_edge(&graph, s).unwrap();
            if !seen.contains(&edge) {
                seen.push(edge);
            }
        }
        seen.sort();
        assert_eq!(seen, vec![to_a, to_b]);

        graph.set_edge_walked(to_a, true);
        graph.set_edge_walked(to_b, true);
        let mut finder = EulerianPathFinder::new(StdRng::seed_from_u64(0));
        assert_eq!(finder.sample_unwalked_edge(&graph, s), None);
    }

    #[test]
    fn test_fallback_start_has_outgoing_edges() {
        // balanced 3-cycle plus a node left with no edges
        let mut graph = DeBruijnGraph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let c = graph.add_node("C");
        graph.add_node("T");
        graph.add_edge(a, b);
        graph.add_edge(b, c);
        graph.add_edge(c, a);

        for seed in 0..40 {
            let mut finder = EulerianPathFinder::new(StdRng::seed_from_u64(seed));
            let trail = finder.find(&mut graph).unwrap();
            assert_ne!(graph.label(trail.start), "T");
            assert_eq!(trail.len(), 3);
        }
    }
}
