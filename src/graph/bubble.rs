// src/graph/bubble.rs
use tracing::{debug, info};

use crate::graph::contig::extend_chain;
use crate::graph::store::{DeBruijnGraph, EdgeId, NodeId};

/// Summary of one bubble-pruning pass
#[derive(Debug, Clone, Default)]
pub struct PruneReport {
    pub candidates: usize,
    pub branches_removed: usize,
    pub nodes_removed: usize,
    pub edges_removed: usize,
    /// Spelled sequences of the removed branches, in removal order
    pub removed: Vec<String>,
}

/// Nodes reached by fewer paths than they branch into.
pub fn bubble_candidates(graph: &DeBruijnGraph) -> Vec<NodeId> {
    graph
        .nodes()
        .filter(|&n| {
            let indegree = graph.indegree(n);
            indegree < graph.outdegree(n) && indegree > 0
        })
        .collect()
}

/// Outgoing edges of `node` whose weight is strictly below the heaviest one.
/// Edges tied at the maximum are never returned.
pub fn weaker_branches(graph: &DeBruijnGraph, node: NodeId) -> Vec<EdgeId> {
    let outgoing = graph.outgoing(node);
    let Some(max_weight) = outgoing.iter().map(|&e| graph.edge(e).weight()).max() else {
        return Vec::new();
    };

    outgoing
        .iter()
        .copied()
        .filter(|&e| graph.edge(e).weight() != max_weight)
        .collect()
}

/// Remove low-weight alternate branches from every bubble candidate.
///
/// Candidates are collected before the first removal; each weaker branch is
/// extended through its one-in/one-out chain and dropped with
/// [`DeBruijnGraph::remove_path`].
pub fn prune_bubbles(graph: &mut DeBruijnGraph) -> PruneReport {
    let candidates = bubble_candidates(graph);
    let total = candidates.len();
    info!("Found {} Bubbles", total);

    let mut report = PruneReport {
        candidates: total,
        ..PruneReport::default()
    };

    for (index, &node) in candidates.iter().enumerate() {
        if !graph.contains_node(node) {
            continue;
        }
        if graph.outdegree(node) > 2 {
            debug!("Found super linked node {}", graph.label(node));
        }

        for edge in weaker_branches(graph, node) {
            if !graph.contains_edge(edge) {
                continue;
            }

            let path = extend_chain(graph, edge);
            let sequence = graph.spell(&path);
            let nodes_before = graph.node_count();
            let edges_before = graph.edge_count();

            graph.remove_path(&path);

            report.branches_removed += 1;
            report.nodes_removed += nodes_before - graph.node_count();
            report.edges_removed += edges_before - graph.edge_count();
            debug!("Removing bubble ({} of {}): {}", index + 1, total, sequence);
            report.removed.push(sequence);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_weighted(graph: &mut DeBruijnGraph, from: &str, to: &str, weight: u32) {
        let a = graph.add_node(from);
        let b = graph.add_node(to);
        for _ in 0..weight {
            graph.add_edge(a, b);
        }
    }

    #[test]
    fn test_candidates_need_an_incoming_edge() {
        let mut graph = DeBruijnGraph::new();
        add_weighted(&mut graph, "X", "Y", 1);
        add_weighted(&mut graph, "X", "Z", 1);
        assert!(bubble_candidates(&graph).is_empty());

        add_weighted(&mut graph, "W", "X", 1);
        let x = graph.find_node("X").unwrap();
        assert_eq!(bubble_candidates(&graph), vec![x]);
    }

    #[test]
    fn test_weaker_branches_ignores_ties() {
        let mut graph = DeBruijnGraph::new();
        add_weighted(&mut graph, "X", "Y", 2);
        add_weighted(&mut graph, "X", "Z", 2);
        add_weighted(&mut graph, "X", "Q", 1);

        let x = graph.find_node("X").unwrap();
        let weaker = weaker_branches(&graph, x);
        assert_eq!(weaker.len(), 1);
        assert_eq!(graph.label(graph.edge(weaker[0]).to()), "Q");
    }
}
