// src/graph/contig.rs
use tracing::info;

use crate::graph::store::{DeBruijnGraph, EdgeId, NodeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contig {
    pub id: usize,
    pub sequence: String,
    /// Edge path through the graph the contig was spelled from
    pub path: Vec<EdgeId>,
}

impl Contig {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// A node where a non-branching chain starts or stops: anything that is not
/// one-in/one-out, provided it has somewhere to go.
pub fn is_junction(graph: &DeBruijnGraph, node: NodeId) -> bool {
    !graph.one_in_one_out(node) && graph.outdegree(node) > 0
}

pub fn junctions(graph: &DeBruijnGraph) -> Vec<NodeId> {
    graph.nodes().filter(|&n| is_junction(graph, n)).collect()
}

/// Follow `first` forward through one-in/one-out nodes and return the
/// maximal chain. Stops at the first node that branches, merges or ends.
pub fn extend_chain(graph: &DeBruijnGraph, first: EdgeId) -> Vec<EdgeId> {
    let mut path = vec![first];
    let mut current = graph.edge(first).to();

    while graph.one_in_one_out(current) {
        let next = graph.outgoing(current)[0];
        // closed loop of one-in/one-out nodes
        if next == first {
            break;
        }
        path.push(next);
        current = graph.edge(next).to();
    }

    path
}

/// Extract every maximal non-branching path, sorted by sequence.
pub fn find_contigs(graph: &DeBruijnGraph) -> Vec<Contig> {
    let starts = junctions(graph);
    info!("#find_contigs - Found {} valid nodes", starts.len());

    let mut contigs: Vec<Contig> = starts
        .iter()
        .flat_map(|&node| graph.outgoing(node).iter().copied())
        .map(|edge| {
            let path = extend_chain(graph, edge);
            Contig {
                id: 0,
                sequence: graph.spell(&path),
                path,
            }
        })
        .collect();

    contigs.sort_by(|a, b| a.sequence.cmp(&b.sequence));
    for (id, contig) in contigs.iter_mut().enumerate() {
        contig.id = id;
    }

    contigs
}

pub fn contig_sequences(contigs: &[Contig]) -> Vec<String> {
    contigs.iter().map(|c| c.sequence.clone()).collect()
}
