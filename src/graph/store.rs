// src/graph/store.rs
use ahash::AHashMap;

use crate::error::{AssemblyError, Result};

/// Index of a node in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Index of an edge in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

/// Which adjacency index to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Edges leaving the node (out-degree)
    Outgoing,
    /// Edges entering the node (in-degree)
    Incoming,
}

/// A de Bruijn vertex: a (k-1)-mer label.
#[derive(Debug, Clone)]
pub struct Node {
    label: String,
    walked: bool,
    alive: bool,
}

impl Node {
    pub(crate) fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            walked: false,
            alive: true,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// All but the last character of the label
    pub fn prefix(&self) -> &str {
        &self.label[..self.label.len().saturating_sub(1)]
    }

    /// All but the first character of the label
    pub fn suffix(&self) -> &str {
        if self.label.is_empty() {
            ""
        } else {
            &self.label[1..]
        }
    }

    pub fn is_walked(&self) -> bool {
        self.walked
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

/// A directed k-mer transition. `weight` counts how many times the same
/// (from, to) pair was inserted.
#[derive(Debug, Clone)]
pub struct Edge {
    from: NodeId,
    to: NodeId,
    weight: u32,
    walked: bool,
    alive: bool,
}

impl Edge {
    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn is_walked(&self) -> bool {
        self.walked
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

/// Arena-backed de Bruijn graph.
///
/// Nodes and edges live in two vectors and refer to each other by index.
/// Removal marks a slot dead and unlinks it from every index; slots are
/// never reused, so ids handed out stay stable for the lifetime of the store.
#[derive(Debug, Default, Clone)]
pub struct DeBruijnGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    outgoing: Vec<Vec<EdgeId>>,
    incoming: Vec<Vec<EdgeId>>,
    by_label: AHashMap<String, NodeId>,
    by_pair: AHashMap<(NodeId, NodeId), EdgeId>,
    live_nodes: usize,
    live_edges: usize,
}

impl DeBruijnGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from equal-length k-mers: every k-mer links its
    /// (k-1)-prefix node to its (k-1)-suffix node.
    pub fn from_kmers<S: AsRef<str>>(kmers: &[S]) -> Result<Self> {
        let k = validate_kmers(kmers)?;
        let node_length = k - 1;

        let mut graph = Self::new();
        for kmer in kmers {
            let kmer = kmer.as_ref();
            let from = graph.add_node(&kmer[..node_length]);
            let to = graph.add_node(&kmer[1..]);
            graph.add_edge(from, to);
        }

        Ok(graph)
    }

    /// Return the node for `label`, creating it if needed.
    pub fn add_node(&mut self, label: &str) -> NodeId {
        if let Some(&id) = self.by_label.get(label) {
            return id;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(label));
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        self.by_label.insert(label.to_string(), id);
        self.live_nodes += 1;
        id
    }

    /// Insert the edge `from -> to`, or bump the weight of the existing one.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> EdgeId {
        if let Some(&id) = self.by_pair.get(&(from, to)) {
            self.edges[id.0].weight += 1;
            return id;
        }

        let id = EdgeId(self.edges.len());
        self.edges.push(Edge {
            from,
            to,
            weight: 1,
            walked: false,
            alive: true,
        });
        self.outgoing[from.0].push(id);
        self.incoming[to.0].push(id);
        self.by_pair.insert((from, to), id);
        self.live_edges += 1;
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn label(&self, id: NodeId) -> &str {
        self.nodes[id.0].label()
    }

    pub fn find_node(&self, label: &str) -> Option<NodeId> {
        self.by_label.get(label).copied()
    }

    pub fn find_edge(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        self.by_pair.get(&(from, to)).copied()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.get(id.0).is_some_and(Node::is_alive)
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.get(id.0).is_some_and(Edge::is_alive)
    }

    /// Live nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.alive)
            .map(|(i, _)| NodeId(i))
    }

    /// Live edges in insertion order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, edge)| edge.alive)
            .map(|(i, _)| EdgeId(i))
    }

    pub fn node_count(&self) -> usize {
        self.live_nodes
    }

    pub fn edge_count(&self) -> usize {
        self.live_edges
    }

    pub fn is_empty(&self) -> bool {
        self.live_nodes == 0
    }

    /// Edges of `node` in the given direction, in insertion order.
    pub fn edges(&self, node: NodeId, direction: Direction) -> &[EdgeId] {
        match direction {
            Direction::Outgoing => &self.outgoing[node.0],
            Direction::Incoming => &self.incoming[node.0],
        }
    }

    pub fn outgoing(&self, node: NodeId) -> &[EdgeId] {
        self.edges(node, Direction::Outgoing)
    }

    pub fn incoming(&self, node: NodeId) -> &[EdgeId] {
        self.edges(node, Direction::Incoming)
    }

    pub fn degree(&self, node: NodeId, direction: Direction) -> usize {
        self.edges(node, direction).len()
    }

    pub fn outdegree(&self, node: NodeId) -> usize {
        self.degree(node, Direction::Outgoing)
    }

    pub fn indegree(&self, node: NodeId) -> usize {
        self.degree(node, Direction::Incoming)
    }

    pub fn one_in_one_out(&self, node: NodeId) -> bool {
        self.outdegree(node) == 1 && self.indegree(node) == 1
    }

    pub(crate) fn set_node_walked(&mut self, node: NodeId, walked: bool) {
        self.nodes[node.0].walked = walked;
    }

    pub(crate) fn set_edge_walked(&mut self, edge: EdgeId, walked: bool) {
        self.edges[edge.0].walked = walked;
    }

    /// Clear the walked flag on every node and edge.
    pub fn reset_walked(&mut self) {
        for node in &mut self.nodes {
            node.walked = false;
        }
        for edge in &mut self.edges {
            edge.walked = false;
        }
    }

    /// Remove a pruned branch: every edge of `path` and the source node of
    /// every edge after the first.
    ///
    /// The source of the first edge (branch point) and the destination of the
    /// last edge (merge point) survive with their degrees decremented. A path
    /// of L edges removes exactly L-1 nodes.
    pub fn remove_path(&mut self, path: &[EdgeId]) {
        for (index, &edge) in path.iter().enumerate() {
            if !self.contains_edge(edge) {
                continue;
            }
            let from = self.edges[edge.0].from;
            self.detach_edge(edge);
            if index > 0 {
                self.remove_node(from);
            }
        }
    }

    /// Spell the sequence of an edge path: the first character of every
    /// source label followed by the full label of the final destination.
    pub fn spell(&self, path: &[EdgeId]) -> String {
        let Some(&last) = path.last() else {
            return String::new();
        };

        let mut sequence: String = path
            .iter()
            .filter_map(|&e| self.label(self.edges[e.0].from).chars().next())
            .collect();
        sequence.push_str(self.label(self.edges[last.0].to));
        sequence
    }

    /// Render a path as `A->B->C` using node labels.
    pub fn path_arrow(&self, path: &[EdgeId]) -> String {
        let Some(&last) = path.last() else {
            return "Empty Graph".to_string();
        };

        let mut labels: Vec<&str> = path
            .iter()
            .map(|&e| self.label(self.edges[e.0].from))
            .collect();
        labels.push(self.label(self.edges[last.0].to));
        labels.join("->")
    }

    fn detach_edge(&mut self, edge: EdgeId) {
        let (from, to) = {
            let e = &mut self.edges[edge.0];
            if !e.alive {
                return;
            }
            e.alive = false;
            (e.from, e.to)
        };

        self.outgoing[from.0].retain(|&e| e != edge);
        self.incoming[to.0].retain(|&e| e != edge);
        self.by_pair.remove(&(from, to));
        self.live_edges -= 1;
    }

    fn remove_node(&mut self, node: NodeId) {
        if !self.contains_node(node) {
            return;
        }

        let attached: Vec<EdgeId> = self.outgoing[node.0]
            .iter()
            .chain(self.incoming[node.0].iter())
            .copied()
            .collect();
        for edge in attached {
            self.detach_edge(edge);
        }

        self.by_label.remove(self.nodes[node.0].label.as_str());
        self.nodes[node.0].alive = false;
        self.live_nodes -= 1;
    }
}

/// Check that k-mers are non-empty, ASCII and share one length k >= 2.
/// Returns k.
pub fn validate_kmers<S: AsRef<str>>(kmers: &[S]) -> Result<usize> {
    let first = kmers.first().ok_or(AssemblyError::EmptyInput)?;
    let k = first.as_ref().len();
    if k < 2 {
        return Err(AssemblyError::InvalidK { k });
    }

    for (index, kmer) in kmers.iter().enumerate() {
        let kmer = kmer.as_ref();
        if !kmer.is_ascii() {
            return Err(AssemblyError::NonAsciiKmer { index });
        }
        if kmer.len() != k {
            return Err(AssemblyError::MalformedKmer {
                index,
                expected: k,
                found: kmer.len(),
            });
        }
    }

    Ok(k)
}
