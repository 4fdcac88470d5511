// src/kmer/composition.rs
//! Reconstruct a string from its k-mer composition by prefix/suffix overlap.
//!
//! This is the reference path that predates the de Bruijn pipeline: k-mers
//! are chained directly, each one following the k-mer whose suffix equals
//! its prefix. It only works for compositions without repeated (k-1)-mers.
use tracing::{debug, warn};

use crate::graph::store::Node;

/// Spell the string whose k-mers are `kmers`, or `None` when the
/// composition has no unambiguous start and end or cannot be chained.
pub fn string_from_composition<S: AsRef<str>>(kmers: &[S]) -> Option<String> {
    let nodes: Vec<Node> = kmers
        .iter()
        .map(|kmer| kmer.as_ref())
        .filter(|kmer| !kmer.is_empty())
        .map(Node::new)
        .collect();

    let start = nodes
        .iter()
        .position(|n| !nodes.iter().any(|other| n.prefix() == other.suffix()));
    let end = nodes
        .iter()
        .position(|n| !nodes.iter().any(|other| n.suffix() == other.prefix()));

    let (Some(start), Some(_)) = (start, end) else {
        warn!("Not a valid set of kmers");
        return None;
    };

    let mut used = vec![false; nodes.len()];
    used[start] = true;
    let mut order = vec![start];
    let mut current = start;

    while order.len() < nodes.len() {
        let next = (0..nodes.len())
            .find(|&i| !used[i] && nodes[i].prefix() == nodes[current].suffix())?;
        used[next] = true;
        order.push(next);
        current = next;
    }

    debug!("Complete Cycle");
    let (last, rest) = order.split_last()?;
    let mut sequence: String = rest
        .iter()
        .filter_map(|&i| nodes[i].label().chars().next())
        .collect();
    sequence.push_str(nodes[*last].label());
    Some(sequence)
}
