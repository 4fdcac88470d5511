use bruijn::graph::bubble::prune_bubbles;
use bruijn::graph::contig::find_contigs;
use bruijn::graph::{DeBruijnGraph, NodeId};

fn link(graph: &mut DeBruijnGraph, from: NodeId, to: NodeId, weight: u32) {
    for _ in 0..weight {
        graph.add_edge(from, to);
    }
}

#[test]
fn test_low_weight_branch_is_removed() {
    // W -> X -> Y -> Z at weight 3, plus X -> P -> Y at weight 1
    let mut graph = DeBruijnGraph::new();
    let w = graph.add_node("W");
    let x = graph.add_node("X");
    let y = graph.add_node("Y");
    let z = graph.add_node("Z");
    let p = graph.add_node("P");
    link(&mut graph, w, x, 3);
    link(&mut graph, x, y, 3);
    link(&mut graph, y, z, 3);
    link(&mut graph, x, p, 1);
    link(&mut graph, p, y, 1);

    let report = prune_bubbles(&mut graph);

    assert_eq!(report.candidates, 1);
    assert_eq!(report.branches_removed, 1);
    assert_eq!(report.nodes_removed, 1);
    assert_eq!(report.edges_removed, 2);
    assert_eq!(report.removed, vec!["XPY"]);

    assert!(!graph.contains_node(p));
    for node in [w, x, y, z] {
        assert!(graph.contains_node(node));
    }
    let heavy = graph.find_edge(x, y).unwrap();
    assert_eq!(graph.edge(heavy).weight(), 3);
    assert_eq!(graph.outdegree(x), 1);
    assert_eq!(graph.indegree(y), 1);

    let contigs = find_contigs(&graph);
    assert_eq!(contigs.len(), 1);
    assert_eq!(contigs[0].sequence, "WXYZ");
}

#[test]
fn test_tied_branches_are_kept() {
    let mut graph = DeBruijnGraph::new();
    let w = graph.add_node("W");
    let x = graph.add_node("X");
    let y = graph.add_node("Y");
    let p = graph.add_node("P");
    link(&mut graph, w, x, 1);
    link(&mut graph, x, y, 2);
    link(&mut graph, x, p, 2);
    link(&mut graph, p, y, 1);

    let nodes = graph.node_count();
    let edges = graph.edge_count();
    let report = prune_bubbles(&mut graph);

    assert_eq!(report.candidates, 1);
    assert_eq!(report.branches_removed, 0);
    assert_eq!(graph.node_count(), nodes);
    assert_eq!(graph.edge_count(), edges);
}

#[test]
fn test_source_branch_is_not_a_candidate() {
    // X has no incoming edge, so its weaker branch survives
    let mut graph = DeBruijnGraph::new();
    let x = graph.add_node("X");
    let y = graph.add_node("Y");
    let p = graph.add_node("P");
    link(&mut graph, x, y, 3);
    link(&mut graph, x, p, 1);

    let report = prune_bubbles(&mut graph);
    assert_eq!(report.candidates, 0);
    assert!(graph.contains_node(p));
}

#[test]
fn test_sequencing_error_bubble_is_pruned() {
    let genome = "ATGGCGTACCTTGAGCATTCAGGTCCAAGTTAC";
    let mutant = "ATGGCGTACCTTGAGCCTTCAGGTCCAAGTTAC";
    let mut kmers = Vec::new();
    for read in [genome, genome, genome, mutant] {
        kmers.extend(bruijn::kmer::kmers_for_sequence(read, 7));
    }

    let mut graph = DeBruijnGraph::from_kmers(&kmers).unwrap();
    assert_eq!(find_contigs(&graph).len(), 4);

    let report = prune_bubbles(&mut graph);
    assert_eq!(report.branches_removed, 1);
    // the erroneous branch spans 7 k-mers, so 6 interior nodes
    assert_eq!(report.nodes_removed, 6);

    let contigs = find_contigs(&graph);
    assert_eq!(contigs.len(), 1);
    assert_eq!(contigs[0].sequence, genome);
}
