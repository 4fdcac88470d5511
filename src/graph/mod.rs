//! De Bruijn graph store and the algorithms that run over it

pub mod bubble;
pub mod contig;
pub mod eulerian;
pub mod store;

pub use store::{DeBruijnGraph, Direction, Edge, EdgeId, Node, NodeId};
