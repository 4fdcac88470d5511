//! Genome assembly from short reads over a de Bruijn graph.
//!
//! Reads are cut into k-mers, k-mers become edges between (k-1)-mer nodes,
//! low-weight bubbles are pruned and the remaining non-branching chains are
//! reported as contigs. An optional randomized Eulerian walk reconstructs a
//! single sequence when the pruned graph admits one.

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod io;
pub mod kmer;
pub mod pipeline;
pub mod stats;

pub use config::AssemblyConfig;
pub use error::{AssemblyError, Result};
