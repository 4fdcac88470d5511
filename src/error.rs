use std::path::PathBuf;

use crate::graph::store::NodeId;

pub type Result<T> = std::result::Result<T, AssemblyError>;

/// Errors raised while building, walking or writing an assembly.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    /// Backtracking emptied the walk before reaching the branch node.
    /// Recovered by the Eulerian search, which moves to the next candidate.
    #[error("bad starting node {node:?}: backtracking exhausted the walk")]
    BadStartingNode { node: NodeId },

    #[error("no Eulerian cycle found after trying {candidates} starting node(s)")]
    NoEulerianCycle { candidates: usize },

    #[error("no k-mers to assemble")]
    EmptyInput,

    #[error("graph has no edges to walk")]
    EmptyGraph,

    #[error("k must be at least 2, got {k}")]
    InvalidK { k: usize },

    #[error("k-mer {index} has length {found}, expected {expected}")]
    MalformedKmer {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("k-mer {index} contains non-ASCII characters")]
    NonAsciiKmer { index: usize },

    #[error("invalid config {}: {message}", path.display())]
    InvalidConfig { path: PathBuf, message: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AssemblyError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AssemblyError::Io {
            path: path.into(),
            source,
        }
    }
}
