use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{AssemblyError, Result};
use crate::graph::eulerian::DEFAULT_MAX_BACKTRACKS;

/// Options for one assembly run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    /// K-mer length; graph nodes are k-1 long
    pub k: usize,
    /// Drop low-abundance k-mers before building the graph
    pub trash_kmers: bool,
    /// K-mers seen this many times or fewer are dropped when trashing
    pub trash_threshold: u32,
    /// Seed for the Eulerian walk; entropy when unset
    pub seed: Option<u64>,
    pub max_backtracks: usize,
    /// Also search the pruned graph for an Eulerian trail
    pub eulerian: bool,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            k: 15,
            trash_kmers: false,
            trash_threshold: 2,
            seed: None,
            max_backtracks: DEFAULT_MAX_BACKTRACKS,
            eulerian: false,
        }
    }
}

impl AssemblyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.k < 2 {
            return Err(AssemblyError::InvalidK { k: self.k });
        }
        Ok(())
    }

    /// Load options from a JSON file; missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AssemblyError::io(path, e))?;
        serde_json::from_str(&text).map_err(|e| AssemblyError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
