use std::path::PathBuf;

use bruijn::cli::stats::StatsFormat;
use bruijn::AssemblyConfig;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bruijn", version, about = "de Bruijn graph genome assembler", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble reads from a FASTA(.gz) file into contigs
    Assemble(AssembleArgs),

    /// Calculate statistics for an assembly output file
    Stats {
        /// Input FASTA(.gz) file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = StatsFormat::Json)]
        format: StatsFormat,
    },
}

#[derive(Args, Debug)]
pub struct AssembleArgs {
    /// Input FASTA(.gz) file
    #[arg(short = 'f', long = "filename")]
    pub filename: PathBuf,

    /// K-mer size [default: 15]
    #[arg(short = 'k', long = "kvalue")]
    pub k: Option<usize>,

    /// Trash low-abundance k-mers before building the graph
    #[arg(long)]
    pub trash: bool,

    /// Output FASTA(.gz) file; a `.stats` report is written next to it
    #[arg(short = 'o', long = "outputfilename")]
    pub output: Option<PathBuf>,

    /// Print progress while assembling
    #[arg(long)]
    pub print: bool,

    /// Print per-bubble and backtracking detail
    #[arg(long)]
    pub debug: bool,

    /// Seed for the Eulerian walk
    #[arg(long)]
    pub seed: Option<u64>,

    /// Search the pruned graph for an Eulerian trail
    #[arg(long)]
    pub eulerian: bool,

    /// Dead ends allowed per starting node before giving up on it
    #[arg(long)]
    pub max_backtracks: Option<usize>,

    /// Run the whole pipeline this many times and report timings
    #[arg(long, default_value_t = 1)]
    pub runs: usize,

    /// JSON file with assembly options; flags given here override it
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl AssembleArgs {
    /// Layer the command-line flags over `base`.
    pub fn apply(&self, mut base: AssemblyConfig) -> AssemblyConfig {
        if let Some(k) = self.k {
            base.k = k;
        }
        if self.trash {
            base.trash_kmers = true;
        }
        if self.seed.is_some() {
            base.seed = self.seed;
        }
        if self.eulerian {
            base.eulerian = true;
        }
        if let Some(max_backtracks) = self.max_backtracks {
            base.max_backtracks = max_backtracks;
        }
        base
    }
}
