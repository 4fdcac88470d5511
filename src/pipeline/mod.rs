pub mod assemble;

pub use assemble::{assemble_kmers, AssemblerRun, AssemblyReport, EulerianOutcome, RunSummary};
