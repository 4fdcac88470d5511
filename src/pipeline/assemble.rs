// src/pipeline/assemble.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::AssemblyConfig;
use crate::error::{AssemblyError, Result};
use crate::graph::bubble::{prune_bubbles, PruneReport};
use crate::graph::contig::{find_contigs, Contig};
use crate::graph::eulerian::EulerianPathFinder;
use crate::graph::store::{validate_kmers, DeBruijnGraph};
use crate::io::fasta::{read_fasta, write_contigs, FastaRecord};
use crate::kmer::{kmers_for_sequence, trash_low_abundance, unique_kmer_count, Kmer};
use crate::stats::ContigStats;

/// Result of the optional Eulerian search over the pruned graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EulerianOutcome {
    Skipped,
    Found {
        sequence: String,
        edges: usize,
        backtracks: usize,
        start: String,
    },
    /// No trail exists (or none was found); contigs are still valid
    NotFound { reason: String },
}

#[derive(Debug, Clone)]
pub struct AssemblyReport {
    pub k: usize,
    pub kmer_count: usize,
    pub unique_kmers: usize,
    pub nodes: usize,
    pub edges: usize,
    /// Contigs of the graph before bubble pruning
    pub raw_contigs: Vec<Contig>,
    pub prune: PruneReport,
    pub final_contigs: Vec<Contig>,
    pub eulerian: EulerianOutcome,
}

impl AssemblyReport {
    pub fn sequences(&self) -> Vec<String> {
        self.final_contigs.iter().map(|c| c.sequence.clone()).collect()
    }
}

/// Build the graph, extract raw contigs, prune bubbles and extract the final
/// contigs. Runs the Eulerian search on the pruned graph when enabled.
pub fn assemble_kmers<S, R>(
    kmers: &[S],
    config: &AssemblyConfig,
    rng: &mut R,
) -> Result<AssemblyReport>
where
    S: AsRef<str>,
    R: Rng,
{
    let k = validate_kmers(kmers)?;
    let unique_kmers = unique_kmer_count(kmers);

    let mut graph = DeBruijnGraph::from_kmers(kmers)?;
    let nodes = graph.node_count();
    let edges = graph.edge_count();
    info!("Created {} edges over {} nodes", edges, nodes);

    let raw_contigs = find_contigs(&graph);
    info!("Found {} raw contigs", raw_contigs.len());

    let prune = prune_bubbles(&mut graph);
    info!(
        "Pruned {} bubble branches ({} nodes, {} edges)",
        prune.branches_removed, prune.nodes_removed, prune.edges_removed
    );

    let eulerian = if config.eulerian {
        search_eulerian(&mut graph, config, rng)?
    } else {
        EulerianOutcome::Skipped
    };

    let final_contigs = find_contigs(&graph);
    info!("Found {} final contigs", final_contigs.len());

    Ok(AssemblyReport {
        k,
        kmer_count: kmers.len(),
        unique_kmers,
        nodes,
        edges,
        raw_contigs,
        prune,
        final_contigs,
        eulerian,
    })
}

fn search_eulerian<R: Rng>(
    graph: &mut DeBruijnGraph,
    config: &AssemblyConfig,
    rng: &mut R,
) -> Result<EulerianOutcome> {
    let mut finder = EulerianPathFinder::new(rng).with_max_backtracks(config.max_backtracks);
    let outcome = match finder.find(graph) {
        Ok(trail) => EulerianOutcome::Found {
            sequence: trail.spell(graph),
            edges: trail.len(),
            backtracks: trail.backtracks,
            start: graph.label(trail.start).to_string(),
        },
        Err(e @ (AssemblyError::NoEulerianCycle { .. } | AssemblyError::EmptyGraph)) => {
            warn!("Eulerian search failed: {}", e);
            if let Some(best) = finder.partial_paths().last() {
                debug!(
                    "best partial path covered {} edges from {}",
                    best.count,
                    graph.label(best.starting_node)
                );
            }
            EulerianOutcome::NotFound { reason: e.to_string() }
        }
        Err(e) => return Err(e),
    };

    graph.reset_walked();
    Ok(outcome)
}

/// All k-mers of every record, in read order
pub fn collect_kmers(records: &[FastaRecord], k: usize) -> Vec<Kmer> {
    records
        .iter()
        .flat_map(|record| kmers_for_sequence(&record.sequence, k))
        .collect()
}

/// `<output>.stats`
pub fn stats_path(output: &Path) -> PathBuf {
    let mut path = OsString::from(output.as_os_str());
    path.push(".stats");
    PathBuf::from(path)
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub report: AssemblyReport,
    pub stats: ContigStats,
    pub elapsed: Duration,
}

/// One end-to-end run: FASTA in, contigs and stats report out.
#[derive(Debug, Clone)]
pub struct AssemblerRun {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub config: AssemblyConfig,
}

impl AssemblerRun {
    pub fn new(input: impl Into<PathBuf>, config: AssemblyConfig) -> Self {
        Self {
            input: input.into(),
            output: None,
            config,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn run(&self) -> Result<RunSummary> {
        let start = Instant::now();
        self.config.validate()?;
        info!("Starting new run with options: {:?}", self.config);

        let records = read_fasta(&self.input)?;
        let mut kmers = collect_kmers(&records, self.config.k);

        if self.config.trash_kmers {
            info!("Trashing kmers with counts <= {}", self.config.trash_threshold);
            kmers = trash_low_abundance(kmers, self.config.trash_threshold);
        }
        info!("Found {} unique kmers", unique_kmer_count(&kmers));

        let mut rng = self.config.rng();
        let report = assemble_kmers(&kmers, &self.config, &mut rng)?;

        for (index, contig) in report.final_contigs.iter().enumerate() {
            debug!(">{} {}", index, contig.len());
            debug!("{}", contig.sequence);
        }

        let lengths: Vec<usize> = report.final_contigs.iter().map(Contig::len).collect();
        let stats = ContigStats::from_lengths(&lengths, Some(report.k));

        if let Some(output) = &self.output {
            write_contigs(output, &report.final_contigs)?;
            stats.write_report(&stats_path(output), &self.input.display().to_string())?;
            info!("Wrote {} contigs to {}", report.final_contigs.len(), output.display());
        }

        let elapsed = start.elapsed();
        info!("Time Elapsed: {:.3}s", elapsed.as_secs_f64());

        Ok(RunSummary { report, stats, elapsed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_assemble_chain() {
        let kmers = kmers_for_sequence("ATGGCGTACC", 4);
        let mut rng = StdRng::seed_from_u64(11);
        let report = assemble_kmers(&kmers, &AssemblyConfig::default(), &mut rng).unwrap();

        assert_eq!(report.k, 4);
        assert_eq!(report.sequences(), vec!["ATGGCGTACC"]);
        assert_eq!(report.eulerian, EulerianOutcome::Skipped);
    }

    #[test]
    fn test_stats_path() {
        assert_eq!(stats_path(Path::new("out/contigs.fa")), PathBuf::from("out/contigs.fa.stats"));
    }
}
