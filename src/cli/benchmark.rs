use std::time::Duration;

use crate::error::Result;
use crate::pipeline::AssemblerRun;

#[derive(Debug, Clone, Default)]
pub struct BenchmarkSummary {
    pub timings: Vec<Duration>,
    pub contig_counts: Vec<usize>,
}

impl BenchmarkSummary {
    pub fn mean(&self) -> Duration {
        if self.timings.is_empty() {
            return Duration::ZERO;
        }
        self.timings.iter().sum::<Duration>() / self.timings.len() as u32
    }

    pub fn fastest(&self) -> Duration {
        self.timings.iter().min().copied().unwrap_or_default()
    }

    pub fn slowest(&self) -> Duration {
        self.timings.iter().max().copied().unwrap_or_default()
    }
}

/// Run the whole pipeline `runs` times, each on a fresh graph, and report
/// the wall-clock time of every run.
pub fn benchmark_assembly(run: &AssemblerRun, runs: usize) -> Result<BenchmarkSummary> {
    let mut summary = BenchmarkSummary::default();

    println!("Starting assembly benchmark with k={} over {} run(s)", run.config.k, runs);

    for i in 0..runs {
        let result = run.run()?;
        println!(
            "run {:>3}: {:>10.4}s  {} contigs",
            i + 1,
            result.elapsed.as_secs_f64(),
            result.report.final_contigs.len()
        );
        summary.timings.push(result.elapsed);
        summary.contig_counts.push(result.report.final_contigs.len());
    }

    if runs > 1 {
        println!(
            "mean {:.4}s, fastest {:.4}s, slowest {:.4}s",
            summary.mean().as_secs_f64(),
            summary.fastest().as_secs_f64(),
            summary.slowest().as_secs_f64()
        );
    }

    Ok(summary)
}
