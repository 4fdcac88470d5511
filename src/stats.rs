use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{AssemblyError, Result};
use crate::io::fasta::{open_fasta, parse_fasta};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContigStats {
    pub total_contigs: usize,
    pub total_length: usize,
    pub average_length: f64,
    pub largest_contig: usize,
    pub n50: usize,
    pub k: Option<usize>,
}

impl ContigStats {
    pub fn from_lengths(lengths: &[usize], k: Option<usize>) -> Self {
        let mut lengths = lengths.to_vec();
        lengths.sort_unstable();

        let total: usize = lengths.iter().sum();
        let total_contigs = lengths.len();
        let avg = if total_contigs > 0 { total as f64 / total_contigs as f64 } else { 0.0 };

        // Calculate N50
        let mut acc = 0;
        let half_total = total / 2;
        let n50 = lengths.iter().rev().find(|&&len| {
            acc += len;
            acc >= half_total
        }).copied().unwrap_or(0);

        ContigStats {
            total_contigs,
            total_length: total,
            average_length: avg,
            largest_contig: lengths.last().copied().unwrap_or(0),
            n50,
            k,
        }
    }

    /// Whole-base average used in the text report, truncated
    pub fn integer_average(&self) -> usize {
        self.total_length.checked_div(self.total_contigs).unwrap_or(0)
    }

    /// Write the plain-text report that accompanies an assembly output file.
    pub fn write_report(&self, path: &Path, input_name: &str) -> Result<()> {
        let write = || -> std::io::Result<()> {
            let mut file = BufWriter::new(File::create(path)?);
            writeln!(file, "Stats for {}", input_name)?;
            writeln!(file, "Number of Contigs: {}", self.total_contigs)?;
            writeln!(file, "Average Contig Size: {}", self.integer_average())?;
            writeln!(file, "Largest Contig Size: {}", self.largest_contig)?;
            writeln!(file, "N50: {}", self.n50)?;
            if let Some(k) = self.k {
                writeln!(file, "K: {}", k)?;
            }
            file.flush()
        };
        write().map_err(|e| AssemblyError::io(path, e))
    }
}

/// Compute contig statistics for a FASTA(.gz) file
pub fn calculate_stats(path: &Path) -> Result<ContigStats> {
    let reader = open_fasta(path)?;
    let records = parse_fasta(reader).map_err(|e| AssemblyError::io(path, e))?;
    let lengths: Vec<usize> = records.iter().map(|r| r.sequence.len()).collect();
    Ok(ContigStats::from_lengths(&lengths, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_calculate_stats() {
        // Create a temporary FASTA file
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">contig_1").unwrap();
        writeln!(file, "ATCGATCGATCGATCGATCG").unwrap(); // 20 bp
        writeln!(file, ">contig_2").unwrap();
        writeln!(file, "GCTAGCTAGCTAGCTAGCTAGCTA").unwrap(); // 24 bp
        writeln!(file, ">contig_3").unwrap();
        writeln!(file, "ATCG").unwrap(); // 4 bp

        let stats = calculate_stats(file.path()).unwrap();

        assert_eq!(stats.total_contigs, 3);
        assert_eq!(stats.total_length, 48);
        assert_eq!(stats.average_length, 16.0);
        assert_eq!(stats.largest_contig, 24);
        assert_eq!(stats.n50, 24);
    }

    #[test]
    fn test_empty_stats() {
        let stats = ContigStats::from_lengths(&[], Some(15));
        assert_eq!(stats.total_contigs, 0);
        assert_eq!(stats.n50, 0);
        assert_eq!(stats.largest_contig, 0);
        assert_eq!(stats.integer_average(), 0);
    }

    #[test]
    fn test_write_report() {
        let file = NamedTempFile::new().unwrap();
        let stats = ContigStats::from_lengths(&[10, 31], Some(7));
        stats.write_report(file.path(), "reads.fasta").unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        assert!(text.starts_with("Stats for reads.fasta\n"));
        assert!(text.contains("Number of Contigs: 2\n"));
        assert!(text.contains("Average Contig Size: 20\n"));
        assert!(text.contains("Largest Contig Size: 31\n"));
        assert!(text.contains("N50: 31\n"));
        assert!(text.contains("K: 7\n"));
    }
}
