use clap::ValueEnum;

use crate::stats::ContigStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatsFormat {
    Json,
    Tsv,
}

/// Render contig statistics for the `stats` subcommand
pub fn format_stats(stats: &ContigStats, format: StatsFormat) -> serde_json::Result<String> {
    match format {
        StatsFormat::Json => serde_json::to_string_pretty(stats),
        StatsFormat::Tsv => {
            let mut out = String::from("contigs\ttotal_length\taverage_length\tlargest\tn50\n");
            out.push_str(&format!(
                "{}\t{}\t{:.2}\t{}\t{}\n",
                stats.total_contigs,
                stats.total_length,
                stats.average_length,
                stats.largest_contig,
                stats.n50
            ));
            Ok(out)
        }
    }
}
