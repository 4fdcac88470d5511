// src/kmer/kmer.rs
use ahash::{AHashMap, AHashSet};

pub type Kmer = String;

/// Every window of length `k` over `seq`, in order. Empty when the sequence
/// is shorter than `k`.
pub fn kmers_for_sequence(seq: &str, k: usize) -> Vec<Kmer> {
    if k == 0 || seq.len() < k {
        return Vec::new();
    }

    (0..=seq.len() - k)
        .filter_map(|i| seq.get(i..i + k))
        .map(str::to_string)
        .collect()
}

/// Abundance of each distinct k-mer
pub fn count_kmers<S: AsRef<str>>(kmers: &[S]) -> AHashMap<&str, u32> {
    let mut counts = AHashMap::with_capacity(kmers.len());
    for kmer in kmers {
        *counts.entry(kmer.as_ref()).or_insert(0) += 1;
    }
    counts
}

pub fn unique_kmer_count<S: AsRef<str>>(kmers: &[S]) -> usize {
    kmers.iter().map(|kmer| kmer.as_ref()).collect::<AHashSet<&str>>().len()
}

/// Drop every occurrence of k-mers seen `max_count` times or fewer.
/// Order of the surviving k-mers is preserved.
pub fn trash_low_abundance(kmers: Vec<Kmer>, max_count: u32) -> Vec<Kmer> {
    let trashed: AHashSet<Kmer> = count_kmers(&kmers)
        .into_iter()
        .filter(|&(_, count)| count <= max_count)
        .map(|(kmer, _)| kmer.to_string())
        .collect();

    kmers.into_iter().filter(|kmer| !trashed.contains(kmer)).collect()
}
