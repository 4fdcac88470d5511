//! K-mer extraction, abundance trimming and composition reconstruction

pub mod composition;
pub mod kmer;

pub use kmer::{count_kmers, kmers_for_sequence, trash_low_abundance, unique_kmer_count, Kmer};
