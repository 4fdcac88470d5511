use bruijn::graph::bubble::prune_bubbles;
use bruijn::graph::contig::find_contigs;
use bruijn::graph::eulerian::EulerianPathFinder;
use bruijn::graph::DeBruijnGraph;
use bruijn::kmer::kmers_for_sequence;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random genome plus `coverage` reads tiling it, every tenth read carrying
/// one substitution
fn generate_kmers(genome_len: usize, coverage: usize, k: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(17);
    let bases = ['A', 'C', 'G', 'T'];
    let genome: String = (0..genome_len).map(|_| bases[rng.gen_range(0..4)]).collect();

    let mut kmers = Vec::new();
    for read in 0..coverage {
        let mut sequence: Vec<char> = genome.chars().collect();
        if read % 10 == 9 {
            let pos = rng.gen_range(0..genome_len);
            let base = bases.iter().position(|&b| b == sequence[pos]).unwrap_or(0);
            sequence[pos] = bases[(base + 1) % 4];
        }
        let sequence: String = sequence.into_iter().collect();
        kmers.extend(kmers_for_sequence(&sequence, k));
    }
    kmers
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly");

    for genome_len in [1_000, 10_000] {
        let kmers = generate_kmers(genome_len, 20, 31);

        group.bench_with_input(BenchmarkId::new("build_graph", genome_len), &kmers, |b, kmers| {
            b.iter(|| DeBruijnGraph::from_kmers(black_box(kmers)).unwrap())
        });

        let id = BenchmarkId::new("prune_and_extract", genome_len);
        group.bench_with_input(id, &kmers, |b, kmers| {
            b.iter(|| {
                let mut graph = DeBruijnGraph::from_kmers(kmers).unwrap();
                prune_bubbles(&mut graph);
                black_box(find_contigs(&graph))
            })
        });

        let clean = generate_kmers(genome_len, 1, 31);
        group.bench_with_input(BenchmarkId::new("eulerian_walk", genome_len), &clean, |b, kmers| {
            b.iter(|| {
                let mut graph = DeBruijnGraph::from_kmers(kmers).unwrap();
                let mut finder = EulerianPathFinder::new(StdRng::seed_from_u64(3));
                black_box(finder.find(&mut graph).ok())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
