//! Benchmarks for static range coding.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rc16::{ByteCompressor, RangeCompressor};

/// Text-like input: a skewed alphabet of lowercase letters and spaces.
fn sample(len: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"eeeeeeettttaaaoooiinnsshhrdlu      ";
    let mut state = 0x2545_f491_u32;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            ALPHABET[state as usize % ALPHABET.len()]
        })
        .collect()
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");

    let compressor = RangeCompressor::new();

    for len in [1_000, 10_000, 100_000] {
        let input = sample(len);

        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::new("rc16", len), &len, |bench, _| {
            bench.iter(|| compressor.compress(black_box(&input)))
        });
    }

    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");

    let compressor = RangeCompressor::new();

    for len in [1_000, 10_000, 100_000] {
        let input = sample(len);
        let compressed = compressor.compress(&input).unwrap();

        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::new("rc16", len), &len, |bench, _| {
            bench.iter(|| compressor.decompress(black_box(&compressed)))
        });
    }

    group.finish();
}

fn bench_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_trip");

    let compressor = RangeCompressor::new();

    for len in [1_000, 10_000] {
        let input = sample(len);

        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::new("rc16", len), &len, |bench, _| {
            bench.iter(|| {
                let compressed = compressor.compress(black_box(&input)).unwrap();
                compressor.decompress(black_box(&compressed)).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress, bench_round_trip);
criterion_main!(benches);
