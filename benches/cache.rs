#![allow(unused)]
extern crate pure_ext;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pure_ext::{cache::FromCache, MemoryCache};
use std::{hint::black_box, sync::Arc};

/// Benchmark cache hits against a warm cache
///
/// Every key is inserted once up front, so the measured loop only takes the shard read lock and
/// downcasts the stored value.
fn bench_cache_hits(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_hits");

    for entries in [16_usize, 1024, 65536] {
        let cache = MemoryCache::new();
        let keys: Vec<String> = (0..entries).map(|i| format!("key-{i}")).collect();
        for (index, key) in keys.iter().enumerate() {
            cache.add_or_get_existing(key, index).unwrap();
        }

        group.throughput(Throughput::Elements(entries as u64));
        group.bench_with_input(BenchmarkId::from_parameter(entries), &keys, |b, keys| {
            b.iter(|| {
                for key in keys {
                    let value = cache
                        .add_or_get_existing_with(black_box(key), |_| usize::MAX)
                        .unwrap();
                    black_box(value);
                }
            });
        });
    }
    group.finish();
}

/// Benchmark inserting fresh keys, each factory runs exactly once
fn bench_cache_inserts(c: &mut Criterion) {
    let keys: Vec<String> = (0..1024).map(|i| format!("key-{i}")).collect();

    let mut group = c.benchmark_group("cache_inserts");
    group.throughput(Throughput::Elements(keys.len() as u64));
    group.bench_function("add_or_get_existing_with", |b| {
        b.iter(|| {
            let cache = MemoryCache::new();
            for key in &keys {
                let value = cache
                    .add_or_get_existing_with(key, |key| key.len())
                    .unwrap();
                black_box(value);
            }
        });
    });
    group.finish();
}

/// Benchmark the receiver based entry point with a derived key
fn bench_from_cache_auto(c: &mut Criterion) {
    let cache = MemoryCache::new();
    let words: Vec<String> = "the quick brown fox jumps over the lazy dog"
        .split(' ')
        .map(str::to_string)
        .collect();

    c.bench_function("from_cache_auto_in", |b| {
        b.iter(|| {
            let count: Arc<usize> = black_box(&words)
                .from_cache_auto_in(&cache, |words| words.len())
                .unwrap();
            black_box(count)
        });
    });
}

criterion_group!(
    benches,
    bench_cache_hits,
    bench_cache_inserts,
    bench_from_cache_auto
);
criterion_main!(benches);
