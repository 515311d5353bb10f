use criterion::{Criterion, black_box, criterion_group, criterion_main};
use probemap::ProbingTable;
use rand::{Rng, distr::Alphanumeric};
use rustc_hash::FxBuildHasher;
use std::collections::HashMap;

/// Generates distinct string keys with random values for benchmarking.
fn generate_data(size: usize) -> Vec<(String, u64)> {
    let mut rng = rand::rng();
    let mut seen = HashMap::with_capacity(size);
    while seen.len() < size {
        let key_len = rng.random_range(4..=25);
        let key: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(key_len)
            .map(char::from)
            .collect();
        let value: u64 = rng.random();
        seen.insert(key, value);
    }
    seen.into_iter().collect()
}

fn benchmark_probe_table_comparisons(c: &mut Criterion) {
    for &size in &[1_000, 10_000, 100_000] {
        let mut group = c.benchmark_group(format!("size={size}"));
        if size >= 100_000 {
            group.sample_size(10);
        }

        let data = generate_data(size);

        // --- ProbingTable ---
        group.bench_function("ProbingTable - insert", |b| {
            b.iter_with_setup(ProbingTable::<String, u64>::new, |mut table| {
                for (k, v) in data.iter() {
                    table.insert(black_box(k.clone()), black_box(*v));
                }
            });
        });

        let table: ProbingTable<String, u64> = data.iter().cloned().collect();
        group.bench_function("ProbingTable - find", |b| {
            b.iter(|| {
                for (k, _) in data.iter() {
                    black_box(table.find(black_box(k.as_str())));
                }
            })
        });

        group.bench_function("ProbingTable - delete", |b| {
            b.iter_with_setup(
                || table_from(&data),
                |mut table| {
                    for (k, _) in data.iter() {
                        table.delete(black_box(k.as_str()));
                    }
                },
            )
        });

        // --- std HashMap with the same hasher ---
        group.bench_function("HashMap - insert", |b| {
            b.iter_with_setup(
                HashMap::<String, u64, FxBuildHasher>::default,
                |mut map| {
                    for (k, v) in data.iter() {
                        map.insert(black_box(k.clone()), black_box(*v));
                    }
                },
            );
        });

        let map: HashMap<String, u64, FxBuildHasher> = data.iter().cloned().collect();
        group.bench_function("HashMap - get", |b| {
            b.iter(|| {
                for (k, _) in data.iter() {
                    black_box(map.get(black_box(k.as_str())));
                }
            })
        });

        group.finish();
    }
}

fn table_from(data: &[(String, u64)]) -> ProbingTable<String, u64> {
    data.iter().cloned().collect()
}

criterion_group!(benches, benchmark_probe_table_comparisons);
criterion_main!(benches);
