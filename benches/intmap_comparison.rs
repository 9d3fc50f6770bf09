use core::hint::black_box;
use std::collections::HashMap as StdHashMap;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashMap as HashbrownMap;
use intmap::IntMap;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;

const SIZES: &[usize] = &[
    (1 << 10),
    (1 << 12),
    (1 << 14),
    (1 << 16),
    (1 << 18),
];

fn random_keys(count: usize, seed: u64) -> Vec<u32> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count).map(|_| rng.random::<u32>()).collect()
}

fn sequential_keys(count: usize) -> Vec<u32> {
    (0..count as u32).collect()
}

fn filled_intmap(keys: &[u32]) -> IntMap<u64> {
    let mut map = IntMap::new();
    for &key in keys {
        map.insert(key, key as u64);
    }
    map
}

fn filled_hashbrown(keys: &[u32]) -> HashbrownMap<u32, u64> {
    let mut map = HashbrownMap::new();
    for &key in keys {
        map.insert(key, key as u64);
    }
    map
}

fn filled_std(keys: &[u32]) -> StdHashMap<u32, u64> {
    let mut map = StdHashMap::new();
    for &key in keys {
        map.insert(key, key as u64);
    }
    map
}

fn bench_insert(c: &mut Criterion, name: &str, make_keys: fn(usize) -> Vec<u32>) {
    let mut group = c.benchmark_group(name);
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = make_keys(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("intmap/{size}"), |b| {
            b.iter(|| black_box(filled_intmap(&keys)))
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| black_box(filled_hashbrown(&keys)))
        });
        group.bench_function(format!("std/{size}"), |b| {
            b.iter(|| black_box(filled_std(&keys)))
        });
    }

    group.finish();
}

fn bench_insert_sequential(c: &mut Criterion) {
    bench_insert(c, "insert_sequential", sequential_keys);
}

fn bench_insert_random(c: &mut Criterion) {
    bench_insert(c, "insert_random", |count| random_keys(count, 0x5eed));
}

fn bench_search_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_hit");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys(size, 0x5eed);
        let mut lookups = keys.clone();
        lookups.shuffle(&mut SmallRng::seed_from_u64(size as u64));

        let intmap = filled_intmap(&keys);
        let hashbrown = filled_hashbrown(&keys);
        let std_map = filled_std(&keys);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("intmap/{size}"), |b| {
            b.iter(|| {
                for key in &lookups {
                    black_box(intmap.search(*key).ok());
                }
            })
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for key in &lookups {
                    black_box(hashbrown.get(key));
                }
            })
        });
        group.bench_function(format!("std/{size}"), |b| {
            b.iter(|| {
                for key in &lookups {
                    black_box(std_map.get(key));
                }
            })
        });
    }

    group.finish();
}

fn bench_search_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_miss");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        // Even keys are stored, odd keys are probed.
        let keys = (0..size as u32).map(|k| k * 2).collect::<Vec<_>>();
        let misses = (0..size as u32).map(|k| k * 2 + 1).collect::<Vec<_>>();

        let intmap = filled_intmap(&keys);
        let hashbrown = filled_hashbrown(&keys);
        let std_map = filled_std(&keys);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("intmap/{size}"), |b| {
            b.iter(|| {
                for key in &misses {
                    black_box(intmap.search(*key).ok());
                }
            })
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for key in &misses {
                    black_box(hashbrown.get(key));
                }
            })
        });
        group.bench_function(format!("std/{size}"), |b| {
            b.iter(|| {
                for key in &misses {
                    black_box(std_map.get(key));
                }
            })
        });
    }

    group.finish();
}

fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys(size, 0xde1e7e);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("intmap/{size}"), |b| {
            b.iter_batched(
                || filled_intmap(&keys),
                |mut map| {
                    for key in &keys {
                        black_box(map.delete(*key).ok());
                    }
                    black_box(map)
                },
                BatchSize::LargeInput,
            )
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || filled_hashbrown(&keys),
                |mut map| {
                    for key in &keys {
                        black_box(map.remove(key));
                    }
                    black_box(map)
                },
                BatchSize::LargeInput,
            )
        });
        group.bench_function(format!("std/{size}"), |b| {
            b.iter_batched(
                || filled_std(&keys),
                |mut map| {
                    for key in &keys {
                        black_box(map.remove(key));
                    }
                    black_box(map)
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

#[derive(Clone, Copy)]
enum Op {
    Insert(u32),
    Search(u32),
    Delete(u32),
}

fn zipf_ops(count: usize, key_space: usize, seed: u64) -> Vec<Op> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let zipf = Zipf::new(key_space as f64, 1.1).unwrap();

    (0..count)
        .map(|_| {
            let key = rng.sample::<f64, _>(&zipf) as u32;
            match rng.random_range(0..10u8) {
                0..=5 => Op::Search(key),
                6..=8 => Op::Insert(key),
                _ => Op::Delete(key),
            }
        })
        .collect()
}

fn bench_mixed_zipf(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_zipf");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let ops = zipf_ops(size, size, size as u64);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("intmap/{size}"), |b| {
            b.iter(|| {
                let mut map = IntMap::new();
                for op in &ops {
                    match *op {
                        Op::Insert(key) => black_box(map.insert(key, key as u64)),
                        Op::Search(key) => black_box(map.search(key).ok().copied()),
                        Op::Delete(key) => black_box(map.delete(key).ok()),
                    };
                }
                black_box(map)
            })
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                let mut map = HashbrownMap::new();
                for op in &ops {
                    match *op {
                        Op::Insert(key) => black_box(map.insert(key, key as u64)),
                        Op::Search(key) => black_box(map.get(&key).copied()),
                        Op::Delete(key) => black_box(map.remove(&key)),
                    };
                }
                black_box(map)
            })
        });
        group.bench_function(format!("std/{size}"), |b| {
            b.iter(|| {
                let mut map = StdHashMap::new();
                for op in &ops {
                    match *op {
                        Op::Insert(key) => black_box(map.insert(key, key as u64)),
                        Op::Search(key) => black_box(map.get(&key).copied()),
                        Op::Delete(key) => black_box(map.remove(&key)),
                    };
                }
                black_box(map)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_sequential,
    bench_insert_random,
    bench_search_hit,
    bench_search_miss,
    bench_delete,
    bench_mixed_zipf,
);

criterion_main!(benches);
