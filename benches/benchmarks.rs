//! 开放寻址哈希表性能基准测试

use criterion::{
    criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, PlotConfiguration,
    Throughput,
};

use probing_hashtable::{
    batch_get, batch_insert, AlgorithmHasher, HashAlgorithm, ProbeStrategy, ProbingTable,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// 基准测试配置
const SEED: u64 = 42;
const ITEM_COUNTS: [usize; 3] = [1_000, 10_000, 100_000];
const KEY_SIZE: usize = 16;

/// 生成随机键值对
fn generate_items(count: usize) -> Vec<(Vec<u8>, u64)> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..count)
        .map(|i| {
            let mut key = vec![0u8; KEY_SIZE];
            rng.fill(&mut key[..]);
            (key, i as u64)
        })
        .collect()
}

fn strategies() -> [(&'static str, ProbeStrategy); 2] {
    [
        ("linear", ProbeStrategy::linear()),
        ("quadratic", ProbeStrategy::quadratic()),
    ]
}

fn new_table(strategy: ProbeStrategy) -> ProbingTable<Vec<u8>, u64> {
    ProbingTable::new(AlgorithmHasher::new(HashAlgorithm::AHash), strategy)
}

fn filled_table(strategy: ProbeStrategy, items: &[(Vec<u8>, u64)]) -> ProbingTable<Vec<u8>, u64> {
    let mut table = new_table(strategy);
    batch_insert(&mut table, items.iter().cloned());
    table
}

/// 插入操作基准测试（包含扩容开销）
fn bench_insert(c: &mut Criterion) {
    let plot_config = PlotConfiguration::default().summary_scale(criterion::AxisScale::Logarithmic);
    let mut group = c.benchmark_group("Insert");
    group.plot_config(plot_config);

    for &count in ITEM_COUNTS.iter() {
        let items = generate_items(count);
        group.throughput(Throughput::Elements(count as u64));

        for (name, strategy) in strategies() {
            group.bench_with_input(BenchmarkId::new(name, count), &items, |b, items| {
                b.iter_batched(
                    || new_table(strategy),
                    |mut table| {
                        for (key, value) in items {
                            criterion::black_box(table.insert(key.clone(), *value));
                        }
                        table
                    },
                    BatchSize::LargeInput,
                );
            });
        }
    }
    group.finish();
}

/// 查询操作基准测试
fn bench_get(c: &mut Criterion) {
    let plot_config = PlotConfiguration::default().summary_scale(criterion::AxisScale::Logarithmic);
    let mut group = c.benchmark_group("Get");
    group.plot_config(plot_config);

    for &count in ITEM_COUNTS.iter() {
        let items = generate_items(count);
        let keys: Vec<Vec<u8>> = items.iter().map(|(k, _)| k.clone()).collect();
        group.throughput(Throughput::Elements(count as u64));

        for (name, strategy) in strategies() {
            let table = filled_table(strategy, &items);
            group.bench_with_input(BenchmarkId::new(name, count), &keys, |b, keys| {
                b.iter(|| {
                    for key in keys {
                        criterion::black_box(table.get(key));
                    }
                });
            });
        }
    }
    group.finish();
}

/// 删除操作基准测试
fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("Remove");

    for &count in ITEM_COUNTS.iter() {
        let items = generate_items(count);
        let keys: Vec<Vec<u8>> = items.iter().map(|(k, _)| k.clone()).collect();
        group.throughput(Throughput::Elements(count as u64));

        for (name, strategy) in strategies() {
            group.bench_with_input(BenchmarkId::new(name, count), &keys, |b, keys| {
                b.iter_batched(
                    || filled_table(strategy, &items),
                    |mut table| {
                        for key in keys {
                            criterion::black_box(table.remove(key));
                        }
                        table
                    },
                    BatchSize::LargeInput,
                );
            });
        }
    }
    group.finish();
}

/// 墓碑较多时的查询基准测试
fn bench_get_with_tombstones(c: &mut Criterion) {
    let mut group = c.benchmark_group("Get With Tombstones");
    let items = generate_items(10_000);
    let keys: Vec<Vec<u8>> = items.iter().map(|(k, _)| k.clone()).collect();

    for (name, strategy) in strategies() {
        let mut table = filled_table(strategy, &items);
        for key in keys.iter().step_by(2) {
            table.remove(key);
        }
        group.bench_function(name, |b| {
            b.iter(|| {
                let results = batch_get(&table, keys.iter());
                criterion::black_box(results);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_get,
    bench_remove,
    bench_get_with_tombstones
);
criterion_main!(benches);
