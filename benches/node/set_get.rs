use criterion::{criterion_group, BatchSize, Criterion};
use trienode::ChildMap;

use crate::common::{random_keys, random_node, NODE_SIZES};

fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("node/set");
    for size in NODE_SIZES {
        let keys = random_keys(*size, 69420);
        group.bench_function(size.to_string(), |b| {
            b.iter_batched(
                ChildMap::<u64>::new,
                |mut node| {
                    for key in &keys {
                        node.set(key, u64::from(*key)).unwrap();
                    }
                    node
                },
                BatchSize::SmallInput,
            );
        });
    }
    drop(group);

    let mut group = c.benchmark_group("node/get");
    for size in NODE_SIZES {
        let node = random_node(*size, 69420);
        let keys = random_keys(*size, 1337);
        group.bench_function(size.to_string(), |b| {
            b.iter(|| {
                for key in &keys {
                    let _ = std::hint::black_box(node.get(key));
                }
            });
        });
    }
    drop(group);

    let mut group = c.benchmark_group("node/delete");
    for size in NODE_SIZES {
        let node = random_node(*size, 69420);
        let keys = random_keys(*size, 1337);
        group.bench_function(size.to_string(), |b| {
            b.iter_batched(
                || node.clone(),
                |mut node| {
                    for key in &keys {
                        let _ = std::hint::black_box(node.delete(key));
                    }
                    node
                },
                BatchSize::SmallInput,
            );
        });
    }
}

criterion_group!(bench_set_get_group, bench);
