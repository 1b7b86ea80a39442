use criterion::{criterion_group, Criterion};
use trienode::NodeIterator;

use crate::common::{random_node, NODE_SIZES};

fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter/node");
    for size in NODE_SIZES {
        let node = random_node(*size, 69420);

        group.bench_function(format!("{size}/borrowed"), |b| {
            b.iter(|| {
                node.iter().for_each(|(k, n)| {
                    std::hint::black_box((k, n));
                });
            });
        });

        group.bench_function(format!("{size}/cursor"), |b| {
            b.iter(|| {
                let mut cursor = NodeIterator::items(&node);
                while let Some(item) = cursor.next(&node).unwrap() {
                    std::hint::black_box(item);
                }
            });
        });

        group.bench_function(format!("{size}/reversed"), |b| {
            b.iter(|| {
                let mut cursor = NodeIterator::reversed(&node);
                while let Some(item) = cursor.next(&node).unwrap() {
                    std::hint::black_box(item);
                }
            });
        });
    }
}

criterion_group!(bench_iter_group, bench);
