use criterion::criterion_main;

mod common;

mod node;

criterion_main!(
    node::set_get::bench_set_get_group,
    node::iter::bench_iter_group,
);
