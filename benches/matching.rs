//! Benchmark for the matching and registration path

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use poolmatch::{
    AttributeMap, ExactMatchComparator, NullSink, PoolSpec, Protocol, StorageBackend, StorageClass,
};
use serde_json::json;
use std::sync::Arc;

fn make_backend(name: &str, pool_count: usize) -> Arc<StorageBackend> {
    let specs = (0..pool_count)
        .map(|i| {
            let mut attrs = AttributeMap::new();
            attrs.insert("tier".to_string(), json!(if i % 2 == 0 { "fast" } else { "slow" }));
            attrs.insert("media".to_string(), json!("ssd"));
            attrs.insert("iops".to_string(), json!(10_000));
            PoolSpec::new(format!("pool-{:04}", i), attrs)
        })
        .collect();
    StorageBackend::new(name, Protocol::Block, specs)
}

fn make_class() -> StorageClass {
    StorageClass::from_json(
        r#"{"name": "gold", "attributes": {"tier": "fast", "media": "ssd"}}"#,
        Arc::new(ExactMatchComparator),
        Arc::new(NullSink),
    )
    .unwrap()
}

fn bench_check_and_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");
    group.throughput(Throughput::Elements(100));

    group.bench_function("check_and_add_backend_100_pools", |b| {
        let backend = make_backend("bench", 100);
        let mut class = make_class();

        b.iter(|| {
            let added = class.check_and_add_backend(black_box(&backend)).unwrap();
            black_box(added);
        });
    });

    group.finish();
}

fn bench_construct_external(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");
    group.throughput(Throughput::Elements(1));

    let mut class = make_class();
    let backends: Vec<_> = (0..10)
        .map(|i| make_backend(&format!("backend-{:02}", i), 50))
        .collect();
    for backend in &backends {
        class.check_and_add_backend(backend).unwrap();
    }

    group.bench_function("construct_external", |b| {
        b.iter(|| {
            let external = class.construct_external();
            black_box(external);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_check_and_add, bench_construct_external);
criterion_main!(benches);
