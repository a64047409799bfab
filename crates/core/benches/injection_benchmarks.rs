//! Injection throughput benchmarks
//!
//! Measures resolution cost against repeated injection through a shared
//! engine, a resolution cache and a freshly built engine per instance.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::HashMap;

use confix_core::{
    Configurable, EngineOptions, PropertyDescriptor, PropertyEngine, PropertyTable,
    ResolutionCache,
};

#[derive(Default)]
struct Settings {
    name: String,
    retries: i32,
    timeout: i64,
    ratio: f64,
    enabled: bool,
}

impl Configurable for Settings {
    fn properties() -> PropertyTable<Self> {
        PropertyTable::new()
            .with(PropertyDescriptor::field("name", |s: &mut Settings| &mut s.name).with_default("svc"))
            .with(PropertyDescriptor::field("retries", |s: &mut Settings| &mut s.retries).with_default("3"))
            .with(PropertyDescriptor::field("timeout", |s: &mut Settings| &mut s.timeout).with_default("1000"))
            .with(PropertyDescriptor::field("ratio", |s: &mut Settings| &mut s.ratio).with_default("0.5"))
            .with(PropertyDescriptor::setter("enabled", |s: &mut Settings, v: bool| s.enabled = v))
    }
}

fn source() -> HashMap<String, String> {
    [
        ("app.name", "bench"),
        ("app.retries", "5"),
        ("app.timeout", "250"),
        ("app.enabled", "true"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Benchmark the 100k instantiation workload with one shared engine
fn benchmark_shared_engine(c: &mut Criterion) {
    let engine = PropertyEngine::<Settings>::new().with_prefix("app.");
    let source = source();

    c.bench_function("shared_engine_100k", |b| {
        b.iter(|| {
            for _ in 0..100_000 {
                let mut settings = Settings::default();
                engine.inject(&mut settings, &source).unwrap();
                black_box(&settings);
            }
        })
    });
}

/// Benchmark per-call injection patterns with different batch sizes
fn benchmark_injection_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("injection_patterns");
    let source = source();
    let options = EngineOptions::new().with_prefix("app.");
    let cache = ResolutionCache::standard();

    for count in [100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("cache", count), &count, |b, &count| {
            b.iter(|| {
                for _ in 0..count {
                    let mut settings = Settings::default();
                    cache.inject(&mut settings, &source, &options).unwrap();
                    black_box(&settings);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("engine_per_call", count), &count, |b, &count| {
            b.iter(|| {
                for _ in 0..count {
                    let engine = PropertyEngine::<Settings>::new().with_options(options.clone());
                    let mut settings = Settings::default();
                    engine.inject(&mut settings, &source).unwrap();
                    black_box(&settings);
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_shared_engine, benchmark_injection_patterns);
criterion_main!(benches);
