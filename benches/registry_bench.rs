//! Registry hot-path benchmarks.
//!
//! Measures cached lookups, threshold-filtered no-op calls, emission
//! through a null sink, and namespace reconfiguration fan-out.

use criterion::{Criterion, criterion_group, criterion_main};
use nexus_log::{
    LoggerOptions, LoggerPatch, Namespace, Region, Registry, Severity, Sink, SinkFactory,
};
use std::hint::black_box;
use std::sync::Arc;

struct NullSink;

impl Sink for NullSink {
    fn write(&self, _severity: Severity, _line: &str) {}
}

struct NullFactory;

impl SinkFactory for NullFactory {
    fn build(&self, _options: &LoggerOptions, _region: &Region) -> Vec<Arc<dyn Sink>> {
        vec![Arc::new(NullSink)]
    }
}

fn bench_cached_lookup(c: &mut Criterion) {
    let registry = Registry::with_sink_factory(Arc::new(NullFactory));
    let region = Region::new("bench");
    let namespace = Namespace::new("bench");
    registry.get_logger(&region, &namespace);

    c.bench_function("cached_lookup", |b| {
        b.iter(|| black_box(registry.get_logger(&region, &namespace)))
    });
}

fn bench_filtered_noop(c: &mut Criterion) {
    let registry = Registry::with_sink_factory(Arc::new(NullFactory));
    registry
        .configure(&LoggerPatch::new().with_level(Severity::Error))
        .unwrap();
    let logger = registry.global_logger();

    c.bench_function("filtered_noop", |b| {
        b.iter(|| {
            black_box(logger.debug("dropped"));
        })
    });
}

fn bench_emit_to_null_sink(c: &mut Criterion) {
    let registry = Registry::with_sink_factory(Arc::new(NullFactory));
    let logger = registry.global_logger();

    c.bench_function("emit_to_null_sink", |b| {
        b.iter(|| {
            black_box(logger.info("payload"));
        })
    });
}

fn bench_namespace_configure(c: &mut Criterion) {
    let registry = Registry::with_sink_factory(Arc::new(NullFactory));
    let namespace = Namespace::new("bench");
    for index in 0..32 {
        registry.get_logger(&Region::new(format!("region-{index}")), &namespace);
    }
    let patch = LoggerPatch::new().with_level(Severity::Info);

    c.bench_function("namespace_configure_32_instances", |b| {
        b.iter(|| {
            registry
                .configure_namespace(black_box(&patch), &namespace)
                .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_cached_lookup,
    bench_filtered_noop,
    bench_emit_to_null_sink,
    bench_namespace_configure
);
criterion_main!(benches);
