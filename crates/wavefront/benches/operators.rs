//! Operator benchmarks.
//!
//! Exercises the two advance load-balancing strategies on a degree-skewed
//! graph (one hub plus a uniform background) and the end-to-end algorithms
//! on random graphs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

use wavefront::prelude::*;

/// A graph where vertex 0 touches everyone and the rest is sparse: the
/// worst case for element-mapped lanes.
fn skewed_graph(n: usize) -> CsrGraph {
    let mut rng = StdRng::seed_from_u64(99);
    let mut builder = CsrGraphBuilder::new(n);
    for v in 1..n as u32 {
        builder.add_edge(0, v);
    }
    for _ in 0..n * 4 {
        let a = rng.gen_range(1..n as u32);
        let b = rng.gen_range(1..n as u32);
        if a != b {
            builder.add_edge(a, b);
        }
    }
    builder.build()
}

fn random_undirected(n: usize, p: f64) -> Arc<CsrGraph> {
    let mut rng = StdRng::seed_from_u64(4);
    let mut builder = CsrGraphBuilder::new(n);
    for a in 0..n as u32 {
        for b in (a + 1)..n as u32 {
            if rng.gen_bool(p) {
                builder.add_undirected_edge(a, b);
            }
        }
    }
    Arc::new(builder.build())
}

fn bench_advance(c: &mut Criterion) {
    let n = 10_000;
    let graph = skewed_graph(n);
    let mut group = c.benchmark_group("advance");
    group.throughput(Throughput::Elements(graph.edge_count() as u64));

    for (name, strategy) in [
        ("merge_path", LoadBalance::MergePath),
        ("element_mapped", LoadBalance::ElementMapped),
    ] {
        group.bench_with_input(BenchmarkId::new(name, n), &strategy, |b, &strategy| {
            let config = AdvanceConfig::new().with_load_balance(strategy);
            b.iter(|| {
                let mut frontier = Frontier::new();
                frontier.sequence(VertexId(0), n);
                advance(&graph, &mut frontier, &config, |_, dst, _, _| {
                    black_box(dst).get() % 2 == 0
                })
                .unwrap();
                black_box(frontier.len())
            });
        });
    }
    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let n = 100_000;
    let mut group = c.benchmark_group("filter");
    group.throughput(Throughput::Elements(n as u64));

    group.bench_function("modulo", |b| {
        b.iter(|| {
            let mut frontier = Frontier::new();
            frontier.sequence(VertexId(0), n);
            filter(&mut frontier, |v: VertexId| black_box(v).get() % 7 != 0);
            black_box(frontier.len())
        });
    });
    group.finish();
}

fn bench_algorithms(c: &mut Criterion) {
    let graph = random_undirected(400, 0.03);
    let n = graph.vertex_count();
    let mut group = c.benchmark_group("algorithms");

    group.bench_function("kcore", |b| {
        let mut cores = vec![0u32; n];
        b.iter(|| {
            wavefront::kcore::run(Arc::clone(&graph), &mut cores).unwrap();
            black_box(cores[0])
        });
    });

    group.bench_function("bc", |b| {
        let mut sigmas = vec![0.0f32; n];
        let mut bc_values = vec![0.0f32; n];
        b.iter(|| {
            wavefront::bc::run(Arc::clone(&graph), VertexId(0), &mut sigmas, &mut bc_values)
                .unwrap();
            black_box(bc_values[0])
        });
    });
    group.finish();
}

criterion_group!(benches, bench_advance, bench_filter, bench_algorithms);
criterion_main!(benches);
