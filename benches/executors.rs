use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use stepgraph::graph::Graph;
use stepgraph::{
    BfsExecutor, BipartiteExecutor, ComponentsExecutor, CycleExecutor, DfsExecutor, Stepwise,
    TopoExecutor,
};

/// Symmetric grid graph: bipartite, connected, full of short cycles.
fn grid(side: usize) -> Graph {
    let mut g = Graph::new();
    for i in 0..side * side {
        g.add_node(&format!("n{i}"));
    }
    for r in 0..side {
        for c in 0..side {
            let u = r * side + c;
            if c + 1 < side {
                g.add_edge(u, u + 1);
                g.add_edge(u + 1, u);
            }
            if r + 1 < side {
                g.add_edge(u, u + side);
                g.add_edge(u + side, u);
            }
        }
    }
    g
}

/// Layered DAG: every node points at the whole next layer.
fn layered_dag(layers: usize, width: usize) -> Graph {
    let mut g = Graph::new();
    for i in 0..layers * width {
        g.add_node(&format!("n{i}"));
    }
    for l in 0..layers - 1 {
        for a in 0..width {
            for b in 0..width {
                g.add_edge(l * width + a, (l + 1) * width + b);
            }
        }
    }
    g
}

fn bench_traversals(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");
    for side in [8usize, 16, 32] {
        let g = grid(side);
        group.bench_with_input(BenchmarkId::new("bfs", side), &g, |b, g| {
            b.iter(|| {
                let mut bfs = BfsExecutor::new(g, Some("n0"));
                black_box(bfs.run_to_completion())
            });
        });
        group.bench_with_input(BenchmarkId::new("dfs", side), &g, |b, g| {
            b.iter(|| {
                let mut dfs = DfsExecutor::new(g, Some("n0"));
                black_box(dfs.run_to_completion())
            });
        });
    }
    group.finish();
}

fn bench_verdicts(c: &mut Criterion) {
    let mut group = c.benchmark_group("verdict");
    for side in [8usize, 16, 32] {
        let g = grid(side);
        group.bench_with_input(BenchmarkId::new("components", side), &g, |b, g| {
            b.iter(|| {
                let mut exec = ComponentsExecutor::new(g);
                black_box(exec.run_to_completion())
            });
        });
        group.bench_with_input(BenchmarkId::new("cycle", side), &g, |b, g| {
            b.iter(|| {
                let mut exec = CycleExecutor::new(g, Some("n0"));
                black_box(exec.run_to_completion())
            });
        });
        group.bench_with_input(BenchmarkId::new("bipartite", side), &g, |b, g| {
            b.iter(|| {
                let mut exec = BipartiteExecutor::new(g, Some("n0"));
                black_box(exec.run_to_completion())
            });
        });
    }
    group.finish();
}

fn bench_topological(c: &mut Criterion) {
    let mut group = c.benchmark_group("topological");
    for (layers, width) in [(8usize, 8usize), (16, 16), (32, 16)] {
        let g = layered_dag(layers, width);
        let id = format!("{layers}x{width}");
        group.bench_with_input(BenchmarkId::new("kahn", &id), &g, |b, g| {
            b.iter(|| {
                let mut topo = TopoExecutor::new(g);
                black_box(topo.run_to_completion())
            });
        });
    }
    group.finish();
}

fn bench_single_step(c: &mut Criterion) {
    // Cost of one observable transition including snapshot construction.
    let g = grid(32);
    c.bench_function("single_step_bfs_1024_nodes", |b| {
        b.iter(|| {
            let mut bfs = BfsExecutor::new(&g, Some("n0"));
            black_box(bfs.step())
        });
    });
}

criterion_group!(
    benches,
    bench_traversals,
    bench_verdicts,
    bench_topological,
    bench_single_step
);
criterion_main!(benches);
