use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use coinchange::{DpSolver, GreedySolver};

const COINS_DESC: [usize; 6] = [50, 25, 10, 5, 2, 1];
const AMOUNTS: [usize; 4] = [113, 1113, 10113, 111307];

fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_change");
    let solver = GreedySolver::default();
    for amount in AMOUNTS {
        group.bench_with_input(BenchmarkId::from_parameter(amount), &amount, |b, &amount| {
            b.iter(|| solver.solve_detailed(black_box(amount), black_box(&COINS_DESC)))
        });
    }
    group.finish();
}

fn bench_dp(c: &mut Criterion) {
    let mut group = c.benchmark_group("dp_change");
    group.sample_size(20);
    let solver = DpSolver::default();
    for amount in AMOUNTS {
        group.bench_with_input(BenchmarkId::from_parameter(amount), &amount, |b, &amount| {
            b.iter(|| solver.solve(black_box(amount), black_box(&COINS_DESC)))
        });
    }
    group.finish();
}

fn bench_non_canonical(c: &mut Criterion) {
    let coins = [4, 3, 1];
    let greedy = GreedySolver::default();
    let dp = DpSolver::default();
    c.bench_function("greedy_non_canonical_1000", |b| {
        b.iter(|| greedy.solve_detailed(black_box(1000), black_box(&coins)))
    });
    c.bench_function("dp_non_canonical_1000", |b| {
        b.iter(|| dp.solve(black_box(1000), black_box(&coins)))
    });
}

criterion_group!(benches, bench_greedy, bench_dp, bench_non_canonical);
criterion_main!(benches);
