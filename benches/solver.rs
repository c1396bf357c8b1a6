//! Benchmarks for the sliding-tile solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fifteen::config::{Algorithm, Step, Weight};
use fifteen::{solve, Board, Evaluator, Heuristic, Problem, SearchConfig};

/// 20 moves from the canonical goal.
const EIGHT_PUZZLE: &str = "7 2 4\n5 0 6\n8 3 1";

/// One of the two hardest 8-puzzle positions, 31 moves out.
const HARDEST_EIGHT_PUZZLE: &str = "8 6 7\n2 5 4\n3 0 1";

fn problem(text: &str) -> Problem {
    let start: Board = text.parse().expect("benchmark board is well formed");
    Problem::with_canonical_goal(start)
}

fn bench_algorithms(c: &mut Criterion) {
    let problem = problem(EIGHT_PUZZLE);
    let weight = Weight::new(2.0).expect("valid weight");
    let step = Step::new(0.5).expect("valid step");
    let algorithms = [
        ("a_star", Algorithm::AStar),
        ("anytime_weighted", Algorithm::AnytimeWeighted { weight }),
        ("ara", Algorithm::Ara { weight, step }),
        ("ida_star", Algorithm::IdaStar),
    ];

    let mut group = c.benchmark_group("solve_8_puzzle");
    for (name, algorithm) in algorithms {
        let config = SearchConfig::new(algorithm, Heuristic::Manhattan);
        group.bench_function(name, |b| b.iter(|| solve(black_box(&problem), &config)));
    }
    group.finish();
}

/// The deepest 8-puzzle instance, where reopening and re-iteration costs show.
fn bench_hardest(c: &mut Criterion) {
    let problem = problem(HARDEST_EIGHT_PUZZLE);
    let mut group = c.benchmark_group("solve_hardest_8_puzzle");
    group.sample_size(10);
    for (name, algorithm) in [("a_star", Algorithm::AStar), ("ida_star", Algorithm::IdaStar)] {
        let config = SearchConfig::new(algorithm, Heuristic::Manhattan);
        group.bench_function(name, |b| b.iter(|| solve(black_box(&problem), &config)));
    }
    group.finish();
}

fn bench_heuristics(c: &mut Criterion) {
    let start: Board = "15 2 1 12\n8 5 6 11\n4 9 10 7\n3 14 13 0"
        .parse()
        .expect("benchmark board is well formed");
    let goal = start.goal_like();

    for (name, heuristic) in [
        ("estimate_misplaced", Heuristic::MisplacedTiles),
        ("estimate_manhattan", Heuristic::Manhattan),
    ] {
        let evaluator = Evaluator::new(heuristic, goal.clone());
        c.bench_function(name, |b| {
            b.iter(|| evaluator.estimate(black_box(&start)))
        });
    }
}

fn bench_neighbors(c: &mut Criterion) {
    let board: Board = "1 2 3 4\n5 6 0 8\n9 10 7 11\n13 14 15 12"
        .parse()
        .expect("benchmark board is well formed");

    c.bench_function("neighbors", |b| b.iter(|| black_box(&board).neighbors()));
}

criterion_group!(
    benches,
    bench_algorithms,
    bench_hardest,
    bench_heuristics,
    bench_neighbors
);
criterion_main!(benches);
