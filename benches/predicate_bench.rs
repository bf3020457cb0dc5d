//! Criterion benchmarks for u-predicate sorting and planning.
//!
//! Uses synthetic registries (chained constraints, trivial predicates) to
//! measure pure ordering overhead independent of any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_predicate::predicates::{BoxedPredicate, Phash, PlanRequest, Predicate, PredicateRegistry};
use u_predicate::sorter::{Placement, TopologicalSorter};

// ===========================================================================
// Synthetic predicate: input equals value
// ===========================================================================

struct Equals(u32);

impl Predicate<u32> for Equals {
    fn description(&self) -> String {
        format!("== {}", self.0)
    }

    fn phash(&self) -> Phash {
        self.description().into()
    }

    fn evaluate(&self, input: &u32) -> bool {
        *input == self.0
    }
}

fn registry(n: usize) -> PredicateRegistry<u32, (), u32> {
    let mut registry = PredicateRegistry::new();
    for i in 0..n {
        registry
            .add(
                format!("p{i}"),
                |v: &u32, _: &()| Ok(Box::new(Equals(*v)) as BoxedPredicate<u32>),
                None,
                None,
            )
            .expect("synthetic registry is acyclic and within capacity");
    }
    registry
}

/// Sorter where every entry must come after its predecessor, inserted in
/// reverse so the sort has real work to do.
fn chained_sorter(n: usize) -> TopologicalSorter<usize> {
    let mut sorter = TopologicalSorter::new();
    for i in (0..n).rev() {
        let placement = if i == 0 {
            Placement::new()
        } else {
            Placement::new().after(format!("n{}", i - 1))
        };
        sorter
            .add(format!("n{i}"), i, placement)
            .expect("names are unique");
    }
    sorter
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_sorted(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorter_chain");

    for &n in &[10, 100, 1000] {
        let sorter = chained_sorter(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &sorter, |b, s| {
            b.iter(|| black_box(s.sorted().expect("chain is acyclic").len()));
        });
    }

    group.finish();
}

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("planner");

    for &(registered, requested) in &[(10, 2), (30, 10), (60, 30)] {
        let registry = registry(registered);
        let request = (0..requested)
            .step_by(2)
            .fold(PlanRequest::new(), |req, i| req.with(format!("p{i}"), i as u32));
        group.bench_with_input(
            BenchmarkId::new(format!("r{registered}_q{}", request.len()), registered),
            &(registry, request),
            |b, (reg, req)| {
                b.iter(|| black_box(reg.plan(&(), req).expect("all names known").order()));
            },
        );
    }

    group.finish();
}

fn bench_unknown(c: &mut Criterion) {
    let registry = registry(60);
    let request = PlanRequest::new().with("p7x", 1).with("q12", 2);
    c.bench_function("planner_unknown_suggestions", |b| {
        b.iter(|| black_box(registry.plan(&(), &request).is_err()));
    });
}

criterion_group!(benches, bench_sorted, bench_plan, bench_unknown);
criterion_main!(benches);
