use std::sync::Arc;

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use patrilang::{
    trajectory, AggregateThreshold, Argent, Case, CaseSet, FluxArgent, Materiel, Patrimoine,
    Personne, ReconcileConfig, Reconciler, SharedPossession,
};

fn make_case(name: &str, possessions: u32) -> Case {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2035, 1, 1).unwrap();

    // A mix of assets, cash and monthly flows so projection exercises every
    // valuation law.
    let mut held: Vec<SharedPossession> = Vec::with_capacity(possessions as usize);
    for i in 0..possessions {
        let possession: SharedPossession = match i % 3 {
            0 => Arc::new(
                Materiel::new(format!("Materiel {i}"), start, 1000 + i64::from(i), -0.05).unwrap(),
            ),
            1 => Arc::new(Argent::new(format!("Compte {i}"), start, 500)),
            _ => Arc::new(FluxArgent::new(format!("Salaire {i}"), start, end, 0, 100, 28).unwrap()),
        };
        held.push(possession);
    }

    Case::builder()
        .name(name)
        .patrimoine(Patrimoine::new(name, Personne::new("Zety"), start, held))
        .end(end)
        .objective(Arc::new(AggregateThreshold::new(0, end)))
        .build()
        .unwrap()
}

fn bench_projection(c: &mut Criterion) {
    let case = make_case("Zety", 64);
    let target = NaiveDate::from_ymd_opt(2030, 6, 1).unwrap();

    let mut group = c.benchmark_group("projection");
    group.throughput(Throughput::Elements(64));
    group.bench_function("project_to", |b| {
        b.iter(|| case.patrimoine().project_to(target).aggregate_book_value());
    });
    group.finish();
}

fn bench_trajectory(c: &mut Criterion) {
    let case = make_case("Zety", 64);
    let config = ReconcileConfig::default();

    c.bench_function("trajectory_monthly_10y", |b| {
        b.iter(|| trajectory::sample(&case, &config));
    });
}

fn bench_reconcile(c: &mut Criterion) {
    let planned = CaseSet::new((0..16).map(|i| make_case(&format!("Cas {i}"), 16))).unwrap();
    let done = CaseSet::new((0..16).map(|i| make_case(&format!("Cas {i}"), 16))).unwrap();
    let reconciler = Reconciler::default();

    c.bench_function("reconcile_16_cases", |b| {
        b.iter(|| reconciler.reconcile(&planned, &done).unwrap());
    });
}

criterion_group!(benches, bench_projection, bench_trajectory, bench_reconcile);
criterion_main!(benches);
