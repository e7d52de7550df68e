//! Performance benchmarks for the Payslip Engine.
//!
//! Covers the pure calculation path, bracket resolution against the seeded
//! tax table, and full payslip requests through the HTTP router.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use payslip_engine::api::{AppState, create_router};
use payslip_engine::calculation::{calculate_payslip, compute_payslip, resolve_bracket};
use payslip_engine::config::ConfigLoader;
use payslip_engine::models::PayPeriod;
use payslip_engine::store::{InMemoryStore, RecordStore};

use axum::{body::Body, http::Request};
use rust_decimal::Decimal;
use tower::ServiceExt;

/// Creates a store seeded from the bundled payroll configuration.
fn create_test_store() -> InMemoryStore {
    ConfigLoader::load("./config/payroll")
        .expect("Failed to load config")
        .into_store()
        .expect("Failed to seed store")
}

fn march_2017() -> PayPeriod {
    PayPeriod::new(3, 2017).expect("valid period")
}

fn bench_calculate_payslip(c: &mut Criterion) {
    let store = create_test_store();
    let employee = store.employee(1).expect("seed employee 1");
    let brackets = store.tax_brackets();
    let bracket = resolve_bracket(employee.annual_salary, &brackets)
        .expect("covered salary")
        .clone();
    let period = march_2017();

    c.bench_function("calculate_payslip", |b| {
        b.iter(|| calculate_payslip(black_box(&employee), black_box(&bracket), period))
    });
}

fn bench_resolve_bracket(c: &mut Criterion) {
    let store = create_test_store();
    let brackets = store.tax_brackets();
    let salaries = ["14352", "22124", "60050", "120000", "406702"];

    let mut group = c.benchmark_group("resolve_bracket");
    for salary in salaries {
        let salary: Decimal = salary.parse().expect("valid decimal");
        group.bench_with_input(BenchmarkId::from_parameter(salary), &salary, |b, salary| {
            b.iter(|| resolve_bracket(black_box(*salary), &brackets))
        });
    }
    group.finish();
}

fn bench_compute_payslip_batch(c: &mut Criterion) {
    let store = create_test_store();
    let period = march_2017();
    let ids: Vec<u64> = store.list_employees().iter().map(|e| e.id).collect();

    let mut group = c.benchmark_group("compute_payslip");
    group.throughput(Throughput::Elements(ids.len() as u64));
    group.bench_function("all_seed_employees", |b| {
        b.iter(|| {
            ids.iter()
                .map(|id| compute_payslip(&store, *id, period))
                .collect::<Vec<_>>()
        })
    });
    group.finish();
}

fn bench_payslip_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(create_test_store()));

    c.bench_function("payslip_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("GET")
                        .uri("/payslip/1?month=3&year=2017")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_calculate_payslip,
    bench_resolve_bracket,
    bench_compute_payslip_batch,
    bench_payslip_request,
);
criterion_main!(benches);
