//! Performance benchmarks for the payroll engine.
//!
//! - Single month through the pipeline, cold and cached calendar
//! - A year of months for a batch of salaries
//! - A full HTTP round trip through the router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{MemoizedCalendar, calculate_payroll};
use payroll_engine::config::ConfigLoader;
use payroll_engine::models::{IncomeTaxBase, PayrollInput, Period};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/br-rj").expect("Failed to load config")
}

fn create_input(month: u32, base_salary: Decimal) -> PayrollInput {
    PayrollInput::new(
        Period::new(2025, month).expect("valid month"),
        base_salary,
        Decimal::from(3),
        Decimal::from(2),
        IncomeTaxBase::GrossPay,
    )
}

/// One month with the holidays recomputed on every call.
fn bench_single_month(c: &mut Criterion) {
    let loader = load_config();
    let calendar = loader.calendar();
    let input = create_input(5, Decimal::new(350000, 2));

    c.bench_function("single_month_rule_calendar", |b| {
        b.iter(|| calculate_payroll(black_box(&input), loader.config(), &calendar))
    });
}

/// One month with the year's holidays already cached.
fn bench_single_month_memoized(c: &mut Criterion) {
    let loader = load_config();
    let calendar = MemoizedCalendar::new(loader.calendar());
    let input = create_input(5, Decimal::new(350000, 2));

    c.bench_function("single_month_memoized_calendar", |b| {
        b.iter(|| calculate_payroll(black_box(&input), loader.config(), &calendar))
    });
}

/// Twelve months for a growing batch of salaries.
fn bench_salary_batches(c: &mut Criterion) {
    let loader = load_config();
    let calendar = MemoizedCalendar::new(loader.calendar());
    let mut group = c.benchmark_group("salary_batches");

    for batch_size in [10usize, 100, 1000].iter() {
        let inputs: Vec<PayrollInput> = (0..*batch_size)
            .flat_map(|i| {
                let salary = Decimal::new(150_000 + (i as i64) * 1_000, 2);
                (1..=12).map(move |month| create_input(month, salary))
            })
            .collect();

        group.throughput(Throughput::Elements(inputs.len() as u64));
        group.bench_with_input(BenchmarkId::new("employees", batch_size), &inputs, |b, inputs| {
            b.iter(|| {
                for input in inputs {
                    black_box(calculate_payroll(input, loader.config(), &calendar).ok());
                }
            })
        });
    }

    group.finish();
}

/// A request through the router, including JSON and report rendering.
fn bench_http_round_trip(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let router = create_router(AppState::new(load_config()));
    let body = serde_json::json!({
        "month": 5,
        "year": 2025,
        "base_salary": "3500.00",
        "overtime_hours_60": "3",
        "overtime_hours_120": "2"
    })
    .to_string();

    c.bench_function("http_calculate", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
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
    bench_single_month,
    bench_single_month_memoized,
    bench_salary_batches,
    bench_http_round_trip,
);
criterion_main!(benches);
