//! Benchmarks for the synchronous listing and form paths.
//!
//! These benchmarks measure field validation and page arithmetic, which run on
//! every keystroke and every navigation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use news_portal::form::{Errors, FieldValue, Values};
use news_portal::listing::{total_pages, Location, Pagination, PER_PAGE};
use news_portal::validation::validate;

fn bench_validate_email(c: &mut Criterion) {
    let value = FieldValue::Text("ivan.petrov@example.bg".to_string());
    let mut values = Values::new();
    values.insert("email".to_string(), value.clone());

    c.bench_function("validate_email", |b| {
        b.iter(|| validate(&Errors::new(), black_box("email"), black_box(&value), &values))
    });
}

fn bench_validate_repassword(c: &mut Criterion) {
    let value = FieldValue::Text("secret12".to_string());
    let mut values = Values::new();
    values.insert("password".to_string(), FieldValue::Text("secret12".to_string()));
    values.insert("repassword".to_string(), value.clone());

    c.bench_function("validate_repassword", |b| {
        b.iter(|| validate(&Errors::new(), black_box("repassword"), black_box(&value), &values))
    });
}

fn bench_total_pages(c: &mut Criterion) {
    c.bench_function("total_pages_1000", |b| {
        b.iter(|| {
            (0..1000u64)
                .map(|n| total_pages(black_box(n), PER_PAGE))
                .sum::<u32>()
        })
    });
}

fn bench_reconcile_and_window(c: &mut Criterion) {
    c.bench_function("reconcile_and_window", |b| {
        b.iter(|| {
            let mut pagination = Pagination::new(black_box(4321));
            let mut location = Location::parse("/news/category/sport?page=9999");
            pagination.reconcile(&mut location);
            pagination.window()
        })
    });
}

criterion_group!(
    benches,
    bench_validate_email,
    bench_validate_repassword,
    bench_total_pages,
    bench_reconcile_and_window
);
criterion_main!(benches);
