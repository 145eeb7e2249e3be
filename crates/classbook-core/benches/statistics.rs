use criterion::{black_box, criterion_group, criterion_main, Criterion};

use classbook_core::model::Student;
use classbook_core::statistics::{status_breakdown, ClassStats};

fn make_class(n: usize) -> Vec<Student> {
    (0..n)
        .map(|i| Student::new(i as i64, format!("student-{i}"), (i % 41) as f64 * 0.5))
        .collect()
}

fn bench_class_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("class_stats");

    for n in [30, 1_000, 100_000] {
        let students = make_class(n);
        group.bench_function(format!("n={n}"), |b| {
            b.iter(|| ClassStats::compute(black_box(&students)))
        });
    }

    group.finish();
}

fn bench_breakdown(c: &mut Criterion) {
    let students = make_class(1_000);
    c.bench_function("status_breakdown/n=1000", |b| {
        b.iter(|| status_breakdown(black_box(&students)))
    });
}

criterion_group!(benches, bench_class_stats, bench_breakdown);
criterion_main!(benches);
