use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use guide_layout::text_metrics::FixedWidthMeasurer;
use guide_layout::{
    EllipsisOptions, EllipsisStep, HideOptions, Label, Margin, ResolveOptions, RotateOptions,
    auto_hide, has_overlap, resolve_overlaps,
};
use std::hint::black_box;

fn crowded_axis(n: usize, spacing: f64) -> Vec<Label> {
    (0..n)
        .map(|i| Label::text(format!("Category {i}"), i as f64 * spacing, 0.0))
        .collect()
}

fn bench_detection(c: &mut Criterion) {
    let measurer = FixedWidthMeasurer::default();
    let mut group = c.benchmark_group("has_overlap");
    for n in [16usize, 64, 256] {
        let labels = crowded_axis(n, 24.0);
        group.bench_with_input(BenchmarkId::from_parameter(n), &labels, |b, labels| {
            b.iter(|| black_box(has_overlap(labels, &measurer, Margin::uniform(2.0))));
        });
    }
    group.finish();
}

fn bench_auto_hide(c: &mut Criterion) {
    let measurer = FixedWidthMeasurer::default();
    let mut group = c.benchmark_group("auto_hide");
    for n in [16usize, 64, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut labels = crowded_axis(n, 24.0);
                auto_hide(
                    &mut labels,
                    &measurer,
                    Margin::uniform(2.0),
                    &HideOptions::default(),
                );
                black_box(labels.iter().filter(|l| l.is_visible()).count())
            });
        });
    }
    group.finish();
}

fn bench_full_resolve(c: &mut Criterion) {
    let measurer = FixedWidthMeasurer::default();
    let options = ResolveOptions {
        margin: Margin::uniform(2.0),
        rotate: Some(RotateOptions::default()),
        ellipsis: Some(EllipsisOptions {
            max_length: 96.0,
            min_length: 24.0,
            step: EllipsisStep::Px(8.0),
            ellipsis: "...".to_string(),
        }),
        hide: Some(HideOptions::default()),
    };
    let mut group = c.benchmark_group("resolve_overlaps");
    for n in [16usize, 64, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut labels = crowded_axis(n, 24.0);
                resolve_overlaps(&mut labels, &measurer, &options);
                black_box(labels.len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_detection, bench_auto_hide, bench_full_resolve);
criterion_main!(benches);
