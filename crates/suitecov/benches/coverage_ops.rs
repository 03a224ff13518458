//! Coverage Operations Benchmarks
//!
//! Benchmarks for hit recording, window flushing and report rendering.
//!
//! Run with: `cargo bench --bench coverage_ops`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use suitecov::coverage::{CloverWriter, TextReportConfig, TextWriter};
use suitecov::{CoverageData, InstrumentationEngine, RecordingEngine};

fn sample_data(files: usize, lines: u32) -> CoverageData {
    let mut data = CoverageData::new();
    for f in 0..files {
        let path = format!("src/module_{f}.rs");
        for line in 1..=lines {
            if line % 3 == 0 {
                data.declare_line(&path, line);
            } else {
                data.record_hits(&path, line, u64::from(line), Some("unit"));
            }
        }
    }
    data
}

fn bench_probe_hits(c: &mut Criterion) {
    let mut group = c.benchmark_group("probe_hits");

    for count in [100_u32, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{count}_hits")),
            &count,
            |bench, &n| {
                bench.iter(|| {
                    let mut engine = RecordingEngine::new();
                    let probe = engine.probe();
                    let _ = engine.start("bench");
                    for i in 0..n {
                        probe.hit("src/lib.rs", black_box(i % 500));
                    }
                    let _ = engine.stop();
                    black_box(engine.data().summary());
                });
            },
        );
    }

    group.finish();
}

fn bench_windows(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection_windows");

    for units in [10_usize, 100, 500] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{units}_units")),
            &units,
            |bench, &n| {
                bench.iter(|| {
                    let mut engine = RecordingEngine::new();
                    let probe = engine.probe();
                    for unit in 0..n {
                        let _ = engine.start(&format!("unit_{unit}"));
                        probe.hit_n("src/lib.rs", (unit % 200) as u32, 3);
                        let _ = engine.stop();
                    }
                    black_box(engine.windows_closed());
                });
            },
        );
    }

    group.finish();
}

fn bench_text_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_render");
    let writer = TextWriter::new(TextReportConfig::default());

    for files in [10_usize, 100] {
        let data = sample_data(files, 200);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{files}_files")),
            &data,
            |bench, d| {
                bench.iter(|| black_box(writer.render(black_box(d), false, "2026-01-01 00:00:00")));
            },
        );
    }

    group.finish();
}

fn bench_clover_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("clover_generate");
    let writer = CloverWriter::new();

    for files in [10_usize, 100] {
        let data = sample_data(files, 200);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{files}_files")),
            &data,
            |bench, d| {
                bench.iter(|| black_box(writer.generate(black_box(d), 1_700_000_000)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_probe_hits,
    bench_windows,
    bench_text_render,
    bench_clover_generate
);
criterion_main!(benches);
