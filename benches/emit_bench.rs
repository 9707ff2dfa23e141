use banana_logger::{values, ConsoleSink, Logger};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use tempfile::tempdir;

// Sink that drops everything - measures rendering cost only
struct NullSink;

impl ConsoleSink for NullSink {
    fn write_line(&self, line: &str) {
        black_box(line);
    }

    fn write_diagnostic(&self, _line: &str) {}
}

fn bench_console(c: &mut Criterion) {
    let mut logger = Logger::with_sink(NullSink);
    c.bench_function("console_text", |b| {
        b.iter(|| {
            logger
                .tag("BENCH")
                .info(values!["request served in", black_box(42), "ms"]);
        })
    });

    c.bench_function("console_structured", |b| {
        b.iter(|| {
            logger.warn(values![json!({ "id": black_box(7), "tags": ["a", "b"] })]);
        })
    });

    c.bench_function("filtered_out", |b| {
        b.iter(|| {
            logger.debug(["never rendered"]);
        })
    });
}

fn bench_file(c: &mut Criterion) {
    let dir = tempdir().unwrap();

    let mut text = Logger::with_sink(NullSink);
    text.to_file(dir.path().join("bench.log")).unwrap();
    c.bench_function("file_text", |b| {
        b.iter(|| {
            text.info(values!["event", black_box(1u64)]);
        })
    });

    let mut json_mode = Logger::with_sink(NullSink);
    json_mode
        .to_file(dir.path().join("bench.jsonl"))
        .unwrap()
        .as_json_file_mode(true);
    c.bench_function("file_json", |b| {
        b.iter(|| {
            json_mode.info(values!["event", black_box(1u64)]);
        })
    });
}

criterion_group!(benches, bench_console, bench_file);
criterion_main!(benches);
