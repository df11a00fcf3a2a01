use criterion::{black_box, criterion_group, criterion_main, Criterion};

use printf_buf::{fmt_args, sprintf, BoundedRetry, MeasureRender, PrintfBuf};

fn bench_render(c: &mut Criterion) {
    let args = fmt_args!["connection", 8080u32, 99.97f64];
    let fmt = "%s listening on port %u (uptime %.2f%%)";
    let long_payload = "x".repeat(4096);
    let long_args = fmt_args![long_payload.as_str()];

    let mut group = c.benchmark_group("render");
    group.bench_function("bounded_reused", |b| {
        let mut buf = PrintfBuf::with_strategy(BoundedRetry);
        b.iter(|| {
            let line = buf.print(black_box(fmt), black_box(&args));
            black_box(line.len());
        });
    });
    group.bench_function("two_pass_reused", |b| {
        let mut buf = PrintfBuf::with_strategy(MeasureRender::new());
        b.iter(|| {
            let line = buf.print(black_box(fmt), black_box(&args));
            black_box(line.len());
        });
    });
    group.bench_function("one_shot_alloc", |b| {
        b.iter(|| {
            let line = sprintf(black_box(fmt), black_box(&args)).expect("render succeeds");
            black_box(line);
        });
    });
    group.bench_function("bounded_long_payload", |b| {
        let mut buf = PrintfBuf::with_strategy(BoundedRetry);
        b.iter(|| {
            let line = buf.print(black_box("payload: %s"), black_box(&long_args));
            black_box(line.len());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
