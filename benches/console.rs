//! Console benchmarks

use std::time::Instant;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use devconsole::core::{CursorMove, ScrollbackBuffer};
use devconsole::{Console, ConsoleConfig, EditCommand};

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("scrollback");

    let text: String = (0..100)
        .map(|i| format!("Line {}: Some text content here\n", i))
        .collect();
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("append_lines", |b| {
        b.iter(|| {
            let mut sb = ScrollbackBuffer::new(100, 80, 25, 8);
            sb.append(black_box(&text));
            black_box(sb)
        })
    });

    // Long lines exercise wrapping, tabs exercise stop arithmetic
    let wrapped = "x".repeat(4000);
    let tabbed = "a\tbb\tccc\tdddd\t\n".repeat(200);

    group.bench_function("append_wrapping", |b| {
        b.iter(|| {
            let mut sb = ScrollbackBuffer::new(100, 80, 25, 8);
            sb.append(black_box(&wrapped));
            black_box(sb)
        })
    });

    group.bench_function("append_tabs", |b| {
        b.iter(|| {
            let mut sb = ScrollbackBuffer::new(100, 80, 25, 8);
            sb.append(black_box(&tabbed));
            black_box(sb)
        })
    });

    group.finish();
}

fn bench_editing(c: &mut Criterion) {
    let mut group = c.benchmark_group("console");
    let config = ConsoleConfig {
        banner: false,
        ..ConsoleConfig::default()
    };

    // Type a command, edit the middle, submit; repeated to churn history
    group.bench_function("type_and_submit", |b| {
        b.iter(|| {
            let mut console = match Console::new(&config) {
                Ok(console) => console,
                Err(_) => return,
            };
            console.set_visible(true);
            console.set_callback(|console, text| console.output_fmt(format_args!("> {}\n", text)));
            let now = Instant::now();
            for _ in 0..50 {
                for ch in "set r_fullscreen 1".chars() {
                    let _ = console.handle(EditCommand::InsertChar(ch), now);
                }
                let _ = console.handle(EditCommand::MoveCursor(CursorMove::Home), now);
                let _ = console.handle(EditCommand::DeleteForward, now);
                let _ = console.handle(EditCommand::Submit, now);
            }
            black_box(console.snapshot());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_append, bench_editing);
criterion_main!(benches);
