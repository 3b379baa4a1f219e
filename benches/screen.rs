//! Screen benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use vtgrid::core::{Pen, Screen};
use vtgrid::Terminal;

fn bench_screen_print(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen");

    let pen = Pen::default();
    let text = "Hello, World! ".repeat(100);

    group.bench_function("print_chars", |b| {
        b.iter(|| {
            let mut screen = Screen::new(80, 24, 1000);
            for ch in text.chars() {
                screen.print(pen.cell(ch), true);
            }
            black_box(screen)
        })
    });

    group.finish();
}

fn bench_screen_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen");

    // Scrolling past a full scrollback keeps recycling ring slots
    group.bench_function("new_line_full_scrollback", |b| {
        let mut screen = Screen::new(200, 50, 1000);
        b.iter(|| {
            for _ in 0..100 {
                screen.new_line();
            }
            black_box(screen.scrollback_len())
        })
    });

    group.finish();
}

fn bench_terminal_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen");

    let input = "\x1b[H\x1b[2J\x1b[1;31mHello\x1b[0m world\r\n".repeat(100);
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("process_chunk", |b| {
        b.iter(|| {
            let mut terminal = Terminal::new(80, 24, 1000);
            terminal.process_chunk(black_box(input.as_bytes()));
            black_box(terminal.screen().cursor().x)
        })
    });

    group.bench_function("snapshot_view", |b| {
        let mut terminal = Terminal::new(80, 24, 1000);
        terminal.process_chunk("output line\n".repeat(500).as_bytes());
        b.iter(|| {
            let view = terminal.snapshot_view(black_box(100));
            black_box(view.height())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_screen_print,
    bench_screen_scroll,
    bench_terminal_stream
);

criterion_main!(benches);
