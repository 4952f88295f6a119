//! Reactor, tokenizer and frame benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rsvp::{
    Display, FontCache, ManualClock, Reactor, Rgb, TerminalDisplay, Tokens,
};
use std::time::{Duration, Instant};

/// Benchmark: schedule N callbacks, then fire them all in one pass
fn bench_schedule_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("reactor_schedule_process");

    for count in [10usize, 100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let start = Instant::now();
            b.iter(|| {
                let clock = ManualClock::starting_at(start);
                let mut reactor: Reactor<u64> = Reactor::new(clock.clone());
                for i in 0..count {
                    // Reverse order so the pass has sorting to do.
                    let delay = Duration::from_micros((count - i) as u64);
                    reactor.schedule_after(delay, |n: &mut u64, _| *n += 1);
                }
                clock.advance(Duration::from_secs(1));
                let mut fired = 0u64;
                reactor.process(&mut fired);
                black_box(fired)
            });
        });
    }

    group.finish();
}

/// Benchmark: a pass where nothing is due
fn bench_idle_process(c: &mut Criterion) {
    let clock = ManualClock::new();
    let mut reactor: Reactor<u64> = Reactor::new(clock);
    for i in 0..64u64 {
        reactor.schedule_after(Duration::from_secs(60 + i), |n: &mut u64, _| *n += 1);
    }
    let mut ctx = 0u64;

    c.bench_function("reactor_idle_process", |b| {
        b.iter(|| black_box(reactor.process(black_box(&mut ctx))));
    });
}

/// Benchmark: tokenizing prose
fn bench_tokenize(c: &mut Criterion) {
    let paragraph = "It was the best of times, it was the worst of times; it was the age \
                     of wisdom, it was the age of foolishness (Dickens, 1859). ";
    let text = paragraph.repeat(200);

    c.bench_function("tokenize_prose", |b| {
        b.iter(|| black_box(Tokens::parse(black_box(&text))).len());
    });
}

/// Benchmark: one word frame, full paint then diffs
fn bench_word_frame(c: &mut Criterion) {
    let font = match FontCache::new().load("SourceCodePro-Regular", 36) {
        Ok(font) => font,
        Err(e) => panic!("font: {e}"),
    };
    let words = ["reading", "at", "speed", "incomprehensibilities"];
    let mut display = TerminalDisplay::with_size(std::io::sink(), 200, 50);
    let mut n = 0usize;

    c.bench_function("word_frame_200x50", |b| {
        b.iter(|| {
            display.clear(Rgb::BLACK);
            let _ = display.draw_centered(&font, words[n % words.len()]);
            let _ = display.present();
            n += 1;
        });
    });
}

criterion_group!(
    benches,
    bench_schedule_process,
    bench_idle_process,
    bench_tokenize,
    bench_word_frame
);
criterion_main!(benches);
