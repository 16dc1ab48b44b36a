//! Input parsing performance benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use sgrmouse::input::{DragTracker, SgrDecoder, parse_events};
use sgrmouse::{MouseEventKind, RawEvent};
use std::hint::black_box;

/// Benchmark single-report parsing for each report shape.
fn bench_single_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("sgr_single");

    let reports: &[(&[u8], &str)] = &[
        (b"\x1b[<0;10;20M", "button_press"),
        (b"\x1b[<0;10;20m", "button_release"),
        (b"\x1b[<32;50;30M", "button1_drag"),
        (b"\x1b[<35;50;30M", "mouse_move"),
        (b"\x1b[<64;10;20M", "scroll_up"),
        (b"\x1b[<65;10;20M", "scroll_down"),
        (b"\x1b[<32;9999;9999M", "large_coordinates"),
        (b"\x1b[<99;1;1M", "unrecognized_code"),
    ];

    for (seq, name) in reports {
        group.bench_function(*name, |b| {
            b.iter(|| parse_events(black_box(*seq)).count());
        });
    }

    group.finish();
}

/// Benchmark a frame's worth of drag reports mixed with keystrokes.
fn bench_mixed_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("sgr_stream");

    let mut buf = Vec::new();
    for i in 0..200u32 {
        buf.extend_from_slice(&RawEvent::drag(i % 120, i % 40).to_sgr());
        if i % 10 == 0 {
            buf.extend_from_slice(b"q\x1b[A");
        }
    }
    buf.extend_from_slice(&RawEvent::new(MouseEventKind::Button1Up, 1, 1).to_sgr());
    group.throughput(Throughput::Bytes(buf.len() as u64));

    group.bench_function("parse_events", |b| {
        b.iter(|| parse_events(black_box(&buf)).count());
    });

    group.bench_function("decoder_feed", |b| {
        let mut decoder = SgrDecoder::new();
        b.iter(|| decoder.feed(black_box(&buf)).len());
    });

    let events: Vec<RawEvent> = parse_events(&buf).collect();
    group.bench_function("drag_tracker", |b| {
        let mut tracker = DragTracker::new();
        b.iter(|| tracker.update(black_box(&events)).len());
    });

    group.finish();
}

/// Benchmark pure noise, the worst case for byte-by-byte skipping.
fn bench_noise(c: &mut Criterion) {
    let noise: Vec<u8> = (0..4096u32)
        .map(|i| if i % 7 == 0 { 0x1b } else { b'[' })
        .collect();

    c.bench_function("sgr_noise_4k", |b| {
        b.iter(|| parse_events(black_box(&noise)).count());
    });
}

criterion_group!(benches, bench_single_report, bench_mixed_stream, bench_noise);
criterion_main!(benches);
