// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::cell::Cell;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_gesture::{
    GestureBinding, GestureClassifier, GestureKind, GestureListeners, TouchPhase, TouchSample,
};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// `sessions` touch sessions of `moves` moves each, mixing taps, drags, swipes and scrolls.
fn gen_sessions(sessions: usize, moves: usize) -> Vec<(TouchPhase, TouchSample)> {
    let mut out = Vec::with_capacity(sessions * (moves + 2));
    let mut rng = Rng::new(0x7A9_5E55_10E5_0001);
    let mut t = 0_u64;
    for id in 0..sessions as u64 {
        let (mut x, mut y) = (rng.next_f64() * 800.0, rng.next_f64() * 600.0);
        // Horizontal-leaning steps drag; vertical-leaning steps scroll.
        let (dx, dy) = match id % 4 {
            0 => (0.0, 0.0),
            1 => (6.0, 0.5),
            2 => (1.0, 8.0),
            _ => (-12.0, 1.0),
        };
        out.push((TouchPhase::Start, TouchSample::new(id, x, y, t)));
        for _ in 0..moves {
            t += 8 + rng.next_u64() % 8;
            x += dx + rng.next_f64() - 0.5;
            y += dy + rng.next_f64() - 0.5;
            out.push((TouchPhase::Move, TouchSample::new(id, x, y, t)));
        }
        t += 16;
        let phase = if id % 7 == 0 {
            TouchPhase::Cancel
        } else {
            TouchPhase::End
        };
        out.push((phase, TouchSample::new(id, x, y, t)));
        t += 200;
    }
    out
}

fn bench_classifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("classifier");
    for &moves in &[0usize, 8, 64] {
        let samples = gen_sessions(256, moves);
        group.throughput(Throughput::Elements(samples.len() as u64));
        group.bench_function(format!("dispatch_sessions256_moves{}", moves), |b| {
            b.iter_batched(
                || {
                    let mut classifier = GestureClassifier::new();
                    classifier.set_drag_listeners_present(true);
                    classifier
                },
                |mut classifier| {
                    let mut emitted = 0;
                    for (phase, sample) in &samples {
                        emitted += classifier.dispatch(*phase, sample).len();
                    }
                    black_box(emitted);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_binding(c: &mut Criterion) {
    let mut group = c.benchmark_group("binding");
    let samples = gen_sessions(256, 16);
    group.throughput(Throughput::Elements(samples.len() as u64));
    group.bench_function("handle_all_kinds", |b| {
        b.iter(|| {
            let count = Cell::new(0_usize);
            let mut listeners = GestureListeners::new();
            for kind in GestureKind::ALL {
                listeners.on(kind, |_| count.set(count.get() + 1));
            }
            let mut binding = GestureBinding::new(listeners);
            for (phase, sample) in &samples {
                black_box(binding.handle(*phase, sample).prevent_default);
            }
            drop(binding);
            black_box(count.get());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_classifier, bench_binding);
criterion_main!(benches);
