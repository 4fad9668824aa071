// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener binding.
//!
//! This example registers handlers per gesture kind, binds them to a classifier,
//! and drives the binding the way a platform touch handler would, including a
//! page scroll and a disabled period.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_gesture_demos --example gesture_listeners`

use std::cell::RefCell;

use understory_gesture::listeners::{GestureBinding, GestureListeners};
use understory_gesture::types::{GestureKind, TouchPhase, TouchSample};

fn main() {
    env_logger::init();

    let delivered = RefCell::new(Vec::new());
    let mut listeners = GestureListeners::new();
    for name in ["dragstart", "drag", "dragend", "tap"] {
        listeners
            .on_named(name, |e| delivered.borrow_mut().push(e.kind()))
            .expect("known gesture name");
    }

    let mut binding = GestureBinding::new(listeners);
    let mut feed = |phase: TouchPhase, x: f64, y: f64, t: u64| {
        let handled = binding.handle(phase, &TouchSample::new(3, x, y, t));
        if handled.prevent_default {
            println!("  {phase:?} at ({x}, {y}): native scrolling suppressed");
        }
        handled
    };

    println!("== Drag ==");
    feed(TouchPhase::Start, 10.0, 10.0, 0);
    feed(TouchPhase::Move, 25.0, 11.0, 16);
    feed(TouchPhase::Move, 45.0, 12.0, 32);
    feed(TouchPhase::End, 45.0, 12.0, 400);

    println!("== Page scroll ==");
    feed(TouchPhase::Start, 10.0, 10.0, 1_000);
    feed(TouchPhase::Move, 11.0, 40.0, 1_016);
    feed(TouchPhase::End, 11.0, 90.0, 1_032);

    println!("== Tap while disabled, then enabled ==");
    binding.disable();
    let muted = binding.handle(TouchPhase::Start, &TouchSample::new(3, 5.0, 5.0, 2_000));
    assert!(muted.events.is_empty());
    binding.handle(TouchPhase::End, &TouchSample::new(3, 5.0, 5.0, 2_040));
    binding.enable();
    binding.handle(TouchPhase::Start, &TouchSample::new(3, 5.0, 5.0, 3_000));
    binding.handle(TouchPhase::Cancel, &TouchSample::new(3, 6.0, 5.0, 3_040));

    let listeners = binding.destroy();
    println!("== Subscribed ==\n  {:?}", listeners.subscribed());
    drop(listeners);

    let delivered = delivered.into_inner();
    println!("== Delivered ==\n  {:?}", delivered);
    assert_eq!(delivered, vec![
        GestureKind::DragStart,
        GestureKind::Drag,
        GestureKind::DragEnd,
        GestureKind::Tap,
    ]);
}
