// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Classifier basics.
//!
//! This example feeds three short touch sessions through a classifier and prints
//! the gestures each one produces: a tap, a swipe, and a drag released quickly.
//!
//! Run:
//! - `cargo run -p understory_gesture_demos --example gesture_basics`

use understory_gesture::classifier::GestureClassifier;
use understory_gesture::types::{GestureEvent, GestureKind, TouchPhase, TouchSample};

fn run(
    classifier: &mut GestureClassifier,
    script: &[(TouchPhase, f64, f64, u64)],
) -> Vec<GestureEvent> {
    script
        .iter()
        .flat_map(|&(phase, x, y, t)| classifier.dispatch(phase, &TouchSample::new(0, x, y, t)))
        .collect()
}

fn kinds(events: &[GestureEvent]) -> Vec<GestureKind> {
    events.iter().map(GestureEvent::kind).collect()
}

fn main() {
    let mut classifier = GestureClassifier::new();
    classifier.set_drag_listeners_present(true);

    let tap = run(&mut classifier, &[
        (TouchPhase::Start, 0.0, 0.0, 0),
        (TouchPhase::End, 2.0, 2.0, 50),
    ]);
    println!("== Tap ==\n  {:?}", tap);

    let swipe = run(&mut classifier, &[
        (TouchPhase::Start, 0.0, 0.0, 1_000),
        (TouchPhase::End, 100.0, 0.0, 1_050),
    ]);
    println!("== Swipe ==\n  {:?}", swipe);

    let flick = run(&mut classifier, &[
        (TouchPhase::Start, 0.0, 0.0, 2_000),
        (TouchPhase::Move, 15.0, 0.0, 2_010),
        (TouchPhase::Move, 90.0, 3.0, 2_020),
        (TouchPhase::End, 120.0, 3.0, 2_030),
    ]);
    println!("== Drag released fast ==");
    for event in &flick {
        println!("  {:?}", event);
    }

    assert_eq!(kinds(&tap), vec![GestureKind::Tap]);
    assert_eq!(kinds(&swipe), vec![GestureKind::Swipe]);
    assert_eq!(kinds(&flick), vec![
        GestureKind::DragStart,
        GestureKind::Drag,
        GestureKind::Swipe,
        GestureKind::DragEnd,
    ]);
}
