// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading thresholds.
//!
//! This example reads a partial threshold override from JSON (missing fields keep
//! their defaults), validates it, and shows how a coarser drag threshold changes
//! classification of the same movement.
//!
//! Run:
//! - `cargo run -p understory_gesture_demos --example gesture_config`

use understory_gesture::classifier::GestureClassifier;
use understory_gesture::config::GestureConfig;
use understory_gesture::types::{GestureKind, TouchSample};

fn drag_kinds(classifier: &mut GestureClassifier) -> Vec<GestureKind> {
    classifier.set_drag_listeners_present(true);
    classifier.on_start(&TouchSample::new(0, 0.0, 0.0, 0));
    classifier
        .on_move(&TouchSample::new(0, 24.0, 0.0, 30))
        .iter()
        .map(|e| e.kind())
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config: GestureConfig = serde_json::from_str(r#"{ "drag_threshold": 32.0 }"#)?;
    config.validate()?;
    println!("== Loaded ==\n  {:?}", config);
    assert_eq!(config.tap_max_duration_ms, GestureConfig::DEFAULT.tap_max_duration_ms);

    let coarse = drag_kinds(&mut GestureClassifier::with_config(config)?);
    let default = drag_kinds(&mut GestureClassifier::new());
    println!("== 24px move ==\n  default: {:?}\n  coarse:  {:?}", default, coarse);
    assert_eq!(default, vec![GestureKind::DragStart]);
    assert!(coarse.is_empty());

    let broken: GestureConfig = serde_json::from_str(r#"{ "swipe_velocity": -1.0 }"#)?;
    let err = broken.validate().unwrap_err();
    println!("== Rejected ==\n  {err}");

    println!("== Serialized defaults ==\n  {}", serde_json::to_string(&GestureConfig::default())?);
    Ok(())
}
