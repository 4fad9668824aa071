// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: a deterministic, `no_std` touch gesture classifier.
//!
//! ## Overview
//!
//! This crate turns a stream of raw touch samples (start, move, end, cancel) into
//! discrete gestures: tap, drag (start, continue, end), and swipe.
//! It does not attach to any platform event source and does no hit testing.
//! Instead, feed it [`TouchSample`](crate::types::TouchSample) values for one bound
//! target, and it returns the gestures each sample produces, in a deterministic order.
//!
//! ## Sessions
//!
//! One contact is tracked at a time, from its start sample to its end or cancel sample.
//! Other contacts that touch down meanwhile are ignored.
//! Cancellation is classified exactly like a release.
//!
//! ## Classification
//!
//! With the default [`GestureConfig`](crate::config::GestureConfig):
//!
//! - A move whose `|dy / dx|` exceeds `0.5` before any drag latches the session as a
//!   page scroll; a scrolling session never produces gestures.
//! - If drag gestures are subscribed, movement of `10` pixels on either axis starts a
//!   drag; later moves continue it. Offsets are measured from where the drag started.
//! - On release, horizontal velocity above `0.5` px/ms is a swipe; a dragging session
//!   ends its drag, and reports whether it was also a swipe.
//! - A release within `150` ms and `10` pixels of the start, of a session that never
//!   dragged, is a tap and nothing else.
//!
//! Release events are ordered swipe, drag end, tap.
//!
//! ## Layering
//!
//! - [`tracker`] holds the per-session state and the rules.
//! - [`classifier`] adds the enable gate and raw-phase routing.
//! - [`listeners`] keys handlers by [`GestureKind`](crate::types::GestureKind) and binds
//!   them to a classifier.
//!
//! ## Example
//!
//! ```
//! use understory_gesture::classifier::GestureClassifier;
//! use understory_gesture::types::{GestureEvent, TouchPhase, TouchSample};
//!
//! let mut classifier = GestureClassifier::new();
//!
//! classifier.dispatch(TouchPhase::Start, &TouchSample::new(0, 0.0, 0.0, 0));
//! let out = classifier.dispatch(TouchPhase::End, &TouchSample::new(0, 100.0, 0.0, 50));
//!
//! let [GestureEvent::Swipe(swipe)] = out[..] else {
//!     panic!("expected a single swipe");
//! };
//! assert_eq!(swipe.velocity, 2.0);
//! ```
//!
//! ## Features
//!
//! - `std` (default) and `libm` select Kurbo's float backend.
//! - `serde` derives serialization for configuration, samples, and events.
//!
//! Diagnostics go through the [`log`] facade; no logger is installed.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod classifier;
pub mod config;
pub mod listeners;
pub mod tracker;
pub mod types;

pub use classifier::GestureClassifier;
pub use config::{ConfigError, GestureConfig};
pub use listeners::{GestureBinding, GestureListeners, Handled};
pub use tracker::{PointerTracker, SessionState};
pub use types::{
    Direction, DragEndInfo, DragInfo, GestureEvent, GestureKind, GestureKinds, SwipeInfo, TapInfo,
    TouchPhase, TouchSample, UnknownGesture,
};
