// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture classifier: the enable gate over a [`PointerTracker`].
//!
//! ## Overview
//!
//! [`GestureClassifier`] routes raw samples to its tracker and returns the
//! classified gestures in emission order. While disabled, samples still update the
//! session so that timings and deltas stay consistent, but nothing is returned.
//!
//! ## Usage
//!
//! ```
//! use understory_gesture::classifier::GestureClassifier;
//! use understory_gesture::types::{GestureKind, TouchPhase, TouchSample};
//!
//! let mut c = GestureClassifier::new();
//! c.set_drag_listeners_present(true);
//!
//! c.dispatch(TouchPhase::Start, &TouchSample::new(0, 0.0, 0.0, 0));
//! let moved = c.dispatch(TouchPhase::Move, &TouchSample::new(0, 15.0, 0.0, 10));
//! assert_eq!(moved[0].kind(), GestureKind::DragStart);
//!
//! let ended = c.dispatch(TouchPhase::End, &TouchSample::new(0, 15.0, 0.0, 20));
//! assert_eq!(ended[0].kind(), GestureKind::DragEnd);
//! ```

use alloc::vec::Vec;

use log::trace;

use crate::config::{ConfigError, GestureConfig};
use crate::tracker::{PointerTracker, SessionState};
use crate::types::{GestureEvent, TouchPhase, TouchSample};

/// Classifies one bound target's touch stream into gestures.
#[derive(Clone, Debug)]
pub struct GestureClassifier {
    tracker: PointerTracker,
    enabled: bool,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::from_tracker(PointerTracker::default())
    }
}

impl GestureClassifier {
    /// Create an enabled classifier with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an enabled classifier with custom thresholds.
    pub fn with_config(config: GestureConfig) -> Result<Self, ConfigError> {
        PointerTracker::with_config(config).map(Self::from_tracker)
    }

    /// Wrap an existing tracker. The classifier starts enabled.
    pub fn from_tracker(tracker: PointerTracker) -> Self {
        Self {
            tracker,
            enabled: true,
        }
    }

    /// The underlying tracker, for inspecting the active session.
    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    /// The thresholds in use.
    pub fn config(&self) -> &GestureConfig {
        self.tracker.config()
    }

    /// Gate emission without touching session state.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// See [`set_enabled`](Self::set_enabled).
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether any drag-family gesture is subscribed.
    ///
    /// Without drag listeners, movement never starts a drag.
    pub fn set_drag_listeners_present(&mut self, present: bool) {
        self.tracker.set_drag_listeners_present(present);
    }

    /// See [`set_drag_listeners_present`](Self::set_drag_listeners_present).
    pub fn drag_listeners_present(&self) -> bool {
        self.tracker.drag_listeners_present()
    }

    /// Begin a session. Starts never emit.
    pub fn on_start(&mut self, sample: &TouchSample) {
        self.tracker.on_start(sample);
    }

    /// Track a move; returns a drag start or drag event, if any.
    pub fn on_move(&mut self, sample: &TouchSample) -> Vec<GestureEvent> {
        let events = self.tracker.on_move(sample);
        self.gate(events)
    }

    /// Release; returns swipe, drag end, and tap events in that order.
    pub fn on_end(&mut self, sample: &TouchSample) -> Vec<GestureEvent> {
        let events = self.tracker.on_end(sample);
        self.gate(events)
    }

    /// Identical to [`on_end`](Self::on_end).
    pub fn on_cancel(&mut self, sample: &TouchSample) -> Vec<GestureEvent> {
        let events = self.tracker.on_cancel(sample);
        self.gate(events)
    }

    /// Drop the active session without classifying it.
    ///
    /// See [`PointerTracker::reset`].
    pub fn reset(&mut self) -> Option<SessionState> {
        self.tracker.reset()
    }

    /// Route a raw sample by phase.
    pub fn dispatch(&mut self, phase: TouchPhase, sample: &TouchSample) -> Vec<GestureEvent> {
        match phase {
            TouchPhase::Start => {
                self.on_start(sample);
                Vec::new()
            }
            TouchPhase::Move => self.on_move(sample),
            TouchPhase::End => self.on_end(sample),
            TouchPhase::Cancel => self.on_cancel(sample),
        }
    }

    fn gate(&self, events: Vec<GestureEvent>) -> Vec<GestureEvent> {
        if self.enabled || events.is_empty() {
            return events;
        }
        trace!("disabled: suppressing {} gesture(s)", events.len());
        Vec::new()
    }
}
