// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pointer session tracking.
//!
//! ## Overview
//!
//! [`PointerTracker`] owns at most one [`SessionState`] at a time: the contact that
//! touched down first. It applies the movement and release rules to that session and
//! returns the gestures each sample produces, in emission order.
//!
//! ## Release order
//!
//! A release evaluates swipe, then drag end, then tap. Swipe and drag end may both
//! fire for the same release. A tap only fires for a session that never dragged, and
//! excludes the other two.
//!
//! The tracker knows nothing about listeners or the enable gate; see
//! [`classifier`](crate::classifier) for that layer.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Point, Vec2};
use log::{debug, trace};

use crate::config::{ConfigError, GestureConfig};
use crate::types::{
    Direction, DragEndInfo, DragInfo, GestureEvent, SwipeInfo, TapInfo, TouchSample,
};

/// Mutable state of one tracked contact, from touch down to release.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pointer_id: u64,
    start: Point,
    start_time_ms: u64,
    delta: Vec2,
    direction: Direction,
    scrolling: bool,
    dragging: bool,
}

impl SessionState {
    fn begin(sample: &TouchSample) -> Self {
        Self {
            pointer_id: sample.id,
            start: Point::new(sample.screen.x.abs(), sample.screen.y.abs()),
            start_time_ms: sample.timestamp_ms,
            delta: Vec2::ZERO,
            direction: Direction::None,
            scrolling: false,
            dragging: false,
        }
    }

    /// The tracked contact.
    pub fn pointer_id(&self) -> u64 {
        self.pointer_id
    }

    /// Origin that deltas are measured from.
    ///
    /// The absolute touch-down position, moved to the drag-start position once a drag begins.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Timestamp of the touch-down sample.
    pub fn start_time_ms(&self) -> u64 {
        self.start_time_ms
    }

    /// Signed offset from [`start`](Self::start) to the most recent move.
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Direction of the most recent movement step.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// `true` once the session was classified as a page scroll.
    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    /// `true` between drag start and release.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn drag_info(&self) -> DragInfo {
        DragInfo {
            pointer_id: self.pointer_id,
            start_time_ms: self.start_time_ms,
            direction: self.direction,
            delta: self.delta,
        }
    }
}

/// Applies the classification rules to a single-pointer session.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    config: GestureConfig,
    session: Option<SessionState>,
    drag_listeners_present: bool,
}

impl PointerTracker {
    /// Create a tracker with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker with custom thresholds.
    pub fn with_config(config: GestureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// The thresholds in use.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Whether movement should be evaluated for dragging at all.
    pub fn set_drag_listeners_present(&mut self, present: bool) {
        self.drag_listeners_present = present;
    }

    /// See [`set_drag_listeners_present`](Self::set_drag_listeners_present).
    pub fn drag_listeners_present(&self) -> bool {
        self.drag_listeners_present
    }

    /// The active session, if a contact is down.
    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    /// `true` while the active session is dragging.
    pub fn is_dragging(&self) -> bool {
        self.session.as_ref().is_some_and(SessionState::is_dragging)
    }

    /// `true` while the active session is latched as a page scroll.
    pub fn is_scrolling(&self) -> bool {
        self.session.as_ref().is_some_and(SessionState::is_scrolling)
    }

    /// Drop the active session without classifying it, returning its final state.
    ///
    /// Hosts that can lose a contact's release (e.g. when the target is detached
    /// mid-touch) call this to let the next contact start a session.
    pub fn reset(&mut self) -> Option<SessionState> {
        let dropped = self.session.take();
        if let Some(s) = &dropped {
            debug!("session reset: dropping pointer {}", s.pointer_id);
        }
        dropped
    }

    /// Begin a session for `sample`.
    ///
    /// Ignored while a different contact owns the session. A repeated start for the
    /// same contact restarts its session. If the owning contact's release never
    /// arrives, every later contact is ignored until [`reset`](Self::reset).
    pub fn on_start(&mut self, sample: &TouchSample) {
        if let Some(active) = &self.session
            && active.pointer_id != sample.id
        {
            debug!(
                "ignoring start of pointer {} while pointer {} is active",
                sample.id, active.pointer_id
            );
            return;
        }
        debug!(
            "session start: pointer {} at ({}, {}), t={}",
            sample.id, sample.screen.x, sample.screen.y, sample.timestamp_ms
        );
        self.session = Some(SessionState::begin(sample));
    }

    /// Track a move of the session's contact.
    ///
    /// The step direction compares the new raw offset against the previously stored
    /// offset, so it reflects the step just taken rather than the cumulative sign.
    pub fn on_move(&mut self, sample: &TouchSample) -> Vec<GestureEvent> {
        let Some(s) = self.session.as_mut() else {
            return Vec::new();
        };
        if s.pointer_id != sample.id || s.scrolling {
            return Vec::new();
        }

        let offset = sample.screen - s.start;
        s.direction = if s.delta.x >= offset.x {
            Direction::Right
        } else {
            Direction::Left
        };
        s.delta = offset;

        if !s.dragging && exceeds_slope(offset, self.config.scroll_slope) {
            trace!(
                "pointer {}: scroll latched at delta ({}, {})",
                s.pointer_id, offset.x, offset.y
            );
            s.scrolling = true;
            return Vec::new();
        }

        let threshold = self.config.drag_threshold;
        let crossed = offset.y.abs() > threshold || offset.x.abs() >= threshold;
        if !s.dragging && !(self.drag_listeners_present && crossed) {
            return Vec::new();
        }

        if s.dragging {
            return vec![GestureEvent::Drag(s.drag_info())];
        }

        // Later offsets are measured from the drag origin. The stored delta keeps
        // the last offset so the next step's direction compares against it.
        s.start = sample.screen;
        s.dragging = true;
        trace!(
            "pointer {}: drag start at ({}, {})",
            s.pointer_id, s.start.x, s.start.y
        );
        vec![GestureEvent::DragStart(DragInfo {
            delta: Vec2::ZERO,
            ..s.drag_info()
        })]
    }

    /// Release the session's contact and classify the session.
    ///
    /// Events are returned in the order swipe, drag end, tap. A session latched as a
    /// scroll produces nothing.
    pub fn on_end(&mut self, sample: &TouchSample) -> Vec<GestureEvent> {
        let s = match self.session.take() {
            Some(s) if s.pointer_id == sample.id => s,
            other => {
                if let Some(active) = &other {
                    debug!(
                        "ignoring release of pointer {} while pointer {} is active",
                        sample.id, active.pointer_id
                    );
                }
                self.session = other;
                return Vec::new();
            }
        };
        if s.scrolling {
            debug!("session end: pointer {} was scrolling", s.pointer_id);
            return Vec::new();
        }

        let end = Point::new(sample.screen.x.abs(), sample.screen.y.abs());
        let end_time_ms = sample.timestamp_ms;
        let duration_ms = end_time_ms.saturating_sub(s.start_time_ms);
        let distance = floor_distance(s.start, end);
        let velocity = (s.start.x - end.x).abs() / end_time_ms.abs_diff(s.start_time_ms) as f64;
        trace!(
            "pointer {}: release after {duration_ms}ms, distance {distance}, velocity {velocity}",
            s.pointer_id
        );

        // A short, near-stationary release of an undragged session is only a tap.
        let tapped = !s.dragging
            && duration_ms < self.config.tap_max_duration_ms
            && distance < self.config.tap_max_distance;
        let swiped = !tapped && velocity > self.config.swipe_velocity;

        let mut out = Vec::new();
        if swiped {
            out.push(GestureEvent::Swipe(SwipeInfo {
                pointer_id: s.pointer_id,
                start_time_ms: s.start_time_ms,
                end_time_ms,
                duration_ms,
                direction: s.direction,
                delta: s.delta,
                velocity,
            }));
        }
        if s.dragging {
            out.push(GestureEvent::DragEnd(DragEndInfo {
                drag: s.drag_info(),
                end_time_ms,
                duration_ms,
                was_swipe: swiped,
            }));
        }
        if tapped {
            out.push(GestureEvent::Tap(TapInfo {
                pointer_id: s.pointer_id,
                start_time_ms: s.start_time_ms,
                end_time_ms,
                duration_ms,
            }));
        }
        debug!(
            "session end: pointer {} produced {} gesture(s)",
            s.pointer_id,
            out.len()
        );
        out
    }

    /// Cancellation is classified exactly like a release.
    pub fn on_cancel(&mut self, sample: &TouchSample) -> Vec<GestureEvent> {
        self.on_end(sample)
    }
}

/// `|dy / dx| > slope`, with a zero `dx` treated as an unbounded ratio.
///
/// A zero offset on both axes carries no direction and never exceeds the slope.
fn exceeds_slope(offset: Vec2, slope: f64) -> bool {
    if offset.x == 0.0 {
        return offset.y != 0.0;
    }
    (offset.y / offset.x).abs() > slope
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "the distance is non-negative, so truncation floors it"
)]
fn floor_distance(a: Point, b: Point) -> u64 {
    (b - a).hypot() as u64
}
