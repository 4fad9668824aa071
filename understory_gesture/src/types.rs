// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for gesture classification: samples, phases, directions, kinds, and events.
//!
//! ## Overview
//!
//! These types describe the classifier's inputs and outputs.
//! A host feeds [`TouchSample`] values tagged with a [`TouchPhase`] into the
//! [`classifier`](crate::classifier), and receives [`GestureEvent`] values back.

use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Vec2};

/// One physical pointer contact at one instant.
///
/// Supplied by the host for every raw touch event. The classifier never
/// validates samples; coordinates and timestamps are trusted as given.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TouchSample {
    /// Identifier of the contact, stable for the lifetime of the touch.
    pub id: u64,
    /// Position on the screen, in device-independent pixels.
    pub screen: Point,
    /// Time of the sample in milliseconds, from any monotonic origin.
    pub timestamp_ms: u64,
}

impl TouchSample {
    /// Create a sample from raw screen coordinates.
    pub const fn new(id: u64, x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self {
            id,
            screen: Point::new(x, y),
            timestamp_ms,
        }
    }
}

/// Raw touch event type delivered by the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TouchPhase {
    /// A contact touched down.
    Start,
    /// A contact moved.
    Move,
    /// A contact lifted.
    End,
    /// The platform cancelled the contact.
    Cancel,
}

/// Horizontal direction of the most recent movement step.
///
/// See [`PointerTracker::on_move`](crate::tracker::PointerTracker::on_move) for how
/// the step is measured.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// No movement observed yet.
    #[default]
    None,
    /// Encoded as `1`.
    Left,
    /// Encoded as `-1`.
    Right,
}

impl Direction {
    /// Numeric encoding: `Left` is `1`, `Right` is `-1`, `None` is `0`.
    pub const fn sign(self) -> i8 {
        match self {
            Self::None => 0,
            Self::Left => 1,
            Self::Right => -1,
        }
    }
}

/// The fixed set of gestures the classifier can emit.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GestureKind {
    /// Movement crossed the drag threshold.
    DragStart,
    /// Movement continued while dragging.
    Drag,
    /// The contact lifted while dragging.
    DragEnd,
    /// The contact lifted with enough horizontal velocity.
    Swipe,
    /// A short, near-stationary contact.
    Tap,
}

impl GestureKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::DragStart,
        Self::Drag,
        Self::DragEnd,
        Self::Swipe,
        Self::Tap,
    ];

    /// Lowercase event name, e.g. `"dragstart"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::DragStart => "dragstart",
            Self::Drag => "drag",
            Self::DragEnd => "dragend",
            Self::Swipe => "swipe",
            Self::Tap => "tap",
        }
    }

    /// `true` for the drag family: [`DragStart`](Self::DragStart), [`Drag`](Self::Drag)
    /// and [`DragEnd`](Self::DragEnd).
    pub const fn is_drag_family(self) -> bool {
        matches!(self, Self::DragStart | Self::Drag | Self::DragEnd)
    }

    /// The single-bit [`GestureKinds`] set for this kind.
    pub const fn as_set(self) -> GestureKinds {
        match self {
            Self::DragStart => GestureKinds::DRAG_START,
            Self::Drag => GestureKinds::DRAG,
            Self::DragEnd => GestureKinds::DRAG_END,
            Self::Swipe => GestureKinds::SWIPE,
            Self::Tap => GestureKinds::TAP,
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing a name that is not one of the known gestures.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct UnknownGesture;

impl fmt::Display for UnknownGesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown gesture name")
    }
}

impl core::error::Error for UnknownGesture {}

impl FromStr for GestureKind {
    type Err = UnknownGesture;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or(UnknownGesture)
    }
}

bitflags::bitflags! {
    /// A set of gesture kinds, e.g. the kinds a consumer subscribed to.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct GestureKinds: u8 {
        /// [`GestureKind::DragStart`].
        const DRAG_START = 0b0000_0001;
        /// [`GestureKind::Drag`].
        const DRAG       = 0b0000_0010;
        /// [`GestureKind::DragEnd`].
        const DRAG_END   = 0b0000_0100;
        /// [`GestureKind::Swipe`].
        const SWIPE      = 0b0000_1000;
        /// [`GestureKind::Tap`].
        const TAP        = 0b0001_0000;

        /// Every drag-family kind.
        const DRAG_FAMILY = Self::DRAG_START.bits() | Self::DRAG.bits() | Self::DRAG_END.bits();
    }
}

impl GestureKinds {
    /// `true` if any drag-family kind is in the set.
    ///
    /// Movement is only evaluated for dragging when this holds.
    pub const fn wants_drag(self) -> bool {
        self.intersects(Self::DRAG_FAMILY)
    }
}

impl From<GestureKind> for GestureKinds {
    fn from(kind: GestureKind) -> Self {
        kind.as_set()
    }
}

impl FromIterator<GestureKind> for GestureKinds {
    fn from_iter<I: IntoIterator<Item = GestureKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |acc, k| acc | k.as_set())
    }
}

/// Payload shared by [`GestureEvent::DragStart`] and [`GestureEvent::Drag`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragInfo {
    /// Contact that produced the gesture.
    pub pointer_id: u64,
    /// Timestamp of the session's start sample.
    pub start_time_ms: u64,
    /// Direction of the most recent movement step.
    pub direction: Direction,
    /// Offset from the drag origin. Zero on drag start.
    pub delta: Vec2,
}

/// Payload of [`GestureEvent::DragEnd`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragEndInfo {
    /// State of the drag at release.
    pub drag: DragInfo,
    /// Timestamp of the end sample.
    pub end_time_ms: u64,
    /// Time from session start to release.
    pub duration_ms: u64,
    /// Whether a swipe was emitted for the same release.
    pub was_swipe: bool,
}

/// Payload of [`GestureEvent::Swipe`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeInfo {
    /// Contact that produced the gesture.
    pub pointer_id: u64,
    /// Timestamp of the session's start sample.
    pub start_time_ms: u64,
    /// Timestamp of the end sample.
    pub end_time_ms: u64,
    /// Time from session start to release.
    pub duration_ms: u64,
    /// Direction of the most recent movement step.
    pub direction: Direction,
    /// Last offset recorded by a move.
    pub delta: Vec2,
    /// Horizontal velocity in pixels per millisecond.
    pub velocity: f64,
}

/// Payload of [`GestureEvent::Tap`]. Taps carry no directional data.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TapInfo {
    /// Contact that produced the gesture.
    pub pointer_id: u64,
    /// Timestamp of the session's start sample.
    pub start_time_ms: u64,
    /// Timestamp of the end sample.
    pub end_time_ms: u64,
    /// Time from session start to release.
    pub duration_ms: u64,
}

/// A classified gesture.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GestureEvent {
    /// See [`GestureKind::DragStart`].
    DragStart(DragInfo),
    /// See [`GestureKind::Drag`].
    Drag(DragInfo),
    /// See [`GestureKind::DragEnd`].
    DragEnd(DragEndInfo),
    /// See [`GestureKind::Swipe`].
    Swipe(SwipeInfo),
    /// See [`GestureKind::Tap`].
    Tap(TapInfo),
}

impl GestureEvent {
    /// The kind tag of this event.
    pub const fn kind(&self) -> GestureKind {
        match self {
            Self::DragStart(_) => GestureKind::DragStart,
            Self::Drag(_) => GestureKind::Drag,
            Self::DragEnd(_) => GestureKind::DragEnd,
            Self::Swipe(_) => GestureKind::Swipe,
            Self::Tap(_) => GestureKind::Tap,
        }
    }

    /// Contact that produced the gesture.
    pub const fn pointer_id(&self) -> u64 {
        match self {
            Self::DragStart(d) | Self::Drag(d) => d.pointer_id,
            Self::DragEnd(e) => e.drag.pointer_id,
            Self::Swipe(s) => s.pointer_id,
            Self::Tap(t) => t.pointer_id,
        }
    }

    /// Timestamp of the session's start sample.
    pub const fn start_time_ms(&self) -> u64 {
        match self {
            Self::DragStart(d) | Self::Drag(d) => d.start_time_ms,
            Self::DragEnd(e) => e.drag.start_time_ms,
            Self::Swipe(s) => s.start_time_ms,
            Self::Tap(t) => t.start_time_ms,
        }
    }

    /// Movement direction; `None` for taps.
    pub const fn direction(&self) -> Option<Direction> {
        match self {
            Self::DragStart(d) | Self::Drag(d) => Some(d.direction),
            Self::DragEnd(e) => Some(e.drag.direction),
            Self::Swipe(s) => Some(s.direction),
            Self::Tap(_) => None,
        }
    }

    /// Offset carried by the event; `None` for taps.
    pub const fn delta(&self) -> Option<Vec2> {
        match self {
            Self::DragStart(d) | Self::Drag(d) => Some(d.delta),
            Self::DragEnd(e) => Some(e.drag.delta),
            Self::Swipe(s) => Some(s.delta),
            Self::Tap(_) => None,
        }
    }
}
