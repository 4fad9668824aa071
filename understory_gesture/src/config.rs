// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Classification thresholds.

use core::fmt;

/// Thresholds used to classify a touch session.
///
/// The defaults are tuned for device-independent pixels and millisecond timestamps.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GestureConfig {
    /// Minimum movement on either axis before a session becomes a drag.
    ///
    /// Vertical movement must exceed it; horizontal movement may equal it.
    pub drag_threshold: f64,
    /// A tap must end strictly sooner than this after it started.
    pub tap_max_duration_ms: u64,
    /// A tap must end strictly closer than this to where it started (floored distance).
    pub tap_max_distance: u64,
    /// A `|dy / dx|` ratio above this, before dragging, latches the session as a page scroll.
    pub scroll_slope: f64,
    /// A release faster than this (pixels per millisecond, horizontal) is a swipe.
    pub swipe_velocity: f64,
}

impl GestureConfig {
    /// Default drag threshold in pixels.
    pub const DEFAULT_DRAG_THRESHOLD: f64 = 10.0;
    /// Default tap duration bound in milliseconds.
    pub const DEFAULT_TAP_MAX_DURATION_MS: u64 = 150;
    /// Default tap distance bound in pixels.
    pub const DEFAULT_TAP_MAX_DISTANCE: u64 = 10;
    /// Default scroll slope.
    pub const DEFAULT_SCROLL_SLOPE: f64 = 0.5;
    /// Default swipe velocity in pixels per millisecond.
    pub const DEFAULT_SWIPE_VELOCITY: f64 = 0.5;

    /// The default thresholds, usable in const contexts.
    pub const DEFAULT: Self = Self {
        drag_threshold: Self::DEFAULT_DRAG_THRESHOLD,
        tap_max_duration_ms: Self::DEFAULT_TAP_MAX_DURATION_MS,
        tap_max_distance: Self::DEFAULT_TAP_MAX_DISTANCE,
        scroll_slope: Self::DEFAULT_SCROLL_SLOPE,
        swipe_velocity: Self::DEFAULT_SWIPE_VELOCITY,
    };

    /// Check that every floating-point threshold is finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("drag_threshold", self.drag_threshold),
            ("scroll_slope", self.scroll_slope),
            ("swipe_velocity", self.swipe_velocity),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field });
            }
        }
        Ok(())
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A [`GestureConfig`] field holds an unusable value.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// The field is NaN or infinite.
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The field is below zero.
    Negative {
        /// Name of the offending field.
        field: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { field } => write!(f, "`{field}` must be finite"),
            Self::Negative { field } => write!(f, "`{field}` must not be negative"),
        }
    }
}

impl core::error::Error for ConfigError {}
