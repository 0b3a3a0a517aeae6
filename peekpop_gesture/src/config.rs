// Copyright 2026 the Peekpop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recognizer configuration: durations, thresholds, and feel constants.
//!
//! Defaults reproduce the tuning of the interaction this recognizer models.
//! The elastic constants ([`PeekConfig::elastic_divisor`],
//! [`PeekConfig::elastic_sqrt_scale`]) are empirically tuned feel constants
//! with no documented derivation; they are exposed as configuration rather
//! than re-derived so hosts that override them do so deliberately.

use crate::events::Orientation;

bitflags::bitflags! {
    /// Which fling directions may trigger a fling-to-action.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct FlingDirections: u8 {
        /// Allow negative-axis flings (up / left).
        const UPWARDS = 0b01;
        /// Allow positive-axis flings (down / right).
        const DOWNWARDS = 0b10;
    }
}

impl Default for FlingDirections {
    fn default() -> Self {
        Self::all()
    }
}

/// Tuning knobs for the recognizer.
///
/// All durations share the host's monotonic millisecond clock; all distances
/// and velocities are in screen pixels / pixels per second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeekConfig {
    /// Press duration before the overlay peeks.
    pub long_press_ms: u64,
    /// Dwell duration for long-hold regions.
    pub long_hold_ms: u64,
    /// Dwell duration before a hold-and-release region arms.
    pub hold_and_release_ms: u64,
    /// Interval scale for repeating long-hold fires: the next repeat is
    /// scheduled at `long_hold_ms * repeat_scale`. 1.0 spaces repeats by the
    /// configured duration; 1.5 matches the slower repeat variant.
    pub repeat_scale: f64,
    /// Master switch for drag tracking and fling classification. When off,
    /// releases always take the plain pop path and the overlay never drags.
    pub fling_to_action: bool,
    /// Velocity magnitude that a release must strictly exceed to qualify as
    /// a fling.
    pub fling_threshold: f64,
    /// Divisor applied to release velocity when deriving the fling exit
    /// translation.
    pub fling_divisor: f64,
    /// Cap on the fling exit translation magnitude, so fast flings do not
    /// overshoot arbitrarily.
    pub max_fling_translation: f64,
    /// Allowed fling directions.
    pub fling_directions: FlingDirections,
    /// Whether a qualifying fling substitutes the expand-and-fling exit
    /// animation for the plain return animation.
    pub animate_fling: bool,
    /// Whether to request a blurred backdrop when the overlay peeks. Hosts
    /// that cannot blur degrade gracefully (the effect is skipped).
    pub blur_background: bool,
    /// Primary-axis selection for the whole session.
    pub orientation: Orientation,
    /// Linear term divisor of the elastic drag mapping.
    pub elastic_divisor: f64,
    /// Square-root term multiplier of the elastic drag mapping.
    pub elastic_sqrt_scale: f64,
    /// Drag distance from rest at which the fling hint saturates; the
    /// maximum allowed drag position is `rest - drag_amount`, floored at 0.
    pub drag_amount: f64,
    /// Minimum margin the dragged overlay keeps from the screen edge.
    pub edge_margin: f64,
    /// Duration passed to the presenter for the peek (reveal) animation.
    pub peek_animation_ms: u64,
    /// Duration passed to the presenter for the pop / fling exit animation.
    pub pop_animation_ms: u64,
    /// Ask the presenter to stop a parent container from intercepting touch
    /// events once the overlay peeks (scroll views and the like).
    pub disallow_parent_intercept: bool,
}

impl Default for PeekConfig {
    fn default() -> Self {
        Self {
            long_press_ms: 200,
            long_hold_ms: 850,
            hold_and_release_ms: 50,
            repeat_scale: 1.0,
            fling_to_action: true,
            fling_threshold: 3000.0,
            fling_divisor: 8.0,
            max_fling_translation: 1000.0,
            fling_directions: FlingDirections::all(),
            animate_fling: true,
            blur_background: true,
            orientation: Orientation::Portrait,
            elastic_divisor: 3.0,
            elastic_sqrt_scale: 4.0,
            drag_amount: 300.0,
            edge_margin: 12.0,
            peek_animation_ms: 275,
            pop_animation_ms: 250,
            disallow_parent_intercept: false,
        }
    }
}

/// Failure to construct a recognizer.
///
/// Configuration errors are fatal and reported before any gesture can start;
/// everything that can go wrong at runtime is absorbed locally (see the
/// crate docs on stale-callback guards).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// No overlay element was supplied to the builder.
    MissingOverlay,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingOverlay => write!(f, "no overlay element specified"),
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_tuning() {
        let cfg = PeekConfig::default();
        assert_eq!(cfg.long_press_ms, 200);
        assert_eq!(cfg.long_hold_ms, 850);
        assert_eq!(cfg.hold_and_release_ms, 50);
        assert_eq!(cfg.fling_threshold, 3000.0);
        assert_eq!(cfg.fling_divisor, 8.0);
        assert_eq!(cfg.max_fling_translation, 1000.0);
        assert_eq!(cfg.elastic_divisor, 3.0);
        assert_eq!(cfg.elastic_sqrt_scale, 4.0);
        assert_eq!(cfg.fling_directions, FlingDirections::all());
    }

    #[test]
    fn fling_directions_are_independent() {
        let up_only = FlingDirections::UPWARDS;
        assert!(up_only.contains(FlingDirections::UPWARDS));
        assert!(!up_only.contains(FlingDirections::DOWNWARDS));
    }
}
