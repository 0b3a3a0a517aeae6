// Copyright 2026 the Peekpop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fling classification: release velocity → optional fling-to-action.

use kurbo::Vec2;

use crate::config::FlingDirections;
use crate::events::{FlingDirection, Orientation};

/// Classify a release velocity.
///
/// A pure function of (orientation, axis velocity, allowed directions,
/// threshold). The axis matching `orientation` is examined (vertical in
/// portrait, horizontal in landscape); the magnitude must **strictly
/// exceed** `threshold` — a release at exactly the threshold is not a
/// fling. Returns `None` for anything that should take the ordinary pop
/// path.
pub fn classify(
    velocity: Vec2,
    orientation: Orientation,
    allowed: FlingDirections,
    threshold: f64,
) -> Option<FlingDirection> {
    let axis = axis_velocity(velocity, orientation);
    if axis < -threshold && allowed.contains(FlingDirections::UPWARDS) {
        Some(FlingDirection::Upwards)
    } else if axis > threshold && allowed.contains(FlingDirections::DOWNWARDS) {
        Some(FlingDirection::Downwards)
    } else {
        None
    }
}

/// The component of `velocity` on the orientation's primary axis.
pub fn axis_velocity(velocity: Vec2, orientation: Orientation) -> f64 {
    match orientation {
        Orientation::Portrait => velocity.y,
        Orientation::Landscape => velocity.x,
    }
}

/// Signed exit translation for a qualifying fling.
///
/// `min(|velocity| / divisor, max_translation)` with the velocity's sign,
/// so fast flings do not overshoot arbitrarily.
pub fn exit_translation(axis_velocity: f64, divisor: f64, max_translation: f64) -> f64 {
    axis_velocity.signum() * (axis_velocity.abs() / divisor).min(max_translation)
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f64 = 3000.0;

    #[test]
    fn fast_upward_release_in_portrait_is_upwards() {
        let v = Vec2::new(0.0, -4000.0);
        assert_eq!(
            classify(v, Orientation::Portrait, FlingDirections::all(), THRESHOLD),
            Some(FlingDirection::Upwards)
        );
    }

    #[test]
    fn fast_downward_release_in_portrait_is_downwards() {
        let v = Vec2::new(0.0, 4000.0);
        assert_eq!(
            classify(v, Orientation::Portrait, FlingDirections::all(), THRESHOLD),
            Some(FlingDirection::Downwards)
        );
    }

    #[test]
    fn exactly_at_threshold_is_not_a_fling() {
        for v in [Vec2::new(0.0, -THRESHOLD), Vec2::new(0.0, THRESHOLD)] {
            assert_eq!(
                classify(v, Orientation::Portrait, FlingDirections::all(), THRESHOLD),
                None
            );
        }
    }

    #[test]
    fn just_over_threshold_is_a_fling() {
        let v = Vec2::new(0.0, -(THRESHOLD + 1.0));
        assert_eq!(
            classify(v, Orientation::Portrait, FlingDirections::all(), THRESHOLD),
            Some(FlingDirection::Upwards)
        );
    }

    #[test]
    fn landscape_reads_the_horizontal_axis() {
        let v = Vec2::new(-5000.0, 0.0);
        assert_eq!(
            classify(v, Orientation::Landscape, FlingDirections::all(), THRESHOLD),
            Some(FlingDirection::Upwards)
        );
        // The same velocity is meaningless in portrait.
        assert_eq!(
            classify(v, Orientation::Portrait, FlingDirections::all(), THRESHOLD),
            None
        );
    }

    #[test]
    fn disallowed_direction_is_an_ordinary_pop() {
        let v = Vec2::new(0.0, -5000.0);
        assert_eq!(
            classify(
                v,
                Orientation::Portrait,
                FlingDirections::DOWNWARDS,
                THRESHOLD
            ),
            None
        );
    }

    #[test]
    fn cross_axis_velocity_is_ignored() {
        // Huge horizontal velocity in portrait does not qualify.
        let v = Vec2::new(9000.0, -100.0);
        assert_eq!(
            classify(v, Orientation::Portrait, FlingDirections::all(), THRESHOLD),
            None
        );
    }

    #[test]
    fn exit_translation_scales_then_caps() {
        assert_eq!(exit_translation(-4000.0, 8.0, 1000.0), -500.0);
        assert_eq!(exit_translation(4000.0, 8.0, 1000.0), 500.0);
        assert_eq!(exit_translation(-16000.0, 8.0, 1000.0), -1000.0);
        assert_eq!(exit_translation(16000.0, 8.0, 1000.0), 1000.0);
    }
}
