// Copyright 2026 the Peekpop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation port: animation and visual side effects of state
//! transitions.
//!
//! The recognizer never renders; it narrates transitions through this trait
//! and the host animates however it likes. Every method has a default no-op
//! body so hosts implement only what they present. Two contracts matter:
//!
//! - After [`Presenter::animate_pop`] or [`Presenter::animate_fling_exit`]
//!   finishes, the host must call
//!   [`PeekPop::on_dismiss_complete`](crate::recognizer::PeekPop::on_dismiss_complete)
//!   so the recognizer can return to idle.
//! - [`Presenter::blur_background`] reports capability: returning `false`
//!   skips the effect (the recognizer logs a warning and proceeds; a missing
//!   blur never fails the gesture).

use crate::events::{FlingDirection, Orientation};

/// Host-side animation and presentation hooks.
pub trait Presenter<K> {
    /// Reveal the overlay (fade/scale in over `duration_ms`).
    fn show_overlay(&mut self, duration_ms: u64) {
        let _ = duration_ms;
    }

    /// Apply a blurred backdrop behind the overlay.
    ///
    /// Return `false` when the platform cannot blur; the gesture proceeds
    /// without the effect.
    fn blur_background(&mut self) -> bool {
        false
    }

    /// Clear the trigger element's pressed visual state.
    ///
    /// Called once when the overlay peeks, so the trigger is not left
    /// looking pressed underneath the overlay.
    fn cancel_trigger_press(&mut self, element: &K) {
        let _ = element;
    }

    /// Stop a parent container (scroll view or similar) from intercepting
    /// the rest of this gesture's touch events.
    fn disallow_parent_intercept(&mut self) {}

    /// Move the overlay's leading edge to `position` on the primary axis.
    fn set_overlay_position(&mut self, axis: Orientation, position: f64) {
        let _ = (axis, position);
    }

    /// Drive the fling-to-action hint visual: 0.0 hidden, 1.0 fully shown.
    fn set_hint_progress(&mut self, progress: f64) {
        let _ = progress;
    }

    /// Animate the overlay back to rest and fade it out.
    fn animate_pop(&mut self, duration_ms: u64) {
        let _ = duration_ms;
    }

    /// Slightly expand the overlay ahead of an upwards fling exit.
    fn animate_expand(&mut self, duration_ms: u64) {
        let _ = duration_ms;
    }

    /// Fling the overlay toward the screen edge.
    ///
    /// `translation` is the signed primary-axis distance, already derived
    /// from release velocity and capped by the recognizer.
    fn animate_fling_exit(&mut self, direction: FlingDirection, translation: f64, duration_ms: u64) {
        let _ = (direction, translation, duration_ms);
    }

    /// Return the overlay to its hidden, rest-state visuals.
    ///
    /// Called from `on_dismiss_complete` after every pop.
    fn reset_overlay(&mut self) {}
}
