// Copyright 2026 the Peekpop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elastic drag tracking for the peeked overlay.
//!
//! Maps raw primary-axis pointer coordinates to overlay positions with a
//! diminishing-returns curve: early movement translates almost 1:1, large
//! drags compress. The mapping, for rest position `r` and grab-adjusted
//! pointer position `p`:
//!
//! ```text
//! distance = r - p
//! position = r - (distance / elastic_divisor + sqrt(distance) * elastic_sqrt_scale)
//! ```
//!
//! clamped so the overlay never crosses back past rest in the direction
//! opposite the drag and never comes closer than `edge_margin` to the
//! screen edge. Rest wins when the two clamps conflict (an overlay laid
//! out inside the margin stays where it rests). The constants are tuned feel values (see
//! [`PeekConfig`](crate::config::PeekConfig)).

use crate::config::PeekConfig;

#[cfg(feature = "std")]
fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
fn sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

/// One computed drag frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragFrame {
    /// Overlay leading-edge position on the primary axis.
    pub position: f64,
    /// Fling hint visibility: 0.0 at rest through half-drag, 1.0 at the
    /// maximum allowed drag.
    pub hint_progress: f64,
}

/// Per-session elastic drag state.
///
/// Created when the overlay peeks (and only when fling-to-action is
/// enabled). Dragging begins once the pointer enters the overlay's own
/// bounds — a one-way latch that stays set for the rest of the session.
///
/// `initial_touch_offset` records where within the overlay the finger
/// grabbed it. It is raised monotonically toward the overlay's half-extent
/// as the finger drifts deeper into the overlay, and never lowered, which
/// keeps the grab point stable relative to the finger during one drag.
#[derive(Clone, Debug)]
pub struct DragTracker {
    rest: f64,
    half_extent: f64,
    max_drag: f64,
    edge_margin: f64,
    elastic_divisor: f64,
    elastic_sqrt_scale: f64,
    initial_touch_offset: f64,
    has_entered_bounds: bool,
}

impl DragTracker {
    /// Set up drag state for a freshly peeked overlay.
    ///
    /// `rest` is the overlay's leading-edge position on the primary axis;
    /// `extent` its full size on that axis. The maximum allowed drag
    /// position is computed once here as `rest - drag_amount`, floored at 0.
    pub fn new(rest: f64, extent: f64, config: &PeekConfig) -> Self {
        Self {
            rest,
            half_extent: extent / 2.0,
            max_drag: (rest - config.drag_amount).max(0.0),
            edge_margin: config.edge_margin,
            elastic_divisor: config.elastic_divisor,
            elastic_sqrt_scale: config.elastic_sqrt_scale,
            initial_touch_offset: 0.0,
            has_entered_bounds: false,
        }
    }

    /// Whether the pointer has entered the overlay's bounds this session.
    pub fn has_entered_bounds(&self) -> bool {
        self.has_entered_bounds
    }

    /// Latch bounds entry. One-way; never reset until the gesture ends.
    pub fn enter_bounds(&mut self) {
        self.has_entered_bounds = true;
    }

    /// Rest position this tracker was created with.
    pub fn rest(&self) -> f64 {
        self.rest
    }

    /// Compute the overlay position for a raw pointer coordinate.
    ///
    /// `pointer` is the raw primary-axis pointer coordinate;
    /// `overlay_position` the overlay's current leading-edge position (used
    /// to keep the grab offset anchored to the finger).
    pub fn update(&mut self, pointer: f64, overlay_position: f64) -> DragFrame {
        let grab = (pointer - overlay_position).min(self.half_extent);
        if grab > self.initial_touch_offset {
            self.initial_touch_offset = grab;
        }

        let adjusted = pointer - self.initial_touch_offset;
        let distance = self.rest - adjusted;

        let position = if distance <= 0.0 {
            // Pointer on the far side of rest: snap to rest, never cross it.
            self.rest
        } else {
            let moved = distance / self.elastic_divisor + sqrt(distance) * self.elastic_sqrt_scale;
            // Rest bounds the edge-margin clamp: when rest itself sits
            // inside the margin, the overlay stays at rest rather than
            // being pushed past it away from the drag.
            (self.rest - moved).max(self.edge_margin).min(self.rest)
        };

        DragFrame {
            position,
            hint_progress: self.hint_progress(position),
        }
    }

    /// Hint visibility for an overlay position.
    ///
    /// With `progress` the fraction of the maximum allowed drag covered so
    /// far, the hint value is `clamp(2 * progress - 1, 0, 1)`: hidden
    /// through the first half of the drag, saturating at `max_drag`.
    fn hint_progress(&self, position: f64) -> f64 {
        let span = self.rest - self.max_drag;
        if span <= 0.0 {
            return 0.0;
        }
        let progress = ((self.rest - position) / span).clamp(0.0, 1.0);
        (2.0 * progress - 1.0).clamp(0.0, 1.0)
    }
}
