// Copyright 2026 the Peekpop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry port: screen-space bounds queries for opaque element handles.

use kurbo::{Point, Rect};

/// Screen-space bounding boxes for UI elements, supplied by the host.
///
/// The recognizer calls this once per pointer move for every tracked region
/// plus the overlay, so implementations should be cheap (cache per frame if
/// layout queries are not). Queries must be pure: no side effects, and a
/// stable answer within one input event.
pub trait ElementBounds<K> {
    /// Screen-space bounding box of `element`.
    fn bounds_of(&self, element: &K) -> Rect;

    /// Whether `point` falls inside `element`'s bounds.
    ///
    /// Boundary-inclusive on all four edges (`x ∈ [x0, x1]`, `y ∈ [y0, y1]`),
    /// deliberately not [`Rect::contains`]'s half-open test: a pointer resting
    /// exactly on a region's edge counts as inside.
    fn point_in_bounds(&self, element: &K, point: Point) -> bool {
        let b = self.bounds_of(element);
        point.x >= b.x0 && point.x <= b.x1 && point.y >= b.y0 && point.y <= b.y1
    }
}

impl<K, T: ElementBounds<K> + ?Sized> ElementBounds<K> for &T {
    fn bounds_of(&self, element: &K) -> Rect {
        (**self).bounds_of(element)
    }
}
