// Copyright 2026 the Peekpop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! High-level gesture events and the small plain-data enums they carry.
//!
//! Events are emitted in batches from the recognizer's input operations and
//! carry only the opaque element handle `K` plus plain data, so a host can
//! dispatch them to any UI toolkit.

/// Direction of a qualifying fling release.
///
/// "Upwards" is toward negative coordinates on the primary axis (up in
/// portrait, left in landscape), matching screen-space velocity signs.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FlingDirection {
    /// Negative-axis fling (up / left).
    Upwards,
    /// Positive-axis fling (down / right).
    Downwards,
}

/// Device orientation; selects the primary drag and fling axis.
///
/// Chosen once per session and not re-evaluated mid-drag.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Orientation {
    /// Vertical primary axis.
    Portrait,
    /// Horizontal primary axis.
    Landscape,
}

/// An event emitted by the recognizer to the host.
///
/// `index` is the optional list-position index registered with the trigger
/// element, echoed back so list hosts can map the gesture to a row.
///
/// Per gesture cycle, [`GestureEvent::Peek`] and [`GestureEvent::Pop`] are
/// emitted exactly once each (in that order), or not at all if the press is
/// released before the long-press threshold. On a pop, any armed
/// hold-and-release region's [`GestureEvent::Release`] follows the `Pop`,
/// and a qualifying [`GestureEvent::FlingToAction`] comes last.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GestureEvent<K> {
    /// The overlay was revealed after a qualifying long-press.
    Peek {
        /// Trigger element that was long-pressed.
        element: K,
        /// List-position index of the trigger, if registered.
        index: Option<usize>,
    },
    /// The overlay is being dismissed after pointer release or cancel.
    Pop {
        /// Trigger element of the session.
        element: K,
        /// List-position index of the trigger, if registered.
        index: Option<usize>,
    },
    /// The pointer entered a long-hold region's bounds.
    LongHoldEnter {
        /// The region element.
        region: K,
        /// List-position index of the session's trigger.
        index: Option<usize>,
    },
    /// The pointer dwelled in a long-hold region for the configured
    /// duration. Repeats while held if the region was registered with
    /// `receive_multiple = true`.
    LongHold {
        /// The region element.
        region: K,
        /// List-position index of the session's trigger.
        index: Option<usize>,
    },
    /// A hold-and-release region armed itself after its short dwell.
    Hold {
        /// The region element.
        region: K,
        /// Index assigned to the region on arming.
        index: Option<usize>,
    },
    /// The pointer left an armed hold-and-release region before release.
    Leave {
        /// The region element.
        region: K,
        /// Index the region was armed with.
        index: Option<usize>,
    },
    /// The pointer was released while a hold-and-release region was armed.
    Release {
        /// The region element.
        region: K,
        /// Index the region was armed with.
        index: Option<usize>,
    },
    /// A fast directional release qualified as a fling-to-action.
    FlingToAction {
        /// Trigger element of the session.
        element: K,
        /// List-position index of the trigger, if registered.
        index: Option<usize>,
        /// Classified fling direction.
        direction: FlingDirection,
    },
}
