// Copyright 2026 the Peekpop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Peekpop Gesture: a deterministic, `no_std` peek-and-pop recognizer.
//!
//! ## Overview
//!
//! Press and hold a trigger element to *peek* a preview overlay; release to
//! *pop* it away. While peeked, the finger can drag the overlay elastically
//! along the primary axis, dwell in registered regions to fire hold events,
//! and fling the overlay toward the screen edge to commit an action.
//!
//! The recognizer is a plain state machine. It owns no threads, reads no
//! clock, and draws nothing:
//!
//! - **Time** comes in as `u64` milliseconds on every call, and pending
//!   timers fire only when the host calls [`PeekPop::on_timers`] (schedule
//!   a wakeup at [`PeekPop::next_deadline`]).
//! - **Geometry** comes in per call through [`ElementBounds`], keyed by an
//!   opaque element handle `K` of the host's choosing.
//! - **Presentation** goes out through [`Presenter`], a trait of no-op
//!   defaulted animation hooks.
//! - **Semantics** come back as batches of [`GestureEvent`] values returned
//!   from each input operation, in order.
//!
//! ## Gesture cycle
//!
//! A pointer down on a registered trigger starts a session. If the press
//! outlasts the long-press threshold, [`GestureEvent::Peek`] fires and the
//! overlay shows; an earlier release backs out silently. While peeked,
//! moves drive the elastic drag and the dwell regions; release or cancel
//! emits [`GestureEvent::Pop`] (plus [`GestureEvent::Release`] for an armed
//! region and [`GestureEvent::FlingToAction`] for a fast directional
//! release), and the session ends when the host reports its dismiss
//! animation done via [`PeekPop::on_dismiss_complete`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use peekpop_gesture::{ElementBounds, GestureEvent, PeekPop, Presenter};
//!
//! const OVERLAY: u32 = 0;
//! const TRIGGER: u32 = 1;
//!
//! struct Layout;
//!
//! impl ElementBounds<u32> for Layout {
//!     fn bounds_of(&self, element: &u32) -> Rect {
//!         match *element {
//!             OVERLAY => Rect::new(100.0, 200.0, 500.0, 900.0),
//!             _ => Rect::new(0.0, 1000.0, 600.0, 1100.0),
//!         }
//!     }
//! }
//!
//! struct NoVisuals;
//! impl Presenter<u32> for NoVisuals {}
//!
//! let mut peek = PeekPop::builder()
//!     .overlay(OVERLAY)
//!     .trigger(TRIGGER, Some(0))
//!     .build()?;
//!
//! assert!(peek.on_pointer_down(TRIGGER, Point::new(300.0, 1050.0), 0));
//! let deadline = peek.next_deadline().unwrap();
//! let events = peek.on_timers(deadline, &Layout, &mut NoVisuals);
//! assert_eq!(
//!     events,
//!     vec![GestureEvent::Peek { element: TRIGGER, index: Some(0) }]
//! );
//!
//! let events = peek.on_pointer_up(None, &mut NoVisuals);
//! assert_eq!(
//!     events,
//!     vec![GestureEvent::Pop { element: TRIGGER, index: Some(0) }]
//! );
//! peek.on_dismiss_complete(&mut NoVisuals);
//! # Ok::<(), peekpop_gesture::ConfigError>(())
//! ```
//!
//! ## Feature flags
//!
//! - `std` (default): use the standard library's float math.
//! - `libm`: float math via `libm` for `no_std` targets. One of `std` or
//!   `libm` must be enabled.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("peekpop_gesture requires either the `std` or `libm` feature");

pub mod config;
pub mod drag;
pub mod events;
pub mod fling;
pub mod geometry;
pub mod presenter;
pub mod recognizer;
pub mod velocity;

mod regions;

pub use config::{ConfigError, FlingDirections, PeekConfig};
pub use events::{FlingDirection, GestureEvent, Orientation};
pub use geometry::ElementBounds;
pub use presenter::Presenter;
pub use recognizer::{OverlayState, PeekPop, PeekPopBuilder, Phase};
pub use velocity::VelocityEstimator;
