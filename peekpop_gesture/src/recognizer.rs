// Copyright 2026 the Peekpop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The peek-and-pop recognizer: a host-driven gesture state machine.
//!
//! [`PeekPop`] consumes pointer events and clock polls and emits batches of
//! [`GestureEvent`]s. It owns no threads and never calls back into the host
//! unprompted; all timing flows through [`PeekPop::on_timers`], which the
//! host calls when [`PeekPop::next_deadline`] comes due.
//!
//! A gesture cycle moves through four phases:
//!
//! ```text
//! Idle --down on trigger--> Pressing --long-press timer--> Peeking
//! Peeking --up/cancel--> Popping --on_dismiss_complete--> Idle
//! ```
//!
//! Every return to idle bumps an internal generation counter, and every
//! scheduled timer message carries the generation it was scheduled under.
//! A message whose generation no longer matches is dropped without effect,
//! so timers racing a release can never act on a later session.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};
use peekpop_timer::TimerService;

use crate::config::{ConfigError, FlingDirections, PeekConfig};
use crate::drag::DragTracker;
use crate::events::{FlingDirection, GestureEvent, Orientation};
use crate::fling;
use crate::geometry::ElementBounds;
use crate::presenter::Presenter;
use crate::regions::RegionTracker;
use crate::velocity::VelocityEstimator;

/// Overlay scale while hidden, ready to grow to 1.0 on the next peek.
const HIDDEN_SCALE: f64 = 0.85;

/// Messages carried by the recognizer's timer queue.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum TimerMsg<K> {
    /// The press has lasted long enough to peek.
    LongPress { generation: u64 },
    /// A long-hold region's dwell elapsed.
    LongHoldDwell { element: K, generation: u64 },
    /// A hold-and-release region's arming dwell elapsed.
    HoldArm { element: K, generation: u64 },
}

/// Where the recognizer is in the gesture cycle.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Phase {
    /// No active gesture.
    Idle,
    /// Pointer down on a trigger, waiting out the long-press threshold.
    Pressing,
    /// Overlay shown; tracking drag, regions, and release velocity.
    Peeking,
    /// Pop requested; waiting for the host's dismiss animation to finish.
    Popping,
}

/// Observable overlay state, for hosts that render from recognizer state
/// rather than from presenter callbacks.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayState {
    /// Whether the overlay is currently shown.
    pub visible: bool,
    /// Primary-axis leading-edge position when at rest.
    pub rest: f64,
    /// Current primary-axis leading-edge position.
    pub position: f64,
    /// Current overlay scale.
    pub scale: f64,
}

/// One press-to-dismiss gesture in flight.
#[derive(Debug)]
struct Session<K> {
    element: K,
    index: Option<usize>,
}

/// Builder for [`PeekPop`]; the overlay element is the one required input.
#[derive(Debug)]
pub struct PeekPopBuilder<K> {
    overlay: Option<K>,
    triggers: Vec<(K, Option<usize>)>,
    long_hold: Vec<(K, bool)>,
    hold_release: Vec<K>,
    config: PeekConfig,
}

impl<K: Copy + Eq> PeekPopBuilder<K> {
    /// Start an empty builder with default tuning.
    pub fn new() -> Self {
        Self {
            overlay: None,
            triggers: Vec::new(),
            long_hold: Vec::new(),
            hold_release: Vec::new(),
            config: PeekConfig::default(),
        }
    }

    /// The element the overlay is anchored to. Required.
    pub fn overlay(mut self, element: K) -> Self {
        self.overlay = Some(element);
        self
    }

    /// Register a trigger element. `index` is echoed back on every event of
    /// sessions this trigger starts, for list hosts.
    pub fn trigger(mut self, element: K, index: Option<usize>) -> Self {
        self.triggers.push((element, index));
        self
    }

    /// Register a long-hold region. With `receive_multiple`, the region
    /// keeps firing while the pointer dwells in it.
    pub fn long_hold_region(mut self, element: K, receive_multiple: bool) -> Self {
        self.long_hold.push((element, receive_multiple));
        self
    }

    /// Register a hold-and-release region.
    pub fn hold_and_release_region(mut self, element: K) -> Self {
        self.hold_release.push(element);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: PeekConfig) -> Self {
        self.config = config;
        self
    }

    /// Allowed fling directions.
    pub fn fling_directions(mut self, directions: FlingDirections) -> Self {
        self.config.fling_directions = directions;
        self
    }

    /// Whether to request a blurred backdrop on peek.
    pub fn blur_background(mut self, blur: bool) -> Self {
        self.config.blur_background = blur;
        self
    }

    /// Whether a qualifying fling plays the expand-and-exit animation.
    pub fn animate_fling(mut self, animate: bool) -> Self {
        self.config.animate_fling = animate;
        self
    }

    /// Dwell duration for long-hold regions.
    pub fn long_hold_duration_ms(mut self, duration_ms: u64) -> Self {
        self.config.long_hold_ms = duration_ms;
        self
    }

    /// Primary-axis selection for drag and fling.
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.config.orientation = orientation;
        self
    }

    /// Ask the presenter to block parent touch interception on peek.
    pub fn disallow_parent_intercept(mut self, disallow: bool) -> Self {
        self.config.disallow_parent_intercept = disallow;
        self
    }

    /// Build the recognizer.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingOverlay`] if no overlay element was supplied.
    pub fn build(self) -> Result<PeekPop<K>, ConfigError> {
        let overlay = self.overlay.ok_or(ConfigError::MissingOverlay)?;
        let mut regions = RegionTracker::new();
        for (element, receive_multiple) in self.long_hold {
            regions.add_long_hold(element, receive_multiple);
        }
        for element in self.hold_release {
            regions.add_hold_and_release(element);
        }
        Ok(PeekPop {
            config: self.config,
            overlay,
            triggers: self.triggers,
            regions,
            timers: TimerService::new(),
            session: None,
            drag: None,
            overlay_state: OverlayState {
                visible: false,
                rest: 0.0,
                position: 0.0,
                scale: HIDDEN_SCALE,
            },
            phase: Phase::Idle,
            generation: 0,
            enabled: true,
            vel_x: VelocityEstimator::new(),
            vel_y: VelocityEstimator::new(),
        })
    }
}

impl<K: Copy + Eq> Default for PeekPopBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// The peek-and-pop gesture recognizer.
///
/// Generic over an opaque element handle `K` (a widget id, a node key).
/// The recognizer holds no references into the host's tree; geometry and
/// presentation come in per call through [`ElementBounds`] and
/// [`Presenter`].
#[derive(Debug)]
pub struct PeekPop<K> {
    config: PeekConfig,
    overlay: K,
    triggers: Vec<(K, Option<usize>)>,
    regions: RegionTracker<K>,
    timers: TimerService<TimerMsg<K>>,
    session: Option<Session<K>>,
    drag: Option<DragTracker>,
    overlay_state: OverlayState,
    phase: Phase,
    generation: u64,
    enabled: bool,
    vel_x: VelocityEstimator,
    vel_y: VelocityEstimator,
}

impl<K: Copy + Eq> PeekPop<K> {
    /// Start building a recognizer.
    pub fn builder() -> PeekPopBuilder<K> {
        PeekPopBuilder::new()
    }

    /// Current phase of the gesture cycle.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Observable overlay state.
    pub fn overlay_state(&self) -> &OverlayState {
        &self.overlay_state
    }

    /// Current configuration.
    pub fn config(&self) -> &PeekConfig {
        &self.config
    }

    /// Earliest pending timer deadline, if any. The host should call
    /// [`PeekPop::on_timers`] no later than this instant.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Whether new gestures may start. Disabling does not interrupt a
    /// session already in flight.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether new gestures may start.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Register another trigger element at runtime.
    pub fn add_trigger(&mut self, element: K, index: Option<usize>) {
        self.triggers.push((element, index));
    }

    /// Register another long-hold region at runtime.
    pub fn add_long_hold_region(&mut self, element: K, receive_multiple: bool) {
        self.regions.add_long_hold(element, receive_multiple);
    }

    /// Register another hold-and-release region at runtime.
    pub fn add_hold_and_release_region(&mut self, element: K) {
        self.regions.add_hold_and_release(element);
    }

    /// Allowed fling directions.
    pub fn set_fling_directions(&mut self, directions: FlingDirections) {
        self.config.fling_directions = directions;
    }

    /// Whether to request a blurred backdrop on peek.
    pub fn set_blur_background(&mut self, blur: bool) {
        self.config.blur_background = blur;
    }

    /// Whether a qualifying fling plays the expand-and-exit animation.
    pub fn set_animate_fling(&mut self, animate: bool) {
        self.config.animate_fling = animate;
    }

    /// Dwell duration for long-hold regions. Takes effect on the next dwell.
    pub fn set_long_hold_duration_ms(&mut self, duration_ms: u64) {
        self.config.long_hold_ms = duration_ms;
    }

    /// Pointer went down on `element` at `point`.
    ///
    /// Returns whether a session started, so the host knows to route the
    /// rest of this pointer's events here. A down during `Popping` abandons
    /// the running dismiss: internal state resets immediately and the new
    /// press proceeds, while the host's late
    /// [`PeekPop::on_dismiss_complete`] call still cleans up the overlay
    /// visuals without touching the new session.
    pub fn on_pointer_down(&mut self, element: K, point: Point, now: u64) -> bool {
        if !self.enabled {
            return false;
        }
        if self.phase == Phase::Popping {
            self.finish_session();
        }
        if self.phase != Phase::Idle {
            return false;
        }
        let Some(&(_, index)) = self.triggers.iter().find(|(k, _)| *k == element) else {
            return false;
        };

        self.session = Some(Session { element, index });
        self.phase = Phase::Pressing;
        self.vel_x.reset();
        self.vel_y.reset();
        if self.config.fling_to_action {
            // First sample of the pointer track; it ages out of the
            // estimation window long before any release can fling.
            self.vel_x.push(now, point.x);
            self.vel_y.push(now, point.y);
        }
        self.timers.schedule(
            now + self.config.long_press_ms,
            TimerMsg::LongPress {
                generation: self.generation,
            },
        );
        true
    }

    /// Pointer moved to `point`.
    ///
    /// Ignored unless the overlay is peeked: a finger resting through the
    /// long-press threshold is allowed to wobble, and a popping overlay no
    /// longer tracks the finger.
    pub fn on_pointer_move(
        &mut self,
        point: Point,
        now: u64,
        geometry: &impl ElementBounds<K>,
        presenter: &mut impl Presenter<K>,
    ) -> Vec<GestureEvent<K>> {
        let mut events = Vec::new();
        if self.phase != Phase::Peeking {
            return events;
        }
        let Some(session) = self.session.as_ref() else {
            return events;
        };
        let index = session.index;

        if self.config.fling_to_action {
            self.vel_x.push(now, point.x);
            self.vel_y.push(now, point.y);
        }

        self.regions.update(
            point,
            now,
            self.generation,
            index,
            &self.config,
            &mut self.timers,
            geometry,
            &mut events,
        );

        if let Some(drag) = &mut self.drag {
            if !drag.has_entered_bounds() && geometry.point_in_bounds(&self.overlay, point) {
                drag.enter_bounds();
            }
            if drag.has_entered_bounds() {
                let pointer = match self.config.orientation {
                    Orientation::Portrait => point.y,
                    Orientation::Landscape => point.x,
                };
                let frame = drag.update(pointer, self.overlay_state.position);
                self.overlay_state.position = frame.position;
                presenter.set_overlay_position(self.config.orientation, frame.position);
                presenter.set_hint_progress(frame.hint_progress);
            }
        }

        events
    }

    /// Pointer lifted.
    ///
    /// `velocity` is the host's release velocity if its input stack tracks
    /// one; otherwise the recognizer's own estimate from recent moves is
    /// used for fling classification.
    pub fn on_pointer_up(
        &mut self,
        velocity: Option<Vec2>,
        presenter: &mut impl Presenter<K>,
    ) -> Vec<GestureEvent<K>> {
        match self.phase {
            Phase::Pressing => {
                self.abort_press();
                Vec::new()
            }
            Phase::Peeking => {
                let velocity = self.config.fling_to_action.then(|| {
                    velocity
                        .unwrap_or_else(|| Vec2::new(self.vel_x.velocity(), self.vel_y.velocity()))
                });
                self.pop(velocity, presenter)
            }
            Phase::Idle | Phase::Popping => Vec::new(),
        }
    }

    /// Pointer sequence cancelled by the platform. Pops without a fling.
    pub fn on_pointer_cancel(&mut self, presenter: &mut impl Presenter<K>) -> Vec<GestureEvent<K>> {
        match self.phase {
            Phase::Pressing => {
                self.abort_press();
                Vec::new()
            }
            Phase::Peeking => self.pop(None, presenter),
            Phase::Idle | Phase::Popping => Vec::new(),
        }
    }

    /// Deliver due timers at `now`.
    ///
    /// Safe to call at any time, including with no timers pending.
    pub fn on_timers(
        &mut self,
        now: u64,
        geometry: &impl ElementBounds<K>,
        presenter: &mut impl Presenter<K>,
    ) -> Vec<GestureEvent<K>> {
        let mut events = Vec::new();
        for (id, msg) in self.timers.fire_due(now) {
            match msg {
                TimerMsg::LongPress { generation } => {
                    if generation == self.generation && self.phase == Phase::Pressing {
                        self.peek(geometry, presenter, &mut events);
                    }
                }
                TimerMsg::LongHoldDwell { element, generation } => {
                    if generation == self.generation && self.phase == Phase::Peeking {
                        let index = self.session.as_ref().and_then(|s| s.index);
                        self.regions.on_long_hold_fired(
                            element,
                            id,
                            now,
                            generation,
                            index,
                            &self.config,
                            &mut self.timers,
                            &mut events,
                        );
                    }
                }
                TimerMsg::HoldArm { element, generation } => {
                    if generation == self.generation && self.phase == Phase::Peeking {
                        let index = self.session.as_ref().and_then(|s| s.index);
                        self.regions.on_hold_arm_fired(element, id, index, &mut events);
                    }
                }
            }
        }
        events
    }

    /// The host's dismiss animation finished.
    ///
    /// Always restores the overlay's hidden visuals. Recognizer state only
    /// changes if a dismiss is actually in flight, so a late completion
    /// callback cannot disturb a session started in the meantime.
    pub fn on_dismiss_complete(&mut self, presenter: &mut impl Presenter<K>) {
        presenter.reset_overlay();
        if self.phase == Phase::Popping {
            self.finish_session();
        }
    }

    /// Reveal the overlay after a qualifying long-press.
    fn peek(
        &mut self,
        geometry: &impl ElementBounds<K>,
        presenter: &mut impl Presenter<K>,
        events: &mut Vec<GestureEvent<K>>,
    ) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let element = session.element;
        let index = session.index;

        self.phase = Phase::Peeking;
        events.push(GestureEvent::Peek { element, index });

        presenter.show_overlay(self.config.peek_animation_ms);
        if self.config.blur_background && !presenter.blur_background() {
            log::warn!("presenter cannot blur the backdrop; peeking without it");
        }
        presenter.cancel_trigger_press(&element);
        if self.config.disallow_parent_intercept {
            presenter.disallow_parent_intercept();
        }

        let bounds = geometry.bounds_of(&self.overlay);
        let (rest, extent) = match self.config.orientation {
            Orientation::Portrait => (bounds.y0, bounds.height()),
            Orientation::Landscape => (bounds.x0, bounds.width()),
        };
        self.overlay_state = OverlayState {
            visible: true,
            rest,
            position: rest,
            scale: 1.0,
        };
        self.drag = self
            .config
            .fling_to_action
            .then(|| DragTracker::new(rest, extent, &self.config));
    }

    /// Dismiss the overlay: emit `Pop`, then any armed region's `Release`,
    /// then a qualifying `FlingToAction`, and hand the exit animation to
    /// the presenter.
    fn pop(
        &mut self,
        velocity: Option<Vec2>,
        presenter: &mut impl Presenter<K>,
    ) -> Vec<GestureEvent<K>> {
        let mut events = Vec::new();
        let Some(session) = self.session.as_ref() else {
            return events;
        };
        let element = session.element;
        let index = session.index;

        events.push(GestureEvent::Pop { element, index });
        if let Some((region, armed_index)) = self.regions.armed() {
            events.push(GestureEvent::Release {
                region,
                index: armed_index,
            });
        }

        let fling = velocity.and_then(|v| {
            let direction = fling::classify(
                v,
                self.config.orientation,
                self.config.fling_directions,
                self.config.fling_threshold,
            )?;
            Some((direction, fling::axis_velocity(v, self.config.orientation)))
        });

        self.regions.reset(&mut self.timers);
        self.timers.cancel_all();
        self.phase = Phase::Popping;

        match fling {
            Some((direction, axis_velocity)) => {
                events.push(GestureEvent::FlingToAction {
                    element,
                    index,
                    direction,
                });
                if self.config.animate_fling {
                    let translation = fling::exit_translation(
                        axis_velocity,
                        self.config.fling_divisor,
                        self.config.max_fling_translation,
                    );
                    if direction == FlingDirection::Upwards {
                        presenter.animate_expand(self.config.pop_animation_ms);
                    }
                    presenter.animate_fling_exit(
                        direction,
                        translation,
                        self.config.pop_animation_ms,
                    );
                } else {
                    presenter.animate_pop(self.config.pop_animation_ms);
                }
            }
            None => presenter.animate_pop(self.config.pop_animation_ms),
        }

        events
    }

    /// Release before the long-press threshold: silently back out.
    fn abort_press(&mut self) {
        self.timers.cancel_all();
        self.session = None;
        self.phase = Phase::Idle;
        self.generation += 1;
    }

    /// Return to idle after a dismiss (or when a new press abandons one).
    fn finish_session(&mut self) {
        self.timers.cancel_all();
        self.regions.reset(&mut self.timers);
        self.session = None;
        self.drag = None;
        self.phase = Phase::Idle;
        self.generation += 1;
        self.vel_x.reset();
        self.vel_y.reset();
        self.overlay_state = OverlayState {
            visible: false,
            rest: self.overlay_state.rest,
            position: self.overlay_state.rest,
            scale: HIDDEN_SCALE,
        };
    }
}
