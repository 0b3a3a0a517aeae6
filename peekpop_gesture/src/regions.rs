// Copyright 2026 the Peekpop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dwell-sensitive regions inside the peeked overlay.
//!
//! Two kinds share one enter/exit rule, parametrized by duration:
//!
//! - **Long-hold regions** fire [`GestureEvent::LongHold`] after the
//!   pointer dwells inside them, optionally repeating while held.
//! - **Hold-and-release regions** arm themselves after a short dwell
//!   ([`GestureEvent::Hold`]); an armed region fires
//!   [`GestureEvent::Release`] if the pointer lifts while it is current, or
//!   [`GestureEvent::Leave`] if the pointer exits its bounds first.
//!
//! A region's timer handle is non-`None` exactly while the pointer is
//! considered inside it during an active peek. After a non-repeat fire the
//! handle goes inert but stays set, so a continuous dwell fires at most
//! once; re-entering after an exit always restarts dwell counting from
//! zero.

use alloc::vec::Vec;

use kurbo::Point;
use peekpop_timer::{TimerId, TimerService};
use smallvec::SmallVec;

use crate::config::PeekConfig;
use crate::events::GestureEvent;
use crate::geometry::ElementBounds;
use crate::recognizer::TimerMsg;

#[derive(Debug)]
struct LongHoldRegion<K> {
    element: K,
    repeat: bool,
    timer: Option<TimerId>,
}

#[derive(Debug)]
struct HoldAndReleaseRegion<K> {
    element: K,
    timer: Option<TimerId>,
}

/// The armed ("current") hold-and-release region, at most one at a time.
#[derive(Copy, Clone, Debug)]
struct Armed {
    slot: usize,
    index: Option<usize>,
}

#[derive(Debug)]
pub(crate) struct RegionTracker<K> {
    long_hold: SmallVec<[LongHoldRegion<K>; 4]>,
    hold_release: SmallVec<[HoldAndReleaseRegion<K>; 4]>,
    current: Option<Armed>,
}

impl<K: Copy + Eq> RegionTracker<K> {
    pub(crate) fn new() -> Self {
        Self {
            long_hold: SmallVec::new(),
            hold_release: SmallVec::new(),
            current: None,
        }
    }

    pub(crate) fn add_long_hold(&mut self, element: K, receive_multiple: bool) {
        self.long_hold.push(LongHoldRegion {
            element,
            repeat: receive_multiple,
            timer: None,
        });
    }

    pub(crate) fn add_hold_and_release(&mut self, element: K) {
        self.hold_release.push(HoldAndReleaseRegion {
            element,
            timer: None,
        });
    }

    /// The armed region and the index it was armed with, if any.
    pub(crate) fn armed(&self) -> Option<(K, Option<usize>)> {
        self.current
            .map(|armed| (self.hold_release[armed.slot].element, armed.index))
    }

    /// Run both enter/exit passes for the current pointer position.
    pub(crate) fn update(
        &mut self,
        point: Point,
        now: u64,
        generation: u64,
        index: Option<usize>,
        config: &PeekConfig,
        timers: &mut TimerService<TimerMsg<K>>,
        geometry: &impl ElementBounds<K>,
        events: &mut Vec<GestureEvent<K>>,
    ) {
        for region in &mut self.long_hold {
            let inside = geometry.point_in_bounds(&region.element, point);
            if inside && region.timer.is_none() {
                let deadline = now + config.long_hold_ms;
                region.timer = Some(timers.schedule(
                    deadline,
                    TimerMsg::LongHoldDwell {
                        element: region.element,
                        generation,
                    },
                ));
                events.push(GestureEvent::LongHoldEnter {
                    region: region.element,
                    index,
                });
            } else if !inside {
                if let Some(id) = region.timer.take() {
                    timers.cancel(id);
                }
            }
        }

        for (slot, region) in self.hold_release.iter_mut().enumerate() {
            let inside = geometry.point_in_bounds(&region.element, point);
            if inside && region.timer.is_none() {
                let deadline = now + config.hold_and_release_ms;
                region.timer = Some(timers.schedule(
                    deadline,
                    TimerMsg::HoldArm {
                        element: region.element,
                        generation,
                    },
                ));
            } else if !inside {
                if let Some(id) = region.timer.take() {
                    timers.cancel(id);
                    if let Some(armed) = self.current {
                        if armed.slot == slot {
                            self.current = None;
                            events.push(GestureEvent::Leave {
                                region: region.element,
                                index: armed.index,
                            });
                        }
                    }
                }
            }
        }
    }

    /// A long-hold dwell timer fired.
    ///
    /// `fired` must still be the region's live handle; anything else is a
    /// stale fire and is discarded silently.
    pub(crate) fn on_long_hold_fired(
        &mut self,
        element: K,
        fired: TimerId,
        now: u64,
        generation: u64,
        index: Option<usize>,
        config: &PeekConfig,
        timers: &mut TimerService<TimerMsg<K>>,
        events: &mut Vec<GestureEvent<K>>,
    ) {
        let Some(region) = self.long_hold.iter_mut().find(|r| r.element == element) else {
            return;
        };
        if region.timer != Some(fired) {
            return;
        }
        events.push(GestureEvent::LongHold {
            region: element,
            index,
        });
        if region.repeat {
            let interval = (config.long_hold_ms as f64 * config.repeat_scale).max(0.0) as u64;
            region.timer = Some(timers.schedule(
                now + interval,
                TimerMsg::LongHoldDwell {
                    element,
                    generation,
                },
            ));
        }
        // Without repeat, the handle stays set but inert: still inside, and
        // only an exit clears it, so this dwell fires exactly once.
    }

    /// A hold-and-release dwell timer fired: arm the region.
    ///
    /// Arming replaces any previously current region without an event;
    /// `Leave` is emitted only on explicit bounds exit.
    pub(crate) fn on_hold_arm_fired(
        &mut self,
        element: K,
        fired: TimerId,
        index: Option<usize>,
        events: &mut Vec<GestureEvent<K>>,
    ) {
        let Some(slot) = self.hold_release.iter().position(|r| r.element == element) else {
            return;
        };
        if self.hold_release[slot].timer != Some(fired) {
            return;
        }
        self.current = Some(Armed { slot, index });
        events.push(GestureEvent::Hold {
            region: element,
            index,
        });
    }

    /// Drop every timer handle and the armed region (on pop or teardown).
    pub(crate) fn reset(&mut self, timers: &mut TimerService<TimerMsg<K>>) {
        for region in &mut self.long_hold {
            if let Some(id) = region.timer.take() {
                timers.cancel(id);
            }
        }
        for region in &mut self.hold_release {
            if let Some(id) = region.timer.take() {
                timers.cancel(id);
            }
        }
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::Rect;

    struct Bounds(Vec<(u32, Rect)>);

    impl ElementBounds<u32> for Bounds {
        fn bounds_of(&self, element: &u32) -> Rect {
            self.0
                .iter()
                .find(|(k, _)| k == element)
                .map(|(_, r)| *r)
                .unwrap_or(Rect::ZERO)
        }
    }

    const HOLD: u32 = 2;
    const HAR_A: u32 = 3;
    const HAR_B: u32 = 4;

    fn bounds() -> Bounds {
        Bounds(vec![
            (HOLD, Rect::new(0.0, 0.0, 100.0, 100.0)),
            (HAR_A, Rect::new(200.0, 0.0, 300.0, 100.0)),
            (HAR_B, Rect::new(400.0, 0.0, 500.0, 100.0)),
        ])
    }

    fn fixture() -> (
        RegionTracker<u32>,
        TimerService<TimerMsg<u32>>,
        PeekConfig,
        Bounds,
    ) {
        let mut tracker = RegionTracker::new();
        tracker.add_long_hold(HOLD, false);
        tracker.add_hold_and_release(HAR_A);
        tracker.add_hold_and_release(HAR_B);
        (tracker, TimerService::new(), PeekConfig::default(), bounds())
    }

    fn step(
        tracker: &mut RegionTracker<u32>,
        timers: &mut TimerService<TimerMsg<u32>>,
        config: &PeekConfig,
        geometry: &Bounds,
        point: Point,
        now: u64,
    ) -> Vec<GestureEvent<u32>> {
        let mut events = Vec::new();
        tracker.update(point, now, 1, Some(7), config, timers, geometry, &mut events);
        events
    }

    /// Drain due timers into the tracker's fire handlers.
    fn fire(
        tracker: &mut RegionTracker<u32>,
        timers: &mut TimerService<TimerMsg<u32>>,
        config: &PeekConfig,
        now: u64,
    ) -> Vec<GestureEvent<u32>> {
        let mut events = Vec::new();
        for (id, msg) in timers.fire_due(now) {
            match msg {
                TimerMsg::LongHoldDwell { element, generation } => tracker.on_long_hold_fired(
                    element,
                    id,
                    now,
                    generation,
                    Some(7),
                    config,
                    timers,
                    &mut events,
                ),
                TimerMsg::HoldArm { element, .. } => {
                    tracker.on_hold_arm_fired(element, id, Some(7), &mut events);
                }
                TimerMsg::LongPress { .. } => unreachable!("regions never schedule long-press"),
            }
        }
        events
    }

    #[test]
    fn enter_starts_dwell_and_emits_enter_event() {
        let (mut tracker, mut timers, config, geometry) = fixture();
        let events = step(
            &mut tracker,
            &mut timers,
            &config,
            &geometry,
            Point::new(50.0, 50.0),
            100,
        );
        assert_eq!(
            events,
            vec![GestureEvent::LongHoldEnter {
                region: HOLD,
                index: Some(7)
            }]
        );
        assert_eq!(timers.next_deadline(), Some(100 + config.long_hold_ms));
    }

    #[test]
    fn exit_cancels_dwell() {
        let (mut tracker, mut timers, config, geometry) = fixture();
        step(
            &mut tracker,
            &mut timers,
            &config,
            &geometry,
            Point::new(50.0, 50.0),
            100,
        );
        let events = step(
            &mut tracker,
            &mut timers,
            &config,
            &geometry,
            Point::new(150.0, 50.0),
            300,
        );
        assert!(events.is_empty());
        assert!(timers.is_empty());
        assert!(fire(&mut tracker, &mut timers, &config, 10_000).is_empty());
    }

    #[test]
    fn reenter_restarts_dwell_from_zero() {
        let (mut tracker, mut timers, config, geometry) = fixture();
        step(
            &mut tracker,
            &mut timers,
            &config,
            &geometry,
            Point::new(50.0, 50.0),
            100,
        );
        step(
            &mut tracker,
            &mut timers,
            &config,
            &geometry,
            Point::new(150.0, 50.0),
            600,
        );
        step(
            &mut tracker,
            &mut timers,
            &config,
            &geometry,
            Point::new(50.0, 50.0),
            700,
        );
        // No partial credit: the new deadline counts from re-entry.
        assert_eq!(timers.next_deadline(), Some(700 + config.long_hold_ms));
        assert!(fire(&mut tracker, &mut timers, &config, 100 + config.long_hold_ms).is_empty());
    }

    #[test]
    fn continuous_dwell_fires_once_without_repeat() {
        let (mut tracker, mut timers, config, geometry) = fixture();
        let inside = Point::new(50.0, 50.0);
        step(&mut tracker, &mut timers, &config, &geometry, inside, 0);
        let events = fire(&mut tracker, &mut timers, &config, config.long_hold_ms);
        assert_eq!(
            events,
            vec![GestureEvent::LongHold {
                region: HOLD,
                index: Some(7)
            }]
        );
        // Still inside; further moves must not restart the dwell.
        step(
            &mut tracker,
            &mut timers,
            &config,
            &geometry,
            inside,
            config.long_hold_ms + 100,
        );
        assert!(timers.is_empty());
        assert!(fire(&mut tracker, &mut timers, &config, 100_000).is_empty());
    }

    #[test]
    fn repeat_region_rearms_spaced_by_duration() {
        let (mut tracker, mut timers, config, geometry) = fixture();
        let mut repeating = RegionTracker::new();
        repeating.add_long_hold(HOLD, true);
        drop(tracker);

        let inside = Point::new(50.0, 50.0);
        let mut events = Vec::new();
        repeating.update(inside, 0, 1, None, &config, &mut timers, &geometry, &mut events);

        let mut fired = 0;
        let mut now = 0;
        for _ in 0..3 {
            now += config.long_hold_ms;
            for (id, msg) in timers.fire_due(now) {
                if let TimerMsg::LongHoldDwell { element, generation } = msg {
                    let mut out = Vec::new();
                    repeating.on_long_hold_fired(
                        element, id, now, generation, None, &config, &mut timers, &mut out,
                    );
                    fired += out.len();
                }
            }
        }
        assert_eq!(fired, 3);
        // Another window is already armed.
        assert_eq!(timers.next_deadline(), Some(now + config.long_hold_ms));
    }

    #[test]
    fn armed_region_leaves_on_bounds_exit() {
        let (mut tracker, mut timers, config, geometry) = fixture();
        let in_a = Point::new(250.0, 50.0);
        step(&mut tracker, &mut timers, &config, &geometry, in_a, 0);
        let events = fire(&mut tracker, &mut timers, &config, config.hold_and_release_ms);
        assert_eq!(
            events,
            vec![GestureEvent::Hold {
                region: HAR_A,
                index: Some(7)
            }]
        );
        assert_eq!(tracker.armed(), Some((HAR_A, Some(7))));

        let events = step(
            &mut tracker,
            &mut timers,
            &config,
            &geometry,
            Point::new(350.0, 50.0),
            200,
        );
        assert_eq!(
            events,
            vec![GestureEvent::Leave {
                region: HAR_A,
                index: Some(7)
            }]
        );
        assert_eq!(tracker.armed(), None);
    }

    #[test]
    fn arming_second_region_replaces_first() {
        let (mut tracker, mut timers, config, geometry) = fixture();
        step(
            &mut tracker,
            &mut timers,
            &config,
            &geometry,
            Point::new(250.0, 50.0),
            0,
        );
        fire(&mut tracker, &mut timers, &config, config.hold_and_release_ms);
        assert_eq!(tracker.armed(), Some((HAR_A, Some(7))));

        // Move to B: leaving A emits Leave, then B arms after its dwell.
        let now = 100;
        let events = step(
            &mut tracker,
            &mut timers,
            &config,
            &geometry,
            Point::new(450.0, 50.0),
            now,
        );
        assert_eq!(
            events,
            vec![GestureEvent::Leave {
                region: HAR_A,
                index: Some(7)
            }]
        );
        let events = fire(
            &mut tracker,
            &mut timers,
            &config,
            now + config.hold_and_release_ms,
        );
        assert_eq!(
            events,
            vec![GestureEvent::Hold {
                region: HAR_B,
                index: Some(7)
            }]
        );
        assert_eq!(tracker.armed(), Some((HAR_B, Some(7))));
    }

    #[test]
    fn overlapping_region_arming_replaces_without_leave() {
        // Two hold-and-release regions sharing ground: a point inside both
        // arms each in turn, and the second arm displaces the first
        // silently. Leave is reserved for an actual bounds exit.
        let geometry = Bounds(vec![
            (HAR_A, Rect::new(200.0, 0.0, 300.0, 100.0)),
            (HAR_B, Rect::new(250.0, 0.0, 350.0, 100.0)),
        ]);
        let mut tracker = RegionTracker::new();
        tracker.add_hold_and_release(HAR_A);
        tracker.add_hold_and_release(HAR_B);
        let mut timers = TimerService::new();
        let config = PeekConfig::default();

        let both = Point::new(275.0, 50.0);
        let events = step(&mut tracker, &mut timers, &config, &geometry, both, 0);
        assert!(events.is_empty());
        assert_eq!(timers.len(), 2);

        let events = fire(&mut tracker, &mut timers, &config, config.hold_and_release_ms);
        assert_eq!(
            events,
            vec![
                GestureEvent::Hold {
                    region: HAR_A,
                    index: Some(7)
                },
                GestureEvent::Hold {
                    region: HAR_B,
                    index: Some(7)
                },
            ]
        );
        // B displaced A as the current region; no Leave was emitted.
        assert_eq!(tracker.armed(), Some((HAR_B, Some(7))));

        // Stepping out of A's bounds while still inside B stays silent
        // too: A is no longer current.
        let events = step(
            &mut tracker,
            &mut timers,
            &config,
            &geometry,
            Point::new(320.0, 50.0),
            100,
        );
        assert!(events.is_empty());
        assert_eq!(tracker.armed(), Some((HAR_B, Some(7))));
    }

    #[test]
    fn reset_clears_handles_and_armed_region() {
        let (mut tracker, mut timers, config, geometry) = fixture();
        step(
            &mut tracker,
            &mut timers,
            &config,
            &geometry,
            Point::new(250.0, 50.0),
            0,
        );
        fire(&mut tracker, &mut timers, &config, config.hold_and_release_ms);
        tracker.reset(&mut timers);
        assert_eq!(tracker.armed(), None);
        assert!(timers.is_empty());
    }

    #[test]
    fn stale_timer_id_is_discarded() {
        let (mut tracker, mut timers, config, geometry) = fixture();
        step(
            &mut tracker,
            &mut timers,
            &config,
            &geometry,
            Point::new(50.0, 50.0),
            0,
        );
        // Fabricate a fire with a handle that is not the region's live one.
        let bogus = timers.schedule(u64::MAX, TimerMsg::LongPress { generation: 1 });
        let mut events = Vec::new();
        tracker.on_long_hold_fired(
            HOLD,
            bogus,
            0,
            1,
            None,
            &config,
            &mut timers,
            &mut events,
        );
        assert!(events.is_empty());
    }
}
