// Copyright 2026 the Peekpop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted peek-and-pop session driven from a fixed input trace.
//!
//! This example shows the full host loop without any real UI:
//! - `ElementBounds` backed by a `HashMap` of screen rects,
//! - a `Presenter` that prints what a real host would animate,
//! - the poll pattern: run `on_timers` whenever `next_deadline` comes due.
//!
//! Run:
//! - `cargo run -p peekpop_demos --example peek_session`

use std::collections::HashMap;

use kurbo::{Point, Rect};
use peekpop_gesture::{
    ElementBounds, FlingDirection, GestureEvent, Orientation, PeekPop, Presenter,
};

const OVERLAY: u32 = 0;
const TRIGGER: u32 = 1;
const ARCHIVE_REGION: u32 = 2;

/// Screen-space layout for a 1080x1920 portrait screen.
struct Layout(HashMap<u32, Rect>);

impl ElementBounds<u32> for Layout {
    fn bounds_of(&self, element: &u32) -> Rect {
        self.0.get(element).copied().unwrap_or(Rect::ZERO)
    }
}

/// Prints every presentation hook a real host would animate.
struct PrintPresenter;

impl Presenter<u32> for PrintPresenter {
    fn show_overlay(&mut self, duration_ms: u64) {
        println!("  [present] fade the overlay in over {duration_ms}ms");
    }

    fn cancel_trigger_press(&mut self, element: &u32) {
        println!("  [present] clear pressed visuals on element {element}");
    }

    fn set_overlay_position(&mut self, axis: Orientation, position: f64) {
        println!("  [present] overlay {axis:?} position -> {position:.1}");
    }

    fn set_hint_progress(&mut self, progress: f64) {
        println!("  [present] fling hint opacity -> {progress:.2}");
    }

    fn animate_pop(&mut self, duration_ms: u64) {
        println!("  [present] pop the overlay away over {duration_ms}ms");
    }

    fn animate_expand(&mut self, duration_ms: u64) {
        println!("  [present] expand before the fling over {duration_ms}ms");
    }

    fn animate_fling_exit(&mut self, direction: FlingDirection, translation: f64, d: u64) {
        println!("  [present] fling {direction:?} by {translation:.0}px over {d}ms");
    }

    fn reset_overlay(&mut self) {
        println!("  [present] restore hidden overlay visuals");
    }
}

fn report(events: &[GestureEvent<u32>]) {
    for event in events {
        println!("  [event] {event:?}");
    }
}

fn main() {
    let layout = Layout(HashMap::from([
        (OVERLAY, Rect::new(290.0, 400.0, 790.0, 1400.0)),
        (TRIGGER, Rect::new(0.0, 1700.0, 1080.0, 1800.0)),
        (ARCHIVE_REGION, Rect::new(320.0, 500.0, 760.0, 700.0)),
    ]));
    let mut presenter = PrintPresenter;

    let mut peek = PeekPop::builder()
        .overlay(OVERLAY)
        .trigger(TRIGGER, Some(3))
        .hold_and_release_region(ARCHIVE_REGION)
        .build()
        .expect("an overlay element is configured");

    // A scripted trace: press the trigger, hold through the long-press
    // threshold, dwell on the archive region, then fling the overlay up.
    println!("press row 3 at t=0");
    assert!(peek.on_pointer_down(TRIGGER, Point::new(540.0, 1750.0), 0));

    let deadline = peek.next_deadline().expect("long-press timer pending");
    println!("long-press deadline reached at t={deadline}");
    report(&peek.on_timers(deadline, &layout, &mut presenter));

    println!("finger settles on the archive region");
    report(&peek.on_pointer_move(Point::new(540.0, 600.0), deadline + 30, &layout, &mut presenter));
    let deadline = peek.next_deadline().expect("dwell timer pending");
    report(&peek.on_timers(deadline, &layout, &mut presenter));

    println!("fast upward swipe");
    let mut t = deadline;
    for y in [560.0, 520.0, 480.0, 440.0] {
        t += 10;
        report(&peek.on_pointer_move(Point::new(540.0, y), t, &layout, &mut presenter));
    }

    println!("release");
    report(&peek.on_pointer_up(None, &mut presenter));

    println!("host's exit animation finishes");
    peek.on_dismiss_complete(&mut presenter);
    println!("back to idle: {:?}", peek.phase());
}
