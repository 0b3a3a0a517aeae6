// Copyright 2026 the Peekpop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Release-velocity estimation for hosts without native fling recognition.
//!
//! A small ring buffer of timed 1D samples. On release, the slope of a
//! least-squares line through the recent window gives the velocity in
//! pixels per second. Samples older than [`HORIZON_MS`] are ignored, and a
//! gap longer than [`ASSUME_STOPPED_MS`] between consecutive samples ends
//! the window early — a finger that paused has no fling momentum, however
//! fast it moved before the pause.
//!
//! A host-supplied release velocity always takes precedence over this
//! estimate; see
//! [`PeekPop::on_pointer_up`](crate::recognizer::PeekPop::on_pointer_up).

/// Ring buffer capacity.
const HISTORY_SIZE: usize = 20;

/// Only samples within this window of the newest one contribute.
pub const HORIZON_MS: u64 = 100;

/// A gap this long between samples means the pointer stopped.
pub const ASSUME_STOPPED_MS: u64 = 40;

#[derive(Copy, Clone, Debug, Default)]
struct Sample {
    time_ms: u64,
    position: f64,
}

/// 1D velocity estimator over a sliding sample window.
#[derive(Clone, Debug)]
pub struct VelocityEstimator {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl VelocityEstimator {
    /// Create an empty estimator.
    pub const fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    /// Record a position sample at `time_ms`.
    pub fn push(&mut self, time_ms: u64, position: f64) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, position });
    }

    /// Forget all samples.
    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }

    /// Estimated velocity in units per second.
    ///
    /// Returns 0.0 with fewer than two usable samples.
    pub fn velocity(&self) -> f64 {
        let mut times = [0.0; HISTORY_SIZE];
        let mut positions = [0.0; HISTORY_SIZE];
        let mut count = 0;

        let Some(newest) = self.samples[self.index] else {
            return 0.0;
        };

        let mut cursor = self.index;
        let mut previous = newest;
        while let Some(sample) = self.samples[cursor] {
            let age = newest.time_ms.saturating_sub(sample.time_ms);
            let gap = previous.time_ms.saturating_sub(sample.time_ms);
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }

            // Negative age keeps times ordered oldest → newest around t = 0.
            times[count] = -(age as f64);
            positions[count] = sample.position;
            count += 1;
            if count == HISTORY_SIZE {
                break;
            }

            previous = sample;
            cursor = if cursor == 0 { HISTORY_SIZE - 1 } else { cursor - 1 };
        }

        if count < 2 {
            return 0.0;
        }

        slope(&times[..count], &positions[..count]) * 1000.0
    }
}

impl Default for VelocityEstimator {
    fn default() -> Self {
        Self::new()
    }
}

/// Least-squares slope of `positions` over `times` (units per ms).
fn slope(times: &[f64], positions: &[f64]) -> f64 {
    let n = times.len() as f64;
    let mean_t = times.iter().sum::<f64>() / n;
    let mean_p = positions.iter().sum::<f64>() / n;

    let mut num = 0.0;
    let mut den = 0.0;
    for (&t, &p) in times.iter().zip(positions) {
        num += (t - mean_t) * (p - mean_p);
        den += (t - mean_t) * (t - mean_t);
    }
    if den == 0.0 { 0.0 } else { num / den }
}
