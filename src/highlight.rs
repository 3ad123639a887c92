//! # Highlight Pulse Module
//!
//! Blinks the outline of one slot after it is searched for or inspected.
//!
//! ## Plain English
//!
//! When you look a car up, its bay flashes a few times so your eye finds
//! it. The pulse never sleeps or spawns threads: the front end asks
//! "what should it look like right now?" on every redraw and gets an
//! outline width back.

use std::time::{Duration, Instant};

use crate::config::Config;

/// Outline width of a slot that is not pulsing.
pub const RESTING_WIDTH: u32 = 2;

/// Outline width once a pulse has finished.
pub const SETTLED_WIDTH: u32 = 3;

/// Extra width on the "bright" half of each blink.
const PULSE_BOOST: u32 = 3;

// ============================================
// PULSE FRAME
// ============================================

/// What a pulsing slot looks like at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PulseFrame {
    /// Step index, capped at the step count once finished
    pub step: u32,
    /// Outline width to draw
    pub width: u32,
    /// True once every step has played
    pub finished: bool,
}

// ============================================
// HIGHLIGHT PULSE
// ============================================

/// A timed blink on one absolute slot.
///
/// Step `k` lasts one interval and draws width `2 + (k % 2) * 3`.
/// After the last step the slot settles at width 3.
#[derive(Clone, Debug)]
pub struct HighlightPulse {
    slot: usize,
    steps: u32,
    interval: Duration,
    started: Instant,
}

impl HighlightPulse {
    /// Starts a pulse on `slot` at `started`.
    pub fn new(slot: usize, steps: u32, interval: Duration, started: Instant) -> Self {
        Self {
            slot,
            steps,
            interval,
            started,
        }
    }

    /// Starts a pulse now using the configured step count and interval.
    pub fn from_config(slot: usize, config: &Config) -> Self {
        Self::new(
            slot,
            config.pulse_steps,
            config.pulse_interval(),
            Instant::now(),
        )
    }

    /// The slot being highlighted.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Total time until the pulse settles.
    pub fn total_duration(&self) -> Duration {
        self.interval * self.steps
    }

    /// Computes the frame to draw at `now`.
    pub fn poll(&self, now: Instant) -> PulseFrame {
        let elapsed = now.saturating_duration_since(self.started);
        let step = if self.interval.is_zero() {
            self.steps
        } else {
            let raw = elapsed.as_nanos() / self.interval.as_nanos();
            u32::try_from(raw).unwrap_or(u32::MAX).min(self.steps)
        };

        if step >= self.steps {
            return PulseFrame {
                step: self.steps,
                width: SETTLED_WIDTH,
                finished: true,
            };
        }

        PulseFrame {
            step,
            width: RESTING_WIDTH + (step % 2) * PULSE_BOOST,
            finished: false,
        }
    }

    /// Returns true once the pulse has settled at `now`.
    pub fn is_finished(&self, now: Instant) -> bool {
        self.poll(now).finished
    }
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pulse() -> (HighlightPulse, Instant) {
        let start = Instant::now();
        (
            HighlightPulse::new(5, 6, Duration::from_millis(180), start),
            start,
        )
    }

    #[test]
    fn test_widths_alternate() {
        let (pulse, start) = pulse();

        let widths: Vec<u32> = (0..6)
            .map(|k| pulse.poll(start + Duration::from_millis(180 * k + 10)).width)
            .collect();

        assert_eq!(widths, vec![2, 5, 2, 5, 2, 5]);
        assert_eq!(pulse.slot(), 5);
    }

    #[test]
    fn test_settles_after_last_step() {
        let (pulse, start) = pulse();

        assert_eq!(pulse.total_duration(), Duration::from_millis(1080));
        assert!(!pulse.is_finished(start + Duration::from_millis(1079)));

        let frame = pulse.poll(start + Duration::from_millis(1080));
        assert!(frame.finished);
        assert_eq!(frame.width, SETTLED_WIDTH);
        assert_eq!(frame.step, 6);
    }

    #[test]
    fn test_poll_before_start() {
        let start = Instant::now() + Duration::from_secs(1);
        let pulse = HighlightPulse::new(0, 6, Duration::from_millis(180), start);

        let frame = pulse.poll(Instant::now());
        assert_eq!(frame.step, 0);
        assert_eq!(frame.width, RESTING_WIDTH);
    }

    #[test]
    fn test_from_config() {
        let config = Config::large();
        let pulse = HighlightPulse::from_config(3, &config);
        assert_eq!(pulse.total_duration(), Duration::from_millis(6 * 120));
    }
}
