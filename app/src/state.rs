//! Application State Management
//!
//! Owns the lot and the front end's own render state (the active highlight).

use std::time::Instant;

use parking_lot::Mutex;

use parking_ring::highlight::PulseFrame;
use parking_ring::{Config, HighlightPulse, LotResult, ParkingLot, SharedLot};

/// Shared application state
pub struct AppState {
    /// The parking lot, locked per command
    pub lot: SharedLot,

    /// Slot currently blinking, if any
    highlight: Mutex<Option<HighlightPulse>>,
}

impl AppState {
    /// Creates a new application state
    pub fn new(config: Config) -> LotResult<Self> {
        let lot = ParkingLot::with_config(config)?;

        Ok(Self {
            lot: lot.into_shared(),
            highlight: Mutex::new(None),
        })
    }

    /// Whether `clear` should ask first
    pub fn confirm_clear(&self) -> bool {
        self.lot.lock().config().confirm_clear
    }

    /// Starts blinking `slot` using the configured pulse timing
    pub fn highlight(&self, slot: usize) -> HighlightPulse {
        let pulse = HighlightPulse::from_config(slot, self.lot.lock().config());
        *self.highlight.lock() = Some(pulse.clone());
        pulse
    }

    /// Drops the highlight (slot numbers may have moved)
    pub fn clear_highlight(&self) {
        *self.highlight.lock() = None;
    }

    /// The highlighted slot and how it should look at `now`
    pub fn highlight_frame(&self, now: Instant) -> Option<(usize, PulseFrame)> {
        self.highlight
            .lock()
            .as_ref()
            .map(|pulse| (pulse.slot(), pulse.poll(now)))
    }
}
