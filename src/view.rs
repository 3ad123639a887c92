//! # View Model
//!
//! Display-ready data built from a [`QueueSnapshot`].
//!
//! ## Plain English
//!
//! The ring only knows "slot 3 holds car KA01 since 09:12:44". A front end
//! wants "#3 · KA01 · 09:12:44, outlined blue because it's the front".
//! This module does that translation once so every front end shows the
//! same words.

use std::fmt;

use chrono::{DateTime, Duration, Local};
use serde::Serialize;

use crate::buffer::QueueSnapshot;
use crate::record::SlotRecord;

/// Time-of-day format shown inside a slot.
pub const SLOT_TIME_FORMAT: &str = "%H:%M:%S";

/// Full timestamp format used in slot details.
pub const DETAIL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================
// DASHBOARD
// ============================================

/// Occupancy summary shown under the ring.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub occupancy: usize,
    pub capacity: usize,
    pub front: Option<usize>,
    pub rear: Option<usize>,
    pub free_slots: usize,
}

impl Dashboard {
    /// Summarises a snapshot.
    pub fn from_snapshot<T>(snapshot: &QueueSnapshot<'_, T>) -> Self {
        let occupancy = snapshot.occupied();
        Self {
            occupancy,
            capacity: snapshot.capacity(),
            front: snapshot.front(),
            rear: snapshot.rear(),
            free_slots: snapshot.capacity() - occupancy,
        }
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Occupancy: {} / {} | Front: {}  Rear: {} | Free Slots: {}",
            self.occupancy,
            self.capacity,
            pointer(self.front),
            pointer(self.rear),
            self.free_slots
        )
    }
}

fn pointer(idx: Option<usize>) -> String {
    idx.map_or_else(|| "-".to_string(), |i| i.to_string())
}

// ============================================
// SLOT LABELS
// ============================================

/// Which end of the queue a slot is, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    None,
    Front,
    Rear,
    /// A single parked car is both ends at once
    FrontAndRear,
}

impl Marker {
    fn for_slot(index: usize, front: Option<usize>, rear: Option<usize>) -> Self {
        match (front == Some(index), rear == Some(index)) {
            (true, true) => Self::FrontAndRear,
            (true, false) => Self::Front,
            (false, true) => Self::Rear,
            (false, false) => Self::None,
        }
    }
}

/// Text for one slot of the ring.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SlotLabel {
    /// `#3`
    pub index: String,
    /// Car ID, empty if the slot is free
    pub car: String,
    /// Entry time of day, empty if the slot is free
    pub entered: String,
    pub marker: Marker,
}

impl SlotLabel {
    pub fn is_free(&self) -> bool {
        self.car.is_empty()
    }
}

/// Builds one label per absolute slot.
pub fn slot_labels(snapshot: &QueueSnapshot<'_, SlotRecord>) -> Vec<SlotLabel> {
    snapshot
        .slots()
        .iter()
        .map(|slot| {
            let (car, entered) = match slot.record() {
                Some(record) => (
                    record.key().to_string(),
                    record.entered_at().format(SLOT_TIME_FORMAT).to_string(),
                ),
                None => (String::new(), String::new()),
            };

            SlotLabel {
                index: format!("#{}", slot.index()),
                car,
                entered,
                marker: Marker::for_slot(slot.index(), snapshot.front(), snapshot.rear()),
            }
        })
        .collect()
}

// ============================================
// SLOT DETAILS
// ============================================

/// The detail line shown when a slot is clicked or found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SlotDetails {
    Empty {
        slot: usize,
    },
    Occupied {
        slot: usize,
        car: String,
        entered: String,
        seconds: i64,
    },
}

impl SlotDetails {
    /// Describes `record` (or its absence) at absolute slot `slot`.
    pub fn describe(slot: usize, record: Option<&SlotRecord>, now: DateTime<Local>) -> Self {
        match record {
            None => Self::Empty { slot },
            Some(record) => Self::Occupied {
                slot,
                car: record.key().to_string(),
                entered: record.entered_at().format(DETAIL_TIME_FORMAT).to_string(),
                seconds: record.parked_for(now).num_seconds(),
            },
        }
    }
}

impl fmt::Display for SlotDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { slot } => write!(f, "Slot #{}: empty.", slot),
            Self::Occupied {
                slot,
                car,
                entered,
                seconds,
            } => write!(
                f,
                "Slot #{}: Car {} | Entered: {} | Duration: {}s",
                slot, car, entered, seconds
            ),
        }
    }
}

// ============================================
// DURATIONS
// ============================================

/// Formats a parked duration as `Xm Ys`. Negative durations show as `0m 0s`.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    format!("{}m {}s", total / 60, total % 60)
}

/// Message shown when a car leaves.
pub fn exit_message(record: &SlotRecord, parked_for: Duration) -> String {
    format!(
        "Car {} has exited.\nDuration: {}",
        record.key(),
        format_duration(parked_for)
    )
}

// ============================================
// TESTS
// ============================================
