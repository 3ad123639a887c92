//! # Queue Snapshots
//!
//! Read-only views of the ring for whoever draws it.

use serde::Serialize;

/// One absolute slot as seen by a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SlotView<'a, T> {
    index: usize,
    occupied: bool,
    record: Option<&'a T>,
}

impl<'a, T> SlotView<'a, T> {
    pub(crate) fn new(index: usize, record: Option<&'a T>) -> Self {
        Self {
            index,
            occupied: record.is_some(),
            record,
        }
    }

    /// Absolute slot index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether a record sits in this slot.
    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// The record in this slot, if any.
    pub fn record(&self) -> Option<&'a T> {
        self.record
    }
}

/// The whole ring at one moment: every slot plus head/tail markers.
///
/// ## Plain English
///
/// A photograph of the parking lot from above. Borrowing it does not
/// move any cars; take a new one after every change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueueSnapshot<'a, T> {
    capacity: usize,
    front: Option<usize>,
    rear: Option<usize>,
    slots: Vec<SlotView<'a, T>>,
}

impl<'a, T> QueueSnapshot<'a, T> {
    pub(crate) fn new(
        capacity: usize,
        front: Option<usize>,
        rear: Option<usize>,
        slots: Vec<SlotView<'a, T>>,
    ) -> Self {
        Self {
            capacity,
            front,
            rear,
            slots,
        }
    }

    /// Number of slots in the ring.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Absolute index of the oldest record, `None` when empty.
    pub fn front(&self) -> Option<usize> {
        self.front
    }

    /// Absolute index of the newest record, `None` when empty.
    pub fn rear(&self) -> Option<usize> {
        self.rear
    }

    /// Every absolute slot, index 0 first.
    pub fn slots(&self) -> &[SlotView<'a, T>] {
        &self.slots
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_occupied()).count()
    }
}
