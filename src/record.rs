//! # Slot Records
//!
//! One parked car: its ID and the moment it entered.

use chrono::{DateTime, Duration, Local};
use serde::Serialize;

// ============================================
// KEYED ITEMS
// ============================================

/// Anything the ring can look up by an exact string key.
pub trait Keyed {
    /// Returns the lookup key.
    fn key(&self) -> &str;
}

impl Keyed for String {
    fn key(&self) -> &str {
        self
    }
}

// ============================================
// SLOT RECORD
// ============================================

/// A single occupied slot in the ring.
///
/// ## Plain English
///
/// This is the ticket you get at the barrier: it says which car you are
/// and when you drove in. Once printed, nothing on it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SlotRecord {
    /// Caller-supplied car identifier (e.g. a plate number)
    key: String,

    /// When the car entered the lot
    entered_at: DateTime<Local>,
}

impl SlotRecord {
    /// Creates a new record stamped with the current local time.
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_timestamp(key, Local::now())
    }

    /// Creates a record with a specific entry time.
    pub fn with_timestamp(key: impl Into<String>, entered_at: DateTime<Local>) -> Self {
        Self {
            key: key.into(),
            entered_at,
        }
    }

    /// Returns the car identifier.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns when the car entered.
    pub fn entered_at(&self) -> DateTime<Local> {
        self.entered_at
    }

    /// Returns how long the car has been parked as of `now`.
    ///
    /// Never negative, even if the clock stepped backwards.
    pub fn parked_for(&self, now: DateTime<Local>) -> Duration {
        (now - self.entered_at).max(Duration::zero())
    }
}

impl Keyed for SlotRecord {
    fn key(&self) -> &str {
        &self.key
    }
}

// ============================================
// TESTS
// ============================================
