//! # Parking Ring
//!
//! A car park modelled as a fixed-capacity circular queue. Cars park at the
//! tail, leave from the head, can be pulled out from the middle by ID, and
//! the whole lot can be rebuilt at a new size without losing arrival order.
//!
//! ## Architecture Overview
//!
//! The library is structured into independent modules:
//!
//! - `buffer`: The ring queue and its read-only snapshots
//! - `record`: One parked car (ID + entry time)
//! - `view`: Dashboard and slot text for front ends
//! - `highlight`: Timed blink for a found slot
//! - `config`: Application configuration
//! - `error`: Error types
//!
//! [`ParkingLot`] ties them together. Front ends hold a `ParkingLot` (or a
//! [`SharedLot`]), call its operations, and redraw from
//! [`ParkingLot::snapshot`] after every change.

// ============================================
// MODULE DECLARATIONS
// ============================================

pub mod buffer;
pub mod config;
pub mod error;
pub mod highlight;
pub mod record;
pub mod view;

// ============================================
// RE-EXPORTS
// ============================================

pub use buffer::{QueueSnapshot, RingQueue, SlotView, MIN_CAPACITY};
pub use config::{Config, ConfigError, MAX_CAPACITY};
pub use error::{LotError, LotResult, QueueError};
pub use highlight::HighlightPulse;
pub use record::{Keyed, SlotRecord};
pub use view::{Dashboard, SlotDetails};

// ============================================
// IMPORTS
// ============================================

use std::sync::Arc;

use chrono::{DateTime, Duration, Local};
use log::{debug, info, warn};
use parking_lot::Mutex;
use serde::Serialize;

// ============================================
// APPLICATION STATE
// ============================================

/// A lot handle that several owners can lock in turn.
pub type SharedLot = Arc<Mutex<ParkingLot>>;

/// The parking lot control layer.
///
/// ## Plain English
///
/// This is the attendant's booth. It checks the car ID isn't blank,
/// stamps the ticket, keeps count of who came and went, and writes it
/// all to the log. The ring underneath just stores tickets.
#[derive(Debug)]
pub struct ParkingLot {
    /// The slots themselves
    queue: RingQueue<SlotRecord>,

    /// Application configuration
    config: Config,

    /// Running counters
    stats: LotStats,
}

/// Runtime statistics for monitoring
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LotStats {
    /// Cars that got a slot
    pub cars_parked: u64,
    /// Cars that left through the front
    pub cars_exited: u64,
    /// Cars pulled out by ID
    pub cars_removed: u64,
    /// Cars turned away because the lot was full
    pub rejected_parks: u64,
    /// Cars lost when the lot was shrunk
    pub dropped_on_resize: u64,
}

/// What the attendant hands back when a car leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitReceipt {
    /// The departed car's ticket
    pub record: SlotRecord,
    /// Absolute slot it left from
    pub slot: usize,
    /// How long it stayed
    pub parked_for: Duration,
}

impl ExitReceipt {
    /// The user-facing exit message.
    pub fn message(&self) -> String {
        view::exit_message(&self.record, self.parked_for)
    }
}

impl ParkingLot {
    /// Creates a lot with default configuration.
    pub fn new() -> LotResult<Self> {
        Self::with_config(Config::default())
    }

    /// Creates a lot with custom configuration.
    ///
    /// Returns the first validation error, if any.
    pub fn with_config(config: Config) -> LotResult<Self> {
        if let Some(err) = config.validate().into_iter().next() {
            return Err(LotError::Config(err));
        }

        if config.initial_capacity < MIN_CAPACITY {
            warn!(
                "Requested capacity {} is below the minimum, using {}",
                config.initial_capacity, MIN_CAPACITY
            );
        }

        let lot = Self::build(config);
        info!("Parking lot opened with {} slots", lot.queue.capacity());
        Ok(lot)
    }

    fn build(config: Config) -> Self {
        Self {
            queue: RingQueue::new(config.initial_capacity),
            config,
            stats: LotStats::default(),
        }
    }

    /// Wraps the lot for shared, locked access.
    pub fn into_shared(self) -> SharedLot {
        Arc::new(Mutex::new(self))
    }

    /// Parks a car now. Returns the absolute slot it took.
    pub fn park(&mut self, key: &str) -> LotResult<usize> {
        self.park_at(key, Local::now())
    }

    /// Parks a car with a given entry time.
    ///
    /// Leading and trailing whitespace is stripped from the ID; an ID
    /// that is blank after that is refused before the ring is touched.
    pub fn park_at(&mut self, key: &str, entered_at: DateTime<Local>) -> LotResult<usize> {
        let key = key.trim();
        if key.is_empty() {
            return Err(LotError::BlankKey);
        }

        match self.queue.enqueue(SlotRecord::with_timestamp(key, entered_at)) {
            Ok(slot) => {
                self.stats.cars_parked += 1;
                debug!("Car {} parked in slot {}", key, slot);
                Ok(slot)
            }
            Err(err) => {
                self.stats.rejected_parks += 1;
                warn!(
                    "Parking full ({} slots), car {} turned away. Resize or remove a car.",
                    self.queue.capacity(),
                    key
                );
                Err(err.into())
            }
        }
    }

    /// Lets the front car out now.
    pub fn exit(&mut self) -> LotResult<ExitReceipt> {
        self.exit_at(Local::now())
    }

    /// Lets the front car out, measuring its stay up to `now`.
    pub fn exit_at(&mut self, now: DateTime<Local>) -> LotResult<ExitReceipt> {
        let Some(slot) = self.queue.front() else {
            warn!("Exit requested but the lot is empty");
            return Err(QueueError::<SlotRecord>::Empty.into());
        };

        let record = self.queue.dequeue()?;
        let parked_for = record.parked_for(now);
        self.stats.cars_exited += 1;
        debug!(
            "Car {} left slot {} after {}s",
            record.key(),
            slot,
            parked_for.num_seconds()
        );

        Ok(ExitReceipt {
            record,
            slot,
            parked_for,
        })
    }

    /// Absolute slot of the earliest-parked car with this ID.
    pub fn search(&self, key: &str) -> Option<usize> {
        self.queue.find_index_by_key(key.trim())
    }

    /// Pulls the earliest-parked car with this ID out of the lot.
    ///
    /// The remaining cars are re-laid from slot 0, so their slot numbers
    /// may change.
    pub fn remove_by_key(&mut self, key: &str) -> LotResult<SlotRecord> {
        let key = key.trim();
        let removed = self
            .queue
            .find_index_by_key(key)
            .and_then(|idx| self.queue.remove_at(idx));

        match removed {
            Some(record) => {
                self.stats.cars_removed += 1;
                info!("Car {} removed from the lot", key);
                Ok(record)
            }
            None => Err(LotError::NotFound(key.to_string())),
        }
    }

    /// Rebuilds the lot with a new number of slots, keeping arrival order.
    ///
    /// Returns how many of the newest cars did not fit. Capacities above
    /// [`MAX_CAPACITY`] are refused and the lot is left as it was.
    pub fn resize(&mut self, capacity: usize) -> LotResult<usize> {
        if capacity > MAX_CAPACITY {
            warn!("Refusing to resize to {} slots (maximum {})", capacity, MAX_CAPACITY);
            return Err(ConfigError::CapacityTooLarge(capacity).into());
        }

        let old = self.queue.capacity();
        let dropped = self.queue.resize_preserving_order(capacity);
        self.stats.dropped_on_resize += dropped as u64;

        info!("Resized lot from {} to {} slots", old, self.queue.capacity());
        if dropped > 0 {
            warn!("{} car(s) did not fit after resizing and were dropped", dropped);
        }
        Ok(dropped)
    }

    /// Removes every car, keeping the current number of slots.
    pub fn clear(&mut self) {
        let count = self.queue.len();
        self.queue.clear();
        info!("Cleared {} car(s) from the lot", count);
    }

    /// Read-only view of every slot.
    pub fn snapshot(&self) -> QueueSnapshot<'_, SlotRecord> {
        self.queue.snapshot()
    }

    /// Occupancy summary.
    pub fn dashboard(&self) -> Dashboard {
        Dashboard::from_snapshot(&self.snapshot())
    }

    /// Detail line for one absolute slot as of `now`.
    pub fn slot_details(&self, slot: usize, now: DateTime<Local>) -> SlotDetails {
        SlotDetails::describe(slot, self.queue.get(slot), now)
    }

    /// The underlying ring.
    pub fn queue(&self) -> &RingQueue<SlotRecord> {
        &self.queue
    }

    /// Returns a copy of the current statistics.
    pub fn stats(&self) -> LotStats {
        self.stats.clone()
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for ParkingLot {
    fn default() -> Self {
        Self::build(Config::default())
    }
}

// ============================================
// LOGGING
// ============================================

/// Initialize logging at info level unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

// ============================================
// TESTS
// ============================================
