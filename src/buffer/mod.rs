//! # Slot Ring Module
//!
//! This module provides the circular queue that models the parking slots.
//!
//! ## Plain English Explanation
//!
//! Imagine a round car park with a fixed number of numbered bays:
//! 1. A new car takes the next free bay after the last car that parked
//! 2. The car that has been there longest is the first one out
//! 3. If a car in the middle leaves, everybody behind it is re-parked
//!    from bay 0 so there are no holes
//! 4. The car park can be rebuilt bigger or smaller without changing who
//!    arrived first
//!
//! The ring never knows how it is drawn. Renderers ask for a
//! [`QueueSnapshot`] and draw from that.

mod ring_queue;
mod snapshot;

pub use ring_queue::{RingQueue, MIN_CAPACITY};
pub use snapshot::{QueueSnapshot, SlotView};
