//! # Error Types Module
//!
//! This module defines all the error types used throughout the parking lot.
//!
//! ## Plain English Explanation
//!
//! There are only two ways the ring itself can refuse a request:
//!
//! - "Overflow: every slot is taken"
//! - "Empty: there is no car to let out"
//!
//! Everything else (a blank car ID, a car that isn't here, a broken config
//! file) is a problem for the lot that wraps the ring, so it lives in
//! [`LotError`].

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::record::SlotRecord;

// ============================================
// QUEUE ERRORS
// ============================================

/// Errors raised by the ring queue itself.
///
/// Both are non-fatal: the queue is left exactly as it was.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError<T> {
    /// Every slot is occupied
    ///
    /// The item that could not be placed is handed back untouched.
    #[error("queue is full ({capacity} of {capacity} slots occupied)")]
    Overflow {
        /// Capacity at the time of the attempt
        capacity: usize,
        /// The item that was not enqueued
        rejected: T,
    },

    /// Nothing to dequeue
    #[error("queue is empty")]
    Empty,
}

impl<T> QueueError<T> {
    /// Returns the item that was refused, if this was an overflow.
    pub fn into_rejected(self) -> Option<T> {
        match self {
            Self::Overflow { rejected, .. } => Some(rejected),
            Self::Empty => None,
        }
    }

    /// Returns true for [`QueueError::Overflow`].
    pub fn is_overflow(&self) -> bool {
        matches!(self, Self::Overflow { .. })
    }
}

// ============================================
// MAIN APPLICATION ERROR
// ============================================

/// The main error type for the parking lot.
///
/// ## Plain English
///
/// This is the "parent" error that the control layer hands to whoever
/// is driving it (the terminal app, a test, another front end).
#[derive(Debug, Error)]
pub enum LotError {
    /// The ring refused the operation (full or empty)
    #[error(transparent)]
    Queue(#[from] QueueError<SlotRecord>),

    /// A car ID was empty or only whitespace
    #[error("car ID must not be blank")]
    BlankKey,

    /// No parked car has this ID
    #[error("car {0} not found")]
    NotFound(String),

    /// Configuration values are out of range
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Configuration file could not be parsed
    #[error("could not parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl LotError {
    /// Returns true if the lot was full.
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Queue(e) if e.is_overflow())
    }

    /// Returns true if the lot was empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Queue(QueueError::Empty))
    }
}

// ============================================
// RESULT TYPE ALIAS
// ============================================

/// A Result type that uses [`LotError`].
pub type LotResult<T> = Result<T, LotError>;

// ============================================
// TESTS
// ============================================
