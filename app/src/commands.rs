//! Front-End Commands
//!
//! Each command the prompt understands, and what it does to the lot.
//! Every function returns a [`CommandOutcome`] so the caller only has to
//! print a message and decide whether to redraw.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use chrono::Local;
use serde::Serialize;

use parking_ring::{
    ConfigError, Dashboard, LotError, LotStats, QueueSnapshot, SlotRecord, MAX_CAPACITY,
};

use crate::render;
use crate::state::AppState;

/// Result of running one command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    pub success: bool,
    pub message: String,
    /// The lot changed and should be drawn again
    #[serde(skip)]
    pub redraw: bool,
}

impl CommandOutcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            redraw: false,
        }
    }

    fn changed(message: impl Into<String>) -> Self {
        Self {
            redraw: true,
            ..Self::ok(message)
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            redraw: false,
        }
    }
}

// ============================================
// COMMAND PARSING
// ============================================

/// A parsed prompt line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Park(String),
    Exit,
    Search(String),
    Remove(String),
    Resize(usize),
    Clear,
    Status,
    Show,
    Slot(usize),
    Json,
    Help,
    Quit,
}

/// Why a prompt line could not be understood
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let number = |what: &str| {
            rest.parse::<usize>()
                .map_err(|_| ParseError(format!("{} needs a whole number, got '{}'", what, rest)))
        };

        match word.to_ascii_lowercase().as_str() {
            "park" | "enqueue" => Ok(Self::Park(rest.to_string())),
            "exit" | "dequeue" => Ok(Self::Exit),
            "search" | "find" => Ok(Self::Search(rest.to_string())),
            "remove" => Ok(Self::Remove(rest.to_string())),
            "resize" => number("resize").map(Self::Resize),
            "clear" => Ok(Self::Clear),
            "status" => Ok(Self::Status),
            "show" => Ok(Self::Show),
            "slot" => number("slot").map(Self::Slot),
            "json" => Ok(Self::Json),
            "help" | "?" => Ok(Self::Help),
            "quit" | "q" => Ok(Self::Quit),
            other => Err(ParseError(format!(
                "Unknown command '{}'. Type 'help' for a list.",
                other
            ))),
        }
    }
}

pub const HELP: &str = "\
Commands:
  park <id>      Park a car at the rear
  exit           Let the front car out
  search <id>    Find a car and highlight its slot
  remove <id>    Remove a car from anywhere in the lot
  resize <n>     Rebuild the lot with n slots (4 to 10000)
  clear          Remove every car
  status         Show occupancy and counters
  show           Draw the lot
  slot <i>       Show details for slot i
  json           Export the lot as JSON
  quit           Leave";

// ============================================
// COMMAND EXECUTION
// ============================================

/// Runs any command except `Quit`.
///
/// `Clear` runs unconfirmed here; prompts that need a yes/no should call
/// [`clear_all`] themselves.
pub fn execute(state: &AppState, command: &Command) -> CommandOutcome {
    match command {
        Command::Park(key) => park_car(state, key),
        Command::Exit => exit_car(state),
        Command::Search(key) => search_car(state, key),
        Command::Remove(key) => remove_car(state, key),
        Command::Resize(capacity) => resize(state, *capacity),
        Command::Clear => clear_all(state, true),
        Command::Status => status(state),
        Command::Show => CommandOutcome::ok(show(state)),
        Command::Slot(slot) => slot_details(state, *slot),
        Command::Json => export_json(state),
        Command::Help => CommandOutcome::ok(HELP),
        Command::Quit => CommandOutcome::ok("Bye."),
    }
}

/// Parks a car at the rear
pub fn park_car(state: &AppState, key: &str) -> CommandOutcome {
    if key.trim().is_empty() {
        return blank_key();
    }

    let result = state.lot.lock().park(key);
    match result {
        Ok(slot) => {
            state.clear_highlight();
            CommandOutcome::changed(format!("Car {} parked in slot #{}.", key.trim(), slot))
        }
        Err(e) if e.is_full() => {
            CommandOutcome::failed("Parking is full. Consider resizing.")
        }
        Err(e) => CommandOutcome::failed(e.to_string()),
    }
}

/// Lets the front car out
pub fn exit_car(state: &AppState) -> CommandOutcome {
    let result = state.lot.lock().exit();
    match result {
        Ok(receipt) => {
            state.clear_highlight();
            CommandOutcome::changed(receipt.message())
        }
        Err(e) if e.is_empty() => CommandOutcome::failed("Parking is empty."),
        Err(e) => CommandOutcome::failed(e.to_string()),
    }
}

/// Finds a car and starts highlighting its slot
pub fn search_car(state: &AppState, key: &str) -> CommandOutcome {
    if key.trim().is_empty() {
        return blank_key();
    }

    let found = {
        let lot = state.lot.lock();
        if lot.queue().is_empty() {
            return CommandOutcome::failed("Parking empty.");
        }
        lot.search(key)
            .map(|slot| (slot, lot.slot_details(slot, Local::now())))
    };

    match found {
        Some((slot, details)) => {
            state.highlight(slot);
            CommandOutcome::changed(details.to_string())
        }
        None => CommandOutcome::failed(format!("Car {} not found.", key.trim())),
    }
}

/// Removes a car by ID from anywhere in the lot
pub fn remove_car(state: &AppState, key: &str) -> CommandOutcome {
    if key.trim().is_empty() {
        return blank_key();
    }

    let result = {
        let mut lot = state.lot.lock();
        if lot.queue().is_empty() {
            return CommandOutcome::failed("Parking empty.");
        }
        lot.remove_by_key(key)
    };

    match result {
        Ok(record) => {
            state.clear_highlight();
            CommandOutcome::changed(format!("Car {} removed from parking.", record.key()))
        }
        Err(LotError::NotFound(k)) => CommandOutcome::failed(format!("Car {} not found.", k)),
        Err(e) => CommandOutcome::failed(format!("Could not remove car: {}", e)),
    }
}

/// Rebuilds the lot at a new size
pub fn resize(state: &AppState, capacity: usize) -> CommandOutcome {
    let (result, actual) = {
        let mut lot = state.lot.lock();
        let result = lot.resize(capacity);
        (result, lot.queue().capacity())
    };

    let dropped = match result {
        Ok(dropped) => dropped,
        Err(LotError::Config(ConfigError::CapacityTooLarge(n))) => {
            return CommandOutcome::failed(format!(
                "Capacity {} is too large (maximum {}).",
                n, MAX_CAPACITY
            ));
        }
        Err(e) => return CommandOutcome::failed(format!("Could not resize: {}", e)),
    };
    state.clear_highlight();

    let mut message = format!("Capacity set to {}.", actual);
    if dropped > 0 {
        message.push_str(&format!(" {} car(s) did not fit and were dropped.", dropped));
    }
    CommandOutcome::changed(message)
}

fn blank_key() -> CommandOutcome {
    CommandOutcome::failed("Car ID must not be blank.")
}

/// Removes every car if `confirmed`
pub fn clear_all(state: &AppState, confirmed: bool) -> CommandOutcome {
    if !confirmed {
        return CommandOutcome::ok("Clear cancelled.");
    }

    state.lot.lock().clear();
    state.clear_highlight();
    CommandOutcome::changed("All parked cars cleared.")
}

/// Dashboard plus counters
pub fn status(state: &AppState) -> CommandOutcome {
    let lot = state.lot.lock();
    let stats = lot.stats();
    CommandOutcome::ok(format!(
        "{}\nParked: {}  Exited: {}  Removed: {}  Turned away: {}",
        lot.dashboard(),
        stats.cars_parked,
        stats.cars_exited,
        stats.cars_removed,
        stats.rejected_parks
    ))
}

/// Draws the lot as it looks right now
pub fn show(state: &AppState) -> String {
    let highlight = state.highlight_frame(Instant::now());
    let lot = state.lot.lock();
    render::render_lot(&lot.snapshot(), highlight)
}

/// Details for one absolute slot; also highlights it
pub fn slot_details(state: &AppState, slot: usize) -> CommandOutcome {
    let details = {
        let lot = state.lot.lock();
        if slot >= lot.queue().capacity() {
            return CommandOutcome::failed(format!(
                "No slot #{} (capacity {}).",
                slot,
                lot.queue().capacity()
            ));
        }
        lot.slot_details(slot, Local::now())
    };

    state.highlight(slot);
    CommandOutcome::changed(details.to_string())
}

#[derive(Serialize)]
struct LotExport<'a> {
    dashboard: Dashboard,
    stats: LotStats,
    snapshot: QueueSnapshot<'a, SlotRecord>,
}

/// The whole lot as pretty JSON
pub fn export_json(state: &AppState) -> CommandOutcome {
    let lot = state.lot.lock();
    let export = LotExport {
        dashboard: lot.dashboard(),
        stats: lot.stats(),
        snapshot: lot.snapshot(),
    };

    match serde_json::to_string_pretty(&export) {
        Ok(json) => CommandOutcome::ok(json),
        Err(e) => CommandOutcome::failed(format!("Export failed: {}", e)),
    }
}

// ============================================
// TESTS
// ============================================
