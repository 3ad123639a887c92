//! Text Rendering
//!
//! Draws the slot ring and dashboard as plain text.

use std::fmt::Write;

use parking_ring::highlight::{PulseFrame, RESTING_WIDTH};
use parking_ring::view::{slot_labels, Marker, SlotLabel};
use parking_ring::{Dashboard, QueueSnapshot, SlotRecord};

/// Renders one line per slot followed by the dashboard.
pub fn render_lot(
    snapshot: &QueueSnapshot<'_, SlotRecord>,
    highlight: Option<(usize, PulseFrame)>,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "   {:<5} {:<14} {:<9} ", "Slot", "Car", "Entered");
    for (i, label) in slot_labels(snapshot).iter().enumerate() {
        let frame = highlight.filter(|(slot, _)| *slot == i).map(|(_, f)| f);
        let _ = writeln!(out, "{}", render_slot(label, frame));
    }
    let _ = write!(out, "{}", Dashboard::from_snapshot(snapshot));

    out
}

/// Renders a single slot line.
///
/// Outline width shows as the bracket style: `[ ]` at rest, `[[ ]]` when
/// a pulse is on its wide beat, `{ }` once it has settled.
pub fn render_slot(label: &SlotLabel, frame: Option<PulseFrame>) -> String {
    let car = if label.is_free() { "·" } else { label.car.as_str() };

    let (open, close) = match frame {
        None => (" [", "] "),
        Some(f) if f.finished => (" {", "} "),
        Some(f) if f.width > RESTING_WIDTH => ("[[", "]]"),
        Some(_) => (" [", "] "),
    };

    let mut line = format!(
        "{}{:<5}{} {:<14} {:<9}",
        open, label.index, close, car, label.entered
    );
    if let Some(tag) = marker_tag(label.marker) {
        line.push_str(tag);
    }
    line.trim_end().to_string()
}

fn marker_tag(marker: Marker) -> Option<&'static str> {
    match marker {
        Marker::None => None,
        Marker::Front => Some(" <- front"),
        Marker::Rear => Some(" <- rear"),
        Marker::FrontAndRear => Some(" <- front/rear"),
    }
}
