//! GPIO pin assignments for the hutch door controller board.
//!
//! `main` checks the GPIO peripherals it takes against these numbers at
//! boot and refuses to start on a mismatch.

use crate::app::ports::LineId;

// ---------------------------------------------------------------------------
// Actuator relays (two SPDT relays reversing actuator polarity)
// ---------------------------------------------------------------------------

/// Digital output: energises the "extend" relay (door opens).
pub const OPEN_RELAY_GPIO: LineId = 4;
/// Digital output: energises the "retract" relay (door closes).
pub const CLOSE_RELAY_GPIO: LineId = 5;

// ---------------------------------------------------------------------------
// User button (active-high with internal pull-down)
// ---------------------------------------------------------------------------

/// Momentary push-button for manual open/close.
pub const BUTTON_GPIO: LineId = 6;
