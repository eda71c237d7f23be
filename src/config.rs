//! System configuration parameters
//!
//! All tunable parameters for the hutch door controller.
//! Values can be overridden via NVS (non-volatile storage).

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Actuator ---
    /// Time for a full limit-to-limit traverse (seconds)
    pub travel_duration_secs: u16,

    // --- Button ---
    /// Minimum gap between accepted button presses (milliseconds)
    pub button_debounce_ms: u32,

    // --- Schedule ---
    /// How often the wall clock is compared against the schedule (milliseconds)
    pub schedule_check_interval_ms: u32,
    /// Local time offset from UTC (minutes)
    pub utc_offset_minutes: i16,

    // --- Timing ---
    /// Main loop poll interval (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Status report interval (seconds)
    pub status_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            travel_duration_secs: 15,

            button_debounce_ms: 1000,

            schedule_check_interval_ms: 60_000, // once per minute
            utc_offset_minutes: -240,           // US Eastern (daylight)

            control_loop_interval_ms: 20,
            status_interval_secs: 60,
        }
    }
}
