//! Time-of-day door schedule.
//!
//! The door opens at one wall-clock minute and closes at another.  The
//! scheduler compares the wall clock against both slots once per check
//! interval and notifies a [`SchedulerDelegate`]; it knows nothing about
//! the actuator.
//!
//! ```text
//! ┌──────────────┐   every interval    ┌───────────┐   Open / Close   ┌──────────┐
//! │  Wall clock  │ ──────────────────▶ │ Scheduler │ ───────────────▶ │ Delegate │
//! │ (NTP synced) │   hour:minute       │           │                  │          │
//! └──────────────┘                     └───────────┘                  └──────────┘
//! ```

use core::fmt;
use core::str::FromStr;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::app::ports::{ScheduleFiredKind, SchedulerDelegate};
use crate::error::CommandError;

// ═══════════════════════════════════════════════════════════════
//  Time of day
// ═══════════════════════════════════════════════════════════════

/// Hour 24 is accepted so a slot can be parked on a time the clock never
/// shows.
pub const MAX_HOUR: u8 = 24;
pub const MAX_MINUTE: u8 = 59;

/// A wall-clock minute, `HH:MM`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self, CommandError> {
        if hour > MAX_HOUR {
            return Err(CommandError::HourOutOfRange(hour));
        }
        if minute > MAX_MINUTE {
            return Err(CommandError::MinuteOutOfRange(minute));
        }
        Ok(Self { hour, minute })
    }

    /// Parse exactly five characters: two digits, `:`, two digits.
    pub fn parse(s: &str) -> Result<Self, CommandError> {
        let &[h1, h0, b':', m1, m0] = s.as_bytes() else {
            return Err(CommandError::MalformedTime);
        };
        let hour = two_digits(h1, h0).ok_or(CommandError::MalformedTime)?;
        let minute = two_digits(m1, m0).ok_or(CommandError::MalformedTime)?;
        Self::new(hour, minute)
    }

    /// Render as `HH:MM` without allocating.
    pub fn to_hhmm(self) -> heapless::String<5> {
        let mut s = heapless::String::new();
        // Five bytes always fit.
        let _ = fmt::write(&mut s, format_args!("{self}"));
        s
    }
}

fn two_digits(tens: u8, ones: u8) -> Option<u8> {
    if tens.is_ascii_digit() && ones.is_ascii_digit() {
        Some((tens - b'0') * 10 + (ones - b'0'))
    } else {
        None
    }
}

impl FromStr for TimeOfDay {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

// ═══════════════════════════════════════════════════════════════
//  Schedule
// ═══════════════════════════════════════════════════════════════

/// Daily open and close times.  Both default to midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorSchedule {
    pub open_at: TimeOfDay,
    pub close_at: TimeOfDay,
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// Rate-limited schedule comparator.
pub struct Scheduler {
    interval_ms: u32,
    last_check_ms: Option<u64>,
    /// Minute of the last fire per slot, so a short check interval cannot
    /// fire the same slot twice within one minute.
    last_open_fire: Option<TimeOfDay>,
    last_close_fire: Option<TimeOfDay>,
}

impl Scheduler {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_check_ms: None,
            last_open_fire: None,
            last_close_fire: None,
        }
    }

    /// Compare the wall clock against `schedule` if the check interval has
    /// elapsed.  Returns `true` if a comparison ran.
    ///
    /// * `now_ms`: monotonic uptime.
    /// * `wall`  : local wall-clock minute, or `None` before time sync.
    pub fn tick(
        &mut self,
        now_ms: u64,
        wall: Option<TimeOfDay>,
        schedule: &DoorSchedule,
        delegate: &mut dyn SchedulerDelegate,
    ) -> bool {
        if let Some(last) = self.last_check_ms {
            if now_ms.saturating_sub(last) < u64::from(self.interval_ms) {
                return false;
            }
        }
        self.last_check_ms = Some(now_ms);

        let Some(wall) = wall else {
            debug!("Scheduler: wall clock not synced, skipping check");
            return true;
        };

        if wall == schedule.open_at && self.last_open_fire != Some(wall) {
            self.last_open_fire = Some(wall);
            info!("Scheduler: open time {} reached", wall);
            delegate.on_schedule_fired("open-time", ScheduleFiredKind::Open);
        }
        if wall == schedule.close_at && self.last_close_fire != Some(wall) {
            self.last_close_fire = Some(wall);
            info!("Scheduler: close time {} reached", wall);
            delegate.on_schedule_fired("close-time", ScheduleFiredKind::Close);
        }
        true
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
