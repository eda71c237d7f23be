//! ESP32 time adapter.
//!
//! Provides the monotonic [`ClockPort`] and the local wall-clock minute
//! used by the schedule.
//!
//! - **`target_os = "espidf"`**: wraps `esp_timer_get_time()` (monotonic,
//!   microseconds) and `gettimeofday()` (SNTP-synced wall clock).
//! - **`not(target_os = "espidf")`**: uses `std::time::Instant` and
//!   `SystemTime` for host-side testing and simulation.

use crate::app::ports::ClockPort;
use crate::scheduler::TimeOfDay;

/// Anything earlier than 2020-01-01 means SNTP has not run yet.
const EPOCH_2020: i64 = 1_577_836_800;

/// Time adapter for the ESP32 platform.
#[derive(Debug, Clone, Copy)]
pub struct Esp32TimeAdapter {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for Esp32TimeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Esp32TimeAdapter {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Milliseconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn uptime_ms(&self) -> u64 {
        // SAFETY: esp_timer_get_time has no preconditions once the
        // scheduler is running.
        let us = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
        u64::try_from(us).unwrap_or(0) / 1000
    }

    /// Milliseconds since boot (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Seconds since the Unix epoch, `None` if the call fails.
    #[cfg(target_os = "espidf")]
    fn unix_secs() -> Option<i64> {
        let mut tv = esp_idf_svc::sys::timeval {
            tv_sec: 0,
            tv_usec: 0,
        };
        // SAFETY: tv is a valid out-pointer, the timezone argument may be null.
        if unsafe { esp_idf_svc::sys::gettimeofday(&mut tv, core::ptr::null_mut()) } != 0 {
            return None;
        }
        Some(i64::from(tv.tv_sec))
    }

    #[cfg(not(target_os = "espidf"))]
    fn unix_secs() -> Option<i64> {
        let since = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .ok()?;
        i64::try_from(since.as_secs()).ok()
    }

    /// Local wall-clock minute.  `None` until the clock is synced.
    pub fn wall_time(&self, utc_offset_minutes: i16) -> Option<TimeOfDay> {
        local_time_of_day(Self::unix_secs()?, utc_offset_minutes)
    }
}

impl ClockPort for Esp32TimeAdapter {
    fn now_ms(&self) -> u64 {
        self.uptime_ms()
    }
}

/// Hour and minute of `unix_secs` shifted by a fixed UTC offset.
///
/// Returns `None` for timestamps before 2020, which only occur before
/// the first SNTP sync.
pub fn local_time_of_day(unix_secs: i64, utc_offset_minutes: i16) -> Option<TimeOfDay> {
    if unix_secs < EPOCH_2020 {
        return None;
    }
    let local = unix_secs + i64::from(utc_offset_minutes) * 60;
    let secs_of_day = local.rem_euclid(86_400);
    let hour = u8::try_from(secs_of_day / 3600).ok()?;
    let minute = u8::try_from((secs_of_day % 3600) / 60).ok()?;
    TimeOfDay::new(hour, minute).ok()
}
