//! Timed linear-actuator controller for the hutch door.
//!
//! The actuator has built-in limit switches but no position feedback, so
//! the controller models position purely by drive time:
//!
//! ```text
//!             open()                     tick: elapsed >= travel
//!   Closed ──────────▶ Opening ─────────────────────────────────▶ Open
//!     ▲                 │   ▲                                      │
//!     │         close() │   │ open()                               │
//!     │                 ▼   │                                      │
//!     └──────────────── Closing ◀──────────────────────────────────┘
//!   tick: elapsed >= travel                  close()
//! ```
//!
//! Reversing mid-travel credits the time already spent moving, so the
//! door reaches the opposite limit switch after exactly as long as it
//! had been travelling.
//!
//! Over-driving into a limit switch is harmless; driving both relays at
//! once is not.  [`LinearActuator::set_lines`] refuses that combination.

pub mod listeners;
pub mod state;

use log::{debug, error, info};

use crate::app::ports::{ClockPort, DriveOutputPort, LineId};
use crate::error::ActuatorError;

use listeners::ListenerSet;
pub use state::{Direction, MotionState};

/// Relay-driven linear actuator with time-based travel tracking.
pub struct LinearActuator<O, C> {
    travel_ms: i64,
    open_line: LineId,
    close_line: LineId,
    state: MotionState,
    /// Start of the current drive epoch.  Negative values are legal after
    /// a reversal early in uptime.
    epoch_start_ms: i64,
    outputs: O,
    clock: C,
    listeners: ListenerSet,
}

impl<O: DriveOutputPort, C: ClockPort> LinearActuator<O, C> {
    /// Build the controller and immediately drive toward `initial_state`.
    ///
    /// The relays are energised even if `initial_state` claims the door is
    /// already there: after a power cycle the relays may have been cut
    /// mid-travel, and the limit switches make the extra drive harmless.
    /// `Open`/`Opening` drive open, everything else drives closed.
    pub fn new(
        travel_duration_secs: u32,
        open_line: LineId,
        close_line: LineId,
        initial_state: MotionState,
        outputs: O,
        clock: C,
    ) -> Result<Self, ActuatorError> {
        if travel_duration_secs == 0 {
            return Err(ActuatorError::ZeroTravelDuration);
        }
        if open_line == close_line {
            return Err(ActuatorError::SharedDriveLine(open_line));
        }

        let mut actuator = Self {
            travel_ms: i64::from(travel_duration_secs) * 1000,
            open_line,
            close_line,
            state: MotionState::Unknown,
            epoch_start_ms: 0,
            outputs,
            clock,
            listeners: ListenerSet::new(),
        };

        info!(
            "Actuator: travel={}s open_line={} close_line={} restoring {}",
            travel_duration_secs, open_line, close_line, initial_state
        );
        actuator.drive_toward(initial_state.resting_direction());
        Ok(actuator)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> MotionState {
        self.state
    }

    /// The output sink, for inspection.
    pub fn outputs(&self) -> &O {
        &self.outputs
    }

    /// Milliseconds until the current epoch completes, `None` at rest.
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        if !self.state.is_moving() {
            return None;
        }
        let end = self.epoch_start_ms + self.travel_ms;
        Some((end - now_ms as i64).max(0) as u64)
    }

    // ── Commands ──────────────────────────────────────────────

    pub fn open(&mut self) {
        self.drive_toward(Direction::Open);
    }

    pub fn close(&mut self) {
        self.drive_toward(Direction::Close);
    }

    /// Reverse whatever the door is doing.
    ///
    /// `Unknown` is handled like `Closed` and drives open.
    pub fn toggle(&mut self) {
        match self.state {
            MotionState::Open | MotionState::Opening => self.close(),
            MotionState::Closed | MotionState::Closing | MotionState::Unknown => self.open(),
        }
    }

    /// Poll the drive timer.  Call once per main-loop iteration.
    pub fn tick(&mut self, now_ms: u64) {
        let direction = match self.state {
            MotionState::Opening => Direction::Open,
            MotionState::Closing => Direction::Close,
            MotionState::Open | MotionState::Closed | MotionState::Unknown => return,
        };
        if (now_ms as i64) < self.epoch_start_ms + self.travel_ms {
            return;
        }

        self.state = direction.resting();
        self.set_lines(false, false);
        info!("Actuator: travel complete, now {}", self.state);
        self.listeners.fire(self.state);
    }

    // ── Listener registration ─────────────────────────────────

    pub fn on_open(&mut self, listener: impl FnMut() + 'static) {
        self.listeners.push_for(MotionState::Open, Box::new(listener));
    }

    pub fn on_opening(&mut self, listener: impl FnMut() + 'static) {
        self.listeners.push_for(MotionState::Opening, Box::new(listener));
    }

    pub fn on_closed(&mut self, listener: impl FnMut() + 'static) {
        self.listeners.push_for(MotionState::Closed, Box::new(listener));
    }

    pub fn on_closing(&mut self, listener: impl FnMut() + 'static) {
        self.listeners.push_for(MotionState::Closing, Box::new(listener));
    }

    /// Called on every transition, before the state-specific listeners.
    pub fn on_change(&mut self, listener: impl FnMut() + 'static) {
        self.listeners.push_change(Box::new(listener));
    }

    // ── Internal ──────────────────────────────────────────────

    /// Start (or reverse) travel in `direction`.
    ///
    /// On reversal the credited time is clamped to one full travel, so a
    /// reversal after a missed tick never asks for more than that.
    fn drive_toward(&mut self, direction: Direction) {
        let from = self.state;
        if from == direction.resting() || from == direction.moving() {
            return;
        }

        let now = self.clock.now_ms() as i64;
        let epoch_start = if from == direction.reverses() {
            // Reversal: the way back takes as long as we have been going.
            let elapsed = (now - self.epoch_start_ms).clamp(0, self.travel_ms);
            now + elapsed - self.travel_ms
        } else {
            now
        };

        self.state = direction.moving();
        match direction {
            Direction::Open => self.set_lines(true, false),
            Direction::Close => self.set_lines(false, true),
        }
        self.epoch_start_ms = epoch_start;

        info!(
            "Actuator: {} -> {} (done in {}ms)",
            from,
            self.state,
            epoch_start + self.travel_ms - now
        );
        self.listeners.fire(self.state);
    }

    /// Drive both relay lines.  Released lines are written first so both
    /// are never active, even between the two writes.
    fn set_lines(&mut self, open_active: bool, close_active: bool) {
        if open_active && close_active {
            error!("Actuator: refused to energise both drive lines");
            return;
        }

        let lines = [(self.open_line, open_active), (self.close_line, close_active)];
        for &(line, active) in lines.iter().filter(|(_, active)| !active) {
            self.outputs.write_line(line, active);
        }
        for &(line, active) in lines.iter().filter(|(_, active)| *active) {
            self.outputs.write_line(line, active);
        }
        debug!("Actuator: open={} close={}", open_active, close_active);
    }
}

impl<O, C> core::fmt::Debug for LinearActuator<O, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LinearActuator")
            .field("travel_ms", &self.travel_ms)
            .field("open_line", &self.open_line)
            .field("close_line", &self.close_line)
            .field("state", &self.state)
            .field("epoch_start_ms", &self.epoch_start_ms)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}
