//! Application service: the hexagonal core.
//!
//! [`DoorService`] owns the actuator controller, the daily schedule and the
//! scheduler.  It is the explicit context every inbound adapter (console,
//! button, scheduler, main loop) goes through; there is no global state.
//!
//! ```text
//!  console / button ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!                       │       DoorService        │
//!  DriveOutputPort ◀────│ Actuator · Schedule      │ ──▶ StoragePort
//!                       └─────────────────────────┘
//! ```

use std::cell::Cell;
use std::rc::Rc;

use log::{info, warn};

use crate::actuator::{LinearActuator, MotionState};
use crate::config::SystemConfig;
use crate::error::Error;
use crate::scheduler::{DoorSchedule, Scheduler, TimeOfDay};

use super::commands::{AppCommand, RESULT_OK, RESULT_REJECTED};
use super::events::{AppEvent, DoorStatus};
use super::persist;
use super::ports::{
    ClockPort, DriveOutputPort, EventSink, LineId, ScheduleFiredKind, SchedulerDelegate,
    StoragePort,
};

// ───────────────────────────────────────────────────────────────
// Schedule fire collector
// ───────────────────────────────────────────────────────────────

/// Buffers slots fired during one scheduler pass so they can be applied
/// after the scheduler borrow ends.
#[derive(Default)]
struct FiredSlots(heapless::Vec<ScheduleFiredKind, 2>);

impl SchedulerDelegate for FiredSlots {
    fn on_schedule_fired(&mut self, label: &str, kind: ScheduleFiredKind) {
        if self.0.push(kind).is_err() {
            warn!("Schedule slot '{}' dropped, collector full", label);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// DoorService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct DoorService<O, C> {
    actuator: LinearActuator<O, C>,
    schedule: DoorSchedule,
    scheduler: Scheduler,
    /// Set by the actuator's change listener, drained by `sync_state`.
    changed: Rc<Cell<bool>>,
    last_state: MotionState,
    state_dirty: bool,
    schedule_dirty: bool,
}

impl<O: DriveOutputPort, C: ClockPort> DoorService<O, C> {
    /// Build the service and start the actuator toward `restored`
    /// (`Unknown` when nothing was persisted).
    pub fn new(
        config: &SystemConfig,
        open_line: LineId,
        close_line: LineId,
        restored: Option<MotionState>,
        schedule: DoorSchedule,
        outputs: O,
        clock: C,
    ) -> Result<Self, Error> {
        let initial = restored.unwrap_or(MotionState::Unknown);
        let mut actuator = LinearActuator::new(
            u32::from(config.travel_duration_secs),
            open_line,
            close_line,
            initial,
            outputs,
            clock,
        )?;

        let changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&changed);
        actuator.on_change(move || flag.set(true));

        let last_state = actuator.state();
        info!(
            "DoorService: restored {}, now {}, open at {}, close at {}",
            initial, last_state, schedule.open_at, schedule.close_at
        );

        Ok(Self {
            actuator,
            schedule,
            scheduler: Scheduler::new(config.schedule_check_interval_ms),
            changed,
            last_state,
            // Construction already moved the door; record where it is headed.
            state_dirty: true,
            schedule_dirty: false,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the starting state.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started(self.actuator.state()));
        sink.emit(&AppEvent::Status(self.status()));
    }

    // ── Per-loop orchestration ────────────────────────────────

    /// Advance the drive timer and report any completed travel.
    pub fn tick(&mut self, now_ms: u64, sink: &mut impl EventSink) {
        self.actuator.tick(now_ms);
        self.sync_state(sink);
    }

    /// Run a schedule comparison if the check interval has elapsed.
    ///
    /// `wall` is the local wall-clock minute, `None` until time sync.
    pub fn check_schedule(
        &mut self,
        now_ms: u64,
        wall: Option<TimeOfDay>,
        sink: &mut impl EventSink,
    ) {
        let mut fired = FiredSlots::default();
        self.scheduler.tick(now_ms, wall, &self.schedule, &mut fired);
        for kind in fired.0 {
            let cmd = match kind {
                ScheduleFiredKind::Open => AppCommand::Open,
                ScheduleFiredKind::Close => AppCommand::Close,
            };
            self.handle_command(cmd, sink);
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply a parsed command.
    pub fn handle_command(&mut self, cmd: AppCommand, sink: &mut impl EventSink) {
        match cmd {
            AppCommand::Open => self.actuator.open(),
            AppCommand::Close => self.actuator.close(),
            AppCommand::Toggle => self.actuator.toggle(),
            AppCommand::SetOpenTime(t) => {
                self.schedule.open_at = t;
                self.schedule_changed(sink);
            }
            AppCommand::SetCloseTime(t) => {
                self.schedule.close_at = t;
                self.schedule_changed(sink);
            }
        }
        sink.emit(&AppEvent::CommandApplied(cmd));
        self.sync_state(sink);
    }

    /// Remote function entry point.  Returns `1` on success, `-1` if the
    /// function or its argument is rejected.
    pub fn handle_remote(&mut self, function: &str, arg: &str, sink: &mut impl EventSink) -> i32 {
        match AppCommand::from_remote(function, arg) {
            Ok(cmd) => {
                self.handle_command(cmd, sink);
                RESULT_OK
            }
            Err(e) => {
                warn!("Remote {}({:?}) rejected: {}", function, arg, e);
                sink.emit(&AppEvent::CommandRejected(e));
                RESULT_REJECTED
            }
        }
    }

    // ── Persistence ───────────────────────────────────────────

    /// Flush pending state and schedule writes.  Returns `true` if
    /// anything was written.
    ///
    /// Failed writes are logged and dropped; the next change writes again.
    pub fn persist_if_needed<S: StoragePort + ?Sized>(&mut self, storage: &mut S) -> bool {
        let mut wrote = false;
        if self.state_dirty {
            self.state_dirty = false;
            match persist::save_state(storage, self.last_state) {
                Ok(()) => wrote = true,
                Err(e) => warn!("DoorService: saving state failed: {}", e),
            }
        }
        if self.schedule_dirty {
            self.schedule_dirty = false;
            match persist::save_schedule(storage, &self.schedule) {
                Ok(()) => wrote = true,
                Err(e) => warn!("DoorService: saving schedule failed: {}", e),
            }
        }
        wrote
    }

    /// Whether state or schedule has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.state_dirty || self.schedule_dirty
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> MotionState {
        self.actuator.state()
    }

    pub fn schedule(&self) -> &DoorSchedule {
        &self.schedule
    }

    /// Snapshot for the `hutch_door_state` variable.
    pub fn status(&self) -> DoorStatus {
        DoorStatus::new(self.actuator.state(), &self.schedule)
    }

    pub fn actuator(&self) -> &LinearActuator<O, C> {
        &self.actuator
    }

    /// Mutable access, for registering additional listeners.
    pub fn actuator_mut(&mut self) -> &mut LinearActuator<O, C> {
        &mut self.actuator
    }

    // ── Internal ──────────────────────────────────────────────

    fn schedule_changed(&mut self, sink: &mut impl EventSink) {
        self.schedule_dirty = true;
        info!(
            "DoorService: schedule now open {} close {}",
            self.schedule.open_at, self.schedule.close_at
        );
        sink.emit(&AppEvent::ScheduleUpdated(self.schedule));
    }

    fn sync_state(&mut self, sink: &mut impl EventSink) {
        if !self.changed.replace(false) {
            return;
        }
        let to = self.actuator.state();
        if to == self.last_state {
            return;
        }
        sink.emit(&AppEvent::StateChanged {
            from: self.last_state,
            to,
        });
        self.last_state = to;
        self.state_dirty = true;
    }
}
