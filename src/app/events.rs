//! Outbound application events.
//!
//! The [`DoorService`](super::service::DoorService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to serial, publish as a cloud
//! variable, etc.

use serde::Serialize;

use crate::actuator::MotionState;
use crate::error::CommandError;
use crate::scheduler::DoorSchedule;

use super::commands::AppCommand;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started (carries the state it was built from).
    Started(MotionState),

    /// The actuator moved between states.
    StateChanged { from: MotionState, to: MotionState },

    /// A command was accepted and applied.
    CommandApplied(AppCommand),

    /// A remote call was rejected before reaching the actuator.
    CommandRejected(CommandError),

    /// The daily schedule was replaced.
    ScheduleUpdated(DoorSchedule),

    /// Periodic status snapshot.
    Status(DoorStatus),
}

/// Point-in-time door status, published as the `hutch_door_state`
/// variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoorStatus {
    #[serde(rename = "hutch_door_state")]
    pub state: &'static str,
    pub open_time: heapless::String<5>,
    pub close_time: heapless::String<5>,
}

impl DoorStatus {
    pub fn new(state: MotionState, schedule: &DoorSchedule) -> Self {
        Self {
            state: state.label(),
            open_time: schedule.open_at.to_hhmm(),
            close_time: schedule.close_at.to_hhmm(),
        }
    }

    /// Render as a single-line JSON object.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
