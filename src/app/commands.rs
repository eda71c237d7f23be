//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (serial console,
//! push-button, scheduler) that the [`DoorService`](super::service::DoorService)
//! interprets and acts upon.

use crate::error::CommandError;
use crate::scheduler::TimeOfDay;

/// Remote function names accepted by [`AppCommand::from_remote`].
pub const FN_SET_DOOR: &str = "set_door";
pub const FN_SET_OPEN_TIME: &str = "set_open_time";
pub const FN_SET_CLOSE_TIME: &str = "set_close_time";

/// Result code returned to a remote caller on success.
pub const RESULT_OK: i32 = 1;
/// Result code returned to a remote caller on any rejection.
pub const RESULT_REJECTED: i32 = -1;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Drive the door toward Open.
    Open,

    /// Drive the door toward Closed.
    Close,

    /// Reverse the current direction (manual button).
    Toggle,

    /// Replace the daily open time and persist it.
    SetOpenTime(TimeOfDay),

    /// Replace the daily close time and persist it.
    SetCloseTime(TimeOfDay),
}

impl AppCommand {
    /// Parse a remote function call.
    ///
    /// `set_door` takes `OPEN` or `CLOSE` in any letter case.  The two time
    /// setters take a strict `HH:MM`.  `arg` is matched as given; trimming
    /// belongs to the transport (see `adapters::console::parse_line`).
    pub fn from_remote(function: &str, arg: &str) -> Result<Self, CommandError> {
        match function {
            FN_SET_DOOR => {
                if arg.eq_ignore_ascii_case("open") {
                    Ok(Self::Open)
                } else if arg.eq_ignore_ascii_case("close") {
                    Ok(Self::Close)
                } else {
                    Err(CommandError::UnknownDoorCommand)
                }
            }
            FN_SET_OPEN_TIME => TimeOfDay::parse(arg).map(Self::SetOpenTime),
            FN_SET_CLOSE_TIME => TimeOfDay::parse(arg).map(Self::SetCloseTime),
            _ => Err(CommandError::UnknownFunction),
        }
    }
}
