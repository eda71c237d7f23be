//! Unified error types for the coop door firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! boot path and the remote-command boundary uniform.  All variants are
//! `Copy` so they pass through the service without allocation.

use core::fmt;

use crate::app::ports::{ConfigError, LineId, StorageError};

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The actuator controller could not be built.
    Actuator(ActuatorError),
    /// A remote command or its argument was rejected.
    Command(CommandError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// Non-volatile storage failed.
    Storage(StorageError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Command(e) => write!(f, "command: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
        }
    }
}

impl core::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator construction errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// Travel duration must be at least one second.
    ZeroTravelDuration,
    /// Open and close relays were given the same output line.
    SharedDriveLine(LineId),
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroTravelDuration => write!(f, "travel duration must be > 0"),
            Self::SharedDriveLine(line) => write!(f, "open and close share line {line}"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Remote command errors
// ---------------------------------------------------------------------------

/// Rejections at the remote-command boundary.  These map to the `-1`
/// result code and never reach the actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// No remote function with that name.
    UnknownFunction,
    /// `set_door` argument was neither OPEN nor CLOSE.
    UnknownDoorCommand,
    /// Time argument is not `HH:MM`.
    MalformedTime,
    /// Hour outside `0..=24`.
    HourOutOfRange(u8),
    /// Minute outside `0..=59`.
    MinuteOutOfRange(u8),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFunction => write!(f, "unknown function"),
            Self::UnknownDoorCommand => write!(f, "expected OPEN or CLOSE"),
            Self::MalformedTime => write!(f, "expected HH:MM"),
            Self::HourOutOfRange(h) => write!(f, "hour {h} out of range 0-24"),
            Self::MinuteOutOfRange(m) => write!(f, "minute {m} out of range 0-59"),
        }
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
