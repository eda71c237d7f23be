//! Motion state of the hutch door actuator.

use core::fmt;

/// Where the door is, or which way it is travelling.
///
/// `Open` and `Closed` are resting states with both relays released.
/// `Opening` and `Closing` last at most one travel duration with exactly
/// one relay energised.  `Unknown` only exists before the first drive
/// command after boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionState {
    Open,
    Closed,
    Opening,
    Closing,
    Unknown,
}

impl MotionState {
    /// Stable upper-case label reported through telemetry.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
            Self::Opening => "OPENING",
            Self::Closing => "CLOSING",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// `true` while a relay is energised.
    pub const fn is_moving(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }

    /// The direction a restore should drive toward.
    ///
    /// Anything that is not open or on its way there is treated as closed,
    /// including `Unknown`.
    pub const fn resting_direction(self) -> Direction {
        match self {
            Self::Open | Self::Opening => Direction::Open,
            Self::Closed | Self::Closing | Self::Unknown => Direction::Close,
        }
    }
}

impl fmt::Display for MotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Drive direction of the actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Open,
    Close,
}

impl Direction {
    /// State while travelling in this direction.
    pub const fn moving(self) -> MotionState {
        match self {
            Self::Open => MotionState::Opening,
            Self::Close => MotionState::Closing,
        }
    }

    /// State once travel in this direction completes.
    pub const fn resting(self) -> MotionState {
        match self {
            Self::Open => MotionState::Open,
            Self::Close => MotionState::Closed,
        }
    }

    /// Travelling state of the opposite direction, i.e. the state a
    /// command in this direction reverses.
    pub const fn reverses(self) -> MotionState {
        match self {
            Self::Open => MotionState::Closing,
            Self::Close => MotionState::Opening,
        }
    }
}
