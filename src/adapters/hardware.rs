//! Hardware adapter: bridges the relay drivers to [`DriveOutputPort`].
//!
//! Owns both relay drivers and routes each line write to the relay
//! registered for that line id.  This is the only module in the system
//! that switches actual relays.
//!
//! ## Interlock
//!
//! The actuator never asks for both lines at once, but a release write
//! can fail at the pin.  Before energising a relay the adapter checks the
//! level the *other* relay actually holds and refuses if it is still on.

use embedded_hal::digital::OutputPin;
use log::error;

use crate::app::ports::{DriveOutputPort, LineId};
use crate::drivers::relay::RelayDriver;

/// Concrete adapter that puts both actuator relays behind the drive port.
pub struct HardwareAdapter<A, B> {
    open_line: LineId,
    open_relay: RelayDriver<A>,
    close_line: LineId,
    close_relay: RelayDriver<B>,
}

impl<A: OutputPin, B: OutputPin> HardwareAdapter<A, B> {
    pub fn new(
        open_line: LineId,
        open_relay: RelayDriver<A>,
        close_line: LineId,
        close_relay: RelayDriver<B>,
    ) -> Self {
        Self {
            open_line,
            open_relay,
            close_line,
            close_relay,
        }
    }

    /// Current `(open, close)` relay levels.
    pub fn levels(&self) -> (bool, bool) {
        (self.open_relay.is_active(), self.close_relay.is_active())
    }
}

// ── DriveOutputPort implementation ────────────────────────────

impl<A: OutputPin, B: OutputPin> DriveOutputPort for HardwareAdapter<A, B> {
    fn write_line(&mut self, line: LineId, active: bool) {
        if line == self.open_line {
            if active && self.close_relay.is_active() {
                error!("HardwareAdapter: close relay still on, refusing to energise open relay");
                return;
            }
            self.open_relay.set(active);
        } else if line == self.close_line {
            if active && self.open_relay.is_active() {
                error!("HardwareAdapter: open relay still on, refusing to energise close relay");
                return;
            }
            self.close_relay.set(active);
        } else {
            error!("HardwareAdapter: no relay on line {}", line);
        }
    }
}
