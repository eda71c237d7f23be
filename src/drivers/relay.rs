//! Single-relay driver for one actuator drive line.
//!
//! Wraps any `embedded-hal` output pin.  On the device the pin is an
//! `esp-idf-hal` `PinDriver`; on host it is whatever the test supplies.
//!
//! ## Safety contract
//!
//! This driver is a dumb switch.  The cached level only changes when the
//! pin write succeeds, so callers can trust [`RelayDriver::is_active`] to
//! reflect the last level the pin actually took.

use embedded_hal::digital::OutputPin;
use log::warn;

pub struct RelayDriver<P> {
    pin: P,
    active: bool,
}

impl<P: OutputPin> RelayDriver<P> {
    /// Take the pin and force it low (relay released).
    pub fn new(pin: P) -> Self {
        let mut relay = Self {
            pin,
            active: true,
        };
        relay.set(false);
        relay
    }

    /// Energise (`true`) or release (`false`) the relay.
    ///
    /// A failed write leaves the cached level unchanged.
    pub fn set(&mut self, active: bool) {
        let result = if active {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        match result {
            Ok(()) => self.active = active,
            Err(e) => warn!("Relay: write {} failed: {:?}", active, e),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
