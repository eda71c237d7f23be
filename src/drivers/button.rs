//! Polled push-button driver with a press lockout window.
//!
//! ## Hardware
//!
//! Active-high momentary switch with the internal pull-down enabled.  The
//! main loop samples the level every control tick; a low→high edge is a
//! press candidate.
//!
//! ## Filtering
//!
//! | Condition                                         | Result         |
//! |---------------------------------------------------|----------------|
//! | Rising edge, > lockout since last accepted press  | `Press`        |
//! | Rising edge inside the lockout window             | ignored        |
//! | Level held high                                   | nothing more   |
//!
//! The lockout doubles as debounce: contact bounce inside the window
//! produces extra edges that are all ignored.

use embedded_hal::digital::InputPin;
use log::{debug, warn};

/// Events emitted by [`ButtonDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Press,
}

/// Edge detector over any `embedded-hal` input pin.
pub struct ButtonDriver<P> {
    pin: P,
    lockout_ms: u64,
    was_high: bool,
    last_press_ms: Option<u64>,
}

impl<P: InputPin> ButtonDriver<P> {
    pub fn new(pin: P, lockout_ms: u32) -> Self {
        Self {
            pin,
            lockout_ms: u64::from(lockout_ms),
            was_high: false,
            last_press_ms: None,
        }
    }

    /// Sample the pin and classify.  A read error counts as released.
    pub fn poll(&mut self, now_ms: u64) -> Option<ButtonEvent> {
        let high = match self.pin.is_high() {
            Ok(high) => high,
            Err(e) => {
                warn!("Button: pin read failed: {:?}", e);
                false
            }
        };
        self.update(now_ms, high)
    }

    /// Feed one level sample taken at `now_ms`.
    pub fn update(&mut self, now_ms: u64, high: bool) -> Option<ButtonEvent> {
        let rising = high && !self.was_high;
        self.was_high = high;
        if !rising {
            return None;
        }

        if let Some(last) = self.last_press_ms {
            if now_ms.saturating_sub(last) <= self.lockout_ms {
                debug!("Button: edge at {}ms inside lockout, ignored", now_ms);
                return None;
            }
        }
        self.last_press_ms = Some(now_ms);
        Some(ButtonEvent::Press)
    }
}
