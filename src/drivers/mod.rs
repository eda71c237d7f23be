//! Relay, push-button and watchdog drivers.

pub mod button;
pub mod relay;
pub mod watchdog;
