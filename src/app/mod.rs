//! Application core: pure domain logic, zero I/O.
//!
//! This module wires the actuator controller to the outside world: remote
//! commands, the daily schedule, persistence and status reporting.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod persist;
pub mod ports;
pub mod service;
