//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements       | Connects to                 |
//! |-------------|------------------|-----------------------------|
//! | `console`   | (inbound)        | Serial console lines        |
//! | `hardware`  | DriveOutputPort  | Open / close relays         |
//! | `log_sink`  | EventSink        | Serial log output           |
//! | `nvs`       | ConfigPort       | NVS / in-memory store       |
//! |             | StoragePort      |                             |
//! | `time`      | ClockPort        | ESP32 system timer, SNTP    |

pub mod console;
pub mod hardware;
pub mod log_sink;
pub mod nvs;
pub mod time;
pub(super) mod utils;
