//! Fuzz target: `TimeOfDay::parse`
//!
//! Anything accepted must be in range and must render back to the exact
//! input bytes.
//!
//! cargo fuzz run fuzz_time_of_day

#![no_main]

use coopdoor::scheduler::TimeOfDay;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(t) = TimeOfDay::parse(text) {
        assert!(t.hour <= 24, "hour out of range");
        assert!(t.minute <= 59, "minute out of range");
        assert_eq!(t.to_hhmm().as_str(), text);
    }
});
