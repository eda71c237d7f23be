//! Fuzz target: console line splitting
//!
//! Any line the console accepts must have a non-empty, whitespace-free
//! function name and fit the line limit.
//!
//! cargo fuzz run fuzz_console_line

#![no_main]

use coopdoor::adapters::console::{MAX_LINE_LEN, parse_line};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Some(cmd) = parse_line(text) {
        assert!(!cmd.function.is_empty());
        assert!(!cmd.function.contains(char::is_whitespace));
        assert!(cmd.function.len() + cmd.arg.len() <= MAX_LINE_LEN);
    }
});
