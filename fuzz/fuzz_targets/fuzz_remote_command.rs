//! Fuzz target: `AppCommand::from_remote`
//!
//! Splits the input at the first NUL into function name and argument and
//! asserts the parser never panics and only ever yields commands that
//! belong to the named function.
//!
//! cargo fuzz run fuzz_remote_command

#![no_main]

use coopdoor::app::commands::{AppCommand, FN_SET_CLOSE_TIME, FN_SET_DOOR, FN_SET_OPEN_TIME};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let (function, arg) = text.split_once('\0').unwrap_or((text, ""));

    match AppCommand::from_remote(function, arg) {
        Ok(AppCommand::Open | AppCommand::Close) => assert_eq!(function, FN_SET_DOOR),
        Ok(AppCommand::SetOpenTime(t)) => {
            assert_eq!(function, FN_SET_OPEN_TIME);
            assert!(t.hour <= 24 && t.minute <= 59);
        }
        Ok(AppCommand::SetCloseTime(t)) => {
            assert_eq!(function, FN_SET_CLOSE_TIME);
            assert!(t.hour <= 24 && t.minute <= 59);
        }
        Ok(AppCommand::Toggle) => panic!("toggle is not reachable remotely"),
        Err(_) => {}
    }
});
