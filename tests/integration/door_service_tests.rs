//! Integration tests for the DoorService → LinearActuator → relay pipeline.
//!
//! Every scenario drives the service through its public entry points
//! (remote functions, button, schedule, tick) and asserts on what reached
//! the relay lines.

use std::cell::RefCell;
use std::rc::Rc;

use super::mock_hw::{CLOSE_LINE, LogSink, MockClock, MockLines, OPEN_LINE};

use coopdoor::actuator::MotionState;
use coopdoor::app::commands::AppCommand;
use coopdoor::app::service::DoorService;
use coopdoor::config::SystemConfig;
use coopdoor::drivers::button::{ButtonDriver, ButtonEvent};
use coopdoor::scheduler::{DoorSchedule, TimeOfDay};

const TRAVEL_MS: u64 = 15_000;

fn make_app(restored: Option<MotionState>) -> (DoorService<MockLines, MockClock>, MockClock, LogSink) {
    let clock = MockClock::new();
    let mut sink = LogSink::new();
    let mut app = DoorService::new(
        &SystemConfig::default(),
        OPEN_LINE,
        CLOSE_LINE,
        restored,
        DoorSchedule::default(),
        MockLines::new(),
        clock.clone(),
    )
    .unwrap();
    app.start(&mut sink);
    (app, clock, sink)
}

/// Service that has finished closing at t = 15 s.
fn closed_app() -> (DoorService<MockLines, MockClock>, MockClock, LogSink) {
    let (mut app, clock, mut sink) = make_app(Some(MotionState::Closed));
    clock.set(TRAVEL_MS);
    app.tick(TRAVEL_MS, &mut sink);
    assert_eq!(app.state(), MotionState::Closed);
    (app, clock, sink)
}

fn t(hour: u8, minute: u8) -> TimeOfDay {
    TimeOfDay::new(hour, minute).unwrap()
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boot_without_saved_state_closes() {
    let (mut app, clock, mut sink) = make_app(None);

    assert_eq!(app.state(), MotionState::Closing);
    assert_eq!(app.actuator().outputs().levels(), (false, true));

    clock.set(TRAVEL_MS - 1);
    app.tick(TRAVEL_MS - 1, &mut sink);
    assert_eq!(app.state(), MotionState::Closing);

    clock.set(TRAVEL_MS);
    app.tick(TRAVEL_MS, &mut sink);
    assert_eq!(app.state(), MotionState::Closed);
    assert_eq!(app.actuator().outputs().levels(), (false, false));
    assert_eq!(sink.transitions(), vec![(MotionState::Closing, MotionState::Closed)]);
}

#[test]
fn boot_from_saved_opening_reopens() {
    let (app, _, _) = make_app(Some(MotionState::Opening));
    assert_eq!(app.state(), MotionState::Opening);
    assert_eq!(app.actuator().outputs().levels(), (true, false));
}

// ── Remote functions ──────────────────────────────────────────

#[test]
fn remote_open_then_reverse_credits_travel() {
    let (mut app, clock, mut sink) = closed_app();
    let t0 = TRAVEL_MS;

    assert_eq!(app.handle_remote("set_door", "OPEN", &mut sink), 1);
    assert_eq!(app.state(), MotionState::Opening);

    clock.set(t0 + 5_000);
    assert_eq!(app.handle_remote("set_door", "close", &mut sink), 1);
    assert_eq!(app.state(), MotionState::Closing);

    app.tick(t0 + 9_000, &mut sink);
    assert_eq!(app.state(), MotionState::Closing);
    app.tick(t0 + 10_000, &mut sink);
    assert_eq!(app.state(), MotionState::Closed);

    assert!(!app.actuator().outputs().overlap_seen);
}

#[test]
fn rejected_remote_call_never_touches_relays() {
    let (mut app, _, mut sink) = closed_app();
    let writes_before = app.actuator().outputs().writes.len();

    assert_eq!(app.handle_remote("set_door", "halfway", &mut sink), -1);
    assert_eq!(app.handle_remote("set_open_time", "99:99", &mut sink), -1);
    assert_eq!(app.handle_remote("set_close_time", "7:5", &mut sink), -1);
    assert_eq!(app.handle_remote("launch", "now", &mut sink), -1);

    assert_eq!(app.actuator().outputs().writes.len(), writes_before);
    assert_eq!(app.state(), MotionState::Closed);
    assert_eq!(sink.rejections(), 4);
    assert_eq!(app.schedule(), &DoorSchedule::default());
}

#[test]
fn repeated_open_is_a_no_op() {
    let (mut app, _, mut sink) = closed_app();
    app.handle_remote("set_door", "open", &mut sink);
    let writes = app.actuator().outputs().writes.len();
    let transitions = sink.transitions().len();

    app.handle_remote("set_door", "open", &mut sink);
    app.handle_remote("set_door", "OPEN", &mut sink);

    assert_eq!(app.actuator().outputs().writes.len(), writes);
    assert_eq!(sink.transitions().len(), transitions);
}

// ── Button ────────────────────────────────────────────────────

#[test]
fn button_press_toggles_and_lockout_filters_bounce() {
    let (mut app, clock, mut sink) = closed_app();
    struct Released;
    impl embedded_hal::digital::ErrorType for Released {
        type Error = core::convert::Infallible;
    }
    impl embedded_hal::digital::InputPin for Released {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(false)
        }
        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(true)
        }
    }
    let mut button = ButtonDriver::new(Released, 1000);

    let mut feed = |at: u64, high: bool, app: &mut DoorService<MockLines, MockClock>| {
        clock.set(at);
        if button.update(at, high) == Some(ButtonEvent::Press) {
            app.handle_command(AppCommand::Toggle, &mut sink);
        }
    };

    let t0 = TRAVEL_MS + 100;
    feed(t0, true, &mut app);
    assert_eq!(app.state(), MotionState::Opening);

    // Bounce within the lockout window.
    feed(t0 + 20, false, &mut app);
    feed(t0 + 40, true, &mut app);
    assert_eq!(app.state(), MotionState::Opening);

    // A deliberate second press after the window reverses.
    feed(t0 + 2_000, false, &mut app);
    feed(t0 + 2_100, true, &mut app);
    assert_eq!(app.state(), MotionState::Closing);
}

// ── Schedule ──────────────────────────────────────────────────

#[test]
fn schedule_opens_and_closes_at_set_times() {
    let (mut app, clock, mut sink) = closed_app();
    assert_eq!(app.handle_remote("set_open_time", "06:30", &mut sink), 1);
    assert_eq!(app.handle_remote("set_close_time", "20:15", &mut sink), 1);

    let mut now = clock.advance(1);
    app.check_schedule(now, Some(t(6, 29)), &mut sink);
    assert_eq!(app.state(), MotionState::Closed);

    now = clock.advance(60_000);
    app.check_schedule(now, Some(t(6, 30)), &mut sink);
    assert_eq!(app.state(), MotionState::Opening);

    now = clock.advance(TRAVEL_MS);
    app.tick(now, &mut sink);
    assert_eq!(app.state(), MotionState::Open);

    now = clock.advance(60_000);
    app.check_schedule(now, Some(t(20, 15)), &mut sink);
    assert_eq!(app.state(), MotionState::Closing);
}

#[test]
fn schedule_skipped_while_clock_unsynced() {
    let (mut app, clock, mut sink) = closed_app();
    app.handle_remote("set_open_time", "00:00", &mut sink);

    for _ in 0..10 {
        let now = clock.advance(60_000);
        app.check_schedule(now, None, &mut sink);
    }
    assert_eq!(app.state(), MotionState::Closed);
}

#[test]
fn schedule_checked_at_most_once_per_interval() {
    let (mut app, clock, mut sink) = closed_app();
    app.handle_remote("set_close_time", "12:00", &mut sink);

    let now = clock.advance(1);
    app.check_schedule(now, Some(t(11, 59)), &mut sink);

    // The minute flips, but the interval has not elapsed yet.
    app.handle_remote("set_door", "open", &mut sink);
    let now = clock.advance(30_000);
    app.check_schedule(now, Some(t(12, 0)), &mut sink);
    assert_eq!(app.state(), MotionState::Opening);

    let now = clock.advance(30_000);
    app.check_schedule(now, Some(t(12, 0)), &mut sink);
    assert_eq!(app.state(), MotionState::Closing);
}

// ── Listeners ─────────────────────────────────────────────────

#[test]
fn extra_listeners_see_change_before_specific() {
    let (mut app, clock, mut sink) = closed_app();
    let log = Rc::new(RefCell::new(Vec::new()));

    let l = Rc::clone(&log);
    app.actuator_mut().on_change(move || l.borrow_mut().push("change"));
    let l = Rc::clone(&log);
    app.actuator_mut().on_open(move || l.borrow_mut().push("open"));
    let l = Rc::clone(&log);
    app.actuator_mut().on_opening(move || l.borrow_mut().push("opening"));

    app.handle_command(AppCommand::Open, &mut sink);
    let now = clock.advance(TRAVEL_MS);
    app.tick(now, &mut sink);

    assert_eq!(*log.borrow(), vec!["change", "opening", "change", "open"]);
}

// ── Status ────────────────────────────────────────────────────

#[test]
fn status_json_tracks_state() {
    let (mut app, _, mut sink) = closed_app();
    app.handle_remote("set_open_time", "07:00", &mut sink);
    app.handle_remote("set_door", "open", &mut sink);

    let json = app.status().to_json().unwrap();
    assert_eq!(
        json,
        r#"{"hutch_door_state":"OPENING","open_time":"07:00","close_time":"00:00"}"#
    );
}
