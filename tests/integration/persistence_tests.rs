//! Persistence round trips through the service: state saved on change,
//! schedule saved on setter, both restored at the next boot.

use super::mock_hw::{CLOSE_LINE, LogSink, MockClock, MockLines, MockNvs, OPEN_LINE};

use coopdoor::actuator::MotionState;
use coopdoor::app::persist::{self, KEY_STATE, NAMESPACE};
use coopdoor::app::ports::StoragePort;
use coopdoor::app::service::DoorService;
use coopdoor::config::SystemConfig;
use coopdoor::scheduler::{DoorSchedule, TimeOfDay};

/// Build a service the way `main` does: restore from storage first.
fn boot(nvs: &MockNvs) -> (DoorService<MockLines, MockClock>, MockClock) {
    let clock = MockClock::new();
    let app = DoorService::new(
        &SystemConfig::default(),
        OPEN_LINE,
        CLOSE_LINE,
        persist::load_state(nvs),
        persist::load_schedule(nvs).unwrap_or_default(),
        MockLines::new(),
        clock.clone(),
    )
    .unwrap();
    (app, clock)
}

#[test]
fn first_boot_persists_initial_drive() {
    let mut nvs = MockNvs::new();
    let (mut app, _) = boot(&nvs);

    assert!(app.persist_if_needed(&mut nvs));
    assert_eq!(persist::load_state(&nvs), Some(MotionState::Closing));
    assert!(!app.persist_if_needed(&mut nvs));
}

#[test]
fn state_survives_reboot() {
    let mut nvs = MockNvs::new();
    let mut sink = LogSink::new();

    {
        let (mut app, clock) = boot(&nvs);
        clock.set(15_000);
        app.tick(15_000, &mut sink);
        app.handle_remote("set_door", "open", &mut sink);
        clock.set(30_000);
        app.tick(30_000, &mut sink);
        assert_eq!(app.state(), MotionState::Open);
        app.persist_if_needed(&mut nvs);
    }

    let (app, _) = boot(&nvs);
    // Restored Open drives open again; the limit switch stops it.
    assert_eq!(app.state(), MotionState::Opening);
    assert_eq!(app.actuator().outputs().levels(), (true, false));
}

#[test]
fn schedule_survives_reboot() {
    let mut nvs = MockNvs::new();
    let mut sink = LogSink::new();

    {
        let (mut app, _) = boot(&nvs);
        app.handle_remote("set_open_time", "05:45", &mut sink);
        app.handle_remote("set_close_time", "21:10", &mut sink);
        app.persist_if_needed(&mut nvs);
    }

    let (app, _) = boot(&nvs);
    assert_eq!(
        app.schedule(),
        &DoorSchedule {
            open_at: TimeOfDay::new(5, 45).unwrap(),
            close_at: TimeOfDay::new(21, 10).unwrap(),
        }
    );
}

#[test]
fn erased_state_record_boots_as_unknown() {
    let mut nvs = MockNvs::new();
    nvs.write(NAMESPACE, KEY_STATE, &[0xFF]).unwrap();

    let (app, _) = boot(&nvs);
    assert_eq!(app.state(), MotionState::Closing);
}

#[test]
fn storage_failure_does_not_stop_the_door() {
    let mut nvs = MockNvs::new();
    nvs.fail_writes = true;
    let mut sink = LogSink::new();

    let (mut app, clock) = boot(&nvs);
    assert!(!app.persist_if_needed(&mut nvs));
    assert!(!app.is_dirty());

    clock.set(15_000);
    app.tick(15_000, &mut sink);
    assert_eq!(app.state(), MotionState::Closed);
    assert!(app.is_dirty());

    nvs.fail_writes = false;
    assert!(app.persist_if_needed(&mut nvs));
    assert_eq!(persist::load_state(&nvs), Some(MotionState::Closed));
}
