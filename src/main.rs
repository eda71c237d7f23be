//! Hutch door firmware: main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   LogEventSink   NvsAdapter   Esp32Time       │
//! │  (DriveOutput)     (EventSink)    (Config+NVS) (Clock, wall)   │
//! │  ConsoleAdapter    ButtonDriver   Watchdog                     │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              DoorService (pure logic)                  │    │
//! │  │  LinearActuator · DoorSchedule · Scheduler             │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use anyhow::Result;
use esp_idf_hal::gpio::{Pin, PinDriver, Pull};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::sntp::EspSntp;
use log::{info, warn};

use coopdoor::adapters::console::ConsoleAdapter;
use coopdoor::adapters::hardware::HardwareAdapter;
use coopdoor::adapters::log_sink::LogEventSink;
use coopdoor::adapters::nvs::NvsAdapter;
use coopdoor::adapters::time::Esp32TimeAdapter;
use coopdoor::app::commands::AppCommand;
use coopdoor::app::events::AppEvent;
use coopdoor::app::persist;
use coopdoor::app::ports::{ClockPort, ConfigPort, EventSink};
use coopdoor::app::service::DoorService;
use coopdoor::config::SystemConfig;
use coopdoor::drivers::button::{ButtonDriver, ButtonEvent};
use coopdoor::drivers::relay::RelayDriver;
use coopdoor::drivers::watchdog::Watchdog;
use coopdoor::pins;

const WATCHDOG_TIMEOUT_MS: u32 = 10_000;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  CoopDoor v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Load config, state and schedule from NVS ───────────
    let mut nvs = match NvsAdapter::new() {
        Ok(n) => n,
        Err(e) => {
            warn!("NVS init failed ({}), running with defaults and no persistence", e);
            NvsAdapter::default()
        }
    };
    let config = match nvs.load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("NVS config load failed ({}), using defaults", e);
            SystemConfig::default()
        }
    };
    let restored = persist::load_state(&nvs);
    let schedule = persist::load_schedule(&nvs).unwrap_or_default();

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let open_gpio = peripherals.pins.gpio4;
    let close_gpio = peripherals.pins.gpio5;
    let button_gpio = peripherals.pins.gpio6;
    anyhow::ensure!(
        open_gpio.pin() == pins::OPEN_RELAY_GPIO
            && close_gpio.pin() == pins::CLOSE_RELAY_GPIO
            && button_gpio.pin() == pins::BUTTON_GPIO,
        "GPIO peripherals do not match the pin map"
    );
    info!(
        "Pins: open relay GPIO{}, close relay GPIO{}, button GPIO{}",
        pins::OPEN_RELAY_GPIO,
        pins::CLOSE_RELAY_GPIO,
        pins::BUTTON_GPIO
    );

    let open_relay = RelayDriver::new(PinDriver::output(open_gpio)?);
    let close_relay = RelayDriver::new(PinDriver::output(close_gpio)?);
    let mut button_pin = PinDriver::input(button_gpio)?;
    button_pin.set_pull(Pull::Down)?;

    let hw = HardwareAdapter::new(
        pins::OPEN_RELAY_GPIO,
        open_relay,
        pins::CLOSE_RELAY_GPIO,
        close_relay,
    );
    let mut button = ButtonDriver::new(button_pin, config.button_debounce_ms);
    let clock = Esp32TimeAdapter::new();

    // Wall clock for the schedule; stays unsynced until a network is up.
    let _sntp = EspSntp::new_default()?;

    // ── 4. Construct app service ──────────────────────────────
    let mut log_sink = LogEventSink::new();
    let mut app = DoorService::new(
        &config,
        pins::OPEN_RELAY_GPIO,
        pins::CLOSE_RELAY_GPIO,
        restored,
        schedule,
        hw,
        clock,
    )?;
    app.actuator_mut().on_open(|| info!("Door reached its open limit"));
    app.actuator_mut().on_closed(|| info!("Door reached its closed limit"));
    app.start(&mut log_sink);

    let mut console = match ConsoleAdapter::spawn() {
        Ok(c) => Some(c),
        Err(e) => {
            warn!("Console reader not started: {}", e);
            None
        }
    };
    let mut watchdog = Watchdog::new(WATCHDOG_TIMEOUT_MS);

    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    let loop_interval = Duration::from_millis(u64::from(config.control_loop_interval_ms));
    let status_interval_ms = u64::from(config.status_interval_secs) * 1000;
    let mut last_status_ms = clock.now_ms();

    loop {
        let now_ms = clock.now_ms();

        if let Some(ButtonEvent::Press) = button.poll(now_ms) {
            info!("Button press, toggling door");
            app.handle_command(AppCommand::Toggle, &mut log_sink);
        }

        app.tick(now_ms, &mut log_sink);
        app.check_schedule(now_ms, clock.wall_time(config.utc_offset_minutes), &mut log_sink);

        if let Some(console) = console.as_mut() {
            while let Some(cmd) = console.poll() {
                let code = app.handle_remote(&cmd.function, &cmd.arg, &mut log_sink);
                println!("{} {} -> {}", cmd.function, cmd.arg, code);
            }
        }

        app.persist_if_needed(&mut nvs);

        if now_ms.saturating_sub(last_status_ms) >= status_interval_ms {
            last_status_ms = now_ms;
            log_sink.emit(&AppEvent::Status(app.status()));
        }

        watchdog.feed();
        std::thread::sleep(loop_interval);
    }
}
