//! Mock adapters for integration tests.
//!
//! Records every relay write so tests can assert on the full drive
//! history without touching real GPIO.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use coopdoor::app::events::AppEvent;
use coopdoor::app::ports::{
    ClockPort, DriveOutputPort, EventSink, LineId, StorageError, StoragePort,
};

pub const OPEN_LINE: LineId = 4;
pub const CLOSE_LINE: LineId = 5;

// ── MockLines ─────────────────────────────────────────────────

/// Relay-line recorder that also tracks the live level of both lines.
#[derive(Debug, Default)]
pub struct MockLines {
    pub writes: Vec<(LineId, bool)>,
    pub open: bool,
    pub close: bool,
    /// Set if both lines were ever active at the same instant.
    pub overlap_seen: bool,
}

#[allow(dead_code)]
impl MockLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn levels(&self) -> (bool, bool) {
        (self.open, self.close)
    }
}

impl DriveOutputPort for MockLines {
    fn write_line(&mut self, line: LineId, active: bool) {
        self.writes.push((line, active));
        match line {
            OPEN_LINE => self.open = active,
            CLOSE_LINE => self.close = active,
            other => panic!("write to unknown line {other}"),
        }
        self.overlap_seen |= self.open && self.close;
    }
}

// ── MockClock ─────────────────────────────────────────────────

/// Shared, manually advanced millisecond clock.
#[derive(Debug, Clone, Default)]
pub struct MockClock(Rc<Cell<u64>>);

#[allow(dead_code)]
impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, ms: u64) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: u64) -> u64 {
        let now = self.0.get() + ms;
        self.0.set(now);
        now
    }
}

impl ClockPort for MockClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

// ── MockNvs ───────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MockNvs {
    store: HashMap<String, Vec<u8>>,
    pub fail_writes: bool,
    pub writes: usize,
}

#[allow(dead_code)]
impl MockNvs {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(namespace: &str, key: &str) -> String {
        format!("{}::{}", namespace, key)
    }
}

impl StoragePort for MockNvs {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        let v = self
            .store
            .get(&Self::key(namespace, key))
            .ok_or(StorageError::NotFound)?;
        let n = v.len().min(buf.len());
        buf[..n].copy_from_slice(&v[..n]);
        Ok(n)
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::IoError);
        }
        self.writes += 1;
        self.store.insert(Self::key(namespace, key), data.to_vec());
        Ok(())
    }
}

// ── LogSink ───────────────────────────────────────────────────

/// Event sink that keeps every event for later inspection.
#[derive(Debug, Default)]
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transitions(&self) -> Vec<(coopdoor::actuator::MotionState, coopdoor::actuator::MotionState)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::StateChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn rejections(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::CommandRejected(_)))
            .count()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
