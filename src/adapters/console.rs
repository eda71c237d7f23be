//! Serial console adapter.
//!
//! A reader thread pulls lines from stdin (the console UART on the
//! device) and hands them to the main loop over an `mpsc` channel.  Each
//! line is `<function> <argument>`, dispatched to the remote-function
//! endpoint of [`DoorService`](crate::app::service::DoorService).
//!
//! ```text
//!  UART ──▶ reader thread ──mpsc──▶ main loop ──▶ DoorService::handle_remote
//! ```

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::JoinHandle;

use log::{debug, info, warn};

use super::utils::is_printable_ascii;

/// Longest line accepted from the console.
pub const MAX_LINE_LEN: usize = 64;

const READER_STACK_SIZE: usize = 4096;

/// A console line split into function name and argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleCommand {
    pub function: String,
    pub arg: String,
}

/// Split `line` at the first run of whitespace.
///
/// Returns `None` for blank, over-long or non-printable lines.  A line
/// with no argument yields an empty `arg`.
pub fn parse_line(line: &str) -> Option<ConsoleCommand> {
    let line = line.trim();
    if line.is_empty() || line.len() > MAX_LINE_LEN || !is_printable_ascii(line) {
        return None;
    }
    let (function, arg) = match line.split_once(char::is_whitespace) {
        Some((f, a)) => (f, a.trim()),
        None => (line, ""),
    };
    Some(ConsoleCommand {
        function: function.to_string(),
        arg: arg.to_string(),
    })
}

/// Receiving end of the console reader thread.
pub struct ConsoleAdapter {
    rx: Receiver<ConsoleCommand>,
    _reader: Option<JoinHandle<()>>,
    closed: bool,
}

impl ConsoleAdapter {
    /// Spawn the stdin reader thread.
    pub fn spawn() -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let reader = std::thread::Builder::new()
            .name("console".into())
            .stack_size(READER_STACK_SIZE)
            .spawn(move || {
                let stdin = std::io::stdin();
                for line in stdin.lock().lines() {
                    let line = match line {
                        Ok(l) => l,
                        Err(e) => {
                            warn!("Console: read failed: {}", e);
                            continue;
                        }
                    };
                    match parse_line(&line) {
                        Some(cmd) => {
                            if tx.send(cmd).is_err() {
                                break;
                            }
                        }
                        None => debug!("Console: ignored line ({} bytes)", line.len()),
                    }
                }
                info!("Console: reader exiting");
            })?;
        info!("Console: reader thread started");
        Ok(Self {
            rx,
            _reader: Some(reader),
            closed: false,
        })
    }

    /// Adapter over an existing channel, for tests and alternate sources.
    pub fn from_receiver(rx: Receiver<ConsoleCommand>) -> Self {
        Self {
            rx,
            _reader: None,
            closed: false,
        }
    }

    /// Next pending command, if any.  Never blocks.
    pub fn poll(&mut self) -> Option<ConsoleCommand> {
        if self.closed {
            return None;
        }
        match self.rx.try_recv() {
            Ok(cmd) => Some(cmd),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                warn!("Console: input closed");
                self.closed = true;
                None
            }
        }
    }
}
