//! Console input
//!
//! Reading a line blocks, but the beam must keep tracing while the user types.
//! A reader thread owns the blocking side and hands complete lines to the main
//! loop over a channel, which the loop drains between frames.

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use anyhow::Result;
use log::{info, warn};

pub mod commands;
pub mod types;
pub use commands::{Command, Session, Shell};
pub use types::*;

/// Lines queued between frames before the reader thread waits
const QUEUE_DEPTH: usize = 16;

/// Console line source fed by a reader thread
pub struct Console {
    lines: Receiver<String>,
    closed: bool,
}

impl Console {
    /// Start reading lines from `reader` on a new thread
    pub fn spawn<R>(reader: R) -> Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (tx, lines) = mpsc::sync_channel(QUEUE_DEPTH);

        thread::Builder::new()
            .name("console".into())
            .spawn(move || {
                for line in reader.lines() {
                    let line = match line {
                        Ok(line) => line,
                        Err(e) => {
                            warn!("Console read failed: {}", e);
                            break;
                        }
                    };
                    let line = truncate_line(&line).to_string();
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                info!("Console input closed");
            })?;

        Ok(Self {
            lines,
            closed: false,
        })
    }

    /// Next complete line, without blocking
    pub fn check_line(&mut self) -> Option<String> {
        match self.lines.try_recv() {
            Ok(line) => Some(line),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.closed = true;
                None
            }
        }
    }

    /// Whether the input side has gone away for good
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
