//! Main loop state: output port, clock and console session
//!
//! The loop alternates between [`Engine::poll`], which runs any console lines
//! that arrived, and [`Engine::tick`], which traces one frame of the active
//! mode. Mode switches therefore always happen between frames.

use std::io::Write;

use anyhow::Result;

use crate::clock::Clock;
use crate::config::Config;
use crate::dac::{Dac, DisplayError, Port};
use crate::idle::{self, Frame, Mode, Shared};
use crate::input::{Console, Session, Shell};
use crate::storage::Storage;

pub struct Engine<D, C> {
    port: Port<D>,
    clock: C,
    shell: Shell,
    frames: u64,
}

impl<D: Dac, C: Clock> Engine<D, C> {
    pub fn new(dac: D, clock: C, storage: Box<dyn Storage>, config: &Config) -> Self {
        let shared = Shared::new(config.dac.resolution, config.seed);
        let mut session = Session::new(shared, storage);
        if config.attract_on_boot {
            session.install(idle::attract);
        }
        Engine {
            port: Port::new(dac, config.dac),
            clock,
            shell: Shell::new(session),
            frames: 0,
        }
    }

    /// Trace one frame of the active mode
    pub fn tick(&mut self) -> Result<(), DisplayError> {
        let now_ms = self.clock.now_ms();
        let session = self.shell.session_mut();
        let mut frame = Frame {
            out: &mut self.port,
            shared: &mut session.shared,
            now_ms,
        };
        let result = session.mode.tick(&mut frame);
        self.frames += 1;
        result
    }

    /// Run one console line, replies go to `out`
    pub fn execute(&mut self, line: &str, out: &mut dyn Write) -> Result<()> {
        self.shell.execute(line, out)
    }

    /// Run every line the console has queued, returns how many ran
    pub fn poll(&mut self, console: &mut Console, out: &mut dyn Write) -> Result<usize> {
        let mut count = 0;
        while let Some(line) = console.check_line() {
            self.execute(&line, out)?;
            if !self.shell.session().is_importing() {
                write!(out, "> ")?;
            }
            out.flush()?;
            count += 1;
        }
        Ok(count)
    }

    pub fn mode(&self) -> &Mode {
        &self.shell.session().mode
    }

    pub fn session(&self) -> &Session {
        self.shell.session()
    }

    pub fn port(&self) -> &Port<D> {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut Port<D> {
        &mut self.port
    }

    /// Frames traced since boot
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
