//! Console commands
//!
//! Each command is a name bound to a handler closure. Mode commands capture
//! the factory of the mode they install, one-shot commands act on the
//! [`Session`] directly.

use std::io::Write;

use anyhow::{Context, Result};
use embedded_graphics::mono_font::{ascii::FONT_6X10, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use log::{debug, info, warn};

use super::types::{Args, CommandLine};
use crate::idle::{self, lissajous::Lissajous, sines, Factory, Mode, Shared};
use crate::ihex::{self, Record};
use crate::scan::BITMAP_BYTES;
use crate::storage::Storage;

type Handler = Box<dyn Fn(&mut Session, &mut Args<'_>, &mut dyn Write) -> Result<()>>;

/// Named console command
pub struct Command {
    pub name: &'static str,
    pub help: &'static str,
    handler: Handler,
}

impl Command {
    pub fn new<F>(name: &'static str, help: &'static str, handler: F) -> Self
    where
        F: Fn(&mut Session, &mut Args<'_>, &mut dyn Write) -> Result<()> + 'static,
    {
        Command {
            name,
            help,
            handler: Box::new(handler),
        }
    }

    /// Command that installs a freshly built mode
    pub fn mode(name: &'static str, help: &'static str, factory: Factory) -> Self {
        Self::new(name, help, move |session, _, _| {
            session.install(factory);
            Ok(())
        })
    }

    pub fn run(&self, session: &mut Session, args: &mut Args<'_>, out: &mut dyn Write) -> Result<()> {
        (self.handler)(session, args, out)
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command").field("name", &self.name).finish()
    }
}

/// Everything commands may change: the active mode, shared buffers and
/// persistence
pub struct Session {
    pub shared: Shared,
    pub mode: Mode,
    storage: Box<dyn Storage>,
    /// Bytes received so far while an import is running
    import: Option<usize>,
}

impl Session {
    pub fn new(shared: Shared, storage: Box<dyn Storage>) -> Self {
        Session {
            shared,
            mode: Mode::Screen,
            storage,
            import: None,
        }
    }

    /// Replace the active mode with a fresh one from `factory`
    pub fn install(&mut self, factory: Factory) {
        let mode = factory(&mut self.shared);
        self.install_mode(mode);
    }

    /// Replace the active mode with one built by the caller
    pub fn install_mode(&mut self, mode: Mode) {
        self.mode = mode;
        info!("Mode: {}", self.mode.name());
    }

    pub fn is_importing(&self) -> bool {
        self.import.is_some()
    }

    /// Feed one line to a running import
    pub fn import_line(&mut self, line: &str, out: &mut dyn Write) -> Result<()> {
        let Some(received) = self.import else {
            return Ok(());
        };
        match ihex::decode(line) {
            Ok(Record::Data { address, bytes }) => {
                let landed = ihex::apply(self.shared.ram.as_bytes_mut(), address, &bytes);
                if landed < bytes.len() {
                    warn!("Dropped {} bytes past the bitmap", bytes.len() - landed);
                }
                self.import = Some(received + landed);
                Ok(())
            }
            Ok(Record::EndOfFile) => {
                self.import = None;
                writeln!(out, "Imported {} bytes", received)?;
                self.install(idle::bitmap);
                Ok(())
            }
            Err(e) => {
                self.import = None;
                writeln!(out, "Import aborted: {}", e)?;
                Err(e.context("Import aborted"))
            }
        }
    }
}

/// Every command the console understands, except `help` which the shell
/// answers itself
pub fn command_table() -> Vec<Command> {
    vec![
        Command::mode("attract", "rotate through the demo modes", idle::attract),
        // Text
        Command::mode("logo", "show the logo banner", idle::logo),
        Command::new("clear", "blank the text screen", |s, _, _| {
            s.shared.screen.clear();
            s.install(idle::screen);
            Ok(())
        }),
        Command::new("print", "print <message>: scroll in a line of text", |s, args, _| {
            let message = args.rest();
            s.shared.screen.scroll_and_append(message.as_bytes());
            s.install(idle::screen);
            Ok(())
        }),
        Command::mode("maze", "scroll an endless maze", idle::maze),
        // Vector
        Command::mode("circle", "largest circle on the canvas", idle::circle),
        Command::mode("cross", "both canvas diagonals", idle::cross),
        Command::mode("bounce", "ball bouncing in a box", idle::bounce),
        Command::mode("circum", "fading inscribed triangles", idle::circum),
        Command::new("sines", "sines [steps]: circle from a sine table", sines_cmd),
        Command::new("lissajous", "lissajous [x] [y] [delay]: custom figure", lissajous_cmd),
        Command::mode("lj11", "1:1 Lissajous figure", idle::lj11),
        Command::mode("lj12", "1:2 Lissajous figure", idle::lj12),
        Command::mode("lj56", "5:6 Lissajous figure", idle::lj56),
        Command::new("delay", "delay <ms>: Lissajous drift period, 0 is off", delay_cmd),
        // Bitmap
        Command::mode("doge", "load the Doge bitmap", idle::doge),
        Command::mode("pepe", "load the Pepe bitmap", idle::pepe),
        Command::new("fliph", "mirror the bitmap left to right", |s, _, _| {
            s.shared.ram.flip_horizontal();
            s.install(idle::bitmap);
            Ok(())
        }),
        Command::new("flipv", "mirror the bitmap top to bottom", |s, _, _| {
            s.shared.ram.flip_vertical();
            s.install(idle::bitmap);
            Ok(())
        }),
        Command::new("banner", "banner <text>: render text into the bitmap", banner_cmd),
        Command::new("export", "print the bitmap as Intel HEX", |s, _, out| {
            for record in ihex::encode(s.shared.ram.as_bytes()) {
                writeln!(out, "{}", record)?;
            }
            Ok(())
        }),
        Command::new("import", "read Intel HEX records into the bitmap", |s, _, out| {
            s.import = Some(0);
            writeln!(out, "Send Intel HEX records, end with {}", ihex::EOF_RECORD)?;
            Ok(())
        }),
        Command::new("save", "store the bitmap", |s, _, out| {
            s.storage
                .save(s.shared.ram.as_bytes())
                .context("Saving bitmap")?;
            writeln!(out, "Saved {} bytes", BITMAP_BYTES)?;
            Ok(())
        }),
        Command::new("load", "restore the stored bitmap", |s, _, out| {
            let mut buf = [0u8; BITMAP_BYTES];
            match s.storage.load(&mut buf).context("Loading bitmap")? {
                Some(len) => {
                    s.shared.ram.load(&buf[..len]);
                    writeln!(out, "Loaded {} bytes", len)?;
                    s.install(idle::bitmap);
                }
                None => writeln!(out, "No saved bitmap")?,
            }
            Ok(())
        }),
    ]
}

fn sines_cmd(s: &mut Session, args: &mut Args<'_>, out: &mut dyn Write) -> Result<()> {
    if let Some(steps) = args.next_parsed::<i64>() {
        let steps = steps.clamp(i64::from(sines::MIN_STEPS), i64::from(sines::MAX_STEPS)) as u8;
        s.shared.settings.sine_steps = steps;
        writeln!(out, "Using {} steps in sine table", steps)?;
    }
    s.install(idle::sines);
    Ok(())
}

fn lissajous_cmd(s: &mut Session, args: &mut Args<'_>, _: &mut dyn Write) -> Result<()> {
    let step_x: u8 = args.next_clamped(1);
    let step_y: u8 = args.next_clamped(1);
    let delay: u32 = args.next_clamped(s.shared.settings.drift_delay_ms);
    debug!("Lissajous {}:{} drift every {} ms", step_x, step_y, delay);
    s.install_mode(Mode::Lissajous(Lissajous::new(step_x, step_y, delay)));
    Ok(())
}

fn delay_cmd(s: &mut Session, args: &mut Args<'_>, out: &mut dyn Write) -> Result<()> {
    let delay: u32 = args.next_clamped(idle::lissajous::DEFAULT_DRIFT_MS);
    s.shared.settings.drift_delay_ms = delay;
    writeln!(out, "Drift delay {} ms", delay)?;
    Ok(())
}

fn banner_cmd(s: &mut Session, args: &mut Args<'_>, _: &mut dyn Write) -> Result<()> {
    let text = args.rest();
    let ram = &mut s.shared.ram;
    ram.clear();

    let character_style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let text_style = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();
    let center = ram.bounding_box().center();
    match Text::with_text_style(&text, center, character_style, text_style).draw(ram) {
        Ok(_) => {}
        Err(never) => match never {},
    }

    s.install(idle::bitmap);
    Ok(())
}

/// Command table plus the session it acts on
pub struct Shell {
    session: Session,
    commands: Vec<Command>,
}

impl Shell {
    pub fn new(session: Session) -> Self {
        Shell {
            session,
            commands: command_table(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Names of all commands, `help` last
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|c| c.name).chain(["help"])
    }

    /// Run one console line
    ///
    /// Failures are reported on `out` and logged, they never stop the loop.
    pub fn execute(&mut self, line: &str, out: &mut dyn Write) -> Result<()> {
        if self.session.is_importing() {
            if let Err(e) = self.session.import_line(line, out) {
                warn!("{:#}", e);
            }
            return Ok(());
        }

        let Some(mut command_line) = CommandLine::parse(line) else {
            return Ok(());
        };
        debug!("> {}", command_line);

        if command_line.name == "help" {
            for command in &self.commands {
                writeln!(out, "{:<10} {}", command.name, command.help)?;
            }
            writeln!(out, "{:<10} {}", "help", "list commands")?;
            return Ok(());
        }

        match self.commands.iter().find(|c| c.name == command_line.name) {
            Some(command) => {
                if let Err(e) = command.run(&mut self.session, &mut command_line.args, out) {
                    warn!("{}: {:#}", command.name, e);
                    writeln!(out, "Error: {:#}", e)?;
                }
            }
            None => writeln!(out, "Unknown command: {} (try help)", command_line.name)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn shell() -> Shell {
        Shell::new(Session::new(Shared::default(), Box::new(MemoryStorage::new())))
    }

    fn run(shell: &mut Shell, line: &str) -> String {
        let mut out = Vec::new();
        shell.execute(line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn mode_commands_install_modes() {
        let mut shell = shell();
        for (line, name) in [
            ("circle", "circle"),
            ("cross", "cross"),
            ("bounce", "bounce"),
            ("circum", "circum"),
            ("maze", "maze"),
            ("lj56", "lissajous"),
            ("doge", "bitmap"),
            ("logo", "screen"),
            ("attract", "attract"),
        ] {
            run(&mut shell, line);
            assert_eq!(shell.session().mode.name(), name, "{}", line);
        }
    }

    #[test]
    fn unknown_and_blank_lines() {
        let mut shell = shell();
        assert!(run(&mut shell, "warp 9").starts_with("Unknown command: warp"));
        assert_eq!(run(&mut shell, "   "), "");
        assert_eq!(shell.session().mode.name(), "screen");
    }

    #[test]
    fn help_lists_every_command() {
        let mut shell = shell();
        let text = run(&mut shell, "help");
        for name in shell.names() {
            assert!(text.lines().any(|l| l.starts_with(name)), "{}", name);
        }
    }

    #[test]
    fn print_and_clear_edit_the_screen() {
        let mut shell = shell();
        run(&mut shell, "print hello   there world");
        assert_eq!(shell.session().shared.screen.row(3), b"hello th");
        run(&mut shell, "print");
        assert_eq!(shell.session().shared.screen.row(2), b"hello th");
        assert_eq!(shell.session().shared.screen.row(3), b"");
        run(&mut shell, "clear");
        assert!(shell.session().shared.screen.rows().all(|r| r.is_empty()));
    }

    #[test]
    fn sines_clamps_and_remembers_steps() {
        let mut shell = shell();
        assert_eq!(run(&mut shell, "sines 1000"), "Using 240 steps in sine table\n");
        run(&mut shell, "sines 5");
        assert_eq!(shell.session().shared.settings.sine_steps, 32);
        run(&mut shell, "sines");
        match &shell.session().mode {
            Mode::Sines(sines) => assert_eq!(sines.steps(), 32),
            other => panic!("unexpected mode {:?}", other),
        }
    }

    #[test]
    fn lissajous_arguments_default() {
        let mut shell = shell();
        run(&mut shell, "delay 0");
        run(&mut shell, "lissajous 3 x");
        match &shell.session().mode {
            Mode::Lissajous(l) => assert_eq!(l.steps(), (3, 1)),
            other => panic!("unexpected mode {:?}", other),
        }
        assert_eq!(run(&mut shell, "delay"), format!("Drift delay {} ms\n", idle::lissajous::DEFAULT_DRIFT_MS));
    }

    #[test]
    fn out_of_range_arguments_clamp() {
        let mut shell = shell();
        run(&mut shell, "lissajous 300 2");
        match &shell.session().mode {
            Mode::Lissajous(l) => assert_eq!(l.steps(), (255, 2)),
            other => panic!("unexpected mode {:?}", other),
        }
        assert_eq!(run(&mut shell, "delay -5"), "Drift delay 0 ms\n");
        assert_eq!(shell.session().shared.settings.drift_delay_ms, 0);
        run(&mut shell, "delay 99999999999");
        assert_eq!(shell.session().shared.settings.drift_delay_ms, u32::MAX);
    }

    #[test]
    fn flips_act_on_ram() {
        let mut shell = shell();
        shell.session_mut().shared.ram.set(0, 0, true);
        run(&mut shell, "fliph");
        assert!(shell.session().shared.ram.get(63, 0));
        run(&mut shell, "flipv");
        assert!(shell.session().shared.ram.get(63, 63));
        assert_eq!(shell.session().mode.name(), "bitmap");
    }

    #[test]
    fn export_then_import_restores_the_bitmap() {
        let mut shell = shell();
        run(&mut shell, "doge");
        let exported = run(&mut shell, "export");
        let before = shell.session().shared.ram.clone();

        run(&mut shell, "circle");
        shell.session_mut().shared.ram.clear();
        run(&mut shell, "import");
        assert!(shell.session().is_importing());
        let mut last = String::new();
        for line in exported.lines() {
            last = run(&mut shell, line);
        }
        assert_eq!(last, format!("Imported {} bytes\n", BITMAP_BYTES));
        assert!(!shell.session().is_importing());
        assert_eq!(shell.session().shared.ram, before);
        assert_eq!(shell.session().mode.name(), "bitmap");
    }

    #[test]
    fn bad_record_aborts_import() {
        let mut shell = shell();
        run(&mut shell, "import");
        let reply = run(&mut shell, ":0300300002337A1F");
        assert!(reply.starts_with("Import aborted"));
        assert!(!shell.session().is_importing());
        // Back to normal command handling
        run(&mut shell, "circle");
        assert_eq!(shell.session().mode.name(), "circle");
    }

    #[test]
    fn save_and_load_round_trip() {
        let mut shell = shell();
        assert_eq!(run(&mut shell, "load"), "No saved bitmap\n");
        run(&mut shell, "pepe");
        let saved = shell.session().shared.ram.clone();
        run(&mut shell, "save");
        shell.session_mut().shared.ram.clear();
        run(&mut shell, "circle");
        run(&mut shell, "load");
        assert_eq!(shell.session().shared.ram, saved);
        assert_eq!(shell.session().mode.name(), "bitmap");
    }

    #[test]
    fn banner_draws_centred_text() {
        let mut shell = shell();
        run(&mut shell, "banner Hi");
        let ram = &shell.session().shared.ram;
        assert!(ram.as_bytes().iter().any(|&b| b != 0));
        assert!(ram.row(0).map_or(false, |r| r.iter().all(|&b| b == 0)));
        assert!((26..38).any(|y| (20..44).any(|x| ram.get(x, y))));
    }
}
