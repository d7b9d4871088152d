use std::io::{self, BufReader, Write};
use std::time::{Duration, Instant};

use xyscope::clock::SystemClock;
use xyscope::dac::Dac;
use xyscope::input::Console;
use xyscope::{Config, Engine};

/// Seconds between frame rate reports
const REPORT_EVERY: Duration = Duration::from_secs(5);

/// Trace frames and run console lines until the console closes
fn run<D: Dac>(
    engine: &mut Engine<D, SystemClock>,
    console: &mut Console,
    config: &Config,
    pause: fn(),
    mut report: impl FnMut(&mut Engine<D, SystemClock>, Duration),
) -> anyhow::Result<()> {
    let mut out = io::stdout();
    write!(out, "> ")?;
    out.flush()?;

    let mut since_yield = 0;
    let mut last_report = Instant::now();
    while !console.is_closed() {
        engine.poll(console, &mut out)?;

        if let Err(e) = engine.tick() {
            log::error!("Frame failed: {:?}", e);
        }

        since_yield += 1;
        if since_yield >= config.yield_every {
            since_yield = 0;
            pause();
        }

        let elapsed = last_report.elapsed();
        if elapsed >= REPORT_EVERY {
            report(engine, elapsed);
            last_report = Instant::now();
        }
    }
    log::info!("Console closed after {} frames", engine.frames());
    Ok(())
}

#[cfg(not(feature = "esp32"))]
fn main() -> anyhow::Result<()> {
    use xyscope::dac::trace::MeterDac;
    use xyscope::storage::FileStorage;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    log::info!("Saving bitmaps to {}", config.storage_path.display());
    let storage = FileStorage::new(config.storage_path.clone());
    let mut engine = Engine::new(MeterDac::new(), SystemClock::new(), Box::new(storage), &config);
    let mut console = Console::spawn(BufReader::new(io::stdin()))?;

    let mut frames = 0;
    run(
        &mut engine,
        &mut console,
        &config,
        || std::thread::sleep(Duration::from_millis(1)),
        |engine, elapsed| {
            let writes = engine.port_mut().inner_mut().take();
            let secs = elapsed.as_secs_f32();
            log::info!(
                "{:.0} frames/s, {:.0} writes/s in {}",
                (engine.frames() - frames) as f32 / secs,
                writes as f32 / secs,
                engine.mode().name()
            );
            frames = engine.frames();
        },
    )
}

// https://docs.esp-rs.org/esp-idf-svc/esp_idf_svc/
#[cfg(feature = "esp32")]
fn main() -> anyhow::Result<()> {
    use xyscope::esp::{self, Board, NvsStorage};

    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();

    let config = Config::default();
    let board = Board::take()?;
    let storage = NvsStorage::new(board.nvs)?;
    // Keep the power LED lit for as long as the loop runs
    let _power_led = board.power_led;

    let mut engine = Engine::new(board.ladder, SystemClock::new(), Box::new(storage), &config);
    esp::install_console()?;
    let mut console = Console::spawn(BufReader::new(io::stdin()))?;

    let mut frames = 0;
    run(&mut engine, &mut console, &config, esp::yield_now, |engine, elapsed| {
        log::info!(
            "{:.0} frames/s in {}",
            (engine.frames() - frames) as f32 / elapsed.as_secs_f32(),
            engine.mode().name()
        );
        frames = engine.frames();
    })
}
