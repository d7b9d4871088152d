//! ESP32-S3 board support
//!
//! GPIO numbers follow [`Pins`]; the typed pins below must stay in step with
//! that table.

use std::ptr;

use anyhow::{anyhow, Result};
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::{AnyOutputPin, Output, OutputPin, PinDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};
use esp_idf_svc::sys::{esp, esp_vfs_dev_uart_use_driver, uart_driver_install};
use log::info;

use crate::dac::ladder::LadderDac;
use crate::dac::pins::Pins;
use crate::storage::Storage;

pub type OutputDriver = PinDriver<'static, AnyOutputPin, Output>;

/// Both ladders on plain GPIO outputs
pub type Ladder = LadderDac<OutputDriver, { Pins::BITS }>;

/// Peripherals the firmware owns after boot
pub struct Board {
    pub ladder: Ladder,
    pub power_led: OutputDriver,
    pub nvs: EspDefaultNvsPartition,
}

fn output(pin: impl OutputPin) -> Result<OutputDriver> {
    Ok(PinDriver::output(pin.downgrade_output())?)
}

impl Board {
    pub fn take() -> Result<Self> {
        let peripherals = Peripherals::take()?;
        let pins = peripherals.pins;

        let x = [
            output(pins.gpio4)?, // Pins::X[0], LSB
            output(pins.gpio5)?,
            output(pins.gpio6)?,
            output(pins.gpio7)?,
            output(pins.gpio8)?,
            output(pins.gpio9)?, // Pins::X[5], MSB
        ];
        let y = [
            output(pins.gpio13)?, // Pins::Y[0], LSB
            output(pins.gpio14)?,
            output(pins.gpio15)?,
            output(pins.gpio16)?,
            output(pins.gpio17)?,
            output(pins.gpio18)?, // Pins::Y[5], MSB
        ];
        let mut ladder = LadderDac::new(x, y);
        ladder
            .park()
            .map_err(|e| anyhow!("Failed to park the beam: {:?}", e))?;

        let mut power_led = output(pins.gpio41)?; // Pins::PIN_POWER_LED
        power_led.set_high()?;
        info!("Ladder on GPIO {:?} / {:?}", Pins::X, Pins::Y);

        Ok(Board {
            ladder,
            power_led,
            nvs: EspDefaultNvsPartition::take()?,
        })
    }
}

const NAMESPACE: &str = "xyscope";
const BITMAP_KEY: &str = "bitmap";

/// Bitmap dump kept in the default NVS partition
pub struct NvsStorage {
    nvs: EspNvs<NvsDefault>,
}

impl NvsStorage {
    pub fn new(partition: EspDefaultNvsPartition) -> Result<Self> {
        Ok(NvsStorage {
            nvs: EspNvs::new(partition, NAMESPACE, true)?,
        })
    }
}

impl Storage for NvsStorage {
    fn save(&mut self, data: &[u8]) -> Result<()> {
        self.nvs.set_blob(BITMAP_KEY, data)?;
        Ok(())
    }

    fn load(&mut self, buf: &mut [u8]) -> Result<Option<usize>> {
        Ok(self.nvs.get_blob(BITMAP_KEY, buf)?.map(|blob| blob.len()))
    }
}

/// Make stdin block on the console UART so the reader thread can wait for
/// whole lines
pub fn install_console() -> Result<()> {
    const UART: i32 = 0;
    const RX_BUFFER: i32 = 512;
    unsafe {
        esp!(uart_driver_install(UART, RX_BUFFER, 0, 0, ptr::null_mut(), 0))?;
        esp_vfs_dev_uart_use_driver(UART);
    }
    Ok(())
}

/// Give the idle task a tick so the task watchdog stays fed
pub fn yield_now() {
    FreeRtos::delay_ms(1);
}
