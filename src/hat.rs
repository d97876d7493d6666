//! # The physical Sense HAT
//!
//! Binds the [`SenseBoard`] interface to the real hardware: the HTS221 and
//! LPS25H chips on the Pi's I2C bus, and the LED matrix through its Linux
//! framebuffer device.

use crate::hts221::{Hts221, STATUS_TEMPERATURE_READY};
use crate::lps25h::{Lps25h, STATUS_PRESSURE_READY};
use crate::scroll;
use crate::{BoardError, Colour, SenseBoard, LED_HEIGHT, LED_NUM_PIXELS, LED_WIDTH};
use i2cdev::linux::LinuxI2CDevice;
use log::debug;
use measurements::{Pressure, Temperature};
use sensehat_screen::{FrameLine, PixelColor, Screen};
use std::thread;
use std::time::Duration;

const I2C_BUS: &str = "/dev/i2c-1";
const HTS221_ADDR: u16 = 0x5f;
const LPS25H_ADDR: u16 = 0x5c;
const FRAMEBUFFER: &str = "/dev/fb1";

/// Handle to the Sense HAT's sensors and LED matrix.
pub struct SenseHat {
    /// HTS221 humidity and temperature sensor
    humidity_chip: Hts221<LinuxI2CDevice>,
    /// LPS25H pressure sensor
    pressure_chip: Lps25h<LinuxI2CDevice>,
    /// Handle to the framebuffer
    screen: Screen,
}

impl SenseHat {
    /// Try and create a new SenseHat object.
    ///
    /// Will open the relevant I2C devices and then attempt to initialise
    /// the chips on the Sense HAT, then open the LED framebuffer.
    pub fn new() -> Result<SenseHat, BoardError> {
        Ok(SenseHat {
            humidity_chip: Hts221::new(LinuxI2CDevice::new(I2C_BUS, HTS221_ADDR)?)?,
            pressure_chip: Lps25h::new(LinuxI2CDevice::new(I2C_BUS, LPS25H_ADDR)?)?,
            screen: Screen::open(FRAMEBUFFER)?,
        })
    }

    /// Push an 8-column window of the scroll strip to the framebuffer.
    fn draw_window(&mut self, window: &[u8; LED_WIDTH as usize], text: PixelColor, background: PixelColor) {
        let mut pixels = [background; LED_NUM_PIXELS];
        for (x, column) in window.iter().enumerate() {
            for y in 0..LED_HEIGHT as usize {
                if column & (1 << y) != 0 {
                    pixels[x + y * LED_WIDTH as usize] = text;
                }
            }
        }
        self.screen.write_frame(&FrameLine::from_pixels(&pixels));
    }
}

impl SenseBoard for SenseHat {
    /// Temperature from the humidity sensor (+/- 0.5 degrees C).
    fn get_temperature(&mut self) -> Result<Temperature, BoardError> {
        let status = self.humidity_chip.status()?;
        if status & STATUS_TEMPERATURE_READY != 0 {
            let celsius = self.humidity_chip.temperature_celsius()?;
            Ok(Temperature::from_celsius(celsius))
        } else {
            Err(BoardError::NotReady)
        }
    }

    /// Pressure from the barometer.
    fn get_pressure(&mut self) -> Result<Pressure, BoardError> {
        let status = self.pressure_chip.status()?;
        if status & STATUS_PRESSURE_READY != 0 {
            let hpa = self.pressure_chip.pressure_hpa()?;
            Ok(Pressure::from_hectopascals(hpa))
        } else {
            Err(BoardError::NotReady)
        }
    }

    fn clear(&mut self) -> Result<(), BoardError> {
        let pixels = [PixelColor::from(Colour::BLACK); LED_NUM_PIXELS];
        self.screen.write_frame(&FrameLine::from_pixels(&pixels));
        Ok(())
    }

    /// Scroll a message across the screen. Blocks until completion.
    fn show_message(
        &mut self,
        message: &str,
        scroll_speed: f32,
        text: Colour,
        background: Colour,
    ) -> Result<(), BoardError> {
        let columns = scroll::message_columns(message);
        let frames = scroll::frame_count(&columns);
        // NaN or negative speed degrades to a zero pause rather than a panic.
        let pause = Duration::from_secs_f32(scroll_speed.max(0.0));
        debug!(
            "scrolling {} frames at {:?} per column, {} on {}",
            frames, pause, text, background
        );
        for offset in 0..frames {
            let window = scroll::frame_window(&columns, offset);
            self.draw_window(&window, text.into(), background.into());
            thread::sleep(pause);
        }
        Ok(())
    }
}

// End of file
