//! # Scrolling sensor messages on a Raspberry Pi Sense HAT
//!
//! The [Sense HAT](https://www.raspberrypi.org/products/sense-hat/) is a
//! sensor board for the Raspberry Pi with an 8x8 LED matrix. This crate
//! reads the ambient temperature and pressure from the board and scrolls a
//! one-line greeting across the matrix, once, then exits.
//!
//! The hardware sits behind the [`SenseBoard`] trait so the pipeline can be
//! driven against a fake board in tests. [`MessageDisplay`] owns the board
//! and the [`DisplayConfig`] and provides the end-to-end [`MessageDisplay::run`].

mod colour;
mod hat;
mod hts221;
mod lps25h;
pub mod scroll;

pub use crate::colour::Colour;
pub use crate::hat::SenseHat;
pub use measurements::Pressure;
pub use measurements::Temperature;

use chrono::Local;
use i2cdev::linux::LinuxI2CError;
use log::{debug, info};
use sensehat_screen::framebuffer::FramebufferError;
use std::fmt;

pub const LED_HEIGHT: u8 = 8;
pub const LED_WIDTH: u8 = 8;
pub const LED_NUM_PIXELS: usize = LED_HEIGHT as usize * LED_WIDTH as usize;

/// Errors from the hardware layer (chips or framebuffer).
#[derive(Debug)]
pub enum BoardError {
    /// A chip had no fresh sample in its status register.
    NotReady,
    I2c(LinuxI2CError),
    Framebuffer(FramebufferError),
}

/// Errors from the display pipeline, one per stage. All are fatal for this
/// single-run program; none is retried.
#[derive(Debug)]
pub enum DisplayError {
    /// The hardware handle could not be acquired at startup.
    HardwareUnavailable(BoardError),
    /// A sensor query failed.
    SensorRead(BoardError),
    /// The LED matrix failed while rendering.
    DisplayRender(BoardError),
}

/// A shortcut for Results that can return `T` or `DisplayError`.
pub type DisplayResult<T> = Result<T, DisplayError>;

impl From<LinuxI2CError> for BoardError {
    fn from(err: LinuxI2CError) -> BoardError {
        BoardError::I2c(err)
    }
}

impl From<FramebufferError> for BoardError {
    fn from(err: FramebufferError) -> BoardError {
        BoardError::Framebuffer(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoardError::NotReady => write!(f, "sensor has no fresh sample"),
            BoardError::I2c(e) => write!(f, "I2C error: {:?}", e),
            BoardError::Framebuffer(e) => write!(f, "framebuffer error: {:?}", e),
        }
    }
}

impl std::error::Error for BoardError {}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DisplayError::HardwareUnavailable(e) => write!(f, "hardware unavailable: {}", e),
            DisplayError::SensorRead(e) => write!(f, "sensor read failed: {}", e),
            DisplayError::DisplayRender(e) => write!(f, "display render failed: {}", e),
        }
    }
}

impl std::error::Error for DisplayError {}

/// The Sense HAT operations this crate needs. Implemented by the real
/// [`SenseHat`] and by recording fakes in tests.
pub trait SenseBoard {
    /// Current ambient temperature.
    fn get_temperature(&mut self) -> Result<Temperature, BoardError>;
    /// Current barometric pressure.
    fn get_pressure(&mut self) -> Result<Pressure, BoardError>;
    /// Blank the LED matrix.
    fn clear(&mut self) -> Result<(), BoardError>;
    /// Scroll `message` across the matrix at `scroll_speed` seconds per
    /// column. Blocks until the animation completes.
    fn show_message(
        &mut self,
        message: &str,
        scroll_speed: f32,
        text: Colour,
        background: Colour,
    ) -> Result<(), BoardError>;
}

/// How the message is addressed and drawn. Built once at startup and owned
/// by the [`MessageDisplay`] for the life of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Name greeted at the start of the message.
    pub operator_name: String,
    /// Seconds the display pauses per column of scroll. Positive.
    pub scroll_speed: f32,
    pub text_colour: Colour,
    pub background_colour: Colour,
}

impl Default for DisplayConfig {
    fn default() -> DisplayConfig {
        DisplayConfig {
            operator_name: "Andy".to_string(),
            scroll_speed: 0.05,
            text_colour: Colour::WHITE,
            background_colour: Colour::BLACK,
        }
    }
}

/// One sensor sample, taken at `timestamp` and consumed immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    /// Local wall-clock time of the read, `HH:MM:SS`.
    pub timestamp: String,
    pub temperature: Temperature,
    pub pressure: Pressure,
}

/// Format the scroll message for a reading. Pure; one decimal place for
/// both values (Rust's `{:.1}`, round-to-nearest).
pub fn format_message(reading: &SensorReading, config: &DisplayConfig) -> String {
    format!(
        "Hello {}! At {} the temperature is {:.1}C and the pressure is {:.1}hPa",
        config.operator_name,
        reading.timestamp,
        reading.temperature.as_celsius(),
        reading.pressure.as_hectopascals(),
    )
}

/// Reads the sensors once and scrolls the result across the LED matrix.
pub struct MessageDisplay<B> {
    board: B,
    config: DisplayConfig,
}

impl MessageDisplay<SenseHat> {
    /// Acquire the physical Sense HAT. Fails with
    /// [`DisplayError::HardwareUnavailable`] when the board is absent or
    /// the driver cannot open it; that is fatal for this program.
    pub fn new(config: DisplayConfig) -> DisplayResult<MessageDisplay<SenseHat>> {
        let board = SenseHat::new().map_err(DisplayError::HardwareUnavailable)?;
        Ok(MessageDisplay::with_board(board, config))
    }
}

impl<B: SenseBoard> MessageDisplay<B> {
    /// Wrap an already-acquired board. This is the seam tests use to
    /// substitute a recording fake for the hardware.
    pub fn with_board(board: B, config: DisplayConfig) -> MessageDisplay<B> {
        MessageDisplay { board, config }
    }

    /// The configuration this display was built with.
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// The underlying board handle.
    pub fn board(&self) -> &B {
        &self.board
    }

    /// Take one sample: wall-clock time at the moment of the call, then
    /// temperature and pressure straight from the board, unsmoothed.
    pub fn read_sensors(&mut self) -> DisplayResult<SensorReading> {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        let temperature = self
            .board
            .get_temperature()
            .map_err(DisplayError::SensorRead)?;
        let pressure = self.board.get_pressure().map_err(DisplayError::SensorRead)?;
        debug!("read {} / {} at {}", temperature, pressure, timestamp);
        Ok(SensorReading {
            timestamp,
            temperature,
            pressure,
        })
    }

    /// Clear the matrix, scroll `message` across it, clear again. Blocks
    /// until the scroll finishes; there is no cancellation.
    pub fn render(&mut self, message: &str) -> DisplayResult<()> {
        self.board.clear().map_err(DisplayError::DisplayRender)?;
        self.board
            .show_message(
                message,
                self.config.scroll_speed,
                self.config.text_colour,
                self.config.background_colour,
            )
            .map_err(DisplayError::DisplayRender)?;
        self.board.clear().map_err(DisplayError::DisplayRender)
    }

    /// The whole pipeline: read, format, render.
    pub fn run(&mut self) -> DisplayResult<()> {
        let reading = self.read_sensors()?;
        let message = format_message(&reading, &self.config);
        info!("displaying: {}", message);
        self.render(&message)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear,
        ShowMessage {
            message: String,
            scroll_speed: f32,
            text: Colour,
            background: Colour,
        },
    }

    /// A fake board that records every call and serves canned readings.
    struct RecordingBoard {
        calls: Vec<Call>,
        temperature: f64,
        pressure: f64,
        fail_temperature: bool,
    }

    impl RecordingBoard {
        fn new(temperature: f64, pressure: f64) -> RecordingBoard {
            RecordingBoard {
                calls: Vec::new(),
                temperature,
                pressure,
                fail_temperature: false,
            }
        }
    }

    impl SenseBoard for RecordingBoard {
        fn get_temperature(&mut self) -> Result<Temperature, BoardError> {
            if self.fail_temperature {
                Err(BoardError::NotReady)
            } else {
                Ok(Temperature::from_celsius(self.temperature))
            }
        }

        fn get_pressure(&mut self) -> Result<Pressure, BoardError> {
            Ok(Pressure::from_hectopascals(self.pressure))
        }

        fn clear(&mut self) -> Result<(), BoardError> {
            self.calls.push(Call::Clear);
            Ok(())
        }

        fn show_message(
            &mut self,
            message: &str,
            scroll_speed: f32,
            text: Colour,
            background: Colour,
        ) -> Result<(), BoardError> {
            self.calls.push(Call::ShowMessage {
                message: message.to_string(),
                scroll_speed,
                text,
                background,
            });
            Ok(())
        }
    }

    fn reference_reading() -> SensorReading {
        SensorReading {
            timestamp: "14:30:05".to_string(),
            temperature: Temperature::from_celsius(21.456),
            pressure: Pressure::from_hectopascals(1013.26),
        }
    }

    #[test]
    fn default_config() {
        let board = RecordingBoard::new(20.0, 1000.0);
        let display = MessageDisplay::with_board(board, DisplayConfig::default());
        let config = display.config();
        assert_eq!(config.operator_name, "Andy");
        assert_eq!(config.scroll_speed, 0.05);
        assert_eq!(config.text_colour, Colour::new(255, 255, 255));
        assert_eq!(config.background_colour, Colour::new(0, 0, 0));
    }

    #[test]
    fn formats_reference_reading() {
        let message = format_message(&reference_reading(), &DisplayConfig::default());
        assert_eq!(
            message,
            "Hello Andy! At 14:30:05 the temperature is 21.5C and the pressure is 1013.3hPa"
        );
    }

    #[test]
    fn operator_name_appears_verbatim() {
        let config = DisplayConfig {
            operator_name: "Grace H.".to_string(),
            ..DisplayConfig::default()
        };
        let message = format_message(&reference_reading(), &config);
        assert!(message.starts_with("Hello Grace H.! "));
    }

    #[test]
    fn always_one_decimal_place() {
        let reading = SensorReading {
            timestamp: "00:00:00".to_string(),
            temperature: Temperature::from_celsius(0.0),
            pressure: Pressure::from_hectopascals(-5.97),
        };
        let message = format_message(&reading, &DisplayConfig::default());
        assert!(message.contains("the temperature is 0.0C"));
        assert!(message.contains("the pressure is -6.0hPa"));
    }

    #[test]
    fn format_is_pure() {
        let reading = reference_reading();
        let config = DisplayConfig::default();
        assert_eq!(
            format_message(&reading, &config),
            format_message(&reading, &config)
        );
    }

    #[test]
    fn render_clears_before_and_after() {
        let board = RecordingBoard::new(20.0, 1000.0);
        let mut display = MessageDisplay::with_board(board, DisplayConfig::default());
        display.render("hi").unwrap();
        assert_eq!(display.board().calls.len(), 3);
        assert_eq!(display.board().calls[0], Call::Clear);
        assert_eq!(display.board().calls[2], Call::Clear);
        match &display.board().calls[1] {
            Call::ShowMessage { message, .. } => assert_eq!(message, "hi"),
            other => panic!("expected show_message, got {:?}", other),
        }
    }

    #[test]
    fn render_passes_config_through() {
        let config = DisplayConfig {
            operator_name: "Ada".to_string(),
            scroll_speed: 0.2,
            text_colour: Colour::new(0, 255, 0),
            background_colour: Colour::new(0, 0, 64),
        };
        let board = RecordingBoard::new(20.0, 1000.0);
        let mut display = MessageDisplay::with_board(board, config);
        display.render("x").unwrap();
        assert_eq!(
            display.board().calls[1],
            Call::ShowMessage {
                message: "x".to_string(),
                scroll_speed: 0.2,
                text: Colour::new(0, 255, 0),
                background: Colour::new(0, 0, 64),
            }
        );
    }

    #[test]
    fn run_scrolls_formatted_message() {
        let board = RecordingBoard::new(20.0, 1000.0);
        let mut display = MessageDisplay::with_board(board, DisplayConfig::default());
        display.run().unwrap();
        match &display.board().calls[1] {
            Call::ShowMessage { message, .. } => {
                assert!(message.starts_with("Hello Andy! At "));
                assert!(
                    message.ends_with("the temperature is 20.0C and the pressure is 1000.0hPa")
                );
            }
            other => panic!("expected show_message, got {:?}", other),
        }
    }

    #[test]
    fn sensor_failure_propagates_and_skips_display() {
        let mut board = RecordingBoard::new(20.0, 1000.0);
        board.fail_temperature = true;
        let mut display = MessageDisplay::with_board(board, DisplayConfig::default());
        let err = display.run().unwrap_err();
        assert!(matches!(err, DisplayError::SensorRead(BoardError::NotReady)));
        assert!(display.board().calls.is_empty());
    }

    #[test]
    fn reading_is_fresh_per_call() {
        let board = RecordingBoard::new(21.456, 1013.26);
        let mut display = MessageDisplay::with_board(board, DisplayConfig::default());
        let reading = display.read_sensors().unwrap();
        assert_eq!(reading.timestamp.len(), 8);
        assert_eq!(
            format!("{:.1}", reading.temperature.as_celsius()),
            "21.5"
        );
        assert_eq!(
            format!("{:.1}", reading.pressure.as_hectopascals()),
            "1013.3"
        );
    }
}

// End of file
