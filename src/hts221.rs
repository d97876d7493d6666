//! * Driver for the HTS221 humidity and temperature sensor
//! See `http://www.st.com/content/st_com/en/products/mems-and-sensors/humidity-sensors/hts221.html`
//!
//! Only the temperature side is used here; the raw reading is linearly
//! interpolated through the two factory calibration points stored on the
//! chip.

use byteorder::{ByteOrder, LittleEndian};
use i2cdev::core::I2CDevice;

const REG_AV_CONF: u8 = 0x10;
const REG_CTRL1: u8 = 0x20;
const REG_STATUS: u8 = 0x27;
const REG_TEMP_OUT_L: u8 = 0x2a;
const REG_T0_C_8: u8 = 0x32;
const REG_T1_C_8: u8 = 0x33;
const REG_T1_T0: u8 = 0x35;
const REG_T0_OUT: u8 = 0x3c;
const REG_T1_OUT: u8 = 0x3e;

/// Status register bit set when a fresh temperature sample is available.
pub const STATUS_TEMPERATURE_READY: u8 = 0x01;

/// Slope and intercept mapping raw counts to degrees Celsius.
struct Calibration {
    slope: f64,
    intercept: f64,
}

pub struct Hts221<T: I2CDevice + Sized> {
    i2cdev: T,
    temperature_cal: Calibration,
}

impl<T> Hts221<T>
where
    T: I2CDevice + Sized,
{
    /// Power up the sensor at 12.5 Hz and read its temperature calibration.
    /// Init sequence from https://github.com/RPi-Distro/RTIMULib
    pub fn new(mut i2cdev: T) -> Result<Hts221<T>, T::Error> {
        i2cdev.smbus_write_byte_data(REG_CTRL1, 0x87)?;
        i2cdev.smbus_write_byte_data(REG_AV_CONF, 0x1b)?;

        // The two calibration temperatures are 10-bit values in eighths of
        // a degree, with the top bits packed into T1/T0 MSB.
        let msb = i2cdev.smbus_read_byte_data(REG_T1_T0)?;
        let t0 = read_split_i16(&mut i2cdev, REG_T0_C_8, msb & 0x03)? / 8.0;
        let t1 = read_split_i16(&mut i2cdev, REG_T1_C_8, (msb & 0x0c) >> 2)? / 8.0;
        let t0_out = read_word(&mut i2cdev, REG_T0_OUT)?;
        let t1_out = read_word(&mut i2cdev, REG_T1_OUT)?;

        let slope = (t1 - t0) / (t1_out - t0_out);
        let temperature_cal = Calibration {
            slope,
            intercept: t0 - slope * t0_out,
        };

        Ok(Hts221 {
            i2cdev,
            temperature_cal,
        })
    }

    /// The chip's status bitfield; see `STATUS_TEMPERATURE_READY`.
    pub fn status(&mut self) -> Result<u8, T::Error> {
        self.i2cdev.smbus_read_byte_data(REG_STATUS)
    }

    /// Temperature in degrees Celsius, via the factory calibration.
    pub fn temperature_celsius(&mut self) -> Result<f64, T::Error> {
        let raw = read_word(&mut self.i2cdev, REG_TEMP_OUT_L)?;
        Ok(raw * self.temperature_cal.slope + self.temperature_cal.intercept)
    }
}

/// Read a little-endian 16-bit register pair as f64.
fn read_word<T: I2CDevice>(i2cdev: &mut T, low_reg: u8) -> Result<f64, T::Error> {
    let mut buf = [0u8; 2];
    buf[0] = i2cdev.smbus_read_byte_data(low_reg)?;
    buf[1] = i2cdev.smbus_read_byte_data(low_reg + 1)?;
    Ok(f64::from(LittleEndian::read_i16(&buf)))
}

/// Read an 8-bit register extended with high bits held elsewhere.
fn read_split_i16<T: I2CDevice>(i2cdev: &mut T, low_reg: u8, high: u8) -> Result<f64, T::Error> {
    let buf = [i2cdev.smbus_read_byte_data(low_reg)?, high];
    Ok(f64::from(LittleEndian::read_i16(&buf)))
}

// End of file
