//! * Driver for the LPS25H barometer
//! See http://www.st.com/en/mems-and-sensors/lps25h.html

use byteorder::{ByteOrder, LittleEndian};
use i2cdev::core::I2CDevice;

const REG_RES_CONF: u8 = 0x10;
const REG_CTRL_REG_1: u8 = 0x20;
const REG_CTRL_REG_2: u8 = 0x21;
const REG_STATUS_REG: u8 = 0x27;
const REG_PRESS_OUT_XL: u8 = 0x28;
const REG_PRESS_OUT_L: u8 = 0x29;
const REG_PRESS_OUT_H: u8 = 0x2a;
const REG_FIFO_CTRL: u8 = 0x2e;

/// Status register bit set when a fresh pressure sample is available.
pub const STATUS_PRESSURE_READY: u8 = 0x02;

pub struct Lps25h<T: I2CDevice + Sized> {
    i2cdev: T,
}

impl<T> Lps25h<T>
where
    T: I2CDevice + Sized,
{
    /// Power up the barometer at 25 Hz with FIFO mean-of-32 averaging.
    /// Init sequence from https://github.com/RPi-Distro/RTIMULib
    pub fn new(mut i2cdev: T) -> Result<Lps25h<T>, T::Error> {
        i2cdev.smbus_write_byte_data(REG_CTRL_REG_1, 0xc4)?;
        i2cdev.smbus_write_byte_data(REG_RES_CONF, 0x05)?;
        i2cdev.smbus_write_byte_data(REG_FIFO_CTRL, 0xc0)?;
        i2cdev.smbus_write_byte_data(REG_CTRL_REG_2, 0x40)?;
        Ok(Lps25h { i2cdev })
    }

    /// The chip's status bitfield; see `STATUS_PRESSURE_READY`.
    pub fn status(&mut self) -> Result<u8, T::Error> {
        self.i2cdev.smbus_read_byte_data(REG_STATUS_REG)
    }

    /// Pressure in hectopascals.
    /// Pout(hPa) = PRESS_OUT / 4096
    pub fn pressure_hpa(&mut self) -> Result<f64, T::Error> {
        let mut buf = [0u8; 4];
        buf[0] = self.i2cdev.smbus_read_byte_data(REG_PRESS_OUT_XL)?;
        buf[1] = self.i2cdev.smbus_read_byte_data(REG_PRESS_OUT_L)?;
        buf[2] = self.i2cdev.smbus_read_byte_data(REG_PRESS_OUT_H)?;
        Ok(f64::from(LittleEndian::read_u32(&buf)) / 4096.0)
    }
}

// End of file
