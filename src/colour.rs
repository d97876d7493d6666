//! # An RGB colour for the LED matrix
//!
//! Channel values are `u8`, so the 0-255 range holds by construction.

use sensehat_screen::PixelColor;
use std::fmt;

/// A 24-bit RGB colour.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Colour {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Colour {
    pub const BLACK: Colour = Colour::new(0, 0, 0);
    pub const WHITE: Colour = Colour::new(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Colour {
        Colour { red, green, blue }
    }

    /// Look up a CSS colour name, e.g. `"white"` or `"rebeccapurple"`.
    pub fn from_name(name: &str) -> Option<Colour> {
        tint::Color::name(name).map(|c| {
            let (red, green, blue) = c.to_rgb255();
            Colour { red, green, blue }
        })
    }
}

impl From<(u8, u8, u8)> for Colour {
    fn from((red, green, blue): (u8, u8, u8)) -> Colour {
        Colour { red, green, blue }
    }
}

impl From<Colour> for PixelColor {
    fn from(c: Colour) -> PixelColor {
        PixelColor::new(c.red, c.green, c.blue)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}


// End of file
