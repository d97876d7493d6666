//! # Text-to-pixel rendering for the scroll animation
//!
//! A message becomes a horizontal strip of pixel columns, one byte per
//! column with bit `y` set when row `y` is lit. The animation is then just
//! an 8-column window sliding along the strip, one column per frame.

use crate::LED_WIDTH;
use font8x8::{UnicodeFonts, BASIC_FONTS};

/// Every glyph in the 8x8 font occupies a full character cell.
pub const COLUMNS_PER_GLYPH: usize = 8;

/// Glyph rows for `ch`, falling back to `?` for characters the basic font
/// doesn't cover.
fn glyph_rows(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// Transpose a glyph from row bytes (bit `x` = column) to column bytes
/// (bit `y` = row).
fn glyph_columns(ch: char) -> [u8; COLUMNS_PER_GLYPH] {
    let rows = glyph_rows(ch);
    let mut columns = [0u8; COLUMNS_PER_GLYPH];
    for (y, row) in rows.iter().enumerate() {
        for (x, column) in columns.iter_mut().enumerate() {
            if row & (1 << x) != 0 {
                *column |= 1 << y;
            }
        }
    }
    columns
}

/// Render a whole message to a column strip, with one blank screen-width of
/// padding on either side so the text scrolls fully on and fully off.
pub fn message_columns(message: &str) -> Vec<u8> {
    let blank = [0u8; LED_WIDTH as usize];
    let mut columns = Vec::with_capacity((message.len() + 2) * COLUMNS_PER_GLYPH);
    columns.extend_from_slice(&blank);
    for ch in message.chars() {
        columns.extend_from_slice(&glyph_columns(ch));
    }
    columns.extend_from_slice(&blank);
    columns
}

/// The screen-width window starting at `offset` columns into the strip.
/// Columns past the end of the strip read as blank.
pub fn frame_window(columns: &[u8], offset: usize) -> [u8; LED_WIDTH as usize] {
    let mut window = [0u8; LED_WIDTH as usize];
    for (x, slot) in window.iter_mut().enumerate() {
        if let Some(column) = columns.get(offset + x) {
            *slot = *column;
        }
    }
    window
}

/// Number of frames needed to slide the window across the whole strip.
pub fn frame_count(columns: &[u8]) -> usize {
    columns.len().saturating_sub(LED_WIDTH as usize) + 1
}


// End of file
