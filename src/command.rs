//! Controller command bytes
//!
//! Command definitions for the UC1701 and the SSD1306/SH1106 family. All
//! three controllers address their RAM the same way: a page-select byte with
//! the page index in the low nibble, followed by the column address split
//! into two nibble commands. The write pointer then auto-increments along
//! the page for each data byte.
//!
//! Several byte values are reused across the two families with different
//! meanings; family-specific constants carry a `UC1701_` or `SSD1306_`
//! prefix, shared ones do not.
//!
//! ## Example
//!
//! ```
//! use uc1701::command;
//!
//! // Address page 3, column 0x5A.
//! assert_eq!(command::position(3, 0x5A), [0xB3, 0x15, 0x0A]);
//! ```

// Shared addressing and display-state commands

/// Page address select (0xB0); OR the page index into the low nibble.
pub const SET_PAGE: u8 = 0xB0;

/// Column address, upper nibble (0x10); OR in bits 7..4 of the column.
pub const SET_COLUMN_MSB: u8 = 0x10;

/// Column address, lower nibble (0x00); OR in bits 3..0 of the column.
pub const SET_COLUMN_LSB: u8 = 0x00;

/// Set display RAM start line to 0 (0x40).
pub const SET_START_LINE: u8 = 0x40;

/// Contrast / electronic volume (0x81); one value byte follows.
pub const SET_CONTRAST: u8 = 0x81;

/// Show RAM contents (0xA4). On the UC1701 this ends the all-pixels-on
/// state; on the SSD1306 it routes RAM to the panel.
pub const DISPLAY_FROM_RAM: u8 = 0xA4;

/// Force every pixel on regardless of RAM (0xA5).
pub const ALL_PIXELS_ON: u8 = 0xA5;

/// Normal pixel polarity (0xA6).
pub const DISPLAY_NORMAL: u8 = 0xA6;

/// Inverted pixel polarity (0xA7).
pub const DISPLAY_INVERT: u8 = 0xA7;

/// Display off / sleep (0xAE).
pub const DISPLAY_OFF: u8 = 0xAE;

/// Display on (0xAF).
pub const DISPLAY_ON: u8 = 0xAF;

// UC1701 commands

/// Software system reset (0xE2).
pub const UC1701_SYSTEM_RESET: u8 = 0xE2;

/// SEG output direction, normal (0xA0).
pub const UC1701_SEG_NORMAL: u8 = 0xA0;

/// COM output direction, reversed (0xC8).
pub const UC1701_COM_REVERSE: u8 = 0xC8;

/// LCD bias 1/9 (0xA2).
pub const UC1701_BIAS_NINTH: u8 = 0xA2;

/// Booster on (0x2C).
pub const UC1701_BOOSTER_ON: u8 = 0x2C;

/// Voltage regulator on (0x2E).
pub const UC1701_REGULATOR_ON: u8 = 0x2E;

/// Voltage follower on (0x2F).
pub const UC1701_FOLLOWER_ON: u8 = 0x2F;

/// Booster ratio select (0xF8); one value byte follows.
pub const UC1701_BOOSTER_RATIO: u8 = 0xF8;

/// Booster ratio value for 4x (0x00).
pub const UC1701_BOOSTER_RATIO_4X: u8 = 0x00;

/// Regulation resistor ratio 3 (0x20 | 3).
pub const UC1701_RESISTOR_RATIO: u8 = 0x23;

/// Static indicator off (0xAC); one value byte follows.
pub const UC1701_STATIC_INDICATOR_OFF: u8 = 0xAC;

/// No operation (0x00); used as the static-indicator value byte.
pub const UC1701_NOP: u8 = 0x00;

// SSD1306 / SH1106 commands

/// Oscillator frequency and clock divide (0xD5); one value byte follows.
pub const SSD1306_CLOCK_DIVIDE: u8 = 0xD5;

/// Multiplex ratio (0xA8); one value byte follows.
pub const SSD1306_MULTIPLEX_RATIO: u8 = 0xA8;

/// Vertical display offset (0xD3); one value byte follows.
pub const SSD1306_DISPLAY_OFFSET: u8 = 0xD3;

/// Charge pump setting (0x8D); 0x14 enables the internal pump.
pub const SSD1306_CHARGE_PUMP: u8 = 0x8D;

/// Memory addressing mode (0x20); 0x02 selects page addressing.
pub const SSD1306_MEMORY_MODE: u8 = 0x20;

/// Segment remap, column 127 to SEG0 (0xA1).
pub const SSD1306_SEG_REMAP: u8 = 0xA1;

/// COM scan direction, remapped (0xC8).
pub const SSD1306_COM_SCAN_DEC: u8 = 0xC8;

/// COM pins hardware configuration (0xDA); one value byte follows.
pub const SSD1306_COM_PINS: u8 = 0xDA;

/// Pre-charge period (0xD9); one value byte follows.
pub const SSD1306_PRECHARGE: u8 = 0xD9;

/// VCOMH deselect level (0xDB); one value byte follows.
pub const SSD1306_VCOMH_DESELECT: u8 = 0xDB;

/// Deactivate scrolling (0x2E).
pub const SSD1306_DEACTIVATE_SCROLL: u8 = 0x2E;

/// Encode the write position for a page and column.
///
/// Returns the three command bytes that point the controller's write pointer
/// at `(page, column)`; data bytes sent afterwards land there and
/// auto-increment along the page.
pub fn position(page: u8, column: u8) -> [u8; 3] {
    [
        SET_PAGE | (page & 0x0F),
        SET_COLUMN_MSB | ((column >> 4) & 0x0F),
        SET_COLUMN_LSB | (column & 0x0F),
    ]
}
