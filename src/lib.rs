//! UC1701 / SSD1306 / SH1106 Display Driver
//!
//! A framebuffer driver for small monochrome page-addressed panels (128x64
//! LCDs and OLEDs) that transmits only what changed: every flush diffs the
//! in-memory image against the last-sent snapshot and sends the minimal
//! merged byte ranges, so a clock update costs a handful of bytes instead
//! of a kilobyte.
//!
//! ## Features
//!
//! - `no_std` compatible (requires `alloc`)
//! - `embedded-hal` v1.0 SPI ("4-wire") and I2C transports
//! - Differential flushing with run merging tuned for these controllers
//! - 8x16 text cells from a bundled (or caller-supplied) 256-glyph font
//! - XOR graphics tiles for overlays and named 16x16 icons
//! - `embedded-graphics` integration (with `graphics` feature)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use uc1701::{Builder, Chip, Display, DisplayInterface};
//! # use core::convert::Infallible;
//! # struct MockBus;
//! # impl DisplayInterface for MockBus {
//! #     type Error = Infallible;
//! #     fn send_commands(&mut self, _cmds: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn send_data(&mut self, _data: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl embedded_hal::delay::DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! let config = match Builder::new().chip(Chip::Ssd1306).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let mut display = Display::new(MockBus, config);
//! let mut delay = MockDelay;
//! if display.init(&mut delay).is_err() {
//!     return;
//! }
//!
//! display.write_text(0, 0, b"Heater: 204");
//! display.write_glyph(11, 0, "degrees");
//! if let Err(err) = display.flush() {
//!     let _ = err;
//! }
//! ```
//!
//! Real hardware plugs in through [`Spi4Wire`] or [`I2cInterface`], or any
//! custom [`DisplayInterface`] implementation (for example a bridge that
//! queues writes toward a remote microcontroller).

#![no_std]

extern crate alloc;

/// Controller command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
mod diff;
/// Framebuffer state and differential flushing
pub mod display;
/// Error types for the driver
pub mod error;
/// Bundled font table and pseudo-glyph names
pub mod font;
mod glyphs;
/// Bus interface abstraction
pub mod interface;
/// Row-major to page-order bit transposition
pub mod swizzle;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use config::{Builder, Chip, Config, PAGES};
pub use display::Display;
pub use error::{BuilderError, Error};
pub use font::{FONT_8X16, GlyphRows, TEXT_GLYPHS};
pub use interface::{
    DEFAULT_I2C_ADDRESS, DisplayInterface, I2cInterface, InterfaceError, NoReset, Spi4Wire,
};
