//! Graphics support via embedded-graphics
//!
//! This module implements the
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) trait for
//! [`Display`], so primitives, images and fonts from the embedded-graphics
//! ecosystem composite into the same pages the differential flush tracks.
//! Anything drawn here is picked up by the next [`Display::flush`] like any
//! other framebuffer write.
//!
//! The drawable canvas is the logical 128x64 pixel area; the configured
//! horizontal offset is applied when pixels land in panel RAM.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     primitives::{PrimitiveStyle, Rectangle},
//! };
//! use uc1701::{Builder, Chip, Display, DisplayInterface};
//! # use core::convert::Infallible;
//! # struct MockBus;
//! # impl DisplayInterface for MockBus {
//! #     type Error = Infallible;
//! #     fn send_commands(&mut self, _cmds: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn send_data(&mut self, _data: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let config = match Builder::new().chip(Chip::Ssd1306).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let mut display = Display::new(MockBus, config);
//!
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(40, 20))
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
//!     .draw(&mut display);
//!
//! if let Err(err) = display.flush() {
//!     let _ = err;
//! }
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    prelude::Pixel,
};

use crate::config::PAGES;
use crate::display::Display;
use crate::interface::DisplayInterface;

impl<I> DrawTarget for Display<I>
where
    I: DisplayInterface,
{
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let sz = self.size();

        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }

            let x = x as u32;
            let y = y as u32;

            if x >= sz.width || y >= sz.height {
                continue;
            }

            self.set_pixel(x as usize, y as usize, color.is_on());
        }

        Ok(())
    }
}

impl<I> OriginDimensions for Display<I>
where
    I: DisplayInterface,
{
    fn size(&self) -> Size {
        let (grid_cols, _) = self.dimensions();
        Size::new((grid_cols * 8) as u32, (PAGES * 8) as u32)
    }
}
