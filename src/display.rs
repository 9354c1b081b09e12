//! Framebuffer state and the differential flush engine
//!
//! [`Display`] owns the in-memory image as 8 byte pages plus a shadow copy
//! of the last content each page was flushed with. Drawing operations only
//! mutate the pages; [`Display::flush`] diffs every page against its shadow
//! and transmits the minimal merged byte ranges through the bus interface.
//!
//! All drawing and flushing is synchronous and single-owner: callers
//! serialize their writes and flushes, and the diff pass assumes the pages
//! hold still while it runs.

use embedded_hal::delay::DelayNs;

use alloc::vec;
use alloc::vec::Vec;

use crate::command;
use crate::config::{Chip, Config, PAGES};
use crate::diff;
use crate::error::Error;
use crate::font::{self, FONT_8X16, GlyphRows};
use crate::glyphs::GlyphCache;
use crate::interface::DisplayInterface;
use crate::swizzle;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Shadow pages start at this value so a fresh framebuffer (all zeroes)
/// still differs everywhere and the first flush transmits every byte.
const NEVER_SENT: u8 = 0x7E;

/// Framebuffer engine for one UC1701/SSD1306/SH1106 panel
///
/// Construct with [`Display::new`], call [`Display::init`] once at power-on,
/// then draw with [`write_text`](Display::write_text),
/// [`write_graphics`](Display::write_graphics) and
/// [`write_glyph`](Display::write_glyph) and push the changes out with
/// [`flush`](Display::flush).
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Bus interface
    interface: I,
    /// Chip selection and register values
    config: Config,
    /// Transposed font and icon artwork
    cache: GlyphCache,
    /// Current image, one byte row per page
    pages: Vec<Vec<u8>>,
    /// Last successfully transmitted content per page
    shadow: Vec<Vec<u8>>,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a display using the bundled [`FONT_8X16`] table
    pub fn new(interface: I, config: Config) -> Self {
        Self::with_font(interface, config, &FONT_8X16)
    }

    /// Create a display with a caller-supplied font table
    ///
    /// The whole table is transposed into page byte order once, up front.
    pub fn with_font(interface: I, config: Config, font: &[GlyphRows; 256]) -> Self {
        let columns = config.columns();
        Self {
            interface,
            config,
            cache: GlyphCache::new(font),
            pages: vec![vec![0; columns]; PAGES],
            shadow: vec![vec![NEVER_SENT; columns]; PAGES],
        }
    }

    /// Reset the panel and run the chip's power-on command sequence
    ///
    /// Ends with a [`flush`](Display::flush), so whatever has been drawn
    /// (or a blank screen) becomes visible immediately.
    ///
    /// # Errors
    ///
    /// Propagates any transport fault from the interface.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface.reset(delay);
        match self.config.chip {
            Chip::Uc1701 => {
                let init = [
                    command::UC1701_SYSTEM_RESET,
                    command::SET_START_LINE,
                    command::UC1701_SEG_NORMAL,
                    command::UC1701_COM_REVERSE,
                    command::UC1701_BIAS_NINTH,
                    command::UC1701_BOOSTER_ON,
                    command::UC1701_REGULATOR_ON,
                    command::UC1701_FOLLOWER_ON,
                    command::UC1701_BOOSTER_RATIO,
                    command::UC1701_BOOSTER_RATIO_4X,
                    command::UC1701_RESISTOR_RATIO,
                    command::SET_CONTRAST,
                    self.config.contrast,
                    command::UC1701_STATIC_INDICATOR_OFF,
                    command::UC1701_NOP,
                    command::DISPLAY_NORMAL,
                    command::DISPLAY_ON,
                ];
                self.send_commands(&init)?;
                // Exercise every pixel once, then return to RAM contents.
                self.send_commands(&[command::ALL_PIXELS_ON])?;
                self.send_commands(&[command::DISPLAY_FROM_RAM])?;
            }
            Chip::Ssd1306 | Chip::Sh1106 => {
                let invert = if self.config.invert {
                    command::DISPLAY_INVERT
                } else {
                    command::DISPLAY_NORMAL
                };
                let init = [
                    command::DISPLAY_OFF,
                    command::SSD1306_CLOCK_DIVIDE,
                    0x80, // suggested oscillator frequency
                    command::SSD1306_MULTIPLEX_RATIO,
                    0x3F, // 64 rows
                    command::SSD1306_DISPLAY_OFFSET,
                    0x00,
                    command::SET_START_LINE,
                    command::SSD1306_CHARGE_PUMP,
                    0x14, // internal charge pump on
                    command::SSD1306_MEMORY_MODE,
                    0x02, // page addressing
                    command::SSD1306_SEG_REMAP,
                    command::SSD1306_COM_SCAN_DEC,
                    command::SSD1306_COM_PINS,
                    0x12, // alternative COM configuration
                    command::SET_CONTRAST,
                    self.config.contrast,
                    command::SSD1306_PRECHARGE,
                    0xA1,
                    command::SSD1306_VCOMH_DESELECT,
                    self.config.vcomh,
                    command::SSD1306_DEACTIVATE_SCROLL,
                    command::DISPLAY_FROM_RAM,
                    invert,
                    command::DISPLAY_ON,
                ];
                self.send_commands(&init)?;
            }
        }
        log::debug!("{:?} init complete", self.config.chip);
        self.flush()
    }

    /// Draw text cells at character position `(x, y)`
    ///
    /// `text` holds font codes, one cell each; it is clipped to the grid
    /// width. Cells are overwritten, not blended. Positions outside the
    /// 16x4 grid are ignored.
    pub fn write_text(&mut self, x: usize, y: usize, text: &[u8]) {
        let (grid_cols, grid_rows) = self.config.char_dimensions();
        if x >= grid_cols || y >= grid_rows {
            return;
        }
        let text = &text[..text.len().min(grid_cols - x)];
        let mut pix_x = x * 8 + usize::from(self.config.x_offset);
        for &code in text {
            let glyph = *self.cache.glyph(code);
            self.pages[y * 2][pix_x..pix_x + 8].copy_from_slice(&glyph.top);
            self.pages[y * 2 + 1][pix_x..pix_x + 8].copy_from_slice(&glyph.bottom);
            pix_x += 8;
        }
    }

    /// XOR a 16-byte row-major tile into the cell at `(x, y)`
    ///
    /// `data` holds 16 rows of 8 pixels (bit 7 leftmost). XOR composition
    /// overlays without destroying what is underneath: applying the same
    /// tile twice at the same position restores the previous content.
    /// Ignored unless the position is on the grid and `data` is exactly 16
    /// bytes.
    pub fn write_graphics(&mut self, x: usize, y: usize, data: &[u8]) {
        let (grid_cols, grid_rows) = self.config.char_dimensions();
        let Ok(rows) = <&[u8; 16]>::try_from(data) else {
            return;
        };
        if x >= grid_cols || y >= grid_rows {
            return;
        }
        let (top, bottom) = swizzle::transpose(rows);
        let pix_x = x * 8 + usize::from(self.config.x_offset);
        for i in 0..8 {
            self.pages[y * 2][pix_x + i] ^= top[i];
            self.pages[y * 2 + 1][pix_x + i] ^= bottom[i];
        }
    }

    /// Draw a named glyph at character position `(x, y)`
    ///
    /// A registered 16x16 icon is blitted (overwrite) across two cells and
    /// returns 2; an icon that would not leave room for its second column
    /// is refused. Otherwise a known pseudo-glyph name (see
    /// [`TEXT_GLYPHS`](crate::font::TEXT_GLYPHS)) draws one text cell and
    /// returns 1. Unknown names draw nothing and return 0.
    pub fn write_glyph(&mut self, x: usize, y: usize, name: &str) -> usize {
        let (grid_cols, grid_rows) = self.config.char_dimensions();
        if y >= grid_rows {
            return 0;
        }
        if let Some(icon) = self.cache.icon(name).copied() {
            if x + 1 < grid_cols {
                let pix_x = x * 8 + usize::from(self.config.x_offset);
                self.pages[y * 2][pix_x..pix_x + 16].copy_from_slice(&icon.top);
                self.pages[y * 2 + 1][pix_x..pix_x + 16].copy_from_slice(&icon.bottom);
                return 2;
            }
        }
        if let Some(code) = font::text_glyph(name) {
            self.write_text(x, y, &[code]);
            return 1;
        }
        0
    }

    /// Register (or replace) a named 16x16 icon for [`write_glyph`](Display::write_glyph)
    ///
    /// `rows[r]` is row `r` of the icon with bit 15 as the leftmost pixel.
    pub fn register_icon(&mut self, name: &str, rows: &[u16; 16]) {
        self.cache.register_icon(name, rows);
    }

    /// Blank the framebuffer
    ///
    /// Only the current pages are zeroed; the shadow keeps the transmitted
    /// state, so the next flush erases exactly what was visible.
    pub fn clear(&mut self) {
        for page in &mut self.pages {
            page.fill(0);
        }
    }

    /// The character grid as (columns, rows)
    pub fn dimensions(&self) -> (usize, usize) {
        self.config.char_dimensions()
    }

    /// Access the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Transmit every changed byte range and commit the shadow copy
    ///
    /// Pages are processed in index order. A page identical to its shadow
    /// costs no traffic at all; otherwise each merged run is sent as a
    /// position command plus a data write, and the shadow is updated once
    /// the whole page went out.
    ///
    /// # Errors
    ///
    /// A transport fault aborts the flush and is returned unmodified. The
    /// failed page (and any not yet reached) keeps its stale shadow, so the
    /// next flush re-sends the same ranges.
    pub fn flush(&mut self) -> DisplayResult<I> {
        let Self {
            interface,
            pages,
            shadow,
            ..
        } = self;
        for (page_index, (new, old)) in pages.iter().zip(shadow.iter_mut()).enumerate() {
            if new == old {
                continue;
            }
            let runs = diff::changed_runs(new, old);
            log::trace!("page {page_index}: {} run(s)", runs.len());
            for run in &runs {
                let position = command::position(page_index as u8, run.start as u8);
                interface
                    .send_commands(&position)
                    .map_err(Error::Interface)?;
                interface
                    .send_data(&new[run.start..run.start + run.len])
                    .map_err(Error::Interface)?;
            }
            old.copy_from_slice(new);
        }
        Ok(())
    }

    /// Set or clear one pixel of the logical canvas.
    #[cfg(feature = "graphics")]
    pub(crate) fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        let column = x + usize::from(self.config.x_offset);
        let mask = 1 << (y % 8);
        let byte = &mut self.pages[y / 8][column];
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    fn send_commands(&mut self, cmds: &[u8]) -> DisplayResult<I> {
        self.interface.send_commands(cmds).map_err(Error::Interface)
    }

    /// Test-only access to the underlying interface.
    #[cfg(all(test, feature = "graphics"))]
    pub(crate) fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;
    use alloc::vec;

    /// Transposed columns of the bundled font's 'A', rows 0..8.
    const TOP_A: [u8; 7] = [0xE0, 0xF0, 0x98, 0x8C, 0x98, 0xF0, 0xE0];
    /// Transposed columns of the bundled font's 'A', rows 8..16.
    const BOTTOM_A: [u8; 7] = [0x0F, 0x0F, 0x00, 0x00, 0x00, 0x0F, 0x0F];

    #[derive(Debug, Default)]
    struct MockInterface {
        commands: Vec<Vec<u8>>,
        writes: Vec<(Vec<u8>, Vec<u8>)>,
        resets: usize,
        last_command: Option<Vec<u8>>,
    }

    impl DisplayInterface for MockInterface {
        type Error = core::convert::Infallible;

        fn send_commands(&mut self, cmds: &[u8]) -> Result<(), Self::Error> {
            self.commands.push(cmds.to_vec());
            self.last_command = Some(cmds.to_vec());
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            if let Some(cmd) = self.last_command.take() {
                self.writes.push((cmd, data.to_vec()));
            }
            Ok(())
        }

        fn reset<D: DelayNs>(&mut self, _delay: &mut D) {
            self.resets += 1;
        }
    }

    #[derive(Debug, PartialEq, Eq)]
    struct TransportFault;

    /// Interface that fails exactly one send, identified by its index.
    #[derive(Debug, Default)]
    struct FaultyInterface {
        inner: MockInterface,
        sent: usize,
        fail_at: Option<usize>,
    }

    impl FaultyInterface {
        fn check(&mut self) -> Result<(), TransportFault> {
            let index = self.sent;
            self.sent += 1;
            if self.fail_at == Some(index) {
                self.fail_at = None;
                return Err(TransportFault);
            }
            Ok(())
        }
    }

    impl DisplayInterface for FaultyInterface {
        type Error = TransportFault;

        fn send_commands(&mut self, cmds: &[u8]) -> Result<(), Self::Error> {
            self.check()?;
            let _ = self.inner.send_commands(cmds);
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            self.check()?;
            let _ = self.inner.send_data(data);
            Ok(())
        }
    }

    struct MockDelay;
    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn test_display(chip: Chip) -> Display<MockInterface> {
        let config = Builder::new().chip(chip).build().unwrap();
        Display::new(MockInterface::default(), config)
    }

    /// A display whose shadow already matches its (blank) pages.
    fn synced_display(chip: Chip) -> Display<MockInterface> {
        let mut display = test_display(chip);
        display.flush().unwrap();
        display.interface.commands.clear();
        display.interface.writes.clear();
        display
    }

    #[test]
    fn test_first_flush_transmits_every_page_in_capped_chunks() {
        let mut display = test_display(Chip::Ssd1306);
        display.flush().unwrap();

        // 8 pages, each fully different from the never-sent shadow, each
        // chunked by the 16-byte merge cap.
        assert_eq!(display.interface.writes.len(), 64);
        for (page, chunk) in display.interface.writes.chunks(8).enumerate() {
            for (i, (pos, data)) in chunk.iter().enumerate() {
                assert_eq!(*pos, command::position(page as u8, (i * 16) as u8).to_vec());
                assert_eq!(data.len(), 16);
                assert!(data.iter().all(|&b| b == 0));
            }
        }
    }

    #[test]
    fn test_second_flush_is_silent() {
        let mut display = test_display(Chip::Uc1701);
        display.flush().unwrap();
        display.interface.writes.clear();

        display.flush().unwrap();
        assert!(display.interface.writes.is_empty());
        assert!(display.interface.commands.is_empty());
    }

    #[test]
    fn test_write_text_then_flush_sends_glyph_columns() {
        let mut display = synced_display(Chip::Ssd1306);
        display.write_text(0, 0, b"A");
        display.flush().unwrap();

        let writes = &display.interface.writes;
        assert_eq!(writes.len(), 2);
        assert_eq!(
            writes[0],
            (command::position(0, 0).to_vec(), TOP_A.to_vec())
        );
        assert_eq!(
            writes[1],
            (command::position(1, 0).to_vec(), BOTTOM_A.to_vec())
        );

        display.interface.writes.clear();
        display.flush().unwrap();
        assert!(display.interface.writes.is_empty());
    }

    #[test]
    fn test_write_text_clips_at_grid_edge() {
        let mut display = synced_display(Chip::Ssd1306);
        display.write_text(15, 0, b"AB");
        display.flush().unwrap();

        // Only the 'A' fits; both pages carry one run starting at column 120.
        let writes = &display.interface.writes;
        assert_eq!(writes.len(), 2);
        assert_eq!(
            writes[0],
            (command::position(0, 120).to_vec(), TOP_A.to_vec())
        );
        assert_eq!(
            writes[1],
            (command::position(1, 120).to_vec(), BOTTOM_A.to_vec())
        );
    }

    #[test]
    fn test_write_text_off_grid_is_ignored() {
        let mut display = synced_display(Chip::Ssd1306);
        display.write_text(16, 0, b"A");
        display.write_text(0, 4, b"A");
        display.flush().unwrap();
        assert!(display.interface.writes.is_empty());
    }

    #[test]
    fn test_write_graphics_xors_into_the_pages() {
        let mut display = synced_display(Chip::Ssd1306);
        display.write_graphics(2, 1, &[0xFF; 16]);
        display.flush().unwrap();

        let writes = &display.interface.writes;
        assert_eq!(writes.len(), 2);
        assert_eq!(
            writes[0],
            (command::position(2, 16).to_vec(), vec![0xFF; 8])
        );
        assert_eq!(
            writes[1],
            (command::position(3, 16).to_vec(), vec![0xFF; 8])
        );
    }

    #[test]
    fn test_write_graphics_twice_restores_prior_content() {
        let mut display = synced_display(Chip::Ssd1306);
        display.write_graphics(2, 1, &[0xFF; 16]);
        display.write_graphics(2, 1, &[0xFF; 16]);
        display.flush().unwrap();
        assert!(display.interface.writes.is_empty());
    }

    #[test]
    fn test_write_graphics_inverts_text_underneath() {
        let mut display = synced_display(Chip::Ssd1306);
        display.write_text(0, 0, b"A");
        display.flush().unwrap();
        display.interface.writes.clear();

        display.write_graphics(0, 0, &[0xFF; 16]);
        display.flush().unwrap();

        // Every column of the cell flips, including the blank eighth one.
        let writes = &display.interface.writes;
        assert_eq!(writes.len(), 2);
        assert_eq!(
            writes[0],
            (
                command::position(0, 0).to_vec(),
                vec![0x1F, 0x0F, 0x67, 0x73, 0x67, 0x0F, 0x1F, 0xFF]
            )
        );
    }

    #[test]
    fn test_write_graphics_rejects_bad_input() {
        let mut display = synced_display(Chip::Ssd1306);
        display.write_graphics(0, 0, &[0xFF; 15]);
        display.write_graphics(0, 0, &[0xFF; 17]);
        display.write_graphics(16, 0, &[0xFF; 16]);
        display.write_graphics(0, 4, &[0xFF; 16]);
        display.flush().unwrap();
        assert!(display.interface.writes.is_empty());
    }

    #[test]
    fn test_write_glyph_blits_registered_icon() {
        let mut display = synced_display(Chip::Ssd1306);
        display.register_icon("logo", &[0xFFFF; 16]);
        assert_eq!(display.write_glyph(0, 0, "logo"), 2);
        display.flush().unwrap();

        let writes = &display.interface.writes;
        assert_eq!(writes.len(), 2);
        assert_eq!(
            writes[0],
            (command::position(0, 0).to_vec(), vec![0xFF; 16])
        );
        assert_eq!(
            writes[1],
            (command::position(1, 0).to_vec(), vec![0xFF; 16])
        );
    }

    #[test]
    fn test_write_glyph_refuses_icon_at_grid_edge() {
        let mut display = synced_display(Chip::Ssd1306);
        display.register_icon("logo", &[0xFFFF; 16]);

        assert_eq!(display.write_glyph(15, 0, "logo"), 0);
        display.flush().unwrap();
        assert!(display.interface.writes.is_empty());

        assert_eq!(display.write_glyph(14, 0, "logo"), 2);
        display.flush().unwrap();
        assert_eq!(
            display.interface.writes[0].0,
            command::position(0, 112).to_vec()
        );
    }

    #[test]
    fn test_write_glyph_pseudo_glyphs_and_misses() {
        let mut display = synced_display(Chip::Ssd1306);
        assert_eq!(display.write_glyph(0, 0, "right_arrow"), 1);
        assert_eq!(display.write_glyph(2, 0, "degrees"), 1);
        assert_eq!(display.write_glyph(4, 0, "smiley"), 0);
        assert_eq!(display.write_glyph(0, 4, "right_arrow"), 0);
        display.flush().unwrap();
        assert!(!display.interface.writes.is_empty());
    }

    #[test]
    fn test_write_glyph_icon_refusal_falls_through_to_pseudo_glyph() {
        let mut display = synced_display(Chip::Ssd1306);
        display.register_icon("right_arrow", &[0xFFFF; 16]);
        // No room for the icon at the last column, but the name still
        // resolves as a one-cell pseudo-glyph.
        assert_eq!(display.write_glyph(15, 0, "right_arrow"), 1);
    }

    #[test]
    fn test_clear_erases_on_the_next_flush() {
        let mut display = synced_display(Chip::Ssd1306);
        display.write_text(0, 0, b"HI");
        display.flush().unwrap();
        display.interface.writes.clear();

        display.clear();
        display.flush().unwrap();
        let writes = &display.interface.writes;
        assert!(!writes.is_empty());
        assert!(
            writes
                .iter()
                .all(|(_, data)| data.iter().all(|&b| b == 0))
        );

        display.interface.writes.clear();
        display.flush().unwrap();
        assert!(display.interface.writes.is_empty());
    }

    #[test]
    fn test_x_offset_shifts_every_write() {
        let config = Builder::new()
            .chip(Chip::Sh1106)
            .x_offset(2)
            .build()
            .unwrap();
        let mut display = Display::new(MockInterface::default(), config);
        display.flush().unwrap();
        display.interface.writes.clear();

        display.write_text(0, 0, b"A");
        display.flush().unwrap();
        assert_eq!(
            display.interface.writes[0],
            (command::position(0, 2).to_vec(), TOP_A.to_vec())
        );
    }

    #[test]
    fn test_dimensions_report_the_character_grid() {
        for chip in [Chip::Uc1701, Chip::Ssd1306, Chip::Sh1106] {
            assert_eq!(test_display(chip).dimensions(), (16, 4));
        }
    }

    #[test]
    fn test_uc1701_init_sequence() {
        let config = Builder::new()
            .chip(Chip::Uc1701)
            .contrast(50)
            .build()
            .unwrap();
        let mut display = Display::new(MockInterface::default(), config);
        display.init(&mut MockDelay).unwrap();

        assert_eq!(display.interface.resets, 1);
        let commands = &display.interface.commands;
        assert_eq!(
            commands[0],
            vec![
                0xE2, 0x40, 0xA0, 0xC8, 0xA2, 0x2C, 0x2E, 0x2F, 0xF8, 0x00, 0x23, 0x81, 50,
                0xAC, 0x00, 0xA6, 0xAF
            ]
        );
        assert_eq!(commands[1], vec![0xA5]);
        assert_eq!(commands[2], vec![0xA4]);
        // The init flush pushed the whole never-sent framebuffer out.
        assert_eq!(display.interface.writes.len(), 64);
    }

    #[test]
    fn test_ssd1306_init_sequence_honors_config() {
        let config = Builder::new()
            .chip(Chip::Ssd1306)
            .vcomh(32)
            .invert(true)
            .build()
            .unwrap();
        let mut display = Display::new(MockInterface::default(), config);
        display.init(&mut MockDelay).unwrap();

        assert_eq!(display.interface.resets, 1);
        assert_eq!(
            display.interface.commands[0],
            vec![
                0xAE, 0xD5, 0x80, 0xA8, 0x3F, 0xD3, 0x00, 0x40, 0x8D, 0x14, 0x20, 0x02, 0xA1,
                0xC8, 0xDA, 0x12, 0x81, 239, 0xD9, 0xA1, 0xDB, 32, 0x2E, 0xA4, 0xA7, 0xAF
            ]
        );
    }

    #[test]
    fn test_transport_fault_keeps_the_page_dirty() {
        let config = Builder::new().chip(Chip::Ssd1306).build().unwrap();
        let mut display = Display::new(FaultyInterface::default(), config);
        display.flush().unwrap();
        display.interface.inner.writes.clear();

        display.write_text(0, 0, b"A");
        // Fail the position command of the first run.
        display.interface.fail_at = Some(display.interface.sent);
        assert!(matches!(
            display.flush(),
            Err(Error::Interface(TransportFault))
        ));
        assert!(display.interface.inner.writes.is_empty());

        // The retry re-sends the same ranges.
        display.flush().unwrap();
        let writes = &display.interface.inner.writes;
        assert_eq!(writes.len(), 2);
        assert_eq!(
            writes[0],
            (command::position(0, 0).to_vec(), TOP_A.to_vec())
        );
        assert_eq!(
            writes[1],
            (command::position(1, 0).to_vec(), BOTTOM_A.to_vec())
        );
    }

    #[test]
    fn test_fault_after_partial_page_recommits_everything() {
        let config = Builder::new().chip(Chip::Ssd1306).build().unwrap();
        let mut display = Display::new(FaultyInterface::default(), config);
        display.flush().unwrap();
        display.interface.inner.writes.clear();

        display.write_text(0, 0, b"A");
        // Let the page-0 position through, fail its data write: the shadow
        // commit for page 0 must not happen.
        display.interface.fail_at = Some(display.interface.sent + 1);
        assert!(display.flush().is_err());

        display.interface.inner.writes.clear();
        display.flush().unwrap();
        assert_eq!(display.interface.inner.writes.len(), 2);
    }
}
