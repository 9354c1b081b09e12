//! Display configuration types and builder

pub use crate::error::BuilderError;

/// Number of 8-pixel-tall framebuffer pages every supported controller maps.
pub const PAGES: usize = 8;

/// Width in pixels of the logical drawing canvas (16 text cells).
pub(crate) const CANVAS_COLUMNS: usize = 128;

/// Supported display controllers.
///
/// All three share the page/column addressing scheme and differ only in RAM
/// geometry and power-on initialization, so the chip is plain configuration
/// rather than a driver hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Chip {
    /// UC1701 128x64 LCD, "4-wire" SPI.
    Uc1701,
    /// SSD1306 128x64 OLED, SPI or I2C.
    Ssd1306,
    /// SH1106, SSD1306-compatible with a 132-column RAM.
    Sh1106,
}

impl Chip {
    /// Bytes per framebuffer page in this controller's RAM.
    pub fn columns(self) -> usize {
        match self {
            Chip::Uc1701 | Chip::Ssd1306 => 128,
            Chip::Sh1106 => 132,
        }
    }

    /// Default contrast register value.
    fn default_contrast(self) -> u8 {
        match self {
            Chip::Uc1701 => 40,
            Chip::Ssd1306 | Chip::Sh1106 => 239,
        }
    }

    /// Upper bound of the contrast register.
    fn max_contrast(self) -> u8 {
        match self {
            Chip::Uc1701 => 63,
            Chip::Ssd1306 | Chip::Sh1106 => 255,
        }
    }
}

/// Display configuration
///
/// Holds the controller selection and its tunable register values. Use
/// [`Builder`] to create a validated `Config`.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Target controller.
    pub chip: Chip,
    /// Contrast ("electronic volume") register value.
    pub contrast: u8,
    /// VCOMH deselect level, SSD1306 family only.
    pub vcomh: u8,
    /// Invert pixel polarity, SSD1306 family only.
    pub invert: bool,
    /// Horizontal pixel offset centering the canvas on wider panel RAM.
    pub x_offset: u8,
}

impl Config {
    /// Bytes per framebuffer page.
    pub fn columns(&self) -> usize {
        self.chip.columns()
    }

    /// Character grid exposed to text operations, as (columns, rows).
    ///
    /// Two pages form one 8x16 text row, so the grid is `columns / 8` cells
    /// wide and [`PAGES`]` / 2` rows tall.
    pub fn char_dimensions(&self) -> (usize, usize) {
        (self.columns() / 8, PAGES / 2)
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use uc1701::{Builder, Chip};
///
/// let config = match Builder::new().chip(Chip::Sh1106).x_offset(2).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.columns(), 132);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    /// Target controller (required)
    chip: Option<Chip>,
    /// Contrast register value; defaults per chip
    contrast: Option<u8>,
    /// VCOMH deselect level
    vcomh: u8,
    /// Invert pixel polarity
    invert: bool,
    /// Horizontal pixel offset
    x_offset: u8,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the target controller (required)
    pub fn chip(mut self, chip: Chip) -> Self {
        self.chip = Some(chip);
        self
    }

    /// Set the contrast register value
    ///
    /// Range is 0..=63 for the UC1701 and 0..=255 for the SSD1306 family;
    /// defaults are 40 and 239 respectively.
    pub fn contrast(mut self, value: u8) -> Self {
        self.contrast = Some(value);
        self
    }

    /// Set the VCOMH deselect level (0..=63, SSD1306 family)
    pub fn vcomh(mut self, value: u8) -> Self {
        self.vcomh = value;
        self
    }

    /// Invert pixel polarity (SSD1306 family)
    pub fn invert(mut self, value: bool) -> Self {
        self.invert = value;
        self
    }

    /// Set the horizontal pixel offset (0..=3)
    ///
    /// SH1106 panels commonly wire 128 pixels of glass centered on the
    /// chip's 132-column RAM; an offset of 2 centers the canvas.
    pub fn x_offset(mut self, value: u8) -> Self {
        self.x_offset = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::MissingChip`] if no chip was selected,
    /// [`BuilderError::InvalidContrast`] / [`BuilderError::InvalidVcomh`] for
    /// out-of-range register values, and [`BuilderError::InvalidXOffset`]
    /// when the offset canvas would not fit the chip's RAM.
    pub fn build(self) -> Result<Config, BuilderError> {
        let chip = self.chip.ok_or(BuilderError::MissingChip)?;
        let contrast = self.contrast.unwrap_or_else(|| chip.default_contrast());
        if contrast > chip.max_contrast() {
            return Err(BuilderError::InvalidContrast {
                contrast,
                max: chip.max_contrast(),
            });
        }
        if self.vcomh > 63 {
            return Err(BuilderError::InvalidVcomh { vcomh: self.vcomh });
        }
        if self.x_offset > 3 || usize::from(self.x_offset) + CANVAS_COLUMNS > chip.columns() {
            return Err(BuilderError::InvalidXOffset {
                x_offset: self.x_offset,
            });
        }
        Ok(Config {
            chip,
            contrast,
            vcomh: self.vcomh,
            invert: self.invert,
            x_offset: self.x_offset,
        })
    }
}
