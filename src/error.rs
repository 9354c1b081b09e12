//! Error types for the driver
//!
//! This module defines error types for configuration building
//! ([`BuilderError`]) and display operations ([`Error`]).
//!
//! Drawing operations deliberately have no error path: out-of-grid writes
//! and malformed graphics tiles are treated as caller bugs with forgiving
//! no-op behavior, and unknown glyph names report "zero columns drawn"
//! instead of failing. The only runtime error a display can surface is a
//! transport fault from its bus interface.
//!
//! ## Example
//!
//! ```
//! use uc1701::{Builder, BuilderError};
//!
//! // Missing chip selection
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingChip)));
//! ```

use crate::interface::DisplayInterface;

/// Errors that can occur when driving the display
///
/// Generic over the interface type to preserve the specific transport error,
/// so callers can match on the underlying hardware fault.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Transport fault from the bus interface
    ///
    /// Propagated unmodified and never retried here. A flush leaves the
    /// failed page's shadow copy stale, so the next flush re-sends the same
    /// unacknowledged ranges.
    Interface(I::Error),
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before a display exists.
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// No chip was selected
    ///
    /// [`Builder::chip()`](crate::config::Builder::chip) must be called
    /// before building.
    MissingChip,
    /// Contrast register value out of range for the selected chip
    InvalidContrast {
        /// Requested contrast value
        contrast: u8,
        /// Largest value the chip's register accepts
        max: u8,
    },
    /// VCOMH deselect level out of range (0..=63)
    InvalidVcomh {
        /// Requested VCOMH value
        vcomh: u8,
    },
    /// Horizontal offset out of range or canvas does not fit the chip's RAM
    InvalidXOffset {
        /// Requested offset in pixels
        x_offset: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingChip => write!(f, "A chip must be selected"),
            Self::InvalidContrast { contrast, max } => {
                write!(f, "Invalid contrast {contrast} (chip maximum {max})")
            }
            Self::InvalidVcomh { vcomh } => {
                write!(f, "Invalid VCOMH level {vcomh} (maximum 63)")
            }
            Self::InvalidXOffset { x_offset } => {
                write!(f, "Invalid x offset {x_offset} (maximum 3, canvas must fit RAM)")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
