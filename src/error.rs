//! Error types for the driver
//!
//! This module defines [`Error`], the runtime error type for display
//! operations. Low-level hardware communication errors are defined in
//! [`InterfaceError`](crate::interface::InterfaceError), and DMA pipeline
//! errors in [`DmaError`](crate::dma::DmaError).
//!
//! The original chip protocol treats bad arguments as programming errors
//! (assertion failures); this driver reports them as explicit results
//! instead, so a release build cannot silently write a malformed window.

use crate::interface::RegisterInterface;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<I: RegisterInterface> {
    /// Interface error (SPI/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`RegisterInterface`]
    /// implementation.
    Interface(I::Error),
    /// Invalid window bounds
    ///
    /// Bounds must satisfy `hor_start < hor_end < 176` and
    /// `vert_start < vert_end < 220` in the chip's portrait register frame.
    InvalidWindow {
        /// Horizontal start column requested
        hor_start: u16,
        /// Horizontal end column requested
        hor_end: u16,
        /// Vertical start line requested
        vert_start: u16,
        /// Vertical end line requested
        vert_end: u16,
    },
    /// Invalid landscape rectangle parameters
    ///
    /// Rectangles must have non-zero width and height and fit within the
    /// 220x176 landscape frame.
    InvalidRect {
        /// X coordinate (landscape columns, 0..220)
        x: u16,
        /// Y coordinate (landscape rows, 0..176)
        y: u16,
        /// Width in pixels
        w: u16,
        /// Height in pixels
        h: u16,
    },
    /// A pixel write was issued with an empty buffer
    BufferEmpty,
    /// Buffer is too small for the requested blit
    ///
    /// The provided buffer must hold at least `w * h` pixel words.
    BufferTooSmall {
        /// Required buffer length in pixel words
        required: usize,
        /// Provided buffer length in pixel words
        provided: usize,
    },
}

impl<I: RegisterInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::InvalidWindow {
                hor_start,
                hor_end,
                vert_start,
                vert_end,
            } => {
                write!(
                    f,
                    "Invalid window: horizontal {hor_start}..={hor_end}, vertical {vert_start}..={vert_end}"
                )
            }
            Self::InvalidRect { x, y, w, h } => {
                write!(f, "Invalid rectangle: x={x}, y={y}, w={w}, h={h}")
            }
            Self::BufferEmpty => write!(f, "Pixel buffer is empty"),
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} words, provided {provided}"
                )
            }
        }
    }
}

impl<I: RegisterInterface + core::fmt::Debug> core::error::Error for Error<I> {}
