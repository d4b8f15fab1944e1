//! ILI9225 TFT Display Driver
//!
//! A driver for the ILI9225 176x220 TFT display controller over 4-wire
//! SPI, using 16-bit bus words.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - Fixed, chip-exact initialization sequence with stage timing
//! - Window/address model with blocking and DMA-offloaded pixel transfers
//! - Built-in 8x8 bitmap font for text rendering
//! - Optional register read-back (`read` feature): device identification
//!   and driving-line queries
//!
//! ## Usage
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::SpiBus;
//! use ili9225::{Config, Display, Interface};
//! # use core::convert::Infallible;
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiBus<u16> for MockSpi {
//! #     fn read(&mut self, _words: &mut [u16]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write(&mut self, _words: &[u16]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer(&mut self, _read: &mut [u16], _write: &[u16]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _words: &mut [u16]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let (cs, rs, rst, led) = (MockPin, MockPin, MockPin, MockPin);
//! # let mut delay = MockDelay;
//! // The HAL must clock the SPI bus for 16-bit words, CPOL 0 / CPHA 0,
//! // MSB first.
//! let interface = Interface::new(spi, cs, rs, rst, led);
//! let mut display = Display::new(interface, Config::default());
//!
//! // Power-up sequence; returns the device identification difference.
//! let _ = display.init(&mut delay);
//!
//! // Clear to black, then draw.
//! let _ = display.fill(0x0000);
//! let _ = display.draw_text("HELLO", 0, 0, 0xFFFF, 0x0000);
//! ```
//!
//! For bulk asynchronous transfers, wrap the display in a
//! [`DmaDisplay`] and service the completion interrupt from the bound
//! handler; see the [`dma`] module documentation.
//!
//! ## Concurrency
//!
//! The bus and the DMA channel are single shared resources and the driver
//! performs no locking. Callers must not invoke any operation concurrently
//! with another; wrap the display in a mutex if that is required.

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// ILI9225 register definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Asynchronous DMA pixel pipeline
pub mod dma;
/// Error types for the driver
pub mod error;
/// 8x8 bitmap glyphs for text rendering
pub mod font;
/// Hardware interface abstraction
pub mod interface;

pub use command::{DEVICE_CODE, SOFT_RESET_KEY};
pub use config::{Builder, Config, ENTRY_MODE_LANDSCAPE};
pub use display::{ColorMode, Display, SCREEN_SIZE_X, SCREEN_SIZE_Y};
pub use dma::{CompletionCallback, DmaChannel, DmaDisplay, DmaError, IrqLine, TransferState};
pub use error::Error;
pub use font::{GLYPH_HEIGHT, GLYPH_WIDTH, GlyphBuffer};
pub use interface::{Interface, InterfaceError, RegisterInterface};
pub use interface::{PIN_SETTLE_MS, RESET_PULSE_MS, RESET_RELEASE_MS};
