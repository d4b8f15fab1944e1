//! Hardware interface abstraction
//!
//! This module provides the [`RegisterInterface`] trait and the [`Interface`]
//! struct for communicating with the ILI9225 controller over 4-wire SPI.
//!
//! ## Hardware Requirements
//!
//! The ILI9225 requires:
//! - SPI bus clocked for 16-bit words, CPOL 0 / CPHA 0, MSB first
//! - 4 GPIO pins:
//!   - **CS**: Chip select (output, active low)
//!   - **RS**: Register select (output, low=index, high=data)
//!   - **RST**: Reset (output, active low)
//!   - **LED**: Backlight enable (output)
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::SpiBus;
//! use ili9225::{Interface, RegisterInterface};
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
//! // Create interface with SPI bus and GPIO pins (cs, rs, rst, led)
//! let mut interface = Interface::new(MockSpi, MockPin, MockPin, MockPin, MockPin);
//!
//! // Select the GRAM data register
//! let _ = interface.write_index(0x22);
//!
//! // Send one data word
//! let _ = interface.write_data(0xF800);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Hold time after arming the control pins, before the reset pulse.
pub const PIN_SETTLE_MS: u32 = 1;

/// Reset pulse low time. The chip minimum (Tres) is 1ms; a safety margin
/// is kept.
pub const RESET_PULSE_MS: u32 = 10;

/// Hold time after releasing reset, before the chip accepts commands.
pub const RESET_RELEASE_MS: u32 = 50;

/// Trait for hardware interface to the ILI9225 controller
///
/// This trait frames every bus access with the register-select and
/// chip-select discipline the chip expects, allowing the
/// [`Display`](crate::display::Display) to work with any SPI + GPIO
/// implementation that satisfies embedded-hal traits.
///
/// Chip select is deasserted (high) between transactions; the split framing
/// calls ([`begin_write`](Self::begin_write) / [`end_write`](Self::end_write))
/// are the only way to hold it asserted across multiple bursts.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. If you need custom
/// behavior (e.g., a parallel bus behind a shift register), implement this
/// trait on your own type.
pub trait RegisterInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Write a register index
    ///
    /// The implementation must:
    /// 1. Set RS low (index mode)
    /// 2. Assert CS
    /// 3. Send the index as one 16-bit word
    /// 4. Deassert CS
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn write_index(&mut self, reg: u8) -> InterfaceResult<(), Self::Error>;

    /// Write one 16-bit data word
    ///
    /// Same framing as [`write_index`](Self::write_index) with RS high
    /// (data mode).
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn write_data(&mut self, value: u16) -> InterfaceResult<(), Self::Error>;

    /// Write a register index followed by its data word
    ///
    /// The two transactions are issued back to back on the exclusively
    /// borrowed bus; nothing can interleave between them.
    fn write_register(&mut self, reg: u8, value: u16) -> InterfaceResult<(), Self::Error> {
        self.write_index(reg)?;
        self.write_data(value)
    }

    /// Open a data burst: RS high, CS asserted
    ///
    /// The transaction stays open until [`end_write`](Self::end_write);
    /// intervening [`write_raw`](Self::write_raw) calls stream words into it.
    fn begin_write(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Stream words into an open burst
    ///
    /// Must only be called between [`begin_write`](Self::begin_write) and
    /// [`end_write`](Self::end_write).
    fn write_raw(&mut self, words: &[u16]) -> InterfaceResult<(), Self::Error>;

    /// Close a data burst: CS deasserted
    ///
    /// The implementation must drain any buffered words before releasing
    /// chip select.
    fn end_write(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Read one 16-bit word with RS high (register data)
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    #[cfg(feature = "read")]
    fn read_data(&mut self) -> InterfaceResult<u16, Self::Error>;

    /// Read one 16-bit word with RS low (status / line counter)
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    #[cfg(feature = "read")]
    fn read_status(&mut self) -> InterfaceResult<u16, Self::Error>;

    /// Arm the control pins and pulse hardware reset
    ///
    /// The implementation must:
    /// 1. Drive RST high, CS high, RS low; hold [`PIN_SETTLE_MS`]
    /// 2. Drive RST low; hold [`RESET_PULSE_MS`]
    /// 3. Drive RST high; hold [`RESET_RELEASE_MS`]
    ///
    /// # Arguments
    ///
    /// * `delay` - Delay implementation for timing
    fn hard_reset<D: DelayNs>(&mut self, delay: &mut D);

    /// Switch the backlight on or off
    fn set_backlight(&mut self, on: bool) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Hardware interface implementation for the ILI9225
///
/// Implements [`RegisterInterface`] for embedded-hal v1.0 SPI and GPIO
/// traits. The SPI bus must be configured by the HAL for 16-bit words,
/// CPOL 0 / CPHA 0, MSB first.
///
/// The bus and pins are moved into the interface at construction time and
/// owned exclusively by it for the lifetime of the driver.
///
/// ## Type Parameters
///
/// * `SPI` - SPI bus implementing [`SpiBus<u16>`]
/// * `CS` - Chip select pin implementing [`OutputPin`]
/// * `RS` - Register select pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
/// * `LED` - Backlight enable pin implementing [`OutputPin`]
pub struct Interface<SPI, CS, RS, RST, LED> {
    /// SPI bus for 16-bit word transfers
    spi: SPI,
    /// Chip select pin (active low)
    cs: CS,
    /// Register select pin (low=index, high=data)
    rs: RS,
    /// Reset pin (active low)
    rst: RST,
    /// Backlight enable pin
    led: LED,
}

impl<SPI, CS, RS, RST, LED> Interface<SPI, CS, RS, RST, LED>
where
    SPI: SpiBus<u16>,
    CS: OutputPin,
    RS: OutputPin,
    RST: OutputPin,
    LED: OutputPin,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI bus (must implement [`SpiBus<u16>`])
    /// * `cs` - Chip select pin (output, active low)
    /// * `rs` - Register select pin (output, low=index, high=data)
    /// * `rst` - Reset pin (output, active low)
    /// * `led` - Backlight enable pin (output)
    pub fn new(spi: SPI, cs: CS, rs: RS, rst: RST, led: LED) -> Self {
        Self {
            spi,
            cs,
            rs,
            rst,
            led,
        }
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, CS, RS, RST, LED) {
        (self.spi, self.cs, self.rs, self.rst, self.led)
    }
}

impl<SPI, CS, RS, RST, LED, PinErr> RegisterInterface for Interface<SPI, CS, RS, RST, LED>
where
    SPI: SpiBus<u16>,
    SPI::Error: Debug,
    CS: OutputPin<Error = PinErr>,
    RS: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    LED: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn write_index(&mut self, reg: u8) -> InterfaceResult<(), Self::Error> {
        self.rs.set_low().map_err(InterfaceError::Pin)?;
        self.cs.set_low().map_err(InterfaceError::Pin)?;
        self.spi
            .write(&[u16::from(reg)])
            .map_err(InterfaceError::Spi)?;
        self.spi.flush().map_err(InterfaceError::Spi)?;
        self.cs.set_high().map_err(InterfaceError::Pin)
    }

    fn write_data(&mut self, value: u16) -> InterfaceResult<(), Self::Error> {
        self.rs.set_high().map_err(InterfaceError::Pin)?;
        self.cs.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[value]).map_err(InterfaceError::Spi)?;
        self.spi.flush().map_err(InterfaceError::Spi)?;
        self.cs.set_high().map_err(InterfaceError::Pin)
    }

    fn begin_write(&mut self) -> InterfaceResult<(), Self::Error> {
        self.rs.set_high().map_err(InterfaceError::Pin)?;
        self.cs.set_low().map_err(InterfaceError::Pin)
    }

    fn write_raw(&mut self, words: &[u16]) -> InterfaceResult<(), Self::Error> {
        self.spi.write(words).map_err(InterfaceError::Spi)
    }

    fn end_write(&mut self) -> InterfaceResult<(), Self::Error> {
        self.spi.flush().map_err(InterfaceError::Spi)?;
        self.cs.set_high().map_err(InterfaceError::Pin)
    }

    #[cfg(feature = "read")]
    fn read_data(&mut self) -> InterfaceResult<u16, Self::Error> {
        let mut word = [0u16; 1];
        self.rs.set_high().map_err(InterfaceError::Pin)?;
        self.cs.set_low().map_err(InterfaceError::Pin)?;
        self.spi.read(&mut word).map_err(InterfaceError::Spi)?;
        self.cs.set_high().map_err(InterfaceError::Pin)?;
        Ok(word[0])
    }

    #[cfg(feature = "read")]
    fn read_status(&mut self) -> InterfaceResult<u16, Self::Error> {
        let mut word = [0u16; 1];
        self.rs.set_low().map_err(InterfaceError::Pin)?;
        self.cs.set_low().map_err(InterfaceError::Pin)?;
        self.spi.read(&mut word).map_err(InterfaceError::Spi)?;
        self.cs.set_high().map_err(InterfaceError::Pin)?;
        Ok(word[0])
    }

    fn hard_reset<D: DelayNs>(&mut self, delay: &mut D) {
        // RST must be high before the reset pulse.
        let _ = self.rst.set_high();
        let _ = self.cs.set_high();
        let _ = self.rs.set_low();
        delay.delay_ms(PIN_SETTLE_MS);

        let _ = self.rst.set_low();
        delay.delay_ms(RESET_PULSE_MS);

        let _ = self.rst.set_high();
        delay.delay_ms(RESET_RELEASE_MS);
    }

    fn set_backlight(&mut self, on: bool) -> InterfaceResult<(), Self::Error> {
        if on {
            self.led.set_high().map_err(InterfaceError::Pin)
        } else {
            self.led.set_low().map_err(InterfaceError::Pin)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use core::convert::Infallible;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Event {
        Cs(bool),
        Rs(bool),
        Rst(bool),
        Led(bool),
        Word(u16),
        Flush,
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct LogSpi(Log);

    impl embedded_hal::spi::ErrorType for LogSpi {
        type Error = Infallible;
    }

    impl SpiBus<u16> for LogSpi {
        fn read(&mut self, words: &mut [u16]) -> Result<(), Self::Error> {
            words.fill(0);
            Ok(())
        }
        fn write(&mut self, words: &[u16]) -> Result<(), Self::Error> {
            self.0.borrow_mut().extend(words.iter().map(|w| Event::Word(*w)));
            Ok(())
        }
        fn transfer(&mut self, _read: &mut [u16], _write: &[u16]) -> Result<(), Self::Error> {
            Ok(())
        }
        fn transfer_in_place(&mut self, _words: &mut [u16]) -> Result<(), Self::Error> {
            Ok(())
        }
        fn flush(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().push(Event::Flush);
            Ok(())
        }
    }

    enum Role {
        Cs,
        Rs,
        Rst,
        Led,
    }

    struct LogPin(Log, Role);

    impl embedded_hal::digital::ErrorType for LogPin {
        type Error = Infallible;
    }

    impl OutputPin for LogPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().push(match self.1 {
                Role::Cs => Event::Cs(false),
                Role::Rs => Event::Rs(false),
                Role::Rst => Event::Rst(false),
                Role::Led => Event::Led(false),
            });
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().push(match self.1 {
                Role::Cs => Event::Cs(true),
                Role::Rs => Event::Rs(true),
                Role::Rst => Event::Rst(true),
                Role::Led => Event::Led(true),
            });
            Ok(())
        }
    }

    struct NullDelay;

    impl DelayNs for NullDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn logged_interface() -> (Interface<LogSpi, LogPin, LogPin, LogPin, LogPin>, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let interface = Interface::new(
            LogSpi(log.clone()),
            LogPin(log.clone(), Role::Cs),
            LogPin(log.clone(), Role::Rs),
            LogPin(log.clone(), Role::Rst),
            LogPin(log.clone(), Role::Led),
        );
        (interface, log)
    }

    #[test]
    fn test_write_index_frames_with_rs_low() {
        let (mut interface, log) = logged_interface();
        interface.write_index(0x22).unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            &[
                Event::Rs(false),
                Event::Cs(false),
                Event::Word(0x0022),
                Event::Flush,
                Event::Cs(true),
            ]
        );
    }

    #[test]
    fn test_write_data_frames_with_rs_high() {
        let (mut interface, log) = logged_interface();
        interface.write_data(0xF800).unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            &[
                Event::Rs(true),
                Event::Cs(false),
                Event::Word(0xF800),
                Event::Flush,
                Event::Cs(true),
            ]
        );
    }

    #[test]
    fn test_write_register_returns_cs_high_between_transactions() {
        let (mut interface, log) = logged_interface();
        interface.write_register(0x03, 0x1018).unwrap();
        let events = log.borrow();
        // Index transaction terminates before the data transaction opens.
        assert_eq!(events[4], Event::Cs(true));
        assert_eq!(events[5], Event::Rs(true));
        assert_eq!(events[6], Event::Cs(false));
        assert_eq!(events[7], Event::Word(0x1018));
        assert_eq!(*events.last().unwrap(), Event::Cs(true));
    }

    #[test]
    fn test_burst_holds_cs_until_end_write() {
        let (mut interface, log) = logged_interface();
        interface.begin_write().unwrap();
        interface.write_raw(&[1, 2]).unwrap();
        interface.write_raw(&[3]).unwrap();
        interface.end_write().unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            &[
                Event::Rs(true),
                Event::Cs(false),
                Event::Word(1),
                Event::Word(2),
                Event::Word(3),
                Event::Flush,
                Event::Cs(true),
            ]
        );
    }

    #[test]
    fn test_hard_reset_pin_sequence() {
        let (mut interface, log) = logged_interface();
        interface.hard_reset(&mut NullDelay);
        assert_eq!(
            log.borrow().as_slice(),
            &[
                Event::Rst(true),
                Event::Cs(true),
                Event::Rs(false),
                Event::Rst(false),
                Event::Rst(true),
            ]
        );
    }

    #[test]
    fn test_set_backlight() {
        let (mut interface, log) = logged_interface();
        interface.set_backlight(true).unwrap();
        interface.set_backlight(false).unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            &[Event::Led(true), Event::Led(false)]
        );
    }
}
