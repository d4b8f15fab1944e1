//! Asynchronous DMA pixel pipeline
//!
//! This module provides the [`DmaDisplay`] wrapper, which adds a
//! DMA-offloaded bulk write path to a [`Display`], and the [`DmaChannel`]
//! trait abstracting the platform's DMA engine.
//!
//! ## Transfer lifecycle
//!
//! A transfer walks the state machine
//! `Idle -> Framed -> Armed -> Completing -> Idle` with no skipped states:
//!
//! 1. [`DmaDisplay::write`] opens the GRAM transaction (chip select stays
//!    asserted) and triggers the channel, then returns without blocking.
//! 2. The platform's interrupt handler for the bound line calls
//!    [`DmaDisplay::on_interrupt`], which closes the framing, acknowledges
//!    the interrupt condition, and invokes the registered completion
//!    callback exactly once.
//!
//! Only one transfer may be in flight; a second [`DmaDisplay::write`]
//! before the completion callback has fired is rejected with
//! [`DmaError::Busy`] rather than corrupting the chip-select framing.
//!
//! The callback runs in interrupt context: it must not block, and because
//! the state machine is already back to `Idle` when it runs, it may start
//! the next transfer.
//!
//! No timeout is defined for a transfer: if the channel stalls, the
//! completion never fires. Implementations that need an upper bound should
//! layer a watchdog on top.

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;

use crate::display::Display;
use crate::error::Error;
use crate::interface::RegisterInterface;

/// DMA completion interrupt line selector
///
/// The original register-level API took a bare line number and silently
/// ignored invalid ones; the enum makes an invalid selector
/// unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IrqLine {
    /// First DMA interrupt line
    Irq0,
    /// Second DMA interrupt line
    Irq1,
}

/// Completion callback: a plain function pointer, invoked from interrupt
/// context
pub type CompletionCallback = fn();

/// Trait for the DMA engine behind the pixel pipeline
///
/// Implementations own one transmit channel and its reusable transfer
/// descriptor. The descriptor is reconfigured, never reallocated, across
/// transfers.
pub trait DmaChannel {
    /// Error type for channel operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Set the descriptor's fixed parameters
    ///
    /// 16-bit element width, paced by the bus's transmit data-request
    /// signal, targeting the bus data register. Called once by
    /// [`DmaDisplay::init`], never per transfer.
    fn configure(&mut self) -> Result<(), Self::Error>;

    /// Load the descriptor with a source buffer and trigger the burst
    ///
    /// Must transfer exactly `words.len()` 16-bit elements. The `'static`
    /// bound keeps the buffer alive while the hardware drains it.
    fn start(&mut self, words: &'static [u16]) -> Result<(), Self::Error>;

    /// Enable the completion interrupt on the given line
    fn enable_irq(&mut self, line: IrqLine);

    /// Acknowledge the completion interrupt condition on the given line
    fn clear_irq(&mut self, line: IrqLine);
}

/// State of the DMA pixel transfer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransferState {
    /// No transfer in flight; chip select deasserted
    #[default]
    Idle,
    /// GRAM transaction opened, chip select asserted
    Framed,
    /// Descriptor loaded and triggered
    Armed,
    /// Completion interrupt taken, framing being closed
    Completing,
}

/// Errors that can occur on the DMA pipeline
#[derive(Debug)]
pub enum DmaError<I: RegisterInterface, CH: DmaChannel> {
    /// Display or interface error
    Display(Error<I>),
    /// DMA channel error
    Channel(CH::Error),
    /// A transfer is already in flight
    Busy,
}

impl<I: RegisterInterface, CH: DmaChannel> core::fmt::Display for DmaError<I, CH> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Display(e) => write!(f, "Display error: {e}"),
            Self::Channel(_) => write!(f, "DMA channel error"),
            Self::Busy => write!(f, "DMA transfer already in flight"),
        }
    }
}

impl<I, CH> core::error::Error for DmaError<I, CH>
where
    I: RegisterInterface + Debug,
    CH: DmaChannel + Debug,
{
}

/// Display with a DMA-offloaded pixel write path
///
/// Wraps a [`Display`] together with a [`DmaChannel`] and the completion
/// callback registration. The callback and interrupt line are owned by
/// this instance, not process-wide state; re-binding overwrites the
/// previous registration.
///
/// The blocking operations remain available through
/// [`display_mut`](Self::display_mut).
pub struct DmaDisplay<I, CH>
where
    I: RegisterInterface,
    CH: DmaChannel,
{
    /// Wrapped display driver
    display: Display<I>,
    /// DMA transmit channel
    channel: CH,
    /// Transfer state machine
    state: TransferState,
    /// Bound completion interrupt line
    irq: Option<IrqLine>,
    /// Registered completion callback
    on_complete: Option<CompletionCallback>,
}

impl<I, CH> DmaDisplay<I, CH>
where
    I: RegisterInterface,
    CH: DmaChannel,
{
    /// Wrap a display and a DMA channel
    pub fn new(display: Display<I>, channel: CH) -> Self {
        Self {
            display,
            channel,
            state: TransferState::Idle,
            irq: None,
            on_complete: None,
        }
    }

    /// Initialize the display and the transfer descriptor
    ///
    /// Runs [`Display::init`], then sets the descriptor's fixed parameters
    /// for later reuse. Returns the identification difference from the
    /// inner init.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<i32, DmaError<I, CH>> {
        let diff = self.display.init(delay).map_err(DmaError::Display)?;
        self.channel.configure().map_err(DmaError::Channel)?;
        Ok(diff)
    }

    /// Bind the completion interrupt and register the callback
    ///
    /// At most one callback/line pair is active; calling again replaces
    /// the previous binding.
    pub fn bind_interrupt(&mut self, line: IrqLine, callback: CompletionCallback) {
        self.channel.enable_irq(line);
        self.irq = Some(line);
        self.on_complete = Some(callback);
        log::debug!("dma completion bound to {line:?}");
    }

    /// Start an asynchronous pixel write
    ///
    /// Opens the GRAM transaction (chip select stays asserted), loads the
    /// transfer descriptor with `pixels` and triggers it, then returns
    /// without waiting. The registered callback fires from interrupt
    /// context once the burst has drained.
    ///
    /// # Errors
    ///
    /// - [`DmaError::Busy`] if a transfer is already in flight
    /// - [`Error::BufferEmpty`] (wrapped) for an empty buffer
    /// - Channel or interface errors; a channel failure closes the framing
    ///   again before returning
    pub fn write(&mut self, pixels: &'static [u16]) -> Result<(), DmaError<I, CH>> {
        if pixels.is_empty() {
            return Err(DmaError::Display(Error::BufferEmpty));
        }
        if self.state != TransferState::Idle {
            return Err(DmaError::Busy);
        }

        self.display
            .write_pixels_start()
            .map_err(DmaError::Display)?;
        self.state = TransferState::Framed;

        match self.channel.start(pixels) {
            Ok(()) => {
                self.state = TransferState::Armed;
                Ok(())
            }
            Err(e) => {
                // Channel never armed; release chip select so the bus is
                // usable again.
                let _ = self.display.write_pixels_end();
                self.state = TransferState::Idle;
                Err(DmaError::Channel(e))
            }
        }
    }

    /// Service the DMA completion interrupt
    ///
    /// To be called from the interrupt handler of the bound line. Closes
    /// the transaction framing, acknowledges the interrupt condition and
    /// invokes the registered callback exactly once per transfer. Calls
    /// with no transfer armed are ignored.
    ///
    /// Interface errors while deasserting chip select cannot be propagated
    /// out of interrupt context and are dropped.
    pub fn on_interrupt(&mut self) {
        if self.state != TransferState::Armed {
            return;
        }
        self.state = TransferState::Completing;

        let _ = self.display.write_pixels_end();
        if let Some(line) = self.irq {
            self.channel.clear_irq(line);
        }
        self.state = TransferState::Idle;

        if let Some(callback) = self.on_complete {
            callback();
        }
    }

    /// Current transfer state
    pub fn state(&self) -> TransferState {
        self.state
    }

    /// Access the wrapped display
    pub fn display(&self) -> &Display<I> {
        &self.display
    }

    /// Mutably access the wrapped display
    ///
    /// Blocking operations must not be interleaved with an in-flight
    /// transfer; check [`state`](Self::state) first.
    pub fn display_mut(&mut self) -> &mut Display<I> {
        &mut self.display
    }

    /// Release the wrapped display and channel
    pub fn release(self) -> (Display<I>, CH) {
        (self.display, self.channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use alloc::vec::Vec;
    use core::convert::Infallible;
    use core::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum BusOp {
        Index(u8),
        Begin,
        End,
    }

    #[derive(Debug)]
    struct MockInterface {
        ops: Vec<BusOp>,
    }

    impl MockInterface {
        fn new() -> Self {
            Self { ops: Vec::new() }
        }

        fn framing_open(&self) -> bool {
            let begins = self.ops.iter().filter(|op| **op == BusOp::Begin).count();
            let ends = self.ops.iter().filter(|op| **op == BusOp::End).count();
            begins > ends
        }
    }

    impl RegisterInterface for MockInterface {
        type Error = Infallible;

        fn write_index(&mut self, reg: u8) -> Result<(), Self::Error> {
            self.ops.push(BusOp::Index(reg));
            Ok(())
        }

        fn write_data(&mut self, _value: u16) -> Result<(), Self::Error> {
            Ok(())
        }

        fn begin_write(&mut self) -> Result<(), Self::Error> {
            self.ops.push(BusOp::Begin);
            Ok(())
        }

        fn write_raw(&mut self, _words: &[u16]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn end_write(&mut self) -> Result<(), Self::Error> {
            self.ops.push(BusOp::End);
            Ok(())
        }

        #[cfg(feature = "read")]
        fn read_data(&mut self) -> Result<u16, Self::Error> {
            Ok(crate::command::DEVICE_CODE)
        }

        #[cfg(feature = "read")]
        fn read_status(&mut self) -> Result<u16, Self::Error> {
            Ok(0)
        }

        fn hard_reset<D: DelayNs>(&mut self, _delay: &mut D) {}

        fn set_backlight(&mut self, _on: bool) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum ChannelOp {
        Configure,
        Start(usize),
        EnableIrq(IrqLine),
        ClearIrq(IrqLine),
    }

    #[derive(Debug)]
    struct MockChannel {
        ops: Vec<ChannelOp>,
        fail_start: bool,
    }

    impl MockChannel {
        fn new() -> Self {
            Self {
                ops: Vec::new(),
                fail_start: false,
            }
        }
    }

    #[derive(Debug)]
    struct ChannelFault;

    impl DmaChannel for MockChannel {
        type Error = ChannelFault;

        fn configure(&mut self) -> Result<(), Self::Error> {
            self.ops.push(ChannelOp::Configure);
            Ok(())
        }

        fn start(&mut self, words: &'static [u16]) -> Result<(), Self::Error> {
            if self.fail_start {
                return Err(ChannelFault);
            }
            self.ops.push(ChannelOp::Start(words.len()));
            Ok(())
        }

        fn enable_irq(&mut self, line: IrqLine) {
            self.ops.push(ChannelOp::EnableIrq(line));
        }

        fn clear_irq(&mut self, line: IrqLine) {
            self.ops.push(ChannelOp::ClearIrq(line));
        }
    }

    struct NullDelay;

    impl DelayNs for NullDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    static PIXELS: [u16; 4] = [0xF800, 0x07E0, 0x001F, 0xFFFF];

    fn test_dma_display() -> DmaDisplay<MockInterface, MockChannel> {
        DmaDisplay::new(
            Display::new(MockInterface::new(), Config::default()),
            MockChannel::new(),
        )
    }

    #[test]
    fn test_init_configures_descriptor_once() {
        let mut dma = test_dma_display();
        dma.init(&mut NullDelay).unwrap();
        assert_eq!(dma.channel.ops, [ChannelOp::Configure]);
    }

    #[test]
    fn test_write_arms_descriptor_with_buffer_length() {
        let mut dma = test_dma_display();
        dma.write(&PIXELS).unwrap();

        assert_eq!(dma.state(), TransferState::Armed);
        assert_eq!(dma.channel.ops, [ChannelOp::Start(4)]);
        // GRAM index issued and chip select still asserted.
        assert_eq!(
            dma.display.interface().ops,
            [BusOp::Index(0x22), BusOp::Begin]
        );
        assert!(dma.display.interface().framing_open());
    }

    #[test]
    fn test_callback_fires_exactly_once_after_completion() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        fn bump() {
            CALLS.fetch_add(1, Ordering::SeqCst);
        }

        let mut dma = test_dma_display();
        dma.bind_interrupt(IrqLine::Irq0, bump);
        dma.write(&PIXELS).unwrap();
        // Strictly after transfer start, never before.
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);

        dma.on_interrupt();
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
        assert_eq!(dma.state(), TransferState::Idle);
        assert!(!dma.display.interface().framing_open());
        assert!(dma.channel.ops.contains(&ChannelOp::ClearIrq(IrqLine::Irq0)));

        // A spurious interrupt with nothing armed is ignored.
        dma.on_interrupt();
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_second_write_while_armed_is_rejected() {
        let mut dma = test_dma_display();
        dma.write(&PIXELS).unwrap();
        assert!(matches!(dma.write(&PIXELS), Err(DmaError::Busy)));

        // The in-flight framing is untouched.
        assert_eq!(dma.state(), TransferState::Armed);
        assert_eq!(dma.channel.ops, [ChannelOp::Start(4)]);
        assert!(dma.display.interface().framing_open());
    }

    #[test]
    fn test_write_can_rearm_after_completion() {
        let mut dma = test_dma_display();
        dma.write(&PIXELS).unwrap();
        dma.on_interrupt();
        dma.write(&PIXELS).unwrap();
        assert_eq!(
            dma.channel.ops,
            [ChannelOp::Start(4), ChannelOp::Start(4)]
        );
    }

    #[test]
    fn test_write_rejects_empty_buffer() {
        static EMPTY: [u16; 0] = [];
        let mut dma = test_dma_display();
        assert!(matches!(
            dma.write(&EMPTY),
            Err(DmaError::Display(Error::BufferEmpty))
        ));
        assert_eq!(dma.state(), TransferState::Idle);
    }

    #[test]
    fn test_channel_failure_releases_framing() {
        let mut dma = test_dma_display();
        dma.channel.fail_start = true;
        assert!(matches!(dma.write(&PIXELS), Err(DmaError::Channel(_))));
        assert_eq!(dma.state(), TransferState::Idle);
        assert!(!dma.display.interface().framing_open());
    }

    #[test]
    fn test_rebinding_overwrites_callback_and_line() {
        static FIRST: AtomicUsize = AtomicUsize::new(0);
        static SECOND: AtomicUsize = AtomicUsize::new(0);
        fn first() {
            FIRST.fetch_add(1, Ordering::SeqCst);
        }
        fn second() {
            SECOND.fetch_add(1, Ordering::SeqCst);
        }

        let mut dma = test_dma_display();
        dma.bind_interrupt(IrqLine::Irq0, first);
        dma.bind_interrupt(IrqLine::Irq1, second);

        dma.write(&PIXELS).unwrap();
        dma.on_interrupt();

        assert_eq!(FIRST.load(Ordering::SeqCst), 0);
        assert_eq!(SECOND.load(Ordering::SeqCst), 1);
        assert!(dma.channel.ops.contains(&ChannelOp::ClearIrq(IrqLine::Irq1)));
    }
}
