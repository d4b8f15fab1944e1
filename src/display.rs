//! Core display operations
//!
//! [`Display`] owns the hardware interface and drives the chip through
//! initialization, window addressing, and the blocking pixel-transfer
//! paths. The DMA pipeline lives in [`crate::dma`].
//!
//! Screen geometry follows the chip's portrait register frame: 176 columns
//! (horizontal) by 220 lines (vertical). The landscape drawing operations
//! ([`Display::fill_rect`], [`Display::blit`], [`Display::draw_text`]) span
//! 220x176 and map onto that frame through the entry-mode transform.

use embedded_hal::delay::DelayNs;

use crate::command::{
    BLANK_PERIOD_CTRL, DISPLAY_CTRL, DRIVER_OUTPUT_CTRL, ENTRY_MODE, FRAME_CYCLE_CTRL,
    GAMMA_CTRL1, GAMMA_CTRL2, GAMMA_CTRL3, GAMMA_CTRL4, GAMMA_CTRL5, GAMMA_CTRL6, GAMMA_CTRL7,
    GAMMA_CTRL8, GAMMA_CTRL9, GAMMA_CTRL10, GATE_SCAN_CTRL, GRAM_RW, HORI_WIN_ADDR1,
    HORI_WIN_ADDR2, INTERFACE_CTRL, LCD_AC_DRIVING_CTRL, OSC_CTRL, PART_DRIVING_POS1,
    PART_DRIVING_POS2, PWR_CTRL1, PWR_CTRL2, PWR_CTRL3, PWR_CTRL4, PWR_CTRL5, RAM_ADDR_SET1,
    RAM_ADDR_SET2, SOFT_RESET, SOFT_RESET_KEY, VCI_RECYCLING, VERT_SCROLL_CTRL1,
    VERT_SCROLL_CTRL2, VERT_SCROLL_CTRL3, VERT_WIN_ADDR1, VERT_WIN_ADDR2,
};
use crate::config::Config;
use crate::error::Error;
use crate::font;
use crate::interface::RegisterInterface;

#[cfg(feature = "read")]
use crate::command::{DEVICE_CODE, DRIVER_CODE_READ};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Screen width in the chip's portrait register frame
pub const SCREEN_SIZE_X: u16 = 176;

/// Screen height in the chip's portrait register frame
pub const SCREEN_SIZE_Y: u16 = 220;

/// Settle time after zeroing the power control registers
const POWER_DOWN_SETTLE_MS: u32 = 40;

/// Settle time after writing the operating voltages
const OPERATING_POINT_SETTLE_MS: u32 = 10;

/// Settle time after enabling the booster and amplifiers
const BOOSTER_SETTLE_MS: u32 = 50;

/// Settle time after the display configuration table
const CONFIG_SETTLE_MS: u32 = 50;

/// Settle time after switching the display on
const DISPLAY_ON_SETTLE_MS: u32 = 50;

/// Words per SPI burst chunk when filling
const FILL_CHUNK: usize = 64;

/// Colour depth selection for [`Display::display_control`]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(u8)]
pub enum ColorMode {
    /// Full colour mode (2^18 colours)
    #[default]
    Full = 0,
    /// 8-colour display mode
    EightColor = 1,
}

/// Core display driver for the ILI9225
///
/// Provides the initialization sequencer, the window/addressing model and
/// the blocking pixel-transfer pipeline. For DMA-offloaded transfers, wrap
/// it in a [`DmaDisplay`](crate::dma::DmaDisplay).
///
/// The driver performs no internal locking: the bus is a single shared
/// resource and all methods take `&mut self`. Wrap the display in a mutex
/// if concurrent callers are required.
pub struct Display<I>
where
    I: RegisterInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
}

impl<I> Display<I>
where
    I: RegisterInterface,
{
    /// Create a new Display instance
    pub fn new(interface: I, config: Config) -> Self {
        Self { interface, config }
    }

    /// Run the power-up sequence and bring the display to its operating
    /// state
    ///
    /// The stages are fixed and strictly ordered: pin arm, reset pulse,
    /// power bring-up in two phases, booster enable, the display
    /// configuration table, display on, backlight on. Register values and
    /// settle times are chip constants; each stage blocks on `delay`.
    ///
    /// With the `read` feature enabled the driver code register is read
    /// back at the end, and the returned value is the signed difference
    /// between the expected device code (0x9225) and the value read; zero
    /// means the controller identified correctly. Without the feature the
    /// result is always zero. A mismatch is reported, not raised: the
    /// caller decides whether to treat it as fatal.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<i32, Error<I>> {
        // Pin arm and reset pulse. Backlight stays off until the panel is
        // configured.
        self.interface.set_backlight(false).map_err(Error::Interface)?;
        self.interface.hard_reset(delay);

        // Power bring-up, phase 1: all power control registers to zero.
        for reg in [PWR_CTRL1, PWR_CTRL2, PWR_CTRL3, PWR_CTRL4, PWR_CTRL5] {
            self.set_register(reg, 0x0000)?;
        }
        delay.delay_ms(POWER_DOWN_SETTLE_MS);

        // Phase 2: documented operating voltages, CTRL1 last.
        let operating_point: [(u8, u16); 5] = [
            // VCI 2.58V
            (PWR_CTRL2, 0x0018),
            // VGH 15.48V, VGL -10.32V
            (PWR_CTRL3, 0x6121),
            // GVDD 4.68V
            (PWR_CTRL4, 0x006F),
            // VCM 0.8030V, VML 1.104V
            (PWR_CTRL5, 0x495F),
            // Driving capability "Medium Fast 1"
            (PWR_CTRL1, 0x0800),
        ];
        for (reg, value) in operating_point {
            self.set_register(reg, value)?;
        }
        delay.delay_ms(OPERATING_POINT_SETTLE_MS);

        // Booster and amplifier enable; VCI1 raised to 2.76V.
        self.set_register(PWR_CTRL2, self.config.booster_control)?;
        delay.delay_ms(BOOSTER_SETTLE_MS);

        let setup: [(u8, u16); 32] = [
            (DRIVER_OUTPUT_CTRL, self.config.driver_output_control),
            // LCD inversion disabled
            (LCD_AC_DRIVING_CTRL, 0x0100),
            (ENTRY_MODE, self.config.entry_mode),
            // All display outputs off while configuring
            (DISPLAY_CTRL, 0x0000),
            // 8-line front and back porches
            (BLANK_PERIOD_CTRL, 0x0808),
            // 1-clock delay to gate output and edge
            (FRAME_CYCLE_CTRL, 0x1100),
            // RGB interface settings ignored
            (INTERFACE_CTRL, 0x0000),
            (OSC_CTRL, self.config.oscillator_control),
            // VCI recycling period of 2 clocks
            (VCI_RECYCLING, 0x0020),
            // RAM address counter to the origin
            (RAM_ADDR_SET1, 0x0000),
            (RAM_ADDR_SET2, 0x0000),
            // Full-screen gate scan, scroll and partial driving ranges
            (GATE_SCAN_CTRL, 0x0000),
            (VERT_SCROLL_CTRL1, 0x00DB),
            (VERT_SCROLL_CTRL2, 0x0000),
            (VERT_SCROLL_CTRL3, 0x0000),
            (PART_DRIVING_POS1, 0x00DB),
            (PART_DRIVING_POS2, 0x0000),
            // Window bounds to the full 176 x 220 screen
            (HORI_WIN_ADDR1, 0x00AF),
            (HORI_WIN_ADDR2, 0x0000),
            (VERT_WIN_ADDR1, 0x00DB),
            (VERT_WIN_ADDR2, 0x0000),
            (GAMMA_CTRL1, self.config.gamma[0]),
            (GAMMA_CTRL2, self.config.gamma[1]),
            (GAMMA_CTRL3, self.config.gamma[2]),
            (GAMMA_CTRL4, self.config.gamma[3]),
            (GAMMA_CTRL5, self.config.gamma[4]),
            (GAMMA_CTRL6, self.config.gamma[5]),
            (GAMMA_CTRL7, self.config.gamma[6]),
            (GAMMA_CTRL8, self.config.gamma[7]),
            (GAMMA_CTRL9, self.config.gamma[8]),
            (GAMMA_CTRL10, self.config.gamma[9]),
            // Full colour display enable
            (DISPLAY_CTRL, 0x0012),
        ];
        for (reg, value) in setup {
            self.set_register(reg, value)?;
        }
        delay.delay_ms(CONFIG_SETTLE_MS);

        // Display on: GON, full colour, greyscale reversal.
        self.set_register(DISPLAY_CTRL, self.config.display_control)?;
        delay.delay_ms(DISPLAY_ON_SETTLE_MS);

        self.interface.set_backlight(true).map_err(Error::Interface)?;

        let diff: i32;
        #[cfg(feature = "read")]
        {
            let code = self.register(DRIVER_CODE_READ)?;
            diff = i32::from(DEVICE_CODE) - i32::from(code);
            if diff != 0 {
                log::warn!("unexpected device code {code:#06x}");
            }
        }
        #[cfg(not(feature = "read"))]
        {
            diff = 0;
        }

        log::debug!("display initialised");
        Ok(diff)
    }

    /// Set the window that pixels will be written to
    ///
    /// The address counter wraps within the window. The RAM address
    /// registers are reset to the window's start corner, so the next pixel
    /// write targets `(hor_start, vert_start)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWindow`] unless
    /// `hor_start < hor_end < 176` and `vert_start < vert_end < 220`.
    pub fn set_window(
        &mut self,
        hor_start: u16,
        hor_end: u16,
        vert_start: u16,
        vert_end: u16,
    ) -> DisplayResult<I> {
        if hor_start >= hor_end
            || hor_end >= SCREEN_SIZE_X
            || vert_start >= vert_end
            || vert_end >= SCREEN_SIZE_Y
        {
            return Err(Error::InvalidWindow {
                hor_start,
                hor_end,
                vert_start,
                vert_end,
            });
        }

        self.set_register(HORI_WIN_ADDR1, hor_end)?;
        self.set_register(HORI_WIN_ADDR2, hor_start)?;
        self.set_register(VERT_WIN_ADDR1, vert_end)?;
        self.set_register(VERT_WIN_ADDR2, vert_start)?;
        self.set_register(RAM_ADDR_SET1, hor_start)?;
        self.set_register(RAM_ADDR_SET2, vert_start)
    }

    /// Set the GRAM address counter directly
    ///
    /// Must lie within the current window; the chip owns the counter and
    /// the driver does not check it.
    pub fn set_address(&mut self, x: u16, y: u16) -> DisplayResult<I> {
        self.set_register(RAM_ADDR_SET1, x)?;
        self.set_register(RAM_ADDR_SET2, y)
    }

    /// Set only the horizontal half of the GRAM address counter
    pub fn set_x(&mut self, x: u16) -> DisplayResult<I> {
        self.set_register(RAM_ADDR_SET1, x)
    }

    /// Write pixels to GRAM at the current address counter, blocking
    ///
    /// Issues the GRAM write index, then transmits all words under one
    /// chip-select assertion. Returns only after the full transfer has
    /// been clocked out.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferEmpty`] for an empty buffer.
    pub fn write_pixels(&mut self, pixels: &[u16]) -> DisplayResult<I> {
        if pixels.is_empty() {
            return Err(Error::BufferEmpty);
        }
        self.write_pixels_start()?;
        self.interface.write_raw(pixels).map_err(Error::Interface)?;
        self.write_pixels_end()
    }

    /// Open a GRAM write transaction
    ///
    /// Issues the GRAM write index and leaves chip select asserted with RS
    /// in data mode, so the caller can stream raw word bursts through the
    /// interface before closing the transaction with
    /// [`write_pixels_end`](Self::write_pixels_end).
    pub fn write_pixels_start(&mut self) -> DisplayResult<I> {
        self.interface.write_index(GRAM_RW).map_err(Error::Interface)?;
        self.interface.begin_write().map_err(Error::Interface)
    }

    /// Close a GRAM write transaction, deasserting chip select
    pub fn write_pixels_end(&mut self) -> DisplayResult<I> {
        self.interface.end_write().map_err(Error::Interface)
    }

    /// Fill a landscape rectangle with one colour
    ///
    /// `x` spans 0..220, `y` spans 0..176.
    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: u16) -> DisplayResult<I> {
        self.frame_landscape(x, y, w, h)?;

        let chunk = [color; FILL_CHUNK];
        let mut remaining = usize::from(w) * usize::from(h);
        while remaining > 0 {
            let n = remaining.min(FILL_CHUNK);
            self.interface
                .write_raw(&chunk[..n])
                .map_err(Error::Interface)?;
            remaining -= n;
        }

        self.write_pixels_end()
    }

    /// Fill the entire screen with one RGB565 colour
    pub fn fill(&mut self, color: u16) -> DisplayResult<I> {
        self.fill_rect(0, 0, SCREEN_SIZE_Y, SCREEN_SIZE_X, color)
    }

    /// Copy a pixel buffer to a landscape rectangle
    ///
    /// `pixels` is row-major, `w * h` RGB565 words.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferTooSmall`] when the buffer holds fewer than
    /// `w * h` words, [`Error::BufferEmpty`] when it is empty.
    pub fn blit(&mut self, pixels: &[u16], x: u16, y: u16, w: u16, h: u16) -> DisplayResult<I> {
        if pixels.is_empty() {
            return Err(Error::BufferEmpty);
        }
        let required = usize::from(w) * usize::from(h);
        if pixels.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: pixels.len(),
            });
        }

        self.frame_landscape(x, y, w, h)?;
        self.interface
            .write_raw(&pixels[..required])
            .map_err(Error::Interface)?;
        self.write_pixels_end()
    }

    /// Set a single landscape pixel to the given colour
    pub fn pixel(&mut self, x: u16, y: u16, color: u16) -> DisplayResult<I> {
        if x >= SCREEN_SIZE_Y || y >= SCREEN_SIZE_X {
            return Err(Error::InvalidRect { x, y, w: 1, h: 1 });
        }
        self.set_register(RAM_ADDR_SET1, y)?;
        self.set_register(RAM_ADDR_SET2, SCREEN_SIZE_Y - 1 - x)?;
        self.set_register(GRAM_RW, color)
    }

    /// Write text with the built-in 8x8 font
    ///
    /// `(x, y)` is the upper-left corner in landscape coordinates. Each
    /// character advances `x` by 8 columns; rendering stops silently once
    /// the next glyph would not fit on screen. No wrapping is performed.
    pub fn draw_text(&mut self, text: &str, x: u16, y: u16, fg: u16, bg: u16) -> DisplayResult<I> {
        let mut x = x;
        for c in text.chars() {
            if x.saturating_add(font::GLYPH_WIDTH) > SCREEN_SIZE_Y {
                break;
            }
            let glyph = font::render_glyph(c, fg, bg);
            self.blit(&glyph, x, y, font::GLYPH_WIDTH, font::GLYPH_HEIGHT)?;
            x += font::GLYPH_WIDTH;
        }
        Ok(())
    }

    /// Update display control: output inversion and colour depth
    pub fn display_control(&mut self, invert: bool, mode: ColorMode) -> DisplayResult<I> {
        let mut value = 0x0013;
        value |= u16::from(invert) << 2;
        value |= (mode as u16) << 3;
        self.set_register(DISPLAY_CTRL, value)
    }

    /// Update power control: driver current level and sleep mode
    ///
    /// Sleep mode stops the display and the internal oscillator.
    pub fn power_control(&mut self, drive_power: u8, sleep: bool) -> DisplayResult<I> {
        let value = (u16::from(drive_power) << 8) | u16::from(sleep);
        self.set_register(PWR_CTRL1, value)
    }

    /// Restrict the gate scan to a line range
    ///
    /// Positions are given in pixels and quantised to the chip's 8-line
    /// gate groups.
    pub fn set_gate_scan(&mut self, hor_start: u16, hor_end: u16) -> DisplayResult<I> {
        let value = 0x0100 | (hor_end / 8);
        self.set_register(DRIVER_OUTPUT_CTRL, value)?;
        self.set_register(GATE_SCAN_CTRL, hor_start / 8)
    }

    /// Set the oscillator drive frequency
    ///
    /// The low four bits of `f` select FOSC; the oscillator is left
    /// enabled.
    pub fn set_drive_freq(&mut self, f: u16) -> DisplayResult<I> {
        self.set_register(OSC_CTRL, ((f & 0x000F) << 8) | 1)
    }

    /// Perform a software reset
    pub fn soft_reset(&mut self) -> DisplayResult<I> {
        self.set_register(SOFT_RESET, SOFT_RESET_KEY)
    }

    /// Read a register's data word
    #[cfg(feature = "read")]
    pub fn register(&mut self, reg: u8) -> Result<u16, Error<I>> {
        self.interface.write_index(reg).map_err(Error::Interface)?;
        self.interface.read_data().map_err(Error::Interface)
    }

    /// Read the line currently being driven by the LCD
    ///
    /// Can help with tearing mitigation.
    #[cfg(feature = "read")]
    pub fn driving_line(&mut self) -> Result<u16, Error<I>> {
        let status = self.interface.read_status().map_err(Error::Interface)?;
        Ok(status >> 8)
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the hardware interface
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Mutably access the hardware interface
    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Release the hardware interface
    pub fn release(self) -> I {
        self.interface
    }

    /// Frame a landscape rectangle: entry mode, window, cursor, then an
    /// open GRAM write transaction
    fn frame_landscape(&mut self, x: u16, y: u16, w: u16, h: u16) -> DisplayResult<I> {
        if w == 0
            || h == 0
            || x.saturating_add(w) > SCREEN_SIZE_Y
            || y.saturating_add(h) > SCREEN_SIZE_X
        {
            return Err(Error::InvalidRect { x, y, w, h });
        }

        // The transform below is tied to the entry mode; re-assert it so
        // window and counter direction cannot drift apart.
        self.set_register(ENTRY_MODE, self.config.entry_mode)?;
        for (reg, value) in landscape_window(x, y, w, h) {
            self.set_register(reg, value)?;
        }
        self.write_pixels_start()
    }

    /// Write a register index followed by its data word
    fn set_register(&mut self, reg: u8, value: u16) -> DisplayResult<I> {
        self.interface
            .write_register(reg, value)
            .map_err(Error::Interface)
    }
}

/// Window and cursor register values for a landscape rectangle under the
/// default entry mode (vertical image, incrementing counters)
///
/// The chip's vertical axis runs opposite to the landscape x axis, so
/// vertical positions map to `219 - x`; the landscape y axis maps directly
/// onto the chip's horizontal registers.
fn landscape_window(x: u16, y: u16, w: u16, h: u16) -> [(u8, u16); 6] {
    let vert_max = SCREEN_SIZE_Y - 1 - x;
    let vert_min = SCREEN_SIZE_Y - 1 - (x + w - 1);
    [
        (HORI_WIN_ADDR1, y + h - 1),
        (HORI_WIN_ADDR2, y),
        (VERT_WIN_ADDR1, vert_max),
        (VERT_WIN_ADDR2, vert_min),
        (RAM_ADDR_SET1, y),
        (RAM_ADDR_SET2, vert_max),
    ]
}
