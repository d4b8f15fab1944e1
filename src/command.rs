//! ILI9225 register definitions
//!
//! This module defines the register indices used to control the ILI9225
//! TFT display controller. Register access is 16-bit: the index register
//! is written with the RS pin low, and register data or GRAM pixel bursts
//! are written with the RS pin high.
//!
//! ## Transaction Structure
//!
//! All register writes follow the pattern:
//! 1. Set RS low (index mode), assert CS
//! 2. Send the 16-bit register index, deassert CS
//! 3. Set RS high (data mode), assert CS
//! 4. Send one 16-bit data word (or a pixel burst for [`GRAM_RW`])
//! 5. Deassert CS
//!
//! On writes to GRAM the chip's internal address counter increments
//! automatically according to the entry mode register.

// Identification and driver control

/// Driver Code Read (0x00, RW)
///
/// Reading returns the device code [`DEVICE_CODE`]. Writing 0x0001 starts
/// the internal oscillator; at least 10ms must pass afterwards to let it
/// stabilise (see [`START_OSCILLATION`]).
pub const DRIVER_CODE_READ: u8 = 0x00;

/// Start Oscillation (0x00, W)
///
/// Shares the index with [`DRIVER_CODE_READ`].
pub const START_OSCILLATION: u8 = 0x00;

/// Driver Output Control (0x01, W)
///
/// Sync polarity (VSPL/HSPL/DPL/EPL), gate scan order (SM), shift
/// directions (GS/SS) and the active gate driver lines (NL).
pub const DRIVER_OUTPUT_CTRL: u8 = 0x01;

/// LCD AC Driving Waveform Control (0x02, W)
///
/// Inversion method (INV) and 3-field interlaced scanning (FLD).
pub const LCD_AC_DRIVING_CTRL: u8 = 0x02;

/// Entry Mode (0x03, W)
///
/// BGR swap, 80-mode data format (MDT), horizontal/vertical address counter
/// increment or decrement (ID1/ID0) and GRAM update direction (AM).
pub const ENTRY_MODE: u8 = 0x03;

/// Display Control 1 (0x07, W)
///
/// Frame flag output (TEMON), gate driver output level (GON), 8-colour mode
/// select (CL), greyscale reversal (REV) and display output on/off (D).
pub const DISPLAY_CTRL: u8 = 0x07;

/// Display Control 2 / Blank Period Control (0x08, W)
///
/// Front and back porch line counts. I80, M68 and RGB modes only.
pub const BLANK_PERIOD_CTRL: u8 = 0x08;

/// Frame Cycle Control (0x0B, W)
///
/// Gate output non-overlay (NO), gate-to-source delay (SDT) and clocks per
/// display line (RTN). RGB mode only.
pub const FRAME_CYCLE_CTRL: u8 = 0x0B;

/// RGB Input Interface Control (0x0C, W)
///
/// RGB mode only; ignored for the serial interface.
pub const INTERFACE_CTRL: u8 = 0x0C;

/// Oscillator Control (0x0F, W)
///
/// Oscillation frequency (FOSC) and oscillator enable (OSC_EN). Starting
/// the oscillator from halt requires a 10ms wait.
pub const OSC_CTRL: u8 = 0x0F;

// Power control

/// Power Control 1 (0x10, W)
///
/// Driver current level (SAP), deep standby (DSTB) and sleep mode (STB).
pub const PWR_CTRL1: u8 = 0x10;

/// Power Control 2 (0x11, W)
///
/// Automatic boosting (APON), per-circuit boosting (PON), amplifier
/// operation (AON/VCL1EN) and VCI1 voltage output (VC).
pub const PWR_CTRL2: u8 = 0x11;

/// Power Control 3 (0x12, W)
///
/// Boost converter output factor (BT) and per-circuit operating
/// frequencies (DC1/DC2/DC3).
pub const PWR_CTRL3: u8 = 0x12;

/// Power Control 4 (0x13, W)
///
/// Gamma voltage GVDD, from 2.66V to 5.5V.
pub const PWR_CTRL4: u8 = 0x13;

/// Power Control 5 (0x14, W)
///
/// VCOM amplitude (VCOMG), VCOMH voltage (VCM) and alternating VCOM
/// amplitude (VML), all relative to GVDD.
pub const PWR_CTRL5: u8 = 0x14;

/// VCI Recycling (0x15, W)
///
/// Number of clock cycles in the VCI recycling period.
pub const VCI_RECYCLING: u8 = 0x15;

// GRAM addressing

/// RAM Address Set 1 (0x20, W)
///
/// Low half of the address counter's initial value (AD[7:0]). Targets the
/// chip's horizontal axis.
pub const RAM_ADDR_SET1: u8 = 0x20;

/// RAM Address Set 2 (0x21, W)
///
/// High half of the address counter's initial value (AD[15:8]). Targets the
/// chip's vertical axis.
pub const RAM_ADDR_SET2: u8 = 0x21;

/// Read/Write GRAM Data (0x22, RW)
///
/// Pixel data port. The address counter advances automatically per the
/// entry mode after each access.
pub const GRAM_RW: u8 = 0x22;

/// Software Reset (0x28, W)
///
/// Performs a software reset when [`SOFT_RESET_KEY`] is written.
pub const SOFT_RESET: u8 = 0x28;

// Scan, scroll and window control

/// Gate Scan Control (0x30, W)
///
/// Line to start the gate scan from (SCN).
pub const GATE_SCAN_CTRL: u8 = 0x30;

/// Vertical Scroll Control 1 (0x31, W)
///
/// Scroll end address (SEA).
pub const VERT_SCROLL_CTRL1: u8 = 0x31;

/// Vertical Scroll Control 2 (0x32, W)
///
/// Scroll start address (SSA).
pub const VERT_SCROLL_CTRL2: u8 = 0x32;

/// Vertical Scroll Control 3 (0x33, W)
///
/// Scroll step (SST).
pub const VERT_SCROLL_CTRL3: u8 = 0x33;

/// Partial Screen Driving Position 1 (0x34, W)
///
/// Screen end position (SE).
pub const PART_DRIVING_POS1: u8 = 0x34;

/// Partial Screen Driving Position 2 (0x35, W)
///
/// Screen start position (SS).
pub const PART_DRIVING_POS2: u8 = 0x35;

/// Horizontal RAM Address Position, end (0x36, W)
pub const HORI_WIN_ADDR1: u8 = 0x36;

/// Horizontal RAM Address Position, start (0x37, W)
pub const HORI_WIN_ADDR2: u8 = 0x37;

/// Vertical RAM Address Position, end (0x38, W)
pub const VERT_WIN_ADDR1: u8 = 0x38;

/// Vertical RAM Address Position, start (0x39, W)
pub const VERT_WIN_ADDR2: u8 = 0x39;

// Gamma correction

/// Gamma Control 1 (0x50, W)
pub const GAMMA_CTRL1: u8 = 0x50;
/// Gamma Control 2 (0x51, W)
pub const GAMMA_CTRL2: u8 = 0x51;
/// Gamma Control 3 (0x52, W)
pub const GAMMA_CTRL3: u8 = 0x52;
/// Gamma Control 4 (0x53, W)
pub const GAMMA_CTRL4: u8 = 0x53;
/// Gamma Control 5 (0x54, W)
pub const GAMMA_CTRL5: u8 = 0x54;
/// Gamma Control 6 (0x55, W)
pub const GAMMA_CTRL6: u8 = 0x55;
/// Gamma Control 7 (0x56, W)
pub const GAMMA_CTRL7: u8 = 0x56;
/// Gamma Control 8 (0x57, W)
pub const GAMMA_CTRL8: u8 = 0x57;
/// Gamma Control 9 (0x58, W)
pub const GAMMA_CTRL9: u8 = 0x58;
/// Gamma Control 10 (0x59, W)
pub const GAMMA_CTRL10: u8 = 0x59;

/// Device code returned by [`DRIVER_CODE_READ`] on a genuine ILI9225.
pub const DEVICE_CODE: u16 = 0x9225;

/// Magic value that triggers a reset when written to [`SOFT_RESET`].
pub const SOFT_RESET_KEY: u16 = 0x00CE;
