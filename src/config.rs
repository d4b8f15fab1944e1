//! Display configuration types and builder
//!
//! Every value defaults to the documented ILI9225 operating point; the
//! builder exists for panels that deviate from the reference module
//! (mirrored scan direction, alternate gamma curve, different oscillator
//! trim). The remaining initialization values are fixed chip constants and
//! are not configurable.

/// Entry mode used by the landscape drawing operations: vertical image,
/// incrementing horizontal and vertical address counters.
///
/// The coordinate transform in `fill_rect`/`blit` is derived from this
/// value; overriding [`Config::entry_mode`] changes what the chip does with
/// the address counter but not the transform.
pub const ENTRY_MODE_LANDSCAPE: u16 = 0x1018;

/// Display configuration
///
/// This struct holds the panel-tweakable parameters of the initialization
/// sequence. Use [`Builder`] to create a Config.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Driver output control: shift direction SS from S528 to S1, 528x220
    /// active lines
    pub driver_output_control: u16,
    /// Entry mode: address counter direction and axis order
    pub entry_mode: u16,
    /// Display control value written at the end of initialization: display
    /// on, full colour, greyscale reversal
    pub display_control: u16,
    /// Oscillator control: frequency and enable
    pub oscillator_control: u16,
    /// Power control 2 value for the booster/amplifier enable stage
    pub booster_control: u16,
    /// Gamma curve, one value per gamma control register 1-10
    pub gamma: [u16; 10],
}

impl Default for Config {
    fn default() -> Self {
        Builder::new().build()
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use ili9225::Builder;
///
/// let config = Builder::new().oscillator_control(0x0F01).build();
/// assert_eq!(config.oscillator_control, 0x0F01);
/// // Untouched knobs keep the chip defaults.
/// assert_eq!(config.entry_mode, 0x1018);
/// ```
#[must_use]
pub struct Builder {
    /// Driver output control value
    driver_output_control: u16,
    /// Entry mode value
    entry_mode: u16,
    /// Final display control value
    display_control: u16,
    /// Oscillator control value
    oscillator_control: u16,
    /// Booster enable value for power control 2
    booster_control: u16,
    /// Gamma curve values
    gamma: [u16; 10],
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            // Shift direction SS from S528 to S1, NL for 528 * 220 dots
            driver_output_control: 0x011C,
            // Vertical image, incrementing counters
            entry_mode: ENTRY_MODE_LANDSCAPE,
            // GON, full colour, REV, display on
            display_control: 0x1017,
            // 266.6 kHz oscillation, enabled
            oscillator_control: 0x0701,
            // Automatic booster, amplifiers on, VCI1 2.76V
            booster_control: 0x103B,
            // Reference module gamma curve
            gamma: [
                0x0000, 0x0808, 0x080A, 0x000A, 0x0A08, 0x0808, 0x0000, 0x0A00, 0x0710, 0x0710,
            ],
        }
    }
}

impl Builder {
    /// Create a new Builder with the chip defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the driver output control value
    pub fn driver_output_control(mut self, value: u16) -> Self {
        self.driver_output_control = value;
        self
    }

    /// Set the entry mode
    ///
    /// The landscape drawing operations assume [`ENTRY_MODE_LANDSCAPE`];
    /// see the field documentation before changing this.
    pub fn entry_mode(mut self, value: u16) -> Self {
        self.entry_mode = value;
        self
    }

    /// Set the display control value used to switch the display on
    pub fn display_control(mut self, value: u16) -> Self {
        self.display_control = value;
        self
    }

    /// Set the oscillator control value
    pub fn oscillator_control(mut self, value: u16) -> Self {
        self.oscillator_control = value;
        self
    }

    /// Set the power control 2 value for the booster enable stage
    pub fn booster_control(mut self, value: u16) -> Self {
        self.booster_control = value;
        self
    }

    /// Set the gamma curve (gamma control registers 1-10, in order)
    pub fn gamma(mut self, values: [u16; 10]) -> Self {
        self.gamma = values;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        Config {
            driver_output_control: self.driver_output_control,
            entry_mode: self.entry_mode,
            display_control: self.display_control,
            oscillator_control: self.oscillator_control,
            booster_control: self.booster_control,
            gamma: self.gamma,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_chip_operating_point() {
        let config = Config::default();
        assert_eq!(config.driver_output_control, 0x011C);
        assert_eq!(config.entry_mode, 0x1018);
        assert_eq!(config.display_control, 0x1017);
        assert_eq!(config.oscillator_control, 0x0701);
        assert_eq!(config.booster_control, 0x103B);
        assert_eq!(config.gamma[1], 0x0808);
        assert_eq!(config.gamma[9], 0x0710);
    }

    #[test]
    fn test_builder_overrides_single_field() {
        let config = Builder::new().gamma([0x0001; 10]).build();
        assert_eq!(config.gamma, [0x0001; 10]);
        assert_eq!(config.entry_mode, ENTRY_MODE_LANDSCAPE);
    }
}
