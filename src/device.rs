//! High-level ADS1015 device driver implementation.

use crate::config::Config;
use crate::conversion::{to_millivolts, to_millivolts_f32};
use crate::error::{Error, Result};
use crate::interface::Ads1015Interface;
use crate::interface::bus::BusPort;
use crate::interface::i2c::I2cInterface;
use crate::interface::twi::TwiInterface;
use crate::log::{debug, error, trace};
use crate::params::{Address, Channel, ComparatorPolarity, ComparatorQueue, DataRate, Gain, Mode};
use crate::registers::{
    CONFIG_OS,
    DEFAULT_CONFIG,
    READY_HI_THRESHOLD,
    READY_LO_THRESHOLD,
    REG_CONFIG,
    REG_CONVERSION,
    REG_HI_THRESH,
    REG_LO_THRESH,
    raw_sample,
};
use embedded_hal::i2c::I2c;

/// High-level synchronous driver for the ADS1015 ADC.
///
/// The driver owns the cached `CONFIG` word. Setters only touch the cache;
/// [`start_conversion`](Self::start_conversion) pushes the whole word to the
/// device together with the start bit.
pub struct Ads1015<IFACE> {
    interface: IFACE,
    config: Config,
}

impl<IFACE> Ads1015<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided register interface.
    pub fn new(interface: IFACE) -> Self {
        Self {
            interface,
            config: Config::default(),
        }
    }

    /// Consumes the driver and returns the owned interface and cached config.
    pub fn release(self) -> (IFACE, Config) {
        (self.interface, self.config)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns the cached configuration word.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Returns the gain range the next conversion will be scaled with.
    ///
    /// The alternate ±0.256 V encodings fold onto [`Gain::V0_256`].
    pub fn gain(&self) -> Gain {
        self.config.gain().canonical()
    }

    // ==================================================================
    // == Cached Configuration Setters ==================================
    // ==================================================================
    /// Selects the input multiplexer channel.
    pub fn set_channel(&mut self, channel: Channel) {
        self.config.set_channel(channel);
    }

    /// Selects the programmable gain range.
    pub fn set_gain(&mut self, gain: Gain) {
        self.config.set_gain(gain);
    }

    /// Selects single-shot or continuous conversion.
    pub fn set_mode(&mut self, mode: Mode) {
        self.config.set_mode(mode);
    }

    /// Selects the ALERT/RDY pin polarity.
    pub fn set_irq_polarity(&mut self, polarity: ComparatorPolarity) {
        self.config.set_comp_polarity(polarity);
    }

    /// Selects the conversion data rate.
    pub fn set_data_rate(&mut self, rate: DataRate) {
        self.config.set_data_rate(rate);
    }
}

impl<BUS> Ads1015<TwiInterface<BUS>>
where
    BUS: BusPort,
{
    // ==================================================================
    // == Convenience Constructors ======================================
    // ==================================================================
    /// Convenience constructor for raw two-wire master transports.
    pub fn new_twi(bus: BUS, address: Address) -> Self {
        Self::new(TwiInterface::new(bus, address.bits()))
    }

    /// Releases the driver, returning the bus.
    pub fn release_twi(self) -> BUS {
        self.interface.release()
    }
}

impl<I2C> Ads1015<I2cInterface<I2C>>
where
    I2C: I2c,
{
    /// Convenience constructor for `embedded-hal` I²C buses.
    pub fn new_i2c(i2c: I2C, address: Address) -> Self {
        Self::new(I2cInterface::new(i2c, address.bits()))
    }

    /// Releases the driver, returning the I²C bus.
    pub fn release_i2c(self) -> I2C {
        self.interface.release()
    }
}

impl<IFACE, CommE> Ads1015<IFACE>
where
    IFACE: Ads1015Interface<Error = CommE>,
{
    // ==================================================================
    // == Register Access ===============================================
    // ==================================================================
    /// Writes a 16-bit register.
    pub fn write_register(&mut self, register: u8, value: u16) -> Result<(), CommE> {
        self.interface
            .write_register(register, value)
            .map_err(Error::from)
    }

    /// Reads a 16-bit register.
    pub fn read_register(&mut self, register: u8) -> Result<u16, CommE> {
        self.interface.read_register(register).map_err(Error::from)
    }

    // ==================================================================
    // == Initialization ================================================
    // ==================================================================
    /// Restores the power-on configuration and verifies it reads back.
    ///
    /// The start bit is held low on the write so no conversion begins; an
    /// idle device reports it high again. Any other readback means the
    /// device cannot be trusted and yields [`Error::Fatal`].
    ///
    /// The cached word is not touched, so settings made before `init` are
    /// sent with the next [`start_conversion`](Self::start_conversion).
    pub fn init(&mut self) -> Result<(), CommE> {
        self.write_register(REG_CONFIG, DEFAULT_CONFIG & !CONFIG_OS)?;
        let found = self.read_register(REG_CONFIG)?;

        if found != DEFAULT_CONFIG {
            error!("ADS1015 config readback {=u16:#x}", found);
            return Err(Error::Fatal {
                expected: DEFAULT_CONFIG,
                found,
            });
        }

        debug!("ADS1015 initialized");
        Ok(())
    }

    /// Runs [`init`](Self::init) and stops forward progress on a fatal error.
    ///
    /// Interface errors are still returned to the caller.
    pub fn init_or_halt(&mut self) -> core::result::Result<(), CommE> {
        match self.init() {
            Ok(()) => Ok(()),
            Err(Error::Interface(err)) => Err(err),
            Err(Error::Fatal { .. }) => loop {
                core::hint::spin_loop();
            },
        }
    }

    // ==================================================================
    // == Conversion Control ============================================
    // ==================================================================
    /// Writes the cached configuration with the start bit set.
    pub fn start_conversion(&mut self) -> Result<(), CommE> {
        let word = u16::from(self.config) | CONFIG_OS;
        trace!("ADS1015 start {=u16:#x}", word);
        self.write_register(REG_CONFIG, word)
    }

    /// Turns ALERT/RDY into a conversion-ready signal.
    ///
    /// Thresholds are set so the comparator always trips and the cached
    /// comparator queue asserts after every conversion. The queue change is
    /// only sent with the next configuration write.
    pub fn enable_alarm_interrupt(&mut self) -> Result<(), CommE> {
        self.write_register(REG_HI_THRESH, READY_HI_THRESHOLD)?;
        self.write_register(REG_LO_THRESH, READY_LO_THRESHOLD)?;
        self.config.set_comp_queue(ComparatorQueue::One);
        Ok(())
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Reads the right-aligned 12-bit sample.
    pub fn read_raw(&mut self) -> Result<i16, CommE> {
        self.read_register(REG_CONVERSION).map(raw_sample)
    }

    /// Reads the last conversion in millivolts using integer scaling.
    ///
    /// See [`to_millivolts`] for the precision trade-off on high gains.
    pub fn read_conversion_integer(&mut self) -> Result<i16, CommE> {
        let sample = self.read_raw()?;
        Ok(to_millivolts(sample, self.gain()))
    }

    /// Reads the last conversion in millivolts using exact scaling.
    pub fn read_conversion_float(&mut self) -> Result<f32, CommE> {
        let sample = self.read_raw()?;
        Ok(to_millivolts_f32(sample, self.gain()))
    }
}
