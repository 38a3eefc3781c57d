//! Error handling primitives for the ADS1015 driver.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// The configuration register did not read back as written during init.
    ///
    /// The device is either absent, miswired, or answering at another address.
    /// Nothing else the driver does can be trusted after this.
    Fatal {
        /// Word the device should report after init.
        expected: u16,
        /// Word actually read back.
        found: u16,
    },
}

impl<E> Error<E> {
    /// Returns `true` for errors that leave the device in an unverified state.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal { .. })
    }
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}
