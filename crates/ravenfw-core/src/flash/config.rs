//! Flash read latency configuration
//!
//! The read latency has to change on both ends of the link: the memory
//! controller must insert the same number of dummy cycles the chip waits
//! before returning data. The chip's single-register volatile write does not
//! take effect on this board, so the new value is written with the command
//! that sets SR1, CR1, CR2 and CR3 at once. That command also switches the
//! chip's quad and DDR transfers off; re-enable them afterwards if needed.

use core::fmt;

use log::debug;

use crate::error::{Error, Result};
use crate::flashio::FlashIo;
use crate::spi::{FlashioCommand, SpiCtrlReg, LATENCY_MASK, LATENCY_SHIFT};

/// Read latency in dummy clock cycles (4-bit field, 0-15)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Latency(u8);

impl Latency {
    /// Largest value the field can hold
    pub const MAX: u8 = 15;

    /// Number of dummy cycles
    pub const fn cycles(&self) -> u8 {
        self.0
    }

    /// Extract the latency from a SPI control register value
    pub const fn from_field(ctrl: u32) -> Self {
        Self(((ctrl & LATENCY_MASK) >> LATENCY_SHIFT) as u8)
    }
}

impl TryFrom<u8> for Latency {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        if value > Self::MAX {
            return Err(Error::InvalidLatency(value));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for Latency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cycles", self.0)
    }
}

/// Change the flash read latency
///
/// Updates the controller's latency field (read-modify-write, which also
/// clears its DDR/QSPI/CRM bits), then sends one five-byte combined register
/// write to the chip behind a volatile write enable. Nothing is read back;
/// use [`report_all`](super::report_all) to check the result.
pub fn set_latency<F: FlashIo + ?Sized>(
    ctrl: &SpiCtrlReg,
    io: &mut F,
    latency: Latency,
) -> Result<()> {
    debug!("Setting flash latency to {}", latency);
    ctrl.set_latency(latency);

    let mut cmd = FlashioCommand::write_all_registers(latency);
    io.execute(&mut cmd)
}
