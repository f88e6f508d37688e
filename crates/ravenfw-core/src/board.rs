//! Raven testboard configuration
//!
//! Everything here is fixed at build time; the firmware has no storage to
//! read settings from. The `raven2` feature selects the Raven 2 testboard,
//! otherwise the constants describe the Raven 1 board.

use crate::delay::CycleDelay;
use crate::gpio::Gpio;
use crate::spi::SpiCtrlReg;
use crate::uart::Uart;

/// Console baud rate
pub const BAUD_RATE: u32 = 9600;

/// Core clock of the Raven 2 testboard (Hz)
#[cfg(feature = "raven2")]
pub const CORE_CLOCK_HZ: u32 = 80_000_000;
/// Core clock of the Raven 1 testboard (Hz)
#[cfg(not(feature = "raven2"))]
pub const CORE_CLOCK_HZ: u32 = 100_000_000;

/// UART divider for [`BAUD_RATE`] at [`CORE_CLOCK_HZ`]
#[cfg(feature = "raven2")]
pub const UART_CLKDIV: u32 = 8333;
/// UART divider for [`BAUD_RATE`] at [`CORE_CLOCK_HZ`]
#[cfg(not(feature = "raven2"))]
pub const UART_CLKDIV: u32 = 10417;

/// Settling time after power-on before the demo starts
pub const STARTUP_DELAY: CycleDelay = CycleDelay::new(170_000);
/// Time each LED pattern stays on
pub const STEP_DELAY: CycleDelay = CycleDelay::new(70_000);

/// GPIO pins wired to the board LEDs
pub const LED_MASK: u32 = 0x000f;

/// The board's peripherals
#[derive(Debug)]
pub struct Board {
    /// SPI flash controller
    pub spictrl: SpiCtrlReg,
    /// LED GPIO block
    pub gpio: Gpio,
    /// Console UART
    pub uart: Uart,
}

impl Board {
    /// Accessors for the fixed Raven peripherals
    ///
    /// # Safety
    ///
    /// Only valid on the Raven SoC. Creating more than one `Board` gives
    /// aliasing accessors; the single foreground loop must own the only one.
    pub unsafe fn take() -> Self {
        Self {
            spictrl: SpiCtrlReg::raven(),
            gpio: Gpio::raven(),
            uart: Uart::raven(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uart_divider_matches_clock() {
        let div = CORE_CLOCK_HZ / BAUD_RATE;
        assert!(UART_CLKDIV.abs_diff(div) <= 1);
    }
}
