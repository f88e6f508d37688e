//! Transmit-only UART
//!
//! The Raven UART has no status register worth polling for this firmware:
//! a write to the data register sends the byte, and the link is assumed to
//! always be ready.

use core::convert::Infallible;

use crate::regs::{map, Reg};

/// Divider and data registers of the UART
#[derive(Debug, Clone, Copy)]
pub struct Uart {
    clkdiv: Reg<u32>,
    data: Reg<u32>,
}

impl Uart {
    /// The UART at its fixed Raven address
    ///
    /// # Safety
    ///
    /// Must only be called on the Raven SoC.
    pub const unsafe fn raven() -> Self {
        Self {
            clkdiv: Reg::new(map::UART_CLKDIV),
            data: Reg::new(map::UART_DATA),
        }
    }

    /// Build from arbitrary registers
    pub const fn new(clkdiv: Reg<u32>, data: Reg<u32>) -> Self {
        Self { clkdiv, data }
    }

    /// Set the baud rate divider (core clock / baud)
    pub fn set_divider(&self, div: u32) {
        self.clkdiv.write(div);
    }

    /// Send one byte
    pub fn write_byte(&self, byte: u8) {
        self.data.write(u32::from(byte));
    }
}

impl embedded_io::ErrorType for Uart {
    type Error = Infallible;
}

impl embedded_io::Write for Uart {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        for &b in buf {
            self.write_byte(b);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_io::Write;

    #[test]
    fn test_write_goes_to_data_register() {
        let mut clkdiv = 0u32;
        let mut data = 0u32;
        let mut uart = unsafe {
            Uart::new(
                Reg::from_ptr(&mut clkdiv as *mut u32),
                Reg::from_ptr(&mut data as *mut u32),
            )
        };

        uart.set_divider(8333);
        uart.write_all(b"OK").unwrap();

        assert_eq!(clkdiv, 8333);
        // Only the last byte is visible in a plain memory word
        assert_eq!(data, u32::from(b'K'));
    }
}
