//! GPIO register block

use crate::regs::{map, Reg};

/// The four GPIO registers, each a bit-per-pin mask
#[derive(Debug, Clone, Copy)]
pub struct Gpio {
    /// Pin levels
    pub data: Reg<u32>,
    /// Output enable, active low (0 = output)
    pub ena: Reg<u32>,
    /// Pull-up enable
    pub pu: Reg<u32>,
    /// Pull-down enable
    pub pd: Reg<u32>,
}

impl Gpio {
    /// The block at its fixed Raven address
    ///
    /// # Safety
    ///
    /// Must only be called on the Raven SoC.
    pub const unsafe fn raven() -> Self {
        Self {
            data: Reg::new(map::GPIO_DATA),
            ena: Reg::new(map::GPIO_ENA),
            pu: Reg::new(map::GPIO_PU),
            pd: Reg::new(map::GPIO_PD),
        }
    }

    /// Program direction and pulls
    pub fn configure(&self, ena: u32, pu: u32, pd: u32) {
        self.ena.write(ena);
        self.pu.write(pu);
        self.pd.write(pd);
    }

    /// Drive the data register
    pub fn set(&self, data: u32) {
        self.data.write(data);
    }
}
