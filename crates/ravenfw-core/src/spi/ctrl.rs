//! Raven SPI memory controller configuration register
//!
//! The controller has two personalities. With `MEMIO_EN` set it serves
//! instruction and data fetches from flash on its own, using the mode and
//! latency fields. With `MEMIO_EN` clear the low bytes drive the flash pins
//! directly, which is what the flash worker does.
//!
//! | Bits  | Field                                  |
//! |-------|----------------------------------------|
//! | 31    | memory-mapped mode enable              |
//! | 22    | DDR enable                             |
//! | 21    | QSPI enable                            |
//! | 20    | continuous read mode (CRM)             |
//! | 19:16 | read latency (dummy cycles)            |
//! | 11:8  | IO output enables (manual mode)        |
//! | 5     | chip select, active low (manual mode)  |
//! | 4     | clock (manual mode)                    |
//! | 3:0   | IO data (manual mode)                  |

use bitflags::bitflags;
use log::debug;

use super::FlashMode;
use crate::flash::Latency;
use crate::regs::{map, Reg};

bitflags! {
    /// SPI control register bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SpiCtrl: u32 {
        /// Memory-mapped (MEMIO) mode enable
        const MEMIO_EN = 1 << 31;
        /// Double data rate
        const DDR      = 1 << 22;
        /// Quad SPI
        const QSPI     = 1 << 21;
        /// Continuous read mode
        const CRM      = 1 << 20;
        /// IO3 output enable
        const OE3      = 1 << 11;
        /// IO2 output enable
        const OE2      = 1 << 10;
        /// IO1 output enable
        const OE1      = 1 << 9;
        /// IO0 output enable
        const OE0      = 1 << 8;
        /// Chip select (high = deselected)
        const CSB      = 1 << 5;
        /// Clock
        const CLK      = 1 << 4;
        /// IO3 data
        const IO3      = 1 << 3;
        /// IO2 data
        const IO2      = 1 << 2;
        /// IO1 data (MISO in single-line mode)
        const IO1      = 1 << 1;
        /// IO0 data (MOSI in single-line mode)
        const IO0      = 1 << 0;

        /// Mode bits cleared by a mode change
        const MODE_MASK = Self::DDR.bits() | Self::QSPI.bits() | Self::CRM.bits();
    }
}

/// Position of the read latency field
pub const LATENCY_SHIFT: u32 = 16;
/// Read latency field (bits 16-19)
pub const LATENCY_MASK: u32 = 0x000f_0000;
/// Everything a latency change resets: latency, CRM, QSPI and DDR (bits 16-22)
pub const CONFIG_MASK: u32 = 0x007f_0000;

/// Accessor for the SPI control register
#[derive(Debug, Clone, Copy)]
pub struct SpiCtrlReg {
    reg: Reg<u32>,
}

impl SpiCtrlReg {
    /// The controller at its fixed Raven address
    ///
    /// # Safety
    ///
    /// Must only be called on the Raven SoC (or an equivalent memory map).
    pub const unsafe fn raven() -> Self {
        Self {
            reg: Reg::new(map::SPICTRL),
        }
    }

    /// Wrap an arbitrary register
    pub const fn new(reg: Reg<u32>) -> Self {
        Self { reg }
    }

    /// The underlying register
    pub fn reg(&self) -> Reg<u32> {
        self.reg
    }

    /// Current register contents as flags
    pub fn read(&self) -> SpiCtrl {
        SpiCtrl::from_bits_retain(self.reg.read())
    }

    /// Currently programmed read latency
    pub fn latency(&self) -> Latency {
        Latency::from_field(self.reg.read())
    }

    /// Program the controller's read latency
    ///
    /// Clears bits 16-22 before inserting the new value, so DDR, QSPI and
    /// continuous read mode are switched off on the controller side as well.
    /// Every other bit is preserved.
    pub fn set_latency(&self, latency: Latency) {
        debug!("spictrl: latency {}", latency.cycles());
        self.reg
            .modify(|v| (v & !CONFIG_MASK) | (u32::from(latency.cycles()) << LATENCY_SHIFT));
    }

    /// Currently selected read mode
    pub fn mode(&self) -> FlashMode {
        FlashMode::from_ctrl(self.read())
    }

    /// Select the read mode; also leaves continuous read mode off
    pub fn set_mode(&self, mode: FlashMode) {
        debug!("spictrl: mode {:?}", mode);
        self.reg
            .modify(|v| (v & !SpiCtrl::MODE_MASK.bits()) | mode.ctrl_bits().bits());
    }

    /// Enable or disable continuous read mode
    pub fn set_crm(&self, enable: bool) {
        self.reg.modify(|v| {
            if enable {
                v | SpiCtrl::CRM.bits()
            } else {
                v & !SpiCtrl::CRM.bits()
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl(backing: &mut u32) -> SpiCtrlReg {
        SpiCtrlReg::new(unsafe { Reg::from_ptr(backing as *mut u32) })
    }

    #[test]
    fn test_set_latency_preserves_other_bits() {
        let mut backing = 0x8000_0000 | 0x0070_0000 | 0x0003_0000 | 0x0000_0f3f;
        ctrl(&mut backing).set_latency(Latency::try_from(8).unwrap());
        assert_eq!(backing, 0x8008_0f3f);
    }

    #[test]
    fn test_set_latency_every_value() {
        for v in 0..=15u8 {
            let mut backing = 0xffff_ffff;
            let reg = ctrl(&mut backing);
            reg.set_latency(Latency::try_from(v).unwrap());
            assert_eq!(backing & CONFIG_MASK, u32::from(v) << 16);
            assert_eq!(backing & !CONFIG_MASK, 0xff80_ffff);
            assert_eq!(reg.latency().cycles(), v);
        }
    }

    #[test]
    fn test_set_mode() {
        let mut backing = 0x8018_0000;
        let reg = ctrl(&mut backing);

        reg.set_mode(FlashMode::Dual);
        assert_eq!(backing, 0x8048_0000);
        assert_eq!(reg.mode(), FlashMode::Dual);

        reg.set_mode(FlashMode::QuadDdr);
        assert_eq!(backing, 0x8068_0000);

        reg.set_crm(true);
        assert!(reg.read().contains(SpiCtrl::CRM));
        reg.set_crm(false);
        assert_eq!(backing, 0x8068_0000);
    }
}
