//! ravenfw-dummy - Bit-level flash emulator for testing
//!
//! This crate emulates the Raven board's S25FL-class flash chip at the pin
//! level: it watches chip select, clock and IO0, and drives IO1. Combined
//! with [`ravenfw_core::flashio::Bitbang`] it lets the latency configuration
//! and register inspection run on the host exactly as the SRAM worker runs
//! them on the SoC.
//!
//! Only the commands the firmware issues are understood: volatile write
//! enable (`0x50`), the combined register write (`0x01`) and Read Any
//! Register (`0x65`) on the volatile registers. Anything else is clocked
//! through and ignored.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use log::{debug, trace};
use ravenfw_core::flashio::BitbangSpiMaster;
use ravenfw_core::spi::opcodes;

/// Initial register contents of the dummy chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DummyConfig {
    /// Status Register 1
    pub sr1: u8,
    /// Configuration Register 1
    pub cr1: u8,
    /// Configuration Register 2
    pub cr2: u8,
    /// Configuration Register 3
    pub cr3: u8,
    /// Dummy cycles between address and data of Read Any Register
    pub rdar_dummy_cycles: u8,
}

impl Default for DummyConfig {
    fn default() -> Self {
        Self {
            sr1: 0x00,
            cr1: 0x00,
            cr2: 0x08,
            cr3: 0x08,
            rdar_dummy_cycles: 8,
        }
    }
}

/// Volatile status and configuration registers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registers {
    /// Status Register 1
    pub sr1: u8,
    /// Configuration Register 1
    pub cr1: u8,
    /// Configuration Register 2
    pub cr2: u8,
    /// Configuration Register 3
    pub cr3: u8,
}

impl Registers {
    /// Register at a Read Any Register address, if it is one we emulate
    pub fn by_addr(&self, addr: u32) -> Option<u8> {
        match addr {
            opcodes::SR1V_ADDR => Some(self.sr1),
            opcodes::CR1V_ADDR => Some(self.cr1),
            opcodes::CR2V_ADDR => Some(self.cr2),
            opcodes::CR3V_ADDR => Some(self.cr3),
            _ => None,
        }
    }

    /// Read latency currently programmed into CR3
    pub fn latency(&self) -> u8 {
        self.cr3 & opcodes::CR3_LATENCY_MASK
    }
}

/// Capacity of one frame's byte log
const FRAME_CAP: usize = 16;

/// Dummy flash chip
///
/// Emulates the chip behind the Raven SPI controller for testing purposes.
#[derive(Debug)]
pub struct DummyFlash {
    config: DummyConfig,
    regs: Registers,
    write_enabled: bool,
    manual_mode: bool,

    cs: bool,
    sck: bool,
    mosi: bool,
    miso: bool,

    /// Rising edges in the current frame
    cycle: usize,
    shift_in: u8,
    frame: [u8; FRAME_CAP],
    frame_len: usize,

    #[cfg(feature = "alloc")]
    transcript: Vec<Vec<u8>>,
}

impl DummyFlash {
    /// Create a new dummy flash with the given configuration
    pub fn new(config: DummyConfig) -> Self {
        Self {
            config,
            regs: Registers {
                sr1: config.sr1,
                cr1: config.cr1,
                cr2: config.cr2,
                cr3: config.cr3,
            },
            write_enabled: false,
            manual_mode: false,
            cs: false,
            sck: false,
            mosi: false,
            miso: true,
            cycle: 0,
            shift_in: 0,
            frame: [0; FRAME_CAP],
            frame_len: 0,
            #[cfg(feature = "alloc")]
            transcript: Vec::new(),
        }
    }

    /// Create a new dummy flash with default configuration
    pub fn new_default() -> Self {
        Self::new(DummyConfig::default())
    }

    /// Get the configuration
    pub fn config(&self) -> &DummyConfig {
        &self.config
    }

    /// Current register contents
    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    /// Returns true if the volatile write enable latch is set
    pub fn write_enabled(&self) -> bool {
        self.write_enabled
    }

    /// Returns true if the memory controller has handed the pins over
    pub fn in_manual_mode(&self) -> bool {
        self.manual_mode
    }

    /// Bytes received in every completed chip-select frame, oldest first
    #[cfg(feature = "alloc")]
    pub fn transcript(&self) -> &[Vec<u8>] {
        &self.transcript
    }

    /// Forget recorded frames
    #[cfg(feature = "alloc")]
    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
    }

    fn begin_frame(&mut self) {
        self.cycle = 0;
        self.shift_in = 0;
        self.frame_len = 0;
        self.miso = true;
    }

    fn end_frame(&mut self) {
        let frame = &self.frame[..self.frame_len.min(FRAME_CAP)];
        trace!("dummy flash: frame {:02x?}", frame);

        #[cfg(feature = "alloc")]
        self.transcript.push(frame.to_vec());

        match frame.first().copied() {
            Some(opcodes::WRENV) => {
                self.write_enabled = true;
            }
            Some(opcodes::WRR) => self.handle_write_registers(),
            _ => {}
        }
    }

    /// Registers are updated when chip select goes high, like on the part
    fn handle_write_registers(&mut self) {
        if !self.write_enabled {
            debug!("dummy flash: register write without write enable ignored");
            return;
        }
        let data = &self.frame[1..self.frame_len.min(FRAME_CAP)];
        let targets = [
            &mut self.regs.sr1,
            &mut self.regs.cr1,
            &mut self.regs.cr2,
            &mut self.regs.cr3,
        ];
        for (reg, &value) in targets.into_iter().zip(data) {
            *reg = value;
        }
        debug!("dummy flash: registers now {:02x?}", self.regs);
        self.write_enabled = false;
    }

    fn rdar_address(&self) -> u32 {
        u32::from_be_bytes([0, self.frame[1], self.frame[2], self.frame[3]])
    }

    /// Sample IO0 and prepare IO1 on a rising clock edge
    fn clock(&mut self) {
        let cycle = self.cycle;
        self.cycle += 1;

        self.shift_in = (self.shift_in << 1) | u8::from(self.mosi);
        if self.cycle % 8 == 0 {
            if self.frame_len < FRAME_CAP {
                self.frame[self.frame_len] = self.shift_in;
            }
            self.frame_len += 1;
            self.shift_in = 0;
        }

        self.miso = self.output_bit(cycle);
    }

    /// IO1 level during clock `cycle` of the current frame
    fn output_bit(&self, cycle: usize) -> bool {
        if self.frame_len == 0 || self.frame[0] != opcodes::RDAR {
            return true;
        }
        let data_start = 32 + usize::from(self.config.rdar_dummy_cycles);
        if cycle < data_start {
            return true;
        }
        let value = self.regs.by_addr(self.rdar_address()).unwrap_or(0xff);
        let bit = 7 - (cycle - data_start) % 8;
        (value >> bit) & 1 != 0
    }
}

impl Default for DummyFlash {
    fn default() -> Self {
        Self::new_default()
    }
}

impl BitbangSpiMaster for DummyFlash {
    fn set_cs(&mut self, active: bool) {
        if active && !self.cs {
            self.begin_frame();
        } else if !active && self.cs {
            self.end_frame();
        }
        self.cs = active;
        if !active {
            self.sck = false;
        }
    }

    fn set_sck(&mut self, high: bool) {
        if high && !self.sck && self.cs {
            self.clock();
        }
        self.sck = high;
    }

    fn set_mosi(&mut self, high: bool) {
        self.mosi = high;
    }

    fn get_miso(&self) -> bool {
        self.miso
    }

    fn request_bus(&mut self) {
        self.manual_mode = true;
    }

    fn release_bus(&mut self) {
        self.manual_mode = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ravenfw_core::flash::{self, Latency};
    use ravenfw_core::flashio::{Bitbang, FlashIo};
    use ravenfw_core::regs::Reg;
    use ravenfw_core::serial::Serial;
    use ravenfw_core::spi::SpiCtrlReg;

    #[test]
    fn test_read_registers() {
        let mut io = Bitbang::new(DummyFlash::new(DummyConfig {
            sr1: 0x1c,
            cr1: 0x02,
            cr2: 0x08,
            cr3: 0x78,
            ..Default::default()
        }));

        assert_eq!(flash::read_register(&mut io, 0x80_0000).unwrap(), 0x1c);
        assert_eq!(flash::read_register(&mut io, 0x80_0002).unwrap(), 0x02);
        assert_eq!(flash::read_register(&mut io, 0x80_0003).unwrap(), 0x08);
        assert_eq!(flash::read_register(&mut io, 0x80_0004).unwrap(), 0x78);
        assert!(!io.master().in_manual_mode());
    }

    #[test]
    fn test_unknown_register_reads_ones() {
        let mut io = Bitbang::new(DummyFlash::new_default());
        assert_eq!(flash::read_register(&mut io, 0x80_0001).unwrap(), 0xff);
    }

    #[test]
    fn test_set_latency_end_to_end() {
        let mut backing = 0x8000_0000u32;
        let ctrl = SpiCtrlReg::new(unsafe { Reg::from_ptr(&mut backing as *mut u32) });
        let mut io = Bitbang::new(DummyFlash::new_default());

        flash::set_latency(&ctrl, &mut io, Latency::try_from(12).unwrap()).unwrap();

        let chip = io.master();
        assert_eq!(chip.transcript()[0], [0x50]);
        assert_eq!(chip.transcript()[1], [0x01, 0x00, 0x02, 0x60, 0x7c]);
        assert_eq!(
            *chip.registers(),
            Registers {
                sr1: 0x00,
                cr1: 0x02,
                cr2: 0x60,
                cr3: 0x7c
            }
        );
        assert_eq!(chip.registers().latency(), 12);
        assert!(!chip.write_enabled());
        assert_eq!(backing, 0x800c_0000);

        let mut out = Serial::new(Vec::new());
        let readings = flash::report_all(&mut io, &mut out).unwrap();
        assert_eq!(readings[3].value, 0x7c);
        assert_eq!(
            String::from_utf8(out.into_inner()).unwrap(),
            "0x800000 SR1V 0x00  0x800002 CR1V 0x02  0x800003 CR2V 0x60  0x800004 CR3V 0x7c  "
        );
    }

    #[test]
    fn test_write_without_enable_ignored() {
        let mut io = Bitbang::new(DummyFlash::new_default());
        let mut buf = [0x0100_0260, 0x7f00_0000];
        io.flashio(&mut buf, 5, None).unwrap();

        assert_eq!(*io.master().registers(), Registers {
            sr1: 0x00,
            cr1: 0x00,
            cr2: 0x08,
            cr3: 0x08
        });
    }

    #[test]
    fn test_write_enable_consumed() {
        let mut io = Bitbang::new(DummyFlash::new_default());
        let mut buf = [0x0100_0260, 0x7100_0000];
        io.flashio(&mut buf, 5, Some(opcodes::WRENV)).unwrap();
        assert_eq!(io.master().registers().cr3, 0x71);

        // A second write without a new enable leaves things alone
        let mut buf = [0x0100_0260, 0x7500_0000];
        io.flashio(&mut buf, 5, None).unwrap();
        assert_eq!(io.master().registers().cr3, 0x71);
    }
}
