//! Word-packed flash commands
//!
//! The flash worker shifts its buffer out MSB-first, word by word, and
//! shifts the chip's answer back into the same words. A command therefore
//! is a short array of `u32` whose most significant bytes go out first,
//! plus the number of bytes to clock and an optional write-enable opcode
//! that gets its own chip-select frame in front of the transfer.

use super::opcodes;
use crate::flash::Latency;

/// Number of payload words every command built here carries
pub const COMMAND_WORDS: usize = 2;

/// A single transfer for the flash worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashioCommand {
    /// Payload, transmitted in place and overwritten with the response
    pub words: [u32; COMMAND_WORDS],
    /// Number of bytes to clock
    pub len: usize,
    /// Write-enable opcode sent before the transfer, if any
    pub wren: Option<u8>,
}

impl FlashioCommand {
    /// Write SR1, CR1, CR2 and CR3 in one go, with `latency` in CR3
    ///
    /// Opcode `0x01` followed by four register bytes: five bytes on the wire,
    /// preceded by the volatile write enable `0x50`. The CR3 value leaves
    /// quad and DDR transfers disabled.
    pub fn write_all_registers(latency: Latency) -> Self {
        let first = u32::from_be_bytes([
            opcodes::WRR,
            opcodes::WRR_SR1,
            opcodes::WRR_CR1,
            opcodes::WRR_CR2,
        ]);
        let cr3 = opcodes::WRR_CR3_BASE | latency.cycles();
        Self {
            words: [first, u32::from(cr3) << 24],
            len: 5,
            wren: Some(opcodes::WRENV),
        }
    }

    /// Read one register from the "any register" address space
    ///
    /// Opcode, 3-byte address, one dummy byte and one data byte. The data
    /// byte ends up in the low byte of the second word.
    pub fn read_any_register(addr: u32) -> Self {
        Self {
            words: [(u32::from(opcodes::RDAR) << 24) | (addr & 0x00ff_ffff), 0],
            len: 6,
            wren: None,
        }
    }

    /// Byte read back by a [`read_any_register`](Self::read_any_register)
    /// command after it has been transferred
    pub fn register_value(&self) -> u8 {
        self.words[1] as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_all_registers_payload() {
        for v in 0..=15u8 {
            let cmd = FlashioCommand::write_all_registers(Latency::try_from(v).unwrap());
            assert_eq!(cmd.words[0], 0x0100_0260);
            assert_eq!(cmd.words[1] >> 24, u32::from((0x70 | v) & 0xff));
            assert_eq!(cmd.words[1] & 0x00ff_ffff, 0);
            assert_eq!(cmd.len, 5);
            assert_eq!(cmd.wren, Some(0x50));
        }
    }

    #[test]
    fn test_read_any_register_payload() {
        for addr in [0x80_0000, 0x80_0002, 0x80_0003, 0x80_0004] {
            let cmd = FlashioCommand::read_any_register(addr);
            assert_eq!(cmd.words, [0x6500_0000 | addr, 0]);
            assert_eq!(cmd.len, 6);
            assert_eq!(cmd.wren, None);
        }
    }

    #[test]
    fn test_register_value() {
        let mut cmd = FlashioCommand::read_any_register(0x80_0004);
        cmd.words[1] = 0x0000_0078;
        assert_eq!(cmd.register_value(), 0x78);
    }
}
