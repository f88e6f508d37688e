//! Flash worker protocol over software-driven pins
//!
//! [`transfer`] clocks exactly the bit sequence the SRAM worker produces,
//! but from Rust code against a [`BitbangSpiMaster`]. Host tests and the
//! developer CLI use it with the emulated chip from `ravenfw-dummy` to
//! check the commands built in [`crate::flash`] end to end.
//!
//! Running this on the Raven itself against the boot flash would pull the
//! rug out from under the instruction fetches; that is what the relocated
//! worker is for.

use super::{check_capacity, FlashIo};
use crate::error::Result;

/// Pin-level operations needed to bitbang single-line SPI
pub trait BitbangSpiMaster {
    /// Set chip select (CS is active low, so `active=true` means CS=0)
    ///
    /// Deselecting also returns the clock to low.
    fn set_cs(&mut self, active: bool);

    /// Set clock line value
    fn set_sck(&mut self, high: bool);

    /// Set MOSI/IO0 line value
    fn set_mosi(&mut self, high: bool);

    /// Get MISO/IO1 line value
    fn get_miso(&self) -> bool;

    /// Set SCK and MOSI in one step
    ///
    /// Default implementation calls `set_sck` then `set_mosi`.
    fn set_sck_set_mosi(&mut self, sck: bool, mosi: bool) {
        self.set_sck(sck);
        self.set_mosi(mosi);
    }

    /// Set SCK and sample MISO in one step
    ///
    /// Default implementation calls `set_sck` then `get_miso`.
    fn set_sck_get_miso(&mut self, sck: bool) -> bool {
        self.set_sck(sck);
        self.get_miso()
    }

    /// Take the pins over from the memory-mapped controller
    fn request_bus(&mut self) {}

    /// Hand the pins back to the memory-mapped controller
    fn release_bus(&mut self) {}
}

/// Write a byte, MSB first, ignoring MISO
pub fn write_byte<M: BitbangSpiMaster + ?Sized>(master: &mut M, byte: u8) {
    for i in (0..8).rev() {
        master.set_sck_set_mosi(false, (byte >> i) & 1 != 0);
        master.set_sck(true);
    }
}

/// Shift `bits` bits out of the top of `word`, shifting MISO in at the bottom
pub fn shift_word<M: BitbangSpiMaster + ?Sized>(master: &mut M, mut word: u32, bits: usize) -> u32 {
    for _ in 0..bits {
        master.set_sck_set_mosi(false, word >> 31 != 0);
        let miso = master.set_sck_get_miso(true);
        word = (word << 1) | u32::from(miso);
    }
    word
}

/// One complete worker transaction
///
/// Callers are expected to have checked that `len` bytes fit in `buf`.
pub fn transfer<M: BitbangSpiMaster + ?Sized>(
    master: &mut M,
    buf: &mut [u32],
    len: usize,
    wren: Option<u8>,
) {
    master.request_bus();
    master.set_cs(false);

    if let Some(opcode) = wren {
        master.set_cs(true);
        write_byte(master, opcode);
        master.set_cs(false);
    }

    let mut bits = len * 8;
    if bits > 0 {
        master.set_cs(true);
    }
    for word in buf.iter_mut() {
        if bits == 0 {
            break;
        }
        let n = bits.min(32);
        *word = shift_word(master, *word, n);
        bits -= n;
    }

    master.set_cs(false);
    master.release_bus();
}

/// [`FlashIo`] running the worker protocol over a [`BitbangSpiMaster`]
#[derive(Debug)]
pub struct Bitbang<M> {
    master: M,
}

impl<M: BitbangSpiMaster> Bitbang<M> {
    /// Wrap a pin-level master
    pub fn new(master: M) -> Self {
        Self { master }
    }

    /// The wrapped master
    pub fn master(&self) -> &M {
        &self.master
    }

    /// The wrapped master, mutably
    pub fn master_mut(&mut self) -> &mut M {
        &mut self.master
    }

    /// Unwrap the master
    pub fn into_inner(self) -> M {
        self.master
    }
}

impl<M: BitbangSpiMaster> FlashIo for Bitbang<M> {
    fn flashio(&mut self, buf: &mut [u32], len: usize, wren: Option<u8>) -> Result<()> {
        check_capacity(buf, len)?;
        log::trace!("bitbang flashio: {} bytes, wren {:?}", len, wren);
        transfer(&mut self.master, buf, len, wren);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    /// Records MOSI on every rising edge and answers with a fixed MISO pattern
    #[derive(Default)]
    struct Probe {
        cs: bool,
        sck: bool,
        mosi: bool,
        miso_pattern: u32,
        edges: usize,
        frames: Vec<Vec<bool>>,
        in_bus: bool,
        released: bool,
    }

    impl BitbangSpiMaster for Probe {
        fn set_cs(&mut self, active: bool) {
            if active && !self.cs {
                self.frames.push(Vec::new());
            }
            self.cs = active;
            if !active {
                self.sck = false;
            }
        }

        fn set_sck(&mut self, high: bool) {
            if high && !self.sck && self.cs {
                self.frames.last_mut().unwrap().push(self.mosi);
                self.edges += 1;
            }
            self.sck = high;
        }

        fn set_mosi(&mut self, high: bool) {
            self.mosi = high;
        }

        fn get_miso(&self) -> bool {
            let bit = (self.edges - 1) % 32;
            (self.miso_pattern >> (31 - bit)) & 1 != 0
        }

        fn request_bus(&mut self) {
            self.in_bus = true;
        }

        fn release_bus(&mut self) {
            self.released = self.in_bus;
        }
    }

    fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
        bits.chunks(8)
            .map(|c| c.iter().fold(0u8, |acc, &b| (acc << 1) | u8::from(b)))
            .collect()
    }

    #[test]
    fn test_write_enable_gets_own_frame() {
        let mut probe = Probe::default();
        let mut buf = [0x0100_0260, 0x7800_0000];
        transfer(&mut probe, &mut buf, 5, Some(0x50));

        assert_eq!(probe.frames.len(), 2);
        assert_eq!(bits_to_bytes(&probe.frames[0]), [0x50]);
        assert_eq!(bits_to_bytes(&probe.frames[1]), [0x01, 0x00, 0x02, 0x60, 0x78]);
        assert!(probe.released);
        assert!(!probe.cs);
    }

    #[test]
    fn test_no_write_enable_single_frame() {
        let mut probe = Probe::default();
        let mut buf = [0x6580_0000, 0];
        transfer(&mut probe, &mut buf, 6, None);

        assert_eq!(probe.frames.len(), 1);
        assert_eq!(
            bits_to_bytes(&probe.frames[0]),
            [0x65, 0x80, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_response_shifted_in_place() {
        let mut probe = Probe {
            miso_pattern: 0x00ab_0000,
            ..Default::default()
        };
        let mut buf = [0x6580_0004, 0, 0xdead_beef];
        transfer(&mut probe, &mut buf, 6, None);

        // First word: all 32 transmitted bits replaced by what came back
        assert_eq!(buf[0], 0x00ab_0000);
        // Second word: 16 bits clocked, response in the low half
        assert_eq!(buf[1], 0x0000_00ab);
        // Third word untouched
        assert_eq!(buf[2], 0xdead_beef);
    }

    #[test]
    fn test_zero_length_never_selects() {
        let mut probe = Probe::default();
        let mut buf = [0u32; 1];
        transfer(&mut probe, &mut buf, 0, None);
        assert!(probe.frames.is_empty());
        assert!(probe.released);
    }

    #[test]
    fn test_bitbang_flashio_checks_capacity() {
        let mut io = Bitbang::new(Probe::default());
        let mut buf = [0u32; 1];
        assert!(io.flashio(&mut buf, 5, None).is_err());
        assert!(io.master().frames.is_empty());
    }
}
