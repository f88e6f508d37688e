//! Raw SPI transfers against the boot flash
//!
//! The Raven CPU executes straight out of the SPI flash through the memory
//! controller. To talk to the chip directly the controller has to leave
//! memory-mapped mode, and from that moment no instruction can be fetched
//! from flash. Transfers are therefore done by a small worker routine that
//! is copied into SRAM and called there:
//!
//! 1. [`worker`] holds the routine's machine code between two linker
//!    symbols in flash.
//! 2. [`Scratch::relocate`] copies the whole image into a RAM region of
//!    exactly the image's size and only then hands out a [`Relocated`]
//!    handle, so a partially copied routine can never be called.
//! 3. [`RamFlashio`] ties both together behind the [`FlashIo`] trait.
//!
//! [`Bitbang`] performs the same bit sequence in Rust against any
//! [`BitbangSpiMaster`]. It exists for emulated flash chips on the host and
//! must never be pointed at the flash the CPU is executing from.
//!
//! There is exactly one transfer in flight at any time. The worker does not
//! call back into Rust, and nothing here is reentrant.

pub mod bitbang;
mod relocate;
#[cfg(target_arch = "riscv32")]
pub mod worker;

pub use bitbang::{Bitbang, BitbangSpiMaster};
pub use relocate::{Relocated, Scratch};

use crate::error::{Error, Result};
use crate::spi::FlashioCommand;

/// A way of running one raw SPI transaction against the flash chip
///
/// The buffer is sent MSB-first, one word after another, and the bits
/// clocked in from the chip replace the transmitted ones in place. Only the
/// first `len` bytes are clocked; words beyond them are left untouched.
pub trait FlashIo {
    /// Run a transaction of `len` bytes over `buf`
    ///
    /// With `wren` set, that opcode is sent in its own chip-select frame
    /// before the transaction.
    fn flashio(&mut self, buf: &mut [u32], len: usize, wren: Option<u8>) -> Result<()>;

    /// Run a prepared command, leaving the response in `cmd.words`
    fn execute(&mut self, cmd: &mut FlashioCommand) -> Result<()> {
        self.flashio(&mut cmd.words, cmd.len, cmd.wren)
    }
}

impl<T: FlashIo + ?Sized> FlashIo for &mut T {
    fn flashio(&mut self, buf: &mut [u32], len: usize, wren: Option<u8>) -> Result<()> {
        (**self).flashio(buf, len, wren)
    }
}

/// Check that `len` bytes fit in `buf`
pub fn check_capacity(buf: &[u32], len: usize) -> Result<()> {
    let capacity = buf.len() * 4;
    if len > capacity {
        return Err(Error::BufferTooSmall { len, capacity });
    }
    Ok(())
}

/// Flash transfers through the SRAM copy of the worker routine
///
/// Each call relocates the worker into a scratch region on the stack and
/// jumps to it. The region lives exactly as long as one call.
#[cfg(target_arch = "riscv32")]
#[derive(Debug, Default)]
pub struct RamFlashio {
    _private: (),
}

#[cfg(target_arch = "riscv32")]
impl RamFlashio {
    /// Create the executor
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

#[cfg(target_arch = "riscv32")]
impl FlashIo for RamFlashio {
    fn flashio(&mut self, buf: &mut [u32], len: usize, wren: Option<u8>) -> Result<()> {
        check_capacity(buf, len)?;
        log::trace!("flashio: {} bytes, wren {:?}", len, wren);

        let mut scratch = Scratch::<{ worker::WORKER_WORDS }>::new();
        let relocated = scratch.relocate(worker::image())?;

        // SAFETY: the relocated image is the complete worker, which follows
        // the C calling convention and only touches `buf[..len.div_ceil(4)]`
        // and the SPI control register. The capacity check above covers
        // the buffer.
        unsafe {
            relocated.call(buf.as_mut_ptr(), len as u32, u32::from(wren.unwrap_or(0)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec;
    use std::vec::Vec;

    struct Recorder {
        calls: Vec<(Vec<u32>, usize, Option<u8>)>,
    }

    impl FlashIo for Recorder {
        fn flashio(&mut self, buf: &mut [u32], len: usize, wren: Option<u8>) -> Result<()> {
            check_capacity(buf, len)?;
            self.calls.push((buf.to_vec(), len, wren));
            Ok(())
        }
    }

    fn write_enable_only<F: FlashIo>(mut io: F) -> Result<()> {
        let mut buf = [0u32; 1];
        io.flashio(&mut buf, 0, Some(0x50))
    }

    #[test]
    fn test_check_capacity() {
        let buf = [0u32; 2];
        assert!(check_capacity(&buf, 0).is_ok());
        assert!(check_capacity(&buf, 8).is_ok());
        assert_eq!(
            check_capacity(&buf, 9),
            Err(Error::BufferTooSmall { len: 9, capacity: 8 })
        );
    }

    #[test]
    fn test_execute_forwards_command() {
        let mut io = Recorder { calls: Vec::new() };
        let mut cmd = FlashioCommand::read_any_register(0x80_0002);
        io.execute(&mut cmd).unwrap();

        assert_eq!(io.calls.len(), 1);
        assert_eq!(io.calls[0], (vec![0x6580_0002, 0], 6, None));
    }

    #[test]
    fn test_mut_ref_forwarding() {
        let mut io = Recorder { calls: Vec::new() };
        write_enable_only(&mut io).unwrap();
        assert_eq!(io.calls, vec![(vec![0], 0, Some(0x50))]);
    }

    #[test]
    fn test_buffer_too_small_is_rejected() {
        let mut io = Recorder { calls: Vec::new() };
        let mut buf = [0u32; 1];
        assert!(io.flashio(&mut buf, 5, None).is_err());
        assert!(io.calls.is_empty());
    }
}
