//! Copying the worker image into RAM

use core::ptr;
use core::sync::atomic::{compiler_fence, Ordering};

use crate::error::{Error, Result};

/// RAM region sized for an image of exactly `N` words
///
/// Usually a local in the function doing the transfer, so it lives on the
/// stack for the duration of a single call.
pub struct Scratch<const N: usize> {
    words: [u32; N],
}

impl<const N: usize> Default for Scratch<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Scratch<N> {
    /// Number of words the region holds
    pub const WORDS: usize = N;

    /// An empty region
    pub const fn new() -> Self {
        Self { words: [0; N] }
    }

    /// Copy `image` into the region, word by word
    ///
    /// The returned handle borrows the region and is the only way to reach
    /// the copied code, so it can exist only once the last word is in place.
    /// An image whose size differs from the region is refused before
    /// anything is copied.
    pub fn relocate(&mut self, image: &[u32]) -> Result<Relocated<'_>> {
        if image.len() != N {
            return Err(Error::ImageSizeMismatch {
                image: image.len(),
                scratch: N,
            });
        }

        for (dst, src) in self.words.iter_mut().zip(image) {
            // SAFETY: both references are valid and aligned; the volatile
            // accesses keep the copy from being merged or dropped.
            unsafe { ptr::write_volatile(dst, ptr::read_volatile(src)) };
        }
        compiler_fence(Ordering::SeqCst);

        Ok(Relocated { words: &self.words })
    }
}

/// A fully relocated image
#[derive(Debug)]
pub struct Relocated<'a> {
    words: &'a [u32],
}

impl Relocated<'_> {
    /// The copied words
    pub fn words(&self) -> &[u32] {
        self.words
    }

    /// Address execution starts at
    pub fn entry(&self) -> *const u32 {
        self.words.as_ptr()
    }

    /// Call the relocated routine as `extern "C" fn(data, len, wrencmd)`
    ///
    /// PicoRV32 has no instruction cache, so no fence is needed between the
    /// copy and the jump.
    ///
    /// # Safety
    ///
    /// The image must be position independent machine code following the C
    /// calling convention with that signature, and `data` must be valid for
    /// whatever the routine does with it.
    #[cfg(target_arch = "riscv32")]
    pub unsafe fn call(&self, data: *mut u32, len: u32, wrencmd: u32) {
        let entry: extern "C" fn(*mut u32, u32, u32) = core::mem::transmute(self.entry());
        entry(data, len, wrencmd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE: [u32; 6] = [
        0x0200_02b7,
        0x1200_0313,
        0x0062_9023,
        0x0002_81a3,
        0x0006_0a63,
        0x0000_8067,
    ];

    #[test]
    fn test_relocate_copies_every_word() {
        let mut scratch = Scratch::<6>::new();
        let relocated = scratch.relocate(&IMAGE).unwrap();

        assert_eq!(relocated.words(), &IMAGE);
        assert_eq!(relocated.entry(), relocated.words().as_ptr());
    }

    #[test]
    fn test_relocate_overwrites_previous_contents() {
        let mut scratch = Scratch::<6>::new();
        scratch.relocate(&[0xffff_ffff; 6]).unwrap();
        let relocated = scratch.relocate(&IMAGE).unwrap();
        assert_eq!(relocated.words(), &IMAGE);
    }

    #[test]
    fn test_relocate_size_mismatch() {
        let mut scratch = Scratch::<4>::new();
        assert_eq!(
            scratch.relocate(&IMAGE).unwrap_err(),
            Error::ImageSizeMismatch {
                image: 6,
                scratch: 4
            }
        );
        // Nothing was copied
        assert_eq!(scratch.words, [0; 4]);

        let mut scratch = Scratch::<8>::new();
        assert!(scratch.relocate(&IMAGE).is_err());
    }

    #[test]
    fn test_scratch_words() {
        assert_eq!(Scratch::<40>::WORDS, 40);
    }
}
