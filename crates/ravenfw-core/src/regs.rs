//! Memory-mapped register access
//!
//! Every Raven peripheral register is reached through a [`Reg`], which holds
//! nothing but the register's address. Reads and writes are always volatile:
//! they are never cached, merged, reordered against each other, or elided,
//! even when a write stores the value that is already there.
//!
//! # Safety
//!
//! Constructing a `Reg` is unsafe because the address must stay valid for
//! volatile access for as long as the accessor is used. Once constructed,
//! accesses are safe: a register access cannot fail on this SoC.

use core::marker::PhantomData;
use core::ptr;

/// Raven peripheral address map
pub mod map {
    /// SPI memory controller configuration register
    pub const SPICTRL: usize = 0x0200_0000;
    /// UART clock divider
    pub const UART_CLKDIV: usize = 0x0200_0004;
    /// UART transmit data
    pub const UART_DATA: usize = 0x0200_0008;
    /// GPIO data
    pub const GPIO_DATA: usize = 0x0300_0000;
    /// GPIO output enable (0 = output)
    pub const GPIO_ENA: usize = 0x0300_0004;
    /// GPIO pull-up enable
    pub const GPIO_PU: usize = 0x0300_0008;
    /// GPIO pull-down enable
    pub const GPIO_PD: usize = 0x0300_000c;
}

/// Typed accessor for a single memory-mapped register
///
/// `T` is the access width (`u8`, `u16` or `u32`).
pub struct Reg<T: Copy> {
    ptr: *mut T,
    _marker: PhantomData<T>,
}

impl<T: Copy> Clone for Reg<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Copy> Copy for Reg<T> {}

impl<T: Copy> core::fmt::Debug for Reg<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Reg({:#010x})", self.ptr as usize)
    }
}

impl<T: Copy> Reg<T> {
    /// Create an accessor for the register at `addr`
    ///
    /// # Safety
    ///
    /// `addr` must be a properly aligned peripheral register (or memory word)
    /// that stays valid for volatile reads and writes of `T`.
    pub const unsafe fn new(addr: usize) -> Self {
        Self {
            ptr: addr as *mut T,
            _marker: PhantomData,
        }
    }

    /// Create an accessor from a raw pointer
    ///
    /// Host tests use this to point a register at an ordinary variable.
    ///
    /// # Safety
    ///
    /// Same requirements as [`Reg::new`].
    pub const unsafe fn from_ptr(ptr: *mut T) -> Self {
        Self {
            ptr,
            _marker: PhantomData,
        }
    }

    /// Address of the register
    pub fn addr(&self) -> usize {
        self.ptr as usize
    }

    /// Read the register
    #[inline]
    pub fn read(&self) -> T {
        // SAFETY: validity was promised when the accessor was constructed.
        unsafe { ptr::read_volatile(self.ptr) }
    }

    /// Write the register
    #[inline]
    pub fn write(&self, value: T) {
        // SAFETY: validity was promised when the accessor was constructed.
        unsafe { ptr::write_volatile(self.ptr, value) }
    }

    /// Read-modify-write the register
    #[inline]
    pub fn modify<F: FnOnce(T) -> T>(&self, f: F) {
        self.write(f(self.read()));
    }
}

impl Reg<u32> {
    /// Byte lane `n` (0 = least significant) of a 32-bit register
    ///
    /// The SPI controller is driven through byte-wide writes to individual
    /// lanes so that the other lanes are left untouched.
    pub fn byte(&self, n: usize) -> Reg<u8> {
        debug_assert!(n < 4, "byte lane out of range");
        // SAFETY: a lane of a valid 32-bit register is a valid byte register
        // on this little-endian core.
        unsafe { Reg::from_ptr((self.ptr as *mut u8).add(n)) }
    }
}
