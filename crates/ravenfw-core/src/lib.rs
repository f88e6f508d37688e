//! ravenfw-core - Flash I/O and peripheral access for the Raven SoC
//!
//! The Raven CPU fetches its instructions from the same SPI flash chip that
//! it has to reconfigure. Any raw SPI transaction therefore runs from a copy
//! of a small worker routine placed in SRAM (see [`flashio`]). On top of that
//! this crate builds the flash latency configuration, the status/config
//! register inspector, and the polled UART output used to report them.
//!
//! The crate is `no_std`; everything except the relocated worker itself can
//! be exercised on the host.
//!
//! # Features
//!
//! - `raven2` - Raven 2 testboard clocking (default)
//! - `alloc` - Enable `embedded-io` impls for `Vec<u8>`
//! - `std` - Enable standard library support (includes `alloc`)
//!
//! # Example
//!
//! ```ignore
//! use ravenfw_core::board::Board;
//! use ravenfw_core::flash::{self, Latency};
//! use ravenfw_core::flashio::RamFlashio;
//! use ravenfw_core::serial::Serial;
//!
//! let board = unsafe { Board::take() };
//! let mut serial = Serial::new(board.uart);
//! let mut io = RamFlashio::new();
//! flash::set_latency(&board.spictrl, &mut io, Latency::try_from(8)?)?;
//! flash::report_all(&mut io, &mut serial)?;
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod board;
pub mod delay;
pub mod error;
pub mod flash;
pub mod flashio;
pub mod gpio;
pub mod regs;
pub mod serial;
pub mod spi;
pub mod uart;

pub use error::{Error, Result};
