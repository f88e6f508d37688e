//! SPI controller types and flash command structures
//!
//! This module provides the Raven SPI control register, the flash read
//! modes the controller supports, the opcodes used against the flash
//! chip, and the word-packed command buffers handed to the flash worker.

mod command;
mod ctrl;
mod mode;
pub mod opcodes;

pub use command::FlashioCommand;
pub use ctrl::{SpiCtrl, SpiCtrlReg, CONFIG_MASK, LATENCY_MASK, LATENCY_SHIFT};
pub use mode::FlashMode;
pub use opcodes::*;
