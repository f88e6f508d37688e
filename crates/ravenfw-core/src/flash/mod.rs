//! Flash chip configuration and diagnostics
//!
//! Both operations go through a [`FlashIo`](crate::flashio::FlashIo), so the
//! same code runs with the relocated worker on the SoC and with the bitbang
//! model against an emulated chip.

mod config;
mod inspect;

pub use config::{set_latency, Latency};
pub use inspect::{
    read_and_report, read_register, report_all, FlashRegister, RegisterReading, FLASH_REGISTERS,
};
