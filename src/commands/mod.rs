//! CLI command implementations
//!
//! Every command runs against a fresh [`DummyFlash`] through the bitbanged
//! worker protocol and returns what the firmware would have sent out of its
//! UART, with line endings as the serial formatter produces them.

pub mod latency;
pub mod mode;
pub mod print;
pub mod report;

use ravenfw_core::flashio::Bitbang;
use ravenfw_core::serial::Serial;
use ravenfw_dummy::{DummyConfig, DummyFlash};

/// Errors returned by CLI commands
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from the flash I/O core
    #[error(transparent)]
    Core(#[from] ravenfw_core::Error),

    /// Output was not valid UTF-8
    #[error("serial output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;

/// Flash I/O over an emulated chip
pub type DummyIo = Bitbang<DummyFlash>;

/// Create flash I/O for a freshly powered-up dummy chip
pub fn open_dummy(config: &DummyConfig) -> DummyIo {
    log::debug!("Using dummy flash: {:02x?}", config);
    Bitbang::new(DummyFlash::new(*config))
}

/// Serial formatter collecting into memory
pub fn capture() -> Serial<Vec<u8>> {
    Serial::new(Vec::new())
}

/// Text collected by a [`capture`] formatter
pub fn captured(out: Serial<Vec<u8>>) -> Result<String> {
    Ok(String::from_utf8(out.into_inner())?)
}

/// Reset value of the SPI control register: memory-mapped, 8 dummy cycles
pub const SPICTRL_RESET: u32 = 0x8008_0000;
