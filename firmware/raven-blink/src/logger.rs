//! `log` backend on the console UART

use core::fmt::Write;

use log::{LevelFilter, Log, Metadata, Record};
use ravenfw_core::serial::Serial;
use ravenfw_core::uart::Uart;

struct UartLogger;

impl Log for UartLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // SAFETY: the UART data register is write-only and every write is a
        // whole character, so sharing it with the foreground loop is fine
        let mut out = Serial::new(unsafe { Uart::raven() });
        let _ = writeln!(out, "[{}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: UartLogger = UartLogger;

/// Install the UART logger
///
/// The core has no atomic compare-and-swap, so this uses the racy setters.
/// Call it once, before anything logs.
pub fn init() {
    // SAFETY: single hart, no interrupts, called once at startup
    unsafe {
        let _ = log::set_logger_racy(&LOGGER);
        log::set_max_level_racy(LevelFilter::Info);
    }
}
