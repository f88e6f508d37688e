//! Character, hex and decimal output over a byte sink
//!
//! On the SoC the sink is the [`Uart`](crate::uart::Uart) data register; on
//! the host anything implementing `embedded_io::Write` works. The formats are
//! fixed-width and allocation free:
//!
//! - hex: exactly the requested number of lowercase digits, no prefix
//! - decimal: four characters, `" 000"`..`" 999"`, `"1000"`..`"1999"`, and
//!   `"OVER"` for anything from 2000 up

use core::fmt;

use embedded_io::Write;

use crate::error::{Error, Result};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Largest value [`format_dec`] renders as a number
pub const DEC_MAX: u32 = 1999;

/// Hex digit for the nibble of `v` at position `i` (0 = least significant)
pub fn hex_digit(v: u32, i: usize) -> u8 {
    let shift = (4 * i) as u32;
    let nibble = v.checked_shr(shift).unwrap_or(0) & 15;
    HEX_DIGITS[nibble as usize]
}

/// Render `v` in the four-character decimal format
pub fn format_dec(v: u32) -> [u8; 4] {
    if v > DEC_MAX {
        return *b"OVER";
    }
    let lead = if v >= 1000 { b'1' } else { b' ' };
    let v = v % 1000;
    [
        lead,
        b'0' + (v / 100) as u8,
        b'0' + (v / 10 % 10) as u8,
        b'0' + (v % 10) as u8,
    ]
}

/// Formatting front end over a byte sink
#[derive(Debug)]
pub struct Serial<W> {
    inner: W,
}

impl<W: Write> Serial<W> {
    /// Wrap a sink
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// The wrapped sink
    pub fn inner(&self) -> &W {
        &self.inner
    }

    /// The wrapped sink, mutably
    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Unwrap the sink
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes).map_err(|_| Error::IoError)
    }

    /// Send one character; a newline goes out as CR LF
    pub fn putchar(&mut self, c: u8) -> Result<()> {
        if c == b'\n' {
            self.raw(b"\r")?;
        }
        self.raw(&[c])
    }

    /// Send a string
    pub fn print(&mut self, s: &str) -> Result<()> {
        s.bytes().try_for_each(|c| self.putchar(c))
    }

    /// Send the low `digits` nibbles of `v`, most significant first
    pub fn print_hex(&mut self, v: u32, digits: usize) -> Result<()> {
        (0..digits).rev().try_for_each(|i| self.putchar(hex_digit(v, i)))
    }

    /// Send `v` in the four-character decimal format
    pub fn print_dec(&mut self, v: u32) -> Result<()> {
        self.raw(&format_dec(v))
    }
}

impl<W: Write> fmt::Write for Serial<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s).map_err(|_| fmt::Error)
    }
}
