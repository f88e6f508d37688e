//! Number formatting commands

use super::{capture, captured, Result};

/// Four-character decimal rendering of `value`
pub fn dec(value: u32) -> Result<String> {
    let mut out = capture();
    out.print_dec(value)?;
    captured(out)
}

/// `digits` lowercase hex digits of `value`
pub fn hex(value: u32, digits: usize) -> Result<String> {
    let mut out = capture();
    out.print_hex(value, digits)?;
    captured(out)
}
