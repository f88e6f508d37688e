//! Read mode command

use ravenfw_core::flash;
use ravenfw_core::regs::Reg;
use ravenfw_core::spi::{opcodes, FlashMode, SpiCtrl, SpiCtrlReg};
use ravenfw_dummy::DummyConfig;

use super::{capture, captured, open_dummy, Result, SPICTRL_RESET};

/// Select a controller read mode and print the resulting register value
///
/// Quad modes only work if the chip's CR1V quad flag is set; the command
/// reads it back and warns when it is not.
pub fn run(config: &DummyConfig, mode: FlashMode, crm: bool) -> Result<String> {
    let mut spictrl = SPICTRL_RESET;
    // SAFETY: `spictrl` outlives `ctrl` and nothing else aliases it
    let ctrl = SpiCtrlReg::new(unsafe { Reg::from_ptr(&mut spictrl as *mut u32) });
    let mut out = capture();

    if mode.requires_quad() {
        let mut io = open_dummy(config);
        let cr1 = flash::read_register(&mut io, opcodes::CR1V_ADDR)?;
        if cr1 & opcodes::CR1_QUAD == 0 {
            log::warn!(
                "{:?} needs the quad flag, but CR1V is {:#04x}; reads will fail",
                mode,
                cr1
            );
        }
    }

    ctrl.set_mode(mode);
    ctrl.set_crm(crm);

    let flags = ctrl.read();
    log::debug!("spictrl flags: {:?}", flags);

    out.print("spictrl 0x")?;
    out.print_hex(flags.bits(), 8)?;
    out.print(" lines ")?;
    out.print_dec(u32::from(ctrl.mode().data_lines()))?;
    if flags.contains(SpiCtrl::CRM) {
        out.print(" crm")?;
    }

    captured(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_single() {
        let out = run(&DummyConfig::default(), FlashMode::Single, false).unwrap();
        assert_eq!(out, "spictrl 0x80080000 lines  001");
    }

    #[test]
    fn test_mode_qddr_with_crm() {
        let out = run(&DummyConfig::default(), FlashMode::QuadDdr, true).unwrap();
        assert_eq!(out, "spictrl 0x80780000 lines  004 crm");
    }

    #[test]
    fn test_mode_dual() {
        let out = run(&DummyConfig::default(), FlashMode::Dual, false).unwrap();
        assert_eq!(out, "spictrl 0x80480000 lines  002");
    }
}
