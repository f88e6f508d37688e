//! Latency change command

use ravenfw_core::flash::{self, Latency};
use ravenfw_core::regs::Reg;
use ravenfw_core::spi::SpiCtrlReg;
use ravenfw_dummy::DummyConfig;

use super::{capture, captured, open_dummy, Result, SPICTRL_RESET};

/// Set the read latency on controller and chip, then print the registers
pub fn run(config: &DummyConfig, latency: u8) -> Result<String> {
    let latency = Latency::try_from(latency)?;

    let mut spictrl = SPICTRL_RESET;
    // SAFETY: `spictrl` outlives `ctrl` and nothing else aliases it
    let ctrl = SpiCtrlReg::new(unsafe { Reg::from_ptr(&mut spictrl as *mut u32) });
    let mut io = open_dummy(config);
    let mut out = capture();

    flash::set_latency(&ctrl, &mut io, latency)?;
    log::info!(
        "spictrl {:#010x}, chip latency {}",
        spictrl,
        io.master().registers().latency()
    );

    out.print("spictrl 0x")?;
    out.print_hex(spictrl, 8)?;
    out.print("\n")?;
    flash::report_all(&mut io, &mut out)?;

    captured(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CliError;

    #[test]
    fn test_set_latency_reports_new_cr3() {
        let out = run(&DummyConfig::default(), 5).unwrap();
        assert_eq!(
            out,
            "spictrl 0x80050000\r\n\
             0x800000 SR1V 0x00  0x800002 CR1V 0x02  0x800003 CR2V 0x60  0x800004 CR3V 0x75  "
        );
    }

    #[test]
    fn test_set_latency_zero_and_max() {
        assert!(run(&DummyConfig::default(), 0)
            .unwrap()
            .ends_with("CR3V 0x70  "));
        assert!(run(&DummyConfig::default(), 15)
            .unwrap()
            .ends_with("CR3V 0x7f  "));
    }

    #[test]
    fn test_set_latency_out_of_range() {
        let err = run(&DummyConfig::default(), 16).unwrap_err();
        assert!(matches!(
            err,
            CliError::Core(ravenfw_core::Error::InvalidLatency(16))
        ));
    }
}
