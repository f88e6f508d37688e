//! Register report command

use ravenfw_core::flash;
use ravenfw_dummy::DummyConfig;

use super::{capture, captured, open_dummy, Result};

/// Print SR1V, CR1V, CR2V and CR3V the way the firmware does at startup
pub fn run(config: &DummyConfig) -> Result<String> {
    let mut io = open_dummy(config);
    let mut out = capture();

    let readings = flash::report_all(&mut io, &mut out)?;
    for reading in &readings {
        log::debug!("{} = {:#04x}", reading.register.name, reading.value);
    }

    captured(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_default_chip() {
        let out = run(&DummyConfig::default()).unwrap();
        assert_eq!(
            out,
            "0x800000 SR1V 0x00  0x800002 CR1V 0x00  0x800003 CR2V 0x08  0x800004 CR3V 0x08  "
        );
    }

    #[test]
    fn test_report_custom_chip() {
        let config = DummyConfig {
            sr1: 0x03,
            cr1: 0x02,
            cr2: 0x60,
            cr3: 0x7f,
            ..Default::default()
        };
        let out = run(&config).unwrap();
        assert!(out.starts_with("0x800000 SR1V 0x03  "));
        assert!(out.ends_with("0x800004 CR3V 0x7f  "));
    }
}
