//! Reading back the flash status and configuration registers

use embedded_io::Write;
use log::trace;

use crate::error::Result;
use crate::flashio::FlashIo;
use crate::serial::Serial;
use crate::spi::{opcodes, FlashioCommand};

/// A flash register as shown in reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashRegister {
    /// Address in the "any register" space
    pub addr: u32,
    /// Short register name
    pub name: &'static str,
}

/// The four volatile status/config registers, in report order
pub const FLASH_REGISTERS: [FlashRegister; 4] = [
    FlashRegister {
        addr: opcodes::SR1V_ADDR,
        name: "SR1V",
    },
    FlashRegister {
        addr: opcodes::CR1V_ADDR,
        name: "CR1V",
    },
    FlashRegister {
        addr: opcodes::CR2V_ADDR,
        name: "CR2V",
    },
    FlashRegister {
        addr: opcodes::CR3V_ADDR,
        name: "CR3V",
    },
];

/// A register together with the value read from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterReading {
    /// Register that was read
    pub register: FlashRegister,
    /// Value returned by the chip
    pub value: u8,
}

/// Read one register with a six-byte Read Any Register transaction
pub fn read_register<F: FlashIo + ?Sized>(io: &mut F, addr: u32) -> Result<u8> {
    let mut cmd = FlashioCommand::read_any_register(addr);
    io.execute(&mut cmd)?;
    let value = cmd.register_value();
    trace!("flash register {:#08x} = {:#04x}", addr, value);
    Ok(value)
}

/// Read a register and print `0x<addr> <name> 0x<value>` followed by two spaces
pub fn read_and_report<F, W>(
    io: &mut F,
    out: &mut Serial<W>,
    register: &FlashRegister,
) -> Result<u8>
where
    F: FlashIo + ?Sized,
    W: Write,
{
    let value = read_register(io, register.addr)?;

    out.print("0x")?;
    out.print_hex(register.addr, 6)?;
    out.print(" ")?;
    out.print(register.name)?;
    out.print(" 0x")?;
    out.print_hex(u32::from(value), 2)?;
    out.print("  ")?;

    Ok(value)
}

/// Read and print SR1V, CR1V, CR2V and CR3V, in that order
pub fn report_all<F, W>(io: &mut F, out: &mut Serial<W>) -> Result<[RegisterReading; 4]>
where
    F: FlashIo + ?Sized,
    W: Write,
{
    let mut readings = FLASH_REGISTERS.map(|register| RegisterReading { register, value: 0 });
    for reading in readings.iter_mut() {
        reading.value = read_and_report(io, out, &reading.register)?;
    }
    Ok(readings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::String;
    use std::vec::Vec;

    /// Answers every register read with the low byte of its address plus 0x10
    #[derive(Default)]
    struct FakeChip {
        calls: Vec<([u32; 2], usize, Option<u8>)>,
    }

    impl FlashIo for FakeChip {
        fn flashio(&mut self, buf: &mut [u32], len: usize, wren: Option<u8>) -> Result<()> {
            self.calls.push(([buf[0], buf[1]], len, wren));
            let addr = buf[0] & 0x00ff_ffff;
            buf[1] = 0x0000_ff00 | ((addr & 0xff) + 0x10);
            Ok(())
        }
    }

    #[test]
    fn test_read_register_transaction() {
        let mut chip = FakeChip::default();
        let value = read_register(&mut chip, 0x80_0003).unwrap();

        assert_eq!(value, 0x13);
        assert_eq!(chip.calls, [([0x6580_0003, 0], 6, None)]);
    }

    #[test]
    fn test_read_and_report_format() {
        let mut chip = FakeChip::default();
        let mut out = Serial::new(Vec::new());
        read_and_report(&mut chip, &mut out, &FLASH_REGISTERS[1]).unwrap();

        let text = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(text, "0x800002 CR1V 0x12  ");
    }

    #[test]
    fn test_report_all_order() {
        let mut chip = FakeChip::default();
        let mut out = Serial::new(Vec::new());
        let readings = report_all(&mut chip, &mut out).unwrap();

        let addrs: Vec<u32> = chip.calls.iter().map(|c| c.0[0] & 0x00ff_ffff).collect();
        assert_eq!(addrs, [0x80_0000, 0x80_0002, 0x80_0003, 0x80_0004]);

        let names: Vec<&str> = readings.iter().map(|r| r.register.name).collect();
        assert_eq!(names, ["SR1V", "CR1V", "CR2V", "CR3V"]);
        assert_eq!(readings[3].value, 0x14);

        let text = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(
            text,
            "0x800000 SR1V 0x10  0x800002 CR1V 0x12  0x800003 CR2V 0x13  0x800004 CR3V 0x14  "
        );
    }
}
