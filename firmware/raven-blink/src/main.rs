//! Raven testboard demo firmware
//!
//! Runs straight from the SPI flash. At power-on it prints the flash chip's
//! status and configuration registers on the UART (reading them through the
//! SRAM copy of the flash worker), optionally changes the read latency, then
//! walks a light across the four LEDs forever.
//!
//! ## Memory map
//!
//! | Region       | Address      |
//! |--------------|--------------|
//! | SRAM (32K)   | `0x00000000` |
//! | SPI flash    | `0x00100000` |
//! | SPI control  | `0x02000000` |
//! | UART         | `0x02000004` |
//! | GPIO         | `0x03000000` |

#![no_std]
#![no_main]

#[cfg(feature = "log-uart")]
mod logger;

use core::arch::global_asm;

use panic_halt as _;
use ravenfw_core::board::{self, Board, LED_MASK};
use ravenfw_core::flash;
use ravenfw_core::flashio::RamFlashio;
use ravenfw_core::serial::Serial;
use ravenfw_core::uart::Uart;

/// Read latency programmed when the `flash-latency` feature is on
#[cfg(feature = "flash-latency")]
const FLASH_LATENCY: u8 = 8;

/// LED patterns, one per step
const WALK: [u32; 8] = [0x0, 0x1, 0x2, 0x4, 0x8, 0x4, 0x2, 0x1];

// Reset entry: stack, .data from flash, .bss cleared, then `main`. The
// PicoRV32 core has no machine-mode CSRs to set up.
global_asm!(
    r#"
    .section .text.start,"ax",@progbits
    .globl _start
_start:
    la   sp, _stack_top

    la   t0, _sidata
    la   t1, _sdata
    la   t2, _edata
1:  bgeu t1, t2, 2f
    lw   t3, 0(t0)
    sw   t3, 0(t1)
    addi t0, t0, 4
    addi t1, t1, 4
    j    1b

2:  la   t0, _sbss
    la   t1, _ebss
3:  bgeu t0, t1, 4f
    sw   zero, 0(t0)
    addi t0, t0, 4
    j    3b

4:  call main
5:  j    5b
"#
);

#[no_mangle]
extern "C" fn main() -> ! {
    // SAFETY: we are on the Raven and this is the only `Board`
    let board = unsafe { Board::take() };

    // All LEDs on while the board settles
    board.gpio.configure(0x0000, 0x0000, LED_MASK);
    board.gpio.set(LED_MASK);

    board.uart.set_divider(board::UART_CLKDIV);

    #[cfg(feature = "log-uart")]
    logger::init();

    board::STARTUP_DELAY.wait();

    let mut out = Serial::new(board.uart);
    if let Err(e) = report_flash(&board, &mut out) {
        log::error!("flash: {}", e);
    }

    loop {
        for pattern in WALK {
            board.gpio.set(pattern);
            board::STEP_DELAY.wait();
        }
    }
}

/// Print the controller setting and the flash registers
fn report_flash(board: &Board, out: &mut Serial<Uart>) -> ravenfw_core::Result<()> {
    let mut io = RamFlashio::new();

    out.print("\nRaven flash\nspictrl 0x")?;
    out.print_hex(board.spictrl.read().bits(), 8)?;
    out.print("\n")?;
    flash::report_all(&mut io, out)?;
    out.print("\n")?;

    #[cfg(feature = "flash-latency")]
    {
        let latency = flash::Latency::try_from(FLASH_LATENCY)?;
        flash::set_latency(&board.spictrl, &mut io, latency)?;
        log::info!("flash latency now {}", latency);

        flash::report_all(&mut io, out)?;
        out.print("\n")?;
    }

    Ok(())
}
