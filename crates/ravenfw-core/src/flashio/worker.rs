//! SPI flash worker routine
//!
//! The routine lives in `.text` like any other code but is never called
//! there: it is only ever executed from its SRAM copy. It is plain RV32I,
//! assembled without compressed instructions so its size is a fixed number
//! of words, and it only uses PC-relative branches so it runs from any
//! address.
//!
//! Calling convention: `a0` = word buffer, `a1` = byte count, `a2` = write
//! enable opcode (0 = none).
//!
//! Sequence:
//! - chip select high, IO0 as output, controller into manual mode
//! - if `a2` is non-zero: the opcode, MSB first, in its own chip-select frame
//! - `a1 * 8` bits taken MSB first from consecutive words; after each rising
//!   clock edge IO1 is sampled and shifted into the low end of the same word,
//!   which is stored back when its bits are done
//! - chip select high, memory-mapped mode back on

use core::arch::global_asm;

/// Size of the worker image in 32-bit words
///
/// Must match the number of instructions between the two symbols below.
pub const WORKER_WORDS: usize = 40;

global_asm!(
    r#"
    .section .text.flashio_worker,"ax",@progbits
    .option push
    .option norvc
    .option norelax
    .balign 4
    .globl flashio_worker_begin
flashio_worker_begin:
    li   t0, 0x02000000       # SPI control register
    li   t1, 0x120            # CS high, IO0 output enabled
    sh   t1, 0(t0)
    sb   zero, 3(t0)          # manual mode

    beqz a2, 2f
    slli t2, a2, 24           # write enable opcode, MSB first
    li   t5, 8
1:  srli t4, t2, 31
    sb   t4, 0(t0)            # CS low, clock low, IO0 = bit
    ori  t4, t4, 0x10
    sb   t4, 0(t0)            # clock high
    slli t2, t2, 1
    addi t5, t5, -1
    bnez t5, 1b
    sb   t1, 0(t0)            # CS high

2:  slli a1, a1, 3            # bits left
3:  beqz a1, 6f
    lw   t2, 0(a0)
    li   t5, 32
    bgeu a1, t5, 4f
    mv   t5, a1
4:  sub  a1, a1, t5
5:  srli t4, t2, 31
    sb   t4, 0(t0)            # CS low, clock low, IO0 = bit
    ori  t4, t4, 0x10
    sb   t4, 0(t0)            # clock high
    lbu  t4, 0(t0)
    andi t4, t4, 2            # IO1
    srli t4, t4, 1
    slli t2, t2, 1
    or   t2, t2, t4
    addi t5, t5, -1
    bnez t5, 5b
    sw   t2, 0(a0)
    addi a0, a0, 4
    j    3b

6:  sb   t1, 0(t0)            # CS high
    li   t1, 0x80
    sb   t1, 3(t0)            # memory-mapped mode
    ret
    .balign 4
    .globl flashio_worker_end
flashio_worker_end:
    .option pop
"#
);

extern "C" {
    static flashio_worker_begin: [u32; 0];
    static flashio_worker_end: [u32; 0];
}

/// The worker's machine code as stored in flash
///
/// The length comes from the linker symbols, so a routine that grew or
/// shrank without updating [`WORKER_WORDS`] is caught when relocating.
pub fn image() -> &'static [u32] {
    // SAFETY: both symbols are defined above, in the same section, with the
    // end after the begin; the words in between are readable code.
    unsafe {
        let begin = core::ptr::addr_of!(flashio_worker_begin) as *const u32;
        let end = core::ptr::addr_of!(flashio_worker_end) as *const u32;
        let words = (end as usize - begin as usize) / 4;
        core::slice::from_raw_parts(begin, words)
    }
}
