//! SPI flash opcodes and register layout of the Raven flash chip
//!
//! The board carries a Cypress S25FL-class part with volatile status and
//! configuration registers addressable through the "any register" commands.

// ============================================================================
// Write control
// ============================================================================

/// Write Enable for Volatile status/config registers
pub const WRENV: u8 = 0x50;

// ============================================================================
// Register operations
// ============================================================================

/// Write Registers - SR1, CR1, CR2 and CR3 in one transaction
///
/// The single-register volatile write does not take effect on this board,
/// so all four registers are always written together.
pub const WRR: u8 = 0x01;
/// Read Any Register (3-byte address, one dummy byte)
pub const RDAR: u8 = 0x65;

// ============================================================================
// Volatile register addresses (Read Any Register space)
// ============================================================================

/// Status Register 1, volatile copy
pub const SR1V_ADDR: u32 = 0x80_0000;
/// Configuration Register 1, volatile copy
pub const CR1V_ADDR: u32 = 0x80_0002;
/// Configuration Register 2, volatile copy
pub const CR2V_ADDR: u32 = 0x80_0003;
/// Configuration Register 3, volatile copy
pub const CR3V_ADDR: u32 = 0x80_0004;

// ============================================================================
// Values written by the combined register write
// ============================================================================

/// SR1: no block protection
pub const WRR_SR1: u8 = 0x00;
/// CR1: quad flag set, so the chip is ready for a later switch to quad mode
pub const WRR_CR1: u8 = CR1_QUAD;
/// CR2: fixed configuration
pub const WRR_CR2: u8 = 0x60;
/// CR3: fixed bits OR'd with the 4-bit latency; leaves DDR and QPI off
pub const WRR_CR3_BASE: u8 = 0x70;

// ============================================================================
// Register bit definitions
// ============================================================================

/// Status Register 1: Write In Progress
pub const SR1_WIP: u8 = 0x01;
/// Status Register 1: Write Enable Latch
pub const SR1_WEL: u8 = 0x02;
/// Configuration Register 1: Quad mode enable
pub const CR1_QUAD: u8 = 0x02;
/// Configuration Register 3: read latency field
pub const CR3_LATENCY_MASK: u8 = 0x0f;
