//! CLI argument parsing

use clap::{Parser, Subcommand, ValueEnum};
use ravenfw_core::spi::FlashMode;
use ravenfw_dummy::DummyConfig;

/// Parse a string as a hex or decimal u32
pub fn parse_hex_u32(s: &str) -> Result<u32, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else {
        s.parse::<u32>().map_err(|e| format!("Invalid number: {}", e))
    }
}

/// Parse a string as a hex or decimal u8
fn parse_hex_u8(s: &str) -> Result<u8, String> {
    let v = parse_hex_u32(s)?;
    u8::try_from(v).map_err(|_| format!("Value {:#x} does not fit in a byte", v))
}

#[derive(Parser)]
#[command(name = "ravenfw")]
#[command(author, version, about = "Raven flash I/O against an emulated flash chip", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Power-on register contents of the emulated chip
#[derive(clap::Args, Debug, Clone)]
pub struct ChipArgs {
    /// Initial SR1V value
    #[arg(long, default_value = "0x00", value_parser = parse_hex_u8)]
    pub sr1: u8,

    /// Initial CR1V value
    #[arg(long, default_value = "0x00", value_parser = parse_hex_u8)]
    pub cr1: u8,

    /// Initial CR2V value
    #[arg(long, default_value = "0x08", value_parser = parse_hex_u8)]
    pub cr2: u8,

    /// Initial CR3V value
    #[arg(long, default_value = "0x08", value_parser = parse_hex_u8)]
    pub cr3: u8,
}

impl ChipArgs {
    /// Dummy chip configuration for these arguments
    pub fn config(&self) -> DummyConfig {
        DummyConfig {
            sr1: self.sr1,
            cr1: self.cr1,
            cr2: self.cr2,
            cr3: self.cr3,
            ..DummyConfig::default()
        }
    }
}

impl Default for ChipArgs {
    fn default() -> Self {
        let config = DummyConfig::default();
        Self {
            sr1: config.sr1,
            cr1: config.cr1,
            cr2: config.cr2,
            cr3: config.cr3,
        }
    }
}

/// Read modes selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Standard SPI (1-1-1)
    Single,
    /// Dual I/O (1-2-2)
    Dual,
    /// Quad I/O (1-4-4)
    Quad,
    /// Quad I/O, double data rate
    Qddr,
}

impl From<ModeArg> for FlashMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Single => FlashMode::Single,
            ModeArg::Dual => FlashMode::Dual,
            ModeArg::Quad => FlashMode::Quad,
            ModeArg::Qddr => FlashMode::QuadDdr,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the flash status/config registers
    Report {
        #[command(flatten)]
        chip: ChipArgs,
    },

    /// Change the flash read latency, then print the registers
    SetLatency {
        /// Latency in dummy cycles (0-15)
        latency: u8,

        #[command(flatten)]
        chip: ChipArgs,
    },

    /// Switch the controller's read mode
    Mode {
        /// Read mode to select
        #[arg(value_enum)]
        mode: ModeArg,

        /// Enable continuous read mode
        #[arg(long)]
        crm: bool,

        #[command(flatten)]
        chip: ChipArgs,
    },

    /// Print a number in the four-character decimal format
    PrintDec {
        /// Value (decimal or 0x-prefixed hex)
        #[arg(value_parser = parse_hex_u32)]
        value: u32,
    },

    /// Print a number as lowercase hex digits
    PrintHex {
        /// Value (decimal or 0x-prefixed hex)
        #[arg(value_parser = parse_hex_u32)]
        value: u32,

        /// Number of digits
        #[arg(short, long, default_value_t = 8)]
        digits: usize,
    },
}
