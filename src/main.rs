//! ravenfw - Raven flash I/O on the host
//!
//! Runs the firmware's flash latency configuration and register inspection
//! against an emulated flash chip, through the same bit sequence the SRAM
//! worker clocks on the SoC. Output is produced by the firmware's own serial
//! formatter, so what is printed here is what the board's UART would show.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    let output = match cli.command {
        Commands::Report { chip } => commands::report::run(&chip.config())?,
        Commands::SetLatency { latency, chip } => {
            commands::latency::run(&chip.config(), latency)?
        }
        Commands::Mode { mode, crm, chip } => {
            commands::mode::run(&chip.config(), mode.into(), crm)?
        }
        Commands::PrintDec { value } => commands::print::dec(value)?,
        Commands::PrintHex { value, digits } => commands::print::hex(value, digits)?,
    };

    println!("{}", output);
    Ok(())
}
