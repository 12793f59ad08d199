//! Command line argument parsing

use crate::models::FlashMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "espfront")]
#[command(about = "🔥 Front-end for esptool.py - flash firmware to ESP32/ESP8266 devices")]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease logging verbosity (only errors)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Path to the esptool executable (overrides config and auto-detection)
    #[arg(long, global = true, value_name = "PATH")]
    pub tool: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// List serial ports available on this machine
    Ports,
    /// Flash firmware images to a device
    Flash {
        /// Serial port to flash to (e.g., /dev/ttyUSB0, COM3)
        #[arg(short, long)]
        port: String,
        /// SPI flash mode (qio, dio, dout, qout)
        #[arg(long, value_enum, ignore_case = true)]
        mode: Option<FlashMode>,
        /// Flash size, e.g. "4MB" ("detect" lets esptool probe the chip)
        #[arg(long)]
        size: Option<String>,
        /// Flash frequency, e.g. "40m"
        #[arg(long)]
        freq: Option<String>,
        /// Disable transfer compression
        #[arg(long)]
        no_compress: bool,
        /// Flash offset / firmware file pairs, e.g. 0x1000 boot.bin 0x8000 app.bin
        #[arg(value_name = "ADDR FILE", required = true, num_args = 2..)]
        images: Vec<String>,
    },
    /// Show esptool image_info output for a firmware file
    Info {
        /// Firmware file to inspect
        firmware: String,
    },
}
