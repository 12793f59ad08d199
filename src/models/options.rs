//! Flash invocation options

use std::fmt;

use serde::{Deserialize, Serialize};

/// SPI flash mode, rendered lower-case on the esptool command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FlashMode {
    Qio,
    Dio,
    Dout,
    Qout,
}

impl FlashMode {
    /// The value esptool expects for `--flash_mode`
    pub fn as_arg(&self) -> &'static str {
        match self {
            FlashMode::Qio => "qio",
            FlashMode::Dio => "dio",
            FlashMode::Dout => "dout",
            FlashMode::Qout => "qout",
        }
    }
}

impl fmt::Display for FlashMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

impl Default for FlashMode {
    fn default() -> Self {
        FlashMode::Dio
    }
}

/// Options for one `write_flash` invocation.
///
/// Transient: read fresh from the presentation layer (or CLI flags and
/// config defaults) each time a session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashOptions {
    /// Serial port device, e.g. "/dev/ttyUSB0" or "COM3"
    pub serial_port: String,
    pub flash_mode: FlashMode,
    /// Flash size argument, "detect" lets esptool probe the chip
    pub flash_size: String,
    /// Flash frequency argument, e.g. "40m"
    pub flash_freq: String,
    /// When false, `--no-compress` is passed to esptool
    pub compression: bool,
}

impl Default for FlashOptions {
    fn default() -> Self {
        Self {
            serial_port: String::new(),
            flash_mode: FlashMode::default(),
            flash_size: "detect".to_string(),
            flash_freq: "40m".to_string(),
            compression: true,
        }
    }
}
